//! 正解カメラ軌跡（`.cam.csv`）のスキーマ
//!
//! レンダリング側のエクスポータが1フレーム1行で出力する。
//! 集計パイプライン自体は読まないが、推定器側の入力形式としてここで固定する。

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

pub const GROUND_TRUTH_HEADER: [&str; 10] = [
    "frame", "fov_x", "fov_y", "rot_w", "rot_i", "rot_j", "rot_k", "pos_x", "pos_y", "pos_z",
];

/// 1フレーム分のカメラ姿勢
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthRecord {
    pub frame: u32,
    /// 水平画角（ラジアン）
    pub fov_x: f64,
    /// 垂直画角（ラジアン）
    pub fov_y: f64,
    /// 回転（単位四元数 w, i, j, k）
    pub rot_w: f64,
    pub rot_i: f64,
    pub rot_j: f64,
    pub rot_k: f64,
    /// 位置（シーン単位）
    pub pos_x: f64,
    pub pos_y: f64,
    pub pos_z: f64,
}

impl GroundTruthRecord {
    pub fn rotation(&self) -> [f64; 4] {
        [self.rot_w, self.rot_i, self.rot_j, self.rot_k]
    }

    pub fn position(&self) -> [f64; 3] {
        [self.pos_x, self.pos_y, self.pos_z]
    }

    /// エクスポータと同じ桁数（画角・位置は3桁、回転は5桁）で文字列化
    fn to_fields(self) -> [String; 10] {
        [
            self.frame.to_string(),
            format!("{:.3}", self.fov_x),
            format!("{:.3}", self.fov_y),
            format!("{:.5}", self.rot_w),
            format!("{:.5}", self.rot_i),
            format!("{:.5}", self.rot_j),
            format!("{:.5}", self.rot_k),
            format!("{:.3}", self.pos_x),
            format!("{:.3}", self.pos_y),
            format!("{:.3}", self.pos_z),
        ]
    }
}

pub fn read_ground_truth(path: &Path) -> Result<Vec<GroundTruthRecord>> {
    let file = File::open(path).map_err(|e| StatsError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<GroundTruthRecord>, _>>()
        .map_err(|e| StatsError::csv(path, e))
}

pub fn write_ground_truth<W: Write>(writer: W, records: &[GroundTruthRecord]) -> csv::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(GROUND_TRUTH_HEADER)?;
    for record in records {
        out.write_record(record.to_fields())?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_ground_truth_file(path: &Path, records: &[GroundTruthRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| StatsError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_ground_truth(&mut writer, records).map_err(|e| StatsError::csv(path, e))?;
    writer.flush().map_err(|e| StatsError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> GroundTruthRecord {
        GroundTruthRecord {
            frame: 1,
            fov_x: 0.857_556,
            fov_y: 0.503_1,
            rot_w: 0.707_106_78,
            rot_i: 0.707_106_78,
            rot_j: 0.0,
            rot_k: 0.0,
            pos_x: 7.358_9,
            pos_y: -6.925_8,
            pos_z: 4.958_9,
        }
    }

    #[test]
    fn writes_exporter_precision() {
        let mut buf = Vec::new();
        write_ground_truth(&mut buf, &[sample()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "frame,fov_x,fov_y,rot_w,rot_i,rot_j,rot_k,pos_x,pos_y,pos_z\n\
             1,0.858,0.503,0.70711,0.70711,0.00000,0.00000,7.359,-6.926,4.959\n"
        );
    }

    #[test]
    fn reads_exporter_output() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("scene.blend.cam.csv");
        write_ground_truth_file(&p, &[sample()]).unwrap();

        let records = read_ground_truth(&p).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].frame, 1);
        assert_eq!(records[0].rotation(), [0.70711, 0.70711, 0.0, 0.0]);
        assert_eq!(records[0].position(), [7.359, -6.926, 4.959]);
    }

    #[test]
    fn rejects_rows_with_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("bad.cam.csv");
        std::fs::write(&p, "frame,fov_x,fov_y\n1,0.5,0.5\n").unwrap();
        assert!(matches!(read_ground_truth(&p), Err(StatsError::Csv { .. })));
    }
}
