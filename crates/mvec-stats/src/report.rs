//! 集計表のCSV出力

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, StatsError};
use crate::matrix::ResultMatrix;
use crate::summary::PerformanceSummary;

/// 横断サマリの出力ファイル名
pub const SUMMARY_FILE_NAME: &str = "perf.csv";

/// 行ラベル付きの2次元表
///
/// ヘッダ行の先頭セル（行ラベル列の名前）は空。`None` のセルは空欄で書く。
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTable {
    pub column_labels: Vec<String>,
    pub row_labels: Vec<String>,
    pub rows: Vec<Vec<Option<f64>>>,
}

impl From<&ResultMatrix> for LabeledTable {
    fn from(m: &ResultMatrix) -> Self {
        Self {
            column_labels: m.estimators().iter().map(|e| e.display_name().to_owned()).collect(),
            row_labels: m.clips().iter().map(|c| c.as_str().to_owned()).collect(),
            rows: m.rows().iter().map(|r| r.iter().copied().map(Some).collect()).collect(),
        }
    }
}

impl From<&PerformanceSummary> for LabeledTable {
    fn from(s: &PerformanceSummary) -> Self {
        Self {
            column_labels: s.estimators.iter().map(|e| e.display_name().to_owned()).collect(),
            row_labels: s.rows.iter().map(|r| r.decoder.as_str().to_owned()).collect(),
            rows: s.rows.iter().map(|r| r.cells.clone()).collect(),
        }
    }
}

/// 数値の文字列表現
///
/// 往復可能な最短表記。整数値は `3.0` のように小数点以下1桁を残し、NaN は空欄。
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        return format!("{value:.1}");
    }
    format!("{value}")
}

fn format_cell(cell: Option<f64>) -> String {
    cell.map(format_value).unwrap_or_default()
}

pub fn write_table<W: Write>(writer: W, table: &LabeledTable) -> csv::Result<()> {
    let mut out = csv::WriterBuilder::new().flexible(false).from_writer(writer);

    let mut header = Vec::with_capacity(table.column_labels.len() + 1);
    header.push(String::new());
    header.extend(table.column_labels.iter().cloned());
    out.write_record(&header)?;

    for (label, row) in table.row_labels.iter().zip(&table.rows) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(label.clone());
        record.extend(row.iter().copied().map(format_cell));
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}

/// ファイルへ書き出す（親ディレクトリがなければ作成）
pub fn write_table_file(path: &Path, table: &LabeledTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StatsError::io(parent, e))?;
        }
    }
    let file = File::create(path).map_err(|e| StatsError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_table(&mut writer, table).map_err(|e| StatsError::csv(path, e))?;
    writer.flush().map_err(|e| StatsError::io(path, e))?;
    log::info!("wrote {} ({} rows)", path.display(), table.rows.len());
    Ok(())
}
