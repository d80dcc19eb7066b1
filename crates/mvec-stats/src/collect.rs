//! 結果ディレクトリの走査と実行ごとの統計値の収集
//!
//! ルート直下の `<decoder>_<clip>` ディレクトリを名前順に走査し、
//! 各結果ファイルの平均値を `(decoder, estimator, clip)` キーで記録する。
//! 同じキーが再び現れた場合は後から読んだ値で上書きする。

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::{Clip, Decoder, Estimator, Mode};
use crate::config::StatsConfig;
use crate::error::{Result, StatsError};
use crate::naming::{decode_directory, decode_file_path};
use crate::table::{mean, Header, Table};

/// 誤差ファイルの総合誤差列
pub const ERROR_COLUMN: &str = "error";
/// 軸ごとの誤差列（roll, pitch, yaw）
pub const AXIS_ERROR_COLUMNS: [&str; 3] = ["error_r", "error_p", "error_y"];

/// 1つの実験条件を表す複合キー
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExperimentKey {
    decoder: Decoder,
    estimator: Estimator,
    clip: Clip,
}

impl ExperimentKey {
    pub fn new(decoder: Decoder, estimator: Estimator, clip: Clip) -> Self {
        Self {
            decoder,
            estimator,
            clip,
        }
    }

    pub fn decoder(&self) -> Decoder {
        self.decoder
    }

    pub fn estimator(&self) -> Estimator {
        self.estimator
    }

    pub fn clip(&self) -> Clip {
        self.clip
    }
}

/// 1モード分の統計値（キー順 = デコーダ, 推定器, クリップ）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarMap {
    values: BTreeMap<ExperimentKey, f64>,
}

impl ScalarMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を記録し、上書きした場合は以前の値を返す
    pub fn insert(&mut self, key: ExperimentKey, value: f64) -> Option<f64> {
        self.values.insert(key, value)
    }

    pub fn get(&self, key: &ExperimentKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExperimentKey, f64)> + '_ {
        self.values.iter().map(|(k, v)| (k, *v))
    }

    /// 値を1つ以上持つデコーダ（カタログ順）
    pub fn decoders(&self) -> BTreeSet<Decoder> {
        self.values.keys().map(ExperimentKey::decoder).collect()
    }

    /// 指定デコーダの `(estimator, clip, value)`（推定器カタログ順、クリップ辞書順）
    pub fn for_decoder(&self, decoder: Decoder) -> impl Iterator<Item = (Estimator, Clip, f64)> + '_ {
        self.values
            .iter()
            .filter(move |(k, _)| k.decoder == decoder)
            .map(|(k, v)| (k.estimator, k.clip, *v))
    }
}

impl FromIterator<(ExperimentKey, f64)> for ScalarMap {
    fn from_iter<I: IntoIterator<Item = (ExperimentKey, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// 誤差ファイル1つ分の平均誤差（度）
///
/// 集計出力に使うのは `total` のみ。軸別の列はファイルにあれば計算し、
/// 列がない・値が1つもない場合は `None`。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorBreakdown {
    pub total: f64,
    pub roll: Option<f64>,
    pub pitch: Option<f64>,
    pub yaw: Option<f64>,
}

impl ErrorBreakdown {
    pub fn from_table(table: &Table) -> Result<Self> {
        let total = table.column(ERROR_COLUMN)?.mean()?.to_degrees();
        let axis = |name: &str| -> Result<Option<f64>> {
            if !table.has_column(name) {
                return Ok(None);
            }
            let values = table.column(name)?.values()?;
            Ok(mean(&values).map(f64::to_degrees))
        };
        let [r, p, y] = AXIS_ERROR_COLUMNS;
        Ok(Self {
            total,
            roll: axis(r)?,
            pitch: axis(p)?,
            yaw: axis(y)?,
        })
    }
}

/// 走査の集計（ログ・JSON出力用）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanCounters {
    pub dirs_scanned: u32,
    pub dirs_skipped: u32,
    pub files_recorded: u32,
    pub files_skipped: u32,
    pub overwritten: u32,
}

/// 収集結果（モードごとに1つ）
#[derive(Debug, Clone, Default)]
pub struct CollectedStats {
    pub error: ScalarMap,
    pub performance: ScalarMap,
    pub counters: ScanCounters,
}

impl CollectedStats {
    pub fn scalars(&self, mode: Mode) -> &ScalarMap {
        match mode {
            Mode::Error => &self.error,
            Mode::Performance => &self.performance,
        }
    }

    fn scalars_mut(&mut self, mode: Mode) -> &mut ScalarMap {
        match mode {
            Mode::Error => &mut self.error,
            Mode::Performance => &mut self.performance,
        }
    }
}

/// 結果ツリーの走査
pub struct StatsCollector<'a> {
    root: &'a Path,
    filter: &'a str,
}

impl<'a> StatsCollector<'a> {
    pub fn new(config: &'a StatsConfig) -> Self {
        Self {
            root: &config.root,
            filter: &config.filter,
        }
    }

    pub fn collect(&self) -> Result<CollectedStats> {
        let mut out = CollectedStats::default();

        for dir in sorted_entries(self.root)? {
            if !dir.is_dir() {
                continue;
            }
            let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some((decoder, clip)) = decode_directory(name) else {
                log::debug!("skip directory (unrecognized name): {}", dir.display());
                out.counters.dirs_skipped += 1;
                continue;
            };
            if !name.contains(self.filter) {
                log::debug!("skip directory (filter {:?}): {}", self.filter, dir.display());
                out.counters.dirs_skipped += 1;
                continue;
            }
            out.counters.dirs_scanned += 1;
            self.collect_dir(&dir, decoder, clip, &mut out)?;
        }

        log::info!(
            "collected {} error / {} performance values from {} directories",
            out.error.len(),
            out.performance.len(),
            out.counters.dirs_scanned
        );
        Ok(out)
    }

    fn collect_dir(
        &self,
        dir: &Path,
        decoder: Decoder,
        clip: Clip,
        out: &mut CollectedStats,
    ) -> Result<()> {
        for path in sorted_entries(dir)? {
            if !path.is_file() {
                continue;
            }
            let Some(file) = decode_file_path(&path) else {
                out.counters.files_skipped += 1;
                continue;
            };
            let Some(estimator) = Estimator::from_raw_code(file.raw_code) else {
                log::debug!("skip file (unknown estimator {:?}): {}", file.raw_code, path.display());
                out.counters.files_skipped += 1;
                continue;
            };

            let value = run_scalar(&path, file.mode)?;
            let key = ExperimentKey::new(decoder, estimator, clip);
            log::trace!("{decoder}/{estimator}/{clip} {}: {value}", file.mode);

            if let Some(previous) = out.scalars_mut(file.mode).insert(key, value) {
                log::warn!(
                    "duplicate {} result for {decoder}/{estimator}/{clip}: {previous} replaced by {value} ({})",
                    file.mode,
                    path.display()
                );
                out.counters.overwritten += 1;
            }
            out.counters.files_recorded += 1;
        }
        Ok(())
    }
}

/// 結果ファイル1つの代表値（誤差は度、性能は平均時間）
pub fn run_scalar(path: &Path, mode: Mode) -> Result<f64> {
    match mode {
        Mode::Error => {
            let table = Table::load(path, Header::Present)?;
            Ok(ErrorBreakdown::from_table(&table)?.total)
        }
        Mode::Performance => Table::load(path, Header::Absent)?.column_at(0)?.mean(),
    }
}

/// ディレクトリ直下のエントリを名前順で返す
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let read = fs::read_dir(dir).map_err(|e| StatsError::io(dir, e))?;
    let mut paths = read
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| StatsError::io(dir, e))?;
    paths.sort();
    Ok(paths)
}
