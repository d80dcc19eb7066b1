//! 姿勢推定ベンチマーク結果の集計
//!
//! `<decoder>_<clip>` ディレクトリに散らばった推定器ごとの結果CSVから
//! 平均角度誤差・平均処理時間を求め、デコーダ別の表とデコーダ横断の
//! 性能サマリを書き出す。

pub mod catalog;
pub mod collect;
pub mod config;
pub mod error;
pub mod ground_truth;
pub mod matrix;
pub mod naming;
pub mod pipeline;
pub mod report;
pub mod summary;
pub mod table;

pub use catalog::{Clip, Decoder, Estimator, Mode};
pub use collect::{CollectedStats, ErrorBreakdown, ExperimentKey, ScalarMap, ScanCounters, StatsCollector};
pub use config::StatsConfig;
pub use error::{Result, StatsError};
pub use matrix::{CoverageError, ResultMatrix};
pub use naming::{decode_directory, decode_file, FileName};
pub use pipeline::{run, RunReport};
pub use report::{write_table, write_table_file, LabeledTable};
pub use summary::{PerformanceSummary, SummaryRow};
