//! 収集から出力までの一括実行

use std::path::PathBuf;

use serde::Serialize;

use crate::catalog::Mode;
use crate::collect::{CollectedStats, ScanCounters, StatsCollector};
use crate::config::StatsConfig;
use crate::error::Result;
use crate::matrix::ResultMatrix;
use crate::report::{write_table_file, LabeledTable, SUMMARY_FILE_NAME};
use crate::summary::PerformanceSummary;

/// 実行結果
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub written: Vec<PathBuf>,
    pub counters: ScanCounters,
    pub summary: PerformanceSummary,
}

/// 全行列を組み立ててから書き出す。網羅性エラーがあれば何も書かない。
pub fn run(config: &StatsConfig) -> Result<RunReport> {
    let stats = StatsCollector::new(config).collect()?;
    write_reports(config, &stats)
}

pub fn write_reports(config: &StatsConfig, stats: &CollectedStats) -> Result<RunReport> {
    let mut matrices = ResultMatrix::build_all(stats.scalars(Mode::Error), Mode::Error)?;
    matrices.extend(ResultMatrix::build_all(stats.scalars(Mode::Performance), Mode::Performance)?);
    let summary = PerformanceSummary::build(stats.scalars(Mode::Performance));

    let mut written = Vec::with_capacity(matrices.len() + 1);
    for matrix in &matrices {
        let path = config.out_dir.join(matrix.file_name());
        write_table_file(&path, &LabeledTable::from(matrix))?;
        written.push(path);
    }

    let path = config.out_dir.join(SUMMARY_FILE_NAME);
    write_table_file(&path, &LabeledTable::from(&summary))?;
    written.push(path);

    Ok(RunReport {
        written,
        counters: stats.counters,
        summary,
    })
}
