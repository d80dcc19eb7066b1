//! デコーダ横断の性能サマリ
//!
//! 各デコーダについて、推定器ごとのクリップ別平均時間をさらに平均する。
//! クリップの違いは無視し、同じ計測の繰り返しとして扱う。

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::catalog::{Decoder, Estimator};
use crate::collect::ScalarMap;
use crate::table::mean;

/// サマリの1行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub decoder: Decoder,
    /// `estimators` と同じ順。そのデコーダで走らなかった推定器は `None`
    pub cells: Vec<Option<f64>>,
}

/// 行 = デコーダ, 列 = 全デコーダに現れた推定器の和集合
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub estimators: Vec<Estimator>,
    pub rows: Vec<SummaryRow>,
}

impl PerformanceSummary {
    pub fn build(scalars: &ScalarMap) -> Self {
        let mut samples: BTreeMap<Decoder, BTreeMap<Estimator, Vec<f64>>> = BTreeMap::new();
        let mut estimators = BTreeSet::new();
        for (key, value) in scalars.iter() {
            estimators.insert(key.estimator());
            samples
                .entry(key.decoder())
                .or_default()
                .entry(key.estimator())
                .or_default()
                .push(value);
        }
        let estimators: Vec<Estimator> = estimators.into_iter().collect();

        let rows = samples
            .into_iter()
            .map(|(decoder, per_est)| SummaryRow {
                decoder,
                cells: estimators
                    .iter()
                    .map(|est| per_est.get(est).and_then(|v| mean(v)))
                    .collect(),
            })
            .collect();

        Self { estimators, rows }
    }

    pub fn get(&self, decoder: Decoder, estimator: Estimator) -> Option<f64> {
        let col = self.estimators.iter().position(|&e| e == estimator)?;
        self.rows.iter().find(|r| r.decoder == decoder)?.cells[col]
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
