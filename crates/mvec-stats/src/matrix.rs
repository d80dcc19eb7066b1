//! デコーダ単位の結果行列（行 = クリップ, 列 = 推定器）

use std::collections::BTreeSet;

use crate::catalog::{Clip, Decoder, Estimator, Mode};
use crate::collect::{ExperimentKey, ScalarMap};

/// 推定器がデコーダの全クリップを網羅していない
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("incomplete {mode} results for decoder {decoder}: missing {}", format_missing(.missing))]
pub struct CoverageError {
    pub decoder: Decoder,
    pub mode: Mode,
    /// 欠けている `(estimator, clip)`（推定器カタログ順、クリップ辞書順）
    pub missing: Vec<(Estimator, Clip)>,
}

fn format_missing(missing: &[(Estimator, Clip)]) -> String {
    missing
        .iter()
        .map(|(est, clip)| format!("{est}@{clip}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 1デコーダ・1モードの集計表
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMatrix {
    decoder: Decoder,
    mode: Mode,
    clips: Vec<Clip>,
    estimators: Vec<Estimator>,
    /// 行優先（`values[row][col]`）
    values: Vec<Vec<f64>>,
}

impl ResultMatrix {
    /// 行はいずれかの推定器に現れたクリップの和集合。
    /// 全ての推定器が全ての行に値を持たなければ [`CoverageError`]。
    pub fn build(scalars: &ScalarMap, decoder: Decoder, mode: Mode) -> Result<Self, CoverageError> {
        let mut clips = BTreeSet::new();
        let mut estimators = BTreeSet::new();
        for (est, clip, _) in scalars.for_decoder(decoder) {
            clips.insert(clip);
            estimators.insert(est);
        }
        let clips: Vec<Clip> = clips.into_iter().collect();
        let estimators: Vec<Estimator> = estimators.into_iter().collect();

        let mut missing = Vec::new();
        for &est in &estimators {
            for &clip in &clips {
                if scalars.get(&ExperimentKey::new(decoder, est, clip)).is_none() {
                    missing.push((est, clip));
                }
            }
        }
        if !missing.is_empty() {
            return Err(CoverageError {
                decoder,
                mode,
                missing,
            });
        }

        let values = clips
            .iter()
            .map(|&clip| {
                estimators
                    .iter()
                    .filter_map(|&est| scalars.get(&ExperimentKey::new(decoder, est, clip)))
                    .collect()
            })
            .collect();

        Ok(Self {
            decoder,
            mode,
            clips,
            estimators,
            values,
        })
    }

    /// 値を持つ全デコーダ分（カタログ順）
    pub fn build_all(scalars: &ScalarMap, mode: Mode) -> Result<Vec<Self>, CoverageError> {
        scalars.decoders().into_iter().map(|d| Self::build(scalars, d, mode)).collect()
    }

    pub fn decoder(&self) -> Decoder {
        self.decoder
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn estimators(&self) -> &[Estimator] {
        &self.estimators
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn get(&self, clip: Clip, estimator: Estimator) -> Option<f64> {
        let row = self.clips.iter().position(|&c| c == clip)?;
        let col = self.estimators.iter().position(|&e| e == estimator)?;
        Some(self.values[row][col])
    }

    /// 出力ファイル名（`err_av.csv` など）
    pub fn file_name(&self) -> String {
        format!("{}_{}.csv", self.mode.file_prefix(), self.decoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalars(entries: &[(Decoder, Estimator, Clip, f64)]) -> ScalarMap {
        entries
            .iter()
            .map(|&(d, e, c, v)| (ExperimentKey::new(d, e, c), v))
            .collect()
    }

    #[test]
    fn rows_sorted_and_columns_in_catalog_order() {
        let map = scalars(&[
            (Decoder::Av, Estimator::Libmv8pt, Clip::C2, 4.0),
            (Decoder::Av, Estimator::Libmv8pt, Clip::C1Dyn, 3.0),
            (Decoder::Av, Estimator::AlmeidaRansac, Clip::C2, 2.0),
            (Decoder::Av, Estimator::AlmeidaRansac, Clip::C1Dyn, 1.0),
            (Decoder::Rlof, Estimator::Almeida, Clip::C4, 9.0),
        ]);

        let m = ResultMatrix::build(&map, Decoder::Av, Mode::Error).unwrap();
        assert_eq!(m.clips(), &[Clip::C1Dyn, Clip::C2]);
        assert_eq!(m.estimators(), &[Estimator::AlmeidaRansac, Estimator::Libmv8pt]);
        assert_eq!(m.rows(), &[vec![1.0, 3.0], vec![2.0, 4.0]]);
        assert_eq!(m.get(Clip::C2, Estimator::Libmv8pt), Some(4.0));
        assert_eq!(m.get(Clip::C4, Estimator::Libmv8pt), None);
        assert_eq!(m.file_name(), "err_av.csv");
    }

    #[test]
    fn incomplete_coverage_lists_every_gap() {
        let map = scalars(&[
            (Decoder::Farneback, Estimator::Almeida, Clip::C1, 1.0),
            (Decoder::Farneback, Estimator::Almeida, Clip::C3, 1.0),
            (Decoder::Farneback, Estimator::HomographyLmeds, Clip::C2, 1.0),
        ]);

        let err = ResultMatrix::build(&map, Decoder::Farneback, Mode::Performance).unwrap_err();
        assert_eq!(err.decoder, Decoder::Farneback);
        assert_eq!(
            err.missing,
            vec![
                (Estimator::Almeida, Clip::C2),
                (Estimator::HomographyLmeds, Clip::C1),
                (Estimator::HomographyLmeds, Clip::C3),
            ]
        );
        assert!(err.to_string().contains("Almeida@2"), "{err}");
    }

    #[test]
    fn build_all_covers_each_decoder_with_data() {
        let map = scalars(&[
            (Decoder::Farneback, Estimator::Almeida, Clip::C1, 1.0),
            (Decoder::Av, Estimator::Almeida, Clip::C1, 2.0),
        ]);
        let all = ResultMatrix::build_all(&map, Mode::Error).unwrap();
        let decoders: Vec<_> = all.iter().map(ResultMatrix::decoder).collect();
        assert_eq!(decoders, vec![Decoder::Av, Decoder::Farneback]);
        assert!(all.iter().all(|m| m.mode() == Mode::Error));
        assert!(ResultMatrix::build_all(&ScalarMap::new(), Mode::Error).unwrap().is_empty());
    }
}
