//! 実験名の固定語彙（デコーダ・クリップ・推定器）
//!
//! ディレクトリ名・ファイル名に埋め込まれた組み合わせは、ここで定義する
//! 閉じた列挙型に対してのみ解決される。カタログ外の名前は `None` になる。

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// モーションベクトルを生成したデコーダ
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Decoder {
    Av,
    Rlof,
    Farneback,
}

impl Decoder {
    /// カタログ順（ディレクトリ名の前置照合もこの順で行う）
    pub const ALL: [Decoder; 3] = [Decoder::Av, Decoder::Rlof, Decoder::Farneback];

    pub fn as_str(self) -> &'static str {
        match self {
            Decoder::Av => "av",
            Decoder::Rlof => "rlof",
            Decoder::Farneback => "farneback",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == code)
    }
}

impl fmt::Display for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Decoder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// ベンチマーク映像の識別子（`dyn` 付きは動的シーン）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Clip {
    C1,
    C2,
    C3,
    C4,
    C1Dyn,
    C2Dyn,
    C3Dyn,
    C4Dyn,
}

impl Clip {
    pub const ALL: [Clip; 8] = [
        Clip::C1,
        Clip::C2,
        Clip::C3,
        Clip::C4,
        Clip::C1Dyn,
        Clip::C2Dyn,
        Clip::C3Dyn,
        Clip::C4Dyn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Clip::C1 => "1",
            Clip::C2 => "2",
            Clip::C3 => "3",
            Clip::C4 => "4",
            Clip::C1Dyn => "1dyn",
            Clip::C2Dyn => "2dyn",
            Clip::C3Dyn => "3dyn",
            Clip::C4Dyn => "4dyn",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == id)
    }
}

// 行ラベルは文字列の辞書順で並べる（"1" < "1dyn" < "2" < ...）。
impl Ord for Clip {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Clip {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 姿勢推定器のバリアント
///
/// 順序は宣言順で、出力テーブルの列順にそのまま使われる。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Estimator {
    AlmeidaRansac,
    Almeida,
    HomographyRansac,
    HomographyLmeds,
    MultiviewRansac,
    MultiviewLmeds,
    Libmv7pt,
    Libmv8pt,
}

impl Estimator {
    pub const ALL: [Estimator; 8] = [
        Estimator::AlmeidaRansac,
        Estimator::Almeida,
        Estimator::HomographyRansac,
        Estimator::HomographyLmeds,
        Estimator::MultiviewRansac,
        Estimator::MultiviewLmeds,
        Estimator::Libmv7pt,
        Estimator::Libmv8pt,
    ];

    /// 結果ファイル名に現れる生コード
    pub fn raw_code(self) -> &'static str {
        match self {
            Estimator::AlmeidaRansac => "almeida_0",
            Estimator::Almeida => "almeida_1",
            Estimator::HomographyRansac => "homography_2",
            Estimator::HomographyLmeds => "homography_3",
            Estimator::MultiviewRansac => "multiview_4",
            Estimator::MultiviewLmeds => "multiview_5",
            Estimator::Libmv7pt => "libmv_6",
            Estimator::Libmv8pt => "libmv_7",
        }
    }

    /// レポートの列名
    pub fn display_name(self) -> &'static str {
        match self {
            Estimator::AlmeidaRansac => "Almeida-RANSAC",
            Estimator::Almeida => "Almeida",
            Estimator::HomographyRansac => "Homography-RANSAC",
            Estimator::HomographyLmeds => "Homography-LMedS",
            Estimator::MultiviewRansac => "Multiview-RANSAC",
            Estimator::MultiviewLmeds => "Multiview-LMedS",
            Estimator::Libmv7pt => "Libmv-7pt",
            Estimator::Libmv8pt => "Libmv-8pt",
        }
    }

    pub fn from_raw_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.raw_code() == code)
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for Estimator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

/// 結果ファイルの種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// 角度誤差（ファイルはラジアン、集計値は度）
    Error,
    /// 処理時間
    Performance,
}

impl Mode {
    /// 出力ファイル名の接頭辞（`err_av.csv` など）
    pub fn file_prefix(self) -> &'static str {
        match self {
            Mode::Error => "err",
            Mode::Performance => "perf",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Error => "error",
            Mode::Performance => "performance",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimator_codes_resolve_to_display_names() {
        assert_eq!(Estimator::from_raw_code("almeida_0"), Some(Estimator::AlmeidaRansac));
        assert_eq!(
            Estimator::from_raw_code("homography_3").map(Estimator::display_name),
            Some("Homography-LMedS")
        );
        assert_eq!(Estimator::from_raw_code("libmv_8"), None);
        assert_eq!(Estimator::from_raw_code("Almeida"), None);

        for est in Estimator::ALL {
            assert_eq!(Estimator::from_raw_code(est.raw_code()), Some(est));
        }
    }

    #[test]
    fn clips_sort_lexicographically() {
        let mut clips = Clip::ALL.to_vec();
        clips.sort();
        let ids: Vec<_> = clips.iter().map(|c| c.as_str()).collect();
        assert_eq!(ids, vec!["1", "1dyn", "2", "2dyn", "3", "3dyn", "4", "4dyn"]);
    }

    #[test]
    fn lookups_reject_unknown_codes() {
        assert_eq!(Decoder::from_code("rlof"), Some(Decoder::Rlof));
        assert_eq!(Decoder::from_code("opencv"), None);
        assert_eq!(Clip::from_id("3dyn"), Some(Clip::C3Dyn));
        assert_eq!(Clip::from_id("5"), None);
    }
}
