//! 集計設定

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, StatsError};

/// 結果ツリーのルート（既定値）
pub const DEFAULT_ROOT: &str = "mvec-stats/report2";
/// 出力先ディレクトリ（既定値）
pub const DEFAULT_OUT_DIR: &str = "docs/statistics";

/// 集計設定
///
/// 既定値は定常運用のパスそのもの。TOMLファイルで一部だけ上書きできる。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsConfig {
    /// `<decoder>_<clip>` ディレクトリを並べたルート
    pub root: PathBuf,
    /// サブディレクトリ名に含まれるべき部分文字列（空なら全て）
    pub filter: String,
    /// レポートCSVの出力先
    pub out_dir: PathBuf,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            filter: String::new(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl StatsConfig {
    pub fn from_toml_str(path: &Path, text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| StatsError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| StatsError::io(path, e))?;
        Self::from_toml_str(path, &text)
    }
}
