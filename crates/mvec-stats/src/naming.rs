//! 結果ディレクトリ名・ファイル名のデコード

use std::path::Path;

use crate::catalog::{Clip, Decoder, Mode};

/// 性能計測ファイルの接頭辞
pub const PERF_MARKER: &str = "perf_";

/// 性能計測ファイル末尾の実行ID（区切り文字 + 2文字）
pub const RUN_ID_SUFFIX_LEN: usize = 3;

/// 結果テーブルの拡張子
pub const TABLE_EXTENSION: &str = "csv";

/// 結果ファイル名のデコード結果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileName<'a> {
    pub mode: Mode,
    /// 推定器の生コード（カタログ照合は呼び出し側で行う）
    pub raw_code: &'a str,
}

/// `<decoder>_<clip>` 形式のディレクトリ名を分解する。
///
/// デコーダはカタログ順に前置照合し、最初に一致したデコーダで区切り文字1つを
/// 読み飛ばした残りがクリップIDでなければ、後続のデコーダは試さずに `None`。
pub fn decode_directory(name: &str) -> Option<(Decoder, Clip)> {
    for decoder in Decoder::ALL {
        let Some(rest) = name.strip_prefix(decoder.as_str()) else {
            continue;
        };
        let mut chars = rest.chars();
        chars.next()?;
        return Clip::from_id(chars.as_str()).map(|clip| (decoder, clip));
    }
    None
}

/// 拡張子を除いたファイル名から種類と推定器コードを取り出す。
///
/// `perf_<code>_<id>` は性能計測、それ以外は名前全体が誤差ファイルのコード。
pub fn decode_file(stem: &str) -> FileName<'_> {
    match stem.strip_prefix(PERF_MARKER) {
        Some(rest) => {
            let end = rest.len().saturating_sub(RUN_ID_SUFFIX_LEN);
            FileName {
                mode: Mode::Performance,
                raw_code: rest.get(..end).unwrap_or_default(),
            }
        }
        None => FileName {
            mode: Mode::Error,
            raw_code: stem,
        },
    }
}

/// パスが結果テーブル（`.csv`）ならファイル名をデコードする。
pub fn decode_file_path(path: &Path) -> Option<FileName<'_>> {
    let ext = path.extension().and_then(|e| e.to_str())?;
    if ext != TABLE_EXTENSION {
        return None;
    }
    let stem = path.file_stem().and_then(|s| s.to_str())?;
    Some(decode_file(stem))
}
