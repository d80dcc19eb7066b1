//! 区切りテキストの結果テーブル読み込み
//!
//! 推定器が出力するCSVをそのまま保持し、列単位で数値を取り出す。
//! 空セルは欠損として扱い、平均から除外する。

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{Result, StatsError};

const READER_BUF_CAP: usize = 128 * 1024; // 128 KiB

/// ヘッダ行の有無
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Header {
    /// 1行目が列名（誤差ファイル）
    Present,
    /// 列名なし（性能計測ファイル）
    Absent,
}

/// 読み込み済みのテーブル
#[derive(Debug, Clone)]
pub struct Table {
    path: PathBuf,
    headers: Option<StringRecord>,
    rows: Vec<StringRecord>,
}

impl Table {
    pub fn load(path: &Path, header: Header) -> Result<Self> {
        let file = File::open(path).map_err(|e| StatsError::io(path, e))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(header == Header::Present)
            .trim(Trim::All)
            .from_reader(BufReader::with_capacity(READER_BUF_CAP, file));

        let headers = match header {
            Header::Present => Some(reader.headers().map_err(|e| StatsError::csv(path, e))?.clone()),
            Header::Absent => None,
        };
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| StatsError::csv(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.as_ref()?.iter().position(|h| h == name)
    }

    /// 列名で列を取り出す（ヘッダなしのテーブルでは常に失敗）
    pub fn column(&self, name: &str) -> Result<Column<'_>> {
        let index = self.column_index(name).ok_or_else(|| StatsError::MissingColumn {
            path: self.path.clone(),
            column: name.to_owned(),
        })?;
        Ok(Column {
            table: self,
            index,
            label: name.to_owned(),
        })
    }

    /// 位置で列を取り出す（無名列用）
    pub fn column_at(&self, index: usize) -> Result<Column<'_>> {
        let width = match &self.headers {
            Some(h) => h.len(),
            None => self.rows.first().map_or(0, StringRecord::len),
        };
        if index >= width {
            return Err(StatsError::MissingColumn {
                path: self.path.clone(),
                column: index.to_string(),
            });
        }
        Ok(Column {
            table: self,
            index,
            label: index.to_string(),
        })
    }
}

/// テーブルの1列
pub struct Column<'a> {
    table: &'a Table,
    index: usize,
    label: String,
}

impl Column<'_> {
    /// 数値として解釈できたセル（空セルは飛ばす）
    pub fn values(&self) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(self.table.rows.len());
        for (row, record) in self.table.rows.iter().enumerate() {
            let cell = record.get(self.index).unwrap_or_default();
            if cell.is_empty() {
                continue;
            }
            let value = cell.parse::<f64>().map_err(|_| StatsError::InvalidNumber {
                path: self.table.path.clone(),
                column: self.label.clone(),
                row: row + 1,
                value: cell.to_owned(),
            })?;
            out.push(value);
        }
        Ok(out)
    }

    pub fn mean(&self) -> Result<f64> {
        let values = self.values()?;
        mean(&values).ok_or_else(|| StatsError::EmptyColumn {
            path: self.table.path.clone(),
            column: self.label.clone(),
        })
    }
}

/// 算術平均（空なら `None`）
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
