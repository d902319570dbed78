//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// スプレッドシートとして読めない（破損・形式違い）
    #[error("Spreadsheet parse error: {0}")]
    Parse(String),

    /// スナップショットの書き込み・読み込み失敗
    #[error("Storage error: {0}")]
    Storage(String),

    /// 静的データセットの取得失敗
    #[error("Static dataset unavailable: {0}")]
    Seed(String),

    /// ワークブック書き出し失敗（テンプレート生成）
    #[error("Workbook write error: {0}")]
    Workbook(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<calamine::Error> for Error {
    fn from(e: calamine::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
