//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown shape: {0} (expected lungs, abdomen or legs)")]
    UnknownShape(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 要約リクエストのエラー
///
/// 表示文言は結果エリアにそのまま出す。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    #[error("Please enter at least {min} characters of clinical notes before generating a summary ({actual} entered).")]
    Validation { min: usize, actual: usize },

    #[error("Could not reach the summarization service: {0}")]
    Transport(String),

    #[error("Summarization service responded with HTTP {status}")]
    HttpStatus { status: u16, body: String },

    #[error("Summarization service rejected the request: {message}")]
    Rejected { status: u16, message: String },

    #[error("Summarization service returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Could not connect to the summarization service after {attempts} attempts ({last})")]
    Exhausted { attempts: u32, last: Box<SummaryError> },
}

impl SummaryError {
    /// 再試行の対象か
    pub fn is_retryable(&self) -> bool {
        matches!(self, SummaryError::Transport(_) | SummaryError::HttpStatus { .. })
    }
}
