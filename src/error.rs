use thiserror::Error;
use ward_round_common::SummaryError;

#[derive(Error, Debug)]
pub enum WardRoundError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("Gemini APIキーが設定されていません。`ward-round config --set-api-key YOUR_KEY` または GEMINI_API_KEY で設定してください")]
    MissingApiKey,

    #[error("ノートが空です: --notes または --file で指定してください")]
    MissingNotes,

    #[error("描画エラー: {0}")]
    Render(String),

    #[error("イベントスクリプトが不正: {0}")]
    InvalidEvents(String),

    #[error("HTTPクライアント初期化エラー: {0}")]
    HttpClient(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] ward_round_common::Error),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

pub type Result<T> = std::result::Result<T, WardRoundError>;
