//! HTTP送信
//!
//! 要約クライアントはこのトレイト越しにPOSTする。テストでは台本通りに応答する実装に差し替える。

use std::time::Duration;
use ward_round_common::{HttpReply, SummaryError};

use crate::error::{Result, WardRoundError};

/// JSONをPOSTしてステータスと本文を返す
///
/// 接続不可・タイムアウト・本文読み込み失敗は `SummaryError::Transport`。
/// 非2xxはエラーにせずそのまま返す（解釈は呼び出し側）。
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> std::result::Result<HttpReply, SummaryError>;
}

/// reqwest による実装
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WardRoundError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

/// URL（APIキーを含む）を出さないエラー文言
fn describe(error: reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error.without_url())
    } else {
        error.without_url().to_string()
    }
}

impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> std::result::Result<HttpReply, SummaryError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| SummaryError::Transport(describe(e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SummaryError::Transport(describe(e)))?;

        Ok(HttpReply { status, body })
    }
}
