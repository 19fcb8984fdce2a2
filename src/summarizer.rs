//! 要約クライアント
//!
//! 入力チェック → リクエスト生成 → 再試行付き送信 → 応答解釈。
//! ボタン状態は `summarize_with_trigger` でガードする。

use crate::transport::Transport;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use ward_round_common::{
    build_request_body, interpret_reply, validate_notes, with_retry, BusyGuard, SummarizerConfig,
    SummaryError, SummaryResult, TriggerControl,
};

pub struct Summarizer<T> {
    config: SummarizerConfig,
    transport: T,
}

/// ログ用にクエリ文字列（APIキー）を落とす
pub fn redact_url(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

impl<T: Transport> Summarizer<T> {
    pub fn new(config: SummarizerConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// ノートを要約する
    ///
    /// 最小文字数未満なら送信せずに `Validation` を返す。
    pub async fn summarize(&self, notes: &str) -> Result<SummaryResult, SummaryError> {
        let notes = match validate_notes(notes, self.config.min_note_chars) {
            Ok(notes) => notes,
            Err(e) => {
                info!(min = self.config.min_note_chars, "ノートが短いため送信しません");
                return Err(e);
            }
        };

        let protocol = self.config.protocol;
        let url = self.config.url.as_str();
        let body = build_request_body(protocol, notes);
        let body = &body;

        let result = with_retry(
            &self.config.retry,
            move |attempt| async move {
                debug!(attempt, protocol = protocol.as_str(), url = redact_url(url), "要約リクエスト送信");
                let outcome = match self.transport.post_json(url, body).await {
                    Ok(reply) => {
                        debug!(attempt, status = reply.status, bytes = reply.body.len(), "応答受信");
                        interpret_reply(protocol, &reply)
                    }
                    Err(e) => Err(e),
                };
                if let Err(e) = &outcome {
                    warn!(attempt, retryable = e.is_retryable(), "要約リクエスト失敗: {}", e);
                }
                outcome
            },
            move |delay: Duration| {
                warn!(delay_ms = delay.as_millis() as u64, "再試行まで待機");
                tokio::time::sleep(delay)
            },
        )
        .await;

        match &result {
            Ok(summary) => info!(lines = summary.lines().len(), "要約完了"),
            Err(e) => error!("要約失敗: {}", e),
        }
        result
    }

    /// ボタンを無効化して要約し、終了時に必ず再有効化する
    pub async fn summarize_with_trigger<C: TriggerControl + ?Sized>(
        &self,
        notes: &str,
        control: &C,
    ) -> Result<SummaryResult, SummaryError> {
        let _busy = BusyGuard::start(control);
        self.summarize(notes).await
    }
}
