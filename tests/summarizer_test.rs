//! 要約クライアントのテスト
//!
//! 台本通りに応答する送信層を差し込み、再試行・エラー分類・ボタン状態を検証

use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use ward_round::summarizer::Summarizer;
use ward_round::transport::Transport;
use ward_round_common::trigger::{BUSY_LABEL, IDLE_LABEL};
use ward_round_common::{
    HttpReply, Protocol, RetryPolicy, SummarizerConfig, SummaryError, SummaryResult, TriggerControl,
};

const NOTES: &str = "Day 3 post laparotomy. Afebrile overnight, tolerating fluids, mobilising with assistance.";

/// 台本通りに応答する送信層
struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpReply, SummaryError>>>,
    calls: AtomicUsize,
    bodies: Mutex<Vec<Value>>,
}

impl ScriptedTransport {
    fn new(script: Vec<Result<HttpReply, SummaryError>>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from(script)),
            calls: AtomicUsize::new(0),
            bodies: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for ScriptedTransport {
    async fn post_json(&self, _url: &str, body: &Value) -> Result<HttpReply, SummaryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies.lock().unwrap().push(body.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SummaryError::Transport("script exhausted".into())))
    }
}

/// ボタン状態の記録
#[derive(Default)]
struct RecordingTrigger {
    log: RefCell<Vec<String>>,
}

impl TriggerControl for RecordingTrigger {
    fn set_enabled(&self, enabled: bool) {
        self.log.borrow_mut().push(format!("enabled={}", enabled));
    }

    fn set_label(&self, label: &str) {
        self.log.borrow_mut().push(label.to_string());
    }
}

impl RecordingTrigger {
    fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

fn local_client(script: Vec<Result<HttpReply, SummaryError>>) -> Summarizer<ScriptedTransport> {
    Summarizer::new(
        SummarizerConfig::local("http://127.0.0.1:5000/summarize"),
        ScriptedTransport::new(script),
    )
}

fn refused() -> Result<HttpReply, SummaryError> {
    Err(SummaryError::Transport("connection refused".into()))
}

// =============================================
// 入力チェック
// =============================================

#[tokio::test(start_paused = true)]
async fn test_short_notes_never_sent() {
    let client = local_client(vec![]);

    let err = client.summarize("short note").await.unwrap_err();

    assert_eq!(err, SummaryError::Validation { min: 50, actual: 10 });
    assert_eq!(client.transport().calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_whitespace_does_not_count() {
    let client = local_client(vec![]);
    let padded = format!("   {}   ", "x".repeat(49));

    let err = client.summarize(&padded).await.unwrap_err();

    assert!(matches!(err, SummaryError::Validation { actual: 49, .. }));
    assert_eq!(client.transport().calls(), 0);
}

// =============================================
// 再試行
// =============================================

#[tokio::test(start_paused = true)]
async fn test_recovers_after_two_transport_failures() {
    let client = local_client(vec![
        refused(),
        refused(),
        Ok(HttpReply::new(200, r#"{"summary": ["Afebrile", "Mobilising"]}"#)),
    ]);

    let start = tokio::time::Instant::now();
    let summary = client.summarize(NOTES).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(
        summary,
        SummaryResult::Points(vec!["Afebrile".into(), "Mobilising".into()])
    );
    assert_eq!(client.transport().calls(), 3);
    // 1秒 + 2秒
    assert!(elapsed >= Duration::from_secs(3), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(4), "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_server_errors_exhaust_attempts() {
    let client = local_client(vec![
        Ok(HttpReply::new(503, "unavailable")),
        Ok(HttpReply::new(502, "bad gateway")),
        Ok(HttpReply::new(500, "boom")),
    ]);

    let start = tokio::time::Instant::now();
    let err = client.summarize(NOTES).await.unwrap_err();

    match err {
        SummaryError::Exhausted { attempts, last } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last, SummaryError::HttpStatus { status: 500, .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(client.transport().calls(), 3);
    // 最終試行の後は待たない
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_custom_policy_attempt_count() {
    let config = SummarizerConfig {
        retry: RetryPolicy::new(5, Duration::from_millis(10)),
        ..SummarizerConfig::local("http://127.0.0.1:5000/summarize")
    };
    let client = Summarizer::new(config, ScriptedTransport::new(vec![]));

    let err = client.summarize(NOTES).await.unwrap_err();

    assert!(matches!(err, SummaryError::Exhausted { attempts: 5, .. }));
    assert_eq!(client.transport().calls(), 5);
}

// =============================================
// 終端エラー
// =============================================

#[tokio::test(start_paused = true)]
async fn test_structured_client_error_is_terminal() {
    let client = local_client(vec![Ok(HttpReply::new(400, r#"{"error": "too long"}"#))]);

    let err = client.summarize(NOTES).await.unwrap_err();

    assert_eq!(
        err,
        SummaryError::Rejected { status: 400, message: "too long".into() }
    );
    assert_eq!(client.transport().calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_empty_object_is_invalid_response() {
    let client = local_client(vec![Ok(HttpReply::new(200, "{}"))]);

    let err = client.summarize(NOTES).await.unwrap_err();

    assert!(matches!(err, SummaryError::InvalidResponse(_)));
    assert_eq!(client.transport().calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_is_retried() {
    let client = local_client(vec![
        Ok(HttpReply::new(429, r#"{"error": "slow down"}"#)),
        Ok(HttpReply::new(200, r#"{"summary": "Stable."}"#)),
    ]);

    let summary = client.summarize(NOTES).await.unwrap();

    assert_eq!(summary, SummaryResult::Text("Stable.".into()));
    assert_eq!(client.transport().calls(), 2);
}

// =============================================
// リクエスト本文
// =============================================

#[tokio::test(start_paused = true)]
async fn test_local_body_carries_trimmed_notes() {
    let client = local_client(vec![Ok(HttpReply::new(200, r#"{"summary": "ok"}"#))]);

    client.summarize(&format!("\n{}\n", NOTES)).await.unwrap();

    let bodies = client.transport().bodies.lock().unwrap().clone();
    assert_eq!(bodies, vec![serde_json::json!({ "text": NOTES })]);
}

#[tokio::test(start_paused = true)]
async fn test_gemini_reply_is_parsed() {
    let config = SummarizerConfig::gemini("test-model", "dummy");
    assert_eq!(config.protocol, Protocol::Gemini);
    let reply = r#"{"candidates": [{"content": {"parts": [{"text": "Post-op day 3, stable."}]}}]}"#;
    let client = Summarizer::new(config, ScriptedTransport::new(vec![Ok(HttpReply::new(200, reply))]));

    let summary = client.summarize(NOTES).await.unwrap();

    assert_eq!(summary.to_plain_text(), "Post-op day 3, stable.");
}

// =============================================
// ボタン状態
// =============================================

#[tokio::test(start_paused = true)]
async fn test_trigger_restored_on_success() {
    let client = local_client(vec![Ok(HttpReply::new(200, r#"{"summary": "ok"}"#))]);
    let trigger = RecordingTrigger::default();

    client.summarize_with_trigger(NOTES, &trigger).await.unwrap();

    assert_eq!(
        trigger.log(),
        vec!["enabled=false", BUSY_LABEL, "enabled=true", IDLE_LABEL]
    );
}

#[tokio::test(start_paused = true)]
async fn test_trigger_restored_on_every_failure() {
    let scripts: Vec<(&str, Vec<Result<HttpReply, SummaryError>>)> = vec![
        ("short note", vec![]),
        (NOTES, vec![Ok(HttpReply::new(400, r#"{"error": "bad"}"#))]),
        (NOTES, vec![Ok(HttpReply::new(200, "not json"))]),
        (NOTES, vec![refused(), refused(), refused()]),
    ];

    for (notes, script) in scripts {
        let client = local_client(script);
        let trigger = RecordingTrigger::default();

        assert!(client.summarize_with_trigger(notes, &trigger).await.is_err());

        let log = trigger.log();
        assert_eq!(log.first().map(String::as_str), Some("enabled=false"));
        assert_eq!(&log[log.len() - 2..], ["enabled=true", IDLE_LABEL]);
    }
}
