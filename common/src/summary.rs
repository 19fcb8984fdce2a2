//! 要約エンドポイントのプロトコル
//!
//! 2種類のエンドポイントに対応する:
//! - Local: `{"text": ...}` → `{"summary": string | [string]}` / `{"error": string}`（標準）
//! - Gemini: generateContent（`candidates[0].content.parts[0].text`）
//!
//! HTTP送信と待機はホスト側。ここではリクエスト本文の生成と、
//! 応答の解釈（成功・終端エラー・再試行対象）だけを行う。

use crate::error::SummaryError;
use crate::prompts::{build_summary_query, SYSTEM_PROMPT};
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};

/// ノートの最小文字数（トリム後）
pub const MIN_NOTE_CHARS: usize = 50;

/// ローカル要約サービスの既定URL
pub const LOCAL_ENDPOINT: &str = "http://127.0.0.1:5000/summarize";

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// エラー本文をメッセージに残す最大文字数
const BODY_PREVIEW_CHARS: usize = 200;

/// エンドポイントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Local,
    Gemini,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Local => "local",
            Protocol::Gemini => "gemini",
        }
    }
}

/// 要約クライアントの設定
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizerConfig {
    pub protocol: Protocol,
    /// POST先（Geminiはキー込み）
    pub url: String,
    pub min_note_chars: usize,
    pub retry: RetryPolicy,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self::local(LOCAL_ENDPOINT)
    }
}

impl SummarizerConfig {
    pub fn local(url: impl Into<String>) -> Self {
        Self {
            protocol: Protocol::Local,
            url: url.into(),
            min_note_chars: MIN_NOTE_CHARS,
            retry: RetryPolicy::default(),
        }
    }

    pub fn gemini(model: &str, api_key: &str) -> Self {
        Self {
            protocol: Protocol::Gemini,
            url: gemini_url(GEMINI_API_BASE, model, api_key),
            min_note_chars: MIN_NOTE_CHARS,
            retry: RetryPolicy::default(),
        }
    }
}

/// generateContent のURL（キーはパーセントエンコード）
pub fn gemini_url(base: &str, model: &str, api_key: &str) -> String {
    format!(
        "{}/{}:generateContent?key={}",
        base.trim_end_matches('/'),
        model,
        urlencoding::encode(api_key)
    )
}

/// 要約結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryResult {
    /// 単一の段落
    Text(String),
    /// 箇条書き（1要素1文）
    Points(Vec<String>),
}

impl SummaryResult {
    /// 表示用の行
    pub fn lines(&self) -> Vec<&str> {
        match self {
            SummaryResult::Text(text) => vec![text.as_str()],
            SummaryResult::Points(points) => points.iter().map(String::as_str).collect(),
        }
    }

    /// プレーンテキスト（箇条書きは "- " 付き）
    pub fn to_plain_text(&self) -> String {
        match self {
            SummaryResult::Text(text) => text.clone(),
            SummaryResult::Points(points) => points
                .iter()
                .map(|p| format!("- {}", p))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// HTTP応答（ステータスと本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================
// リクエスト
// =============================================

#[derive(Serialize)]
struct LocalRequest<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

/// ノートの文字数チェック
///
/// # Returns
/// * `Ok(&str)` - トリム済みノート
/// * `Err(SummaryError::Validation)` - 最小文字数未満
pub fn validate_notes(notes: &str, min_chars: usize) -> Result<&str, SummaryError> {
    let trimmed = notes.trim();
    let actual = trimmed.chars().count();
    if actual < min_chars {
        return Err(SummaryError::Validation { min: min_chars, actual });
    }
    Ok(trimmed)
}

/// リクエスト本文（JSON）を生成
pub fn build_request_body(protocol: Protocol, notes: &str) -> serde_json::Value {
    let value = match protocol {
        Protocol::Local => serde_json::to_value(LocalRequest { text: notes }),
        Protocol::Gemini => serde_json::to_value(GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: build_summary_query(notes) }],
            }],
            system_instruction: Content {
                parts: vec![Part { text: SYSTEM_PROMPT.to_string() }],
            },
        }),
    };
    // 文字列だけの構造体なので失敗しない
    value.unwrap_or(serde_json::Value::Null)
}

// =============================================
// レスポンス
// =============================================

#[derive(Deserialize)]
#[serde(untagged)]
enum SummaryField {
    Text(String),
    Points(Vec<String>),
}

/// `error` フィールド（文字列、またはGemini形式のオブジェクト）
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Message(String),
    Detail { message: String },
}

impl ErrorField {
    fn into_message(self) -> String {
        match self {
            ErrorField::Message(m) | ErrorField::Detail { message: m } => m,
        }
    }
}

#[derive(Deserialize)]
struct LocalResponse {
    summary: Option<SummaryField>,
    error: Option<ErrorField>,
}

#[derive(Deserialize)]
struct ErrorOnly {
    error: Option<ErrorField>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ErrorField>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// 構造化エラー本文を返すステータスのうち、再試行しないもの
///
/// 4xx は終端。ただしタイムアウト(408)とレート制限(429)は再試行する。
fn is_terminal_status(status: u16) -> bool {
    (400..500).contains(&status) && status != 408 && status != 429
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

/// HTTP応答を解釈する
///
/// # Returns
/// * `Ok(SummaryResult)` - 要約あり
/// * `Err(Rejected)` - 構造化エラー本文（終端）
/// * `Err(HttpStatus)` - 非2xx（再試行対象）
/// * `Err(InvalidResponse)` - 2xxだが要約もエラーもない・JSON不正
pub fn interpret_reply(protocol: Protocol, reply: &HttpReply) -> Result<SummaryResult, SummaryError> {
    if !reply.is_success() {
        if is_terminal_status(reply.status) {
            if let Ok(ErrorOnly { error: Some(error) }) = serde_json::from_str::<ErrorOnly>(&reply.body) {
                return Err(SummaryError::Rejected {
                    status: reply.status,
                    message: error.into_message(),
                });
            }
        }
        return Err(SummaryError::HttpStatus {
            status: reply.status,
            body: preview(&reply.body),
        });
    }

    match protocol {
        Protocol::Local => interpret_local(reply),
        Protocol::Gemini => interpret_gemini(reply),
    }
}

fn interpret_local(reply: &HttpReply) -> Result<SummaryResult, SummaryError> {
    let response: LocalResponse = serde_json::from_str(&reply.body)
        .map_err(|e| SummaryError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    match (response.summary, response.error) {
        (Some(SummaryField::Text(text)), _) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(SummaryError::InvalidResponse("empty summary".into()));
            }
            Ok(SummaryResult::Text(text.to_string()))
        }
        (Some(SummaryField::Points(points)), _) => {
            let points: Vec<String> = points
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            if points.is_empty() {
                return Err(SummaryError::InvalidResponse("empty summary".into()));
            }
            Ok(SummaryResult::Points(points))
        }
        (None, Some(error)) => Err(SummaryError::Rejected {
            status: reply.status,
            message: error.into_message(),
        }),
        (None, None) => Err(SummaryError::InvalidResponse(
            "neither \"summary\" nor \"error\" present".into(),
        )),
    }
}

fn interpret_gemini(reply: &HttpReply) -> Result<SummaryResult, SummaryError> {
    let response: GeminiResponse = serde_json::from_str(&reply.body)
        .map_err(|e| SummaryError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    match (text, response.error) {
        (Some(text), _) => Ok(SummaryResult::Text(text)),
        (None, Some(error)) => Err(SummaryError::Rejected {
            status: reply.status,
            message: error.into_message(),
        }),
        (None, None) => Err(SummaryError::InvalidResponse(
            "AI returned an empty or invalid summary".into(),
        )),
    }
}
