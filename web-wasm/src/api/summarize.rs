//! 要約エンドポイント呼び出し（fetch）
//!
//! 再試行・応答解釈は共通ライブラリ、送信と待機だけをブラウザで行う。

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use ward_round_common::{
    build_request_body, interpret_reply, validate_notes, with_retry, HttpReply, SummarizerConfig,
    SummaryError, SummaryResult,
};

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{:?}", value))
}

/// JSONをPOSTしてステータスと本文を返す
async fn post_json(url: &str, body: &str) -> Result<HttpReply, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;
    Ok(HttpReply::new(resp.status(), text.as_string().unwrap_or_default()))
}

/// ノートを要約する
pub async fn summarize(config: &SummarizerConfig, notes: &str) -> Result<SummaryResult, SummaryError> {
    let notes = validate_notes(notes, config.min_note_chars)?;
    let body = build_request_body(config.protocol, notes).to_string();
    let body = body.as_str();
    let url = config.url.as_str();
    let protocol = config.protocol;

    with_retry(
        &config.retry,
        move |attempt| async move {
            let reply = post_json(url, body)
                .await
                .map_err(|e| SummaryError::Transport(describe(&e)))?;
            let outcome = interpret_reply(protocol, &reply);
            if let Err(e) = &outcome {
                web_sys::console::warn_1(&format!("attempt {} failed: {}", attempt, e).into());
            }
            outcome
        },
        |delay| TimeoutFuture::new(delay.as_millis().min(u32::MAX as u128) as u32),
    )
    .await
}
