//! ヘッダーコンポーネント（記録日時）

use leptos::prelude::*;
use wasm_bindgen::JsValue;

/// "Fri, Oct 16, 2026, 04:15:02 PM" 形式
fn documented_on() -> String {
    let options = js_sys::Object::new();
    for (key, value) in [
        ("weekday", "short"),
        ("year", "numeric"),
        ("month", "short"),
        ("day", "numeric"),
        ("hour", "2-digit"),
        ("minute", "2-digit"),
        ("second", "2-digit"),
    ] {
        let _ = js_sys::Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value));
    }

    let now = js_sys::Date::new_0();
    let formatted: String = now.to_locale_string("en-US", &options).into();
    format!("Documented on: {}", formatted)
}

#[component]
pub fn Header() -> impl IntoView {
    let timestamp = documented_on();

    view! {
        <header class="header">
            <h1>"Smart Ward Round"</h1>
            <p id="timestamp-output" class="text-muted">{timestamp}</p>
        </header>
    }
}
