//! 設定パネルコンポーネント

use crate::settings::WebSettings;
use leptos::prelude::*;
use ward_round_common::Protocol;

#[component]
pub fn SettingsPanel(settings: RwSignal<WebSettings>) -> impl IntoView {
    let is_gemini = move || settings.with(|s| s.protocol == Protocol::Gemini);

    view! {
        <div class="settings-panel">
            <div class="form-group">
                <label for="protocol">"Summarization service"</label>
                <select
                    id="protocol"
                    prop:value=move || settings.with(|s| s.protocol.as_str().to_string())
                    on:change=move |ev| {
                        let protocol = match event_target_value(&ev).as_str() {
                            "gemini" => Protocol::Gemini,
                            _ => Protocol::Local,
                        };
                        settings.update(|s| s.protocol = protocol);
                    }
                >
                    <option value="local">"Local service"</option>
                    <option value="gemini">"Gemini"</option>
                </select>
            </div>

            <div class="form-group">
                <label for="endpoint">"Endpoint"</label>
                <input
                    type="url"
                    id="endpoint"
                    prop:value=move || settings.with(|s| s.endpoint.clone())
                    on:input=move |ev| {
                        let endpoint = event_target_value(&ev);
                        settings.update(|s| s.endpoint = endpoint);
                    }
                />
            </div>

            <Show when=is_gemini>
                <div class="form-group">
                    <label for="api-key">"Gemini API Key"</label>
                    <input
                        type="password"
                        id="api-key"
                        placeholder="API key (kept for this session only)"
                        prop:value=move || settings.with(|s| s.api_key.clone())
                        on:input=move |ev| {
                            let key = event_target_value(&ev);
                            settings.update(|s| s.api_key = key);
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
