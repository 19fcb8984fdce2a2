//! ノート入力と要約結果

use crate::api::summarize::summarize;
use crate::settings::WebSettings;
use leptos::prelude::*;
use leptos::task::spawn_local;
use ward_round_common::trigger::{IDLE_LABEL, PENDING_MESSAGE};
use ward_round_common::{BusyGuard, SummaryResult, TriggerControl};

/// 要約ボタン（シグナルで有効/無効とラベルを持つ）
#[derive(Clone, Copy)]
struct ButtonControl {
    enabled: RwSignal<bool>,
    label: RwSignal<String>,
}

impl TriggerControl for ButtonControl {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    fn set_label(&self, label: &str) {
        self.label.set(label.to_string());
    }
}

/// 結果エリアの状態
#[derive(Clone, PartialEq)]
enum Output {
    Empty,
    Pending,
    Done(SummaryResult),
    Failed(String),
}

#[component]
pub fn SummaryPanel(settings: RwSignal<WebSettings>) -> impl IntoView {
    let (notes, set_notes) = signal(String::new());
    let output = RwSignal::new(Output::Empty);
    let control = ButtonControl {
        enabled: RwSignal::new(true),
        label: RwSignal::new(IDLE_LABEL.to_string()),
    };

    let on_generate = move |_| {
        let text = notes.get_untracked();
        spawn_local(async move {
            let _busy = BusyGuard::start(&control);
            output.set(Output::Pending);

            let next = match settings.get_untracked().summarizer_config() {
                Err(message) => Output::Failed(message),
                Ok(config) => match summarize(&config, &text).await {
                    Ok(summary) => Output::Done(summary),
                    Err(e) => {
                        web_sys::console::error_1(&format!("summary failed: {}", e).into());
                        Output::Failed(e.to_string())
                    }
                },
            };
            output.set(next);
        });
    };

    view! {
        <section class="summary-panel">
            <label for="current-notes">"Clinical notes"</label>
            <textarea
                id="current-notes"
                rows="8"
                placeholder="Enter today's ward round notes..."
                prop:value=notes
                on:input=move |ev| set_notes.set(event_target_value(&ev))
            ></textarea>

            <button
                id="summarize-btn"
                class="btn btn-primary"
                disabled=move || !control.enabled.get()
                on:click=on_generate
            >
                {move || control.label.get()}
            </button>

            <div id="summary-output">
                {move || match output.get() {
                    Output::Empty => ().into_any(),
                    Output::Pending => view! {
                        <p class="status pending">{PENDING_MESSAGE}</p>
                    }.into_any(),
                    Output::Done(SummaryResult::Points(points)) => view! {
                        <div class="summary">
                            <h3>"AI Clinical Summary:"</h3>
                            <ul>
                                {points.into_iter().map(|p| view! { <li>{p}</li> }).collect_view()}
                            </ul>
                        </div>
                    }.into_any(),
                    Output::Done(SummaryResult::Text(text)) => view! {
                        <div class="summary">
                            <h3>"AI Clinical Summary:"</h3>
                            <p>{text}</p>
                        </div>
                    }.into_any(),
                    Output::Failed(message) => view! {
                        <p class="status error">{format!("Error: {}", message)}</p>
                    }.into_any(),
                }}
            </div>
        </section>
    }
}
