//! メインアプリケーションコンポーネント

use crate::components::{
    diagram_canvas::DiagramCanvas, header::Header, settings_panel::SettingsPanel,
    summary_panel::SummaryPanel,
};
use crate::settings::WebSettings;
use leptos::prelude::*;
use ward_round_common::Shape;

#[component]
pub fn App() -> impl IntoView {
    let settings = RwSignal::new(WebSettings::load());

    // プロトコル・エンドポイントの変更を保存
    Effect::new(move |_| settings.with(WebSettings::save));

    view! {
        <div class="container">
            <Header />

            <section class="diagrams">
                {Shape::ALL
                    .into_iter()
                    .map(|shape| view! { <DiagramCanvas shape=shape /> })
                    .collect_view()}
            </section>

            <SettingsPanel settings=settings />
            <SummaryPanel settings=settings />
        </div>
    }
}
