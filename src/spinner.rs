//! 端末用のトリガーコントロール（スピナー）

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use ward_round_common::TriggerControl;

/// リクエスト中だけスピナーを回す
pub struct SpinnerTrigger {
    bar: ProgressBar,
}

impl SpinnerTrigger {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        Self { bar }
    }

    /// 端末なし（テスト・パイプ出力）
    pub fn hidden() -> Self {
        Self { bar: ProgressBar::hidden() }
    }
}

impl Default for SpinnerTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerControl for SpinnerTrigger {
    fn set_enabled(&self, enabled: bool) {
        if enabled {
            self.bar.finish_and_clear();
        } else {
            self.bar.enable_steady_tick(Duration::from_millis(100));
        }
    }

    fn set_label(&self, label: &str) {
        self.bar.set_message(label.to_string());
    }
}
