//! 結果エリアの表示（端末向け）

use chrono::{DateTime, TimeZone};
use ward_round_common::{SummaryError, SummaryResult};

pub const SUMMARY_HEADING: &str = "AI Clinical Summary:";

/// 記録日時の見出し（例: "Documented on: Fri, Oct 16, 2026, 04:15:02 PM"）
pub fn documented_on<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("Documented on: {}", now.format("%a, %b %-d, %Y, %I:%M:%S %p"))
}

/// 要約結果またはエラーを表示用テキストにする
pub fn render_outcome(outcome: &Result<SummaryResult, SummaryError>) -> String {
    match outcome {
        Ok(summary) => format!("{}\n{}", SUMMARY_HEADING, summary.to_plain_text()),
        Err(e) => format!("Error: {}", e),
    }
}
