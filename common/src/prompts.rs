//! プロンプト生成モジュール
//!
//! 生成AIエンドポイント（Gemini）向けのシステムプロンプトと問い合わせ文。
//! ローカル要約サービスはノート本文をそのまま送るため使わない。

/// システムプロンプト（臨床医としての要約指示）
pub const SYSTEM_PROMPT: &str = "You are a highly experienced clinician. Review the patient's daily clinical notes provided. Based ONLY on the input, generate a concise, professional, single-paragraph summary suitable for a handover or senior review. Focus on key progress, concerns, and status changes.";

/// 問い合わせ文を生成
///
/// # Arguments
/// * `notes` - トリム済みの臨床ノート
pub fn build_summary_query(notes: &str) -> String {
    format!(
        "Summarize the following clinical notes in a single paragraph, focusing on patient status and progress:\n\n---\n{}",
        notes
    )
}
