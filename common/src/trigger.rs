//! 要約ボタン（トリガー）の状態表示
//!
//! リクエスト中はボタンを無効化してラベルを変える。
//! `BusyGuard` のドロップで必ず元に戻るので、どの終了経路でも再有効化される。

/// 待機中でないときのラベル
pub const IDLE_LABEL: &str = "Generate/Refresh AI Summary";

/// リクエスト中のラベル
pub const BUSY_LABEL: &str = "Generating Summary...";

/// 結果エリアに出す処理中メッセージ
pub const PENDING_MESSAGE: &str = "Processing notes with AI...";

/// トリガーコントロール（ボタン等）
///
/// 状態は呼び出し側が持つ。ここでは有効・無効とラベルの変更だけを通知する。
pub trait TriggerControl {
    fn set_enabled(&self, enabled: bool);
    fn set_label(&self, label: &str);
}

/// 何もしないコントロール
pub struct NoTrigger;

impl TriggerControl for NoTrigger {
    fn set_enabled(&self, _enabled: bool) {}
    fn set_label(&self, _label: &str) {}
}

/// ビジー表示のガード
pub struct BusyGuard<'a, T: TriggerControl + ?Sized> {
    control: &'a T,
}

impl<'a, T: TriggerControl + ?Sized> BusyGuard<'a, T> {
    /// ボタンを無効化してラベルを変える
    pub fn start(control: &'a T) -> Self {
        control.set_enabled(false);
        control.set_label(BUSY_LABEL);
        Self { control }
    }
}

impl<T: TriggerControl + ?Sized> Drop for BusyGuard<'_, T> {
    fn drop(&mut self) {
        self.control.set_enabled(true);
        self.control.set_label(IDLE_LABEL);
    }
}
