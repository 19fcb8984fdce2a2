//! 書き込みイベントの再生
//!
//! ブラウザの代わりに、JSONで記録したポインタイベント列を書き込みレイヤーへ流す。
//!
//! ```json
//! [
//!   {"kind": "down", "x": 120, "y": 80},
//!   {"kind": "move", "x": 130, "y": 95},
//!   {"kind": "up",   "x": 130, "y": 95, "source": "mouse"}
//! ]
//! ```

use crate::error::{Result, WardRoundError};
use std::path::Path;
use tracing::debug;
use ward_round_common::{AnnotationLayer, Canvas, PointerEvent};

/// 再生結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayStats {
    pub events: usize,
    pub segments: usize,
    pub strokes: usize,
    /// 既定動作を抑止したイベント数（タッチ）
    pub prevented: usize,
}

/// イベントスクリプトを読み込む
pub fn load_events(path: &Path) -> Result<Vec<PointerEvent>> {
    let content = std::fs::read_to_string(path)?;
    parse_events(&content)
}

pub fn parse_events(json: &str) -> Result<Vec<PointerEvent>> {
    let events: Vec<PointerEvent> =
        serde_json::from_str(json).map_err(|e| WardRoundError::InvalidEvents(e.to_string()))?;

    if let Some(bad) = events.iter().position(|e| !e.x.is_finite() || !e.y.is_finite()) {
        return Err(WardRoundError::InvalidEvents(format!("{}番目の座標が不正です", bad + 1)));
    }
    Ok(events)
}

/// イベント列を順に処理する
pub fn replay<C: Canvas + ?Sized>(
    layer: &mut AnnotationLayer,
    canvas: &mut C,
    events: &[PointerEvent],
) -> ReplayStats {
    let mut stats = ReplayStats { events: events.len(), ..Default::default() };

    for event in events {
        let response = layer.handle(canvas, event);
        if response.painted {
            stats.segments += 1;
        }
        if response.prevent_default {
            stats.prevented += 1;
        }
    }

    stats.strokes = layer.strokes().len() + usize::from(layer.current_stroke().is_some_and(|s| !s.is_empty()));
    debug!(
        events = stats.events,
        segments = stats.segments,
        strokes = stats.strokes,
        "書き込みイベント再生"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_round_common::{RecordingCanvas, Shape};

    #[test]
    fn test_parse_events_rejects_garbage() {
        let err = parse_events(r#"[{"kind": "press", "x": 1, "y": 1}]"#).unwrap_err();
        assert!(matches!(err, WardRoundError::InvalidEvents(_)));
    }

    #[test]
    fn test_replay_counts() {
        let events = parse_events(
            r#"[
                {"kind": "down", "x": 10, "y": 10, "source": "touch"},
                {"kind": "move", "x": 20, "y": 10, "source": "touch"},
                {"kind": "move", "x": 20, "y": 30, "source": "touch"},
                {"kind": "up", "x": 20, "y": 30, "source": "touch"},
                {"kind": "down", "x": 50, "y": 50},
                {"kind": "up", "x": 50, "y": 50}
            ]"#,
        )
        .unwrap();

        let mut canvas = RecordingCanvas::new();
        let mut layer = AnnotationLayer::attach(&mut canvas, Shape::Legs, 100, 100);
        let stats = replay(&mut layer, &mut canvas, &events);

        assert_eq!(
            stats,
            ReplayStats { events: 6, segments: 2, strokes: 1, prevented: 4 }
        );
    }
}
