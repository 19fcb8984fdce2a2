//! 手書き書き込みレイヤー
//!
//! 描画面ごとに `Idle` / `Drawing` の2状態を持つ。
//! ポインタ・タッチイベントはホストから注入する（実デバイス不要でテスト可能）。
//!
//! - Idle --down--> Drawing: 新しいストローク開始（既存ピクセルは消さない）
//! - Drawing --move--> Drawing: 前の点から線分を即時描画
//! - Drawing --up/leave/cancel--> Idle
//! - Drawing --down--> Drawing: 後から押した方が勝ち（新しいストローク）

use crate::canvas::{render, Canvas, StrokeStyle};
use crate::geometry::Point;
use crate::shape::Shape;
use serde::{Deserialize, Serialize};

/// イベント種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// 描画面外に出た（mouseleave）
    Leave,
    /// タッチ中断（touchcancel）
    Cancel,
}

/// 入力デバイス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// 描画面座標でのポインタイベント
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn mouse(kind: PointerKind, x: f32, y: f32) -> Self {
        Self { kind, x, y, source: PointerSource::Mouse }
    }

    pub fn touch(kind: PointerKind, x: f32, y: f32) -> Self {
        Self { kind, x, y, source: PointerSource::Touch }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// レイヤーの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenState {
    #[default]
    Idle,
    Drawing,
}

/// 1本の書き込み（ポインタを押している間の点列）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    /// 移動なしのストローク（点のみ）は何も描かれない
    pub fn is_empty(&self) -> bool {
        self.points.len() < 2
    }
}

/// イベント処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// ホストはブラウザ既定動作（スクロール・ズーム）を抑止する
    pub prevent_default: bool,
    /// 描画面に線分を描いた
    pub painted: bool,
}

/// 書き込みレイヤー
#[derive(Debug, Clone)]
pub struct AnnotationLayer {
    shape: Shape,
    width: u32,
    height: u32,
    state: PenState,
    current: Stroke,
    finished: Vec<Stroke>,
    style: StrokeStyle,
}

impl AnnotationLayer {
    /// 解剖図を1回描いてからレイヤーを作る
    pub fn attach<C: Canvas + ?Sized>(canvas: &mut C, shape: Shape, width: u32, height: u32) -> Self {
        render(canvas, shape, width, height);
        Self {
            shape,
            width,
            height,
            state: PenState::Idle,
            current: Stroke::default(),
            finished: Vec::new(),
            style: StrokeStyle::annotation(),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn state(&self) -> PenState {
        self.state
    }

    /// 描画中のストローク
    pub fn current_stroke(&self) -> Option<&Stroke> {
        match self.state {
            PenState::Drawing => Some(&self.current),
            PenState::Idle => None,
        }
    }

    /// 完了したストローク（次の全体再描画まで）
    pub fn strokes(&self) -> &[Stroke] {
        &self.finished
    }

    /// リサイズ等で描画面を作り直す（書き込みは破棄）
    pub fn redraw<C: Canvas + ?Sized>(&mut self, canvas: &mut C, width: u32, height: u32) {
        render(canvas, self.shape, width, height);
        self.width = width;
        self.height = height;
        self.state = PenState::Idle;
        self.current = Stroke::default();
        self.finished.clear();
    }

    /// イベントを1つ処理する
    pub fn handle<C: Canvas + ?Sized>(&mut self, canvas: &mut C, event: &PointerEvent) -> EventResponse {
        let touch = event.source == PointerSource::Touch;
        let pos = event.position();

        match (self.state, event.kind) {
            (PenState::Idle, PointerKind::Down) => {
                self.begin(pos);
                EventResponse { prevent_default: touch, painted: false }
            }
            (PenState::Drawing, PointerKind::Down) => {
                self.end();
                self.begin(pos);
                EventResponse { prevent_default: touch, painted: false }
            }
            (PenState::Drawing, PointerKind::Move) => {
                let painted = match self.current.points.last().copied() {
                    Some(last) if last != pos => {
                        canvas.stroke_segment(last, pos, &self.style);
                        true
                    }
                    _ => false,
                };
                if painted {
                    self.current.points.push(pos);
                }
                EventResponse { prevent_default: touch, painted }
            }
            (PenState::Drawing, PointerKind::Up | PointerKind::Leave | PointerKind::Cancel) => {
                self.end();
                EventResponse { prevent_default: touch, painted: false }
            }
            (PenState::Idle, _) => EventResponse::default(),
        }
    }

    fn begin(&mut self, pos: Point) {
        self.state = PenState::Drawing;
        self.current = Stroke { points: vec![pos] };
    }

    fn end(&mut self) {
        self.state = PenState::Idle;
        let stroke = std::mem::take(&mut self.current);
        if !stroke.is_empty() {
            self.finished.push(stroke);
        }
    }
}
