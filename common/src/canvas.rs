//! 描画面の抽象とダイアグラム描画
//!
//! `Canvas` を実装するのはホスト側（CLI: tiny-skia、Web: Canvas 2D）。
//! ここでは何をどの順で描くかだけを決める。

use crate::geometry::{Figure, Point};
use crate::shape::Shape;

/// RGBA色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSSカラー文字列 (#rrggbb)
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// 解剖図の輪郭色 (#374151)
pub const OUTLINE_COLOR: Rgba = Rgba::rgb(0x37, 0x41, 0x51);

/// 書き込みストロークの色 (#dc2626)
pub const ANNOTATION_COLOR: Rgba = Rgba::rgb(0xdc, 0x26, 0x26);

pub const ANNOTATION_WIDTH: f32 = 3.0;

/// 線のスタイル
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
    /// 丸い線端・結合
    pub round: bool,
}

impl StrokeStyle {
    /// 解剖図の輪郭線（幅の1%、最小2px）
    pub fn outline(surface_width: u32) -> Self {
        Self {
            color: OUTLINE_COLOR,
            width: (surface_width as f32 * 0.01).floor().max(2.0),
            round: false,
        }
    }

    /// 書き込み用
    pub fn annotation() -> Self {
        Self {
            color: ANNOTATION_COLOR,
            width: ANNOTATION_WIDTH,
            round: true,
        }
    }
}

/// 描画面
pub trait Canvas {
    /// 全面を透明にクリア
    fn clear(&mut self, width: u32, height: u32);

    /// 図形を描く（`Paint::Filled` は塗り + 輪郭）
    fn draw_figure(&mut self, figure: &Figure, style: &StrokeStyle);

    /// 線分を1本描く（既存ピクセルは消さない）
    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle);
}

/// 描画面をクリアして解剖図を描く
///
/// 同じ引数なら何度呼んでも同じ結果になる。サイズ0はクリアのみ。
pub fn render<C: Canvas + ?Sized>(canvas: &mut C, shape: Shape, width: u32, height: u32) {
    canvas.clear(width, height);
    if width == 0 || height == 0 {
        return;
    }

    let style = StrokeStyle::outline(width);
    for figure in shape.figures(width as f32, height as f32) {
        canvas.draw_figure(&figure, &style);
    }
}

/// 記録用の描画命令
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: u32, height: u32 },
    Figure { figure: Figure, style: StrokeStyle },
    Segment { from: Point, to: Point, style: StrokeStyle },
}

/// 描画命令を記録するだけの描画面（テスト・検証用）
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録された線分（書き込みのみ）
    pub fn segments(&self) -> Vec<(Point, Point)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Segment { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// クリア命令の回数
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, width: u32, height: u32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn draw_figure(&mut self, figure: &Figure, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Figure {
            figure: figure.clone(),
            style: *style,
        });
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Segment { from, to, style: *style });
    }
}
