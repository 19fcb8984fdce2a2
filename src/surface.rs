//! tiny-skia による描画面
//!
//! ブラウザの `<canvas>` に相当するRGBAピクセルバッファ。PNGで保存できる。

use crate::error::{Result, WardRoundError};
use std::path::Path;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};
use ward_round_common::{Canvas, Figure, PathOp, Point, StrokeStyle};

/// 塗りつぶし図形（臍マーカー）の輪郭線幅
const FILLED_OUTLINE_WIDTH: f32 = 1.0;

/// ピクセル描画面
///
/// サイズ0の場合はピクセルを持たず、描画はすべて何もしない。
pub struct PixmapSurface {
    pixmap: Option<Pixmap>,
    width: u32,
    height: u32,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixmap: Pixmap::new(width, height),
            width,
            height,
        }
    }

    /// 正方形の描画面
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA（乗算済みアルファ）のピクセル列
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.as_ref().map(|p| p.data()).unwrap_or(&[])
    }

    /// 何か描かれているピクセル数
    pub fn painted_pixels(&self) -> usize {
        self.pixels().chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    /// 指定座標のピクセル (r, g, b, a)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let p = self.pixmap.as_ref()?.pixel(x, y)?;
        Some([p.red(), p.green(), p.blue(), p.alpha()])
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let pixmap = self.pixmap.as_ref().ok_or_else(|| {
            if self.width == 0 || self.height == 0 {
                WardRoundError::Render("サイズ0の描画面は保存できません".into())
            } else {
                WardRoundError::Render(format!(
                    "{}x{} の描画面を確保できません",
                    self.width, self.height
                ))
            }
        })?;
        pixmap
            .encode_png()
            .map_err(|e| WardRoundError::Render(format!("PNGエンコード失敗: {}", e)))
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        let data = self.encode_png()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, data)?;
        Ok(())
    }
}

fn build_path(ops: &[PathOp]) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for op in ops {
        match *op {
            PathOp::MoveTo(p) => pb.move_to(p.x, p.y),
            PathOp::LineTo(p) => pb.line_to(p.x, p.y),
            PathOp::CubicTo(c1, c2, p) => pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathOp::Close => pb.close(),
        }
    }
    pb.finish()
}

fn paint_for(style: &StrokeStyle) -> Paint<'static> {
    let mut paint = Paint::default();
    let c = style.color;
    paint.set_color_rgba8(c.r, c.g, c.b, c.a);
    paint.anti_alias = true;
    paint
}

fn stroke_for(style: &StrokeStyle, width: f32) -> Stroke {
    let (line_cap, line_join) = if style.round {
        (LineCap::Round, LineJoin::Round)
    } else {
        (LineCap::Butt, LineJoin::Miter)
    };
    Stroke {
        width,
        line_cap,
        line_join,
        ..Default::default()
    }
}

impl Canvas for PixmapSurface {
    fn clear(&mut self, width: u32, height: u32) {
        if width != self.width || height != self.height || self.pixmap.is_none() {
            // リサイズ時は描画面ごと作り直す
            *self = Self::new(width, height);
            return;
        }
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    fn draw_figure(&mut self, figure: &Figure, style: &StrokeStyle) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(path) = build_path(&figure.ops) else {
            return;
        };

        let paint = paint_for(style);
        match figure.paint {
            ward_round_common::Paint::Outline => {
                pixmap.stroke_path(&path, &paint, &stroke_for(style, style.width), Transform::identity(), None);
            }
            ward_round_common::Paint::Filled => {
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                pixmap.stroke_path(
                    &path,
                    &paint,
                    &stroke_for(style, FILLED_OUTLINE_WIDTH),
                    Transform::identity(),
                    None,
                );
            }
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(path) = build_path(&[PathOp::MoveTo(from), PathOp::LineTo(to)]) else {
            return;
        };
        pixmap.stroke_path(&path, &paint_for(style), &stroke_for(style, style.width), Transform::identity(), None);
    }
}
