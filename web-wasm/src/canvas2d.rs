//! `<canvas>` の2Dコンテキストを描画面として使う

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use ward_round_common::{Canvas, Figure, Paint, PathOp, Point, StrokeStyle};

/// 塗りつぶし図形（臍マーカー）の輪郭線幅
const FILLED_OUTLINE_WIDTH: f64 = 1.0;

pub struct Canvas2d {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    /// 2Dコンテキストが取れなければ `None`
    pub fn new(element: HtmlCanvasElement) -> Option<Self> {
        let ctx = element
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { element, ctx })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.element
    }

    /// 要素の表示サイズに合わせた座標変換
    pub fn to_canvas_point(&self, client_x: f64, client_y: f64) -> (f32, f32) {
        let rect = self.element.get_bounding_client_rect();
        client_to_canvas(
            client_x,
            client_y,
            (rect.left(), rect.top(), rect.width(), rect.height()),
            (self.element.width(), self.element.height()),
        )
    }

    fn apply_style(&self, style: &StrokeStyle, width: f64) {
        self.ctx.set_stroke_style_str(&style.color.to_css());
        self.ctx.set_line_width(width);
        if style.round {
            self.ctx.set_line_cap("round");
            self.ctx.set_line_join("round");
        } else {
            self.ctx.set_line_cap("butt");
            self.ctx.set_line_join("miter");
        }
    }

    fn trace(&self, ops: &[PathOp]) {
        self.ctx.begin_path();
        for op in ops {
            match *op {
                PathOp::MoveTo(p) => self.ctx.move_to(p.x.into(), p.y.into()),
                PathOp::LineTo(p) => self.ctx.line_to(p.x.into(), p.y.into()),
                PathOp::CubicTo(c1, c2, p) => self.ctx.bezier_curve_to(
                    c1.x.into(),
                    c1.y.into(),
                    c2.x.into(),
                    c2.y.into(),
                    p.x.into(),
                    p.y.into(),
                ),
                PathOp::Close => self.ctx.close_path(),
            }
        }
    }
}

/// クライアント座標 → キャンバスのピクセル座標
///
/// CSSで縮小表示されていても、キャンバス内部の解像度に合わせて拡大する。
pub fn client_to_canvas(
    client_x: f64,
    client_y: f64,
    (left, top, css_width, css_height): (f64, f64, f64, f64),
    (width, height): (u32, u32),
) -> (f32, f32) {
    let scale_x = if css_width > 0.0 { width as f64 / css_width } else { 1.0 };
    let scale_y = if css_height > 0.0 { height as f64 / css_height } else { 1.0 };
    (
        ((client_x - left) * scale_x) as f32,
        ((client_y - top) * scale_y) as f32,
    )
}

impl Canvas for Canvas2d {
    fn clear(&mut self, width: u32, height: u32) {
        // width/height を設定するとビットマップも消える
        if self.element.width() != width {
            self.element.set_width(width);
        }
        if self.element.height() != height {
            self.element.set_height(height);
        }
        self.ctx.clear_rect(0.0, 0.0, width.into(), height.into());
    }

    fn draw_figure(&mut self, figure: &Figure, style: &StrokeStyle) {
        self.trace(&figure.ops);
        match figure.paint {
            Paint::Outline => {
                self.apply_style(style, style.width.into());
            }
            Paint::Filled => {
                self.ctx.set_fill_style_str(&style.color.to_css());
                self.ctx.fill();
                self.apply_style(style, FILLED_OUTLINE_WIDTH);
            }
        }
        self.ctx.stroke();
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.trace(&[PathOp::MoveTo(from), PathOp::LineTo(to)]);
        self.apply_style(style, style.width.into());
        self.ctx.stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_canvas_offset() {
        let (x, y) = client_to_canvas(110.0, 70.0, (10.0, 20.0, 400.0, 400.0), (400, 400));
        assert_eq!((x, y), (100.0, 50.0));
    }

    #[test]
    fn test_client_to_canvas_scaled() {
        // 200px表示の400pxキャンバス
        let (x, y) = client_to_canvas(100.0, 50.0, (0.0, 0.0, 200.0, 200.0), (400, 400));
        assert_eq!((x, y), (200.0, 100.0));
    }

    #[test]
    fn test_client_to_canvas_hidden_element() {
        let (x, y) = client_to_canvas(5.0, 6.0, (0.0, 0.0, 0.0, 0.0), (0, 0));
        assert_eq!((x, y), (5.0, 6.0));
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use ward_round_common::{render, Shape};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn canvas_element() -> HtmlCanvasElement {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.create_element("canvas").ok())
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
            .expect("canvas element")
    }

    #[wasm_bindgen_test]
    fn wasm_render_resizes_canvas() {
        let mut surface = Canvas2d::new(canvas_element()).expect("2d context");
        render(&mut surface, Shape::Lungs, 120, 120);
        assert_eq!((surface.element().width(), surface.element().height()), (120, 120));
    }
}
