//! 描画ジオメトリの基本型
//!
//! ホスト（tiny-skia / Canvas 2D）に依存しないパス表現:
//! - Point: 描画面上の座標（左上原点）
//! - PathOp: パス命令（moveTo / lineTo / bezierCurveTo / closePath）
//! - Figure: 1回の beginPath 〜 stroke/fill に相当する図形

use serde::{Deserialize, Serialize};

/// 描画面上の座標
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// パス命令
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    /// 3次ベジェ（制御点1, 制御点2, 終点）
    CubicTo(Point, Point, Point),
    Close,
}

/// 図形の塗り方
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// 輪郭線のみ
    Outline,
    /// 塗りつぶし + 輪郭線（臍マーカー用）
    Filled,
}

/// 1つの図形（パス + 塗り方）
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub ops: Vec<PathOp>,
    pub paint: Paint,
}

impl Figure {
    pub fn outline(ops: Vec<PathOp>) -> Self {
        Self { ops, paint: Paint::Outline }
    }

    pub fn filled(ops: Vec<PathOp>) -> Self {
        Self { ops, paint: Paint::Filled }
    }

    /// 軸平行矩形（Canvas の rect() 相当）
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::outline(vec![
            PathOp::MoveTo(Point::new(x, y)),
            PathOp::LineTo(Point::new(x + w, y)),
            PathOp::LineTo(Point::new(x + w, y + h)),
            PathOp::LineTo(Point::new(x, y + h)),
            PathOp::Close,
        ])
    }

    /// 塗りつぶし円（4本のベジェで近似）
    pub fn disc(center: Point, radius: f32) -> Self {
        Self::filled(circle_ops(center, radius))
    }

    /// 図形の全頂点（制御点を含む）
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.ops.iter().flat_map(|op| match *op {
            PathOp::MoveTo(p) | PathOp::LineTo(p) => vec![p],
            PathOp::CubicTo(c1, c2, p) => vec![c1, c2, p],
            PathOp::Close => vec![],
        })
    }

    /// 外接矩形 (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        self.points().fold(None, |acc, p| match acc {
            None => Some((p.x, p.y, p.x, p.y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))),
        })
    }
}

/// 円をベジェ近似する係数 4/3 * (sqrt(2) - 1)
pub const BEZIER_K: f32 = 0.552_284_8;

fn circle_ops(c: Point, r: f32) -> Vec<PathOp> {
    let k = r * BEZIER_K;
    vec![
        PathOp::MoveTo(Point::new(c.x, c.y - r)),
        PathOp::CubicTo(
            Point::new(c.x + k, c.y - r),
            Point::new(c.x + r, c.y - k),
            Point::new(c.x + r, c.y),
        ),
        PathOp::CubicTo(
            Point::new(c.x + r, c.y + k),
            Point::new(c.x + k, c.y + r),
            Point::new(c.x, c.y + r),
        ),
        PathOp::CubicTo(
            Point::new(c.x - k, c.y + r),
            Point::new(c.x - r, c.y + k),
            Point::new(c.x - r, c.y),
        ),
        PathOp::CubicTo(
            Point::new(c.x - r, c.y - k),
            Point::new(c.x - k, c.y - r),
            Point::new(c.x, c.y - r),
        ),
        PathOp::Close,
    ]
}

/// 3次ベジェ上の点 (t ∈ [0, 1])
pub fn cubic_point(p0: Point, c1: Point, c2: Point, p1: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * c1.x + c * c2.x + d * p1.x,
        a * p0.y + b * c1.y + c * c2.y + d * p1.y,
    )
}

/// パスを折れ線に展開する（ベジェは `segments` 分割）
///
/// サブパスごとに点列を返す。形状の性質検証（ノッチ・重なり判定）に使う。
pub fn flatten(ops: &[PathOp], segments: usize) -> Vec<Vec<Point>> {
    let segments = segments.max(1);
    let mut paths: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for op in ops {
        match *op {
            PathOp::MoveTo(p) => {
                if current.len() > 1 {
                    paths.push(std::mem::take(&mut current));
                }
                current.clear();
                current.push(p);
            }
            PathOp::LineTo(p) => current.push(p),
            PathOp::CubicTo(c1, c2, p) => {
                let start = current.last().copied().unwrap_or(p);
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    current.push(cubic_point(start, c1, c2, p, t));
                }
            }
            PathOp::Close => {
                if let Some(first) = current.first().copied() {
                    current.push(first);
                }
            }
        }
    }

    if current.len() > 1 {
        paths.push(current);
    }
    paths
}
