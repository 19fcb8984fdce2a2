//! 解剖図シルエット定義
//!
//! 形状は閉じた列挙 `Shape` と、形状ごとのパラメータ表（幅・高さに対する比率）
//! から生成する。絶対ピクセル値は持たないため、どの描画サイズでも同じ見た目になる。

use crate::error::{Error, Result};
use crate::geometry::{Figure, PathOp, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 描画する解剖図の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Lungs,
    Abdomen,
    Legs,
}

impl Shape {
    /// ページに並ぶ順
    pub const ALL: [Shape; 3] = [Shape::Lungs, Shape::Abdomen, Shape::Legs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Lungs => "lungs",
            Shape::Abdomen => "abdomen",
            Shape::Legs => "legs",
        }
    }

    /// 表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Shape::Lungs => "Chest / Lungs",
            Shape::Abdomen => "Abdomen",
            Shape::Legs => "Lower Limbs",
        }
    }

    /// キャンバス要素のID
    pub fn canvas_id(&self) -> String {
        format!("canvas-{}", self.as_str())
    }

    /// 描画面サイズに合わせた図形リストを生成
    ///
    /// 幅・高さのどちらかが0なら空リスト。
    pub fn figures(&self, width: f32, height: f32) -> Vec<Figure> {
        if width <= 0.0 || height <= 0.0 {
            return Vec::new();
        }
        match self {
            Shape::Lungs => lung_figures(&LUNGS, width, height),
            Shape::Abdomen => abdomen_figures(&ABDOMEN, width, height),
            Shape::Legs => leg_figures(&LEGS, width, height),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lungs" | "chest" => Ok(Shape::Lungs),
            "abdomen" => Ok(Shape::Abdomen),
            "legs" | "limbs" => Ok(Shape::Legs),
            _ => Err(Error::UnknownShape(s.to_string())),
        }
    }
}

// =============================================
// パラメータ表
// =============================================

/// 肺（左右2葉、患者左側に心切痕）
#[derive(Debug, Clone, Copy)]
pub struct LungParams {
    /// 外側縁と描画面端の距離（幅比）
    pub margin: f32,
    /// 正中線から内側縁までの距離（幅比）
    pub gap: f32,
    /// 肺尖の高さ（高さ比）
    pub top: f32,
    /// 肺底の高さ（高さ比）
    pub base: f32,
    /// 外側の膨らみ（幅比）
    pub bulge: f32,
    /// 肺尖の丸み（高さ比）
    pub apex_lift: f32,
    /// 肺底の丸み（高さ比）
    pub base_curve: f32,
    /// 心切痕の上端・下端（高さ比）
    pub notch_top: f32,
    pub notch_bottom: f32,
    /// 心切痕の深さ（幅比）
    pub notch_depth: f32,
}

pub const LUNGS: LungParams = LungParams {
    margin: 0.12,
    gap: 0.06,
    top: 0.12,
    base: 0.86,
    bulge: 0.18,
    apex_lift: 0.10,
    base_curve: 0.06,
    notch_top: 0.42,
    notch_bottom: 0.62,
    notch_depth: 0.045,
};

/// 腹部（中央の矩形に内接する角を落とした多角形 + 臍）
#[derive(Debug, Clone, Copy)]
pub struct AbdomenParams {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// 多角形の頂点（矩形内の比率、時計回り）
    pub vertices: [(f32, f32); 8],
    /// 臍マーカー半径（幅比）
    pub umbilicus_radius: f32,
    pub min_umbilicus_radius: f32,
}

pub const ABDOMEN: AbdomenParams = AbdomenParams {
    x: 0.2,
    y: 0.2,
    w: 0.6,
    h: 0.6,
    vertices: [
        (0.25, 0.0),
        (0.75, 0.0),
        (1.0, 0.25),
        (1.0, 0.75),
        (0.75, 1.0),
        (0.25, 1.0),
        (0.0, 0.75),
        (0.0, 0.25),
    ],
    umbilicus_radius: 0.0125,
    min_umbilicus_radius: 1.5,
};

/// 下肢（左右2本の矩形）
#[derive(Debug, Clone, Copy)]
pub struct LegParams {
    pub leg_width: f32,
    pub leg_height: f32,
    /// 2本の間隔（幅比）
    pub gap: f32,
    pub top: f32,
}

pub const LEGS: LegParams = LegParams {
    leg_width: 0.35,
    leg_height: 0.7,
    gap: 0.05,
    top: 0.15,
};

// =============================================
// 図形生成
// =============================================

/// 肺葉1つ分のパス
///
/// `dir` は外側方向（画面左の葉は -1、右の葉は +1）。
fn lobe_ops(p: &LungParams, width: f32, height: f32, dir: f32, notched: bool) -> Vec<PathOp> {
    let center = width / 2.0;
    let gap = width * p.gap;
    let top_y = height * p.top;
    let base_y = height * p.base;
    let bulge = width * p.bulge;
    let apex_lift = height * p.apex_lift;
    let base_curve = height * p.base_curve;

    let inner_x = center + dir * gap;
    let outer_x = center + dir * (center - width * p.margin);

    let mut ops = vec![
        PathOp::MoveTo(Point::new(inner_x, base_y)),
        // 平らな肺底
        PathOp::LineTo(Point::new(outer_x, base_y)),
        // 外側縁を肺尖まで
        PathOp::CubicTo(
            Point::new(outer_x + dir * bulge * 0.15, base_y - base_curve),
            Point::new(outer_x + dir * bulge * 0.30, top_y + apex_lift * 0.8),
            Point::new(inner_x + dir * gap * 0.15, top_y),
        ),
        // 肺尖から内側上端へ
        PathOp::CubicTo(
            Point::new(inner_x + dir * gap * 0.05, top_y - apex_lift * 0.35),
            Point::new(inner_x + dir * gap * 0.02, top_y - apex_lift * 0.15),
            Point::new(inner_x, top_y),
        ),
    ];

    if notched {
        let notch_top = height * p.notch_top;
        let notch_bottom = height * p.notch_bottom;
        let span = notch_bottom - notch_top;
        // 切痕は葉の内部（外側方向）へ凹む
        let deepest_x = inner_x + dir * width * p.notch_depth;
        let deepest_y = (notch_top + notch_bottom) / 2.0;

        ops.push(PathOp::LineTo(Point::new(inner_x, notch_top)));
        ops.push(PathOp::CubicTo(
            Point::new(inner_x, notch_top + span * 0.25),
            Point::new(deepest_x, notch_top + span * 0.35),
            Point::new(deepest_x, deepest_y),
        ));
        ops.push(PathOp::CubicTo(
            Point::new(deepest_x, notch_top + span * 0.70),
            Point::new(inner_x, notch_bottom - span * 0.10),
            Point::new(inner_x, notch_bottom),
        ));
    }

    // 内側縁は直線で肺底まで
    ops.push(PathOp::LineTo(Point::new(inner_x, base_y)));
    ops
}

/// 肺: [画面左（患者右）, 画面右（患者左・心切痕あり）]
pub fn lung_figures(p: &LungParams, width: f32, height: f32) -> Vec<Figure> {
    vec![
        Figure::outline(lobe_ops(p, width, height, -1.0, false)),
        Figure::outline(lobe_ops(p, width, height, 1.0, true)),
    ]
}

/// 腹部: [外形, 臍]
pub fn abdomen_figures(p: &AbdomenParams, width: f32, height: f32) -> Vec<Figure> {
    let rx = width * p.x;
    let ry = height * p.y;
    let rw = width * p.w;
    let rh = height * p.h;

    let mut ops: Vec<PathOp> = p
        .vertices
        .iter()
        .enumerate()
        .map(|(i, &(fx, fy))| {
            let pt = Point::new(rx + rw * fx, ry + rh * fy);
            if i == 0 {
                PathOp::MoveTo(pt)
            } else {
                PathOp::LineTo(pt)
            }
        })
        .collect();
    ops.push(PathOp::Close);

    let radius = (width * p.umbilicus_radius).max(p.min_umbilicus_radius);
    vec![
        Figure::outline(ops),
        Figure::disc(Point::new(width / 2.0, height / 2.0), radius),
    ]
}

/// 下肢: [画面左, 画面右]
pub fn leg_figures(p: &LegParams, width: f32, height: f32) -> Vec<Figure> {
    let leg_w = width * p.leg_width;
    let leg_h = height * p.leg_height;
    let gap = width * p.gap;
    let top_y = height * p.top;

    let left_x = width / 2.0 - leg_w - gap / 2.0;
    let right_x = width / 2.0 + gap / 2.0;

    vec![
        Figure::rect(left_x, top_y, leg_w, leg_h),
        Figure::rect(right_x, top_y, leg_w, leg_h),
    ]
}
