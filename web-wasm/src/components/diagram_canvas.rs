//! 解剖図キャンバスコンポーネント
//!
//! コンテナに合わせた正方形で描画し、マウス・タッチで書き込みできる。
//! ウィンドウのリサイズで描き直す（書き込みは消える）。

use crate::canvas2d::Canvas2d;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};
use ward_round_common::{AnnotationLayer, PointerEvent, PointerKind, PointerSource, Shape};

/// 親要素の幅・高さの小さい方
fn container_size(element: &HtmlCanvasElement) -> u32 {
    element
        .parent_element()
        .map(|parent| parent.client_width().min(parent.client_height()).max(0) as u32)
        .unwrap_or_else(|| element.width())
}

/// 指が離れた・キャンセルされた場合は changedTouches 側に残る
fn touch_position(ev: &TouchEvent) -> Option<(f64, f64)> {
    ev.changed_touches()
        .get(0)
        .or_else(|| ev.touches().get(0))
        .map(|t| (t.client_x() as f64, t.client_y() as f64))
}

#[component]
pub fn DiagramCanvas(shape: Shape) -> impl IntoView {
    let canvas_ref: NodeRef<html::Canvas> = NodeRef::new();
    let layer: StoredValue<Option<AnnotationLayer>> = StoredValue::new(None);

    let redraw = move || {
        let Some(element) = canvas_ref.get_untracked() else {
            return;
        };
        let Some(mut surface) = Canvas2d::new(element) else {
            web_sys::console::error_1(&format!("{}: 2Dコンテキストを取得できません", shape.canvas_id()).into());
            return;
        };
        let size = container_size(surface.element());
        let _ = layer.try_update_value(|slot| match slot {
            Some(layer) => layer.redraw(&mut surface, size, size),
            None => *slot = Some(AnnotationLayer::attach(&mut surface, shape, size, size)),
        });
    };

    // 既定動作を抑止すべきなら true
    let dispatch = move |kind: PointerKind, source: PointerSource, client: (f64, f64)| -> bool {
        let Some(element) = canvas_ref.get_untracked() else {
            return false;
        };
        let Some(mut surface) = Canvas2d::new(element) else {
            return false;
        };
        let (x, y) = surface.to_canvas_point(client.0, client.1);
        let event = PointerEvent { kind, x, y, source };
        layer
            .try_update_value(|slot| slot.as_mut().map(|l| l.handle(&mut surface, &event).prevent_default))
            .flatten()
            .unwrap_or(false)
    };

    let on_mouse = move |kind: PointerKind| {
        move |ev: MouseEvent| {
            dispatch(kind, PointerSource::Mouse, (ev.client_x().into(), ev.client_y().into()));
        }
    };

    let on_touch = move |kind: PointerKind| {
        move |ev: TouchEvent| {
            let client = touch_position(&ev).unwrap_or((0.0, 0.0));
            if dispatch(kind, PointerSource::Touch, client) {
                ev.prevent_default();
            }
        }
    };

    Effect::new(move |_| {
        if canvas_ref.get().is_some() {
            redraw();
        }
    });

    let resize = window_event_listener(ev::resize, move |_| redraw());
    on_cleanup(move || resize.remove());

    view! {
        <figure class="diagram">
            <figcaption>
                {shape.label()}
                <button class="btn btn-small" on:click=move |_| redraw()>"Clear"</button>
            </figcaption>
            <div class="canvas-container">
                <canvas
                    id=shape.canvas_id()
                    node_ref=canvas_ref
                    on:mousedown=on_mouse(PointerKind::Down)
                    on:mousemove=on_mouse(PointerKind::Move)
                    on:mouseup=on_mouse(PointerKind::Up)
                    on:mouseleave=on_mouse(PointerKind::Leave)
                    on:touchstart=on_touch(PointerKind::Down)
                    on:touchmove=on_touch(PointerKind::Move)
                    on:touchend=on_touch(PointerKind::Up)
                    on:touchcancel=on_touch(PointerKind::Cancel)
                ></canvas>
            </div>
        </figure>
    }
}
