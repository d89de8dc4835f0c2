//! Painting: walks a [`Scene`] onto a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads a display list produced by [`crate::render::build_scene`] and
//! produces pixels; it never mutates editor state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point};
use crate::render::{Node, Scene, Stroke, TextAlign};

const FONT_FAMILY: &str = "Arial";

/// Draw the full scene.
///
/// `dpr` is the device pixel ratio; scene coordinates are in CSS pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene, camera: &Camera, dpr: f64) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, scene.width, scene.height);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom(), camera.zoom())?;

    for node in &scene.nodes {
        draw_node(ctx, node)?;
    }
    Ok(())
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &Node) -> Result<(), JsValue> {
    match node {
        Node::Rect { x, y, width, height, fill, stroke, corner_radius } => {
            rect_path(ctx, *x, *y, *width, *height, *corner_radius)?;
            fill_and_stroke(ctx, fill.as_deref(), stroke.as_ref())
        }
        Node::Circle { x, y, radius, fill, stroke } => {
            ctx.begin_path();
            ctx.arc(*x, *y, *radius, 0.0, 2.0 * PI)?;
            fill_and_stroke(ctx, fill.as_deref(), stroke.as_ref())
        }
        Node::Line { points, stroke, opacity, smooth } => draw_line(ctx, points, stroke, *opacity, *smooth),
        Node::Text { x, y, text, font_px, weight, color, align, max_width } => {
            ctx.save();
            ctx.set_font(&format!("{} {font_px}px {FONT_FAMILY}", weight.css()));
            ctx.set_fill_style_str(color);
            ctx.set_text_baseline("top");
            ctx.set_text_align(match align {
                TextAlign::Left => "left",
                TextAlign::Center => "center",
            });
            let shown = match max_width {
                Some(max_w) => fit_text_with_ellipsis(ctx, text, *max_w),
                None => text.clone(),
            };
            ctx.fill_text(&shown, *x, *y)?;
            ctx.restore();
            Ok(())
        }
        Node::Group { origin, children, .. } => {
            ctx.save();
            ctx.translate(origin.x, origin.y)?;
            for child in children {
                draw_node(ctx, child)?;
            }
            ctx.restore();
            Ok(())
        }
    }
}

// =============================================================
// Primitives
// =============================================================

fn rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, radius: f64) -> Result<(), JsValue> {
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    ctx.begin_path();
    if r <= 0.0 {
        ctx.rect(x, y, w, h);
        return Ok(());
    }
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    ctx.close_path();
    Ok(())
}

fn fill_and_stroke(ctx: &CanvasRenderingContext2d, fill: Option<&str>, stroke: Option<&Stroke>) -> Result<(), JsValue> {
    if let Some(fill) = fill {
        ctx.set_fill_style_str(fill);
        ctx.fill();
    }
    if let Some(stroke) = stroke {
        apply_stroke(ctx, stroke)?;
        ctx.stroke();
        ctx.set_line_dash(&js_sys::Array::new())?;
    }
    Ok(())
}

fn draw_line(ctx: &CanvasRenderingContext2d, points: &[Point], stroke: &Stroke, opacity: f64, smooth: bool) -> Result<(), JsValue> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };

    ctx.save();
    ctx.set_global_alpha(opacity);
    apply_stroke(ctx, stroke)?;
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    if smooth && rest.len() > 1 {
        // Quadratic segments through edge midpoints, ending on the last vertex.
        for pair in points.windows(2).skip(1) {
            let mid = pair[0].midpoint(pair[1]);
            ctx.quadratic_curve_to(pair[0].x, pair[0].y, mid.x, mid.y);
        }
        if let Some(last) = rest.last() {
            ctx.line_to(last.x, last.y);
        }
    } else {
        for p in rest {
            ctx.line_to(p.x, p.y);
        }
    }
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) -> Result<(), JsValue> {
    ctx.set_stroke_style_str(&stroke.color);
    ctx.set_line_width(stroke.width);
    let dash_array = js_sys::Array::new();
    for seg in &stroke.dash {
        dash_array.push(&(*seg).into());
    }
    ctx.set_line_dash(&dash_array)
}

// =============================================================
// Text
// =============================================================

fn fit_text_with_ellipsis(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> String {
    if measured_text_width(ctx, text) <= max_w {
        return text.to_owned();
    }
    let ellipsis = "...";
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}{ellipsis}", chars.iter().collect::<String>());
        if measured_text_width(ctx, &candidate) <= max_w {
            return candidate;
        }
    }
    ellipsis.to_owned()
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => f64::INFINITY,
    }
}
