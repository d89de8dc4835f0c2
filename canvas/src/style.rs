//! Colour and sizing helpers shared by the renderer.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use crate::consts::{CARD_CHAR_WIDTH, CARD_MIN_WIDTH, CARD_PADDING};

pub const POI_FALLBACK_COLOR: &str = "#6B7280";
pub const ENTRANCE_COLOR: &str = "#F59E0B";
pub const ELEVATOR_COLOR: &str = "#7C3AED";
pub const ZONE_COLOR: &str = "#EF4444";
pub const ANNOTATION_COLOR: &str = "#F59E0B";
pub const LABEL_COLOR: &str = "#000000";
pub const PATH_COLOR: &str = "#2563EB";
pub const MARKER_OUTLINE: &str = "#fff";

/// Default label font size when the record has none or it does not parse.
pub const DEFAULT_LABEL_FONT_PX: f64 = 16.0;

/// Colour for a POI category when the POI carries no explicit colour.
#[must_use]
pub fn poi_category_color(category: &str) -> &'static str {
    match category {
        "Room" => "#3D8C6C",
        "Reception" => "#2563EB",
        "Toilet" => "#DC2626",
        "Elevator" => "#7C3AED",
        "Emergency Exit" => "#F59E0B",
        "Cafeteria" => "#10B981",
        "Pharmacy" => "#EC4899",
        "Laboratory" => "#06B6D4",
        _ => POI_FALLBACK_COLOR,
    }
}

/// Convert `#RRGGBB` to a CSS `rgba(...)` string.
///
/// Anything else is returned unchanged; the painter treats it as an opaque
/// CSS colour.
#[must_use]
pub fn rgba(hex: &str, alpha: f64) -> String {
    match parse_hex(hex) {
        Some((r, g, b)) => format!("rgba({r}, {g}, {b}, {alpha})"),
        None => hex.to_owned(),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16);
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Ok(r), Ok(g), Ok(b)) => Some((r, g, b)),
        _ => None,
    }
}

/// Width of a card so its label never clips.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn card_width(label: Option<&str>) -> f64 {
    match label {
        Some(text) => (text.chars().count() as f64).mul_add(CARD_CHAR_WIDTH, CARD_PADDING).max(CARD_MIN_WIDTH),
        None => CARD_MIN_WIDTH,
    }
}

/// Parse a CSS pixel size like `"18px"`.
#[must_use]
pub fn font_px(size: Option<&str>) -> f64 {
    let Some(raw) = size else {
        return DEFAULT_LABEL_FONT_PX;
    };
    match raw.trim().trim_end_matches("px").trim().parse::<f64>() {
        Ok(px) if px.is_finite() && px > 0.0 => px,
        _ => DEFAULT_LABEL_FONT_PX,
    }
}
