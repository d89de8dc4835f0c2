#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn category_colors() {
    assert_eq!(poi_category_color("Room"), "#3D8C6C");
    assert_eq!(poi_category_color("Emergency Exit"), "#F59E0B");
    assert_eq!(poi_category_color("Storage"), POI_FALLBACK_COLOR);
}

#[test]
fn rgba_from_hex() {
    assert_eq!(rgba("#EF4444", 0.2), "rgba(239, 68, 68, 0.2)");
    assert_eq!(rgba("#3D8C6C", 0.15), "rgba(61, 140, 108, 0.15)");
}

#[test]
fn rgba_passes_through_non_hex() {
    assert_eq!(rgba("red", 0.5), "red");
    assert_eq!(rgba("#abc", 0.5), "#abc");
    assert_eq!(rgba("#zzzzzz", 0.5), "#zzzzzz");
}

#[test]
fn card_width_has_floor() {
    assert_eq!(card_width(None), 120.0);
    assert_eq!(card_width(Some("Lab")), 120.0);
}

#[test]
fn card_width_grows_with_label() {
    // 20 chars * 8 + 40 = 200
    assert_eq!(card_width(Some("Radiology Department")), 200.0);
    assert!(card_width(Some("Radiology Department West")) > card_width(Some("Radiology Department")));
}

#[test]
fn card_width_counts_chars_not_bytes() {
    assert_eq!(card_width(Some("ÉÉÉÉÉÉÉÉÉÉÉÉ")), card_width(Some("EEEEEEEEEEEE")));
}

#[test]
fn font_px_parsing() {
    assert_eq!(font_px(Some("18px")), 18.0);
    assert_eq!(font_px(Some(" 12 px ")), 12.0);
    assert_eq!(font_px(Some("large")), 16.0);
    assert_eq!(font_px(Some("0px")), 16.0);
    assert_eq!(font_px(None), 16.0);
}
