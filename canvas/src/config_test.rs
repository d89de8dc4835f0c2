#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults() {
    let c = EditorConfig::default();
    assert_eq!(c.grid_size, 20.0);
    assert!(c.snap_to_grid);
    assert!(c.show_grid);
    assert_eq!(c.theme, Theme::Light);
    assert_eq!(c.layers, LayerVisibility { pois: true, paths: true, zones: true, labels: true });
}

#[test]
fn set_and_toggle_layer() {
    let mut c = EditorConfig::default();
    assert!(c.apply(ConfigUpdate::SetLayer { layer: Layer::Zones, visible: false }));
    assert!(!c.layers.zones);
    assert!(c.apply(ConfigUpdate::ToggleLayer { layer: Layer::Zones }));
    assert!(c.layers.zones);
}

#[test]
fn redundant_update_reports_no_change() {
    let mut c = EditorConfig::default();
    assert!(!c.apply(ConfigUpdate::SetShowGrid { enabled: true }));
}

#[test]
fn invalid_grid_size_is_ignored() {
    let mut c = EditorConfig::default();
    assert!(!c.apply(ConfigUpdate::SetGridSize { size: 0.0 }));
    assert!(!c.apply(ConfigUpdate::SetGridSize { size: -4.0 }));
    assert!(!c.apply(ConfigUpdate::SetGridSize { size: f64::INFINITY }));
    assert_eq!(c.grid_size, 20.0);
    assert!(c.apply(ConfigUpdate::SetGridSize { size: 10.0 }));
    assert_eq!(c.grid_size, 10.0);
}

#[test]
fn snap_follows_settings() {
    let mut c = EditorConfig { grid_size: 10.0, ..EditorConfig::default() };
    assert_eq!(c.snap(Point::new(53.0, 57.0)), Point::new(50.0, 60.0));
    c.apply(ConfigUpdate::SetSnapToGrid { enabled: false });
    assert_eq!(c.snap(Point::new(53.0, 57.0)), Point::new(53.0, 57.0));
}

#[test]
fn update_wire_format() {
    let u: ConfigUpdate = serde_json::from_str(r#"{"op":"set_layer","layer":"labels","visible":false}"#).unwrap();
    assert_eq!(u, ConfigUpdate::SetLayer { layer: Layer::Labels, visible: false });
}

#[test]
fn dark_theme_palette() {
    assert_eq!(Theme::Dark.background(), "#1a1a1a");
    assert_eq!(Theme::Dark.grid_opacity(), 0.4);
    assert_eq!(Theme::Light.text_color(), "#374151");
}
