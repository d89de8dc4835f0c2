#![allow(clippy::float_cmp)]

use super::*;
use crate::config::Layer;
use crate::doc::{Poi, Zone};
use crate::local::LocalShape;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn poi(id: &str, x: f64, y: f64) -> Poi {
    Poi {
        id: id.to_owned(),
        floor_plan_id: "fp-1".to_owned(),
        name: "Radiology".to_owned(),
        category: "Room".to_owned(),
        description: None,
        color: None,
        coordinates: pt(x, y),
        is_active: true,
    }
}

fn zone(id: &str) -> Zone {
    Zone {
        id: id.to_owned(),
        floor_plan_id: "fp-1".to_owned(),
        name: None,
        description: None,
        color: None,
        coordinates: ZoneRect { x: 0.0, y: 0.0, width: 40.0, height: 30.0 },
        is_active: true,
    }
}

/// Engine on floor plan `fp-1` with snapping off.
fn free_core() -> EngineCore {
    let mut core = EngineCore::new();
    core.apply_config(ConfigUpdate::SetSnapToGrid { enabled: false });
    core.set_floor_plan(Some("fp-1".to_owned()));
    core
}

fn with_tool(tool: Tool) -> EngineCore {
    let mut core = free_core();
    core.set_tool(Some(tool));
    core
}

fn local_poi(id: &str, x: f64, y: f64) -> LocalElement {
    LocalElement {
        id: id.to_owned(),
        at: pt(x, y),
        color: "#3D8C6C".to_owned(),
        draggable: true,
        shape: LocalShape::Poi { label: None },
    }
}

fn mutations(actions: &[Action]) -> Vec<&Mutation> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Mutation { mutation } => Some(mutation),
            _ => None,
        })
        .collect()
}

fn notices(actions: &[Action]) -> Vec<&Notice> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Notify { notice } => Some(notice),
            _ => None,
        })
        .collect()
}

fn has_render_needed(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::RenderNeeded))
}

fn draw_zone(core: &mut EngineCore, from: Point, to: Point) -> Vec<Action> {
    core.on_click(from);
    core.on_pointer_move(to);
    core.on_pointer_up()
}

fn zone_drawn(actions: &[Action]) -> Option<ZoneRect> {
    actions.iter().find_map(|a| match a {
        Action::ZoneDrawn { rect } => Some(*rect),
        _ => None,
    })
}

// =============================================================
// Defaults and modes
// =============================================================

#[test]
fn core_new_is_idle() {
    let core = EngineCore::new();
    assert_eq!(core.mode(), Mode::Idle);
    assert_eq!(core.tool, None);
    assert!(core.doc.is_empty());
    assert_eq!(core.camera.zoom_percent, 100);
}

#[test]
fn point_tools_report_placing_point() {
    for tool in [Tool::Poi, Tool::Entrance, Tool::Elevator, Tool::Label, Tool::Annotation] {
        assert_eq!(with_tool(tool).mode(), Mode::PlacingPoint);
    }
    assert_eq!(with_tool(Tool::Path).mode(), Mode::Idle);
}

#[test]
fn click_without_tool_does_nothing() {
    let mut core = free_core();
    assert!(core.on_click(pt(10.0, 10.0)).is_empty());
    assert_eq!(core.input, InputState::Idle);
}

// =============================================================
// Point placement
// =============================================================

#[test]
fn point_tool_click_emits_snapped_coordinate() {
    let mut core = EngineCore::new();
    core.apply_config(ConfigUpdate::SetGridSize { size: 10.0 });
    core.set_tool(Some(Tool::Entrance));
    let actions = core.on_click(pt(23.0, 37.0));
    assert_eq!(actions, vec![Action::PointPlaced { tool: Tool::Entrance, at: pt(20.0, 40.0) }]);
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn click_converts_through_camera() {
    let mut core = with_tool(Tool::Poi);
    core.zoom(Zoom::In);
    core.zoom(Zoom::In);
    let actions = core.on_click(pt(60.0, 120.0));
    // 120% zoom: 60 / 1.2 = 50, 120 / 1.2 = 100.
    let Action::PointPlaced { at, .. } = &actions[0] else {
        panic!("expected point placement");
    };
    assert!((at.x - 50.0).abs() < 1e-9);
    assert!((at.y - 100.0).abs() < 1e-9);
}

// =============================================================
// Paths
// =============================================================

#[test]
fn path_clicks_accumulate_points() {
    let mut core = with_tool(Tool::Path);
    core.on_click(pt(0.0, 0.0));
    assert_eq!(core.mode(), Mode::DrawingPath);
    core.on_click(pt(10.0, 0.0));
    assert_eq!(core.input, InputState::DrawingPath { points: vec![pt(0.0, 0.0), pt(10.0, 0.0)] });
}

#[test]
fn double_click_commits_path_in_order() {
    let mut core = with_tool(Tool::Path);
    let input = [pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)];
    for p in input {
        core.on_click(p);
    }
    let actions = core.on_double_click();
    let muts = mutations(&actions);
    let [Mutation::CreatePath { path }] = muts.as_slice() else {
        panic!("expected one path creation, got {muts:?}");
    };
    assert_eq!(path.points, input.to_vec());
    assert_eq!(path.floor_plan_id, "fp-1");
    assert_eq!(path.color, "#2563EB");
    assert_eq!(path.stroke_width, 3.0);
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn path_keeps_repeated_points() {
    let mut core = with_tool(Tool::Path);
    for p in [pt(5.0, 5.0), pt(5.0, 5.0), pt(9.0, 9.0)] {
        core.on_click(p);
    }
    let actions = core.save_path();
    let muts = mutations(&actions);
    let [Mutation::CreatePath { path }] = muts.as_slice() else {
        panic!("expected path creation");
    };
    assert_eq!(path.points.len(), 3);
}

#[test]
fn double_click_with_one_point_keeps_drawing() {
    let mut core = with_tool(Tool::Path);
    core.on_click(pt(0.0, 0.0));
    assert!(core.on_double_click().is_empty());
    assert_eq!(core.mode(), Mode::DrawingPath);
}

#[test]
fn path_without_floor_plan_is_dropped() {
    let mut core = EngineCore::new();
    core.set_tool(Some(Tool::Path));
    core.on_click(pt(0.0, 0.0));
    core.on_click(pt(40.0, 0.0));
    let actions = core.on_double_click();
    assert!(mutations(&actions).is_empty());
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn cancel_path_discards_draft() {
    let mut core = with_tool(Tool::Path);
    core.on_click(pt(0.0, 0.0));
    core.on_click(pt(40.0, 0.0));
    assert!(has_render_needed(&core.cancel_path()));
    assert_eq!(core.input, InputState::Idle);
    assert!(core.cancel_path().is_empty());
}

#[test]
fn tool_switch_cancels_path_and_restart_is_fresh() {
    let mut core = with_tool(Tool::Path);
    for p in [pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0)] {
        core.on_click(p);
    }
    assert!(has_render_needed(&core.set_tool(Some(Tool::Poi))));
    assert_eq!(core.input, InputState::Idle);

    core.set_tool(Some(Tool::Path));
    core.on_click(pt(50.0, 50.0));
    assert_eq!(core.input, InputState::DrawingPath { points: vec![pt(50.0, 50.0)] });
}

#[test]
fn reselecting_same_tool_keeps_draft() {
    let mut core = with_tool(Tool::Path);
    core.on_click(pt(0.0, 0.0));
    assert!(core.set_tool(Some(Tool::Path)).is_empty());
    assert_eq!(core.mode(), Mode::DrawingPath);
}

#[test]
fn double_click_ignored_for_other_tools() {
    let mut core = with_tool(Tool::Measure);
    core.on_click(pt(0.0, 0.0));
    assert!(core.on_double_click().is_empty());
    assert_eq!(core.mode(), Mode::Measuring);
}

// =============================================================
// Zones
// =============================================================

#[test]
fn zone_needs_both_sides_over_ten() {
    let mut core = with_tool(Tool::Restricted);
    let actions = draw_zone(&mut core, pt(0.0, 0.0), pt(10.0, 50.0));
    assert!(zone_drawn(&actions).is_none());
    assert_eq!(core.input, InputState::Idle);

    let actions = draw_zone(&mut core, pt(0.0, 0.0), pt(11.0, 11.0));
    assert_eq!(zone_drawn(&actions), Some(ZoneRect { x: 0.0, y: 0.0, width: 11.0, height: 11.0 }));
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn zone_rect_is_normalized() {
    let mut core = with_tool(Tool::Restricted);
    let actions = draw_zone(&mut core, pt(80.0, 90.0), pt(20.0, 30.0));
    assert_eq!(zone_drawn(&actions), Some(ZoneRect { x: 20.0, y: 30.0, width: 60.0, height: 60.0 }));
}

#[test]
fn zone_corners_are_snapped() {
    let mut core = EngineCore::new();
    core.apply_config(ConfigUpdate::SetGridSize { size: 10.0 });
    core.set_tool(Some(Tool::Restricted));
    let actions = draw_zone(&mut core, pt(3.0, 4.0), pt(47.0, 26.0));
    assert_eq!(zone_drawn(&actions), Some(ZoneRect { x: 0.0, y: 0.0, width: 50.0, height: 30.0 }));
}

#[test]
fn second_click_while_drawing_zone_is_ignored() {
    let mut core = with_tool(Tool::Restricted);
    core.on_click(pt(0.0, 0.0));
    core.on_pointer_move(pt(30.0, 30.0));
    assert!(core.on_click(pt(90.0, 90.0)).is_empty());
    assert_eq!(core.input, InputState::DrawingZone { start: pt(0.0, 0.0), current: pt(30.0, 30.0) });
}

#[test]
fn pointer_up_without_draft_is_noop() {
    let mut core = with_tool(Tool::Restricted);
    assert!(core.on_pointer_up().is_empty());
}

#[test]
fn tool_switch_cancels_zone() {
    let mut core = with_tool(Tool::Restricted);
    core.on_click(pt(0.0, 0.0));
    core.set_tool(Some(Tool::Measure));
    assert_eq!(core.input, InputState::Idle);
    assert!(zone_drawn(&core.on_pointer_up()).is_none());
}

// =============================================================
// Measurements
// =============================================================

#[test]
fn measurement_exactly_five_commits() {
    let mut core = with_tool(Tool::Measure);
    core.on_click(pt(0.0, 0.0));
    let actions = core.on_click(pt(3.0, 4.0));
    let muts = mutations(&actions);
    let [Mutation::CreateMeasurement { measurement }] = muts.as_slice() else {
        panic!("expected measurement creation");
    };
    assert_eq!(measurement.distance, 5.0);
    assert_eq!(measurement.unit, "meters");
    assert_eq!(measurement.stroke_width, 2.0);
    assert_eq!(measurement.start_point, pt(0.0, 0.0));
    assert_eq!(measurement.end_point, pt(3.0, 4.0));
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn measurement_under_five_is_rejected() {
    let mut core = with_tool(Tool::Measure);
    core.on_click(pt(0.0, 0.0));
    let actions = core.on_click(pt(4.99, 0.0));
    assert!(mutations(&actions).is_empty());
    assert_eq!(notices(&actions), vec![&Notice::error(MEASURE_TOO_SHORT)]);
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn measurement_distance_is_rounded() {
    let mut core = with_tool(Tool::Measure);
    core.on_click(pt(0.0, 0.0));
    let actions = core.on_click(pt(10.0, 10.0));
    let muts = mutations(&actions);
    let [Mutation::CreateMeasurement { measurement }] = muts.as_slice() else {
        panic!("expected measurement creation");
    };
    assert_eq!(measurement.distance, 14.0);
}

#[test]
fn pointer_move_tracks_measurement_end() {
    let mut core = with_tool(Tool::Measure);
    core.on_click(pt(0.0, 0.0));
    assert!(has_render_needed(&core.on_pointer_move(pt(7.0, 0.0))));
    assert_eq!(core.input, InputState::Measuring { start: pt(0.0, 0.0), end: pt(7.0, 0.0) });
}

#[test]
fn measurement_without_floor_plan_is_dropped() {
    let mut core = EngineCore::new();
    core.set_tool(Some(Tool::Measure));
    core.on_click(pt(0.0, 0.0));
    let actions = core.on_click(pt(100.0, 0.0));
    assert!(mutations(&actions).is_empty());
    assert!(notices(&actions).is_empty());
    assert_eq!(core.input, InputState::Idle);
}

// =============================================================
// Drag end
// =============================================================

#[test]
fn poi_drag_persists_snapped_position() {
    let mut core = EngineCore::new();
    core.apply_config(ConfigUpdate::SetGridSize { size: 10.0 });
    core.set_floor_plan(Some("fp-1".to_owned()));
    core.load(Collection::Pois(vec![poi("p1", 50.0, 50.0)]));

    let actions = core.on_drag_end("p1", pt(53.0, 53.0), None);
    let muts = mutations(&actions);
    let [Mutation::UpdatePosition { kind, id, patch }] = muts.as_slice() else {
        panic!("expected position update");
    };
    assert_eq!(*kind, EntityKind::Poi);
    assert_eq!(id, "p1");
    assert_eq!((patch.coordinates.x, patch.coordinates.y), (50, 50));
    assert_eq!(patch.coordinates.width, None);
    assert_eq!(core.doc.pois()[0].coordinates, pt(50.0, 50.0));
}

#[test]
fn drag_rounds_to_integers_when_unsnapped() {
    let mut core = free_core();
    core.load(Collection::Pois(vec![poi("p1", 0.0, 0.0)]));
    let actions = core.on_drag_end("p1", pt(12.4, 7.6), None);
    let muts = mutations(&actions);
    let [Mutation::UpdatePosition { patch, .. }] = muts.as_slice() else {
        panic!("expected position update");
    };
    assert_eq!((patch.coordinates.x, patch.coordinates.y), (12, 8));
    assert_eq!(core.doc.pois()[0].coordinates, pt(12.0, 8.0));
}

#[test]
fn zone_drag_keeps_size_unless_resized() {
    let mut core = free_core();
    core.load(Collection::Zones(vec![zone("z1")]));

    let actions = core.on_drag_end("z1", pt(5.0, 5.0), None);
    let muts = mutations(&actions);
    let [Mutation::UpdatePosition { patch, .. }] = muts.as_slice() else {
        panic!("expected zone update");
    };
    assert_eq!(patch.coordinates.width, Some(40.0));
    assert_eq!(patch.coordinates.height, Some(30.0));

    let actions = core.on_drag_end("z1", pt(5.0, 5.0), Some((60.4, 0.0)));
    let muts = mutations(&actions);
    let [Mutation::UpdatePosition { patch, .. }] = muts.as_slice() else {
        panic!("expected zone update");
    };
    assert_eq!(patch.coordinates.width, Some(40.0));

    let actions = core.on_drag_end("z1", pt(5.0, 5.0), Some((60.4, 25.6)));
    let muts = mutations(&actions);
    let [Mutation::UpdatePosition { patch, .. }] = muts.as_slice() else {
        panic!("expected zone update");
    };
    assert_eq!((patch.coordinates.width, patch.coordinates.height), (Some(60.0), Some(26.0)));
    assert_eq!(core.doc.zone("z1").unwrap().coordinates.width, 60.0);
}

#[test]
fn drag_is_independent_of_tool_and_draft() {
    let mut core = with_tool(Tool::Path);
    core.load(Collection::Pois(vec![poi("p1", 0.0, 0.0)]));
    core.on_click(pt(1.0, 1.0));
    let actions = core.on_drag_end("p1", pt(30.0, 30.0), None);
    assert_eq!(mutations(&actions).len(), 1);
    assert_eq!(core.mode(), Mode::DrawingPath);
}

#[test]
fn local_drag_mutates_list_and_pushes_history() {
    let mut core = free_core();
    core.load_local_elements(vec![local_poi("a", 0.0, 0.0)]);
    let actions = core.on_drag_end("a", pt(25.0, 35.0), None);
    assert!(mutations(&actions).is_empty());
    assert_eq!(core.local[0].at, pt(25.0, 35.0));
    assert_eq!(core.history.len(), 2);
    assert!(core.can_undo());
}

#[test]
fn remote_id_wins_over_local() {
    let mut core = free_core();
    core.load(Collection::Pois(vec![poi("shared", 0.0, 0.0)]));
    core.load_local_elements(vec![local_poi("shared", 0.0, 0.0)]);
    let actions = core.on_drag_end("shared", pt(9.0, 9.0), None);
    assert_eq!(mutations(&actions).len(), 1);
    assert_eq!(core.local[0].at, pt(0.0, 0.0));
}

#[test]
fn locked_local_element_does_not_move() {
    let mut core = free_core();
    let locked = LocalElement { draggable: false, ..local_poi("a", 0.0, 0.0) };
    core.load_local_elements(vec![locked, local_poi("b", 5.0, 5.0)]);
    let before = core.history.len();

    assert!(core.on_drag_end("a", pt(200.0, 200.0), None).is_empty());
    assert_eq!(core.local[0].at, pt(0.0, 0.0));
    assert_eq!(core.history.len(), before);
    assert!(!core.can_undo());
}

#[test]
fn unknown_drag_is_noop() {
    let mut core = free_core();
    assert!(core.on_drag_end("ghost", pt(1.0, 1.0), None).is_empty());
    assert!(core.history.is_empty());
}

// =============================================================
// History
// =============================================================

#[test]
fn first_local_list_seeds_history() {
    let mut core = free_core();
    core.load_local_elements(Vec::new());
    assert!(core.history.is_empty());
    core.load_local_elements(vec![local_poi("a", 0.0, 0.0)]);
    assert_eq!(core.history.len(), 1);
    assert!(!core.can_undo());
}

#[test]
fn undo_redo_restore_local_list() {
    let mut core = free_core();
    core.load_local_elements(vec![local_poi("a", 0.0, 0.0)]);
    core.on_drag_end("a", pt(10.0, 0.0), None);
    core.on_drag_end("a", pt(20.0, 0.0), None);

    assert!(has_render_needed(&core.undo()));
    assert_eq!(core.local[0].at, pt(10.0, 0.0));
    core.undo();
    assert_eq!(core.local[0].at, pt(0.0, 0.0));
    assert!(core.undo().is_empty());

    core.redo();
    assert_eq!(core.local[0].at, pt(10.0, 0.0));
}

#[test]
fn edit_after_undo_discards_future() {
    let mut core = free_core();
    core.load_local_elements(vec![local_poi("a", 0.0, 0.0)]);
    core.on_drag_end("a", pt(10.0, 0.0), None);
    core.on_drag_end("a", pt(20.0, 0.0), None);
    core.undo();
    core.undo();
    core.on_drag_end("a", pt(30.0, 0.0), None);

    assert!(core.redo().is_empty());
    assert_eq!(core.local[0].at, pt(30.0, 0.0));
}

#[test]
fn add_local_element_is_undoable() {
    let mut core = free_core();
    core.add_local_element(local_poi("a", 0.0, 0.0));
    core.add_local_element(local_poi("b", 5.0, 5.0));
    assert_eq!(core.local.len(), 2);
    core.undo();
    assert_eq!(core.local.len(), 1);
}

#[test]
fn add_local_element_fills_blank_id() {
    let mut core = free_core();
    core.add_local_element(local_poi("", 0.0, 0.0));
    assert!(!core.local[0].id.is_empty());
}

#[test]
fn clear_all_empties_local_only() {
    let mut core = free_core();
    core.load(Collection::Pois(vec![poi("p1", 0.0, 0.0)]));
    core.load_local_elements(vec![local_poi("a", 0.0, 0.0)]);

    let actions = core.clear_all();
    assert_eq!(notices(&actions), vec![&Notice::success(CLEARED)]);
    assert!(core.local.is_empty());
    assert_eq!(core.doc.pois().len(), 1);

    core.undo();
    assert_eq!(core.local.len(), 1);
}

// =============================================================
// Floor plan, config, camera
// =============================================================

#[test]
fn switching_floor_plan_drops_draft_and_collections() {
    let mut core = with_tool(Tool::Path);
    core.load(Collection::Pois(vec![poi("p1", 0.0, 0.0)]));
    core.on_click(pt(0.0, 0.0));
    assert!(has_render_needed(&core.set_floor_plan(Some("fp-2".to_owned()))));
    assert_eq!(core.input, InputState::Idle);
    assert!(core.doc.is_empty());
    assert!(core.set_floor_plan(Some("fp-2".to_owned())).is_empty());
}

#[test]
fn apply_remote_reconciles_entity() {
    let mut core = free_core();
    core.load(Collection::Pois(vec![poi("p1", 0.0, 0.0)]));
    core.apply_remote(Entity::Poi(poi("p1", 70.0, 80.0)));
    assert_eq!(core.doc.pois()[0].coordinates, pt(70.0, 80.0));
}

#[test]
fn config_update_requests_render_only_on_change() {
    let mut core = free_core();
    assert!(has_render_needed(&core.apply_config(ConfigUpdate::ToggleLayer { layer: Layer::Zones })));
    assert!(core.apply_config(ConfigUpdate::SetSnapToGrid { enabled: false }).is_empty());
    assert!(core.apply_config(ConfigUpdate::SetGridSize { size: -5.0 }).is_empty());
}

#[test]
fn zoom_saturates() {
    let mut core = EngineCore::new();
    for _ in 0..20 {
        core.zoom(Zoom::In);
    }
    assert_eq!(core.camera.zoom_percent, 200);
    assert!(core.zoom(Zoom::In).is_empty());
    core.zoom(Zoom::Reset);
    assert_eq!(core.camera.zoom_percent, 100);
    for _ in 0..20 {
        core.zoom(Zoom::Out);
    }
    assert_eq!(core.camera.zoom_percent, 50);
}

#[test]
fn pan_moves_the_view() {
    let mut core = with_tool(Tool::Poi);
    assert_eq!(core.pan(30.0, -20.0), vec![Action::RenderNeeded]);
    assert_eq!((core.camera.pan_x, core.camera.pan_y), (30.0, -20.0));

    let actions = core.on_click(pt(130.0, 80.0));
    assert_eq!(actions, vec![Action::PointPlaced { tool: Tool::Poi, at: pt(100.0, 100.0) }]);
}

#[test]
fn empty_pan_is_noop() {
    let mut core = EngineCore::new();
    assert!(core.pan(0.0, 0.0).is_empty());
    assert!(core.pan(f64::NAN, 5.0).is_empty());
    assert_eq!(core.camera, Camera::default());
}

#[test]
fn zoomed_out_scene_covers_the_stage() {
    let mut core = EngineCore::new();
    core.set_viewport(800.0, 600.0, 1.0);
    for _ in 0..5 {
        core.zoom(Zoom::Out);
    }
    assert_eq!(core.camera.zoom_percent, 50);

    let scene = core.scene();
    let Some(render::Node::Rect { width, height, .. }) = scene.nodes.first() else {
        panic!("expected background rect");
    };
    assert_eq!((*width, *height), (1600.0, 1200.0));
    let grid_max_x = scene
        .nodes
        .iter()
        .filter_map(|n| match n {
            render::Node::Line { points, smooth: false, .. } => Some(points[0].x.max(points[1].x)),
            _ => None,
        })
        .fold(0.0, f64::max);
    assert_eq!(grid_max_x, 1600.0);
}

// =============================================================
// Queries
// =============================================================

#[test]
fn hint_follows_tool() {
    let mut core = with_tool(Tool::Path);
    assert_eq!(core.hint(), HINT_DEFAULT);
    core.on_click(pt(0.0, 0.0));
    assert_eq!(core.hint(), HINT_PATH);
    core.set_tool(Some(Tool::Measure));
    assert_eq!(core.hint(), HINT_MEASURE);
}

#[test]
fn element_count_sums_local_and_active_remote() {
    let mut core = free_core();
    let mut hidden = poi("p2", 0.0, 0.0);
    hidden.is_active = false;
    core.load(Collection::Pois(vec![poi("p1", 0.0, 0.0), hidden]));
    core.load(Collection::Zones(vec![zone("z1")]));
    core.load_local_elements(vec![local_poi("a", 0.0, 0.0)]);
    assert_eq!(core.element_count(), 3);
}

#[test]
fn search_delegates_to_index() {
    let mut core = free_core();
    core.load(Collection::Pois(vec![poi("p1", 0.0, 0.0)]));
    let hits = core.search("radio");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "p1");
}

#[test]
fn scene_reflects_draft() {
    let mut core = with_tool(Tool::Restricted);
    core.set_viewport(200.0, 100.0, 2.0);
    core.on_click(pt(0.0, 0.0));
    core.on_pointer_move(pt(40.0, 40.0));
    let scene = core.scene();
    assert_eq!(scene.width, 200.0);
    assert!(scene.nodes.iter().any(|n| matches!(n, render::Node::Rect { width, .. } if *width == 40.0)));
}

// =============================================================
// Wire shapes
// =============================================================

#[test]
fn position_patch_serializes_integers() {
    let patch = PositionPatch { coordinates: PatchCoordinates { x: 50, y: 60, width: None, height: None } };
    assert_eq!(serde_json::to_value(patch).unwrap(), serde_json::json!({ "coordinates": { "x": 50, "y": 60 } }));
}

#[test]
fn new_measurement_is_camel_case() {
    let m = NewMeasurement {
        floor_plan_id: "fp-1".to_owned(),
        start_point: pt(0.0, 0.0),
        end_point: pt(3.0, 4.0),
        distance: 5.0,
        unit: "meters".to_owned(),
        color: "#2563EB".to_owned(),
        stroke_width: 2.0,
    };
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["floorPlanId"], "fp-1");
    assert_eq!(json["startPoint"]["x"], 0.0);
    assert_eq!(json["strokeWidth"], 2.0);
}

#[test]
fn action_serializes_with_tag() {
    let json = serde_json::to_value(Action::PointPlaced { tool: Tool::Poi, at: pt(1.0, 2.0) }).unwrap();
    assert_eq!(json["action"], "point_placed");
    assert_eq!(json["tool"], "poi");
}
