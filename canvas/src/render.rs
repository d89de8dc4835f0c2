//! Scene building: turns editor state into a display list.
//!
//! This module never touches the browser. [`build_scene`] reads the document,
//! the local element list, the current draft and the editor configuration and
//! produces a [`Scene`] of plain [`Node`]s in floor-plan coordinates. The
//! painter in [`crate::paint`] walks that list onto a 2D context; tests inspect
//! it directly.
//!
//! Layer order (bottom first): background, grid, local elements, POIs,
//! entrances, elevators, paths, draft path, zones, draft zone, labels,
//! measurements, draft measurement, annotations.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Camera, Point};
use crate::config::{EditorConfig, Layer, Theme};
use crate::consts::{CARD_HEIGHT, DRAFT_COLOR, MARKER_RADIUS, MEASURE_STROKE_WIDTH, MEASURE_UNIT, MIN_PATH_POINTS, PATH_STROKE_WIDTH};
use crate::doc::{EntityId, EntityKind, FloorPlanDoc, ZoneRect};
use crate::input::InputState;
use crate::local::{LocalElement, LocalShape};
use crate::style;

/// Dash pattern for draft paths and measurement lines.
const DRAFT_DASH: [f64; 2] = [10.0, 5.0];

/// Dash pattern for zone borders.
const ZONE_DASH: [f64; 2] = [5.0, 5.0];

/// Fallback side for local zones with no size.
const LOCAL_ZONE_SIDE: f64 = 100.0;

/// Gap between a measurement line's midpoint and its readout.
const READOUT_OFFSET: f64 = 20.0;

/// Stage size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Outline style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dash: Vec<f64>,
}

impl Stroke {
    fn solid(color: impl Into<String>, width: f64) -> Self {
        Self { color: color.into(), width, dash: Vec::new() }
    }

    fn dashed(color: impl Into<String>, width: f64, dash: [f64; 2]) -> Self {
        Self { color: color.into(), width, dash: dash.to_vec() }
    }
}

/// CSS font weight for text nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Medium,
    Bold,
}

impl FontWeight {
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "500",
            Self::Bold => "bold",
        }
    }
}

/// Horizontal anchoring of a text node relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
}

/// What a draggable group stands for, so drag-end can be routed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum EntityRef {
    /// An entity in one of the remote collections.
    Remote { kind: EntityKind, id: EntityId },
    /// An element of the local list.
    Local { id: String },
}

impl EntityRef {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Remote { id, .. } | Self::Local { id } => id,
        }
    }
}

/// One drawable primitive. Children of a group are relative to its origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum Node {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<String>,
        stroke: Option<Stroke>,
        corner_radius: f64,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Line {
        points: Vec<Point>,
        stroke: Stroke,
        opacity: f64,
        /// Draw as a smoothed curve through the points.
        smooth: bool,
    },
    Text {
        x: f64,
        /// Top of the text box.
        y: f64,
        text: String,
        font_px: f64,
        weight: FontWeight,
        color: String,
        align: TextAlign,
        max_width: Option<f64>,
    },
    Group {
        origin: Point,
        entity: Option<EntityRef>,
        draggable: bool,
        children: Vec<Node>,
    },
}

impl Node {
    fn group(origin: Point, entity: Option<EntityRef>, draggable: bool, children: Vec<Node>) -> Self {
        Self::Group { origin, entity, draggable, children }
    }

    fn marker(at: Point, color: &str) -> Self {
        Self::Circle {
            x: at.x,
            y: at.y,
            radius: MARKER_RADIUS,
            fill: Some(color.to_owned()),
            stroke: Some(Stroke::solid(style::MARKER_OUTLINE, 1.0)),
        }
    }

    fn text(x: f64, y: f64, text: impl Into<String>, font_px: f64, weight: FontWeight, color: impl Into<String>) -> Self {
        Self::Text {
            x,
            y,
            text: text.into(),
            font_px,
            weight,
            color: color.into(),
            align: TextAlign::Left,
            max_width: None,
        }
    }

    fn centered(self) -> Self {
        match self {
            Self::Text { x, y, text, font_px, weight, color, max_width, .. } => Self::Text {
                x,
                y,
                text,
                font_px,
                weight,
                color,
                align: TextAlign::Center,
                max_width,
            },
            other => other,
        }
    }
}

/// The display list for one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<Node>,
}

impl Scene {
    /// Top-level groups that can be dragged, in draw order.
    pub fn draggables(&self) -> impl Iterator<Item = &EntityRef> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Group { entity: Some(entity), draggable: true, .. } => Some(entity),
            _ => None,
        })
    }

    /// Find the top-level group for `id`, preferring the topmost.
    #[must_use]
    pub fn group_for(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().rev().find(|node| match node {
            Node::Group { entity: Some(entity), .. } => entity.id() == id,
            _ => false,
        })
    }
}

/// The floor-plan rectangle visible through `camera` on a `viewport`-sized stage.
#[derive(Debug, Clone, Copy, PartialEq)]
struct VisibleRect {
    min: Point,
    max: Point,
}

impl VisibleRect {
    fn new(camera: &Camera, viewport: Viewport) -> Self {
        Self {
            min: camera.screen_to_world(Point::new(0.0, 0.0)),
            max: camera.screen_to_world(Point::new(viewport.width, viewport.height)),
        }
    }
}

/// Build the display list for the current editor state.
///
/// Background and grid cover whatever part of the floor plan `camera` shows,
/// so zooming out or panning never exposes bare stage.
#[must_use]
pub fn build_scene(
    doc: &FloorPlanDoc,
    local: &[LocalElement],
    input: &InputState,
    config: &EditorConfig,
    camera: &Camera,
    viewport: Viewport,
) -> Scene {
    let mut nodes = Vec::new();
    let theme = config.theme;
    let visible = VisibleRect::new(camera, viewport);

    nodes.push(Node::Rect {
        x: visible.min.x,
        y: visible.min.y,
        width: visible.max.x - visible.min.x,
        height: visible.max.y - visible.min.y,
        fill: Some(theme.background().to_owned()),
        stroke: None,
        corner_radius: 0.0,
    });

    if config.show_grid {
        push_grid(&mut nodes, config.grid_size, theme, visible);
    }

    nodes.extend(local.iter().map(|el| local_node(el, theme)));

    let layers = config.layers;
    if layers.is_visible(Layer::Pois) {
        for poi in doc.pois().iter().filter(|e| e.is_active) {
            let color = poi
                .color
                .clone()
                .unwrap_or_else(|| style::poi_category_color(&poi.category).to_owned());
            let entity = EntityRef::Remote { kind: EntityKind::Poi, id: poi.id.clone() };
            nodes.push(card(CardIcon::Poi, poi.coordinates, &color, Some(&poi.name), entity, true, theme));
        }
        for e in doc.entrances().iter().filter(|e| e.is_active) {
            let color = e.color.as_deref().unwrap_or(style::ENTRANCE_COLOR);
            let entity = EntityRef::Remote { kind: EntityKind::Entrance, id: e.id.clone() };
            nodes.push(card(CardIcon::Entrance, e.coordinates, color, Some(&e.name), entity, true, theme));
        }
        for e in doc.elevators().iter().filter(|e| e.is_active) {
            let color = e.color.as_deref().unwrap_or(style::ELEVATOR_COLOR);
            let entity = EntityRef::Remote { kind: EntityKind::Elevator, id: e.id.clone() };
            nodes.push(card(CardIcon::Elevator, e.coordinates, color, Some(&e.name), entity, true, theme));
        }
    }

    if layers.is_visible(Layer::Paths) {
        for path in doc.paths().iter().filter(|p| p.is_active && p.points.len() >= MIN_PATH_POINTS) {
            let color = path.color.as_deref().unwrap_or(style::PATH_COLOR);
            let width = path.stroke_width.unwrap_or(PATH_STROKE_WIDTH);
            nodes.push(Node::group(
                Point::default(),
                Some(EntityRef::Remote { kind: EntityKind::Path, id: path.id.clone() }),
                false,
                vec![Node::Line { points: path.points.clone(), stroke: Stroke::solid(color, width), opacity: 1.0, smooth: true }],
            ));
        }
    }
    if let InputState::DrawingPath { points } = input
        && !points.is_empty()
    {
        nodes.push(draft_path(points));
    }

    if layers.is_visible(Layer::Zones) {
        for zone in doc.zones().iter().filter(|z| z.is_active) {
            let color = zone.color.as_deref().unwrap_or(style::ZONE_COLOR);
            let rect = zone.coordinates;
            let mut children = vec![Node::Rect {
                x: 0.0,
                y: 0.0,
                width: rect.width,
                height: rect.height,
                fill: Some(style::rgba(color, 0.2)),
                stroke: Some(Stroke::dashed(color, 2.0, ZONE_DASH)),
                corner_radius: 4.0,
            }];
            if let Some(name) = zone.name.as_deref().filter(|n| !n.is_empty()) {
                children.push(Node::text(5.0, 5.0, name, 12.0, FontWeight::Medium, color));
            }
            nodes.push(Node::group(
                Point::new(rect.x, rect.y),
                Some(EntityRef::Remote { kind: EntityKind::Zone, id: zone.id.clone() }),
                true,
                children,
            ));
        }
    }
    if let Some(rect) = input.zone_rect() {
        nodes.push(draft_zone(rect));
    }

    if layers.is_visible(Layer::Labels) {
        for label in doc.labels().iter().filter(|l| l.is_active) {
            let weight = if label.font_weight.as_deref() == Some("Bold") { FontWeight::Bold } else { FontWeight::Normal };
            let color = label.color.as_deref().unwrap_or(style::LABEL_COLOR);
            let font_px = style::font_px(label.font_size.as_deref());
            nodes.push(Node::group(
                label.coordinates,
                Some(EntityRef::Remote { kind: EntityKind::Label, id: label.id.clone() }),
                true,
                vec![Node::text(0.0, 0.0, label.text.clone(), font_px, weight, color)],
            ));
        }
    }

    for m in doc.measurements().iter().filter(|m| m.is_active) {
        let color = m.color.as_deref().unwrap_or(DRAFT_COLOR);
        let width = m.stroke_width.unwrap_or(MEASURE_STROKE_WIDTH);
        let readout = format!("{} {}", m.distance, m.unit);
        let children = measure_nodes(m.start_point, m.end_point, Stroke::solid(color, width), color, readout);
        nodes.push(Node::group(
            Point::default(),
            Some(EntityRef::Remote { kind: EntityKind::Measurement, id: m.id.clone() }),
            false,
            children,
        ));
    }
    if let InputState::Measuring { start, end } = input {
        let readout = format!("{} {MEASURE_UNIT}", start.distance_to(*end).round());
        let children = measure_nodes(
            *start,
            *end,
            Stroke::dashed(DRAFT_COLOR, MEASURE_STROKE_WIDTH, DRAFT_DASH),
            DRAFT_COLOR,
            readout,
        );
        nodes.push(Node::group(Point::default(), None, false, children));
    }

    if layers.is_visible(Layer::Labels) {
        for a in doc.annotations().iter().filter(|a| a.is_active) {
            let color = a.color.as_deref().unwrap_or(style::ANNOTATION_COLOR);
            nodes.push(Node::group(
                a.coordinates,
                Some(EntityRef::Remote { kind: EntityKind::Annotation, id: a.id.clone() }),
                true,
                annotation_nodes(color, Some(&a.name)),
            ));
        }
    }

    Scene { width: viewport.width, height: viewport.height, nodes }
}

// =============================================================
// Layers
// =============================================================

fn push_grid(nodes: &mut Vec<Node>, grid_size: f64, theme: Theme, visible: VisibleRect) {
    if !(grid_size.is_finite() && grid_size > 0.0) {
        return;
    }
    let stroke = Stroke::solid(theme.grid_color(), 1.0);
    let opacity = theme.grid_opacity();
    let VisibleRect { min, max } = visible;

    // Lines sit on multiples of the grid size so they line up with snapping.
    let mut k = (min.x / grid_size).floor();
    while k * grid_size < max.x {
        let x = k * grid_size;
        nodes.push(Node::Line {
            points: vec![Point::new(x, min.y), Point::new(x, max.y)],
            stroke: stroke.clone(),
            opacity,
            smooth: false,
        });
        k += 1.0;
    }
    let mut k = (min.y / grid_size).floor();
    while k * grid_size < max.y {
        let y = k * grid_size;
        nodes.push(Node::Line {
            points: vec![Point::new(min.x, y), Point::new(max.x, y)],
            stroke: stroke.clone(),
            opacity,
            smooth: false,
        });
        k += 1.0;
    }
}

fn draft_path(points: &[Point]) -> Node {
    let mut children = vec![Node::Line {
        points: points.to_vec(),
        stroke: Stroke::dashed(DRAFT_COLOR, PATH_STROKE_WIDTH, DRAFT_DASH),
        opacity: 1.0,
        smooth: true,
    }];
    children.extend(points.iter().map(|p| Node::marker(*p, DRAFT_COLOR)));
    Node::group(Point::default(), None, false, children)
}

fn draft_zone(rect: ZoneRect) -> Node {
    Node::Rect {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        fill: Some(style::rgba(style::ZONE_COLOR, 0.2)),
        stroke: Some(Stroke::dashed(style::ZONE_COLOR, 2.0, ZONE_DASH)),
        corner_radius: 4.0,
    }
}

fn measure_nodes(start: Point, end: Point, stroke: Stroke, color: &str, readout: String) -> Vec<Node> {
    let mid = start.midpoint(end);
    vec![
        Node::Line { points: vec![start, end], stroke, opacity: 1.0, smooth: false },
        Node::marker(start, color),
        Node::marker(end, color),
        Node::text(mid.x, mid.y - READOUT_OFFSET, readout, 12.0, FontWeight::Bold, color).centered(),
    ]
}

fn annotation_nodes(color: &str, name: Option<&str>) -> Vec<Node> {
    let mut children = vec![
        Node::Circle {
            x: 0.0,
            y: 0.0,
            radius: 12.0,
            fill: Some(color.to_owned()),
            stroke: Some(Stroke::solid(style::MARKER_OUTLINE, 2.0)),
        },
        Node::text(0.0, -7.0, "i", 14.0, FontWeight::Bold, style::MARKER_OUTLINE).centered(),
    ];
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        children.push(Node::text(20.0, -8.0, name, 12.0, FontWeight::Medium, color));
    }
    children
}

// =============================================================
// Cards
// =============================================================

#[derive(Clone, Copy)]
enum CardIcon {
    Poi,
    Entrance,
    Elevator,
}

/// A "room card" centred on `at`, sized to fit its label.
fn card(icon: CardIcon, at: Point, color: &str, label: Option<&str>, entity: EntityRef, draggable: bool, theme: Theme) -> Node {
    let label = label.filter(|l| !l.is_empty());
    let width = style::card_width(label);
    let height = CARD_HEIGHT;

    let mut children = vec![Node::Rect {
        x: -width / 2.0,
        y: -height / 2.0,
        width,
        height,
        fill: Some(style::rgba(color, 0.15)),
        stroke: Some(Stroke::solid(style::rgba(color, 0.4), 2.0)),
        corner_radius: 8.0,
    }];

    match icon {
        CardIcon::Poi => {
            children.push(Node::Circle { x: 0.0, y: -8.0, radius: 10.0, fill: Some(style::rgba(color, 0.3)), stroke: None });
            children.push(Node::Circle {
                x: 0.0,
                y: -8.0,
                radius: 6.0,
                fill: Some(color.to_owned()),
                stroke: Some(Stroke::solid(style::MARKER_OUTLINE, 1.5)),
            });
        }
        CardIcon::Entrance => children.push(Node::Rect {
            x: -10.0,
            y: -height / 2.0 + 8.0,
            width: 20.0,
            height: 20.0,
            fill: Some(color.to_owned()),
            stroke: Some(Stroke::solid(style::MARKER_OUTLINE, 2.0)),
            corner_radius: 4.0,
        }),
        CardIcon::Elevator => children.push(Node::Rect {
            x: -8.0,
            y: -height / 2.0 + 8.0,
            width: 16.0,
            height: 24.0,
            fill: Some(color.to_owned()),
            stroke: Some(Stroke::solid(style::MARKER_OUTLINE, 2.0)),
            corner_radius: 2.0,
        }),
    }

    if let Some(text) = label {
        children.push(Node::Text {
            x: 0.0,
            y: height / 2.0 - 20.0,
            text: text.to_owned(),
            font_px: 13.0,
            weight: FontWeight::Medium,
            color: theme.text_color().to_owned(),
            align: TextAlign::Center,
            max_width: Some(width - 20.0),
        });
    }

    Node::group(at, Some(entity), draggable, children)
}

// =============================================================
// Local elements
// =============================================================

fn local_node(el: &LocalElement, theme: Theme) -> Node {
    let entity = EntityRef::Local { id: el.id.clone() };
    match &el.shape {
        LocalShape::Poi { label } => card(CardIcon::Poi, el.at, &el.color, label.as_deref(), entity, el.draggable, theme),
        LocalShape::Entrance { label } => {
            card(CardIcon::Entrance, el.at, &el.color, label.as_deref(), entity, el.draggable, theme)
        }
        LocalShape::Elevator { label } => {
            card(CardIcon::Elevator, el.at, &el.color, label.as_deref(), entity, el.draggable, theme)
        }
        LocalShape::Zone { width, height, label } => {
            let width = if *width > 0.0 { *width } else { LOCAL_ZONE_SIDE };
            let height = if *height > 0.0 { *height } else { LOCAL_ZONE_SIDE };
            let mut children = vec![Node::Rect {
                x: 0.0,
                y: 0.0,
                width,
                height,
                fill: Some(el.color.clone()),
                stroke: Some(Stroke::solid("#E5E7EB", 1.0)),
                corner_radius: 4.0,
            }];
            if let Some(text) = label.as_deref().filter(|l| !l.is_empty()) {
                children.push(Node::Text {
                    x: width / 2.0,
                    y: height / 2.0 - 10.0,
                    text: text.to_owned(),
                    font_px: 14.0,
                    weight: FontWeight::Bold,
                    color: theme.text_color().to_owned(),
                    align: TextAlign::Center,
                    max_width: Some(width - 20.0),
                });
            }
            Node::group(el.at, Some(entity), el.draggable, children)
        }
        LocalShape::Path { points, stroke_width, .. } => Node::group(
            el.at,
            Some(entity),
            el.draggable,
            vec![Node::Line { points: points.clone(), stroke: Stroke::solid(el.color.clone(), *stroke_width), opacity: 1.0, smooth: true }],
        ),
        LocalShape::Label { text } => Node::group(
            el.at,
            Some(entity),
            el.draggable,
            vec![Node::text(0.0, 0.0, text.clone(), 12.0, FontWeight::Normal, el.color.clone())],
        ),
        LocalShape::Annotation { label } => {
            Node::group(el.at, Some(entity), el.draggable, annotation_nodes(&el.color, label.as_deref()))
        }
    }
}
