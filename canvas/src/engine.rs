use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::config::{ConfigUpdate, EditorConfig};
use crate::consts::{DRAFT_COLOR, MEASURE_STROKE_WIDTH, MEASURE_UNIT, MIN_MEASURE_DISTANCE, MIN_PATH_POINTS, MIN_ZONE_SIDE, PATH_STROKE_WIDTH};
use crate::doc::{Collection, Entity, EntityId, EntityKind, FloorPlanDoc, FloorPlanId, ZoneRect};
use crate::history::History;
use crate::input::{InputState, Mode, Tool};
use crate::local::{self, LocalElement};
use crate::paint;
use crate::render::{self, Scene, Viewport};
use crate::search::{self, SearchHit};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Notice shown when a measurement's two clicks are too close together.
pub const MEASURE_TOO_SHORT: &str = "Please click further apart to measure distance";

/// Notice shown after the local element list is cleared.
pub const CLEARED: &str = "All elements cleared";

const HINT_PATH: &str = "Click to add points, Double-click to finish path";
const HINT_MEASURE: &str = "Click two points to measure distance";
const HINT_DEFAULT: &str = "Click on map to add POIs + Drag to move elements";

// =============================================================
// Outputs
// =============================================================

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    RenderNeeded,
    /// A point-placement tool was clicked; the host decides what to create.
    PointPlaced { tool: Tool, at: Point },
    /// A zone rectangle large enough to keep was drawn.
    ZoneDrawn { rect: ZoneRect },
    /// A change the host must send to the remote store.
    Mutation { mutation: Mutation },
    Notify { notice: Notice },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Rounded coordinates sent with a position update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchCoordinates {
    pub x: i64,
    pub y: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Body of a position update: `{ "coordinates": { ... } }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionPatch {
    pub coordinates: PatchCoordinates,
}

impl PositionPatch {
    /// The patched position as a floor-plan point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn point(&self) -> Point {
        Point::new(self.coordinates.x as f64, self.coordinates.y as f64)
    }

    fn size(&self) -> Option<(f64, f64)> {
        Some((self.coordinates.width?, self.coordinates.height?))
    }
}

/// Request body for a new path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPath {
    pub floor_plan_id: FloorPlanId,
    pub points: Vec<Point>,
    pub color: String,
    pub stroke_width: f64,
}

/// Request body for a new measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeasurement {
    pub floor_plan_id: FloorPlanId,
    pub start_point: Point,
    pub end_point: Point,
    pub distance: f64,
    pub unit: String,
    pub color: String,
    pub stroke_width: f64,
}

/// A remote-store change produced by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    UpdatePosition { kind: EntityKind, id: EntityId, patch: PositionPatch },
    CreatePath { path: NewPath },
    CreateMeasurement { measurement: NewMeasurement },
}

/// Toolbar zoom buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zoom {
    In,
    Out,
    Reset,
}

#[allow(clippy::cast_possible_truncation)]
fn round_px(v: f64) -> i64 {
    v.round() as i64
}

// =============================================================
// EngineCore
// =============================================================

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: FloorPlanDoc,
    pub local: Vec<LocalElement>,
    pub history: History<Vec<LocalElement>>,
    pub config: EditorConfig,
    pub camera: Camera,
    pub tool: Option<Tool>,
    pub input: InputState,
    pub viewport: Viewport,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: FloorPlanDoc::new(),
            local: Vec::new(),
            history: History::new(),
            config: EditorConfig::default(),
            camera: Camera::default(),
            tool: None,
            input: InputState::default(),
            viewport: Viewport::default(),
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an explicit configuration.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self { config, ..Self::default() }
    }

    // --- Data inputs ---

    /// Switch floor plans. A change drops loaded collections and any draft.
    pub fn set_floor_plan(&mut self, floor_plan_id: Option<FloorPlanId>) -> Vec<Action> {
        if !self.doc.set_floor_plan(floor_plan_id) {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::RenderNeeded]
    }

    /// Replace one kind's collection with a server list.
    pub fn load(&mut self, collection: Collection) -> Vec<Action> {
        self.doc.load(collection);
        vec![Action::RenderNeeded]
    }

    /// Reconcile an entity acknowledged by the server.
    pub fn apply_remote(&mut self, entity: Entity) -> Vec<Action> {
        self.doc.upsert(entity);
        vec![Action::RenderNeeded]
    }

    /// Replace the local element list wholesale.
    pub fn load_local_elements(&mut self, mut elements: Vec<LocalElement>) -> Vec<Action> {
        for el in &mut elements {
            el.ensure_id();
        }
        self.local = elements;
        self.seed_history();
        vec![Action::RenderNeeded]
    }

    /// Append one element to the local list as an undoable edit.
    pub fn add_local_element(&mut self, mut element: LocalElement) -> Vec<Action> {
        element.ensure_id();
        self.local.push(element);
        if !self.seed_history() {
            self.history.push(self.local.clone());
        }
        vec![Action::RenderNeeded]
    }

    fn seed_history(&mut self) -> bool {
        !self.local.is_empty() && self.history.seed(&self.local)
    }

    // --- Configuration ---

    /// Apply one configuration update from the host.
    pub fn apply_config(&mut self, update: ConfigUpdate) -> Vec<Action> {
        if self.config.apply(update) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Change the active tool, cancelling any draft owned by another tool.
    pub fn set_tool(&mut self, tool: Option<Tool>) -> Vec<Action> {
        self.tool = tool;
        match self.input.owner() {
            Some(owner) if Some(owner) != tool => {
                tracing::debug!(draft = owner.name(), "tool changed, dropping draft");
                self.input = InputState::Idle;
                vec![Action::RenderNeeded]
            }
            _ => Vec::new(),
        }
    }

    pub fn zoom(&mut self, zoom: Zoom) -> Vec<Action> {
        let before = self.camera;
        match zoom {
            Zoom::In => self.camera.zoom_in(),
            Zoom::Out => self.camera.zoom_out(),
            Zoom::Reset => self.camera.reset(),
        }
        if self.camera == before { Vec::new() } else { vec![Action::RenderNeeded] }
    }

    /// Shift the view by a screen-space delta in CSS pixels.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        if !(dx.is_finite() && dy.is_finite()) {
            return Vec::new();
        }
        let before = self.camera;
        self.camera.pan_by(dx, dy);
        if self.camera == before { Vec::new() } else { vec![Action::RenderNeeded] }
    }

    /// Update the stage size in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) {
        self.viewport = Viewport::new(width, height);
        self.dpr = dpr;
    }

    // --- Pointer input ---

    fn snapped(&self, screen_pt: Point) -> Point {
        self.config.snap(self.camera.screen_to_world(screen_pt))
    }

    /// A click on the stage.
    pub fn on_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let Some(tool) = self.tool else {
            return Vec::new();
        };
        let at = self.snapped(screen_pt);

        match tool {
            Tool::Path => {
                if let InputState::DrawingPath { points } = &mut self.input {
                    points.push(at);
                } else {
                    self.input = InputState::DrawingPath { points: vec![at] };
                }
                vec![Action::RenderNeeded]
            }
            Tool::Restricted => {
                if matches!(self.input, InputState::DrawingZone { .. }) {
                    return Vec::new();
                }
                self.input = InputState::DrawingZone { start: at, current: at };
                vec![Action::RenderNeeded]
            }
            Tool::Measure => match self.input {
                InputState::Measuring { start, .. } => self.finish_measurement(start, at),
                _ => {
                    self.input = InputState::Measuring { start: at, end: at };
                    vec![Action::RenderNeeded]
                }
            },
            Tool::Poi | Tool::Entrance | Tool::Elevator | Tool::Label | Tool::Annotation => {
                vec![Action::PointPlaced { tool, at }]
            }
        }
    }

    /// Pointer motion over the stage. Only live drafts react.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let at = self.snapped(screen_pt);
        match &mut self.input {
            InputState::DrawingZone { current, .. } => *current = at,
            InputState::Measuring { end, .. } => *end = at,
            InputState::Idle | InputState::DrawingPath { .. } => return Vec::new(),
        }
        vec![Action::RenderNeeded]
    }

    /// Pointer release. Finishes a zone draft.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let Some(rect) = self.input.zone_rect() else {
            return Vec::new();
        };
        self.input = InputState::Idle;

        let mut actions = vec![Action::RenderNeeded];
        if rect.width > MIN_ZONE_SIDE && rect.height > MIN_ZONE_SIDE {
            actions.push(Action::ZoneDrawn { rect });
        } else {
            tracing::debug!(width = rect.width, height = rect.height, "zone too small, discarded");
        }
        actions
    }

    /// Double-click finishes a path with enough points.
    pub fn on_double_click(&mut self) -> Vec<Action> {
        if self.tool != Some(Tool::Path) {
            return Vec::new();
        }
        self.save_path()
    }

    /// Commit the path draft if it has enough points.
    pub fn save_path(&mut self) -> Vec<Action> {
        let InputState::DrawingPath { points } = &self.input else {
            return Vec::new();
        };
        if points.len() < MIN_PATH_POINTS {
            return Vec::new();
        }
        let points = points.clone();
        self.input = InputState::Idle;

        let Some(floor_plan_id) = self.doc.floor_plan_id() else {
            tracing::debug!("no floor plan, path draft dropped");
            return vec![Action::RenderNeeded];
        };
        let path = NewPath {
            floor_plan_id: floor_plan_id.to_owned(),
            points,
            color: DRAFT_COLOR.to_owned(),
            stroke_width: PATH_STROKE_WIDTH,
        };
        vec![Action::RenderNeeded, Action::Mutation { mutation: Mutation::CreatePath { path } }]
    }

    /// Abandon the path draft.
    pub fn cancel_path(&mut self) -> Vec<Action> {
        if !matches!(self.input, InputState::DrawingPath { .. }) {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::RenderNeeded]
    }

    fn finish_measurement(&mut self, start: Point, end: Point) -> Vec<Action> {
        self.input = InputState::Idle;
        let mut actions = vec![Action::RenderNeeded];

        let Some(floor_plan_id) = self.doc.floor_plan_id() else {
            tracing::debug!("no floor plan, measurement dropped");
            return actions;
        };
        let distance = start.distance_to(end);
        if distance < MIN_MEASURE_DISTANCE {
            tracing::debug!(distance, "measurement too short");
            actions.push(Action::Notify { notice: Notice::error(MEASURE_TOO_SHORT) });
            return actions;
        }

        let measurement = NewMeasurement {
            floor_plan_id: floor_plan_id.to_owned(),
            start_point: start,
            end_point: end,
            distance: distance.round(),
            unit: MEASURE_UNIT.to_owned(),
            color: DRAFT_COLOR.to_owned(),
            stroke_width: MEASURE_STROKE_WIDTH,
        };
        actions.push(Action::Mutation { mutation: Mutation::CreateMeasurement { measurement } });
        actions
    }

    /// A draggable group was released at `to` (floor-plan coordinates).
    ///
    /// Remote entities are moved optimistically and a position update is
    /// emitted; local elements move in memory and push a history entry.
    /// `size` carries a zone resize, ignored unless both sides are positive.
    pub fn on_drag_end(&mut self, id: &str, to: Point, size: Option<(f64, f64)>) -> Vec<Action> {
        let at = self.config.snap(to);

        if let Some(kind) = self.doc.resolve_draggable(id) {
            let size = match kind {
                EntityKind::Zone => self.doc.zone(id).map(|zone| match size {
                    Some((w, h)) if w > 0.0 && h > 0.0 => (w.round(), h.round()),
                    _ => (zone.coordinates.width, zone.coordinates.height),
                }),
                _ => None,
            };
            let patch = PositionPatch {
                coordinates: PatchCoordinates {
                    x: round_px(at.x),
                    y: round_px(at.y),
                    width: size.map(|(w, _)| w),
                    height: size.map(|(_, h)| h),
                },
            };
            self.doc.move_entity(kind, id, patch.point(), patch.size());
            return vec![
                Action::RenderNeeded,
                Action::Mutation { mutation: Mutation::UpdatePosition { kind, id: id.to_owned(), patch } },
            ];
        }

        let Some(next) = local::moved(&self.local, id, at) else {
            tracing::debug!(id, "drag end for unknown or locked element");
            return Vec::new();
        };
        self.local = next;
        self.history.push(self.local.clone());
        vec![Action::RenderNeeded]
    }

    // --- History ---

    pub fn undo(&mut self) -> Vec<Action> {
        match self.history.undo() {
            Some(snapshot) => {
                self.local = snapshot.clone();
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    pub fn redo(&mut self) -> Vec<Action> {
        match self.history.redo() {
            Some(snapshot) => {
                self.local = snapshot.clone();
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    /// Empty the local element list. Remote entities are untouched.
    pub fn clear_all(&mut self) -> Vec<Action> {
        self.local.clear();
        self.history.push(Vec::new());
        vec![Action::RenderNeeded, Action::Notify { notice: Notice::success(CLEARED) }]
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        match self.input {
            InputState::DrawingPath { .. } => Mode::DrawingPath,
            InputState::DrawingZone { .. } => Mode::DrawingZone,
            InputState::Measuring { .. } => Mode::Measuring,
            InputState::Idle if self.tool.is_some_and(Tool::places_point) => Mode::PlacingPoint,
            InputState::Idle => Mode::Idle,
        }
    }

    /// Footer hint for the current tool.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match (self.tool, &self.input) {
            (Some(Tool::Path), InputState::DrawingPath { .. }) => HINT_PATH,
            (Some(Tool::Measure), _) => HINT_MEASURE,
            _ => HINT_DEFAULT,
        }
    }

    /// Count shown next to the search button.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.local.len() + self.doc.len_active()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        search::search(&self.doc, query)
    }

    /// Build the display list for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        render::build_scene(&self.doc, &self.local, &self.input, &self.config, &self.camera, self.viewport)
    }
}

// =============================================================
// Engine
// =============================================================

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: EditorConfig) -> Self {
        let mut core = EngineCore::with_config(config);
        if let Some(window) = web_sys::window() {
            core.dpr = window.device_pixel_ratio();
        }
        Self { canvas, core }
    }

    /// Resize the backing store to match the CSS size at the given DPR.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Err(JsValue::from_str("2d context unavailable"));
        };
        let ctx: CanvasRenderingContext2d = ctx.dyn_into()?;
        paint::draw(&ctx, &self.core.scene(), &self.core.camera, self.core.dpr)
    }

    // --- Delegated inputs ---

    pub fn set_tool(&mut self, tool: Option<Tool>) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    pub fn on_click(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_click(screen_pt)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_double_click(&mut self) -> Vec<Action> {
        self.core.on_double_click()
    }

    pub fn on_drag_end(&mut self, id: &str, to: Point, size: Option<(f64, f64)>) -> Vec<Action> {
        self.core.on_drag_end(id, to, size)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        self.core.pan(dx, dy)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.core.mode()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera
    }
}
