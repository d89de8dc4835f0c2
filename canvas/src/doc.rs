//! Document model: floor-plan entities and the in-memory collections that
//! mirror the remote store.
//!
//! Each entity kind has its own record type matching the backend's JSON
//! shape. `Entity` and `Collection` are tagged sum types over those records so
//! every consumer (renderer, search index, synchronizer) matches exhaustively
//! on the kind. `FloorPlanDoc` owns the eight collections for the active
//! floor plan, in server order.
//!
//! Data flows into this layer from the network (list and mutation
//! responses) and from the engine (optimistic drag positions). The renderer
//! and search index only read from it.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Identifier of an entity, unique within its own collection only.
pub type EntityId = String;

/// Identifier of a floor plan.
pub type FloorPlanId = String;

/// The kind of a floor-plan entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Poi,
    Entrance,
    Elevator,
    Path,
    Zone,
    Label,
    Measurement,
    Annotation,
}

impl EntityKind {
    /// Every kind, in search-list order.
    pub const ALL: [EntityKind; 8] = [
        Self::Poi,
        Self::Entrance,
        Self::Elevator,
        Self::Path,
        Self::Zone,
        Self::Label,
        Self::Measurement,
        Self::Annotation,
    ];

    /// Human-readable type label shown in the quick-find list.
    #[must_use]
    pub fn type_label(self) -> &'static str {
        match self {
            Self::Poi => "POI",
            Self::Entrance => "Entrance",
            Self::Elevator => "Elevator",
            Self::Path => "Path",
            Self::Zone => "Restricted Zone",
            Self::Label => "Label",
            Self::Measurement => "Measurement",
            Self::Annotation => "Annotation",
        }
    }

    /// URL segment of the remote collection that owns this kind.
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            Self::Poi => "pois",
            Self::Entrance => "entrances",
            Self::Elevator => "elevators",
            Self::Path => "paths",
            Self::Zone => "restricted-zones",
            Self::Label => "labels",
            Self::Measurement => "measurements",
            Self::Annotation => "annotations",
        }
    }

    /// Whether entities of this kind can be repositioned by dragging.
    /// Paths and measurements are create-only.
    #[must_use]
    pub fn is_draggable(self) -> bool {
        !matches!(self, Self::Path | Self::Measurement)
    }
}

fn default_true() -> bool {
    true
}

/// Point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poi {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub floor_plan_id: FloorPlanId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub coordinates: Point,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Building entrance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entrance {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub floor_plan_id: FloorPlanId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub coordinates: Point,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Elevator shaft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elevator {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub floor_plan_id: FloorPlanId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub coordinates: Point,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Walkable path. Point order is fixed once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub floor_plan_id: FloorPlanId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Axis-aligned rectangle in floor-plan pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ZoneRect {
    /// Normalized rectangle spanned by two corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }
}

/// Restricted zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub floor_plan_id: FloorPlanId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub coordinates: ZoneRect,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Free-text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub floor_plan_id: FloorPlanId,
    #[serde(default)]
    pub text: String,
    /// CSS-style size such as `"16px"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    /// `"Bold"` or `"Normal"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub coordinates: Point,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Distance measurement between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub floor_plan_id: FloorPlanId,
    pub start_point: Point,
    pub end_point: Point,
    pub distance: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Informational annotation pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub floor_plan_id: FloorPlanId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub coordinates: Point,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A single entity of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entity {
    Poi(Poi),
    Entrance(Entrance),
    Elevator(Elevator),
    Path(Path),
    Zone(Zone),
    Label(Label),
    Measurement(Measurement),
    Annotation(Annotation),
}

impl Entity {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Poi(_) => EntityKind::Poi,
            Self::Entrance(_) => EntityKind::Entrance,
            Self::Elevator(_) => EntityKind::Elevator,
            Self::Path(_) => EntityKind::Path,
            Self::Zone(_) => EntityKind::Zone,
            Self::Label(_) => EntityKind::Label,
            Self::Measurement(_) => EntityKind::Measurement,
            Self::Annotation(_) => EntityKind::Annotation,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Poi(e) => &e.id,
            Self::Entrance(e) => &e.id,
            Self::Elevator(e) => &e.id,
            Self::Path(e) => &e.id,
            Self::Zone(e) => &e.id,
            Self::Label(e) => &e.id,
            Self::Measurement(e) => &e.id,
            Self::Annotation(e) => &e.id,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Poi(e) => e.is_active,
            Self::Entrance(e) => e.is_active,
            Self::Elevator(e) => e.is_active,
            Self::Path(e) => e.is_active,
            Self::Zone(e) => e.is_active,
            Self::Label(e) => e.is_active,
            Self::Measurement(e) => e.is_active,
            Self::Annotation(e) => e.is_active,
        }
    }
}

/// A full list payload for one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    Pois(Vec<Poi>),
    Entrances(Vec<Entrance>),
    Elevators(Vec<Elevator>),
    Paths(Vec<Path>),
    Zones(Vec<Zone>),
    Labels(Vec<Label>),
    Measurements(Vec<Measurement>),
    Annotations(Vec<Annotation>),
}

impl Collection {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Pois(_) => EntityKind::Poi,
            Self::Entrances(_) => EntityKind::Entrance,
            Self::Elevators(_) => EntityKind::Elevator,
            Self::Paths(_) => EntityKind::Path,
            Self::Zones(_) => EntityKind::Zone,
            Self::Labels(_) => EntityKind::Label,
            Self::Measurements(_) => EntityKind::Measurement,
            Self::Annotations(_) => EntityKind::Annotation,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Pois(v) => v.len(),
            Self::Entrances(v) => v.len(),
            Self::Elevators(v) => v.len(),
            Self::Paths(v) => v.len(),
            Self::Zones(v) => v.len(),
            Self::Labels(v) => v.len(),
            Self::Measurements(v) => v.len(),
            Self::Annotations(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Records anchored at a single coordinate.
trait Anchored {
    fn id(&self) -> &str;
    fn anchor_mut(&mut self) -> &mut Point;
}

impl Anchored for Poi {
    fn id(&self) -> &str {
        &self.id
    }
    fn anchor_mut(&mut self) -> &mut Point {
        &mut self.coordinates
    }
}

impl Anchored for Entrance {
    fn id(&self) -> &str {
        &self.id
    }
    fn anchor_mut(&mut self) -> &mut Point {
        &mut self.coordinates
    }
}

impl Anchored for Elevator {
    fn id(&self) -> &str {
        &self.id
    }
    fn anchor_mut(&mut self) -> &mut Point {
        &mut self.coordinates
    }
}

impl Anchored for Label {
    fn id(&self) -> &str {
        &self.id
    }
    fn anchor_mut(&mut self) -> &mut Point {
        &mut self.coordinates
    }
}

impl Anchored for Annotation {
    fn id(&self) -> &str {
        &self.id
    }
    fn anchor_mut(&mut self) -> &mut Point {
        &mut self.coordinates
    }
}

fn move_anchored<T: Anchored>(items: &mut [T], id: &str, to: Point) -> bool {
    let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
        return false;
    };
    *item.anchor_mut() = to;
    true
}

fn upsert_by_id<T>(items: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> &str) {
    let id = id_of(&item).to_owned();
    match items.iter().position(|existing| id_of(existing) == id.as_str()) {
        Some(pos) => items[pos] = item,
        None => items.push(item),
    }
}

/// The remote-backed collections for one floor plan.
#[derive(Debug, Clone, Default)]
pub struct FloorPlanDoc {
    floor_plan_id: Option<FloorPlanId>,
    pois: Vec<Poi>,
    entrances: Vec<Entrance>,
    elevators: Vec<Elevator>,
    paths: Vec<Path>,
    zones: Vec<Zone>,
    labels: Vec<Label>,
    measurements: Vec<Measurement>,
    annotations: Vec<Annotation>,
}

impl FloorPlanDoc {
    /// Create an empty document with no floor plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The floor plan all collections are scoped to, if one is set.
    #[must_use]
    pub fn floor_plan_id(&self) -> Option<&str> {
        self.floor_plan_id.as_deref()
    }

    /// Switch floor plans. Collections are dropped when the id changes.
    /// Returns `true` if the id changed.
    pub fn set_floor_plan(&mut self, floor_plan_id: Option<FloorPlanId>) -> bool {
        if self.floor_plan_id == floor_plan_id {
            return false;
        }
        *self = Self { floor_plan_id, ..Self::default() };
        true
    }

    /// Replace one kind's collection with a fresh server list.
    pub fn load(&mut self, collection: Collection) {
        match collection {
            Collection::Pois(v) => self.pois = v,
            Collection::Entrances(v) => self.entrances = v,
            Collection::Elevators(v) => self.elevators = v,
            Collection::Paths(v) => self.paths = v,
            Collection::Zones(v) => self.zones = v,
            Collection::Labels(v) => self.labels = v,
            Collection::Measurements(v) => self.measurements = v,
            Collection::Annotations(v) => self.annotations = v,
        }
    }

    /// Insert or replace an entity acknowledged by the server.
    pub fn upsert(&mut self, entity: Entity) {
        match entity {
            Entity::Poi(e) => upsert_by_id(&mut self.pois, e, |e| e.id.as_str()),
            Entity::Entrance(e) => upsert_by_id(&mut self.entrances, e, |e| e.id.as_str()),
            Entity::Elevator(e) => upsert_by_id(&mut self.elevators, e, |e| e.id.as_str()),
            Entity::Path(e) => upsert_by_id(&mut self.paths, e, |e| e.id.as_str()),
            Entity::Zone(e) => upsert_by_id(&mut self.zones, e, |e| e.id.as_str()),
            Entity::Label(e) => upsert_by_id(&mut self.labels, e, |e| e.id.as_str()),
            Entity::Measurement(e) => upsert_by_id(&mut self.measurements, e, |e| e.id.as_str()),
            Entity::Annotation(e) => upsert_by_id(&mut self.annotations, e, |e| e.id.as_str()),
        }
    }

    /// Find which draggable collection owns `id`.
    ///
    /// Checked in the order poi, entrance, elevator, zone, label, annotation;
    /// ids are only unique per collection, so the first match wins.
    #[must_use]
    pub fn resolve_draggable(&self, id: &str) -> Option<EntityKind> {
        if self.pois.iter().any(|e| e.id == id) {
            Some(EntityKind::Poi)
        } else if self.entrances.iter().any(|e| e.id == id) {
            Some(EntityKind::Entrance)
        } else if self.elevators.iter().any(|e| e.id == id) {
            Some(EntityKind::Elevator)
        } else if self.zones.iter().any(|e| e.id == id) {
            Some(EntityKind::Zone)
        } else if self.labels.iter().any(|e| e.id == id) {
            Some(EntityKind::Label)
        } else if self.annotations.iter().any(|e| e.id == id) {
            Some(EntityKind::Annotation)
        } else {
            None
        }
    }

    /// Apply a new position (and, for zones, size) to an entity in place.
    /// Returns `false` if the entity is not present or not draggable.
    pub fn move_entity(&mut self, kind: EntityKind, id: &str, to: Point, size: Option<(f64, f64)>) -> bool {
        match kind {
            EntityKind::Poi => move_anchored(&mut self.pois, id, to),
            EntityKind::Entrance => move_anchored(&mut self.entrances, id, to),
            EntityKind::Elevator => move_anchored(&mut self.elevators, id, to),
            EntityKind::Label => move_anchored(&mut self.labels, id, to),
            EntityKind::Annotation => move_anchored(&mut self.annotations, id, to),
            EntityKind::Zone => {
                let Some(zone) = self.zones.iter_mut().find(|z| z.id == id) else {
                    return false;
                };
                zone.coordinates.x = to.x;
                zone.coordinates.y = to.y;
                if let Some((width, height)) = size {
                    zone.coordinates.width = width;
                    zone.coordinates.height = height;
                }
                true
            }
            EntityKind::Path | EntityKind::Measurement => false,
        }
    }

    /// Look up a zone by id.
    #[must_use]
    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    #[must_use]
    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    #[must_use]
    pub fn entrances(&self) -> &[Entrance] {
        &self.entrances
    }

    #[must_use]
    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Total number of loaded entities across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pois.len()
            + self.entrances.len()
            + self.elevators.len()
            + self.paths.len()
            + self.zones.len()
            + self.labels.len()
            + self.measurements.len()
            + self.annotations.len()
    }

    /// Number of loaded entities still flagged active.
    #[must_use]
    pub fn len_active(&self) -> usize {
        self.pois.iter().filter(|e| e.is_active).count()
            + self.entrances.iter().filter(|e| e.is_active).count()
            + self.elevators.iter().filter(|e| e.is_active).count()
            + self.paths.iter().filter(|e| e.is_active).count()
            + self.zones.iter().filter(|e| e.is_active).count()
            + self.labels.iter().filter(|e| e.is_active).count()
            + self.measurements.iter().filter(|e| e.is_active).count()
            + self.annotations.iter().filter(|e| e.is_active).count()
    }

    /// Returns `true` if no entities are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
