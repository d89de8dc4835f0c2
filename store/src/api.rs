//! Backend contract for the map-editor collections.
//!
//! DESIGN
//! ======
//! `FloorPlanStore` is the seam between the editor and the REST backend. Each
//! entity kind lives in its own collection under `/users/admin/map-editor/`.
//! Every response is wrapped in the envelope `{ success, message, data }`;
//! error bodies carry `{ message }`. Envelope handling is pure (status code
//! plus body text in, typed value out) so it is tested without a server.
//!
//! Paths and measurements are create-only. The other six kinds are only ever
//! repositioned through `update`.

use async_trait::async_trait;
use floor_canvas::doc::{Collection, Entity, EntityKind, Measurement, Path};
use floor_canvas::engine::{NewMeasurement, NewPath, PositionPatch};
use futures::future::join_all;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::StoreError;

/// Route prefix shared by every map-editor collection.
pub const MAP_EDITOR_ROUTE: &str = "/users/admin/map-editor";

// =============================================================================
// TRAIT
// =============================================================================

/// Remote collections for floor-plan entities.
#[async_trait]
pub trait FloorPlanStore: Send + Sync {
    /// List one kind's entities for a floor plan.
    async fn list(&self, floor_plan_id: &str, kind: EntityKind, is_active: bool) -> Result<Collection, StoreError>;

    /// Reposition (and for zones, resize) one entity.
    async fn update(&self, kind: EntityKind, id: &str, patch: &PositionPatch) -> Result<Entity, StoreError>;

    async fn create_path(&self, path: &NewPath) -> Result<Path, StoreError>;

    async fn create_measurement(&self, measurement: &NewMeasurement) -> Result<Measurement, StoreError>;
}

// =============================================================================
// ROUTES
// =============================================================================

/// `{base}/users/admin/map-editor/{collection}`
#[must_use]
pub fn collection_url(base_url: &str, kind: EntityKind) -> String {
    format!("{}{MAP_EDITOR_ROUTE}/{}", base_url.trim_end_matches('/'), kind.collection())
}

/// `{base}/users/admin/map-editor/{collection}/{id}`
#[must_use]
pub fn entity_url(base_url: &str, kind: EntityKind, id: &str) -> String {
    format!("{}/{id}", collection_url(base_url, kind))
}

// =============================================================================
// ENVELOPE
// =============================================================================

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn default_success() -> bool {
    true
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Pull the `message` out of an error body, if the body is JSON and has one.
fn error_message(body: &str) -> Option<String> {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => None,
    }
}

fn open_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, StoreError> {
    if !is_success(status) {
        return Err(StoreError::Rejected { status, message: error_message(body) });
    }
    let envelope: Envelope<T> = serde_json::from_str(body).map_err(|e| StoreError::Parse(e.to_string()))?;
    if !envelope.success {
        return Err(StoreError::Rejected { status, message: envelope.message });
    }
    Ok(envelope.data)
}

/// Parse an envelope whose `data` must be present.
///
/// # Errors
///
/// `Rejected` for a non-2xx status or `success: false`, `Parse` for a body
/// that does not match `T` or carries no `data`.
pub fn parse_data<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, StoreError> {
    open_envelope(status, body)?.ok_or_else(|| StoreError::Parse("response has no data".into()))
}

/// Parse a list response for `kind`. A missing `data` array is an empty list.
///
/// # Errors
///
/// See [`parse_data`].
pub fn parse_collection(kind: EntityKind, status: u16, body: &str) -> Result<Collection, StoreError> {
    fn list<T: DeserializeOwned>(status: u16, body: &str) -> Result<Vec<T>, StoreError> {
        Ok(open_envelope(status, body)?.unwrap_or_default())
    }
    Ok(match kind {
        EntityKind::Poi => Collection::Pois(list(status, body)?),
        EntityKind::Entrance => Collection::Entrances(list(status, body)?),
        EntityKind::Elevator => Collection::Elevators(list(status, body)?),
        EntityKind::Path => Collection::Paths(list(status, body)?),
        EntityKind::Zone => Collection::Zones(list(status, body)?),
        EntityKind::Label => Collection::Labels(list(status, body)?),
        EntityKind::Measurement => Collection::Measurements(list(status, body)?),
        EntityKind::Annotation => Collection::Annotations(list(status, body)?),
    })
}

/// Parse a single-entity response for `kind`.
///
/// # Errors
///
/// See [`parse_data`].
pub fn parse_entity(kind: EntityKind, status: u16, body: &str) -> Result<Entity, StoreError> {
    Ok(match kind {
        EntityKind::Poi => Entity::Poi(parse_data(status, body)?),
        EntityKind::Entrance => Entity::Entrance(parse_data(status, body)?),
        EntityKind::Elevator => Entity::Elevator(parse_data(status, body)?),
        EntityKind::Path => Entity::Path(parse_data(status, body)?),
        EntityKind::Zone => Entity::Zone(parse_data(status, body)?),
        EntityKind::Label => Entity::Label(parse_data(status, body)?),
        EntityKind::Measurement => Entity::Measurement(parse_data(status, body)?),
        EntityKind::Annotation => Entity::Annotation(parse_data(status, body)?),
    })
}

// =============================================================================
// FLOOR PLAN FETCH
// =============================================================================

/// Result of loading every collection for one floor plan.
#[derive(Debug, Default)]
pub struct FloorPlanFetch {
    /// Collections that loaded, in [`EntityKind::ALL`] order.
    pub collections: Vec<Collection>,
    /// Kinds whose request failed. The other collections are still usable.
    pub failed: Vec<(EntityKind, StoreError)>,
}

/// Load all eight active collections of a floor plan concurrently.
///
/// Without a floor plan no request is made and nothing is returned.
pub async fn fetch_floor_plan<S: FloorPlanStore + ?Sized>(store: &S, floor_plan_id: Option<&str>) -> FloorPlanFetch {
    let Some(floor_plan_id) = floor_plan_id else {
        debug!("no floor plan selected; skipping collection fetch");
        return FloorPlanFetch::default();
    };

    let results = join_all(EntityKind::ALL.map(|kind| async move { (kind, store.list(floor_plan_id, kind, true).await) })).await;

    let mut fetch = FloorPlanFetch::default();
    for (kind, result) in results {
        match result {
            Ok(collection) => fetch.collections.push(collection),
            Err(e) => {
                warn!(error = %e, collection = kind.collection(), %floor_plan_id, "collection fetch failed");
                fetch.failed.push((kind, e));
            }
        }
    }
    fetch
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
