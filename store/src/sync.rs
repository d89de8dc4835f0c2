//! Mutation synchronizer: sends editor mutations to the backend and turns the
//! result into a user notice.
//!
//! Updates are optimistic. The editor has already moved the entity when the
//! mutation arrives here, and a failed request leaves it where it was
//! dropped. Acknowledged entities come back in [`SyncOutcome::entity`] so the
//! host can upsert them into the document.

use floor_canvas::doc::{Entity, EntityKind};
use floor_canvas::engine::{Mutation, Notice};
use tracing::{info, warn};

use crate::api::FloorPlanStore;
use crate::error::StoreError;

/// What the host should show and reconcile after a mutation settles.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    pub notice: Notice,
    /// The backend's copy of the entity, on success.
    pub entity: Option<Entity>,
}

impl SyncOutcome {
    fn acknowledged(message: &str, entity: Entity) -> Self {
        Self { notice: Notice::success(message), entity: Some(entity) }
    }

    fn failed(fallback: &str, error: &StoreError) -> Self {
        let message = error.server_message().unwrap_or(fallback);
        Self { notice: Notice::error(message), entity: None }
    }
}

/// `(success, failure fallback)` notices for a position update.
fn update_notices(kind: EntityKind) -> Option<(&'static str, &'static str)> {
    match kind {
        EntityKind::Poi => Some(("POI position updated", "Failed to update POI position")),
        EntityKind::Entrance => Some(("Entrance position updated", "Failed to update entrance position")),
        EntityKind::Elevator => Some(("Elevator position updated", "Failed to update elevator position")),
        EntityKind::Zone => Some(("Restricted zone updated", "Failed to update restricted zone")),
        EntityKind::Label => Some(("Label position updated", "Failed to update label position")),
        EntityKind::Annotation => Some(("Annotation position updated", "Failed to update annotation position")),
        EntityKind::Path | EntityKind::Measurement => None,
    }
}

pub const PATH_CREATED: &str = "Path created successfully";
pub const PATH_FAILED: &str = "Failed to create path";
pub const MEASUREMENT_CREATED: &str = "Measurement created";
pub const MEASUREMENT_FAILED: &str = "Failed to create measurement";

pub struct Synchronizer<S> {
    store: S,
}

impl<S: FloorPlanStore> Synchronizer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Send one mutation. Never fails; errors become error notices.
    pub async fn dispatch(&self, mutation: &Mutation) -> SyncOutcome {
        match mutation {
            Mutation::UpdatePosition { kind, id, patch } => {
                let Some((ok, fallback)) = update_notices(*kind) else {
                    warn!(collection = kind.collection(), %id, "position update for a create-only kind");
                    return SyncOutcome {
                        notice: Notice::error(format!("{} cannot be repositioned", kind.type_label())),
                        entity: None,
                    };
                };
                match self.store.update(*kind, id, patch).await {
                    Ok(entity) => {
                        info!(collection = kind.collection(), %id, "position update acknowledged");
                        SyncOutcome::acknowledged(ok, entity)
                    }
                    Err(e) => {
                        warn!(error = %e, retryable = e.retryable(), collection = kind.collection(), %id, "position update failed");
                        SyncOutcome::failed(fallback, &e)
                    }
                }
            }
            Mutation::CreatePath { path } => match self.store.create_path(path).await {
                Ok(created) => {
                    info!(id = %created.id, points = created.points.len(), "path created");
                    SyncOutcome::acknowledged(PATH_CREATED, Entity::Path(created))
                }
                Err(e) => {
                    warn!(error = %e, retryable = e.retryable(), "path create failed");
                    SyncOutcome::failed(PATH_FAILED, &e)
                }
            },
            Mutation::CreateMeasurement { measurement } => match self.store.create_measurement(measurement).await {
                Ok(created) => {
                    info!(id = %created.id, distance = created.distance, "measurement created");
                    SyncOutcome::acknowledged(MEASUREMENT_CREATED, Entity::Measurement(created))
                }
                Err(e) => {
                    warn!(error = %e, retryable = e.retryable(), "measurement create failed");
                    SyncOutcome::failed(MEASUREMENT_FAILED, &e)
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
