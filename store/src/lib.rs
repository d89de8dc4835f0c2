//! Remote store client for the floor-plan editor.
//!
//! [`api::FloorPlanStore`] is the async contract for the map-editor backend,
//! [`http::HttpStore`] implements it over `reqwest`, and
//! [`sync::Synchronizer`] turns editor mutations into requests and notices.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod sync;

pub use api::{FloorPlanFetch, FloorPlanStore, fetch_floor_plan};
pub use config::{StoreConfig, StoreTimeouts};
pub use error::StoreError;
pub use http::HttpStore;
pub use sync::{SyncOutcome, Synchronizer};
