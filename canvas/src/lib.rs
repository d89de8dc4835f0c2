//! Floor-plan editor canvas: element model, drafting state machine, history,
//! scene building and painting.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but all of
//! its logic lives in [`engine::EngineCore`], which is plain Rust and fully
//! testable. The host is responsible for wiring DOM events to the engine and
//! for carrying the resulting [`engine::Action`]s to the remote store.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Remote-backed entity records and the per-floor-plan document |
//! | [`local`] | Local element list covered by undo/redo |
//! | [`input`] | Tools and the drafting state machine |
//! | [`history`] | Linear snapshot history |
//! | [`config`] | Editor configuration and its update messages |
//! | [`snap`] | Grid snapping |
//! | [`camera`] | Zoom/pan camera and coordinate conversions |
//! | [`render`] | Display-list scene building |
//! | [`paint`] | Canvas2D painter for a scene |
//! | [`search`] | Quick-find index |
//! | [`style`] | Colour and sizing helpers |
//! | [`consts`] | Shared numeric constants (thresholds, zoom limits, card sizes) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod history;
pub mod input;
pub mod local;
pub mod paint;
pub mod render;
pub mod search;
pub mod snap;
pub mod style;
