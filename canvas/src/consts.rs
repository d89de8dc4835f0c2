//! Shared numeric constants for the canvas crate.

// ── Drafting ────────────────────────────────────────────────────

/// A drawn zone must exceed this width and height (pixels) to be committed.
pub const MIN_ZONE_SIDE: f64 = 10.0;

/// Measurements shorter than this (pixels) are rejected.
pub const MIN_MEASURE_DISTANCE: f64 = 5.0;

/// Minimum number of points in a committed path.
pub const MIN_PATH_POINTS: usize = 2;

/// Colour of newly drawn paths and measurements.
pub const DRAFT_COLOR: &str = "#2563EB";

/// Stroke width of newly drawn paths.
pub const PATH_STROKE_WIDTH: f64 = 3.0;

/// Stroke width of newly drawn measurements.
pub const MEASURE_STROKE_WIDTH: f64 = 2.0;

/// Unit label attached to new measurements.
pub const MEASURE_UNIT: &str = "meters";

// ── Camera ──────────────────────────────────────────────────────

/// Zoom limits and step, in percent.
pub const ZOOM_MIN_PERCENT: u32 = 50;
pub const ZOOM_MAX_PERCENT: u32 = 200;
pub const ZOOM_STEP_PERCENT: u32 = 10;

// ── Grid ────────────────────────────────────────────────────────

/// Grid spacing used when the host supplies none.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

// ── Cards ───────────────────────────────────────────────────────

/// Height of the POI / entrance / elevator card.
pub const CARD_HEIGHT: f64 = 60.0;

/// Floor for the card width so short labels still get a usable box.
pub const CARD_MIN_WIDTH: f64 = 120.0;

/// Approximate advance per label character at the card font size.
pub const CARD_CHAR_WIDTH: f64 = 8.0;

/// Horizontal padding added around the label text.
pub const CARD_PADDING: f64 = 40.0;

/// Radius of draft vertex and measurement end markers.
pub const MARKER_RADIUS: f64 = 4.0;
