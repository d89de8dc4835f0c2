//! Input model: tools and the drafting state machine.
//!
//! `Tool` is the host's current tool selection. `InputState` is the draft
//! being built between clicks; at most one draft exists at a time, and its
//! variant carries every point needed to commit it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::ZoneRect;

/// Which tool is currently active. `None` at the host means no tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Place a point of interest.
    Poi,
    /// Place an entrance.
    Entrance,
    /// Place an elevator.
    Elevator,
    /// Place a label.
    Label,
    /// Place an annotation pin.
    Annotation,
    /// Draw a multi-point path.
    Path,
    /// Drag out a restricted zone.
    Restricted,
    /// Measure a distance between two clicks.
    Measure,
}

impl Tool {
    /// Parse a host tool name. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "poi" => Some(Self::Poi),
            "entrance" => Some(Self::Entrance),
            "elevator" => Some(Self::Elevator),
            "label" => Some(Self::Label),
            "annotation" => Some(Self::Annotation),
            "path" => Some(Self::Path),
            "restricted" => Some(Self::Restricted),
            "measure" => Some(Self::Measure),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Poi => "poi",
            Self::Entrance => "entrance",
            Self::Elevator => "elevator",
            Self::Label => "label",
            Self::Annotation => "annotation",
            Self::Path => "path",
            Self::Restricted => "restricted",
            Self::Measure => "measure",
        }
    }

    /// Whether a click with this tool just emits a coordinate to the host.
    #[must_use]
    pub fn places_point(self) -> bool {
        matches!(self, Self::Poi | Self::Entrance | Self::Elevator | Self::Label | Self::Annotation)
    }
}

/// Externally visible interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Idle,
    PlacingPoint,
    DrawingPath,
    DrawingZone,
    Measuring,
}

/// The draft in progress, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No draft; waiting for the next click.
    #[default]
    Idle,
    /// Building a path one click at a time.
    DrawingPath {
        /// Snapped vertices in click order.
        points: Vec<Point>,
    },
    /// Dragging out a zone rectangle.
    DrawingZone {
        /// Corner recorded on the first click.
        start: Point,
        /// Corner following the pointer.
        current: Point,
    },
    /// Between the two clicks of a measurement.
    Measuring {
        start: Point,
        /// Follows the pointer until the second click.
        end: Point,
    },
}

impl InputState {
    /// The tool that owns this draft, if any.
    #[must_use]
    pub fn owner(&self) -> Option<Tool> {
        match self {
            Self::Idle => None,
            Self::DrawingPath { .. } => Some(Tool::Path),
            Self::DrawingZone { .. } => Some(Tool::Restricted),
            Self::Measuring { .. } => Some(Tool::Measure),
        }
    }

    /// Rectangle spanned by the zone draft.
    #[must_use]
    pub fn zone_rect(&self) -> Option<ZoneRect> {
        match self {
            Self::DrawingZone { start, current } => Some(ZoneRect::from_corners(*start, *current)),
            _ => None,
        }
    }

    /// Live distance of the measurement draft.
    #[must_use]
    pub fn measured_distance(&self) -> Option<f64> {
        match self {
            Self::Measuring { start, end } => Some(start.distance_to(*end)),
            _ => None,
        }
    }
}
