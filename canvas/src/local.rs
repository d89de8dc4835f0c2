//! Local element list: shapes held only in memory, never synced.
//!
//! These are the editor's own scratch elements. Unlike the remote-backed
//! collections in [`crate::doc`], every change to this list goes through the
//! undo/redo history.

#[cfg(test)]
#[path = "local_test.rs"]
mod local_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;

/// Shape-specific data for a local element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LocalShape {
    Zone {
        width: f64,
        height: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Poi {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Entrance {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Elevator {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Polyline with points relative to the element origin.
    Path {
        points: Vec<Point>,
        #[serde(default = "default_path_stroke", rename = "strokeWidth")]
        stroke_width: f64,
        #[serde(default = "default_tension")]
        tension: f64,
    },
    Label {
        text: String,
    },
    Annotation {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

fn default_path_stroke() -> f64 {
    3.0
}

fn default_tension() -> f64 {
    0.5
}

fn default_draggable() -> bool {
    true
}

/// An element in the local list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalElement {
    #[serde(default)]
    pub id: String,
    /// Origin: centre for cards, top-left for zones and labels.
    pub at: Point,
    pub color: String,
    #[serde(default = "default_draggable")]
    pub draggable: bool,
    #[serde(flatten)]
    pub shape: LocalShape,
}

impl LocalElement {
    /// Build an element with a fresh id.
    #[must_use]
    pub fn new(at: Point, color: impl Into<String>, shape: LocalShape) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            at,
            color: color.into(),
            draggable: true,
            shape,
        }
    }

    /// Give the element a fresh id if the host left it blank.
    pub fn ensure_id(&mut self) {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
    }
}

/// Move the element with `id` to `to`. Returns the updated list, or `None`
/// if no element has that id or the element is not draggable.
#[must_use]
pub fn moved(elements: &[LocalElement], id: &str, to: Point) -> Option<Vec<LocalElement>> {
    if !elements.iter().any(|el| el.id == id && el.draggable) {
        return None;
    }
    Some(
        elements
            .iter()
            .map(|el| {
                if el.id == id {
                    LocalElement { at: to, ..el.clone() }
                } else {
                    el.clone()
                }
            })
            .collect(),
    )
}
