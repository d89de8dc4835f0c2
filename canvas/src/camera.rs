#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_MAX_PERCENT, ZOOM_MIN_PERCENT, ZOOM_STEP_PERCENT};

/// A point in floor-plan pixel space (or host screen space before conversion).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Camera state for the editor stage.
///
/// `pan_x` / `pan_y` are in CSS pixels. Zoom is held as an integer percent
/// so toolbar steps stay exact; `zoom()` returns the scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom_percent: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom_percent: 100 }
    }
}

impl Camera {
    /// Scale factor (1.0 = 100%).
    #[must_use]
    pub fn zoom(&self) -> f64 {
        f64::from(self.zoom_percent) / 100.0
    }

    /// Step the zoom up, saturating at the maximum.
    pub fn zoom_in(&mut self) {
        self.zoom_percent = (self.zoom_percent + ZOOM_STEP_PERCENT).min(ZOOM_MAX_PERCENT);
    }

    /// Step the zoom down, saturating at the minimum.
    pub fn zoom_out(&mut self) {
        self.zoom_percent = self.zoom_percent.saturating_sub(ZOOM_STEP_PERCENT).max(ZOOM_MIN_PERCENT);
    }

    /// Back to 100% with no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Convert a screen-space point (CSS pixels) to floor-plan coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        let zoom = self.zoom();
        Point {
            x: (screen.x - self.pan_x) / zoom,
            y: (screen.y - self.pan_y) / zoom,
        }
    }
}
