//! Grid snapping.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::camera::Point;

/// Round `p` to the nearest grid intersection, each axis independently.
///
/// Identity when `enabled` is false or `grid_size` is not a positive finite
/// number. Idempotent: `snap_point(snap_point(p)) == snap_point(p)`.
#[must_use]
pub fn snap_point(p: Point, grid_size: f64, enabled: bool) -> Point {
    if !enabled || !grid_size.is_finite() || grid_size <= 0.0 {
        return p;
    }
    Point::new(snap_axis(p.x, grid_size), snap_axis(p.y, grid_size))
}

fn snap_axis(v: f64, grid_size: f64) -> f64 {
    (v / grid_size).round() * grid_size
}
