//! Pure coordinate helpers shared by the icon layout engine and pointer controller.

use serde::{Deserialize, Serialize};

/// Raw, possibly sub-pixel, desktop coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Measured extent of a container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Pointer client coordinates as reported by DOM pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// Clamps `value` into `[min, max]`. When `max < min`, `min` wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Snaps `value` to the nearest multiple of `step`.
///
/// A non-positive step leaves the value untouched.
pub fn snap_to_grid(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

/// Clamps a point into the region `[0, max.width] x [0, max.height]`.
pub fn clamp_point(point: Point, max: Size) -> Point {
    Point {
        x: clamp(point.x, 0.0, max.width),
        y: clamp(point.y, 0.0, max.height),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clamp_prefers_min_for_inverted_ranges() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(42.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(42.0, 0.0, -10.0), 0.0);
    }

    #[test]
    fn snap_rounds_to_nearest_step() {
        assert_eq!(snap_to_grid(16.0, 8.0), 16.0);
        assert_eq!(snap_to_grid(19.9, 8.0), 16.0);
        assert_eq!(snap_to_grid(20.0, 8.0), 24.0);
        assert_eq!(snap_to_grid(-5.0, 8.0), -8.0);
        assert_eq!(snap_to_grid(13.3, 0.0), 13.3);
    }

    #[test]
    fn clamp_point_bounds_both_axes() {
        let clamped = clamp_point(Point::new(-12.0, 900.0), Size::new(416.0, 404.0));
        assert_eq!(clamped, Point::new(0.0, 404.0));
    }
}
