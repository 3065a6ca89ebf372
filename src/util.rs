//! Utility functions for colors, geometry, and arrowhead calculations.
//!
//! This module provides:
//! - Canvas-space points and floating-point bounds used by tools and hit-testing
//! - Integer rectangles for dirty region tracking
//! - Arrowhead and ellipse geometry
//! - Color name mapping for configuration files

use crate::draw::{Color, color::*};

// ============================================================================
// Points and Bounds
// ============================================================================

/// A point in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Returns this point moved by `distance` along `angle` (radians).
    pub fn offset_polar(self, angle: f64, distance: f64) -> Point {
        Point::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }

    /// Angle (radians) of the vector from `self` to `other`.
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned floating-point rectangle used for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    /// Smallest rectangle containing every point. Returns `None` for an empty slice.
    pub fn around(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in &points[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        Some(Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Integer rectangle covering these bounds (floor of min, ceil of max).
    pub fn to_rect(&self) -> Option<Rect> {
        let min_x = self.min_x().floor() as i32;
        let min_y = self.min_y().floor() as i32;
        let mut max_x = self.max_x().ceil() as i32;
        let mut max_y = self.max_y().ceil() as i32;
        if max_x == min_x {
            max_x += 1;
        }
        if max_y == min_y {
            max_y += 1;
        }
        Rect::from_min_max(min_x, min_y, max_x, max_y)
    }
}

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Angle between the shaft and each arrowhead barb (135°).
pub const ARROWHEAD_SPREAD: f64 = 6.0 * std::f64::consts::PI / 8.0;

/// Calculates the arrowhead polyline at the `last` end of a line.
///
/// The barbs are `4 × width` long and leave the shaft at ±135° from its
/// direction; the tip sits one stroke width beyond `last` so the square line
/// cap does not poke through the point.
///
/// # Returns
/// `[left_barb, tip, right_barb]`, to be stroked as a single polyline.
pub fn arrowhead(first: Point, last: Point, width: f64) -> [Point; 3] {
    let barb_length = width * 4.0;
    let angle = first.angle_to(last);

    let left = last.offset_polar(angle + ARROWHEAD_SPREAD, barb_length);
    let right = last.offset_polar(angle - ARROWHEAD_SPREAD, barb_length);
    let tip = last.offset_polar(angle, width);

    [left, tip, right]
}

/// Calculates ellipse parameters from two corner points.
///
/// Converts a drag rectangle (from corner to corner) into ellipse parameters
/// (center point and radii).
///
/// # Returns
/// Tuple `(cx, cy, rx, ry)` where `rx` and `ry` are non-negative.
pub fn ellipse_bounds(first: Point, last: Point) -> (f64, f64, f64, f64) {
    let cx = (first.x + last.x) / 2.0;
    let cy = (first.y + last.y) / 2.0;
    let rx = (last.x - first.x).abs() / 2.0;
    let ry = (last.y - first.y).abs() / 2.0;
    (cx, cy, rx, ry)
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and stroke scripts to parse color names.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Maps a Color value to its human-readable name, or "Custom".
///
/// Uses approximate matching (±25 per channel) so slightly-off colors still
/// get a name in log output.
pub fn color_to_name(color: &Color) -> &'static str {
    let near = |value: u8, target: u8| value.abs_diff(target) <= 25;
    let is = |r, g, b| near(color.r, r) && near(color.g, g) && near(color.b, b);

    if is(255, 0, 0) {
        "Red"
    } else if is(0, 255, 0) {
        "Green"
    } else if is(0, 0, 255) {
        "Blue"
    } else if is(255, 255, 0) {
        "Yellow"
    } else if is(255, 128, 0) {
        "Orange"
    } else if is(255, 0, 255) {
        "Pink"
    } else if is(255, 255, 255) {
        "White"
    } else if is(0, 0, 0) {
        "Black"
    } else {
        "Custom"
    }
}

// ============================================================================
// Integer Rectangles
// ============================================================================

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
