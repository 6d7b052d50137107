//! Geometric primitives for diagram reconstruction.
//!
//! This module provides the fundamental geometric types used throughout Arbor
//! to describe where a detected shape sits on the canvas and how large it is.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Arbor uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward (positive to the right)
//! - **Y-axis**: Increases downward (positive downward)

use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};

/// A 2D point representing a position in canvas coordinate space.
///
/// Points use `f32` coordinates and provide operations for basic vector math.
///
/// # Examples
///
/// ```
/// # use arbor_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(13.0, 24.0);
///
/// assert_eq!(p1.distance(p2), 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 23.0);
/// assert_eq!(sum.y(), 44.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Rounds both coordinates to the nearest integer, halves rounding up.
    ///
    /// Halves round towards positive infinity (`-2.5` becomes `-2.0`), which
    /// matches how browsers round layout coordinates.
    pub fn round(self) -> Self {
        Self {
            x: round_half_up(self.x),
            y: round_half_up(self.y),
        }
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Rounds to the nearest integer with halves going towards positive infinity.
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
///
/// Serializes by its edges, extent and center (`left`, `top`, `right`,
/// `bottom`, `width`, `height`, `center_x`, `center_y`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate (left edge) of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate (top edge) of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate (right edge) of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate (bottom edge) of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Moves the bounds by the specified offset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arbor_core::geometry::{Bounds, Point, Size};
    /// let rect = Bounds::new_from_top_left(Point::new(-10.0, -8.0), Size::new(50.0, 16.0));
    /// let placed = rect.translate(Point::new(100.0, 40.0));
    /// assert_eq!(placed.min_x(), 90.0);
    /// assert_eq!(placed.min_y(), 32.0);
    /// assert_eq!(placed.width(), 50.0);
    /// ```
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }
}

impl Serialize for Bounds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let center = self.center();
        let mut state = serializer.serialize_struct("Bounds", 8)?;
        state.serialize_field("left", &self.min_x)?;
        state.serialize_field("top", &self.min_y)?;
        state.serialize_field("right", &self.max_x)?;
        state.serialize_field("bottom", &self.max_y)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.serialize_field("center_x", &center.x)?;
        state.serialize_field("center_y", &center.y)?;
        state.end()
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (0.0f32..1000.0, 0.0f32..1000.0).prop_map(|(w, h)| Size::new(w, h))
    }

    /// Distance is symmetric and never negative.
    fn check_distance_is_symmetric(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let d1 = p1.distance(p2);
        let d2 = p2.distance(p1);

        prop_assert!(d1 >= 0.0);
        prop_assert!(approx_eq!(f32, d1, d2));
        Ok(())
    }

    /// Bounds built around a center report that same center back.
    fn check_center_roundtrip(center: Point, size: Size) -> Result<(), TestCaseError> {
        let bounds = Bounds::new_from_center(center, size);

        prop_assert!(approx_eq!(f32, bounds.center().x(), center.x(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, bounds.center().y(), center.y(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, bounds.width(), size.width(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, bounds.height(), size.height(), epsilon = 0.01));
        Ok(())
    }

    /// Rounding is idempotent.
    fn check_round_is_idempotent(p: Point) -> Result<(), TestCaseError> {
        let once = p.round();
        prop_assert_eq!(once, once.round());
        Ok(())
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(p1 in point_strategy(), p2 in point_strategy()) {
            check_distance_is_symmetric(p1, p2)?;
        }

        #[test]
        fn center_roundtrip(center in point_strategy(), size in size_strategy()) {
            check_center_roundtrip(center, size)?;
        }

        #[test]
        fn round_is_idempotent(p in point_strategy()) {
            check_round_is_idempotent(p)?;
        }
    }
}
