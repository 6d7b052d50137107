//! Diagram orientation.
//!
//! Hierarchy depth is encoded visually along one axis of the canvas. The
//! [`Orientation`] selects that *primary* axis, and with it the complementary
//! *secondary* axis and which connection points connectors leave from and
//! arrive at.

use serde::{Deserialize, Serialize};

use crate::{descriptor::Side, geometry::Point};

/// The direction in which hierarchy depth grows on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Roots on the left, children to the right. Primary axis is `x`.
    #[default]
    LeftToRight,
    /// Roots at the top, children below. Primary axis is `y`.
    TopToBottom,
}

impl Orientation {
    /// Coordinate along the axis that encodes depth.
    pub fn primary(self, point: Point) -> f32 {
        match self {
            Self::LeftToRight => point.x(),
            Self::TopToBottom => point.y(),
        }
    }

    /// Coordinate along the axis siblings are spread over.
    pub fn secondary(self, point: Point) -> f32 {
        match self {
            Self::LeftToRight => point.y(),
            Self::TopToBottom => point.x(),
        }
    }

    /// Absolute primary and secondary distance between two points.
    pub fn gaps(self, a: Point, b: Point) -> (f32, f32) {
        let primary = self.primary(a) - self.primary(b);
        let secondary = self.secondary(a) - self.secondary(b);
        (primary.abs(), secondary.abs())
    }

    /// Side of a node that outgoing (parent) connectors attach to.
    pub fn parent_side(self) -> Side {
        match self {
            Self::LeftToRight => Side::Right,
            Self::TopToBottom => Side::Bottom,
        }
    }

    /// Side of a node that incoming (child) connectors attach to.
    pub fn child_side(self) -> Side {
        match self {
            Self::LeftToRight => Side::Left,
            Self::TopToBottom => Side::Top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_to_right_axes() {
        let point = Point::new(3.0, 7.0);
        let orientation = Orientation::LeftToRight;

        assert_eq!(orientation.primary(point), 3.0);
        assert_eq!(orientation.secondary(point), 7.0);
        assert_eq!(orientation.parent_side(), Side::Right);
        assert_eq!(orientation.child_side(), Side::Left);
    }

    #[test]
    fn test_top_to_bottom_axes() {
        let point = Point::new(3.0, 7.0);
        let orientation = Orientation::TopToBottom;

        assert_eq!(orientation.primary(point), 7.0);
        assert_eq!(orientation.secondary(point), 3.0);
        assert_eq!(orientation.parent_side(), Side::Bottom);
        assert_eq!(orientation.child_side(), Side::Top);
    }

    #[test]
    fn test_gaps_follow_orientation() {
        let (a, b) = (Point::new(10.0, 50.0), Point::new(40.0, 20.0));

        assert_eq!(Orientation::LeftToRight.gaps(a, b), (30.0, 30.0));
        assert_eq!(Orientation::TopToBottom.gaps(a, Point::new(0.0, 90.0)), (40.0, 10.0));
    }

    #[test]
    fn test_default_is_left_to_right() {
        assert_eq!(Orientation::default(), Orientation::LeftToRight);
    }
}
