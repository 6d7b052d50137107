//! Node and edge descriptors.
//!
//! These are the engine's view of the diagram: every detected shape becomes a
//! [`NodeDescriptor`] and every connector stroke becomes an
//! [`EdgeDescriptor`]. Descriptors are created once per extraction pass and
//! are never mutated afterwards.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::geometry::{Bounds, Point};

/// Identifier of a node within one extraction pass.
///
/// Ids are dense and assigned sequentially from zero in first-accepted order,
/// so they double as indices into the node list. They render as `node_<n>`.
///
/// # Examples
///
/// ```
/// use arbor_core::descriptor::NodeId;
///
/// let id = NodeId::new(3);
/// assert_eq!(id.to_string(), "node_3");
/// assert_eq!("node_3".parse::<NodeId>().unwrap(), id);
/// assert_eq!("3".parse::<NodeId>().unwrap(), id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates an id from its sequential index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the sequential index this id was assigned.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

/// Error returned when a string is not a valid [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid node id `{0}`, expected `node_<n>` or `<n>`")]
pub struct InvalidNodeId(String);

impl FromStr for NodeId {
    type Err = InvalidNodeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("node_").unwrap_or(trimmed);
        digits
            .parse::<usize>()
            .map(Self)
            .map_err(|_| InvalidNodeId(s.to_string()))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One of the five canonical anchors of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

impl Side {
    /// All sides in canonical order.
    pub const ALL: [Side; 5] = [Side::Left, Side::Right, Side::Top, Side::Bottom, Side::Center];
}

/// An anchor coordinate tagged with the side it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectionPoint {
    #[serde(flatten)]
    point: Point,
    side: Side,
}

impl ConnectionPoint {
    pub fn point(self) -> Point {
        self.point
    }

    pub fn side(self) -> Side {
        self.side
    }
}

/// The five connection points of a node, derived from its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConnectionPoints([ConnectionPoint; 5]);

impl ConnectionPoints {
    /// Derives the anchors from a bounding box.
    ///
    /// Left and right anchors sit at the vertical center of their edge, top
    /// and bottom at the horizontal center of theirs.
    pub fn from_bounds(bounds: Bounds) -> Self {
        let center = bounds.center();
        Self(Side::ALL.map(|side| {
            let point = match side {
                Side::Left => Point::new(bounds.min_x(), center.y()),
                Side::Right => Point::new(bounds.max_x(), center.y()),
                Side::Top => Point::new(center.x(), bounds.min_y()),
                Side::Bottom => Point::new(center.x(), bounds.max_y()),
                Side::Center => center,
            };
            ConnectionPoint { point, side }
        }))
    }

    /// Returns the anchor for `side`.
    pub fn get(&self, side: Side) -> Point {
        self.0
            .iter()
            .find(|cp| cp.side == side)
            .map(|cp| cp.point)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = ConnectionPoint> + '_ {
        self.0.iter().copied()
    }
}

/// A unique, validated node detected on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    id: NodeId,
    text: String,
    position: Point,
    bounds: Bounds,
    connection_points: ConnectionPoints,
    original_index: usize,
}

impl NodeDescriptor {
    /// Creates a descriptor, deriving its connection points from `bounds`.
    ///
    /// # Arguments
    ///
    /// * `id` - Sequential id of the node.
    /// * `text` - Trimmed label.
    /// * `position` - Canvas position of the node.
    /// * `bounds` - Canvas bounding box of the node.
    /// * `original_index` - Index of the raw detection this node came from.
    pub fn new(
        id: NodeId,
        text: impl Into<String>,
        position: Point,
        bounds: Bounds,
        original_index: usize,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            position,
            bounds,
            connection_points: ConnectionPoints::from_bounds(bounds),
            original_index,
        }
    }

    /// Returns a copy of this descriptor carrying a different id.
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn connection_points(&self) -> &ConnectionPoints {
        &self.connection_points
    }

    /// Shortcut for the anchor on `side`.
    pub fn connection_point(&self, side: Side) -> Point {
        self.connection_points.get(side)
    }

    pub fn original_index(&self) -> usize {
        self.original_index
    }
}

/// The stroke primitive a connector was drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    /// A straight two-point segment.
    Line,
    /// A multi-command path.
    Path,
    /// A chain of straight segments.
    Polyline,
}

impl fmt::Display for StrokeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Path => write!(f, "path"),
            Self::Polyline => write!(f, "polyline"),
        }
    }
}

/// A connector reduced to its two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeDescriptor {
    start: Point,
    end: Point,
    kind: StrokeKind,
}

impl EdgeDescriptor {
    pub fn new(start: Point, end: Point, kind: StrokeKind) -> Self {
        Self { start, end, kind }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn kind(&self) -> StrokeKind {
        self.kind
    }
}
