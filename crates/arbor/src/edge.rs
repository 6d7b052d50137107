//! Connector resolution and matching.
//!
//! A connector is reduced to its first and last points whatever primitive
//! drew it, then each end is snapped to a node's connection point. The start
//! must sit on a node's parent-side anchor and the end on another node's
//! child-side anchor, further along the primary axis.
//!
//! Diagrams carry decorative strokes, so a connector that fails any of these
//! checks is dropped without an error.

use log::{debug, info, trace};
use serde::Serialize;

use arbor_core::{
    descriptor::{EdgeDescriptor, NodeDescriptor, NodeId, Side, StrokeKind},
    geometry::Point,
    orientation::Orientation,
};
use arbor_parser::{ParseOutcome, parse_path, parse_points};

use crate::input::RawStroke;

/// A directed parent to child inference drawn from one connector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateEdge {
    parent: NodeId,
    child: NodeId,
    edge: EdgeDescriptor,
}

impl CandidateEdge {
    pub fn new(parent: NodeId, child: NodeId, edge: EdgeDescriptor) -> Self {
        Self {
            parent,
            child,
            edge,
        }
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn child(&self) -> NodeId {
        self.child
    }

    /// The connector this candidate was inferred from.
    pub fn edge(&self) -> &EdgeDescriptor {
        &self.edge
    }
}

/// Reduces a stroke to its endpoints.
///
/// Returns `None` when fewer than two points can be decoded. Decoding
/// problems that still leave two points are logged and otherwise ignored.
pub fn resolve_stroke(stroke: &RawStroke) -> Option<EdgeDescriptor> {
    let (points, kind) = match stroke {
        RawStroke::Line { x1, y1, x2, y2 } => {
            return Some(EdgeDescriptor::new(
                Point::new(*x1, *y1),
                Point::new(*x2, *y2),
                StrokeKind::Line,
            ));
        }
        RawStroke::Path { d } => (decoded(parse_path(d), StrokeKind::Path), StrokeKind::Path),
        RawStroke::Polyline { points } => (
            decoded(parse_points(points), StrokeKind::Polyline),
            StrokeKind::Polyline,
        ),
    };

    match points.as_slice() {
        [first, .., last] => Some(EdgeDescriptor::new(*first, *last, kind)),
        _ => {
            debug!(kind:%, points = points.len(); "Dropping stroke with fewer than two points");
            None
        }
    }
}

fn decoded(outcome: ParseOutcome<Vec<Point>>, kind: StrokeKind) -> Vec<Point> {
    for err in outcome.errors() {
        debug!(kind:%, err:%; "Recovered from malformed stroke data");
    }
    outcome.into_value()
}

/// First node whose `side` anchor lies within `tolerance` of `point`.
fn node_at<'a>(
    nodes: &'a [NodeDescriptor],
    point: Point,
    side: Side,
    tolerance: f32,
) -> Option<&'a NodeDescriptor> {
    nodes
        .iter()
        .find(|node| node.connection_point(side).distance(point) <= tolerance)
}

/// Turns resolved connectors into candidate edges.
///
/// Ties between nodes go to the earliest node in `nodes`. Output order
/// follows `edges`.
pub fn match_edges(
    nodes: &[NodeDescriptor],
    edges: &[EdgeDescriptor],
    tolerance: f32,
    orientation: Orientation,
) -> Vec<CandidateEdge> {
    let candidates: Vec<CandidateEdge> = edges
        .iter()
        .filter_map(|edge| {
            let parent = node_at(nodes, edge.start(), orientation.parent_side(), tolerance);
            let child = node_at(nodes, edge.end(), orientation.child_side(), tolerance);
            let (Some(parent), Some(child)) = (parent, child) else {
                trace!(kind:% = edge.kind(); "Connector does not touch two nodes");
                return None;
            };
            if parent.id() == child.id() {
                trace!(node:% = parent.id(); "Connector loops back to its own node");
                return None;
            }
            if orientation.primary(child.position()) <= orientation.primary(parent.position()) {
                debug!(
                    parent:% = parent.id(),
                    child:% = child.id();
                    "Connector runs against the hierarchy direction"
                );
                return None;
            }
            trace!(parent:% = parent.id(), child:% = child.id(); "Candidate edge");
            Some(CandidateEdge::new(parent.id(), child.id(), *edge))
        })
        .collect();

    info!(edges = edges.len(), candidates = candidates.len(); "Matched connectors to nodes");
    candidates
}

/// Resolves every stroke and matches the results against `nodes`.
pub fn match_strokes(
    nodes: &[NodeDescriptor],
    strokes: &[RawStroke],
    tolerance: f32,
    orientation: Orientation,
) -> Vec<CandidateEdge> {
    let edges: Vec<EdgeDescriptor> = strokes.iter().filter_map(resolve_stroke).collect();
    match_edges(nodes, &edges, tolerance, orientation)
}
