//! Parent resolution.
//!
//! Candidate edges may give one child several parents. Candidates are
//! applied in arrival order and a later one only displaces the current
//! parent when it is clearly closer to the child. The result is greedy and
//! order dependent, but deterministic for a fixed candidate order.

use indexmap::IndexMap;
use log::{debug, info, warn};

use arbor_core::descriptor::{NodeDescriptor, NodeId};

use crate::{config::ResolverConfig, edge::CandidateEdge, level::LevelMap};

/// Resolved parent to children assignments.
///
/// Parents iterate in the order they first received a child, and each
/// parent's children in the order they were assigned. A child appears under
/// at most one parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParentChildMap {
    children: IndexMap<NodeId, Vec<NodeId>>,
    parents: IndexMap<NodeId, NodeId>,
}

impl ParentChildMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Children currently assigned to `parent`.
    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        self.children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn parent_of(&self, child: NodeId) -> Option<NodeId> {
        self.parents.get(&child).copied()
    }

    /// Number of children with an assigned parent.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Iterates over parents and their children in discovery order.
    ///
    /// A parent that lost all of its children to replacements is still
    /// listed, with no children.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[NodeId])> {
        self.children
            .iter()
            .map(|(parent, children)| (*parent, children.as_slice()))
    }

    /// Makes `parent` the parent of `child`, detaching `child` from any
    /// previous parent.
    pub fn assign(&mut self, parent: NodeId, child: NodeId) {
        let previous = self.parents.insert(child, parent);
        if let Some(siblings) = previous.and_then(|id| self.children.get_mut(&id)) {
            siblings.retain(|id| *id != child);
        }
        self.children.entry(parent).or_default().push(child);
    }
}

/// Decides between competing parents for one child.
struct Arbiter<'a> {
    nodes: &'a [NodeDescriptor],
    levels: &'a LevelMap,
    config: &'a ResolverConfig,
}

impl Arbiter<'_> {
    fn node(&self, id: NodeId) -> Option<&NodeDescriptor> {
        self.nodes.get(id.index()).filter(|node| node.id() == id)
    }

    /// Primary and secondary distance between two nodes.
    fn distances(&self, a: &NodeDescriptor, b: &NodeDescriptor) -> (f32, f32) {
        self.levels.orientation().gaps(a.position(), b.position())
    }

    /// Returns `true` if `candidate` should displace `existing` as the
    /// parent of `child`. `level` is the parents' level index.
    fn should_replace(
        &self,
        existing: &NodeDescriptor,
        candidate: &NodeDescriptor,
        child: &NodeDescriptor,
        level: usize,
    ) -> bool {
        let (existing_axis, existing_secondary) = self.distances(child, existing);
        let (new_axis, new_secondary) = self.distances(child, candidate);

        if level >= self.config.deep_level() {
            return new_axis < existing_axis * self.config.deep_factor();
        }
        if (existing_axis - new_axis).abs() > self.config.axis_gap() {
            return new_axis < existing_axis;
        }
        if (existing_secondary - new_secondary).abs() > self.config.secondary_gap() {
            return new_secondary < existing_secondary;
        }
        false
    }
}

/// Builds the parent/child map from candidate edges.
///
/// Only candidates joining consecutive levels are considered, with levels
/// looked up by [`LevelMap::nearest_level`] as the builder does. The first
/// accepted parent of a child stays unless a later candidate is a better
/// fit, see [`ResolverConfig`].
pub fn resolve_parents(
    candidates: &[CandidateEdge],
    nodes: &[NodeDescriptor],
    levels: &LevelMap,
    config: &ResolverConfig,
) -> ParentChildMap {
    let arbiter = Arbiter {
        nodes,
        levels,
        config,
    };
    let mut map = ParentChildMap::new();

    for candidate in candidates {
        let (parent_id, child_id) = (candidate.parent(), candidate.child());
        let (Some(parent), Some(child)) = (arbiter.node(parent_id), arbiter.node(child_id)) else {
            debug!(parent:% = parent_id, child:% = child_id; "Skipping edge to an unknown node");
            continue;
        };
        let parent_level = levels.nearest_level(parent);
        let child_level = levels.nearest_level(child);
        let level = match (parent_level, child_level) {
            (Some(parent), Some(child)) if child == parent + 1 => parent,
            _ => {
                warn!(
                    parent:% = parent_id,
                    child:% = child_id,
                    parent_level:?,
                    child_level:?;
                    "Rejecting edge between non-consecutive levels"
                );
                continue;
            }
        };

        let Some(existing_id) = map.parent_of(child_id) else {
            debug!(parent:% = parent_id, child:% = child_id, level; "Assigned parent");
            map.assign(parent_id, child_id);
            continue;
        };
        let Some(existing) = arbiter.node(existing_id) else {
            continue;
        };
        if existing_id != parent_id && arbiter.should_replace(existing, parent, child, level) {
            debug!(
                child:% = child_id,
                from:% = existing_id,
                to:% = parent_id,
                level;
                "Replaced parent"
            );
            map.assign(parent_id, child_id);
        }
    }

    info!(
        candidates = candidates.len(),
        parents = map.iter().filter(|(_, children)| !children.is_empty()).count(),
        children = map.len();
        "Resolved parents"
    );
    map
}

#[cfg(test)]
mod tests {
    use arbor_core::{
        descriptor::{EdgeDescriptor, StrokeKind},
        geometry::{Bounds, Point, Size},
        orientation::Orientation,
    };

    use super::*;

    fn node(index: usize, x: f32, y: f32) -> NodeDescriptor {
        let position = Point::new(x, y);
        NodeDescriptor::new(
            NodeId::new(index),
            format!("n{index}"),
            position,
            Bounds::new_from_center(position, Size::new(40.0, 32.0)),
            index,
        )
    }

    fn candidate(parent: usize, child: usize) -> CandidateEdge {
        CandidateEdge::new(
            NodeId::new(parent),
            NodeId::new(child),
            EdgeDescriptor::new(Point::default(), Point::default(), StrokeKind::Line),
        )
    }

    fn resolve(nodes: &[NodeDescriptor], candidates: &[CandidateEdge]) -> ParentChildMap {
        let levels = LevelMap::classify(nodes, 20.0, Orientation::LeftToRight);
        resolve_parents(candidates, nodes, &levels, &ResolverConfig::default())
    }

    #[test]
    fn test_assign_moves_child_between_parents() {
        let mut map = ParentChildMap::new();
        let (a, b, c) = (NodeId::new(0), NodeId::new(1), NodeId::new(2));
        map.assign(a, c);
        map.assign(b, c);

        assert_eq!(map.parent_of(c), Some(b));
        assert!(map.children(a).is_empty());
        assert_eq!(map.children(b), &[c]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.iter().count(), 2);
    }

    #[test]
    fn test_chain_is_resolved_in_order() {
        let nodes = [node(0, 0.0, 0.0), node(1, 200.0, 0.0), node(2, 400.0, 0.0)];
        let map = resolve(&nodes, &[candidate(0, 1), candidate(1, 2)]);

        assert_eq!(map.children(NodeId::new(0)), &[NodeId::new(1)]);
        assert_eq!(map.children(NodeId::new(1)), &[NodeId::new(2)]);
        assert_eq!(map.parent_of(NodeId::new(0)), None);
    }

    #[test]
    fn test_level_skipping_edge_is_rejected() {
        let nodes = [node(0, 0.0, 0.0), node(1, 200.0, 0.0), node(2, 400.0, 0.0)];
        let map = resolve(&nodes, &[candidate(0, 2)]);
        assert!(map.is_empty());
    }

    #[test]
    fn test_levels_are_matched_within_tolerance() {
        // 40 snaps two buckets past 0, but lies within tolerance of the 20
        // level, so the edge joins consecutive levels.
        let nodes = [node(0, 0.0, 0.0), node(1, 15.0, 0.0), node(2, 40.0, 0.0)];
        let levels = LevelMap::classify(&nodes, 20.0, Orientation::LeftToRight);
        assert_eq!(levels.level_of(NodeId::new(2)), Some(2));

        let map = resolve(&nodes, &[candidate(0, 2)]);
        assert_eq!(map.parent_of(NodeId::new(2)), Some(NodeId::new(0)));
    }

    #[test]
    fn test_close_competitors_keep_first_parent() {
        let nodes = [
            node(0, 98.0, 0.0),
            node(1, 102.0, 20.0),
            node(2, 400.0, 10.0),
        ];
        let map = resolve(&nodes, &[candidate(0, 2), candidate(1, 2)]);

        assert_eq!(map.parent_of(NodeId::new(2)), Some(NodeId::new(0)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_secondary_gap_replaces_parent() {
        let nodes = [
            node(0, 100.0, 0.0),
            node(1, 100.0, 200.0),
            node(2, 400.0, 190.0),
        ];
        let map = resolve(&nodes, &[candidate(0, 2), candidate(1, 2)]);

        assert_eq!(map.parent_of(NodeId::new(2)), Some(NodeId::new(1)));
        assert!(map.children(NodeId::new(0)).is_empty());
    }

    #[test]
    fn test_farther_candidate_never_replaces() {
        let nodes = [
            node(0, 100.0, 190.0),
            node(1, 100.0, 0.0),
            node(2, 400.0, 190.0),
        ];
        let map = resolve(&nodes, &[candidate(0, 2), candidate(1, 2)]);
        assert_eq!(map.parent_of(NodeId::new(2)), Some(NodeId::new(0)));
    }

    #[test]
    fn test_deep_levels_use_axis_factor() {
        let arbiter_nodes = [
            node(0, 0.0, 0.0),
            node(1, 100.0, 0.0),
            node(2, 200.0, 500.0),
        ];
        let levels = LevelMap::classify(&arbiter_nodes, 20.0, Orientation::LeftToRight);
        let config = ResolverConfig::default();
        let arbiter = Arbiter {
            nodes: &arbiter_nodes,
            levels: &levels,
            config: &config,
        };
        let (existing, candidate, child) =
            (&arbiter_nodes[0], &arbiter_nodes[1], &arbiter_nodes[2]);

        // Axis distances 200 and 100. Deep levels only compare those.
        assert!(arbiter.should_replace(existing, candidate, child, 5));
        assert!(!arbiter.should_replace(candidate, existing, child, 5));
    }
}
