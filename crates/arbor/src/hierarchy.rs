//! Hierarchy construction.
//!
//! The [`HierarchyBuilder`] walks the resolved parent/child map breadth-first
//! from the root. When there is no root or no resolved edge at all it
//! synthesizes a tree from level order instead, and tags the result so
//! callers can tell the two apart.
//!
//! Every hierarchy it returns is a tree: one root, each other node's parent
//! is in the result one level up, and depth stays below the configured
//! maximum.

use std::{collections::VecDeque, fmt};

use log::{debug, info, trace, warn};
use serde::Serialize;

use arbor_core::descriptor::{NodeDescriptor, NodeId};

use crate::{
    config::BuilderConfig,
    error::ArborError,
    level::{Level, LevelMap},
    resolve::ParentChildMap,
};

/// How a hierarchy was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMethod {
    /// Breadth-first traversal of resolved connectors.
    Bfs,
    /// Synthetic tree chaining each level to the previous one.
    FallbackLevelOrder,
    /// Synthetic tree hanging every node off the first one.
    FallbackFlat,
}

impl ExtractionMethod {
    /// Returns `true` for trees synthesized without connector evidence.
    pub fn is_fallback(self) -> bool {
        !matches!(self, Self::Bfs)
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bfs => write!(f, "bfs"),
            Self::FallbackLevelOrder => write!(f, "fallback-level-order"),
            Self::FallbackFlat => write!(f, "fallback-flat"),
        }
    }
}

/// One node of the reconstructed tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyNode {
    id: NodeId,
    text: String,
    parent_id: Option<NodeId>,
    level: usize,
    original_index: usize,
}

impl HierarchyNode {
    fn new(node: &NodeDescriptor, parent_id: Option<NodeId>, level: usize) -> Self {
        Self {
            id: node.id(),
            text: node.text().to_string(),
            parent_id,
            level,
            original_index: node.original_index(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `None` only for the root.
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    /// Depth below the root, which is at level 0.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Index of the raw detection this node came from.
    pub fn original_index(&self) -> usize {
        self.original_index
    }
}

/// A reconstructed tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    total_nodes: usize,
    max_level: usize,
    root_node: NodeId,
    extraction_method: ExtractionMethod,
}

impl Hierarchy {
    /// Validates and wraps traversal output.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::InvalidHierarchy`] if `nodes` is empty or does
    /// not contain exactly one root.
    fn new(nodes: Vec<HierarchyNode>, method: ExtractionMethod) -> Result<Self, ArborError> {
        let mut roots = nodes.iter().filter(|node| node.parent_id.is_none());
        let root = match (roots.next(), roots.next()) {
            (Some(root), None) => root.id,
            (None, _) if nodes.is_empty() => {
                return Err(ArborError::InvalidHierarchy("no nodes were placed".to_string()));
            }
            (None, _) => {
                return Err(ArborError::InvalidHierarchy("the tree has no root".to_string()));
            }
            (Some(_), Some(_)) => {
                return Err(ArborError::InvalidHierarchy(
                    "the tree has more than one root".to_string(),
                ));
            }
        };

        let max_level = nodes
            .iter()
            .map(|node| node.level)
            .max()
            .unwrap_or_default();
        Ok(Self {
            total_nodes: nodes.len(),
            max_level,
            root_node: root,
            extraction_method: method,
            nodes,
        })
    }

    /// Nodes in placement order. The root comes first.
    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    pub fn total_nodes(&self) -> usize {
        self.total_nodes
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn root(&self) -> NodeId {
        self.root_node
    }

    pub fn extraction_method(&self) -> ExtractionMethod {
        self.extraction_method
    }

    /// Looks up a placed node.
    pub fn node(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Placed children of `id`, in placement order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &HierarchyNode> + '_ {
        self.nodes
            .iter()
            .filter(move |node| node.parent_id == Some(id))
    }
}

/// Traversal state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    Queued,
    Visited,
}

/// Per-node bookkeeping of one traversal, indexed by node id.
struct Placement {
    visits: Vec<Visit>,
    parents: Vec<Option<NodeId>>,
    child_counts: Vec<usize>,
    placed: Vec<HierarchyNode>,
}

impl Placement {
    fn new(len: usize) -> Self {
        Self {
            visits: vec![Visit::Unvisited; len],
            parents: vec![None; len],
            child_counts: vec![0; len],
            placed: Vec::with_capacity(len),
        }
    }

    fn visit(&self, id: NodeId) -> Visit {
        self.visits
            .get(id.index())
            .copied()
            .unwrap_or(Visit::Visited)
    }

    fn set_visit(&mut self, id: NodeId, visit: Visit) {
        if let Some(slot) = self.visits.get_mut(id.index()) {
            *slot = visit;
        }
    }

    fn child_count(&self, id: NodeId) -> usize {
        self.child_counts
            .get(id.index())
            .copied()
            .unwrap_or_default()
    }

    fn place(&mut self, node: &NodeDescriptor, parent: Option<NodeId>, level: usize) {
        let index = node.id().index();
        self.visits[index] = Visit::Queued;
        self.parents[index] = parent;
        if let Some(count) = parent.and_then(|id| self.child_counts.get_mut(id.index())) {
            *count += 1;
        }
        self.placed.push(HierarchyNode::new(node, parent, level));
    }

    /// Walks up from `start` through placed parents, at most `hops` steps,
    /// looking for `target`.
    fn has_ancestor(&self, start: NodeId, target: NodeId, hops: usize) -> bool {
        let mut current = Some(start);
        for _ in 0..hops {
            match current {
                Some(id) if id == target => return true,
                Some(id) => current = self.parents.get(id.index()).copied().flatten(),
                None => return false,
            }
        }
        false
    }
}

/// Builds a [`Hierarchy`] from resolved parent/child assignments.
///
/// # Examples
///
/// ```
/// # use arbor::{config::BuilderConfig, hierarchy::{ExtractionMethod, HierarchyBuilder},
/// #     level::LevelMap, resolve::ParentChildMap};
/// # use arbor_core::{descriptor::{NodeDescriptor, NodeId},
/// #     geometry::{Bounds, Point, Size}, orientation::Orientation};
/// let position = Point::new(0.0, 0.0);
/// let nodes = vec![NodeDescriptor::new(
///     NodeId::new(0),
///     "Topic",
///     position,
///     Bounds::new_from_center(position, Size::new(40.0, 32.0)),
///     0,
/// )];
/// let levels = LevelMap::classify(&nodes, 20.0, Orientation::LeftToRight);
/// let config = BuilderConfig::default();
///
/// let hierarchy = HierarchyBuilder::new(&nodes, &levels, &config)
///     .build(Some(NodeId::new(0)), &ParentChildMap::new())
///     .unwrap();
/// assert_eq!(hierarchy.total_nodes(), 1);
/// assert_eq!(hierarchy.extraction_method(), ExtractionMethod::FallbackLevelOrder);
/// ```
pub struct HierarchyBuilder<'a> {
    nodes: &'a [NodeDescriptor],
    levels: &'a LevelMap,
    config: &'a BuilderConfig,
}

impl<'a> HierarchyBuilder<'a> {
    /// Creates a builder over one pass's nodes and levels.
    ///
    /// Node ids must equal their index in `nodes`, as assigned by
    /// [`normalize`](crate::normalize::normalize).
    pub fn new(
        nodes: &'a [NodeDescriptor],
        levels: &'a LevelMap,
        config: &'a BuilderConfig,
    ) -> Self {
        Self {
            nodes,
            levels,
            config,
        }
    }

    fn node(&self, id: NodeId) -> Option<&'a NodeDescriptor> {
        self.nodes.get(id.index()).filter(|node| node.id() == id)
    }

    /// Builds the tree.
    ///
    /// Traverses `map` from `root` when both are usable, and falls back to a
    /// synthetic tree otherwise. The fallback keeps `root` as its root and
    /// starts from `root`'s level, leaving shallower levels out.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::InvalidHierarchy`] if no tree with a single root
    /// could be produced, which only happens without nodes.
    pub fn build(
        &self,
        root: Option<NodeId>,
        map: &ParentChildMap,
    ) -> Result<Hierarchy, ArborError> {
        let root = root.and_then(|id| self.node(id));
        let hierarchy = match root {
            Some(root) if !map.is_empty() => self.traverse(root, map)?,
            _ => {
                warn!(
                    has_root = root.is_some(),
                    edges = map.len();
                    "No usable root or edges, synthesizing the hierarchy from levels"
                );
                self.fallback(root.map(NodeDescriptor::id))?
            }
        };

        info!(
            nodes = hierarchy.total_nodes(),
            max_level = hierarchy.max_level(),
            method:% = hierarchy.extraction_method();
            "Built hierarchy"
        );
        Ok(hierarchy)
    }

    /// Breadth-first traversal of `map` from `root`.
    fn traverse(
        &self,
        root: &NodeDescriptor,
        map: &ParentChildMap,
    ) -> Result<Hierarchy, ArborError> {
        let mut placement = Placement::new(self.nodes.len());
        let mut queue = VecDeque::new();

        placement.place(root, None, 0);
        queue.push_back((root, 0));

        while let Some((parent, level)) = queue.pop_front() {
            placement.set_visit(parent.id(), Visit::Visited);
            if level + 1 >= self.config.max_levels() {
                trace!(node:% = parent.id(), level; "Depth limit reached, not expanding");
                continue;
            }

            for &child_id in map.children(parent.id()) {
                if placement.visit(child_id) != Visit::Unvisited {
                    continue;
                }
                let Some(child) = self.node(child_id) else {
                    continue;
                };
                if !self.accepts(&placement, parent, child, level) {
                    continue;
                }

                trace!(
                    parent:% = parent.id(),
                    child:% = child_id,
                    level = level + 1;
                    "Placed node"
                );
                placement.place(child, Some(parent.id()), level + 1);
                queue.push_back((child, level + 1));
            }
        }

        Hierarchy::new(placement.placed, ExtractionMethod::Bfs)
    }

    /// Checks whether `child` may be placed under `parent`, which sits at
    /// depth `level`.
    fn accepts(
        &self,
        placement: &Placement,
        parent: &NodeDescriptor,
        child: &NodeDescriptor,
        level: usize,
    ) -> bool {
        let parent_level = self.levels.nearest_level(parent);
        let child_level = self.levels.nearest_level(child);
        if !matches!((parent_level, child_level), (Some(p), Some(c)) if c == p + 1) {
            warn!(
                parent:% = parent.id(),
                child:% = child.id(),
                parent_level:?,
                child_level:?;
                "Skipping child on a non-consecutive level"
            );
            return false;
        }

        if placement.child_count(parent.id()) >= self.config.max_children(level) {
            warn!(
                parent:% = parent.id(),
                child:% = child.id(),
                level;
                "Too many children, skipping"
            );
            return false;
        }

        if level < self.config.deep_level() {
            return true;
        }

        if placement.has_ancestor(parent.id(), child.id(), self.config.cycle_probe_hops()) {
            warn!(parent:% = parent.id(), child:% = child.id(), level; "Cycle detected, skipping");
            return false;
        }

        let orientation = self.levels.orientation();
        let (axis_gap, secondary_gap) = orientation.gaps(child.position(), parent.position());
        if axis_gap < self.config.min_axis_gap(level)
            || secondary_gap > self.config.max_secondary_gap(level)
        {
            warn!(
                parent:% = parent.id(),
                child:% = child.id(),
                level,
                axis_gap,
                secondary_gap;
                "Implausible deep child position, skipping"
            );
            return false;
        }

        true
    }

    /// Synthesizes a tree from level order alone.
    fn fallback(&self, preferred_root: Option<NodeId>) -> Result<Hierarchy, ArborError> {
        if self.levels.is_empty() {
            return self.flat();
        }

        let orientation = self.levels.orientation();
        let secondary_gap = |a: &NodeDescriptor, b: &NodeDescriptor| {
            let (_, gap) = orientation.gaps(a.position(), b.position());
            gap
        };
        let mut placement = Placement::new(self.nodes.len());

        // A chosen root keeps its place and shallower levels are left out.
        let start = preferred_root
            .and_then(|id| self.levels.level_of(id))
            .unwrap_or_default();
        let Some(first_level) = self.levels.levels().get(start).map(Level::nodes) else {
            return self.flat();
        };
        let root_id = preferred_root
            .filter(|id| first_level.contains(id))
            .or_else(|| first_level.first().copied());
        let Some(root) = root_id.and_then(|id| self.node(id)) else {
            return self.flat();
        };
        if start > 0 {
            debug!(root:% = root.id(), skipped = start; "Synthesizing below the chosen root");
        }
        placement.place(root, None, 0);

        let mut previous: Vec<(&NodeDescriptor, usize)> = vec![(root, 0)];
        for &id in first_level {
            let Some(node) = self.node(id).filter(|node| node.id() != root.id()) else {
                continue;
            };
            if !self.fallback_place(&mut placement, node, root, 0) {
                continue;
            }
            previous.push((node, 1));
        }

        for level in self.levels.levels().iter().skip(start + 1) {
            let mut current = Vec::with_capacity(level.nodes().len());
            for &id in level.nodes() {
                let Some(node) = self.node(id) else {
                    continue;
                };
                let parent = previous
                    .iter()
                    .filter(|(parent, depth)| {
                        depth + 1 < self.config.max_levels()
                            && placement.child_count(parent.id()) < self.config.max_children(*depth)
                    })
                    .copied()
                    .reduce(|closest, candidate| {
                        if secondary_gap(node, candidate.0) < secondary_gap(node, closest.0) {
                            candidate
                        } else {
                            closest
                        }
                    });
                let Some((parent, depth)) = parent else {
                    trace!(node:% = id; "No parent with room in the previous level, dropping");
                    continue;
                };
                if self.fallback_place(&mut placement, node, parent, depth) {
                    current.push((node, depth + 1));
                }
            }
            previous = current;
        }

        Hierarchy::new(placement.placed, ExtractionMethod::FallbackLevelOrder)
    }

    /// Places `node` under `parent` at `depth + 1` if depth and fan-out allow.
    fn fallback_place(
        &self,
        placement: &mut Placement,
        node: &NodeDescriptor,
        parent: &NodeDescriptor,
        depth: usize,
    ) -> bool {
        if depth + 1 >= self.config.max_levels()
            || placement.child_count(parent.id()) >= self.config.max_children(depth)
        {
            debug!(node:% = node.id(), parent:% = parent.id(); "Dropping node from synthetic tree");
            return false;
        }
        placement.place(node, Some(parent.id()), depth + 1);
        true
    }

    /// Hangs every node directly off the first one.
    fn flat(&self) -> Result<Hierarchy, ArborError> {
        let mut placement = Placement::new(self.nodes.len());
        let mut nodes = self
            .nodes
            .iter()
            .filter(|node| self.node(node.id()).is_some());
        if let Some(root) = nodes.next() {
            placement.place(root, None, 0);
            for node in nodes {
                self.fallback_place(&mut placement, node, root, 0);
            }
        }
        Hierarchy::new(placement.placed, ExtractionMethod::FallbackFlat)
    }
}

#[cfg(test)]
mod tests {
    use arbor_core::{
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

    fn id(index: usize) -> NodeId {
        NodeId::new(index)
    }

    fn build_with(
        nodes: &[NodeDescriptor],
        root: Option<usize>,
        edges: &[(usize, usize)],
        config: &BuilderConfig,
    ) -> Result<Hierarchy, ArborError> {
        let levels = LevelMap::classify(nodes, 20.0, Orientation::LeftToRight);
        let mut map = ParentChildMap::new();
        for &(parent, child) in edges {
            map.assign(id(parent), id(child));
        }
        HierarchyBuilder::new(nodes, &levels, config).build(root.map(id), &map)
    }

    fn build(nodes: &[NodeDescriptor], root: usize, edges: &[(usize, usize)]) -> Hierarchy {
        build_with(nodes, Some(root), edges, &BuilderConfig::default()).expect("valid hierarchy")
    }

    fn parent(hierarchy: &Hierarchy, index: usize) -> Option<NodeId> {
        hierarchy.node(id(index)).and_then(HierarchyNode::parent_id)
    }

    #[test]
    fn test_linear_chain() {
        let nodes = [node(0, 0.0, 0.0), node(1, 200.0, 0.0), node(2, 400.0, 0.0)];
        let hierarchy = build(&nodes, 0, &[(0, 1), (1, 2)]);

        assert_eq!(hierarchy.extraction_method(), ExtractionMethod::Bfs);
        assert_eq!(hierarchy.root(), id(0));
        assert_eq!(hierarchy.max_level(), 2);
        assert_eq!(hierarchy.total_nodes(), 3);
        assert_eq!(parent(&hierarchy, 2), Some(id(1)));
        assert_eq!(hierarchy.node(id(2)).map(HierarchyNode::level), Some(2));
    }

    #[test]
    fn test_unreachable_nodes_are_left_out() {
        let nodes = [
            node(0, 0.0, 0.0),
            node(1, 200.0, 0.0),
            node(2, 200.0, 300.0),
            node(3, 400.0, 300.0),
        ];
        let hierarchy = build(&nodes, 0, &[(0, 1), (2, 3)]);

        assert_eq!(hierarchy.total_nodes(), 2);
        assert!(hierarchy.node(id(3)).is_none());
    }

    #[test]
    fn test_level_drift_is_rejected() {
        // Node 1 is in the 100 bucket but within tolerance of the 80 level,
        // so its recomputed level equals node 0's.
        let nodes = [node(0, 80.0, 0.0), node(1, 95.0, 0.0), node(2, 100.0, 50.0)];
        let hierarchy = build(&nodes, 0, &[(0, 1)]);
        assert_eq!(hierarchy.total_nodes(), 1);
    }

    #[test]
    fn test_depth_is_capped() {
        let nodes: Vec<NodeDescriptor> = (0..10).map(|i| node(i, i as f32 * 100.0, 0.0)).collect();
        let edges: Vec<(usize, usize)> = (0..9).map(|i| (i, i + 1)).collect();
        let hierarchy = build(&nodes, 0, &edges);

        assert_eq!(hierarchy.max_level(), 7);
        assert_eq!(hierarchy.total_nodes(), 8);
    }

    #[test]
    fn test_fan_out_is_capped() {
        let mut nodes = vec![node(0, 0.0, 0.0)];
        nodes.extend((1..=5).map(|i| node(i, 200.0, i as f32 * 40.0)));
        let edges: Vec<(usize, usize)> = (1..=5).map(|i| (0, i)).collect();
        let config = BuilderConfig::default().with_max_children(3, 3);

        let hierarchy = build_with(&nodes, Some(0), &edges, &config).expect("valid hierarchy");
        assert_eq!(hierarchy.children(id(0)).count(), 3);
    }

    #[test]
    fn test_deep_children_need_plausible_positions() {
        // Six chained levels 100 apart, then a level-6 child 500 off axis.
        let mut nodes: Vec<NodeDescriptor> =
            (0..6).map(|i| node(i, i as f32 * 100.0, 0.0)).collect();
        nodes.push(node(6, 600.0, 500.0));
        nodes.push(node(7, 600.0, 40.0));
        let edges = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (5, 7)];
        let hierarchy = build(&nodes, 0, &edges);

        assert!(hierarchy.node(id(6)).is_none());
        assert_eq!(parent(&hierarchy, 7), Some(id(5)));
        assert_eq!(hierarchy.max_level(), 6);
    }

    #[test]
    fn test_no_edges_falls_back_to_level_order() {
        let nodes = [
            node(0, 0.0, 100.0),
            node(1, 200.0, 0.0),
            node(2, 200.0, 200.0),
            node(3, 400.0, 190.0),
        ];
        let hierarchy = build(&nodes, 0, &[]);

        assert_eq!(
            hierarchy.extraction_method(),
            ExtractionMethod::FallbackLevelOrder
        );
        assert!(hierarchy.extraction_method().is_fallback());
        assert_eq!(parent(&hierarchy, 1), Some(id(0)));
        assert_eq!(parent(&hierarchy, 3), Some(id(2)));
        assert_eq!(hierarchy.max_level(), 2);
    }

    #[test]
    fn test_fallback_hangs_extra_roots_off_the_root() {
        let nodes = [node(0, 0.0, 0.0), node(1, 0.0, 100.0), node(2, 200.0, 110.0)];
        let hierarchy =
            build_with(&nodes, Some(1), &[], &BuilderConfig::default()).expect("valid hierarchy");

        assert_eq!(hierarchy.root(), id(1));
        assert_eq!(parent(&hierarchy, 0), Some(id(1)));
        assert_eq!(hierarchy.node(id(0)).map(HierarchyNode::level), Some(1));
        assert_eq!(parent(&hierarchy, 2), Some(id(1)));
    }

    #[test]
    fn test_fallback_starts_at_chosen_root_level() {
        let nodes = [
            node(0, 0.0, 0.0),
            node(1, 200.0, 0.0),
            node(2, 200.0, 300.0),
            node(3, 400.0, 0.0),
        ];
        let hierarchy =
            build_with(&nodes, Some(1), &[], &BuilderConfig::default()).expect("valid hierarchy");

        assert_eq!(hierarchy.root(), id(1));
        assert_eq!(
            hierarchy.extraction_method(),
            ExtractionMethod::FallbackLevelOrder
        );
        assert!(hierarchy.node(id(0)).is_none());
        assert_eq!(parent(&hierarchy, 2), Some(id(1)));
        assert_eq!(parent(&hierarchy, 3), Some(id(1)));
        assert_eq!(hierarchy.total_nodes(), 3);
        assert_eq!(hierarchy.max_level(), 1);
    }

    #[test]
    fn test_flat_fallback_without_levels() {
        let nodes = [node(0, 0.0, 0.0), node(1, 200.0, 0.0)];
        let levels = LevelMap::classify(&[], 20.0, Orientation::LeftToRight);
        let config = BuilderConfig::default();
        let hierarchy = HierarchyBuilder::new(&nodes, &levels, &config)
            .build(None, &ParentChildMap::new())
            .expect("valid hierarchy");

        assert_eq!(
            hierarchy.extraction_method(),
            ExtractionMethod::FallbackFlat
        );
        assert_eq!(hierarchy.root(), id(0));
        assert_eq!(parent(&hierarchy, 1), Some(id(0)));
        assert_eq!(hierarchy.max_level(), 1);
    }

    #[test]
    fn test_no_nodes_is_invalid() {
        let result = build_with(&[], None, &[], &BuilderConfig::default());
        assert!(matches!(result, Err(ArborError::InvalidHierarchy(_))));
    }

    #[test]
    fn test_has_ancestor_respects_hop_limit() {
        let nodes = [node(0, 0.0, 0.0), node(1, 200.0, 0.0), node(2, 400.0, 0.0)];
        let mut placement = Placement::new(3);
        placement.place(&nodes[0], None, 0);
        placement.place(&nodes[1], Some(id(0)), 1);
        placement.place(&nodes[2], Some(id(1)), 2);

        assert!(placement.has_ancestor(id(2), id(0), 15));
        assert!(!placement.has_ancestor(id(2), id(0), 2));
        assert!(!placement.has_ancestor(id(1), id(2), 15));
    }

    #[test]
    fn test_method_serializes_as_tag() {
        let json = serde_json::to_string(&ExtractionMethod::FallbackLevelOrder).unwrap();
        assert_eq!(json, "\"fallback-level-order\"");
        assert_eq!(ExtractionMethod::Bfs.to_string(), "bfs");
    }
}
