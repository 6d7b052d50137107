//! Level classification.
//!
//! Hierarchy depth is read off the primary axis: every node coordinate is
//! snapped to the nearest multiple of the level tolerance, nodes sharing a
//! snapped value form one level, and levels are ordered by ascending snapped
//! value. A level's index is its rank in that order, never the coordinate
//! itself.

use std::collections::BTreeMap;

use log::{debug, info};
use serde::Serialize;

use arbor_core::{
    descriptor::{NodeDescriptor, NodeId},
    geometry::round_half_up,
    orientation::Orientation,
};

/// Levels from this index on are reported as deep.
const DEEP_LEVEL_LOG: usize = 5;

/// All nodes sharing one quantized primary-axis coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    coordinate: f32,
    nodes: Vec<NodeId>,
}

impl Level {
    /// The quantized coordinate shared by this level's nodes.
    pub fn coordinate(&self) -> f32 {
        self.coordinate
    }

    /// Nodes in this level, in node order. Never empty.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}

/// Nodes bucketed into ordered levels.
///
/// Every classified node appears in exactly one level and no level is
/// empty. Level coordinates are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMap {
    tolerance: f32,
    orientation: Orientation,
    levels: Vec<Level>,
    node_levels: BTreeMap<NodeId, usize>,
}

impl LevelMap {
    /// Buckets `nodes` by their quantized primary-axis coordinate.
    ///
    /// # Arguments
    ///
    /// * `nodes` - Normalized nodes.
    /// * `tolerance` - Quantization step, also the matching radius of
    ///   [`nearest_level`](Self::nearest_level).
    /// * `orientation` - Selects the primary axis.
    pub fn classify(nodes: &[NodeDescriptor], tolerance: f32, orientation: Orientation) -> Self {
        let mut buckets: BTreeMap<i64, Vec<NodeId>> = BTreeMap::new();
        for node in nodes {
            let step = round_half_up(orientation.primary(node.position()) / tolerance) as i64;
            buckets.entry(step).or_default().push(node.id());
        }

        let levels: Vec<Level> = buckets
            .into_iter()
            .map(|(step, nodes)| Level {
                coordinate: step as f32 * tolerance,
                nodes,
            })
            .collect();

        let node_levels = levels
            .iter()
            .enumerate()
            .flat_map(|(index, level)| level.nodes.iter().map(move |id| (*id, index)))
            .collect();

        info!(levels = levels.len(), nodes = nodes.len(); "Classified nodes into levels");
        for (index, level) in levels.iter().enumerate() {
            debug!(
                level = index,
                coordinate = level.coordinate,
                nodes = level.nodes.len(),
                deep = index >= DEEP_LEVEL_LOG;
                "Level"
            );
        }

        Self {
            tolerance,
            orientation,
            levels,
            node_levels,
        }
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Nodes in the shallowest level, or an empty slice without levels.
    pub fn root_candidates(&self) -> &[NodeId] {
        self.levels
            .first()
            .map(|level| level.nodes.as_slice())
            .unwrap_or_default()
    }

    /// Index of the level bucket `id` was classified into.
    pub fn level_of(&self, id: NodeId) -> Option<usize> {
        self.node_levels.get(&id).copied()
    }

    /// Index of the first level whose coordinate lies within the tolerance
    /// of `node`'s primary-axis coordinate.
    ///
    /// This recomputes a level from geometry alone rather than trusting the
    /// bucket assignment. Near bucket boundaries the two can disagree.
    pub fn nearest_level(&self, node: &NodeDescriptor) -> Option<usize> {
        let coordinate = self.orientation.primary(node.position());
        self.levels
            .iter()
            .position(|level| (level.coordinate - coordinate).abs() <= self.tolerance)
    }
}
