//! Single-slot cache of the intermediates of a debug pass.
//!
//! An override pass rebuilds the hierarchy around a caller-chosen root from
//! these intermediates, without normalizing the geometry again. The slot has
//! no expiry: it holds the latest debug pass until replaced or cleared.

use log::debug;

use arbor_core::descriptor::{NodeDescriptor, NodeId};

use crate::{edge::CandidateEdge, level::LevelMap};

/// Stage output of one pass up to, but excluding, parent resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    nodes: Vec<NodeDescriptor>,
    levels: LevelMap,
    candidates: Vec<CandidateEdge>,
}

impl Snapshot {
    pub fn new(
        nodes: Vec<NodeDescriptor>,
        levels: LevelMap,
        candidates: Vec<CandidateEdge>,
    ) -> Self {
        Self {
            nodes,
            levels,
            candidates,
        }
    }

    pub fn nodes(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    pub fn levels(&self) -> &LevelMap {
        &self.levels
    }

    pub fn candidates(&self) -> &[CandidateEdge] {
        &self.candidates
    }

    /// Returns `true` if `id` names one of the snapshot's nodes.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|node| node.id() == id)
    }
}

/// Holds at most one [`Snapshot`].
#[derive(Debug, Default)]
pub struct SnapshotCache {
    slot: Option<Snapshot>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `snapshot`, returning the one it replaces.
    pub fn set(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        debug!(nodes = snapshot.nodes.len(), replaced = self.slot.is_some(); "Caching snapshot");
        self.slot.replace(snapshot)
    }

    pub fn get(&self) -> Option<&Snapshot> {
        self.slot.as_ref()
    }

    /// Drops the cached snapshot, returning it.
    pub fn clear(&mut self) -> Option<Snapshot> {
        self.slot.take()
    }
}

#[cfg(test)]
mod tests {
    use arbor_core::{
        geometry::{Bounds, Point, Size},
        orientation::Orientation,
    };

    use super::*;

    fn snapshot(count: usize) -> Snapshot {
        let nodes: Vec<NodeDescriptor> = (0..count)
            .map(|i| {
                let position = Point::new(i as f32 * 100.0, 0.0);
                NodeDescriptor::new(
                    NodeId::new(i),
                    format!("n{i}"),
                    position,
                    Bounds::new_from_center(position, Size::new(40.0, 32.0)),
                    i,
                )
            })
            .collect();
        let levels = LevelMap::classify(&nodes, 20.0, Orientation::LeftToRight);
        Snapshot::new(nodes, levels, Vec::new())
    }

    #[test]
    fn test_empty_cache() {
        let mut cache = SnapshotCache::new();
        assert!(cache.get().is_none());
        assert!(cache.clear().is_none());
    }

    #[test]
    fn test_set_replaces_previous() {
        let mut cache = SnapshotCache::new();
        assert!(cache.set(snapshot(1)).is_none());

        let previous = cache.set(snapshot(2)).expect("previous snapshot");
        assert_eq!(previous.nodes().len(), 1);
        assert_eq!(cache.get().map(|s| s.nodes().len()), Some(2));
    }

    #[test]
    fn test_clear_empties_slot() {
        let mut cache = SnapshotCache::new();
        cache.set(snapshot(3));

        assert!(cache.clear().is_some());
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_contains() {
        let snapshot = snapshot(2);
        assert!(snapshot.contains(NodeId::new(1)));
        assert!(!snapshot.contains(NodeId::new(2)));
    }
}
