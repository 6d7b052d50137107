//! The debug pass report.

use serde::Serialize;

use arbor_core::descriptor::{NodeDescriptor, NodeId};

use crate::{cache::Snapshot, edge::CandidateEdge, level::Level};

/// Intermediates of a debug pass, exposed so a caller can pick a root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugReport {
    nodes: Vec<NodeDescriptor>,
    levels: Vec<Level>,
    candidates: Vec<CandidateEdge>,
    total_nodes: usize,
    total_levels: usize,
    total_connections: usize,
    /// Deepest level index any node resolves to.
    max_level: usize,
    /// The root an automatic pass would pick.
    suggested_root: Option<NodeId>,
}

impl DebugReport {
    pub(crate) fn new(snapshot: &Snapshot, suggested_root: Option<NodeId>) -> Self {
        let levels = snapshot.levels();
        let max_level = snapshot
            .nodes()
            .iter()
            .filter_map(|node| levels.nearest_level(node))
            .max()
            .unwrap_or_default();

        Self {
            nodes: snapshot.nodes().to_vec(),
            levels: levels.levels().to_vec(),
            candidates: snapshot.candidates().to_vec(),
            total_nodes: snapshot.nodes().len(),
            total_levels: levels.len(),
            total_connections: snapshot.candidates().len(),
            max_level,
            suggested_root,
        }
    }

    pub fn nodes(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn candidates(&self) -> &[CandidateEdge] {
        &self.candidates
    }

    pub fn total_nodes(&self) -> usize {
        self.total_nodes
    }

    pub fn total_levels(&self) -> usize {
        self.total_levels
    }

    pub fn total_connections(&self) -> usize {
        self.total_connections
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn suggested_root(&self) -> Option<NodeId> {
        self.suggested_root
    }
}
