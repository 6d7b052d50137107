//! Error types for Arbor operations.
//!
//! This module provides the main error type [`ArborError`]. Only the
//! conditions listed here abort an extraction pass; per-node and per-edge
//! anomalies are recovered where they occur and logged.

use std::{fmt, io, time::Duration};

use thiserror::Error;

use arbor_core::descriptor::NodeId;

/// Counts of the raw geometry a pass was given.
///
/// Attached to [`ArborError::NoNodesExtracted`] so a caller can tell an empty
/// canvas apart from detections that were all filtered out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryStats {
    /// Raw detections received.
    pub detections: usize,
    /// Detections that carried an inner rectangle or a measured box.
    pub shapes: usize,
    /// Connector strokes received.
    pub strokes: usize,
}

impl fmt::Display for GeometryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "detections={}, shapes={}, strokes={}",
            self.detections, self.shapes, self.strokes
        )
    }
}

/// The main error type for Arbor operations.
#[derive(Debug, Error)]
pub enum ArborError {
    #[error("No geometry found: the diagram supplied no shape or label detections")]
    NoGeometryFound,

    #[error("No unique nodes could be extracted ({stats})")]
    NoNodesExtracted { stats: GeometryStats },

    #[error("No hierarchy levels could be derived from the node positions")]
    NoLevelsFound,

    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    #[error("Operation timed out after {0:?}")]
    OperationTimedOut(Duration),

    #[error("Extraction worker stopped without producing a result")]
    WorkerFailed,

    #[error("Unknown request: {0}")]
    UnknownRequest(String),

    #[error("No cached extraction available, run a debug extraction first")]
    NoSnapshot,

    #[error("Root node {0} not found in the cached extraction")]
    RootNotFound(NodeId),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input: {0}")]
    Input(String),
}
