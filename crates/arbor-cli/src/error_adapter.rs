//! Error adapter for converting ArborError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Every variant
//! gets a stable code, and the ones a user can act on get a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use arbor::ArborError;

/// Adapter rendering an [`ArborError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a ArborError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            ArborError::NoGeometryFound => "arbor::no_geometry",
            ArborError::NoNodesExtracted { .. } => "arbor::no_nodes",
            ArborError::NoLevelsFound => "arbor::no_levels",
            ArborError::InvalidHierarchy(_) => "arbor::invalid_hierarchy",
            ArborError::OperationTimedOut(_) => "arbor::timeout",
            ArborError::WorkerFailed => "arbor::worker",
            ArborError::UnknownRequest(_) => "arbor::unknown_request",
            ArborError::NoSnapshot => "arbor::no_snapshot",
            ArborError::RootNotFound(_) => "arbor::root_not_found",
            ArborError::Io(_) => "arbor::io",
            ArborError::Input(_) => "arbor::input",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            ArborError::NoGeometryFound => {
                "Make sure the diagram is fully rendered and visible before capturing its geometry"
            }
            ArborError::NoNodesExtracted { .. } => {
                "No detection carried a usable label; the capture selectors may be stale"
            }
            ArborError::OperationTimedOut(_) => {
                "Retry once the diagram has finished loading, or raise extraction.timeout_secs"
            }
            ArborError::UnknownRequest(_) => {
                "Known actions are `detect`, `debug` and `extract-with-root`"
            }
            ArborError::NoSnapshot => "Run a debug extraction before choosing a root",
            ArborError::RootNotFound(_) => {
                "Run with `--action debug` to list the node ids of this diagram"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use arbor::{GeometryStats, descriptor::NodeId};

    use super::*;

    fn code(err: &ArborError) -> Option<String> {
        ErrorAdapter(err).code().map(|c| c.to_string())
    }

    fn help(err: &ArborError) -> Option<String> {
        ErrorAdapter(err).help().map(|h| h.to_string())
    }

    #[test]
    fn test_codes_are_stable() {
        let stats = GeometryStats {
            detections: 3,
            shapes: 0,
            strokes: 1,
        };
        assert_eq!(
            code(&ArborError::NoNodesExtracted { stats }).as_deref(),
            Some("arbor::no_nodes")
        );
        assert_eq!(
            code(&ArborError::RootNotFound(NodeId::new(4))).as_deref(),
            Some("arbor::root_not_found")
        );
        assert_eq!(
            code(&ArborError::NoLevelsFound).as_deref(),
            Some("arbor::no_levels")
        );
    }

    #[test]
    fn test_message_includes_stats() {
        let stats = GeometryStats {
            detections: 3,
            shapes: 2,
            strokes: 1,
        };
        let err = ArborError::NoNodesExtracted { stats };
        assert_eq!(
            ErrorAdapter(&err).to_string(),
            "No unique nodes could be extracted (detections=3, shapes=2, strokes=1)"
        );
    }

    #[test]
    fn test_help_only_where_actionable() {
        assert!(help(&ArborError::NoSnapshot).is_some());
        assert!(help(&ArborError::UnknownRequest("export".to_string())).is_some());
        assert!(help(&ArborError::InvalidHierarchy("empty".to_string())).is_none());
    }
}
