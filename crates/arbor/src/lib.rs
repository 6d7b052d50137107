//! Arbor - reconstructs a rooted hierarchy from a rendered diagram.
//!
//! A diagram arrives as raw geometry: label detections and connector
//! strokes. One extraction pass runs these stages:
//!
//! 1. [`normalize`] - filter and deduplicate detections into nodes
//! 2. [`level`] - bucket nodes into depth levels along the primary axis
//! 3. [`edge`] - turn connectors into candidate parent/child edges
//! 4. [`resolve`] - pick one parent per child
//! 5. [`root`] - choose the root
//! 6. [`hierarchy`] - walk the result into a tree, or synthesize one
//!
//! [`Extractor`] runs the stages and keeps the intermediates of a debug pass
//! so that a later pass can rebuild the tree around a chosen root.

pub mod cache;
pub mod config;
pub mod edge;
pub mod hierarchy;
pub mod input;
pub mod level;
pub mod normalize;
pub mod report;
pub mod resolve;
pub mod root;

mod error;
mod timeout;

pub use arbor_core::{descriptor, geometry, orientation};

pub use error::{ArborError, GeometryStats};
pub use hierarchy::{ExtractionMethod, Hierarchy, HierarchyNode};
pub use input::Geometry;
pub use report::DebugReport;
pub use timeout::run_with_timeout;

use std::{fmt, str::FromStr};

use log::{debug, info};
use serde::Serialize;

use arbor_core::descriptor::NodeId;

use cache::{Snapshot, SnapshotCache};
use config::AppConfig;
use hierarchy::HierarchyBuilder;

/// An operation requested of an [`Extractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Automatic single pass.
    Detect,
    /// Pass exposing intermediates, which are cached for an override.
    Debug,
    /// Rebuild the cached pass around the given root.
    ExtractWithRoot(NodeId),
}

impl Request {
    /// Parses an action name.
    ///
    /// Known actions are `detect`, `debug` and `extract-with-root`. The last
    /// one needs `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::UnknownRequest`] for other names and
    /// [`ArborError::Input`] for `extract-with-root` without a root.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arbor::{Request, descriptor::NodeId};
    /// assert_eq!(Request::from_action("detect", None).unwrap(), Request::Detect);
    /// assert_eq!(
    ///     Request::from_action("extract-with-root", Some(NodeId::new(2))).unwrap(),
    ///     Request::ExtractWithRoot(NodeId::new(2)),
    /// );
    /// assert!(Request::from_action("export", None).is_err());
    /// ```
    pub fn from_action(action: &str, root: Option<NodeId>) -> Result<Self, ArborError> {
        match action {
            "detect" => Ok(Self::Detect),
            "debug" => Ok(Self::Debug),
            "extract-with-root" => root.map(Self::ExtractWithRoot).ok_or_else(|| {
                ArborError::Input("extract-with-root requires a root node id".to_string())
            }),
            other => Err(ArborError::UnknownRequest(other.to_string())),
        }
    }

    /// The action name this request parses from.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Detect => "detect",
            Self::Debug => "debug",
            Self::ExtractWithRoot(_) => "extract-with-root",
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtractWithRoot(root) => write!(f, "{} ({root})", self.action()),
            _ => write!(f, "{}", self.action()),
        }
    }
}

impl FromStr for Request {
    type Err = ArborError;

    /// Parses an action name that needs no root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_action(s, None)
    }
}

/// The result of a handled [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Hierarchy(Hierarchy),
    Debug(DebugReport),
}

/// Runs extraction passes.
///
/// # Examples
///
/// ```
/// use arbor::{Extractor, ExtractionMethod, input::{Geometry, RawDetection, RawStroke}};
/// use arbor::geometry::Point;
///
/// let geometry = Geometry::new(
///     vec![
///         RawDetection::translated("Topic", 100.0, 100.0),
///         RawDetection::translated("Subtopic", 300.0, 100.0),
///     ],
///     vec![RawStroke::line(Point::new(120.0, 100.0), Point::new(280.0, 100.0))],
/// );
///
/// let hierarchy = Extractor::default().extract(&geometry).unwrap();
/// assert_eq!(hierarchy.total_nodes(), 2);
/// assert_eq!(hierarchy.max_level(), 1);
/// assert_eq!(hierarchy.extraction_method(), ExtractionMethod::Bfs);
/// ```
#[derive(Debug, Default)]
pub struct Extractor {
    config: AppConfig,
    cache: SnapshotCache,
}

impl Extractor {
    /// Creates an extractor with the given configuration and an empty cache.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            cache: SnapshotCache::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The cache filled by [`debug`](Self::debug).
    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Drops the cached debug pass.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Dispatches a request.
    ///
    /// `geometry` is ignored by [`Request::ExtractWithRoot`], which works
    /// from the cache.
    ///
    /// # Errors
    ///
    /// Returns whatever the dispatched operation returns.
    pub fn handle(
        &mut self,
        request: Request,
        geometry: &Geometry,
    ) -> Result<Response, ArborError> {
        info!(request:%; "Handling request");
        match request {
            Request::Detect => self.extract(geometry).map(Response::Hierarchy),
            Request::Debug => self.debug(geometry).map(Response::Debug),
            Request::ExtractWithRoot(root) => self.extract_with_root(root).map(Response::Hierarchy),
        }
    }

    /// Runs a full automatic pass. The cache is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::NoGeometryFound`], [`ArborError::NoNodesExtracted`]
    /// or [`ArborError::NoLevelsFound`] when a stage has nothing to work on,
    /// and [`ArborError::InvalidHierarchy`] if no tree could be built.
    pub fn extract(&self, geometry: &Geometry) -> Result<Hierarchy, ArborError> {
        let snapshot = self.prepare(geometry)?;
        let root = root::select_root(snapshot.levels(), snapshot.nodes());
        self.assemble(&snapshot, root)
    }

    /// Runs the stages up to root selection and caches their output,
    /// replacing any earlier debug pass.
    ///
    /// # Errors
    ///
    /// Fails like [`extract`](Self::extract) when a stage has nothing to work
    /// on. The cache is left untouched in that case.
    pub fn debug(&mut self, geometry: &Geometry) -> Result<DebugReport, ArborError> {
        let snapshot = self.prepare(geometry)?;
        let root = root::select_root(snapshot.levels(), snapshot.nodes());
        let report = DebugReport::new(&snapshot, root);
        self.cache.set(snapshot);
        Ok(report)
    }

    /// Rebuilds the cached debug pass around `root`.
    ///
    /// Parent resolution and tree construction run again. Normalization does
    /// not.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::NoSnapshot`] without a cached debug pass,
    /// [`ArborError::RootNotFound`] if `root` is not one of its nodes, and
    /// [`ArborError::InvalidHierarchy`] if no tree could be built.
    pub fn extract_with_root(&self, root: NodeId) -> Result<Hierarchy, ArborError> {
        let snapshot = self.cache.get().ok_or(ArborError::NoSnapshot)?;
        if !snapshot.contains(root) {
            return Err(ArborError::RootNotFound(root));
        }
        info!(root:%; "Rebuilding cached extraction around chosen root");
        self.assemble(snapshot, Some(root))
    }

    /// Normalizes, classifies and matches.
    fn prepare(&self, geometry: &Geometry) -> Result<Snapshot, ArborError> {
        let extraction = self.config.extraction();
        let stats = geometry.stats();
        info!(stats:%; "Starting extraction");

        if geometry.detections.is_empty() {
            return Err(ArborError::NoGeometryFound);
        }

        let nodes = normalize::normalize(&geometry.detections);
        if nodes.is_empty() {
            return Err(ArborError::NoNodesExtracted { stats });
        }

        let levels = level::LevelMap::classify(
            &nodes,
            extraction.level_tolerance(),
            extraction.orientation(),
        );
        if levels.is_empty() {
            return Err(ArborError::NoLevelsFound);
        }

        let candidates = edge::match_strokes(
            &nodes,
            &geometry.strokes,
            extraction.connection_tolerance(),
            extraction.orientation(),
        );
        debug!(
            nodes = nodes.len(),
            levels = levels.len(),
            candidates = candidates.len();
            "Prepared extraction"
        );

        Ok(Snapshot::new(nodes, levels, candidates))
    }

    /// Resolves parents and builds the tree.
    fn assemble(&self, snapshot: &Snapshot, root: Option<NodeId>) -> Result<Hierarchy, ArborError> {
        let extraction = self.config.extraction();
        let map = resolve::resolve_parents(
            snapshot.candidates(),
            snapshot.nodes(),
            snapshot.levels(),
            extraction.resolver(),
        );
        HierarchyBuilder::new(snapshot.nodes(), snapshot.levels(), extraction.builder())
            .build(root, &map)
    }
}
