//! Configuration types for hierarchy extraction.
//!
//! This module provides the configuration structures that control how the
//! engine quantizes levels, matches connectors, resolves competing parents
//! and validates the traversal. All types implement [`serde::Deserialize`]
//! for loading from external sources, and every field falls back to its
//! default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`ExtractionConfig`] - Orientation, tolerances and timeout.
//! - [`ResolverConfig`] - Parent replacement thresholds.
//! - [`BuilderConfig`] - Depth limit and deep-level heuristics of the traversal.
//!
//! The resolver and deep-level thresholds are empirical. They are exposed
//! here so they can be calibrated against real layouts.
//!
//! # Example
//!
//! ```
//! # use arbor::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.extraction().level_tolerance(), 20.0);
//! assert_eq!(config.extraction().builder().max_levels(), 8);
//! ```

use std::time::Duration;

use serde::Deserialize;

use arbor_core::orientation::Orientation;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Extraction configuration section.
    #[serde(default)]
    extraction: ExtractionConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified extraction settings.
    pub fn new(extraction: ExtractionConfig) -> Self {
        Self { extraction }
    }

    /// Returns the extraction configuration.
    pub fn extraction(&self) -> &ExtractionConfig {
        &self.extraction
    }
}

/// Settings shared by every stage of an extraction pass.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Which canvas axis encodes hierarchy depth.
    orientation: Orientation,

    /// Quantization step for level bucketing.
    level_tolerance: f32,

    /// Maximum distance between a connector endpoint and a connection point.
    connection_tolerance: f32,

    /// How long a caller waits for a pass before giving up.
    timeout_secs: u64,

    resolver: ResolverConfig,

    builder: BuilderConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            level_tolerance: 20.0,
            connection_tolerance: 60.0,
            timeout_secs: 90,
            resolver: ResolverConfig::default(),
            builder: BuilderConfig::default(),
        }
    }
}

impl ExtractionConfig {
    /// Returns a copy using the given orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Returns a copy using the given builder settings.
    pub fn with_builder(mut self, builder: BuilderConfig) -> Self {
        self.builder = builder;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn level_tolerance(&self) -> f32 {
        self.level_tolerance
    }

    pub fn connection_tolerance(&self) -> f32 {
        self.connection_tolerance
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn resolver(&self) -> &ResolverConfig {
        &self.resolver
    }

    pub fn builder(&self) -> &BuilderConfig {
        &self.builder
    }
}

/// Thresholds deciding when a later candidate parent displaces an earlier one.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Primary-axis distance difference above which the closer parent wins.
    axis_gap: f32,

    /// Secondary-axis distance difference above which the closer parent wins.
    secondary_gap: f32,

    /// First parent level index treated as deep.
    deep_level: usize,

    /// At deep levels a new parent must be closer than this fraction of the
    /// current parent's primary-axis distance.
    deep_factor: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            axis_gap: 50.0,
            secondary_gap: 30.0,
            deep_level: 5,
            deep_factor: 0.8,
        }
    }
}

impl ResolverConfig {
    pub fn axis_gap(&self) -> f32 {
        self.axis_gap
    }

    pub fn secondary_gap(&self) -> f32 {
        self.secondary_gap
    }

    pub fn deep_level(&self) -> usize {
        self.deep_level
    }

    pub fn deep_factor(&self) -> f32 {
        self.deep_factor
    }
}

/// Limits applied while traversing the resolved parent/child map.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Number of levels kept, root included. Deeper nodes are truncated.
    max_levels: usize,

    /// Parent level from which the extra deep-level checks apply.
    deep_level: usize,

    /// Parent level from which the relaxed deep-level limits apply.
    deeper_level: usize,

    /// Hop limit of the ancestor walk used to detect cycles.
    cycle_probe_hops: usize,

    min_axis_gap: f32,
    deeper_min_axis_gap: f32,
    max_secondary_gap: f32,
    deeper_max_secondary_gap: f32,
    max_children: usize,
    deeper_max_children: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_levels: 8,
            deep_level: 5,
            deeper_level: 6,
            cycle_probe_hops: 15,
            min_axis_gap: 20.0,
            deeper_min_axis_gap: 15.0,
            max_secondary_gap: 300.0,
            deeper_max_secondary_gap: 400.0,
            max_children: 30,
            deeper_max_children: 40,
        }
    }
}

impl BuilderConfig {
    /// Returns a copy keeping at most `max_levels` levels.
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }

    /// Returns a copy with both fan-out caps set.
    pub fn with_max_children(mut self, max_children: usize, deeper_max_children: usize) -> Self {
        self.max_children = max_children;
        self.deeper_max_children = deeper_max_children;
        self
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    pub fn deep_level(&self) -> usize {
        self.deep_level
    }

    pub fn cycle_probe_hops(&self) -> usize {
        self.cycle_probe_hops
    }

    /// Minimum primary-axis gap between a deep parent at `level` and its child.
    pub fn min_axis_gap(&self, level: usize) -> f32 {
        if level >= self.deeper_level {
            self.deeper_min_axis_gap
        } else {
            self.min_axis_gap
        }
    }

    /// Maximum secondary-axis gap between a deep parent at `level` and its child.
    pub fn max_secondary_gap(&self, level: usize) -> f32 {
        if level >= self.deeper_level {
            self.deeper_max_secondary_gap
        } else {
            self.max_secondary_gap
        }
    }

    /// Maximum number of children a deep parent at `level` may have.
    pub fn max_children(&self, level: usize) -> usize {
        if level >= self.deeper_level {
            self.deeper_max_children
        } else {
            self.max_children
        }
    }
}
