//! Orientation configuration.
//!
//! All tunables of the orientation pipeline live in one immutable
//! [`OrientationConfig`] value handed to the driver and the orienters; there
//! is no process-wide state. The type derives `serde` so drivers can load it
//! from JSON/TOML, with every field optional.

use serde::{Deserialize, Serialize};

/// Heuristic used to split vertices into base (V0) and auxiliary (V1) sets.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierVariant {
    /// Every vertex is a base vertex.
    #[default]
    Default,
    /// Base iff the vertex is a refinement-edge endpoint of at least
    /// `threshold` elements.
    RefinementEdgeCount,
    /// Base iff the vertex has at least `threshold` incident elements
    /// (`threshold / 2` for boundary vertices).
    AdjacencyCount,
    /// Independent coin flip per vertex, seeded by `rng_seed`.
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    pub variant: ClassifierVariant,
    pub threshold: usize,
    /// Insert a new vertex beyond the refinement edge of the neighbour when
    /// both interior vertices are refinement-edge endpoints (type-0 orienter).
    pub use_announced_edge: bool,
    pub rng_seed: u64,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            variant: ClassifierVariant::Default,
            threshold: 3,
            use_announced_edge: true,
            rng_seed: 42,
        }
    }
}

impl OrientationConfig {
    pub fn with_variant(mut self, variant: ClassifierVariant, threshold: usize) -> Self {
        self.variant = variant;
        self.threshold = threshold;
        self
    }

    pub fn with_announced_edge(mut self, enabled: bool) -> Self {
        self.use_announced_edge = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }
}
