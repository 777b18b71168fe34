//! Base / auxiliary vertex partition (V0 / V1).
//!
//! The type-0 orienter pushes elements away from type 0 according to how many
//! of their vertices are auxiliary. The partition is computed once, before
//! orientation, by one of the [`ClassifierVariant`] heuristics.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{ClassifierVariant, OrientationConfig};
use crate::topology::adjacency::FaceAdjacency;
use crate::topology::tetra::{TetMesh, VertexId};

/// Per-vertex membership in the base set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexPartition {
    in_base_set: Vec<bool>,
}

impl VertexPartition {
    /// Every vertex in the base set.
    pub fn all_base(n_vertices: usize) -> Self {
        Self {
            in_base_set: vec![true; n_vertices],
        }
    }

    pub fn from_flags(in_base_set: Vec<bool>) -> Self {
        Self { in_base_set }
    }

    /// Vertices outside the partition's range count as base vertices.
    #[inline]
    pub fn is_base(&self, v: VertexId) -> bool {
        self.in_base_set.get(v).copied().unwrap_or(true)
    }

    #[inline]
    pub fn is_auxiliary(&self, v: VertexId) -> bool {
        !self.is_base(v)
    }

    pub fn auxiliary_count(&self) -> usize {
        self.in_base_set.iter().filter(|&&b| !b).count()
    }

    pub fn len(&self) -> usize {
        self.in_base_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_base_set.is_empty()
    }

    pub fn as_flags(&self) -> &[bool] {
        &self.in_base_set
    }
}

/// Classify the vertices of `mesh` according to `config.variant`.
pub fn classify_vertices(
    mesh: &TetMesh,
    adjacency: &FaceAdjacency,
    config: &OrientationConfig,
) -> VertexPartition {
    let n = mesh.n_vertices();
    let threshold = config.threshold;
    let partition = match config.variant {
        ClassifierVariant::Default => VertexPartition::all_base(n),
        ClassifierVariant::RefinementEdgeCount => {
            let [a, b] = mesh.numbering().type0_nodes();
            let mut count = vec![0usize; n];
            for el in mesh.elements() {
                count[el.vertex(a)] += 1;
                count[el.vertex(b)] += 1;
            }
            VertexPartition::from_flags(count.into_iter().map(|c| c >= threshold).collect())
        }
        ClassifierVariant::AdjacencyCount => {
            let mut count = vec![0usize; n];
            for el in mesh.elements() {
                for v in el.vertices() {
                    count[v] += 1;
                }
            }
            let on_boundary = adjacency.boundary_vertices(n);
            VertexPartition::from_flags(
                count
                    .into_iter()
                    .zip(on_boundary)
                    .map(|(c, boundary)| {
                        let needed = if boundary { threshold / 2 } else { threshold };
                        c >= needed
                    })
                    .collect(),
            )
        }
        ClassifierVariant::Random => {
            let mut rng = SmallRng::seed_from_u64(config.rng_seed);
            VertexPartition::from_flags((0..n).map(|_| rng.gen_bool(0.5)).collect())
        }
    };
    log::debug!(
        "vertex classification {:?}: {} of {} vertices auxiliary",
        config.variant,
        partition.auxiliary_count(),
        n
    );
    partition
}
