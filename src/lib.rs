#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-bisect
//!
//! mesh-bisect orients conforming tetrahedral meshes for newest-vertex
//! bisection. It reorders each element's local vertices and assigns an
//! element type so that every pair of elements sharing a face splits that
//! face along the same refinement edge, in either the Stevenson or the
//! ALBERTA local numbering.
//!
//! ## Features
//! - Face adjacency index with non-manifold detection (optionally built with Rayon)
//! - Two orientation strategies: type-0 front propagation with a global vertex
//!   priority, and type-1 fixed-vertex orientation
//! - Weak and strong (reflected-neighbour) compatibility certification
//! - Pluggable vertex classification for auxiliary vertices
//!
//! ## Determinism
//!
//! The only randomized decision (the `Random` vertex classifier) draws from a
//! `SmallRng` seeded by [`config::OrientationConfig::rng_seed`], so runs are
//! reproducible. Everything else is a deterministic function of the input
//! element order.
//!
//! ## Usage
//!
//! ```
//! use mesh_bisect::prelude::*;
//!
//! let mesh = TetMesh::new(5, [[0, 1, 2, 3], [1, 2, 3, 4]], Numbering::Stevenson)?;
//! let outcome = orient(&mesh, &OrientationConfig::default(), OrientationStrategy::Type0)?;
//! let oriented = outcome.compatible().expect("two tetrahedra always orient");
//! assert_eq!(oriented.types(), vec![0, 0]);
//! # Ok::<(), MeshBisectError>(())
//! ```

pub mod algs;
pub mod config;
pub mod debug_invariants;
pub mod mesh_error;
pub mod topology;

pub mod prelude {
    //! Common types and entry points.
    pub use crate::algs::classify::{VertexPartition, classify_vertices};
    pub use crate::algs::compatibility::{
        StrongCompatibilityReport, faces_agree, first_incompatible_face, refinement_edge,
        strong_check, strongly_agree, weak_check,
    };
    pub use crate::algs::orient::{
        OrientationOutcome, OrientationStrategy, OrientedMesh, StrategyFailure, orient,
    };
    pub use crate::algs::type0::orient_type0;
    pub use crate::algs::type1::orient_type1;
    pub use crate::config::{ClassifierVariant, OrientationConfig};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshBisectError;
    pub use crate::topology::adjacency::{ElementPair, FaceAdjacency};
    pub use crate::topology::face::{EdgeKey, FaceKey};
    pub use crate::topology::numbering::Numbering;
    pub use crate::topology::tetra::{ElementId, TetMesh, Tetrahedron, VertexId};
}
