//! Orientation driver: adjacency, classification, strategy, certification.
//!
//! The two orienters are independent pure functions returning an
//! [`OrientationOutcome`]. Choosing between them, and falling back from the
//! type-1 strategy to the type-0 strategy, happens here and nowhere else.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algs::classify::classify_vertices;
use crate::algs::compatibility::{StrongCompatibilityReport, strong_check};
use crate::algs::type0::orient_type0;
use crate::algs::type1::orient_type1;
use crate::config::OrientationConfig;
use crate::mesh_error::MeshBisectError;
use crate::topology::adjacency::{ElementPair, FaceAdjacency};
use crate::topology::face::FaceKey;
use crate::topology::tetra::{TetMesh, Tetrahedron, VertexId};

/// Which orientation algorithm to run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrientationStrategy {
    /// Front propagation with a global vertex priority; type 0 elements.
    #[default]
    Type0,
    /// Fixed interior vertex per element; type 1 elements.
    Type1,
    /// Try [`OrientationStrategy::Type1`], fall back to
    /// [`OrientationStrategy::Type0`] if it fails.
    Type1WithFallback,
}

/// The face on which a strategy gave up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrategyFailure {
    pub strategy: OrientationStrategy,
    pub face: FaceKey,
    pub elements: ElementPair,
}

impl fmt::Display for StrategyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} orientation incompatible on face {} between elements {} and {}",
            self.strategy, self.face, self.elements.0, self.elements.1
        )
    }
}

/// Result of one orientation attempt. Incompatibility is an expected outcome,
/// not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrientationOutcome<T = TetMesh> {
    Compatible(T),
    Incompatible(StrategyFailure),
}

impl<T> OrientationOutcome<T> {
    pub fn is_compatible(&self) -> bool {
        matches!(self, OrientationOutcome::Compatible(_))
    }

    pub fn compatible(self) -> Option<T> {
        match self {
            OrientationOutcome::Compatible(t) => Some(t),
            OrientationOutcome::Incompatible(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&StrategyFailure> {
        match self {
            OrientationOutcome::Compatible(_) => None,
            OrientationOutcome::Incompatible(f) => Some(f),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OrientationOutcome<U> {
        match self {
            OrientationOutcome::Compatible(t) => OrientationOutcome::Compatible(f(t)),
            OrientationOutcome::Incompatible(e) => OrientationOutcome::Incompatible(e),
        }
    }
}

/// A certified, oriented mesh ready for the bisection engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrientedMesh {
    mesh: TetMesh,
    strategy: OrientationStrategy,
    report: StrongCompatibilityReport,
}

impl OrientedMesh {
    pub fn mesh(&self) -> &TetMesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> TetMesh {
        self.mesh
    }

    pub fn elements(&self) -> &[Tetrahedron] {
        self.mesh.elements()
    }

    pub fn cells(&self) -> Vec<[VertexId; 4]> {
        self.mesh.cells()
    }

    pub fn orientations(&self) -> Vec<bool> {
        self.mesh.orientations()
    }

    pub fn types(&self) -> Vec<u8> {
        self.mesh.types()
    }

    /// The strategy that produced this orientation (after any fallback).
    pub fn strategy_used(&self) -> OrientationStrategy {
        self.strategy
    }

    pub fn strong_report(&self) -> &StrongCompatibilityReport {
        &self.report
    }
}

/// Orient `mesh` with `strategy`, certify the result and return it in the
/// mesh's own numbering.
///
/// # Errors
/// Fatal topological problems: non-manifold faces, a disconnected mesh (for
/// the type-0 strategy), or invalid type tags found while certifying.
pub fn orient(
    mesh: &TetMesh,
    config: &OrientationConfig,
    strategy: OrientationStrategy,
) -> Result<OrientationOutcome<OrientedMesh>, MeshBisectError> {
    let adjacency = FaceAdjacency::build(mesh)?;
    let partition = classify_vertices(mesh, &adjacency, config);

    let (outcome, used) = match strategy {
        OrientationStrategy::Type0 => (
            orient_type0(mesh, &adjacency, &partition, config)?,
            OrientationStrategy::Type0,
        ),
        OrientationStrategy::Type1 => (orient_type1(mesh)?, OrientationStrategy::Type1),
        OrientationStrategy::Type1WithFallback => match orient_type1(mesh)? {
            OrientationOutcome::Compatible(m) => {
                (OrientationOutcome::Compatible(m), OrientationStrategy::Type1)
            }
            OrientationOutcome::Incompatible(failure) => {
                log::warn!("{failure}; falling back to type-0 orientation");
                (
                    orient_type0(mesh, &adjacency, &partition, config)?,
                    OrientationStrategy::Type0,
                )
            }
        },
    };

    match outcome {
        OrientationOutcome::Compatible(oriented) => {
            crate::debug_invariants!(
                crate::debug_invariants::validate_all(&[&adjacency, &oriented]),
                "orient"
            );
            let report = strong_check(&oriented, &adjacency)?;
            log::info!(
                "{used:?} orientation of {} elements: {} of {} faces boundary, \
                 {} strongly incompatible (per vertex max {}, min {})",
                oriented.len(),
                report.boundary_faces,
                report.total_faces,
                report.incompatible_faces,
                report.max_incompatible_per_vertex,
                report.min_incompatible_per_vertex
            );
            Ok(OrientationOutcome::Compatible(OrientedMesh {
                mesh: oriented,
                strategy: used,
                report,
            }))
        }
        OrientationOutcome::Incompatible(failure) => Ok(OrientationOutcome::Incompatible(failure)),
    }
}
