//! MeshBisectError: Unified error type for mesh-bisect public APIs
//!
//! Fatal topological conditions are reported through this type with the
//! offending face or element ids attached.
//!
//! A *strategy failure* of the type-1 orienter is **not** an error; see
//! [`crate::algs::orient::OrientationOutcome`].

use thiserror::Error;

use crate::topology::face::FaceKey;
use crate::topology::tetra::{ElementId, VertexId};

/// Unified error type for mesh-bisect operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshBisectError {
    /// A face is shared by more than two elements (non-manifold mesh).
    #[error("Topology error: face {face} is shared by more than two elements {elements:?}")]
    NonManifoldFace {
        face: FaceKey,
        elements: [ElementId; 3],
    },
    /// The propagation front emptied before every element was reached.
    #[error(
        "Topology error: front exhausted after visiting {visited} of {total} elements \
         (disconnected mesh or corrupt adjacency)"
    )]
    FrontExhausted { visited: usize, total: usize },
    /// An element carries a type tag outside `{0,1,2}`.
    #[error("Element {element} has invalid type tag {tet_type} (expected 0, 1 or 2)")]
    InvalidElementType { element: ElementId, tet_type: u8 },
    /// An element references a vertex id outside `[0, n_vertices)`.
    #[error("Element {element} references vertex {vertex}, but the mesh has {n_vertices} vertices")]
    VertexOutOfRange {
        element: ElementId,
        vertex: VertexId,
        n_vertices: usize,
    },
    /// An element lists the same vertex twice.
    #[error("Element {element} is degenerate: repeated vertex in {vertices:?}")]
    DegenerateElement {
        element: ElementId,
        vertices: [VertexId; 4],
    },
    /// A face key was looked up in an element that does not contain it.
    #[error("Face {face} is not a face of element {element}")]
    FaceNotInElement { face: FaceKey, element: ElementId },
    /// A face key of the mesh is missing from the adjacency index.
    #[error("Face {face} of element {element} is missing from the adjacency index")]
    MissingFace { face: FaceKey, element: ElementId },
    /// The adjacency index is internally inconsistent.
    #[error("Adjacency error: {0}")]
    InvalidAdjacency(String),
    /// The vertex priority chain is internally inconsistent.
    #[error("Priority chain error: {0}")]
    InvalidPriorityChain(String),
}
