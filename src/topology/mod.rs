//! Mesh topology: elements, local numbering conventions, face keys and the
//! face-to-element adjacency index.

pub mod adjacency;
pub mod face;
pub mod numbering;
pub mod tetra;

pub use adjacency::{ElementPair, FaceAdjacency};
pub use face::{EdgeKey, FaceKey};
pub use numbering::Numbering;
pub use tetra::{ElementId, TetMesh, Tetrahedron, VertexId};
