//! Local vertex numbering conventions for bisection.
//!
//! Two conventions are supported:
//!
//! * [`Numbering::Stevenson`]: the refinement edge of an element
//!   `(x0, x1, x2, x3)` is `x0 x3` (Stevenson / Maubach ordering).
//! * [`Numbering::Alberta`]: the refinement edge is `x0 x1` (ALBERTA / DUNE
//!   ordering).
//!
//! Converting between them swaps local slots 1 and 3, which is a single
//! transposition and therefore flips the element orientation flag.
//!
//! Local face `i` is the face opposite local vertex `3 - i`:
//! face 0 = {v0,v1,v2}, face 1 = {v0,v1,v3}, face 2 = {v0,v2,v3},
//! face 3 = {v1,v2,v3}.

use serde::{Deserialize, Serialize};

/// Local numbering convention of element vertices.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Numbering {
    /// Refinement edge between local slots 0 and 3.
    #[default]
    Stevenson,
    /// Refinement edge between local slots 0 and 1.
    Alberta,
}

/// Slots of the refinement edge on each face, indexed `[type class][face]`
/// where type class 0 is type 0 and class 1 covers types 1 and 2.
type FaceEdgeTable = [[[usize; 2]; 4]; 2];

const STEVENSON_FACE_EDGES: FaceEdgeTable = [
    [[0, 2], [0, 3], [0, 3], [1, 3]],
    [[0, 2], [0, 3], [0, 3], [2, 3]],
];

const ALBERTA_FACE_EDGES: FaceEdgeTable = [
    [[0, 1], [0, 1], [0, 2], [1, 3]],
    [[0, 1], [0, 1], [0, 2], [1, 2]],
];

impl Numbering {
    /// The other convention.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Numbering::Stevenson => Numbering::Alberta,
            Numbering::Alberta => Numbering::Stevenson,
        }
    }

    /// Local slots of the element refinement edge.
    #[inline]
    pub fn type0_nodes(self) -> [usize; 2] {
        match self {
            Numbering::Stevenson => [0, 3],
            Numbering::Alberta => [0, 1],
        }
    }

    /// Local faces opposite the refinement edge endpoints, in the same order
    /// as [`Numbering::type0_nodes`].
    #[inline]
    pub fn type0_faces(self) -> [usize; 2] {
        let [a, b] = self.type0_nodes();
        [3 - a, 3 - b]
    }

    /// Local slot of the vertex that never lies on a face refinement edge of
    /// a type-1 element.
    #[inline]
    pub fn type1_node(self) -> usize {
        match self {
            Numbering::Stevenson => 1,
            Numbering::Alberta => 3,
        }
    }

    /// Local face opposite [`Numbering::type1_node`].
    #[inline]
    pub fn type1_face(self) -> usize {
        3 - self.type1_node()
    }

    /// Local slots of the refinement edge of face `face` for an element of
    /// type `tet_type`. Any non-zero type uses the type-1/2 row.
    ///
    /// # Panics
    /// Panics if `face > 3`.
    #[inline]
    pub fn face_edge_slots(self, face: usize, tet_type: u8) -> [usize; 2] {
        let class = usize::from(tet_type != 0);
        match self {
            Numbering::Stevenson => STEVENSON_FACE_EDGES[class][face],
            Numbering::Alberta => ALBERTA_FACE_EDGES[class][face],
        }
    }
}

/// Local vertex slots spanning face `face`, ascending.
///
/// # Panics
/// Panics if `face > 3`.
#[inline]
pub const fn face_slots(face: usize) -> [usize; 3] {
    const FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    FACES[face]
}

/// Local vertex slot not contained in face `face`.
#[inline]
pub const fn opposite_node(face: usize) -> usize {
    3 - face
}
