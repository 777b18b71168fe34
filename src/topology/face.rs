//! Canonical face and edge keys.
//!
//! A face is identified by its three vertex ids sorted ascending, an edge by
//! its two vertex ids sorted ascending. Both are plain `Copy` values usable
//! as hash-map keys; they carry no orientation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::topology::tetra::VertexId;

/// Unordered triangle, stored sorted ascending.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct FaceKey([VertexId; 3]);

impl FaceKey {
    /// Builds the canonical key of the triangle spanned by `vertices`.
    #[inline]
    pub fn new(mut vertices: [VertexId; 3]) -> Self {
        vertices.sort_unstable();
        FaceKey(vertices)
    }

    /// Sorted vertex ids.
    #[inline]
    pub const fn vertices(&self) -> [VertexId; 3] {
        self.0
    }

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.0.contains(&v)
    }
}

impl fmt::Debug for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FaceKey").field(&self.0).finish()
    }
}

/// Prints as `(a, b, c)`.
impl fmt::Display for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}

/// Unordered edge, stored sorted ascending.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct EdgeKey([VertexId; 2]);

impl EdgeKey {
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b { EdgeKey([a, b]) } else { EdgeKey([b, a]) }
    }

    #[inline]
    pub const fn vertices(&self) -> [VertexId; 2] {
        self.0
    }
}

impl fmt::Debug for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EdgeKey").field(&self.0).finish()
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0[0], self.0[1])
    }
}
