//! Tetrahedral elements and the element arena.
//!
//! A [`Tetrahedron`] is an ordered 4-tuple of global vertex ids together with
//! an orientation parity bit and a bisection type tag. All reordering of the
//! local slots goes through [`Tetrahedron::swap_slots`] so the parity bit
//! always equals the parity of the effective transpositions applied since
//! construction.
//!
//! [`TetMesh`] owns the dense element array; an element id is its index.

use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshBisectError;
use crate::topology::face::FaceKey;
use crate::topology::numbering::{Numbering, face_slots};

/// Dense global vertex index.
pub type VertexId = usize;
/// Dense element index (position in the element array).
pub type ElementId = usize;

/// One tetrahedron: local vertex order, orientation parity and type tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tetrahedron {
    vertices: [VertexId; 4],
    orientation: bool,
    tet_type: u8,
}

impl Tetrahedron {
    /// New element with even orientation parity and type 0.
    #[inline]
    pub fn new(vertices: [VertexId; 4]) -> Self {
        Self {
            vertices,
            orientation: false,
            tet_type: 0,
        }
    }

    #[inline]
    pub fn vertices(&self) -> [VertexId; 4] {
        self.vertices
    }

    #[inline]
    pub fn vertex(&self, slot: usize) -> VertexId {
        self.vertices[slot]
    }

    /// Parity of the effective slot swaps applied so far (`true` = odd).
    #[inline]
    pub fn orientation(&self) -> bool {
        self.orientation
    }

    #[inline]
    pub fn tet_type(&self) -> u8 {
        self.tet_type
    }

    /// Overwrites the type tag. Only `0..=2` is meaningful; anything else is
    /// reported as [`MeshBisectError::InvalidElementType`] by the strong check.
    #[inline]
    pub fn set_type(&mut self, tet_type: u8) {
        self.tet_type = tet_type;
    }

    /// Canonical key of local face `face` (opposite slot `3 - face`).
    #[inline]
    pub fn face(&self, face: usize) -> FaceKey {
        let [a, b, c] = face_slots(face);
        FaceKey::new([self.vertices[a], self.vertices[b], self.vertices[c]])
    }

    /// Keys of all four local faces, indexed by local face number.
    #[inline]
    pub fn faces(&self) -> [FaceKey; 4] {
        [self.face(0), self.face(1), self.face(2), self.face(3)]
    }

    /// Local face number of `face`, if it belongs to this element.
    pub fn face_index(&self, face: &FaceKey) -> Option<usize> {
        (0..4).find(|&i| self.face(i) == *face)
    }

    /// Local slot holding vertex `v`.
    #[inline]
    pub fn slot_of(&self, v: VertexId) -> Option<usize> {
        self.vertices.iter().position(|&w| w == v)
    }

    /// Swap two local slots. Returns `true` and flips the orientation bit if
    /// the swap actually exchanged two different vertices.
    #[inline]
    pub fn swap_slots(&mut self, a: usize, b: usize) -> bool {
        if a == b || self.vertices[a] == self.vertices[b] {
            return false;
        }
        self.vertices.swap(a, b);
        self.orientation = !self.orientation;
        true
    }

    /// Reorders the local slots so that `vertices() == target`, using
    /// transpositions. Returns `true` if the overall parity changed.
    ///
    /// `target` must be a permutation of the current vertices.
    pub fn permute_to(&mut self, target: [VertexId; 4]) -> bool {
        debug_assert!(
            {
                let mut a = self.vertices;
                let mut b = target;
                a.sort_unstable();
                b.sort_unstable();
                a == b
            },
            "permute_to target {target:?} is not a permutation of {:?}",
            self.vertices
        );
        let before = self.orientation;
        for i in 0..4 {
            if self.vertices[i] == target[i] {
                continue;
            }
            if let Some(j) = (i + 1..4).find(|&j| self.vertices[j] == target[i]) {
                self.swap_slots(i, j);
            }
        }
        before != self.orientation
    }

    /// Cyclically permutes the three slots other than `fixed`
    /// (`s0 <- s1 <- s2 <- s0` over the ascending free slots). A 3-cycle is
    /// even, so the orientation bit is unchanged.
    pub fn rotate_around(&mut self, fixed: usize) {
        let mut free = [0usize; 3];
        let mut k = 0;
        for slot in 0..4 {
            if slot != fixed {
                free[k] = slot;
                k += 1;
            }
        }
        self.swap_slots(free[0], free[1]);
        self.swap_slots(free[1], free[2]);
    }

    /// Moves the vertex at `from` into slot `to` with two transpositions
    /// (the second one exchanges the two uninvolved slots), keeping the
    /// orientation bit unchanged.
    pub fn move_slot_even(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        self.swap_slots(from, to);
        let mut rest = (0..4).filter(|&s| s != from && s != to);
        if let (Some(a), Some(b)) = (rest.next(), rest.next()) {
            self.swap_slots(a, b);
        }
    }

    /// Swap slots 1 and 3: Stevenson <-> ALBERTA numbering.
    #[inline]
    pub fn toggle_numbering(&mut self) {
        self.swap_slots(1, 3);
    }
}

/// The element arena of an oriented or unoriented tetrahedral mesh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TetMesh {
    n_vertices: usize,
    elements: Vec<Tetrahedron>,
    numbering: Numbering,
}

impl TetMesh {
    /// Build a mesh from raw vertex 4-tuples.
    ///
    /// Fails if an element references a vertex outside `[0, n_vertices)` or
    /// repeats a vertex.
    pub fn new(
        n_vertices: usize,
        cells: impl IntoIterator<Item = [VertexId; 4]>,
        numbering: Numbering,
    ) -> Result<Self, MeshBisectError> {
        let elements: Vec<Tetrahedron> = cells.into_iter().map(Tetrahedron::new).collect();
        let mesh = Self {
            n_vertices,
            elements,
            numbering,
        };
        mesh.validate_invariants()?;
        Ok(mesh)
    }

    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.n_vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn numbering(&self) -> Numbering {
        self.numbering
    }

    #[inline]
    pub fn elements(&self) -> &[Tetrahedron] {
        &self.elements
    }

    #[inline]
    pub fn element(&self, id: ElementId) -> &Tetrahedron {
        &self.elements[id]
    }

    #[inline]
    pub fn element_mut(&mut self, id: ElementId) -> &mut Tetrahedron {
        &mut self.elements[id]
    }

    /// Per-element vertex tuples in the current local order.
    pub fn cells(&self) -> Vec<[VertexId; 4]> {
        self.elements.iter().map(Tetrahedron::vertices).collect()
    }

    pub fn orientations(&self) -> Vec<bool> {
        self.elements.iter().map(Tetrahedron::orientation).collect()
    }

    pub fn types(&self) -> Vec<u8> {
        self.elements.iter().map(Tetrahedron::tet_type).collect()
    }

    /// Sets every type tag to `tet_type`.
    pub fn set_all_types(&mut self, tet_type: u8) {
        for el in &mut self.elements {
            el.set_type(tet_type);
        }
    }

    /// Toggle every element between the two numbering conventions.
    /// Applying it twice restores the mesh exactly.
    pub fn convert_numbering(&mut self) {
        for el in &mut self.elements {
            el.toggle_numbering();
        }
        self.numbering = self.numbering.toggled();
    }

    /// Convert to `target` if the mesh is not already in it.
    pub fn to_numbering(&mut self, target: Numbering) {
        if self.numbering != target {
            self.convert_numbering();
        }
    }
}

impl DebugInvariants for TetMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "TetMesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshBisectError> {
        for (element, el) in self.elements.iter().enumerate() {
            let vertices = el.vertices();
            if let Some(&vertex) = vertices.iter().find(|&&v| v >= self.n_vertices) {
                return Err(MeshBisectError::VertexOutOfRange {
                    element,
                    vertex,
                    n_vertices: self.n_vertices,
                });
            }
            let mut sorted = vertices;
            sorted.sort_unstable();
            if sorted.windows(2).any(|w| w[0] == w[1]) {
                return Err(MeshBisectError::DegenerateElement { element, vertices });
            }
            if el.tet_type() > 2 {
                return Err(MeshBisectError::InvalidElementType {
                    element,
                    tet_type: el.tet_type(),
                });
            }
        }
        Ok(())
    }
}
