//! Face → incident-element index of a tetrahedral mesh.
//!
//! Every triangular face of the mesh maps to the pair of elements sharing it.
//! A pair `(e, e)` marks a boundary face. A face claimed by a third element
//! makes the mesh non-manifold and aborts the build with
//! [`MeshBisectError::NonManifoldFace`].
//!
//! Pairs are always stored as `(lower id, higher id)`, which makes the serial
//! and the parallel (`rayon` feature) builds produce identical indices.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshBisectError;
use crate::topology::face::FaceKey;
use crate::topology::tetra::{ElementId, TetMesh, Tetrahedron};

/// Pair of elements incident to one face; equal ids mean boundary.
pub type ElementPair = (ElementId, ElementId);

/// Face adjacency of a tetrahedral mesh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceAdjacency {
    faces: HashMap<FaceKey, ElementPair>,
}

impl FaceAdjacency {
    /// Builds the index for `mesh`.
    pub fn build(mesh: &TetMesh) -> Result<Self, MeshBisectError> {
        Self::from_elements(mesh.elements())
    }

    /// Builds the index from an element slice; element ids are positions.
    pub fn from_elements(elements: &[Tetrahedron]) -> Result<Self, MeshBisectError> {
        let mut adj = Self {
            faces: HashMap::with_capacity(elements.len() * 2 + 4),
        };
        for (id, el) in elements.iter().enumerate() {
            for face in el.faces() {
                adj.insert(face, id)?;
            }
        }
        log::debug!(
            "face adjacency: {} faces ({} boundary) over {} elements",
            adj.len(),
            adj.boundary_count(),
            elements.len()
        );
        Ok(adj)
    }

    /// Parallel build: every element emits its four faces independently,
    /// then a sort-and-merge pass groups them by key.
    #[cfg(feature = "rayon")]
    pub fn build_parallel(mesh: &TetMesh) -> Result<Self, MeshBisectError> {
        use rayon::prelude::*;

        let mut incidences: Vec<(FaceKey, ElementId)> = mesh
            .elements()
            .par_iter()
            .enumerate()
            .flat_map_iter(|(id, el)| el.faces().into_iter().map(move |f| (f, id)))
            .collect();
        incidences.par_sort_unstable();

        let mut faces = HashMap::with_capacity(incidences.len() / 2 + 4);
        for group in incidences.chunk_by(|a, b| a.0 == b.0) {
            let face = group[0].0;
            match group {
                &[(_, a)] => {
                    faces.insert(face, (a, a));
                }
                &[(_, a), (_, b)] => {
                    faces.insert(face, (a, b));
                }
                &[(_, a), (_, b), (_, c), ..] => {
                    return Err(MeshBisectError::NonManifoldFace {
                        face,
                        elements: [a, b, c],
                    });
                }
                &[] => {}
            }
        }
        Ok(Self { faces })
    }

    fn insert(&mut self, face: FaceKey, id: ElementId) -> Result<(), MeshBisectError> {
        match self.faces.entry(face) {
            Entry::Vacant(slot) => {
                slot.insert((id, id));
            }
            Entry::Occupied(mut slot) => {
                let (a, b) = *slot.get();
                if a == b && a != id {
                    *slot.get_mut() = (a.min(id), a.max(id));
                } else if a != id && b != id {
                    return Err(MeshBisectError::NonManifoldFace {
                        face,
                        elements: [a, b, id],
                    });
                }
            }
        }
        Ok(())
    }

    /// Incident pair of `face`.
    #[inline]
    pub fn get(&self, face: &FaceKey) -> Option<ElementPair> {
        self.faces.get(face).copied()
    }

    /// The element across `face` from `element`; `None` on the boundary or if
    /// `face` is unknown.
    pub fn neighbor(&self, face: &FaceKey, element: ElementId) -> Option<ElementId> {
        let (a, b) = self.get(face)?;
        if a == b {
            None
        } else if a == element {
            Some(b)
        } else {
            Some(a)
        }
    }

    #[inline]
    pub fn is_boundary(&self, face: &FaceKey) -> bool {
        matches!(self.get(face), Some((a, b)) if a == b)
    }

    /// Number of distinct faces.
    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn boundary_count(&self) -> usize {
        self.faces.values().filter(|(a, b)| a == b).count()
    }

    pub fn interior_count(&self) -> usize {
        self.len() - self.boundary_count()
    }

    /// All entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&FaceKey, &ElementPair)> + '_ {
        self.faces.iter()
    }

    /// All entries sorted by face key.
    pub fn sorted(&self) -> Vec<(FaceKey, ElementPair)> {
        let mut out: Vec<_> = self.faces.iter().map(|(f, p)| (*f, *p)).collect();
        out.sort_unstable();
        out
    }

    /// Interior faces sorted by key.
    pub fn interior_faces(&self) -> Vec<(FaceKey, ElementPair)> {
        let mut out = self.sorted();
        out.retain(|(_, (a, b))| a != b);
        out
    }

    /// Boundary faces sorted by key.
    pub fn boundary_faces(&self) -> Vec<FaceKey> {
        self.sorted()
            .into_iter()
            .filter_map(|(f, (a, b))| (a == b).then_some(f))
            .collect()
    }

    /// Per-vertex flag: does the vertex lie on a boundary face?
    pub fn boundary_vertices(&self, n_vertices: usize) -> Vec<bool> {
        let mut on_boundary = vec![false; n_vertices];
        for (face, (a, b)) in &self.faces {
            if a == b {
                for v in face.vertices() {
                    if let Some(flag) = on_boundary.get_mut(v) {
                        *flag = true;
                    }
                }
            }
        }
        on_boundary
    }

    /// Checks that every entry's elements actually contain the face.
    pub fn validate_against(&self, mesh: &TetMesh) -> Result<(), MeshBisectError> {
        self.validate_invariants()?;
        for (face, &(a, b)) in &self.faces {
            for element in [a, b] {
                let contains = element < mesh.len()
                    && mesh.element(element).face_index(face).is_some();
                if !contains {
                    return Err(MeshBisectError::FaceNotInElement {
                        face: *face,
                        element,
                    });
                }
            }
        }
        Ok(())
    }
}

impl DebugInvariants for FaceAdjacency {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "FaceAdjacency");
    }

    fn validate_invariants(&self) -> Result<(), MeshBisectError> {
        for (face, &(a, b)) in &self.faces {
            if a > b {
                return Err(MeshBisectError::InvalidAdjacency(format!(
                    "pair ({a}, {b}) of face {face} is not ordered"
                )));
            }
        }
        Ok(())
    }
}
