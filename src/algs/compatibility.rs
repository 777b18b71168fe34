//! Face compatibility of an oriented mesh.
//!
//! Each element induces, for each of its faces, the edge that recursive
//! bisection will split first inside that face (its *refinement edge*). Two
//! elements sharing a face are compatible when they induce the same edge on
//! it. Strong compatibility additionally requires the two elements to be
//! reflected neighbours, which keeps their bisection children compatible as
//! well.
//!
//! Pure read-only queries; nothing here mutates the mesh.

use crate::mesh_error::MeshBisectError;
use crate::topology::adjacency::{ElementPair, FaceAdjacency};
use crate::topology::face::{EdgeKey, FaceKey};
use crate::topology::numbering::{Numbering, opposite_node};
use crate::topology::tetra::{ElementId, TetMesh, Tetrahedron};

/// Refinement edge of local face `face` of `tet` under `numbering`, using
/// the element's own type tag.
#[inline]
pub fn refinement_edge(tet: &Tetrahedron, face: usize, numbering: Numbering) -> EdgeKey {
    let [a, b] = numbering.face_edge_slots(face, tet.tet_type());
    EdgeKey::new(tet.vertex(a), tet.vertex(b))
}

/// Refinement edge that element `element` induces on `face`, if the face
/// belongs to it.
pub fn face_refinement_edge(mesh: &TetMesh, element: ElementId, face: &FaceKey) -> Option<EdgeKey> {
    let tet = mesh.element(element);
    tet.face_index(face)
        .map(|local| refinement_edge(tet, local, mesh.numbering()))
}

/// Do both incident elements induce the same refinement edge on `face`?
/// Boundary faces always agree.
pub fn faces_agree(mesh: &TetMesh, face: &FaceKey, (a, b): ElementPair) -> bool {
    if a == b {
        return true;
    }
    match (
        face_refinement_edge(mesh, a, face),
        face_refinement_edge(mesh, b, face),
    ) {
        (Some(ea), Some(eb)) => ea == eb,
        _ => {
            debug_assert!(false, "face {face} not shared by elements {a} and {b}");
            false
        }
    }
}

fn checked_type(mesh: &TetMesh, element: ElementId) -> Result<u8, MeshBisectError> {
    let tet_type = mesh.element(element).tet_type();
    if tet_type > 2 {
        return Err(MeshBisectError::InvalidElementType { element, tet_type });
    }
    Ok(tet_type)
}

fn interior_node(mesh: &TetMesh, element: ElementId, face: &FaceKey) -> Result<usize, MeshBisectError> {
    mesh.element(element)
        .face_index(face)
        .map(opposite_node)
        .ok_or(MeshBisectError::FaceNotInElement {
            face: *face,
            element,
        })
}

/// Strong compatibility of `face`: the refinement edges agree and the two
/// elements are reflected neighbours.
///
/// With equal types, the interior vertices (the vertices not on `face`) must
/// sit in the same local slot, or in the two refinement-edge slots. With
/// types `t` and `t + 1 (mod 3)`, the type-`t` element's interior vertex must
/// sit on a refinement-edge slot and the other element's interior vertex on
/// the type-1 slot.
///
/// Fails with [`MeshBisectError::InvalidElementType`] if either element's
/// type tag is outside `{0,1,2}`.
pub fn strongly_agree(
    mesh: &TetMesh,
    face: &FaceKey,
    (a, b): ElementPair,
) -> Result<bool, MeshBisectError> {
    let ta = checked_type(mesh, a)?;
    let tb = checked_type(mesh, b)?;
    if a == b {
        return Ok(true);
    }
    if !faces_agree(mesh, face, (a, b)) {
        return Ok(false);
    }

    let numbering = mesh.numbering();
    let ends = numbering.type0_nodes();
    let node_a = interior_node(mesh, a, face)?;
    let node_b = interior_node(mesh, b, face)?;

    let reflected = if ta == tb {
        node_a == node_b || (ends.contains(&node_a) && ends.contains(&node_b))
    } else {
        // Distinct types in {0,1,2} are always cyclically adjacent; order the
        // pair so `lower` has type t and `upper` has type t + 1.
        let (lower, upper) = if tb == (ta + 1) % 3 {
            (node_a, node_b)
        } else {
            (node_b, node_a)
        };
        ends.contains(&lower) && upper == numbering.type1_node()
    };
    Ok(reflected)
}

/// AND of [`faces_agree`] over all interior faces.
pub fn weak_check(mesh: &TetMesh, adjacency: &FaceAdjacency) -> bool {
    adjacency
        .iter()
        .all(|(face, &pair)| faces_agree(mesh, face, pair))
}

/// The smallest (by key) interior face whose refinement edges disagree.
pub fn first_incompatible_face(
    mesh: &TetMesh,
    adjacency: &FaceAdjacency,
) -> Option<(FaceKey, ElementPair)> {
    adjacency
        .interior_faces()
        .into_iter()
        .find(|(face, pair)| !faces_agree(mesh, face, *pair))
}

/// Diagnostics of [`strong_check`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrongCompatibilityReport {
    /// Interior faces failing [`strongly_agree`].
    pub incompatible_faces: usize,
    pub boundary_faces: usize,
    pub total_faces: usize,
    /// Largest number of strongly incompatible faces around one vertex.
    pub max_incompatible_per_vertex: usize,
    /// Smallest such number over vertices used by at least one element.
    pub min_incompatible_per_vertex: usize,
}

impl StrongCompatibilityReport {
    pub fn is_strongly_compatible(&self) -> bool {
        self.incompatible_faces == 0
    }
}

/// Count faces failing [`strongly_agree`] and gather per-vertex aggregates.
pub fn strong_check(
    mesh: &TetMesh,
    adjacency: &FaceAdjacency,
) -> Result<StrongCompatibilityReport, MeshBisectError> {
    let n = mesh.n_vertices();
    let mut per_vertex = vec![0usize; n];
    let mut used = vec![false; n];
    for el in mesh.elements() {
        for v in el.vertices() {
            used[v] = true;
        }
    }

    let mut report = StrongCompatibilityReport {
        total_faces: adjacency.len(),
        ..Default::default()
    };
    for (face, &(a, b)) in adjacency.iter() {
        if a == b {
            report.boundary_faces += 1;
            checked_type(mesh, a)?;
            continue;
        }
        if !strongly_agree(mesh, face, (a, b))? {
            report.incompatible_faces += 1;
            for v in face.vertices() {
                per_vertex[v] += 1;
            }
        }
    }

    let counts = per_vertex
        .iter()
        .zip(&used)
        .filter_map(|(&c, &u)| u.then_some(c));
    report.max_incompatible_per_vertex = counts.clone().max().unwrap_or(0);
    report.min_incompatible_per_vertex = counts.min().unwrap_or(0);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single() -> TetMesh {
        TetMesh::new(4, [[0, 1, 2, 3]], Numbering::Stevenson).unwrap()
    }

    #[test]
    fn refinement_edge_reads_the_table() {
        let t = Tetrahedron::new([10, 11, 12, 13]);
        assert_eq!(refinement_edge(&t, 3, Numbering::Stevenson), EdgeKey::new(11, 13));
        assert_eq!(refinement_edge(&t, 1, Numbering::Stevenson), EdgeKey::new(10, 13));
        assert_eq!(refinement_edge(&t, 3, Numbering::Alberta), EdgeKey::new(11, 13));
        assert_eq!(refinement_edge(&t, 0, Numbering::Alberta), EdgeKey::new(10, 11));
        let mut t1 = t;
        t1.set_type(2);
        assert_eq!(refinement_edge(&t1, 3, Numbering::Stevenson), EdgeKey::new(12, 13));
        assert_eq!(refinement_edge(&t1, 3, Numbering::Alberta), EdgeKey::new(11, 12));
    }

    #[test]
    fn single_element_is_trivially_compatible() {
        let mesh = single();
        let adj = FaceAdjacency::build(&mesh).unwrap();
        assert!(weak_check(&mesh, &adj));
        let report = strong_check(&mesh, &adj).unwrap();
        assert_eq!(report.incompatible_faces, 0);
        assert_eq!(report.boundary_faces, 4);
        assert_eq!(report.total_faces, 4);
        assert_eq!(report.max_incompatible_per_vertex, 0);
    }

    #[test]
    fn mismatched_shared_face_is_detected() {
        // Shared face (1,2,3): element 0 (face 3) induces (1,3), element 1
        // [3,2,1,4] (face 0 = {3,2,1}) induces (3,1) as well.
        let mesh = TetMesh::new(5, [[0, 1, 2, 3], [3, 2, 1, 4]], Numbering::Stevenson).unwrap();
        let adj = FaceAdjacency::build(&mesh).unwrap();
        assert!(weak_check(&mesh, &adj));

        // [2,1,3,4]: face 0 = {2,1,3} induces (2,3).
        let mesh = TetMesh::new(5, [[0, 1, 2, 3], [2, 1, 3, 4]], Numbering::Stevenson).unwrap();
        let adj = FaceAdjacency::build(&mesh).unwrap();
        assert!(!weak_check(&mesh, &adj));
        let (face, pair) = first_incompatible_face(&mesh, &adj).unwrap();
        assert_eq!(face, FaceKey::new([1, 2, 3]));
        assert_eq!(pair, (0, 1));
        let report = strong_check(&mesh, &adj).unwrap();
        assert_eq!(report.incompatible_faces, 1);
        assert_eq!(report.max_incompatible_per_vertex, 1);
        assert_eq!(report.min_incompatible_per_vertex, 0);
    }

    #[test]
    fn invalid_type_is_fatal_in_strong_agreement() {
        let mut mesh =
            TetMesh::new(5, [[0, 1, 2, 3], [3, 2, 1, 4]], Numbering::Stevenson).unwrap();
        mesh.element_mut(1).set_type(4);
        let err = strongly_agree(&mesh, &FaceKey::new([1, 2, 3]), (0, 1)).unwrap_err();
        assert_eq!(
            err,
            MeshBisectError::InvalidElementType {
                element: 1,
                tet_type: 4
            }
        );
    }

    #[test]
    fn reflected_neighbours_with_equal_type() {
        // Element 1 replaces x0 of element 0 by 4 at the same slot.
        let mesh = TetMesh::new(5, [[0, 1, 2, 3], [4, 1, 2, 3]], Numbering::Stevenson).unwrap();
        let face = FaceKey::new([1, 2, 3]);
        assert!(strongly_agree(&mesh, &face, (0, 1)).unwrap());
    }
}
