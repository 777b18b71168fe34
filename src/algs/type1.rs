//! Type-1 orientation by fixing one interior vertex per element.
//!
//! In a type-1 element one local slot (the *type-1 node*) never lies on the
//! refinement edge of any face: every face through it is split along the
//! opposite edge, and only the remaining *type-1 face* has a free refinement
//! edge, selectable by rotating the other three slots. Elements are visited
//! in input order; each fixes the vertex with the highest global priority
//! among its own, or starts a new one. Faces are tracked in two maps:
//!
//! * `free`: type-1 faces seen once; their edge can still be rotated.
//! * `active`: other faces seen once; their edge is final.
//!
//! When a face is seen for the second time it is closed: a free side is
//! rotated into agreement, two final sides must already agree or the
//! strategy fails for this mesh.
//!
//! All reorderings here are even permutations, so orientation flags are left
//! untouched.

use hashbrown::HashMap;

use crate::algs::compatibility::faces_agree;
use crate::algs::orient::{OrientationOutcome, OrientationStrategy, StrategyFailure};
use crate::mesh_error::MeshBisectError;
use crate::topology::face::FaceKey;
use crate::topology::numbering::opposite_node;
use crate::topology::tetra::{ElementId, TetMesh};

/// Orient `mesh` with every element of type 1, in the mesh's own numbering.
///
/// A face whose two fixed refinement edges disagree yields
/// [`OrientationOutcome::Incompatible`]; the caller may then fall back to
/// [`crate::algs::type0::orient_type0`].
pub fn orient_type1(mesh: &TetMesh) -> Result<OrientationOutcome, MeshBisectError> {
    let mut work = mesh.clone();
    work.set_all_types(1);
    let numbering = work.numbering();
    let node_slot = numbering.type1_node();
    let type1_local_face = numbering.type1_face();

    let mut node_priority: Vec<Option<usize>> = vec![None; work.n_vertices()];
    let mut next_priority = work.n_vertices();
    let mut active: HashMap<FaceKey, ElementId> = HashMap::new();
    let mut free: HashMap<FaceKey, ElementId> = HashMap::new();

    for id in 0..work.len() {
        let el = *work.element(id);
        let prioritized = (0..4)
            .filter_map(|slot| node_priority[el.vertex(slot)].map(|p| (p, slot)))
            .max();
        let node = match prioritized {
            Some((_, slot)) => slot,
            None => {
                let slot = (0..4)
                    .find(|&f| free.contains_key(&el.face(f)))
                    .map(opposite_node)
                    .unwrap_or(node_slot);
                node_priority[el.vertex(slot)] = Some(next_priority);
                next_priority = next_priority.saturating_sub(1);
                slot
            }
        };
        work.element_mut(id).move_slot_even(node, node_slot);

        let type1_face = work.element(id).face(type1_local_face);
        for face in work.element(id).faces() {
            let closed = if face == type1_face {
                match free.remove(&face).or_else(|| active.remove(&face)) {
                    Some(other) => Some((other, id)),
                    None => {
                        free.insert(face, id);
                        None
                    }
                }
            } else if let Some(other) = free.remove(&face) {
                Some((id, other))
            } else if let Some(other) = active.remove(&face) {
                if !faces_agree(&work, &face, (other, id)) {
                    return Ok(failure(face, other, id));
                }
                None
            } else {
                active.insert(face, id);
                None
            };

            // `rotating` is the side whose type-1 face this is.
            if let Some((fixed, rotating)) = closed {
                if !rotate_until_agree(&mut work, &face, fixed, rotating, node_slot) {
                    return Ok(failure(face, fixed, rotating));
                }
            }
        }
    }

    log::debug!(
        "type-1 orientation: {} elements, {} fixed vertices, {} open faces",
        work.len(),
        work.n_vertices() - next_priority,
        active.len() + free.len()
    );
    Ok(OrientationOutcome::Compatible(work))
}

/// Rotate `rotating` around its type-1 node until `face` agrees with
/// `fixed`; at most the three cyclic positions are tried.
fn rotate_until_agree(
    mesh: &mut TetMesh,
    face: &FaceKey,
    fixed: ElementId,
    rotating: ElementId,
    node_slot: usize,
) -> bool {
    for _ in 0..3 {
        if faces_agree(mesh, face, (fixed, rotating)) {
            return true;
        }
        mesh.element_mut(rotating).rotate_around(node_slot);
    }
    faces_agree(mesh, face, (fixed, rotating))
}

fn failure(face: FaceKey, a: ElementId, b: ElementId) -> OrientationOutcome {
    log::warn!("type-1 orientation failed on face {face} between elements {a} and {b}");
    OrientationOutcome::Incompatible(StrategyFailure {
        strategy: OrientationStrategy::Type1,
        face,
        elements: (a.min(b), a.max(b)),
    })
}
