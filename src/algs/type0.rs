//! Type-0 orientation by front propagation over the dual graph.
//!
//! Starting from element 0, a front of faces sweeps the mesh. Every vertex
//! reached for the first time is inserted into a global [`PriorityChain`]
//! right next to the interior vertex of the already-oriented neighbour, and
//! every element is reordered by ascending priority. In Stevenson numbering a
//! type-0 element sorted by a global vertex order induces, on each face, the
//! edge between the lowest and the highest vertex of that face, so any two
//! elements sharing a face agree on it. Inserting next to the neighbour's
//! interior vertex additionally makes most neighbours reflected neighbours.
//!
//! Elements touching auxiliary vertices are reordered as
//! `[first base, auxiliaries.., remaining bases..]` and tagged with type
//! `#auxiliary mod 3`; this keeps face refinement edges a function of the
//! face alone.
//!
//! The orienter works in Stevenson numbering and converts back to the input
//! numbering on exit.

use std::collections::VecDeque;

use crate::algs::classify::VertexPartition;
use crate::algs::compatibility::first_incompatible_face;
use crate::algs::orient::{OrientationOutcome, OrientationStrategy, StrategyFailure};
use crate::algs::priority::PriorityChain;
use crate::config::OrientationConfig;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshBisectError;
use crate::topology::adjacency::{ElementPair, FaceAdjacency};
use crate::topology::face::FaceKey;
use crate::topology::numbering::{Numbering, opposite_node};
use crate::topology::tetra::{ElementId, TetMesh, VertexId};

/// Orient `mesh` with all elements of type 0 (up to auxiliary vertices).
///
/// `adjacency` must have been built from `mesh` (local vertex order is
/// irrelevant). Returns [`OrientationOutcome::Compatible`] when the final
/// weak check passes.
///
/// # Errors
/// [`MeshBisectError::FrontExhausted`] if the dual graph is disconnected,
/// [`MeshBisectError::MissingFace`] if `adjacency` does not match `mesh`.
pub fn orient_type0(
    mesh: &TetMesh,
    adjacency: &FaceAdjacency,
    partition: &VertexPartition,
    config: &OrientationConfig,
) -> Result<OrientationOutcome, MeshBisectError> {
    let output_numbering = mesh.numbering();
    let mut work = mesh.clone();
    work.to_numbering(Numbering::Stevenson);
    work.set_all_types(0);

    if !work.is_empty() {
        let mut orienter = Type0Orienter::new(&mut work, adjacency, partition, config);
        orienter.seed()?;
        orienter.propagate()?;
        log::debug!(
            "type-0 orientation: {} elements, {} ordered vertices, {} rescales",
            orienter.visited,
            orienter.chain.len(),
            orienter.chain.rescale_count()
        );
        orienter.chain.debug_assert_invariants();
    }

    work.to_numbering(output_numbering);
    match first_incompatible_face(&work, adjacency) {
        None => Ok(OrientationOutcome::Compatible(work)),
        Some((face, elements)) => {
            log::warn!("type-0 orientation left face {face} of elements {elements:?} incompatible");
            Ok(OrientationOutcome::Incompatible(StrategyFailure {
                strategy: OrientationStrategy::Type0,
                face,
                elements,
            }))
        }
    }
}

struct Type0Orienter<'a> {
    mesh: &'a mut TetMesh,
    adjacency: &'a FaceAdjacency,
    partition: &'a VertexPartition,
    use_announced_edge: bool,
    chain: PriorityChain,
    done: Vec<bool>,
    visited: usize,
    front: VecDeque<(FaceKey, ElementPair)>,
}

impl<'a> Type0Orienter<'a> {
    fn new(
        mesh: &'a mut TetMesh,
        adjacency: &'a FaceAdjacency,
        partition: &'a VertexPartition,
        config: &OrientationConfig,
    ) -> Self {
        let chain = PriorityChain::new(mesh.n_vertices());
        let done = vec![false; mesh.len()];
        Self {
            mesh,
            adjacency,
            partition,
            use_announced_edge: config.use_announced_edge,
            chain,
            done,
            visited: 0,
            front: VecDeque::new(),
        }
    }

    /// Element 0 gets priorities `1..=4` in its current local order.
    fn seed(&mut self) -> Result<(), MeshBisectError> {
        for v in self.mesh.element(0).vertices() {
            self.chain.push_back(v)?;
        }
        self.finish_element(0)
    }

    fn propagate(&mut self) -> Result<(), MeshBisectError> {
        let total = self.mesh.len();
        while self.visited < total {
            let Some((face, (a, b))) = self.front.pop_front() else {
                return Err(MeshBisectError::FrontExhausted {
                    visited: self.visited,
                    total,
                });
            };
            let (old, new) = match (self.done[a], self.done[b]) {
                (true, false) => (a, b),
                (false, true) => (b, a),
                _ => continue,
            };

            let node_in_old = opposite_node(self.local_face(old, &face)?);
            let node_in_new = opposite_node(self.local_face(new, &face)?);
            let new_vertex = self.mesh.element(new).vertex(node_in_new);
            if !self.chain.contains(new_vertex) {
                self.place_vertex(old, node_in_old, node_in_new, new_vertex)?;
            }
            self.finish_element(new)?;
        }
        Ok(())
    }

    fn local_face(&self, element: ElementId, face: &FaceKey) -> Result<usize, MeshBisectError> {
        self.mesh
            .element(element)
            .face_index(face)
            .ok_or(MeshBisectError::FaceNotInElement {
                face: *face,
                element,
            })
    }

    /// Insert `v` into the chain next to the interior vertex of `old`.
    ///
    /// When the two interior vertices sit on the two refinement-edge slots
    /// and the announced-edge rule is enabled, `v` goes beyond the far end of
    /// the old refinement edge instead.
    fn place_vertex(
        &mut self,
        old: ElementId,
        node_in_old: usize,
        node_in_new: usize,
        v: VertexId,
    ) -> Result<(), MeshBisectError> {
        let [lo, hi] = Numbering::Stevenson.type0_nodes();
        let old_el = *self.mesh.element(old);
        let across_edge = (node_in_old == lo && node_in_new == hi)
            || (node_in_old == hi && node_in_new == lo);
        if self.use_announced_edge && across_edge {
            if node_in_old == lo {
                self.chain.insert_after(old_el.vertex(hi), v)
            } else {
                self.chain.insert_before(old_el.vertex(lo), v)
            }
        } else {
            self.chain.insert_after(old_el.vertex(node_in_old), v)
        }
    }

    /// Reorder `id` by priority, tag its type, mark it done and push its
    /// faces onto the front.
    fn finish_element(&mut self, id: ElementId) -> Result<(), MeshBisectError> {
        let sorted = self.chain.sorted(self.mesh.element(id).vertices())?;
        let (base, aux): (Vec<VertexId>, Vec<VertexId>) =
            sorted.iter().copied().partition(|&v| self.partition.is_base(v));

        let (target, tet_type) = if base.is_empty() || aux.is_empty() {
            (sorted, 0)
        } else {
            let mut target = sorted;
            let order = base[..1].iter().chain(&aux).chain(&base[1..]);
            for (slot, &v) in target.iter_mut().zip(order) {
                *slot = v;
            }
            (target, (aux.len() % 3) as u8)
        };

        let el = self.mesh.element_mut(id);
        el.permute_to(target);
        el.set_type(tet_type);

        self.done[id] = true;
        self.visited += 1;
        self.push_faces(id)
    }

    /// Faces opposite the refinement-edge endpoints go to the front of the
    /// queue, the other two to the back. Boundary faces are skipped.
    fn push_faces(&mut self, id: ElementId) -> Result<(), MeshBisectError> {
        let priority_faces = Numbering::Stevenson.type0_faces();
        let el = *self.mesh.element(id);
        for local in 0..4 {
            let face = el.face(local);
            let pair = self
                .adjacency
                .get(&face)
                .ok_or(MeshBisectError::MissingFace { face, element: id })?;
            if pair.0 == pair.1 {
                continue;
            }
            if priority_faces.contains(&local) {
                self.front.push_front((face, pair));
            } else {
                self.front.push_back((face, pair));
            }
        }
        Ok(())
    }
}
