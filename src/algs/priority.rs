//! Strict total order over vertices, grown one vertex at a time.
//!
//! The chain is an intrusive doubly linked list stored in an arena indexed by
//! vertex id. Each ordered vertex carries a floating-point weight; weights
//! increase strictly from head to tail, so comparing two vertices is a
//! weight comparison. A new vertex inserted between two neighbours takes the
//! mean of their weights. When the gap to a neighbour falls below a tolerance
//! proportional to the vertex count, all weights are reassigned to `1..=k`
//! in chain order.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshBisectError;
use crate::topology::tetra::VertexId;

const TOLERANCE_PER_VERTEX: f64 = 1e-12;

/// Per-vertex record of the chain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PriorityNode {
    pub weight: f64,
    pub prev: Option<VertexId>,
    pub next: Option<VertexId>,
}

#[derive(Clone, Debug)]
pub struct PriorityChain {
    nodes: Vec<Option<PriorityNode>>,
    head: Option<VertexId>,
    tail: Option<VertexId>,
    len: usize,
    tolerance: f64,
    rescales: usize,
}

impl PriorityChain {
    pub fn new(n_vertices: usize) -> Self {
        Self {
            nodes: vec![None; n_vertices],
            head: None,
            tail: None,
            len: 0,
            tolerance: (n_vertices.max(1) as f64) * TOLERANCE_PER_VERTEX,
            rescales: 0,
        }
    }

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        matches!(self.nodes.get(v), Some(Some(_)))
    }

    #[inline]
    pub fn node(&self, v: VertexId) -> Option<&PriorityNode> {
        self.nodes.get(v).and_then(Option::as_ref)
    }

    #[inline]
    pub fn weight(&self, v: VertexId) -> Option<f64> {
        self.node(v).map(|n| n.weight)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of weight renormalisations performed so far.
    #[inline]
    pub fn rescale_count(&self) -> usize {
        self.rescales
    }

    fn present(&self, v: VertexId) -> Result<PriorityNode, MeshBisectError> {
        self.node(v).copied().ok_or_else(|| {
            MeshBisectError::InvalidPriorityChain(format!("vertex {v} has no priority"))
        })
    }

    fn absent(&self, v: VertexId) -> Result<(), MeshBisectError> {
        match self.nodes.get(v) {
            Some(None) => Ok(()),
            Some(Some(_)) => Err(MeshBisectError::InvalidPriorityChain(format!(
                "vertex {v} already has a priority"
            ))),
            None => Err(MeshBisectError::InvalidPriorityChain(format!(
                "vertex {v} outside chain of {} vertices",
                self.nodes.len()
            ))),
        }
    }

    /// Append `v` after the current tail (weight = tail + 1).
    pub fn push_back(&mut self, v: VertexId) -> Result<(), MeshBisectError> {
        match self.tail {
            Some(tail) => self.insert_after(tail, v),
            None => {
                self.absent(v)?;
                self.nodes[v] = Some(PriorityNode {
                    weight: 1.0,
                    prev: None,
                    next: None,
                });
                self.head = Some(v);
                self.tail = Some(v);
                self.len = 1;
                Ok(())
            }
        }
    }

    /// Insert `v` directly after `anchor`.
    pub fn insert_after(&mut self, anchor: VertexId, v: VertexId) -> Result<(), MeshBisectError> {
        self.absent(v)?;
        let a = self.present(anchor)?;
        let weight = match a.next {
            Some(next) => 0.5 * (a.weight + self.present(next)?.weight),
            None => a.weight + 1.0,
        };
        self.nodes[v] = Some(PriorityNode {
            weight,
            prev: Some(anchor),
            next: a.next,
        });
        self.link(anchor, v, a.next);
        self.after_insert(v);
        Ok(())
    }

    /// Insert `v` directly before `anchor`.
    pub fn insert_before(&mut self, anchor: VertexId, v: VertexId) -> Result<(), MeshBisectError> {
        self.absent(v)?;
        let a = self.present(anchor)?;
        let weight = match a.prev {
            Some(prev) => 0.5 * (self.present(prev)?.weight + a.weight),
            None => a.weight - 1.0,
        };
        self.nodes[v] = Some(PriorityNode {
            weight,
            prev: a.prev,
            next: Some(anchor),
        });
        match a.prev {
            Some(prev) => self.link(prev, v, Some(anchor)),
            None => {
                if let Some(node) = self.nodes[anchor].as_mut() {
                    node.prev = Some(v);
                }
                self.head = Some(v);
                self.len += 1;
            }
        }
        self.after_insert(v);
        Ok(())
    }

    /// Splice `v` between `prev` and `next` (node `v` is already filled in).
    fn link(&mut self, prev: VertexId, v: VertexId, next: Option<VertexId>) {
        if let Some(node) = self.nodes[prev].as_mut() {
            node.next = Some(v);
        }
        match next {
            Some(next) => {
                if let Some(node) = self.nodes[next].as_mut() {
                    node.prev = Some(v);
                }
            }
            None => self.tail = Some(v),
        }
        self.len += 1;
    }

    fn after_insert(&mut self, v: VertexId) {
        let Some(node) = self.node(v).copied() else {
            return;
        };
        let too_close = [node.prev, node.next]
            .into_iter()
            .flatten()
            .filter_map(|u| self.weight(u))
            .any(|w| (w - node.weight).abs() < self.tolerance);
        if too_close {
            self.rescale();
        }
    }

    /// Reassign weights `1..=k` in chain order.
    pub fn rescale(&mut self) {
        let mut cursor = self.head;
        let mut k = 0.0;
        while let Some(v) = cursor {
            k += 1.0;
            let Some(node) = self.nodes[v].as_mut() else {
                break;
            };
            node.weight = k;
            cursor = node.next;
        }
        self.rescales += 1;
        log::debug!("priority chain rescaled to 1..={k} ({} rescales)", self.rescales);
    }

    /// Vertices in increasing priority.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        std::iter::successors(self.head, move |&v| self.node(v).and_then(|n| n.next))
    }

    /// `vertices` sorted by increasing priority. Every vertex must be ordered.
    pub fn sorted<const N: usize>(
        &self,
        vertices: [VertexId; N],
    ) -> Result<[VertexId; N], MeshBisectError> {
        let mut keyed = [(0.0f64, 0usize); N];
        for (slot, &v) in keyed.iter_mut().zip(vertices.iter()) {
            *slot = (self.present(v)?.weight, v);
        }
        keyed.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
        Ok(keyed.map(|(_, v)| v))
    }
}

impl DebugInvariants for PriorityChain {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "PriorityChain");
    }

    fn validate_invariants(&self) -> Result<(), MeshBisectError> {
        let broken = |msg: String| Err(MeshBisectError::InvalidPriorityChain(msg));
        let mut count = 0usize;
        let mut prev: Option<VertexId> = None;
        let mut last_weight = f64::NEG_INFINITY;
        let mut cursor = self.head;
        while let Some(v) = cursor {
            let node = self.present(v)?;
            if node.prev != prev {
                return broken(format!("vertex {v} links back to {:?}, expected {prev:?}", node.prev));
            }
            if node.weight <= last_weight {
                return broken(format!("weight of vertex {v} does not increase"));
            }
            count += 1;
            if count > self.len {
                return broken("cycle in chain".to_string());
            }
            last_weight = node.weight;
            prev = Some(v);
            cursor = node.next;
        }
        if prev != self.tail {
            return broken(format!("tail {:?} differs from last vertex {prev:?}", self.tail));
        }
        let stored = self.nodes.iter().filter(|n| n.is_some()).count();
        if count != self.len || stored != self.len {
            return broken(format!(
                "chain length {count}, recorded {}, stored {stored}",
                self.len
            ));
        }
        Ok(())
    }
}
