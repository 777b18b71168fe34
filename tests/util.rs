#![allow(dead_code)]
use mesh_bisect::algs::meshgen::kuhn_box;
use mesh_bisect::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Kuhn box with vertex ids, element order and local vertex order shuffled.
pub fn relabelled_kuhn_box(nx: usize, ny: usize, nz: usize, seed: u64, numbering: Numbering) -> TetMesh {
    let base = kuhn_box(nx, ny, nz).unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut relabel: Vec<VertexId> = (0..base.n_vertices()).collect();
    relabel.shuffle(&mut rng);
    let mut cells: Vec<[VertexId; 4]> = base
        .cells()
        .into_iter()
        .map(|cell| {
            let mut cell = cell.map(|v| relabel[v]);
            cell.shuffle(&mut rng);
            cell
        })
        .collect();
    cells.shuffle(&mut rng);
    TetMesh::new(base.n_vertices(), cells, numbering).unwrap()
}

/// Parity of the permutation taking `from` to `to` (true = odd).
pub fn permutation_parity(from: [VertexId; 4], to: [VertexId; 4]) -> bool {
    let pos: Vec<usize> = to
        .iter()
        .map(|v| from.iter().position(|u| u == v).unwrap())
        .collect();
    let mut inversions = 0;
    for i in 0..4 {
        for j in i + 1..4 {
            if pos[i] > pos[j] {
                inversions += 1;
            }
        }
    }
    inversions % 2 == 1
}

/// Assert `out` is a local reordering of `input` whose orientation flags
/// match the parity of that reordering.
pub fn assert_parity_matches(input: &TetMesh, out: &TetMesh) {
    assert_eq!(input.len(), out.len());
    for (id, (a, b)) in input.elements().iter().zip(out.elements()).enumerate() {
        let mut sa = a.vertices();
        let mut sb = b.vertices();
        sa.sort_unstable();
        sb.sort_unstable();
        assert_eq!(sa, sb, "element {id} changed its vertex set");
        let expected = a.orientation() ^ permutation_parity(a.vertices(), b.vertices());
        assert_eq!(b.orientation(), expected, "element {id} parity");
    }
}
