//! Small conforming tetrahedral meshes for tests and benchmarks.

use itertools::{Itertools, iproduct};

use crate::mesh_error::MeshBisectError;
use crate::topology::numbering::Numbering;
use crate::topology::tetra::{TetMesh, VertexId};

/// Kuhn (Freudenthal) subdivision of an `nx`×`ny`×`nz` box: every unit cube
/// is split into 6 tetrahedra along its main diagonal, one per ordering of
/// the three axes. The result is conforming and Stevenson-numbered.
pub fn kuhn_box(nx: usize, ny: usize, nz: usize) -> Result<TetMesh, MeshBisectError> {
    let id = |i: usize, j: usize, k: usize| -> VertexId { i + (nx + 1) * (j + (ny + 1) * k) };
    let n_vertices = (nx + 1) * (ny + 1) * (nz + 1);

    let mut cells = Vec::with_capacity(6 * nx * ny * nz);
    for (k, j, i) in iproduct!(0..nz, 0..ny, 0..nx) {
        for axes in (0..3).permutations(3) {
            let mut corner = [i, j, k];
            let mut tet = [id(i, j, k); 4];
            for (step, &axis) in axes.iter().enumerate() {
                corner[axis] += 1;
                tet[step + 1] = id(corner[0], corner[1], corner[2]);
            }
            cells.push(tet);
        }
    }
    TetMesh::new(n_vertices, cells, Numbering::Stevenson)
}

/// `k` tetrahedra around the edge `(0, 1)`; element `i` is
/// `[0, 1, i + 2, i + 3]` and shares face `{0, 1, i + 3}` with element `i + 1`.
pub fn fan_around_edge(k: usize) -> Result<TetMesh, MeshBisectError> {
    let n_vertices = if k == 0 { 0 } else { k + 3 };
    TetMesh::new(
        n_vertices,
        (0..k).map(|i| [0, 1, i + 2, i + 3]),
        Numbering::Stevenson,
    )
}
