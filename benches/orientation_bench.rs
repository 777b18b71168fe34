use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_bisect::algs::meshgen::kuhn_box;
use mesh_bisect::prelude::*;

fn bench_orientation(c: &mut Criterion) {
    let mut group = c.benchmark_group("orientation");
    let cfg = OrientationConfig::default();

    for &n in &[4usize, 8, 12] {
        let mesh = kuhn_box(n, n, n).expect("kuhn box");
        let adj = FaceAdjacency::build(&mesh).expect("manifold mesh");
        let partition = VertexPartition::all_base(mesh.n_vertices());

        group.bench_with_input(BenchmarkId::new("adjacency", n), &n, |b, _| {
            b.iter(|| {
                let adj = FaceAdjacency::build(&mesh).expect("manifold mesh");
                black_box(adj);
            });
        });

        group.bench_with_input(BenchmarkId::new("type0", n), &n, |b, _| {
            b.iter(|| {
                let out = orient_type0(&mesh, &adj, &partition, &cfg).expect("connected mesh");
                black_box(out);
            });
        });

        group.bench_with_input(BenchmarkId::new("type1", n), &n, |b, _| {
            b.iter(|| {
                let out = orient_type1(&mesh).expect("valid mesh");
                black_box(out);
            });
        });

        group.bench_with_input(BenchmarkId::new("strong_check", n), &n, |b, _| {
            b.iter(|| {
                let report = strong_check(&mesh, &adj).expect("valid types");
                black_box(report);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_orientation);
criterion_main!(benches);
