mod util;
use util::*;

use mesh_bisect::prelude::*;
use proptest::prelude::*;

fn numbering() -> impl Strategy<Value = Numbering> {
    prop_oneof![Just(Numbering::Stevenson), Just(Numbering::Alberta)]
}

fn variant() -> impl Strategy<Value = ClassifierVariant> {
    prop_oneof![
        Just(ClassifierVariant::Default),
        Just(ClassifierVariant::RefinementEdgeCount),
        Just(ClassifierVariant::AdjacencyCount),
        Just(ClassifierVariant::Random),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn numbering_conversion_round_trips(
        nx in 1usize..3, ny in 1usize..3, nz in 1usize..3,
        seed in any::<u64>(), numbering in numbering(),
    ) {
        let mesh = relabelled_kuhn_box(nx, ny, nz, seed, numbering);
        let mut twice = mesh.clone();
        twice.convert_numbering();
        prop_assert_ne!(twice.numbering(), mesh.numbering());
        twice.convert_numbering();
        prop_assert_eq!(twice, mesh);
    }

    #[test]
    fn adjacency_counts_every_face_once(
        nx in 1usize..4, ny in 1usize..3, nz in 1usize..3, seed in any::<u64>(),
    ) {
        let mesh = relabelled_kuhn_box(nx, ny, nz, seed, Numbering::Stevenson);
        let adj = FaceAdjacency::build(&mesh).unwrap();
        prop_assert_eq!(adj.boundary_count() + adj.interior_count(), adj.len());
        prop_assert_eq!(adj.boundary_count() + 2 * adj.interior_count(), 4 * mesh.len());
        for (face, &(a, b)) in adj.iter() {
            prop_assert!(a <= b);
            prop_assert!(mesh.element(a).face_index(face).is_some());
            prop_assert!(mesh.element(b).face_index(face).is_some());
        }
        adj.validate_against(&mesh).unwrap();
    }

    #[test]
    fn type0_is_compatible_and_parity_consistent(
        nx in 1usize..4, ny in 1usize..3, nz in 1usize..3,
        seed in any::<u64>(), numbering in numbering(),
        variant in variant(), threshold in 0usize..12, announced in any::<bool>(),
    ) {
        let mesh = relabelled_kuhn_box(nx, ny, nz, seed, numbering);
        let cfg = OrientationConfig::default()
            .with_variant(variant, threshold)
            .with_announced_edge(announced)
            .with_seed(seed);
        let adj = FaceAdjacency::build(&mesh).unwrap();
        let partition = classify_vertices(&mesh, &adj, &cfg);
        let out = orient_type0(&mesh, &adj, &partition, &cfg).unwrap();
        prop_assert!(out.is_compatible());
        let out = out.compatible().unwrap();
        prop_assert!(weak_check(&out, &adj));
        prop_assert_eq!(out.numbering(), numbering);
        assert_parity_matches(&mesh, &out);
    }

    #[test]
    fn type1_keeps_orientations(
        nx in 1usize..4, ny in 1usize..3, nz in 1usize..3,
        seed in any::<u64>(), numbering in numbering(),
    ) {
        let mesh = relabelled_kuhn_box(nx, ny, nz, seed, numbering);
        if let Some(out) = orient_type1(&mesh).unwrap().compatible() {
            prop_assert_eq!(out.orientations(), mesh.orientations());
            let adj = FaceAdjacency::build(&out).unwrap();
            prop_assert!(weak_check(&out, &adj));
            assert_parity_matches(&mesh, &out);
        }
    }

    #[test]
    fn fallback_always_yields_a_compatible_mesh(
        nx in 1usize..3, ny in 1usize..3, nz in 1usize..3, seed in any::<u64>(),
    ) {
        let mesh = relabelled_kuhn_box(nx, ny, nz, seed, Numbering::Stevenson);
        let oriented = orient(&mesh, &OrientationConfig::default(), OrientationStrategy::Type1WithFallback)
            .unwrap()
            .compatible();
        prop_assert!(oriented.is_some());
        let oriented = oriented.unwrap();
        let adj = FaceAdjacency::build(oriented.mesh()).unwrap();
        prop_assert!(weak_check(oriented.mesh(), &adj));
    }
}

#[cfg(feature = "rayon")]
proptest! {
    #[test]
    fn parallel_build_matches_serial(
        nx in 1usize..4, ny in 1usize..3, nz in 1usize..3, seed in any::<u64>(),
    ) {
        let mesh = relabelled_kuhn_box(nx, ny, nz, seed, Numbering::Stevenson);
        prop_assert_eq!(
            FaceAdjacency::build_parallel(&mesh).unwrap(),
            FaceAdjacency::build(&mesh).unwrap()
        );
    }
}
