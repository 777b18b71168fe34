mod util;
use util::*;

use mesh_bisect::algs::meshgen::{fan_around_edge, kuhn_box};
use mesh_bisect::prelude::*;

fn strategies() -> [OrientationStrategy; 3] {
    [
        OrientationStrategy::Type0,
        OrientationStrategy::Type1,
        OrientationStrategy::Type1WithFallback,
    ]
}

#[test]
fn kuhn_box_orients_with_every_strategy() {
    let mesh = kuhn_box(2, 2, 2).unwrap();
    let cfg = OrientationConfig::default();
    for strategy in strategies() {
        let oriented = orient(&mesh, &cfg, strategy)
            .unwrap()
            .compatible()
            .unwrap_or_else(|| panic!("{strategy:?} failed on a Kuhn box"));
        let adj = FaceAdjacency::build(oriented.mesh()).unwrap();
        assert!(weak_check(oriented.mesh(), &adj));
        assert_parity_matches(&mesh, oriented.mesh());
        assert_eq!(oriented.elements().len(), mesh.len());
    }
}

#[test]
fn type0_output_is_type_zero_without_auxiliary_vertices() {
    let mesh = relabelled_kuhn_box(2, 1, 1, 7, Numbering::Stevenson);
    let oriented = orient(&mesh, &OrientationConfig::default(), OrientationStrategy::Type0)
        .unwrap()
        .compatible()
        .unwrap();
    assert_eq!(oriented.strategy_used(), OrientationStrategy::Type0);
    assert!(oriented.types().iter().all(|&t| t == 0));
}

#[test]
fn type1_keeps_orientation_flags() {
    let mesh = relabelled_kuhn_box(2, 2, 1, 3, Numbering::Alberta);
    if let Some(oriented) = orient(&mesh, &OrientationConfig::default(), OrientationStrategy::Type1)
        .unwrap()
        .compatible()
    {
        assert_eq!(oriented.orientations(), mesh.orientations());
        assert!(oriented.types().iter().all(|&t| t == 1));
        assert_eq!(oriented.mesh().numbering(), Numbering::Alberta);
    }
}

#[test]
fn alberta_input_is_returned_in_alberta() {
    let mesh = relabelled_kuhn_box(1, 2, 2, 11, Numbering::Alberta);
    let oriented = orient(&mesh, &OrientationConfig::default(), OrientationStrategy::Type0)
        .unwrap()
        .compatible()
        .unwrap();
    assert_eq!(oriented.mesh().numbering(), Numbering::Alberta);
    let adj = FaceAdjacency::build(oriented.mesh()).unwrap();
    assert!(weak_check(oriented.mesh(), &adj));
    assert_parity_matches(&mesh, oriented.mesh());

    // The same elements read in Stevenson numbering are compatible there too.
    let mut stevenson = oriented.into_mesh();
    stevenson.to_numbering(Numbering::Stevenson);
    assert!(weak_check(&stevenson, &adj));
}

#[test]
fn fan_orients_and_reports_boundary() {
    let mesh = fan_around_edge(6).unwrap();
    for strategy in strategies() {
        let oriented = orient(&mesh, &OrientationConfig::default(), strategy)
            .unwrap()
            .compatible()
            .unwrap();
        let report = oriented.strong_report();
        assert_eq!(report.total_faces, 4 * 6 - 5);
        assert_eq!(report.boundary_faces, 4 * 6 - 2 * 5);
    }
}

#[test]
fn disconnected_mesh_is_fatal_for_type0() {
    let mesh = TetMesh::new(8, [[0, 1, 2, 3], [4, 5, 6, 7]], Numbering::Stevenson).unwrap();
    let err = orient(&mesh, &OrientationConfig::default(), OrientationStrategy::Type0).unwrap_err();
    assert_eq!(err, MeshBisectError::FrontExhausted { visited: 1, total: 2 });
}

#[test]
fn every_classifier_variant_stays_compatible() {
    let mesh = relabelled_kuhn_box(2, 2, 2, 5, Numbering::Stevenson);
    for variant in [
        ClassifierVariant::Default,
        ClassifierVariant::RefinementEdgeCount,
        ClassifierVariant::AdjacencyCount,
        ClassifierVariant::Random,
    ] {
        let cfg = OrientationConfig::default().with_variant(variant, 6);
        let oriented = orient(&mesh, &cfg, OrientationStrategy::Type0)
            .unwrap()
            .compatible()
            .unwrap_or_else(|| panic!("{variant:?} produced an incompatible mesh"));
        assert!(oriented.types().iter().all(|&t| t <= 2));
    }
}

#[test]
fn announced_edge_toggle_does_not_affect_compatibility() {
    let mesh = relabelled_kuhn_box(3, 2, 1, 13, Numbering::Stevenson);
    for enabled in [true, false] {
        let cfg = OrientationConfig::default().with_announced_edge(enabled);
        assert!(
            orient(&mesh, &cfg, OrientationStrategy::Type0)
                .unwrap()
                .is_compatible()
        );
    }
}

#[test]
fn random_classifier_is_reproducible_for_a_seed() {
    let mesh = kuhn_box(2, 2, 1).unwrap();
    let adj = FaceAdjacency::build(&mesh).unwrap();
    let cfg = OrientationConfig::default()
        .with_variant(ClassifierVariant::Random, 0)
        .with_seed(2024);
    let a = classify_vertices(&mesh, &adj, &cfg);
    let b = classify_vertices(&mesh, &adj, &cfg);
    assert_eq!(a, b);
}
