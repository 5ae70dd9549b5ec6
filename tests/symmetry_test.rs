use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quatsymm::prelude::*;
use quatsymm::superpose::{qcp, quaternion_fit};
use quatsymm::symmetry::permutation;
use quatsymm::symmetry::solver::c2::C2RotationSolver;
use quatsymm::symmetry::solver::rotation::RotationSolver;
use quatsymm::symmetry::solver::QuatSymmetrySolver;

mod common;
use common::loader;

#[test]
fn test_single_subunit_is_c1() {
    let subunits = Subunits::new(
        vec![loader::helix_trace(12)],
        vec![0],
        vec!["A".to_string()],
        vec![1],
    )
    .unwrap();
    let group = find_quaternary_symmetry(&subunits, &loader::tight_parameters());
    assert_eq!(group.point_group().to_string(), "C1");
    assert_eq!(group.order(), 1);
    assert_eq!(group.get_rotation(0).subunit_rmsd, 0.0);
    assert_eq!(group.get_rotation(0).trace_rmsd, 0.0);
}

#[test]
fn test_cyclic_rings_small() {
    // Systematic solver territory
    for n in 3..=8 {
        let subunits = loader::cyclic_assembly(n);
        let group = find_quaternary_symmetry(&subunits, &loader::tight_parameters());
        assert_eq!(group.point_group(), PointGroup::Cyclic(n), "C{} expected", n);
        assert_eq!(group.order(), n);
        assert!(group.is_complete());
        for rotation in group.rotations() {
            assert!(rotation.subunit_rmsd < 1e-6);
            assert!(rotation.trace_rmsd < 1e-6);
        }
    }
}

#[test]
fn test_cyclic_ring_sampled() {
    // Twelve subunits dispatch to the sampled-axis solver
    let subunits = loader::cyclic_assembly(12);
    let group = find_quaternary_symmetry(&subunits, &loader::tight_parameters());
    assert_eq!(group.point_group(), PointGroup::Cyclic(12));
    assert_eq!(group.order(), 12);
    assert!(group.is_complete());
    for rotation in group.rotations() {
        assert!(rotation.subunit_rmsd < 1e-6);
    }
}

#[test]
fn test_c2_and_sampled_solver_agree_on_dimer() {
    let half_turn = Matrix4::about_axis(&Coordinate::new(0.0, 0.0, 1.0), PI, &Coordinate::zero());
    let subunits = loader::subunits_from_transforms(
        &[Matrix4::identity(), half_turn],
        &loader::helix_trace(12),
        vec![0, 0],
    );
    let parameters = loader::tight_parameters();

    let direct = C2RotationSolver::new(&subunits, &parameters).solve();
    let sampled = RotationSolver::new(&subunits, &parameters).solve();

    assert_eq!(direct.point_group().to_string(), "C2");
    assert_eq!(direct.point_group(), sampled.point_group());
    assert_eq!(direct.order(), sampled.order());
    let rmsd_direct = direct.get_rotation(1).trace_rmsd;
    let rmsd_sampled = sampled.get_rotation(1).trace_rmsd;
    assert!((rmsd_direct - rmsd_sampled).abs() < 1e-9);
}

#[test]
fn test_dihedral_assemblies() {
    let subunits = loader::dihedral_assembly(2);
    let group = find_quaternary_symmetry(&subunits, &loader::tight_parameters());
    assert_eq!(group.point_group(), PointGroup::Dihedral(2));
    assert_eq!(group.order(), 4);

    let subunits = loader::dihedral_assembly(3);
    let group = find_quaternary_symmetry(&subunits, &loader::tight_parameters());
    assert_eq!(group.point_group(), PointGroup::Dihedral(3));
    assert_eq!(group.order(), 6);

    // Ten subunits dispatch to the sampled-axis solver
    let subunits = loader::dihedral_assembly(5);
    let group = find_quaternary_symmetry(&subunits, &loader::tight_parameters());
    assert_eq!(group.point_group(), PointGroup::Dihedral(5));
    assert_eq!(group.order(), 10);
}

#[test]
fn test_tetrahedral_assembly() {
    let subunits = loader::tetrahedral_assembly();
    let group = find_quaternary_symmetry(&subunits, &loader::tight_parameters());
    assert_eq!(group.point_group(), PointGroup::Tetrahedral);
    assert_eq!(group.order(), 12);
    assert!(group.is_complete());
    assert!(group.is_closed());
}

#[test]
fn test_group_closure_property() {
    for group in [
        find_quaternary_symmetry(&loader::cyclic_assembly(6), &loader::tight_parameters()),
        find_quaternary_symmetry(&loader::dihedral_assembly(3), &loader::tight_parameters()),
        find_quaternary_symmetry(&loader::cyclic_assembly(12), &loader::tight_parameters()),
    ] {
        assert!(group.is_closed());
        let perms = group.permutations();
        for a in &perms {
            for b in &perms {
                let c = permutation::compose(a, b);
                assert!(perms.contains(&c));
            }
        }
    }
}

#[test]
fn test_completeness_property() {
    // The classifier resolves to a complete group or falls back to C1;
    // an incomplete group is never returned
    for n in [1usize, 2, 3, 4, 6, 8, 12] {
        let subunits = if n == 1 {
            Subunits::new(
                vec![loader::helix_trace(12)],
                vec![0],
                vec!["A".to_string()],
                vec![1],
            )
            .unwrap()
        } else {
            loader::cyclic_assembly(n)
        };
        let group = find_quaternary_symmetry(&subunits, &loader::tight_parameters());
        assert!(group.is_complete());
        assert_eq!(group.order(), group.point_group().expected_order());
    }
}

#[test]
fn test_qcp_round_trip_random_transforms() {
    let mut rng = StdRng::seed_from_u64(52);
    for _ in 0..20 {
        let points: Vec<Coordinate> = (0..30)
            .map(|_| {
                Coordinate::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                )
            })
            .collect();
        let axis = Coordinate::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let angle = rng.gen_range(0.0..PI);
        let origin = Coordinate::new(
            rng.gen_range(-20.0..20.0),
            rng.gen_range(-20.0..20.0),
            rng.gen_range(-20.0..20.0),
        );
        let m = Matrix4::about_axis(&axis, angle, &origin);
        let moved: Vec<Coordinate> = points.iter().map(|p| m.transform(p)).collect();

        let (transform, rmsd) = qcp::superpose_with_translation(&points, &moved);
        assert!(rmsd < 1e-6, "rmsd was {}", rmsd);

        // The inverse applied to the copy reproduces the original
        let inverse = transform.rigid_inverse();
        for (p, q) in points.iter().zip(moved.iter()) {
            assert!(inverse.transform(q).distance(p) < 1e-6);
        }
    }
}

#[test]
fn test_qcp_and_quaternion_fit_agree() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let moving: Vec<Coordinate> = (0..15)
            .map(|_| {
                Coordinate::new(
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                )
            })
            .collect();
        let com = quatsymm::geometry::coordinate::centroid(&moving);
        let moving: Vec<Coordinate> = moving.iter().map(|p| p.sub(&com)).collect();
        let m = Matrix4::about_axis(
            &Coordinate::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.4),
            rng.gen_range(0.1..3.0),
            &Coordinate::zero(),
        );
        // Noisy copy keeps the problem well-conditioned but inexact
        let fixed: Vec<Coordinate> = moving
            .iter()
            .map(|p| {
                let q = m.transform(p);
                Coordinate::new(
                    q.x + rng.gen_range(-0.05..0.05),
                    q.y + rng.gen_range(-0.05..0.05),
                    q.z + rng.gen_range(-0.05..0.05),
                )
            })
            .collect();

        let (_, rmsd_a) = qcp::superpose_rotation_only(&moving, &fixed);
        let (_, rmsd_b) = quaternion_fit::superpose_rotation_only(&moving, &fixed);
        assert!((rmsd_a - rmsd_b).abs() < 1e-6, "{} vs {}", rmsd_a, rmsd_b);
    }
}

#[test]
fn test_heteromeric_assembly_is_c1() {
    // Geometrically perfect C4 ring, but every subunit in its own cluster
    let ring = loader::cyclic_assembly(4);
    let subunits = Subunits::new(
        ring.traces().to_vec(),
        vec![0, 1, 2, 3],
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
        vec![1; 4],
    )
    .unwrap();
    let group = find_quaternary_symmetry(&subunits, &loader::tight_parameters());
    assert_eq!(group.point_group().to_string(), "C1");
    assert_eq!(group.order(), 1);
}

#[test]
fn test_pseudo_symmetry_flag() {
    // Alternating cluster ids on a C4 ring: only the 2-fold respects the
    // clusters, the 4-fold requires pseudo-symmetry
    let ring = loader::cyclic_assembly(4);
    let subunits = Subunits::new(
        ring.traces().to_vec(),
        vec![0, 1, 0, 1],
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
        vec![1; 4],
    )
    .unwrap();

    let strict = find_quaternary_symmetry(&subunits, &loader::tight_parameters());
    assert_eq!(strict.point_group(), PointGroup::Cyclic(2));
    assert_eq!(strict.order(), 2);

    let mut pseudo_parameters = loader::tight_parameters();
    pseudo_parameters.pseudo_symmetry = true;
    let pseudo = find_quaternary_symmetry(&subunits, &pseudo_parameters);
    assert_eq!(pseudo.point_group(), PointGroup::Cyclic(4));
    assert_eq!(pseudo.order(), 4);
}

#[test]
fn test_result_bundle_accessors() {
    let subunits = loader::cyclic_assembly(4);
    let result = QuatSymmetryResult::new(subunits, &loader::tight_parameters());
    assert_eq!(result.get_point_group(), PointGroup::Cyclic(4));
    assert_eq!(result.get_subunits().size(), 4);
    assert_eq!(result.rotation_group().order(), 4);
    assert!(result.get_rotation(0).is_identity_permutation());
}

#[test]
fn test_rotation_ordering_is_canonical() {
    let group = find_quaternary_symmetry(&loader::dihedral_assembly(3), &loader::tight_parameters());
    assert_eq!(group.point_group(), PointGroup::Dihedral(3));
    // Principal-axis rotations first, then perpendicular 2-folds
    let directions: Vec<usize> = group.rotations().iter().map(|r| r.direction).collect();
    let mut sorted = directions.clone();
    sorted.sort();
    assert_eq!(directions, sorted);
    // E leads with angle zero on the principal axis
    assert!(group.get_rotation(0).is_identity_permutation());
    assert!(group.get_rotation(0).axis_angle.angle.abs() < 1e-12);
}

#[test]
fn test_noisy_ring_still_detected() {
    // Jitter every coordinate; the fit is no longer exact but stays well
    // under the default threshold
    let mut rng = StdRng::seed_from_u64(11);
    let clean = loader::cyclic_assembly(4);
    let noisy_traces: Vec<Vec<Coordinate>> = clean
        .traces()
        .iter()
        .map(|trace| {
            trace
                .iter()
                .map(|p| {
                    Coordinate::new(
                        p.x + rng.gen_range(-0.2..0.2),
                        p.y + rng.gen_range(-0.2..0.2),
                        p.z + rng.gen_range(-0.2..0.2),
                    )
                })
                .collect()
        })
        .collect();
    let subunits = Subunits::new(
        noisy_traces,
        vec![0; 4],
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
        vec![1; 4],
    )
    .unwrap();
    let group = find_quaternary_symmetry(&subunits, &SymmetryParameters::default());
    assert_eq!(group.point_group(), PointGroup::Cyclic(4));
    assert_eq!(group.order(), 4);
    for rotation in group.rotations() {
        if !rotation.is_identity_permutation() {
            assert!(rotation.trace_rmsd > 0.0);
            assert!(rotation.trace_rmsd < 1.0);
        }
    }
}
