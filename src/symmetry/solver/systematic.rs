// File: systematic.rs
// Created: 2025-11-08 13:10:44
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved

use rayon::prelude::*;

use crate::config::SymmetryParameters;
use crate::symmetry::rotation_group::RotationGroup;
use crate::symmetry::solver::{CandidateEvaluator, GroupAccumulator, QuatSymmetrySolver};
use crate::symmetry::subunits::Subunits;
use crate::utils::combination::PermutationIterator;

/// Exhaustive solver for small assemblies: enumerates all N! subunit
/// permutations, lets QCP find the optimal rotation for each
/// correspondence directly (no axis guess needed), and keeps every
/// candidate that passes the shared validation and scoring gates.
/// More robust than axis sampling and, below the dispatch limit, cheaper.
pub struct SystematicSolver<'a> {
    subunits: &'a Subunits,
    parameters: &'a SymmetryParameters,
}

impl<'a> SystematicSolver<'a> {
    pub fn new(subunits: &'a Subunits, parameters: &'a SymmetryParameters) -> Self {
        assert!(
            subunits.size() >= 3,
            "SystematicSolver requires at least three subunits"
        );
        SystematicSolver { subunits, parameters }
    }
}

impl<'a> QuatSymmetrySolver for SystematicSolver<'a> {
    fn solve(&self) -> RotationGroup {
        let evaluator = CandidateEvaluator::new(self.subunits, self.parameters);

        // Structurally valid candidates, in enumeration order
        let candidates: Vec<Vec<usize>> = PermutationIterator::new(self.subunits.size())
            .filter(|perm| evaluator.is_valid_permutation(perm))
            .collect();

        // Parallel prefilter on the subunit-center fit, order preserved;
        // acceptance and group closure stay sequential
        let threshold = self.parameters.rmsd_threshold;
        let survivors: Vec<Vec<usize>> = candidates
            .into_par_iter()
            .filter(|perm| evaluator.center_rmsd(perm) < threshold)
            .collect();

        let mut accumulator = GroupAccumulator::new(&evaluator, self.subunits, self.parameters);
        for perm in &survivors {
            if accumulator.is_full() {
                break;
            }
            accumulator.try_add(perm);
        }
        RotationGroup::classify(accumulator.into_rotations(), self.subunits.size())
    }
}

#[cfg(test)]
mod systematic_solver_tests {
    use super::*;
    use crate::geometry::coordinate::Coordinate;
    use crate::geometry::matrix::Matrix4;
    use crate::symmetry::rotation_group::PointGroup;
    use std::f64::consts::PI;

    fn blob() -> Vec<Coordinate> {
        vec![
            Coordinate::new(12.0, 0.0, 0.0),
            Coordinate::new(13.5, 0.8, 1.1),
            Coordinate::new(12.2, 2.0, 2.3),
            Coordinate::new(11.0, 1.1, 3.0),
            Coordinate::new(12.8, 0.3, 4.2),
        ]
    }

    // Exact synthetic geometry: a tight threshold keeps near-fit spurious
    // operations (e.g. a flipped small blob) out of the accepted set
    fn tight_parameters() -> SymmetryParameters {
        SymmetryParameters {
            rmsd_threshold: 0.5,
            ..Default::default()
        }
    }

    fn cyclic_assembly(n: usize) -> Subunits {
        let axis = Coordinate::new(0.0, 0.0, 1.0);
        let traces: Vec<Vec<Coordinate>> = (0..n)
            .map(|k| {
                let m = Matrix4::about_axis(&axis, 2.0 * PI * k as f64 / n as f64, &Coordinate::zero());
                blob().iter().map(|p| m.transform(p)).collect()
            })
            .collect();
        Subunits::new(
            traces,
            vec![0; n],
            (0..n).map(|i| format!("{}", (b'A' + i as u8) as char)).collect(),
            vec![1; n],
        )
        .unwrap()
    }

    #[test]
    fn test_c3_ring() {
        let subunits = cyclic_assembly(3);
        let parameters = tight_parameters();
        let group = SystematicSolver::new(&subunits, &parameters).solve();
        assert_eq!(group.point_group(), PointGroup::Cyclic(3));
        assert_eq!(group.order(), 3);
        assert!(group.is_complete());
        for rotation in group.rotations() {
            assert!(rotation.subunit_rmsd < 1e-6);
            assert!(rotation.trace_rmsd < 1e-6);
        }
        assert!(group.is_closed());
    }

    #[test]
    fn test_c5_ring() {
        let subunits = cyclic_assembly(5);
        let parameters = tight_parameters();
        let group = SystematicSolver::new(&subunits, &parameters).solve();
        assert_eq!(group.point_group(), PointGroup::Cyclic(5));
        assert_eq!(group.order(), 5);
    }

    #[test]
    fn test_d2_assembly() {
        // Two stacked antiparallel pairs: 2-fold axes along x, y, z
        let base = blob();
        let transforms = [
            Matrix4::identity(),
            Matrix4::about_axis(&Coordinate::new(0.0, 0.0, 1.0), PI, &Coordinate::zero()),
            Matrix4::about_axis(&Coordinate::new(1.0, 0.0, 0.0), PI, &Coordinate::zero()),
            Matrix4::about_axis(&Coordinate::new(0.0, 1.0, 0.0), PI, &Coordinate::zero()),
        ];
        let traces: Vec<Vec<Coordinate>> = transforms
            .iter()
            .map(|m| base.iter().map(|p| m.transform(p)).collect())
            .collect();
        let subunits = Subunits::new(
            traces,
            vec![0; 4],
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            vec![1; 4],
        )
        .unwrap();

        let parameters = tight_parameters();
        let group = SystematicSolver::new(&subunits, &parameters).solve();
        assert_eq!(group.point_group(), PointGroup::Dihedral(2));
        assert_eq!(group.order(), 4);
        assert!(group.is_closed());
    }

    #[test]
    fn test_heteromeric_ring_is_c1() {
        let subunits_homo = cyclic_assembly(4);
        let traces = subunits_homo.traces().to_vec();
        let subunits = Subunits::new(
            traces,
            vec![0, 1, 2, 3],
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            vec![1; 4],
        )
        .unwrap();
        let parameters = tight_parameters();
        let group = SystematicSolver::new(&subunits, &parameters).solve();
        assert_eq!(group.point_group(), PointGroup::Cyclic(1));
        assert_eq!(group.order(), 1);
    }
}
