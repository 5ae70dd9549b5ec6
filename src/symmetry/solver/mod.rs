// File: mod.rs
// Created: 2025-11-08 10:31:02
// Description:
//    solvers producing a RotationGroup from a Subunits input; the entry
//    point dispatches on subunit count
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved

pub mod c2;
pub mod rotation;
pub mod systematic;

use rustc_hash::FxHashSet;

use crate::config::SymmetryParameters;
use crate::geometry::coordinate::Coordinate;
use crate::geometry::matrix::{AxisAngle, Matrix4};
use crate::superpose::qcp;
use crate::symmetry::permutation;
use crate::symmetry::rotation::Rotation;
use crate::symmetry::rotation_group::RotationGroup;
use crate::symmetry::scorer::QuatSuperpositionScorer;
use crate::symmetry::subunits::Subunits;

use c2::C2RotationSolver;
use rotation::RotationSolver;
use systematic::SystematicSolver;

/// Exhaustive permutation search stays tractable below this subunit count.
pub const SYSTEMATIC_SOLVER_LIMIT: usize = 9;

pub trait QuatSymmetrySolver {
    fn solve(&self) -> RotationGroup;
}

/// Entry point: picks a solver by subunit count. All solvers constrain
/// accepted permutation folds to divisors of the subunit count and return
/// the trivial C1 group when nothing survives validation.
pub fn find_quaternary_symmetry(
    subunits: &Subunits,
    parameters: &SymmetryParameters,
) -> RotationGroup {
    let n = subunits.size();
    if n < 2 {
        return RotationGroup::trivial(n);
    }
    if n == 2 {
        return C2RotationSolver::new(subunits, parameters).solve();
    }
    if n < SYSTEMATIC_SOLVER_LIMIT {
        SystematicSolver::new(subunits, parameters).solve()
    } else {
        RotationSolver::new(subunits, parameters).solve()
    }
}

/// Validates and superposes candidate permutations shared by all solvers.
pub(crate) struct CandidateEvaluator<'a> {
    subunits: &'a Subunits,
    parameters: &'a SymmetryParameters,
    scorer: QuatSuperpositionScorer<'a>,
}

impl<'a> CandidateEvaluator<'a> {
    pub fn new(subunits: &'a Subunits, parameters: &'a SymmetryParameters) -> Self {
        CandidateEvaluator {
            subunits,
            parameters,
            scorer: QuatSuperpositionScorer::new(subunits, parameters.pseudo_symmetry),
        }
    }

    /// Cheap structural checks: bijection, sequence-cluster respect, fold
    /// dividing the subunit count, fold within the configured cap. The
    /// identity permutation is not valid here -- the single E operation is
    /// seeded by the accumulator.
    pub fn is_valid_permutation(&self, perm: &[usize]) -> bool {
        if perm.len() != self.subunits.size() || !permutation::is_bijection(perm) {
            return false;
        }
        if permutation::is_identity(perm) {
            return false;
        }
        if !self.parameters.pseudo_symmetry && !self.subunits.has_equivalent_subunits(perm) {
            return false;
        }
        let fold = permutation::order(perm);
        if fold > self.parameters.max_order {
            return false;
        }
        self.subunits.size() % fold == 0
    }

    /// Optimal rotation for the subunit centers under the correspondence
    /// `perm`, without the trace-level gate. Used as a cheap parallel
    /// prefilter.
    pub fn center_rmsd(&self, perm: &[usize]) -> f64 {
        let centers = self.subunits.centers();
        let fixed: Vec<Coordinate> = perm.iter().map(|&j| centers[j]).collect();
        let (_, rmsd) = qcp::superpose_rotation_only(centers, &fixed);
        rmsd
    }

    /// Full evaluation: superpose subunit centers with QCP, lift the
    /// rotation into the original coordinate frame about the global
    /// centroid, then gate on the full-trace RMSD from the scorer.
    pub fn evaluate(&self, perm: &[usize]) -> Option<Rotation> {
        let centers = self.subunits.centers();
        let fixed: Vec<Coordinate> = perm.iter().map(|&j| centers[j]).collect();
        let (rot, subunit_rmsd) = qcp::superpose_rotation_only(centers, &fixed);
        if subunit_rmsd >= self.parameters.rmsd_threshold {
            return None;
        }

        let transform = rotation_about_point(rot, &self.subunits.centroid());
        let trace_rmsd = match self.scorer.calc_calpha_rmsd(&transform, perm) {
            Ok(rmsd) => rmsd,
            Err(_) => return None,
        };
        if trace_rmsd >= self.parameters.rmsd_threshold {
            return None;
        }

        Some(Rotation {
            permutation: perm.to_vec(),
            axis_angle: AxisAngle::from_matrix(&transform),
            transformation: transform,
            fold: permutation::order(perm),
            direction: 0,
            subunit_rmsd,
            trace_rmsd,
        })
    }
}

/// Lifts a rotation from the centered frame to the original frame:
/// rotate about `origin` instead of about zero.
pub(crate) fn rotation_about_point(rot: [[f64; 3]; 3], origin: &Coordinate) -> Matrix4 {
    let rotated_origin = qcp::rotate_point(origin, &rot);
    Matrix4::from_rot_tran(
        rot,
        [
            origin.x - rotated_origin.x,
            origin.y - rotated_origin.y,
            origin.z - rotated_origin.z,
        ],
    )
}

/// Accumulates accepted rotations, memoizes seen permutations, and extends
/// the set by permutation-group closure after every acceptance. Seeded with
/// the single E operation; stops accepting once the maximum plausible group
/// size is reached.
pub(crate) struct GroupAccumulator<'a, 'b> {
    evaluator: &'b CandidateEvaluator<'a>,
    rotations: Vec<Rotation>,
    seen: FxHashSet<Vec<usize>>,
    max_size: usize,
}

impl<'a, 'b> GroupAccumulator<'a, 'b> {
    pub fn new(evaluator: &'b CandidateEvaluator<'a>, subunits: &Subunits, parameters: &SymmetryParameters) -> Self {
        let n = subunits.size();
        let identity = Rotation::identity(n);
        let mut seen = FxHashSet::default();
        seen.insert(identity.permutation.clone());
        GroupAccumulator {
            evaluator,
            rotations: vec![identity],
            seen,
            max_size: n.min(parameters.max_order),
        }
    }

    pub fn is_full(&self) -> bool {
        self.rotations.len() >= self.max_size
    }

    /// Evaluates one candidate permutation; on acceptance, immediately
    /// closes the accepted set under composition, admitting closure
    /// members that validate and score without further geometric search.
    pub fn try_add(&mut self, perm: &[usize]) {
        if self.is_full() || self.seen.contains(perm) {
            return;
        }
        self.seen.insert(perm.to_vec());
        if !self.evaluator.is_valid_permutation(perm) {
            return;
        }
        if let Some(rotation) = self.evaluator.evaluate(perm) {
            self.rotations.push(rotation);
            self.extend_by_closure();
        }
    }

    fn extend_by_closure(&mut self) {
        let generators: Vec<Vec<usize>> = self
            .rotations
            .iter()
            .map(|r| r.permutation.clone())
            .collect();
        for member in permutation::complete_group(&generators) {
            if self.is_full() {
                break;
            }
            if self.seen.contains(&member) {
                continue;
            }
            self.seen.insert(member.clone());
            if !self.evaluator.is_valid_permutation(&member) {
                continue;
            }
            if let Some(rotation) = self.evaluator.evaluate(&member) {
                self.rotations.push(rotation);
            }
        }
    }

    pub fn into_rotations(self) -> Vec<Rotation> {
        self.rotations
    }
}
