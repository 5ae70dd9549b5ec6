// File: scorer.rs
// Created: 2025-11-07 11:02:17
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved
// Full-trace validation of a candidate (permutation, transform).

use std::fmt;

use crate::geometry::matrix::Matrix4;
use crate::symmetry::subunits::Subunits;

/// A candidate scored markedly better with reversed terminal pairing than
/// forward needs at least this factor between the squared sums.
const REVERSED_ALIGNMENT_RATIO: f64 = 4.0;

/// Why a candidate cannot be scored. Both cases are rejection signals, not
/// quality metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The permutation maps across different sequence clusters (or traces
    /// of different lengths), so the comparison is meaningless.
    ClusterMismatch,
    /// The permuted traces fit better with N/C terminal direction flipped:
    /// the candidate aligns chains head-to-tail.
    ReversedAlignment,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::ClusterMismatch => write!(f, "cluster mismatch"),
            RejectReason::ReversedAlignment => write!(f, "reversed alignment"),
        }
    }
}

pub struct QuatSuperpositionScorer<'a> {
    subunits: &'a Subunits,
    pseudo_symmetry: bool,
}

impl<'a> QuatSuperpositionScorer<'a> {
    pub fn new(subunits: &'a Subunits, pseudo_symmetry: bool) -> QuatSuperpositionScorer<'a> {
        QuatSuperpositionScorer { subunits, pseudo_symmetry }
    }

    fn check_comparable(&self, permutation: &[usize]) -> Result<(), RejectReason> {
        if permutation.len() != self.subunits.size() {
            return Err(RejectReason::ClusterMismatch);
        }
        if !self.pseudo_symmetry && !self.subunits.has_equivalent_subunits(permutation) {
            return Err(RejectReason::ClusterMismatch);
        }
        // With pseudo-symmetry, cluster ids are ignored but the pointwise
        // comparison still needs equal trace lengths
        for (i, &j) in permutation.iter().enumerate() {
            if j >= self.subunits.size()
                || self.subunits.trace(i).len() != self.subunits.trace(j).len()
            {
                return Err(RejectReason::ClusterMismatch);
            }
        }
        Ok(())
    }

    fn check_trace_direction(
        &self,
        transform: &Matrix4,
        permutation: &[usize],
    ) -> Result<(), RejectReason> {
        let mut forward_sum = 0.0;
        let mut reversed_sum = 0.0;
        for (i, &j) in permutation.iter().enumerate() {
            if i == j {
                continue;
            }
            let moved = self.subunits.trace(i);
            let target = self.subunits.trace(j);
            let first = transform.transform(&moved[0]);
            let last = transform.transform(&moved[moved.len() - 1]);
            forward_sum += first.distance_sq(&target[0]) + last.distance_sq(&target[target.len() - 1]);
            reversed_sum += first.distance_sq(&target[target.len() - 1]) + last.distance_sq(&target[0]);
        }
        if reversed_sum * REVERSED_ALIGNMENT_RATIO < forward_sum {
            return Err(RejectReason::ReversedAlignment);
        }
        Ok(())
    }

    /// RMSD over every point of every permuted subunit trace under
    /// `transform`: transformed trace `i` is compared pointwise against the
    /// original trace `permutation[i]`.
    pub fn calc_calpha_rmsd(
        &self,
        transform: &Matrix4,
        permutation: &[usize],
    ) -> Result<f64, RejectReason> {
        self.check_comparable(permutation)?;
        self.check_trace_direction(transform, permutation)?;

        let mut dev_sum = 0.0;
        let mut point_count = 0usize;
        for (i, &j) in permutation.iter().enumerate() {
            let moved = self.subunits.trace(i);
            let target = self.subunits.trace(j);
            for (m, t) in moved.iter().zip(target.iter()) {
                dev_sum += transform.transform(m).distance_sq(t);
                point_count += 1;
            }
        }
        Ok((dev_sum / point_count as f64).sqrt())
    }

    /// TM-score-like normalized score for length-independent comparison,
    /// with d0 = 1.24 * cbrt(L - 15) - 1.8 per subunit (floored at 0.5).
    pub fn calc_tm_score(
        &self,
        transform: &Matrix4,
        permutation: &[usize],
    ) -> Result<f64, RejectReason> {
        self.tm_score_with_d0(transform, permutation, None)
    }

    /// TM-score variant with d0 taken from a caller-chosen normalization
    /// length, for comparing assemblies of different subunit sizes.
    pub fn calc_tm_score_normalized(
        &self,
        transform: &Matrix4,
        permutation: &[usize],
        norm_length: usize,
    ) -> Result<f64, RejectReason> {
        self.tm_score_with_d0(transform, permutation, Some(norm_length))
    }

    fn tm_score_with_d0(
        &self,
        transform: &Matrix4,
        permutation: &[usize],
        norm_length: Option<usize>,
    ) -> Result<f64, RejectReason> {
        self.check_comparable(permutation)?;
        self.check_trace_direction(transform, permutation)?;

        let mut tm_sum = 0.0;
        let mut point_count = 0usize;
        for (i, &j) in permutation.iter().enumerate() {
            let moved = self.subunits.trace(i);
            let target = self.subunits.trace(j);
            let d0 = tm_score_d0(norm_length.unwrap_or(target.len()));
            let d0_sq = d0 * d0;
            for (m, t) in moved.iter().zip(target.iter()) {
                let dist_sq = transform.transform(m).distance_sq(t);
                tm_sum += 1.0 / (1.0 + dist_sq / d0_sq);
                point_count += 1;
            }
        }
        Ok(tm_sum / point_count as f64)
    }
}

fn tm_score_d0(norm_length: usize) -> f64 {
    if norm_length <= 15 {
        0.5
    } else {
        (1.24 * ((norm_length - 15) as f64).cbrt() - 1.8).max(0.5)
    }
}
