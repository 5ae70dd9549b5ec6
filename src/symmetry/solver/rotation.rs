// File: rotation.rs
// Created: 2025-11-08 16:55:18
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved
// Sampled-axis solver for general subunit counts.

use std::f64::consts::PI;

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::SymmetryParameters;
use crate::geometry::coordinate::Coordinate;
use crate::geometry::matrix::Matrix4;
use crate::symmetry::axes::{sampling_axes, DEFAULT_SPHERE_FREQUENCY, SPHERE_AXES};
use crate::symmetry::rotation_group::RotationGroup;
use crate::symmetry::solver::c2::C2RotationSolver;
use crate::symmetry::solver::{CandidateEvaluator, GroupAccumulator, QuatSymmetrySolver};
use crate::symmetry::subunits::Subunits;

/// Sampled axis search: candidate rotation angles are 2*pi/fold for every
/// fold dividing the subunit count; candidate axes are the static sphere
/// grid plus the assembly's principal inertia axes. Each axis-angle pair
/// proposes a permutation by nearest-neighbor matching of rotated subunit
/// centers, and surviving permutations are re-superposed exactly with QCP.
/// Sampling density bounds completeness; the discovered group is always
/// closed algebraically but may be a subgroup of the true symmetry.
pub struct RotationSolver<'a> {
    subunits: &'a Subunits,
    parameters: &'a SymmetryParameters,
}

impl<'a> RotationSolver<'a> {
    pub fn new(subunits: &'a Subunits, parameters: &'a SymmetryParameters) -> Self {
        assert!(
            subunits.size() >= 2,
            "RotationSolver requires at least two subunits"
        );
        RotationSolver { subunits, parameters }
    }

    fn candidate_axes(&self) -> Vec<Coordinate> {
        let mut axes = if self.parameters.sphere_frequency == DEFAULT_SPHERE_FREQUENCY {
            SPHERE_AXES.clone()
        } else {
            sampling_axes(self.parameters.sphere_frequency)
        };
        // The principal inertia axes coincide with the symmetry axes for
        // ideal cyclic and dihedral arrangements; adding them makes those
        // cases exact regardless of grid density
        axes.extend_from_slice(&self.subunits.moments_of_inertia().principal_axes);
        axes
    }

    fn candidate_folds(&self) -> Vec<usize> {
        let n = self.subunits.size();
        (2..=n.min(self.parameters.max_order))
            .filter(|fold| n % fold == 0)
            .collect()
    }
}

impl<'a> QuatSymmetrySolver for RotationSolver<'a> {
    fn solve(&self) -> RotationGroup {
        let n = self.subunits.size();
        if n == 2 {
            // Two centers carry no rotational information for the
            // nearest-neighbor stage; superpose the traces directly
            return C2RotationSolver::new(self.subunits, self.parameters).solve();
        }

        let evaluator = CandidateEvaluator::new(self.subunits, self.parameters);
        let centers = self.subunits.centers();
        let threshold = (self.subunits.min_pairwise_center_distance() / 2.0)
            .max(self.parameters.rmsd_threshold);
        let grid = CenterGrid::new(centers, threshold);

        let folds = self.candidate_folds();
        let axes = self.candidate_axes();

        // Parallel sweep over candidate axes, order preserved; duplicate
        // filtering and acceptance happen in the sequential reduce below
        let candidates: Vec<Vec<Vec<usize>>> = axes
            .par_iter()
            .map(|axis| {
                let mut local: Vec<Vec<usize>> = Vec::new();
                for &fold in &folds {
                    let angle = 2.0 * PI / fold as f64;
                    let m = Matrix4::about_axis(axis, angle, &Coordinate::zero());
                    if let Some(perm) = grid.match_permutation(centers, &m, threshold) {
                        if !local.contains(&perm) {
                            local.push(perm);
                        }
                    }
                }
                local
            })
            .collect();

        let mut accumulator = GroupAccumulator::new(&evaluator, self.subunits, self.parameters);
        let mut submitted: FxHashSet<Vec<usize>> = FxHashSet::default();
        'outer: for axis_candidates in candidates {
            for perm in axis_candidates {
                if accumulator.is_full() {
                    break 'outer;
                }
                if submitted.insert(perm.clone()) {
                    accumulator.try_add(&perm);
                }
            }
        }
        RotationGroup::classify(accumulator.into_rotations(), n)
    }
}

/// Spatial hash over the original subunit centers for nearest-neighbor
/// permutation recovery. Cell size equals the matching threshold, so a
/// query only has to scan its own cell and the 26 neighbors.
pub(crate) struct CenterGrid {
    spacing: f64,
    cells: FxHashMap<(i64, i64, i64), Vec<usize>>,
}

impl CenterGrid {
    pub fn new(centers: &[Coordinate], spacing: f64) -> CenterGrid {
        let spacing = if spacing > 0.0 { spacing } else { 1.0 };
        let mut cells: FxHashMap<(i64, i64, i64), Vec<usize>> = FxHashMap::default();
        for (i, c) in centers.iter().enumerate() {
            cells.entry(Self::cell_of(c, spacing)).or_default().push(i);
        }
        CenterGrid { spacing, cells }
    }

    fn cell_of(c: &Coordinate, spacing: f64) -> (i64, i64, i64) {
        (
            (c.x / spacing).floor() as i64,
            (c.y / spacing).floor() as i64,
            (c.z / spacing).floor() as i64,
        )
    }

    /// Index of the center nearest to `point` within `max_dist`.
    pub fn nearest_within(
        &self,
        centers: &[Coordinate],
        point: &Coordinate,
        max_dist: f64,
    ) -> Option<usize> {
        let (cx, cy, cz) = Self::cell_of(point, self.spacing);
        let mut best: Option<(usize, f64)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(indices) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) {
                        for &i in indices {
                            let d = centers[i].distance(point);
                            if d <= max_dist && best.map_or(true, |(_, bd)| d < bd) {
                                best = Some((i, d));
                            }
                        }
                    }
                }
            }
        }
        best.map(|(i, _)| i)
    }

    /// Matches each center rotated by `transform` to its nearest original
    /// center. Returns the permutation only if every point matches, the
    /// matches form a bijection, and the RMS residual over all matches
    /// stays within the threshold.
    pub fn match_permutation(
        &self,
        centers: &[Coordinate],
        transform: &Matrix4,
        threshold: f64,
    ) -> Option<Vec<usize>> {
        let n = centers.len();
        let mut perm = Vec::with_capacity(n);
        let mut matched = vec![false; n];
        let mut residual_sum = 0.0;
        for c in centers {
            let moved = transform.transform(c);
            let j = self.nearest_within(centers, &moved, threshold)?;
            if matched[j] {
                return None;
            }
            matched[j] = true;
            residual_sum += moved.distance_sq(&centers[j]);
            perm.push(j);
        }
        if (residual_sum / n as f64).sqrt() > threshold {
            return None;
        }
        Some(perm)
    }
}
