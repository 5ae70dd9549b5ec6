// File: c2.rs
// Created: 2025-11-08 11:47:29
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved

use std::f64::consts::PI;

use crate::config::SymmetryParameters;
use crate::geometry::coordinate::Coordinate;
use crate::geometry::matrix::AxisAngle;
use crate::superpose::qcp;
use crate::symmetry::permutation;
use crate::symmetry::rotation::Rotation;
use crate::symmetry::rotation_group::RotationGroup;
use crate::symmetry::scorer::QuatSuperpositionScorer;
use crate::symmetry::solver::{rotation_about_point, QuatSymmetrySolver};
use crate::symmetry::subunits::Subunits;

/// Search-free solver for exactly two subunits. Two centers carry no
/// rotational information, so the full traces are superposed directly; the
/// result is accepted only if it is a half turn within the angular
/// tolerance and fits within the RMSD threshold.
pub struct C2RotationSolver<'a> {
    subunits: &'a Subunits,
    parameters: &'a SymmetryParameters,
}

impl<'a> C2RotationSolver<'a> {
    pub fn new(subunits: &'a Subunits, parameters: &'a SymmetryParameters) -> Self {
        assert!(
            subunits.size() == 2,
            "C2RotationSolver requires exactly two subunits"
        );
        C2RotationSolver { subunits, parameters }
    }
}

impl<'a> QuatSymmetrySolver for C2RotationSolver<'a> {
    fn solve(&self) -> RotationGroup {
        let subunits = self.subunits;
        if !self.parameters.pseudo_symmetry && subunits.cluster_id(0) != subunits.cluster_id(1) {
            return RotationGroup::trivial(2);
        }
        if subunits.trace(0).len() != subunits.trace(1).len() {
            return RotationGroup::trivial(2);
        }

        // Superpose subunit 2 onto subunit 1 in the centered frame
        let centroid = subunits.centroid();
        let moving: Vec<Coordinate> =
            subunits.trace(1).iter().map(|p| p.sub(&centroid)).collect();
        let fixed: Vec<Coordinate> =
            subunits.trace(0).iter().map(|p| p.sub(&centroid)).collect();
        let (rot, _) = qcp::superpose_rotation_only(&moving, &fixed);

        let transform = rotation_about_point(rot, &centroid);
        let axis_angle = AxisAngle::from_matrix(&transform);
        if (axis_angle.angle - PI).abs() > self.parameters.angle_threshold {
            return RotationGroup::trivial(2);
        }

        let perm = vec![1usize, 0usize];
        let scorer = QuatSuperpositionScorer::new(subunits, self.parameters.pseudo_symmetry);
        let trace_rmsd = match scorer.calc_calpha_rmsd(&transform, &perm) {
            Ok(rmsd) => rmsd,
            Err(_) => return RotationGroup::trivial(2),
        };
        if trace_rmsd >= self.parameters.rmsd_threshold {
            return RotationGroup::trivial(2);
        }

        // Center fit under the accepted half turn
        let centers = subunits.centers();
        let subunit_rmsd = ((transform.transform(&centers[0]).distance_sq(&centers[1])
            + transform.transform(&centers[1]).distance_sq(&centers[0]))
            / 2.0)
            .sqrt();
        if subunit_rmsd >= self.parameters.rmsd_threshold {
            return RotationGroup::trivial(2);
        }

        let rotation = Rotation {
            fold: permutation::order(&perm),
            permutation: perm,
            axis_angle,
            transformation: transform,
            direction: 0,
            subunit_rmsd,
            trace_rmsd,
        };
        RotationGroup::classify(vec![Rotation::identity(2), rotation], 2)
    }
}
