// File: rotation.rs
// Created: 2025-11-06 15:50:31
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved

use crate::geometry::coordinate::Coordinate;
use crate::geometry::matrix::{AxisAngle, Matrix4};
use crate::symmetry::permutation;

/// One accepted symmetry operation: a subunit permutation together with the
/// rigid transform realizing it and its fit quality.
///
/// `direction` is assigned during classification (0 = co-linear with the
/// principal axis, 1 = perpendicular/other); solvers leave it at 0.
#[derive(Debug, Clone)]
pub struct Rotation {
    pub permutation: Vec<usize>,
    pub transformation: Matrix4,
    pub axis_angle: AxisAngle,
    pub fold: usize,
    pub direction: usize,
    pub subunit_rmsd: f64,
    pub trace_rmsd: f64,
}

impl Rotation {
    /// The E operation over `n` subunits: identity permutation, identity
    /// transform, fold 1. Its axis is back-filled from the principal axis
    /// during classification.
    pub fn identity(n: usize) -> Rotation {
        Rotation {
            permutation: permutation::identity(n),
            transformation: Matrix4::identity(),
            axis_angle: AxisAngle::new(Coordinate::new(0.0, 0.0, 1.0), 0.0),
            fold: 1,
            direction: 0,
            subunit_rmsd: 0.0,
            trace_rmsd: 0.0,
        }
    }

    pub fn is_identity_permutation(&self) -> bool {
        permutation::is_identity(&self.permutation)
    }
}
