// File: mod.rs
// Created: 2025-11-06 09:48:03
// Description:
//    quaternary-structure symmetry detection: subunit summary, candidate
//    solvers, point-group classification
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved

pub mod axes;
pub mod permutation;
pub mod rotation;
pub mod rotation_group;
pub mod scorer;
pub mod solver;
pub mod subunits;

pub use rotation::Rotation;
pub use rotation_group::{PointGroup, RotationGroup};
pub use solver::find_quaternary_symmetry;
pub use subunits::Subunits;

use crate::config::SymmetryParameters;

/// Detection result bundle handed to downstream consumers (axis alignment,
/// visualization): the subunit summary plus the classified rotation group,
/// exposed through read-only accessors.
#[derive(Debug, Clone)]
pub struct QuatSymmetryResult {
    subunits: Subunits,
    rotation_group: RotationGroup,
}

impl QuatSymmetryResult {
    pub fn new(subunits: Subunits, parameters: &SymmetryParameters) -> QuatSymmetryResult {
        let rotation_group = find_quaternary_symmetry(&subunits, parameters);
        QuatSymmetryResult { subunits, rotation_group }
    }

    pub fn get_rotation(&self, i: usize) -> &Rotation {
        self.rotation_group.get_rotation(i)
    }

    pub fn get_point_group(&self) -> PointGroup {
        self.rotation_group.point_group()
    }

    pub fn get_subunits(&self) -> &Subunits {
        &self.subunits
    }

    pub fn rotation_group(&self) -> &RotationGroup {
        &self.rotation_group
    }
}
