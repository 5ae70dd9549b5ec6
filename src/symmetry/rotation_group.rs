// File: rotation_group.rs
// Created: 2025-11-07 09:14:26
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved
// Point group classification of an accepted rotation set.

use std::fmt;

use crate::symmetry::permutation;
use crate::symmetry::rotation::Rotation;

/// Axes within this dot product of the principal axis count as co-linear
/// (~25 degrees).
const PRINCIPAL_AXIS_DOT_THRESHOLD: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointGroup {
    Cyclic(usize),
    Dihedral(usize),
    Tetrahedral,
    Octahedral,
    Icosahedral,
}

impl PointGroup {
    /// Theoretical number of rotations in the group.
    pub fn expected_order(&self) -> usize {
        match self {
            PointGroup::Cyclic(n) => *n,
            PointGroup::Dihedral(n) => 2 * n,
            PointGroup::Tetrahedral => 12,
            PointGroup::Octahedral => 24,
            PointGroup::Icosahedral => 60,
        }
    }
}

impl fmt::Display for PointGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointGroup::Cyclic(n) => write!(f, "C{}", n),
            PointGroup::Dihedral(n) => write!(f, "D{}", n),
            PointGroup::Tetrahedral => write!(f, "T"),
            PointGroup::Octahedral => write!(f, "O"),
            PointGroup::Icosahedral => write!(f, "I"),
        }
    }
}

/// Ordered, classified set of symmetry operations. Built exactly once by
/// `classify` (or `trivial`) and immutable afterwards.
#[derive(Debug, Clone)]
pub struct RotationGroup {
    rotations: Vec<Rotation>,
    point_group: PointGroup,
    complete: bool,
}

impl RotationGroup {
    /// Single-identity C1 group over `n` subunits: the universal fallback
    /// when no symmetry survives validation.
    pub fn trivial(n: usize) -> RotationGroup {
        RotationGroup {
            rotations: vec![Rotation::identity(n)],
            point_group: PointGroup::Cyclic(1),
            complete: true,
        }
    }

    /// Classifies an accepted rotation set into its point group.
    ///
    /// Finds the principal axis (largest fold, ties broken by lowest trace
    /// RMSD), back-fills the E operation's axis and fold from it, assigns
    /// each rotation's direction relative to the principal axis, then
    /// decides cubic / dihedral / cyclic from the axis census. If the
    /// number of rotations does not match the theoretical order of the
    /// decided group, all rotations are discarded and the trivial C1 group
    /// over `subunit_count` subunits is returned instead.
    pub fn classify(mut rotations: Vec<Rotation>, subunit_count: usize) -> RotationGroup {
        if rotations.is_empty() {
            return RotationGroup::trivial(subunit_count);
        }

        let principal = principal_axis_index(&rotations);
        let principal_axis = rotations[principal].axis_angle.axis;
        let highest_order = rotations[principal].fold;

        // By convention E belongs to the principal axis
        for rotation in rotations.iter_mut() {
            if rotation.is_identity_permutation() {
                rotation.axis_angle.axis = principal_axis;
                rotation.axis_angle.angle = 0.0;
                rotation.fold = highest_order;
            }
        }

        for rotation in rotations.iter_mut() {
            let dot = rotation.axis_angle.axis.dot(&principal_axis).abs();
            rotation.direction = if dot > PRINCIPAL_AXIS_DOT_THRESHOLD { 0 } else { 1 };
        }

        let higher_order_axis_count = rotations
            .iter()
            .filter(|r| r.fold > 2 && r.direction == 1)
            .count();
        let two_folds_perpendicular = rotations
            .iter()
            .filter(|r| r.fold == 2 && r.direction == 1)
            .count();

        let point_group = if higher_order_axis_count > 1 {
            match highest_order {
                5 => Some(PointGroup::Icosahedral),
                4 => Some(PointGroup::Octahedral),
                3 => Some(PointGroup::Tetrahedral),
                _ => None,
            }
        } else if two_folds_perpendicular.abs_diff(highest_order) <= 1 && highest_order > 1 {
            Some(PointGroup::Dihedral(highest_order))
        } else {
            Some(PointGroup::Cyclic(highest_order.max(1)))
        };

        let point_group = match point_group {
            Some(pg) => pg,
            None => return RotationGroup::trivial(subunit_count),
        };
        if rotations.len() != point_group.expected_order() {
            return RotationGroup::trivial(subunit_count);
        }

        // Canonical order for downstream axis-alignment consumers:
        // principal-axis rotations first, then by descending fold, then by
        // ascending rotation angle
        rotations.sort_by(|a, b| {
            a.direction
                .cmp(&b.direction)
                .then(b.fold.cmp(&a.fold))
                .then(a.axis_angle.angle.partial_cmp(&b.axis_angle.angle).unwrap())
        });

        RotationGroup {
            rotations,
            point_group,
            complete: true,
        }
    }

    pub fn order(&self) -> usize {
        self.rotations.len()
    }

    pub fn get_rotation(&self, i: usize) -> &Rotation {
        &self.rotations[i]
    }

    pub fn rotations(&self) -> &[Rotation] {
        &self.rotations
    }

    pub fn point_group(&self) -> PointGroup {
        self.point_group
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn permutations(&self) -> Vec<Vec<usize>> {
        self.rotations.iter().map(|r| r.permutation.clone()).collect()
    }

    /// Group closure self-check: composing any two member permutations
    /// yields a member permutation.
    pub fn is_closed(&self) -> bool {
        let perms = self.permutations();
        for a in &perms {
            for b in &perms {
                let c = permutation::compose(a, b);
                if !perms.contains(&c) {
                    return false;
                }
            }
        }
        true
    }
}

fn principal_axis_index(rotations: &[Rotation]) -> usize {
    let mut best = 0;
    for (i, rotation) in rotations.iter().enumerate() {
        if rotation.fold > rotations[best].fold
            || (rotation.fold == rotations[best].fold
                && rotation.trace_rmsd < rotations[best].trace_rmsd)
        {
            best = i;
        }
    }
    best
}
