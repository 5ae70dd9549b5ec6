//! # About project
//!
//! Quatsymm detects the rotational symmetry of quaternary protein
//! structures: given per-subunit coordinate traces and sequence-cluster
//! labels, it recovers the point group (C1, Cn, Dn, T, O, I) and the
//! rigid-body operations realizing it.

pub mod config;
pub mod geometry;
pub mod superpose;
pub mod symmetry;
pub mod utils;

pub mod prelude {
    pub use crate::config::SymmetryParameters;
    pub use crate::geometry::coordinate::Coordinate;
    pub use crate::geometry::matrix::{AxisAngle, Matrix4};
    pub use crate::symmetry::{
        find_quaternary_symmetry, PointGroup, QuatSymmetryResult, Rotation, RotationGroup,
        Subunits,
    };
    pub use crate::utils::log::{log_msg, print_log_msg, DONE, FAIL, INFO, WARN};
}
