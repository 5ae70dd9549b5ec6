// File: matrix.rs
// Created: 2025-11-03 10:12:44
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved
// 4x4 homogeneous rigid transforms and axis-angle extraction

use crate::geometry::coordinate::Coordinate;

const AXIS_EXTRACTION_EPSILON: f64 = 1e-8;

/// Row-major 4x4 homogeneous transform. Rigid transforms only:
/// upper-left 3x3 rotation, last column translation, bottom row (0,0,0,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    pub data: [[f64; 4]; 4],
}

impl Matrix4 {
    pub fn identity() -> Matrix4 {
        Matrix4 {
            data: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn from_rot_tran(rot: [[f64; 3]; 3], tran: [f64; 3]) -> Matrix4 {
        let mut data = [[0.0; 4]; 4];
        for i in 0..3 {
            for j in 0..3 {
                data[i][j] = rot[i][j];
            }
            data[i][3] = tran[i];
        }
        data[3][3] = 1.0;
        Matrix4 { data }
    }

    pub fn from_translation(tran: [f64; 3]) -> Matrix4 {
        Matrix4::from_rot_tran(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            tran,
        )
    }

    /// Rotation by `angle` around `axis` passing through `origin`.
    pub fn about_axis(axis: &Coordinate, angle: f64, origin: &Coordinate) -> Matrix4 {
        let u = axis.normalize();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let rot = [
            [
                c + u.x * u.x * t,
                u.x * u.y * t - u.z * s,
                u.x * u.z * t + u.y * s,
            ],
            [
                u.y * u.x * t + u.z * s,
                c + u.y * u.y * t,
                u.y * u.z * t - u.x * s,
            ],
            [
                u.z * u.x * t - u.y * s,
                u.z * u.y * t + u.x * s,
                c + u.z * u.z * t,
            ],
        ];
        // translate(origin) * rot * translate(-origin)
        let rotated_origin = [
            rot[0][0] * origin.x + rot[0][1] * origin.y + rot[0][2] * origin.z,
            rot[1][0] * origin.x + rot[1][1] * origin.y + rot[1][2] * origin.z,
            rot[2][0] * origin.x + rot[2][1] * origin.y + rot[2][2] * origin.z,
        ];
        let tran = [
            origin.x - rotated_origin[0],
            origin.y - rotated_origin[1],
            origin.z - rotated_origin[2],
        ];
        Matrix4::from_rot_tran(rot, tran)
    }

    pub fn multiply(&self, other: &Matrix4) -> Matrix4 {
        let mut data = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    data[i][j] += self.data[i][k] * other.data[k][j];
                }
            }
        }
        Matrix4 { data }
    }

    pub fn transform(&self, point: &Coordinate) -> Coordinate {
        let m = &self.data;
        Coordinate {
            x: m[0][0] * point.x + m[0][1] * point.y + m[0][2] * point.z + m[0][3],
            y: m[1][0] * point.x + m[1][1] * point.y + m[1][2] * point.z + m[1][3],
            z: m[2][0] * point.x + m[2][1] * point.y + m[2][2] * point.z + m[2][3],
        }
    }

    pub fn rotation_part(&self) -> [[f64; 3]; 3] {
        let mut rot = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                rot[i][j] = self.data[i][j];
            }
        }
        rot
    }

    pub fn translation_part(&self) -> [f64; 3] {
        [self.data[0][3], self.data[1][3], self.data[2][3]]
    }

    /// Inverse of a rigid transform: transpose the rotation, negate the
    /// rotated translation.
    pub fn rigid_inverse(&self) -> Matrix4 {
        let rot = self.rotation_part();
        let tran = self.translation_part();
        let mut rot_t = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                rot_t[i][j] = rot[j][i];
            }
        }
        let inv_tran = [
            -(rot_t[0][0] * tran[0] + rot_t[0][1] * tran[1] + rot_t[0][2] * tran[2]),
            -(rot_t[1][0] * tran[0] + rot_t[1][1] * tran[1] + rot_t[1][2] * tran[2]),
            -(rot_t[2][0] * tran[0] + rot_t[2][1] * tran[1] + rot_t[2][2] * tran[2]),
        ];
        Matrix4::from_rot_tran(rot_t, inv_tran)
    }

    pub fn is_identity(&self, eps: f64) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                if (self.data[i][j] - expected).abs() > eps {
                    return false;
                }
            }
        }
        true
    }
}

/// Rotation axis and angle extracted from a transform's rotation part.
/// The angle is in [0, pi]; the axis is a unit vector.
#[derive(Debug, Clone, Copy)]
pub struct AxisAngle {
    pub axis: Coordinate,
    pub angle: f64,
}

impl AxisAngle {
    pub fn new(axis: Coordinate, angle: f64) -> AxisAngle {
        AxisAngle { axis: axis.normalize(), angle }
    }

    pub fn from_matrix(matrix: &Matrix4) -> AxisAngle {
        let r = matrix.rotation_part();
        let trace = r[0][0] + r[1][1] + r[2][2];
        let cos_angle = ((trace - 1.0) / 2.0).clamp(-1.0, 1.0);
        let angle = cos_angle.acos();
        let sin_angle = angle.sin();

        if sin_angle > AXIS_EXTRACTION_EPSILON {
            let axis = Coordinate::new(
                r[2][1] - r[1][2],
                r[0][2] - r[2][0],
                r[1][0] - r[0][1],
            )
            .scale(1.0 / (2.0 * sin_angle));
            return AxisAngle { axis: axis.normalize(), angle };
        }

        if cos_angle > 0.0 {
            // Near-identity rotation: the axis is undefined, pick z.
            return AxisAngle { axis: Coordinate::new(0.0, 0.0, 1.0), angle };
        }

        // 180-degree rotation: recover the axis from R + I, whose columns
        // are all parallel to the axis. Use the largest diagonal entry.
        let xx = (r[0][0] + 1.0) / 2.0;
        let yy = (r[1][1] + 1.0) / 2.0;
        let zz = (r[2][2] + 1.0) / 2.0;
        let axis = if xx >= yy && xx >= zz {
            let x = xx.max(0.0).sqrt();
            Coordinate::new(x, (r[0][1] + r[1][0]) / (4.0 * x), (r[0][2] + r[2][0]) / (4.0 * x))
        } else if yy >= zz {
            let y = yy.max(0.0).sqrt();
            Coordinate::new((r[0][1] + r[1][0]) / (4.0 * y), y, (r[1][2] + r[2][1]) / (4.0 * y))
        } else {
            let z = zz.max(0.0).sqrt();
            Coordinate::new((r[0][2] + r[2][0]) / (4.0 * z), (r[1][2] + r[2][1]) / (4.0 * z), z)
        };
        AxisAngle { axis: axis.normalize(), angle }
    }
}
