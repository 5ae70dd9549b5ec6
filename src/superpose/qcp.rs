// File: qcp.rs
// Created: 2025-11-05 14:02:33
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved

// QCP (quaternion characteristic polynomial) superposition.
// Original code from BioPython. Implemented in Rust.
// reference: https://github.com/biopython/biopython/blob/master/Bio/PDB/qcprot.py
// C reference: https://theobald.brandeis.edu/qcp/

use crate::geometry::coordinate::{centroid, Coordinate};
use crate::geometry::matrix::Matrix4;

const EIGENVALUE_PRECISION: f64 = 1e-11;
const EIGENVECTOR_PRECISION: f64 = 1e-6;
const NEWTON_ITERATIONS: usize = 50;

pub const IDENTITY_ROTATION: [[f64; 3]; 3] =
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Inner-product matrix between two equal-length point sets:
/// `a[i][j] = sum_k fixed[k][i] * moving[k][j]`, plus `e0`, half the sum of
/// squared norms of both sets.
fn inner_product(moving: &[Coordinate], fixed: &[Coordinate]) -> ([[f64; 3]; 3], f64) {
    let mut a = [[0.0f64; 3]; 3];
    let mut g = 0.0;
    for (m, f) in moving.iter().zip(fixed.iter()) {
        g += m.norm_sq() + f.norm_sq();
        let fa = f.to_array();
        let ma = m.to_array();
        for i in 0..3 {
            for j in 0..3 {
                a[i][j] += fa[i] * ma[j];
            }
        }
    }
    (a, g * 0.5)
}

/// Optimal rotation and RMSD for two equal-length, pre-centered point sets.
/// The returned matrix maps `moving` onto `fixed`. Degenerate inputs
/// (fewer than two points, all four adjoint columns numerically zero)
/// yield the identity rotation and a finite RMSD.
pub fn superpose_rotation_only(
    moving: &[Coordinate],
    fixed: &[Coordinate],
) -> ([[f64; 3]; 3], f64) {
    assert!(
        moving.len() == fixed.len(),
        "Moving and fixed point sets differ in size"
    );
    if moving.len() < 2 {
        let rmsd = if moving.is_empty() {
            0.0
        } else {
            moving[0].distance(&fixed[0])
        };
        return (IDENTITY_ROTATION, rmsd);
    }
    let (a, e0) = inner_product(moving, fixed);
    qcp(&a, e0, moving.len())
}

/// Full rigid superposition: rotation about the moving set's centroid plus
/// the centroid-to-centroid translation. Returns the 4x4 transform and the
/// RMSD after applying it.
pub fn superpose_with_translation(
    moving: &[Coordinate],
    fixed: &[Coordinate],
) -> (Matrix4, f64) {
    assert!(
        moving.len() == fixed.len(),
        "Moving and fixed point sets differ in size"
    );
    if moving.is_empty() {
        return (Matrix4::identity(), 0.0);
    }
    let com_moving = centroid(moving);
    let com_fixed = centroid(fixed);
    let centered_moving: Vec<Coordinate> =
        moving.iter().map(|c| c.sub(&com_moving)).collect();
    let centered_fixed: Vec<Coordinate> =
        fixed.iter().map(|c| c.sub(&com_fixed)).collect();

    let (rot, _) = superpose_rotation_only(&centered_moving, &centered_fixed);

    let rotated_com = rotate_point(&com_moving, &rot);
    let tran = [
        com_fixed.x - rotated_com.x,
        com_fixed.y - rotated_com.y,
        com_fixed.z - rotated_com.z,
    ];
    let transform = Matrix4::from_rot_tran(rot, tran);

    // Recalculate the RMSD from the actually transformed coordinates
    let mut dev_sum = 0.0;
    for (m, f) in moving.iter().zip(fixed.iter()) {
        dev_sum += transform.transform(m).distance_sq(f);
    }
    (transform, (dev_sum / moving.len() as f64).sqrt())
}

pub fn rotate_point(coord: &Coordinate, rot: &[[f64; 3]; 3]) -> Coordinate {
    Coordinate {
        x: coord.x * rot[0][0] + coord.y * rot[0][1] + coord.z * rot[0][2],
        y: coord.x * rot[1][0] + coord.y * rot[1][1] + coord.z * rot[1][2],
        z: coord.x * rot[2][0] + coord.y * rot[2][1] + coord.z * rot[2][2],
    }
}

fn qcp(a: &[[f64; 3]; 3], e0: f64, natoms: usize) -> ([[f64; 3]; 3], f64) {
    let sxx = a[0][0];
    let sxy = a[0][1];
    let sxz = a[0][2];
    let syx = a[1][0];
    let syy = a[1][1];
    let syz = a[1][2];
    let szx = a[2][0];
    let szy = a[2][1];
    let szz = a[2][2];

    let sxx2 = sxx * sxx;
    let syy2 = syy * syy;
    let szz2 = szz * szz;
    let sxy2 = sxy * sxy;
    let syz2 = syz * syz;
    let sxz2 = sxz * sxz;
    let syx2 = syx * syx;
    let szy2 = szy * szy;
    let szx2 = szx * szx;

    let syz_szy_m_syy_szz2 = 2.0 * (syz * szy - syy * szz);
    let sxx2_syy2_szz2_syz2_szy2 = syy2 + szz2 - sxx2 + syz2 + szy2;

    let c2 = -2.0 * (sxx2 + syy2 + szz2 + sxy2 + syx2 + sxz2 + szx2 + syz2 + szy2);
    let c1 = 8.0
        * (sxx * syz * szy + syy * szx * sxz + szz * sxy * syx
            - sxx * syy * szz
            - syz * szx * sxy
            - szy * syx * sxz);

    let sxz_p_szx = sxz + szx;
    let syz_p_szy = syz + szy;
    let sxy_p_syx = sxy + syx;
    let syz_m_szy = syz - szy;
    let sxz_m_szx = sxz - szx;
    let sxy_m_syx = sxy - syx;
    let sxx_p_syy = sxx + syy;
    let sxx_m_syy = sxx - syy;
    let sxy2_sxz2_syx2_szx2 = sxy2 + sxz2 - syx2 - szx2;

    let neg_sxz_p_szx = -sxz_p_szx;
    let neg_sxz_m_szx = -sxz_m_szx;
    let neg_sxy_m_syx = -sxy_m_syx;
    let sxx_p_syy_p_szz = sxx_p_syy + szz;

    let c0 = sxy2_sxz2_syx2_szx2 * sxy2_sxz2_syx2_szx2
        + (sxx2_syy2_szz2_syz2_szy2 + syz_szy_m_syy_szz2)
            * (sxx2_syy2_szz2_syz2_szy2 - syz_szy_m_syy_szz2)
        + (neg_sxz_p_szx * (syz_m_szy) + (sxy_m_syx) * (sxx_m_syy - szz))
            * (neg_sxz_m_szx * (syz_p_szy) + (sxy_m_syx) * (sxx_m_syy + szz))
        + (neg_sxz_p_szx * (syz_p_szy) - (sxy_p_syx) * (sxx_p_syy - szz))
            * (neg_sxz_m_szx * (syz_m_szy) - (sxy_p_syx) * sxx_p_syy_p_szz)
        + ((sxy_p_syx) * (syz_p_szy) + (sxz_p_szx) * (sxx_m_syy + szz))
            * (neg_sxy_m_syx * (syz_m_szy) + (sxz_p_szx) * sxx_p_syy_p_szz)
        + ((sxy_p_syx) * (syz_m_szy) + (sxz_m_szx) * (sxx_m_syy - szz))
            * (neg_sxy_m_syx * (syz_p_szy) + (sxz_m_szx) * (sxx_p_syy - szz));

    // Newton-Raphson on the quartic characteristic polynomial, starting
    // from the upper bound e0
    let mut mx_eigenv = e0;
    for _ in 0..NEWTON_ITERATIONS {
        let oldg = mx_eigenv;

        let x2 = mx_eigenv * mx_eigenv;
        let b = (x2 + c2) * mx_eigenv;
        let a_poly = b + c1;

        let f = a_poly * mx_eigenv + c0;
        let f_prime = 2.0 * x2 * mx_eigenv + b + a_poly;

        let delta = f / (f_prime + EIGENVALUE_PRECISION); // avoid division by zero
        mx_eigenv = (mx_eigenv - delta).abs();
        if (mx_eigenv - oldg).abs() < (EIGENVALUE_PRECISION * mx_eigenv) {
            break;
        }
    }

    let rmsd = (2.0 * (e0 - mx_eigenv).max(0.0) / natoms as f64).sqrt();

    let a11 = sxx_p_syy + szz - mx_eigenv;
    let a12 = syz_m_szy;
    let a13 = neg_sxz_m_szx;
    let a14 = sxy_m_syx;
    let a21 = syz_m_szy;
    let a22 = sxx_m_syy - szz - mx_eigenv;
    let a23 = sxy_p_syx;
    let a24 = sxz_p_szx;
    let a31 = a13;
    let a32 = a23;
    let a33 = syy - sxx - szz - mx_eigenv;
    let a34 = syz_p_szy;
    let a41 = a14;
    let a42 = a24;
    let a43 = a34;
    let a44 = szz - sxx_p_syy - mx_eigenv;

    let a3344_4334 = a33 * a44 - a43 * a34;
    let a3244_4234 = a32 * a44 - a42 * a34;
    let a3243_4233 = a32 * a43 - a42 * a33;
    let a3143_4133 = a31 * a43 - a41 * a33;
    let a3144_4134 = a31 * a44 - a41 * a34;
    let a3142_4132 = a31 * a42 - a41 * a32;

    let mut q1 = a22 * a3344_4334 - a23 * a3244_4234 + a24 * a3243_4233;
    let mut q2 = -a21 * a3344_4334 + a23 * a3144_4134 - a24 * a3143_4133;
    let mut q3 = a21 * a3244_4234 - a22 * a3144_4134 + a24 * a3142_4132;
    let mut q4 = -a21 * a3243_4233 + a22 * a3143_4133 - a23 * a3142_4132;

    let mut qsqr = q1 * q1 + q2 * q2 + q3 * q3 + q4 * q4;

    // Degenerate adjoint column: fall back through the three alternatives
    if qsqr < EIGENVECTOR_PRECISION {
        q1 = a12 * a3344_4334 - a13 * a3244_4234 + a14 * a3243_4233;
        q2 = -a11 * a3344_4334 + a13 * a3144_4134 - a14 * a3143_4133;
        q3 = a11 * a3244_4234 - a12 * a3144_4134 + a14 * a3142_4132;
        q4 = -a11 * a3243_4233 + a12 * a3143_4133 - a13 * a3142_4132;

        qsqr = q1 * q1 + q2 * q2 + q3 * q3 + q4 * q4;

        if qsqr < EIGENVECTOR_PRECISION {
            let a1324_1423 = a13 * a24 - a14 * a23;
            let a1224_1422 = a12 * a24 - a14 * a22;
            let a1223_1322 = a12 * a23 - a13 * a22;
            let a1124_1421 = a11 * a24 - a14 * a21;
            let a1123_1321 = a11 * a23 - a13 * a21;
            let a1122_1221 = a11 * a22 - a12 * a21;

            q1 = a42 * a1324_1423 - a43 * a1224_1422 + a44 * a1223_1322;
            q2 = -a41 * a1324_1423 + a43 * a1124_1421 - a44 * a1123_1321;
            q3 = a41 * a1224_1422 - a42 * a1124_1421 + a44 * a1122_1221;
            q4 = -a41 * a1223_1322 + a42 * a1123_1321 - a43 * a1122_1221;

            qsqr = q1 * q1 + q2 * q2 + q3 * q3 + q4 * q4;

            if qsqr < EIGENVECTOR_PRECISION {
                q1 = a32 * a1324_1423 - a33 * a1224_1422 + a34 * a1223_1322;
                q2 = -a31 * a1324_1423 + a33 * a1124_1421 - a34 * a1123_1321;
                q3 = a31 * a1224_1422 - a32 * a1124_1421 + a34 * a1122_1221;
                q4 = -a31 * a1223_1322 + a32 * a1123_1321 - a33 * a1122_1221;

                qsqr = q1 * q1 + q2 * q2 + q3 * q3 + q4 * q4;

                if qsqr < EIGENVECTOR_PRECISION {
                    // All four columns degenerate: report no rotation
                    return (IDENTITY_ROTATION, rmsd);
                }
            }
        }
    }

    let normq = qsqr.sqrt();
    q1 /= normq;
    q2 /= normq;
    q3 /= normq;
    q4 /= normq;

    (quaternion_to_rotation(q1, q2, q3, q4), rmsd)
}

/// Rotation matrix of a unit quaternion (w, x, y, z), mapping the moving
/// frame onto the fixed frame.
pub fn quaternion_to_rotation(q1: f64, q2: f64, q3: f64, q4: f64) -> [[f64; 3]; 3] {
    let a2 = q1 * q1;
    let x2 = q2 * q2;
    let y2 = q3 * q3;
    let z2 = q4 * q4;

    let xy = q2 * q3;
    let az = q1 * q4;
    let zx = q4 * q2;
    let ay = q1 * q3;
    let yz = q3 * q4;
    let ax = q1 * q2;

    let mut rot = [[0.0; 3]; 3];
    rot[0][0] = a2 + x2 - y2 - z2;
    rot[0][1] = 2.0 * (xy + az);
    rot[0][2] = 2.0 * (zx - ay);
    rot[1][0] = 2.0 * (xy - az);
    rot[1][1] = a2 - x2 + y2 - z2;
    rot[1][2] = 2.0 * (yz + ax);
    rot[2][0] = 2.0 * (zx + ay);
    rot[2][1] = 2.0 * (yz - ax);
    rot[2][2] = a2 - x2 - y2 + z2;
    rot
}

pub(crate) fn form_matrix(moving: &[Coordinate], fixed: &[Coordinate]) -> ([[f64; 4]; 4], f64) {
    let (a, e0) = inner_product(moving, fixed);
    let sxx = a[0][0];
    let sxy = a[0][1];
    let sxz = a[0][2];
    let syx = a[1][0];
    let syy = a[1][1];
    let syz = a[1][2];
    let szx = a[2][0];
    let szy = a[2][1];
    let szz = a[2][2];
    let k = [
        [sxx + syy + szz, syz - szy, szx - sxz, sxy - syx],
        [syz - szy, sxx - syy - szz, sxy + syx, sxz + szx],
        [szx - sxz, sxy + syx, syy - sxx - szz, syz + szy],
        [sxy - syx, sxz + szx, syz + szy, szz - sxx - syy],
    ];
    (k, e0)
}
