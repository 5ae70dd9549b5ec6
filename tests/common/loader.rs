// File: loader.rs
// Created: 2025-11-10 08:41:12
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved

// Synthetic assembly builders for the symmetry tests. Subunits are copies
// of a helix-like seed trace placed by exact rigid transforms, so solver
// results have known ground truth.

use std::f64::consts::PI;

use quatsymm::prelude::*;

/// Short alpha-helix-like trace placed off the origin.
pub fn helix_trace(n_res: usize) -> Vec<Coordinate> {
    (0..n_res)
        .map(|i| {
            let t = i as f64 * 100.0_f64.to_radians();
            Coordinate::new(
                14.0 + 2.3 * t.cos(),
                1.2 + 2.3 * t.sin(),
                5.0 + 1.5 * i as f64,
            )
        })
        .collect()
}

pub fn transformed_copy(trace: &[Coordinate], m: &Matrix4) -> Vec<Coordinate> {
    trace.iter().map(|p| m.transform(p)).collect()
}

pub fn subunits_from_transforms(
    transforms: &[Matrix4],
    seed: &[Coordinate],
    cluster_ids: Vec<usize>,
) -> Subunits {
    let traces: Vec<Vec<Coordinate>> = transforms
        .iter()
        .map(|m| transformed_copy(seed, m))
        .collect();
    let n = traces.len();
    let chain_ids = (0..n).map(|i| format!("{}", (b'A' + (i % 26) as u8) as char)).collect();
    Subunits::new(traces, cluster_ids, chain_ids, vec![1; n]).unwrap()
}

/// n subunits at exact 2*pi/n intervals about the z axis.
pub fn cyclic_assembly(n: usize) -> Subunits {
    let axis = Coordinate::new(0.0, 0.0, 1.0);
    let transforms: Vec<Matrix4> = (0..n)
        .map(|k| Matrix4::about_axis(&axis, 2.0 * PI * k as f64 / n as f64, &Coordinate::zero()))
        .collect();
    subunits_from_transforms(&transforms, &helix_trace(12), vec![0; n])
}

/// 2n subunits: a cyclic ring of n plus its image under a 2-fold about x.
pub fn dihedral_assembly(n: usize) -> Subunits {
    let z_axis = Coordinate::new(0.0, 0.0, 1.0);
    let x_axis = Coordinate::new(1.0, 0.0, 0.0);
    let flip = Matrix4::about_axis(&x_axis, PI, &Coordinate::zero());
    let mut transforms: Vec<Matrix4> = (0..n)
        .map(|k| Matrix4::about_axis(&z_axis, 2.0 * PI * k as f64 / n as f64, &Coordinate::zero()))
        .collect();
    let lower: Vec<Matrix4> = transforms.iter().map(|m| flip.multiply(m)).collect();
    transforms.extend(lower);
    subunits_from_transforms(&transforms, &helix_trace(12), vec![0; 2 * n])
}

/// 12 subunits placed by the rotations of the tetrahedral group.
pub fn tetrahedral_assembly() -> Subunits {
    let diagonals = [
        Coordinate::new(1.0, 1.0, 1.0),
        Coordinate::new(1.0, -1.0, -1.0),
        Coordinate::new(-1.0, 1.0, -1.0),
        Coordinate::new(-1.0, -1.0, 1.0),
    ];
    let mut transforms = vec![Matrix4::identity()];
    for d in &diagonals {
        transforms.push(Matrix4::about_axis(d, 2.0 * PI / 3.0, &Coordinate::zero()));
        transforms.push(Matrix4::about_axis(d, 4.0 * PI / 3.0, &Coordinate::zero()));
    }
    for axis in [
        Coordinate::new(1.0, 0.0, 0.0),
        Coordinate::new(0.0, 1.0, 0.0),
        Coordinate::new(0.0, 0.0, 1.0),
    ] {
        transforms.push(Matrix4::about_axis(&axis, PI, &Coordinate::zero()));
    }
    subunits_from_transforms(&transforms, &helix_trace(12), vec![0; 12])
}

/// Exact synthetic geometry: a tight threshold keeps near-fit spurious
/// operations out of the accepted set.
pub fn tight_parameters() -> SymmetryParameters {
    SymmetryParameters {
        rmsd_threshold: 0.5,
        ..Default::default()
    }
}
