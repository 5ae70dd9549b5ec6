// File: axes.rs
// Created: 2025-11-07 14:26:50
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved

// Near-uniform candidate rotation axes: vertices of a subdivided
// icosahedron projected onto the unit sphere, reduced to one hemisphere
// (an axis and its negation generate the same rotations). The subdivision
// frequency trades search completeness against runtime; the default is an
// empirically tuned value, adjustable through SymmetryParameters.

use lazy_static::lazy_static;

use crate::geometry::coordinate::Coordinate;

pub const DEFAULT_SPHERE_FREQUENCY: usize = 3;

lazy_static! {
    /// The default axis-sampling grid, built once on first use.
    pub static ref SPHERE_AXES: Vec<Coordinate> = sampling_axes(DEFAULT_SPHERE_FREQUENCY);
}

/// Axis grid at the given icosahedral subdivision frequency: 10·f²+2
/// sphere vertices before antipodal reduction, about half that after.
pub fn sampling_axes(frequency: usize) -> Vec<Coordinate> {
    let frequency = frequency.max(1);
    let (vertices, faces) = icosahedron();

    let mut seen: Vec<[i64; 3]> = Vec::new();
    let mut axes: Vec<Coordinate> = Vec::new();
    let mut push_axis = |p: Coordinate| {
        let unit = p.normalize();
        // Canonical hemisphere representative: first nonzero component
        // positive
        let canonical = if unit.x < -1e-9
            || (unit.x.abs() <= 1e-9 && unit.y < -1e-9)
            || (unit.x.abs() <= 1e-9 && unit.y.abs() <= 1e-9 && unit.z < 0.0)
        {
            unit.scale(-1.0)
        } else {
            unit
        };
        let key = [
            (canonical.x * 1e6).round() as i64,
            (canonical.y * 1e6).round() as i64,
            (canonical.z * 1e6).round() as i64,
        ];
        if !seen.contains(&key) {
            seen.push(key);
            axes.push(canonical);
        }
    };

    for face in faces {
        let (v0, v1, v2) = (vertices[face[0]], vertices[face[1]], vertices[face[2]]);
        for i in 0..=frequency {
            for j in 0..=(frequency - i) {
                let k = frequency - i - j;
                let p = v0
                    .scale(i as f64)
                    .add(&v1.scale(j as f64))
                    .add(&v2.scale(k as f64));
                push_axis(p);
            }
        }
    }
    axes
}

fn icosahedron() -> ([Coordinate; 12], [[usize; 3]; 20]) {
    let phi = (1.0 + 5.0f64.sqrt()) / 2.0;
    let vertices = [
        Coordinate::new(-1.0, phi, 0.0),
        Coordinate::new(1.0, phi, 0.0),
        Coordinate::new(-1.0, -phi, 0.0),
        Coordinate::new(1.0, -phi, 0.0),
        Coordinate::new(0.0, -1.0, phi),
        Coordinate::new(0.0, 1.0, phi),
        Coordinate::new(0.0, -1.0, -phi),
        Coordinate::new(0.0, 1.0, -phi),
        Coordinate::new(phi, 0.0, -1.0),
        Coordinate::new(phi, 0.0, 1.0),
        Coordinate::new(-phi, 0.0, -1.0),
        Coordinate::new(-phi, 0.0, 1.0),
    ];
    let faces = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    (vertices, faces)
}
