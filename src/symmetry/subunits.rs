// File: subunits.rs
// Created: 2025-11-06 13:27:48
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved

use crate::geometry::coordinate::{centroid, Coordinate};
use crate::geometry::moments::MomentsOfInertia;
use crate::utils::combination::PairIterator;

/// Input subunit list plus the geometric summary derived from it.
/// All derived fields are computed eagerly at construction; the struct is
/// read-only afterwards.
///
/// A subunit is one rigid repeated unit of the assembly: an ordered
/// coordinate trace, a sequence-cluster id (subunits in different clusters
/// can never be permuted onto each other), and opaque provenance tags
/// (chain id, model number) that the solvers ignore.
#[derive(Debug, Clone)]
pub struct Subunits {
    traces: Vec<Vec<Coordinate>>,
    cluster_ids: Vec<usize>,
    chain_ids: Vec<String>,
    model_numbers: Vec<i32>,
    // Derived
    centroid: Coordinate,
    original_centers: Vec<Coordinate>,
    centers: Vec<Coordinate>,
    unit_vectors: Vec<Coordinate>,
    moments_of_inertia: MomentsOfInertia,
}

impl Subunits {
    /// Builds the subunit summary. Fails fast on contract violations:
    /// mismatched parallel-list lengths, an empty trace, or unequal trace
    /// lengths within a sequence cluster.
    pub fn new(
        traces: Vec<Vec<Coordinate>>,
        cluster_ids: Vec<usize>,
        chain_ids: Vec<String>,
        model_numbers: Vec<i32>,
    ) -> Result<Subunits, String> {
        if cluster_ids.len() != traces.len()
            || chain_ids.len() != traces.len()
            || model_numbers.len() != traces.len()
        {
            return Err(format!(
                "Parallel subunit lists differ in length: {} traces, {} cluster ids, {} chain ids, {} model numbers",
                traces.len(),
                cluster_ids.len(),
                chain_ids.len(),
                model_numbers.len()
            ));
        }
        for (i, trace) in traces.iter().enumerate() {
            if trace.is_empty() {
                return Err(format!("Subunit {} has an empty coordinate trace", i));
            }
        }
        for (i, j) in PairIterator::new(traces.len()) {
            if cluster_ids[i] == cluster_ids[j] && traces[i].len() != traces[j].len() {
                return Err(format!(
                    "Subunits {} and {} share sequence cluster {} but have trace lengths {} and {}",
                    i,
                    j,
                    cluster_ids[i],
                    traces[i].len(),
                    traces[j].len()
                ));
            }
        }

        let original_centers: Vec<Coordinate> =
            traces.iter().map(|trace| centroid(trace)).collect();
        let global_centroid = centroid(&original_centers);
        let centers: Vec<Coordinate> = original_centers
            .iter()
            .map(|c| c.sub(&global_centroid))
            .collect();
        let unit_vectors: Vec<Coordinate> = centers.iter().map(|c| c.normalize()).collect();
        let moments_of_inertia = MomentsOfInertia::from_points(&centers);

        Ok(Subunits {
            traces,
            cluster_ids,
            chain_ids,
            model_numbers,
            centroid: global_centroid,
            original_centers,
            centers,
            unit_vectors,
            moments_of_inertia,
        })
    }

    pub fn size(&self) -> usize {
        self.traces.len()
    }

    pub fn trace(&self, i: usize) -> &[Coordinate] {
        &self.traces[i]
    }

    pub fn traces(&self) -> &[Vec<Coordinate>] {
        &self.traces
    }

    pub fn cluster_id(&self, i: usize) -> usize {
        self.cluster_ids[i]
    }

    pub fn cluster_ids(&self) -> &[usize] {
        &self.cluster_ids
    }

    pub fn chain_id(&self, i: usize) -> &str {
        &self.chain_ids[i]
    }

    pub fn model_number(&self, i: usize) -> i32 {
        self.model_numbers[i]
    }

    /// Unweighted average of the original subunit centers.
    pub fn centroid(&self) -> Coordinate {
        self.centroid
    }

    /// Subunit centers in the original coordinate frame.
    pub fn original_centers(&self) -> &[Coordinate] {
        &self.original_centers
    }

    /// Subunit centers relative to the global centroid.
    pub fn centers(&self) -> &[Coordinate] {
        &self.centers
    }

    pub fn unit_vectors(&self) -> &[Coordinate] {
        &self.unit_vectors
    }

    pub fn moments_of_inertia(&self) -> &MomentsOfInertia {
        &self.moments_of_inertia
    }

    pub fn radius_of_gyration(&self) -> f64 {
        self.moments_of_inertia.radius_of_gyration
    }

    /// True if every subunit maps onto a subunit of the same sequence
    /// cluster under `perm`.
    pub fn has_equivalent_subunits(&self, perm: &[usize]) -> bool {
        if perm.len() != self.size() {
            return false;
        }
        perm.iter()
            .enumerate()
            .all(|(i, &j)| j < self.size() && self.cluster_ids[i] == self.cluster_ids[j])
    }

    /// Smallest distance between any two subunit centers. Zero for fewer
    /// than two subunits.
    pub fn min_pairwise_center_distance(&self) -> f64 {
        let mut min_dist = f64::MAX;
        for (i, j) in PairIterator::new(self.centers.len()) {
            let d = self.centers[i].distance(&self.centers[j]);
            if d < min_dist {
                min_dist = d;
            }
        }
        if min_dist == f64::MAX {
            0.0
        } else {
            min_dist
        }
    }
}
