// File: permutation.rs
// Created: 2025-11-06 10:05:12
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2025 Hyunbin Kim, All rights reserved
// Subunit permutations and their group closure.

use rustc_hash::FxHashSet;

/// Composition `a` after `b`: `result[i] = a[b[i]]`.
pub fn compose(a: &[usize], b: &[usize]) -> Vec<usize> {
    debug_assert_eq!(a.len(), b.len());
    b.iter().map(|&i| a[i]).collect()
}

pub fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

pub fn is_identity(perm: &[usize]) -> bool {
    perm.iter().enumerate().all(|(i, &p)| i == p)
}

/// True if `perm` maps 0..n onto itself exactly once.
pub fn is_bijection(perm: &[usize]) -> bool {
    let n = perm.len();
    let mut seen = vec![false; n];
    for &p in perm {
        if p >= n || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}

/// Order (fold) of a permutation: the smallest k > 0 with perm^k = identity,
/// computed as the least common multiple of its cycle lengths.
pub fn order(perm: &[usize]) -> usize {
    let n = perm.len();
    let mut visited = vec![false; n];
    let mut fold = 1usize;
    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut length = 0usize;
        let mut i = start;
        while !visited[i] {
            visited[i] = true;
            i = perm[i];
            length += 1;
        }
        fold = lcm(fold, length);
    }
    fold
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn lcm(a: usize, b: usize) -> usize {
    if a == 0 || b == 0 { 0 } else { a / gcd(a, b) * b }
}

/// Closure of a generator set under composition: the smallest set containing
/// the generators, the identity, and every pairwise composition. Fixed-point
/// worklist; each pass composes all currently-known pairs and stops when a
/// pass adds nothing new.
pub fn complete_group(generators: &[Vec<usize>]) -> Vec<Vec<usize>> {
    if generators.is_empty() {
        return Vec::new();
    }
    let n = generators[0].len();
    let mut seen: FxHashSet<Vec<usize>> = FxHashSet::default();
    let mut members: Vec<Vec<usize>> = Vec::new();

    let id = identity(n);
    seen.insert(id.clone());
    members.push(id);
    for g in generators {
        debug_assert_eq!(g.len(), n);
        if seen.insert(g.clone()) {
            members.push(g.clone());
        }
    }

    loop {
        let mut discovered: Vec<Vec<usize>> = Vec::new();
        for a in &members {
            for b in &members {
                let c = compose(a, b);
                if !seen.contains(&c) {
                    seen.insert(c.clone());
                    discovered.push(c);
                }
            }
        }
        if discovered.is_empty() {
            break;
        }
        members.extend(discovered);
    }
    members
}
