//! Permutation-preserving genetic operators for tours.
//!
//! # Crossover
//!
//! - [`order_crossover`] (OX): Davis (1985). The child keeps a contiguous
//!   slice of parent1 in place and takes every other city in parent2's order.
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange the cities at two distinct positions, O(1)
//! - [`mutate`]: apply [`swap_mutation`] with a per-tour probability
//!
//! All operators map valid tours to valid tours.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::error::{Result, TspError};
use crate::random::distinct_pair;
use crate::tour::Tour;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Order Crossover (OX) with a random slice.
///
/// Draws `start` uniformly from `0..n` and `end` uniformly from
/// `start+1..=n`, then builds the child with [`order_crossover_slice`].
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn order_crossover<R: Rng>(parent1: &Tour, parent2: &Tour, rng: &mut R) -> Tour {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    let (start, end) = random_slice(parent1.len(), rng);
    ox_build_child(parent1.as_slice(), parent2.as_slice(), start, end)
}

/// Order Crossover (OX) over the half-open slice `[start, end)`.
///
/// 1. The child inherits `parent1[start..end]` at the same positions.
/// 2. The positions before `start` and then after `end` are filled, left to
///    right, with the cities of parent2 not in that slice, in parent2's order.
///
/// `start = 0, end = n` reproduces parent1.
///
/// Fails with [`TspError::InvalidParameter`] if the parents differ in
/// length or the slice is empty or out of bounds.
pub fn order_crossover_slice(
    parent1: &Tour,
    parent2: &Tour,
    start: usize,
    end: usize,
) -> Result<Tour> {
    let n = parent1.len();
    if parent2.len() != n {
        return Err(TspError::InvalidParameter(format!(
            "parents have different lengths: {} and {}",
            n,
            parent2.len()
        )));
    }
    if start >= end || end > n {
        return Err(TspError::InvalidParameter(format!(
            "crossover slice [{start}, {end}) is not a non-empty range within 0..{n}"
        )));
    }
    Ok(ox_build_child(
        parent1.as_slice(),
        parent2.as_slice(),
        start,
        end,
    ))
}

/// Build one OX child: copy the slice from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Tour {
    let n = template.len();
    let mut in_slice = vec![false; n];
    for &city in &template[start..end] {
        in_slice[city] = true;
    }

    let mut fill = donor.iter().copied().filter(|&city| !in_slice[city]);
    let mut child = Vec::with_capacity(n);
    child.extend(fill.by_ref().take(start));
    child.extend_from_slice(&template[start..end]);
    child.extend(fill);

    Tour::from_permutation(child)
}

/// Draws a non-empty slice `[start, end)` within `0..n`.
///
/// # Panics
/// Panics if `n == 0`.
pub fn random_slice<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let start = rng.random_range(0..n);
    let end = rng.random_range(start + 1..=n);
    (start, end)
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation: exchange the cities at two distinct random positions.
///
/// No-op for tours with fewer than two cities.
pub fn swap_mutation<R: Rng>(tour: &mut Tour, rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let (i, j) = distinct_pair(n, rng);
    tour.as_mut_slice().swap(i, j);
}

/// Exchanges the cities at positions `i` and `j`.
///
/// Fails with [`TspError::InvalidIndex`] if either position is outside the
/// tour.
pub fn swap_positions(tour: &mut Tour, i: usize, j: usize) -> Result<()> {
    let n = tour.len();
    for index in [i, j] {
        if index >= n {
            return Err(TspError::InvalidIndex { index, len: n });
        }
    }
    tour.as_mut_slice().swap(i, j);
    Ok(())
}

/// With probability `mutation_rate`, applies one [`swap_mutation`].
///
/// The trigger draw is consumed even for tours too short to mutate.
/// Returns `true` if the tour was mutated.
pub fn mutate<R: Rng>(tour: &mut Tour, mutation_rate: f64, rng: &mut R) -> bool {
    if rng.random_range(0.0..1.0) >= mutation_rate || tour.len() < 2 {
        return false;
    }
    swap_mutation(tour, rng);
    true
}

// ============================================================================
// Tests
// ============================================================================
