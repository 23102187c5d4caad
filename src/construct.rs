//! Baseline tour constructors.
//!
//! - [`random_tour`]: uniform random permutation (Fisher-Yates shuffle)
//! - [`nearest_neighbor_from`]: greedy closest-unvisited walk from a fixed start
//! - [`nearest_neighbor`]: the same walk from a random start
//!
//! Both baselines are evaluated through [`Tour::length`](crate::Tour::length),
//! the same interface the GA uses.

use crate::error::{Result, TspError};
use crate::geometry::Geometry;
use crate::tour::Tour;
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniformly random permutation of `0..n`.
///
/// Fails with [`TspError::InvalidInstance`] if `n == 0`.
pub fn random_tour<R: Rng>(n: usize, rng: &mut R) -> Result<Tour> {
    if n == 0 {
        return Err(TspError::InvalidInstance(
            "cannot build a tour over zero cities".into(),
        ));
    }
    let mut cities: Vec<usize> = (0..n).collect();
    cities.shuffle(rng);
    Ok(Tour::from_permutation(cities))
}

/// Nearest-neighbor tour starting from `start`.
///
/// Repeatedly appends the unvisited city closest to the last one appended.
/// Ties go to the lowest city id, so the result is fully determined by
/// `start`. O(n²) distance evaluations.
pub fn nearest_neighbor_from(geometry: &Geometry, start: usize) -> Result<Tour> {
    let n = geometry.len();
    if start >= n {
        return Err(TspError::InvalidIndex {
            index: start,
            len: n,
        });
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    visited[start] = true;
    order.push(start);

    let mut current = start;
    for _ in 1..n {
        let mut nearest = None;
        let mut nearest_dist = f64::INFINITY;
        for (city, _) in visited.iter().enumerate().filter(|&(_, &v)| !v) {
            let d = geometry.dist(current, city);
            // Strict comparison keeps the lowest id on ties.
            if nearest.is_none() || d < nearest_dist {
                nearest = Some(city);
                nearest_dist = d;
            }
        }
        let Some(next) = nearest else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Ok(Tour::from_permutation(order))
}

/// Nearest-neighbor tour from a uniformly random start city.
pub fn nearest_neighbor<R: Rng>(geometry: &Geometry, rng: &mut R) -> Result<Tour> {
    let start = rng.random_range(0..geometry.len());
    nearest_neighbor_from(geometry, start)
}
