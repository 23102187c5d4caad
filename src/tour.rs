//! Tour representation and length evaluation.
//!
//! A [`Tour`] is a permutation of city ids `0..n` read as a closed cycle:
//! the last city connects back to the first. The permutation invariant is
//! checked whenever a tour is built from outside data; the genetic
//! operators preserve it by construction.

use crate::error::{Result, TspError};
use crate::geometry::Geometry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed tour visiting every city exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct Tour {
    cities: Vec<usize>,
}

impl Tour {
    /// Wraps a city order, validating the permutation invariant.
    ///
    /// Fails with [`TspError::MalformedTour`] on duplicates, omissions, or an
    /// empty order.
    pub fn new(cities: Vec<usize>) -> Result<Self> {
        let tour = Self { cities };
        tour.validate()?;
        Ok(tour)
    }

    /// The tour `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self {
            cities: (0..n).collect(),
        }
    }

    /// Wraps an order the caller guarantees is a permutation.
    ///
    /// Re-checked in debug builds.
    pub(crate) fn from_permutation(cities: Vec<usize>) -> Self {
        debug_assert!(
            is_permutation(&cities),
            "operator produced a non-permutation: {cities:?}"
        );
        Self { cities }
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether the tour is empty. Valid tours never are.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// City ids in visiting order.
    pub fn as_slice(&self) -> &[usize] {
        &self.cities
    }

    /// Mutable access for in-place operators that only permute positions.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [usize] {
        &mut self.cities
    }

    /// Consumes the tour, returning the city order.
    pub fn into_inner(self) -> Vec<usize> {
        self.cities
    }

    /// The same cycle traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut cities = self.cities.clone();
        cities.reverse();
        Self { cities }
    }

    /// Checks the permutation invariant.
    pub fn validate(&self) -> Result<()> {
        if self.cities.is_empty() {
            return Err(TspError::MalformedTour("tour is empty".into()));
        }
        let n = self.cities.len();
        let mut seen = vec![false; n];
        for (pos, &city) in self.cities.iter().enumerate() {
            if city >= n {
                return Err(TspError::MalformedTour(format!(
                    "city {city} at position {pos} is outside 0..{n}"
                )));
            }
            if seen[city] {
                return Err(TspError::MalformedTour(format!(
                    "city {city} appears more than once"
                )));
            }
            seen[city] = true;
        }
        Ok(())
    }

    /// Total cycle length, including the closing edge back to the start.
    ///
    /// Fails with [`TspError::MalformedTour`] if the tour does not cover
    /// exactly the cities of `geometry`.
    pub fn length(&self, geometry: &Geometry) -> Result<f64> {
        if self.cities.len() != geometry.len() {
            return Err(TspError::MalformedTour(format!(
                "tour has {} cities, instance has {}",
                self.cities.len(),
                geometry.len()
            )));
        }
        if cfg!(debug_assertions) {
            self.validate()?;
        }
        Ok(cycle_length(&self.cities, geometry))
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = TspError;

    fn try_from(cities: Vec<usize>) -> Result<Self> {
        Self::new(cities)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.cities
    }
}

/// Returns `true` if `cities` contains each of `0..cities.len()` exactly once.
pub fn is_permutation(cities: &[usize]) -> bool {
    let n = cities.len();
    let mut seen = vec![false; n];
    for &c in cities {
        if c >= n || seen[c] {
            return false;
        }
        seen[c] = true;
    }
    true
}

/// Sum of edge lengths over `(i, i+1 mod n)`. Ids must be valid.
pub(crate) fn cycle_length(cities: &[usize], geometry: &Geometry) -> f64 {
    match cities {
        [] | [_] => 0.0,
        [first, .., last] => {
            let open: f64 = cities
                .windows(2)
                .map(|w| geometry.dist(w[0], w[1]))
                .sum();
            open + geometry.dist(*last, *first)
        }
    }
}
