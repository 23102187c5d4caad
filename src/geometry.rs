//! City coordinates and pairwise Euclidean distance.
//!
//! [`Geometry`] is the immutable coordinate table of one problem instance.
//! Cities are identified by their position in the table, `0..n`.

use crate::error::{Result, TspError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A city location in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct City {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl City {
    /// Creates a city at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another city.
    #[inline]
    pub fn distance_to(&self, other: &City) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Coordinate table of a Euclidean TSP instance.
///
/// Never mutated after construction.
///
/// # Examples
///
/// ```
/// use tsp_ga::Geometry;
///
/// let geo = Geometry::from_table(2, &[(0.0, 0.0), (3.0, 4.0)]).unwrap();
/// assert_eq!(geo.distance(0, 1).unwrap(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geometry {
    cities: Vec<City>,
}

impl Geometry {
    /// Builds a geometry from an ordered list of cities.
    ///
    /// Fails with [`TspError::InvalidInstance`] if the list is empty or any
    /// coordinate is NaN or infinite.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.is_empty() {
            return Err(TspError::InvalidInstance(
                "instance must contain at least one city".into(),
            ));
        }
        if let Some(id) = cities
            .iter()
            .position(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(TspError::InvalidInstance(format!(
                "city {id} has a non-finite coordinate"
            )));
        }
        Ok(Self { cities })
    }

    /// Builds a geometry from a declared city count and a coordinate table.
    ///
    /// The table must hold exactly `n` pairs.
    pub fn from_table(n: usize, coords: &[(f64, f64)]) -> Result<Self> {
        if n == 0 {
            return Err(TspError::InvalidInstance(
                "city count must be positive".into(),
            ));
        }
        if coords.len() != n {
            return Err(TspError::InvalidInstance(format!(
                "declared {n} cities but coordinate table has {} entries",
                coords.len()
            )));
        }
        Self::new(coords.iter().copied().map(City::from).collect())
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`: a geometry holds at least one city.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// All cities, indexed by id.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Looks up a city by id.
    pub fn city(&self, id: usize) -> Result<City> {
        self.cities
            .get(id)
            .copied()
            .ok_or(TspError::InvalidIndex {
                index: id,
                len: self.cities.len(),
            })
    }

    /// Euclidean distance between two cities.
    ///
    /// Symmetric and non-negative; zero for `a == b`.
    pub fn distance(&self, a: usize, b: usize) -> Result<f64> {
        let ca = self.city(a)?;
        let cb = self.city(b)?;
        Ok(ca.distance_to(&cb))
    }

    /// Unchecked distance for hot loops over ids already known to be valid.
    #[inline]
    pub(crate) fn dist(&self, a: usize, b: usize) -> f64 {
        self.cities[a].distance_to(&self.cities[b])
    }
}
