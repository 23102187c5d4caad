//! Population of candidate tours.
//!
//! A [`Population`] is a fixed-size pool of tours over the same instance.
//! Lengths are never stored on the tours: every ranking or selection call
//! evaluates against the [`Geometry`] it is given, so a mutated tour can
//! never carry a stale length.

use super::operators::{mutate, order_crossover};
use crate::construct::random_tour;
use crate::error::{Result, TspError};
use crate::geometry::Geometry;
use crate::random::distinct_pair;
use crate::tour::Tour;
use rand::seq::index;
use rand::Rng;

/// A collection of tours over the same set of cities.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    tours: Vec<Tour>,
}

impl Population {
    /// Creates `size` independent random tours over `n_cities` cities.
    pub fn random<R: Rng>(n_cities: usize, size: usize, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(TspError::InvalidParameter(
                "population must hold at least one tour".into(),
            ));
        }
        let tours = (0..size)
            .map(|_| random_tour(n_cities, rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tours })
    }

    /// Wraps existing tours. All tours must cover the same number of cities.
    pub fn from_tours(tours: Vec<Tour>) -> Result<Self> {
        let Some(first) = tours.first() else {
            return Err(TspError::InvalidParameter(
                "population must hold at least one tour".into(),
            ));
        };
        let n = first.len();
        if let Some(pos) = tours.iter().position(|t| t.len() != n) {
            return Err(TspError::MalformedTour(format!(
                "tour {pos} has {} cities, expected {n}",
                tours[pos].len()
            )));
        }
        Ok(Self { tours })
    }

    /// Number of tours.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// The tours, in storage order.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Iterates over the tours.
    pub fn iter(&self) -> std::slice::Iter<'_, Tour> {
        self.tours.iter()
    }

    /// Consumes the population, returning its tours.
    pub fn into_tours(self) -> Vec<Tour> {
        self.tours
    }

    /// Length of every tour, in storage order.
    pub fn lengths(&self, geometry: &Geometry) -> Result<Vec<f64>> {
        self.tours.iter().map(|t| t.length(geometry)).collect()
    }

    /// `(index, length)` pairs sorted ascending by length.
    ///
    /// Equal lengths keep storage order.
    pub fn ranked(&self, geometry: &Geometry) -> Result<Vec<(usize, f64)>> {
        let mut ranked: Vec<(usize, f64)> =
            self.lengths(geometry)?.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(ranked)
    }

    /// The shortest tour and its length. Ties go to the earliest tour.
    pub fn best(&self, geometry: &Geometry) -> Result<(&Tour, f64)> {
        let mut best: Option<(&Tour, f64)> = None;
        for tour in &self.tours {
            let length = tour.length(geometry)?;
            if best.map_or(true, |(_, b)| length < b) {
                best = Some((tour, length));
            }
        }
        best.ok_or_else(|| TspError::InvalidParameter("population is empty".into()))
    }

    /// Samples `k` distinct tours without replacement and returns them
    /// sorted by length, shortest first.
    ///
    /// Fails with [`TspError::InvalidParameter`] if `k` exceeds the
    /// population size.
    pub fn select_parents<R: Rng>(
        &self,
        geometry: &Geometry,
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<Tour>> {
        if k > self.tours.len() {
            return Err(TspError::InvalidParameter(format!(
                "cannot select {k} parents from a population of {}",
                self.tours.len()
            )));
        }
        let mut chosen = index::sample(rng, self.tours.len(), k)
            .into_iter()
            .map(|i| {
                let tour = &self.tours[i];
                tour.length(geometry).map(|length| (length, tour))
            })
            .collect::<Result<Vec<_>>>()?;
        chosen.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(chosen.into_iter().map(|(_, t)| t.clone()).collect())
    }

    /// Builds the next generation from `parents`.
    ///
    /// Every parent is carried over unchanged, then children are appended
    /// until the population reaches `size`. Each child is the order
    /// crossover of two distinct parents drawn uniformly; a single parent is
    /// paired with itself. Pairs are drawn with replacement across children.
    pub fn breed<R: Rng>(parents: &[Tour], size: usize, rng: &mut R) -> Result<Self> {
        if parents.is_empty() {
            return Err(TspError::InvalidParameter(
                "cannot breed from an empty parent set".into(),
            ));
        }
        if parents.len() > size {
            return Err(TspError::InvalidParameter(format!(
                "{} parents do not fit in a population of {size}",
                parents.len()
            )));
        }

        let mut tours = Vec::with_capacity(size);
        tours.extend_from_slice(parents);
        while tours.len() < size {
            let (i, j) = if parents.len() >= 2 {
                distinct_pair(parents.len(), rng)
            } else {
                (0, 0)
            };
            tours.push(order_crossover(&parents[i], &parents[j], rng));
        }
        Self::from_tours(tours)
    }

    /// Applies [`mutate`] to every tour independently.
    ///
    /// Returns how many tours were mutated.
    pub fn mutate_all<R: Rng>(&mut self, mutation_rate: f64, rng: &mut R) -> usize {
        self.tours
            .iter_mut()
            .map(|tour| mutate(tour, mutation_rate, rng))
            .filter(|&mutated| mutated)
            .count()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Tour;
    type IntoIter = std::slice::Iter<'a, Tour>;

    fn into_iter(self) -> Self::IntoIter {
        self.tours.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn line(n: usize) -> Geometry {
        let coords: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, 0.0)).collect();
        Geometry::from_table(n, &coords).unwrap()
    }

    #[test]
    fn test_random_population() {
        let mut rng = create_rng(42);
        let pop = Population::random(12, 30, &mut rng).unwrap();
        assert_eq!(pop.len(), 30);
        for tour in &pop {
            assert_eq!(tour.len(), 12);
            assert!(tour.validate().is_ok());
        }
    }

    #[test]
    fn test_random_population_errors() {
        let mut rng = create_rng(42);
        assert!(matches!(
            Population::random(5, 0, &mut rng),
            Err(TspError::InvalidParameter(_))
        ));
        assert!(matches!(
            Population::random(0, 5, &mut rng),
            Err(TspError::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_from_tours_rejects_mixed_sizes() {
        let err = Population::from_tours(vec![Tour::identity(3), Tour::identity(4)]).unwrap_err();
        assert!(matches!(err, TspError::MalformedTour(_)));
        assert!(Population::from_tours(Vec::new()).is_err());
    }

    #[test]
    fn test_ranked_and_best() {
        let geo = line(4);
        // Lengths 8, 6, 8.
        let pop = Population::from_tours(vec![
            Tour::new(vec![0, 2, 1, 3]).unwrap(),
            Tour::identity(4),
            Tour::new(vec![2, 0, 3, 1]).unwrap(),
        ])
        .unwrap();

        let ranked = pop.ranked(&geo).unwrap();
        assert_eq!(ranked[0].0, 1);
        assert!((ranked[0].1 - 6.0).abs() < 1e-12);
        for w in ranked.windows(2) {
            assert!(w[0].1 <= w[1].1);
        }

        let (best, length) = pop.best(&geo).unwrap();
        assert_eq!(best, &Tour::identity(4));
        assert!((length - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_select_parents_sorted_and_distinct() {
        let geo = line(8);
        let mut rng = create_rng(42);
        let pop = Population::random(8, 20, &mut rng).unwrap();

        for _ in 0..20 {
            let parents = pop.select_parents(&geo, 10, &mut rng).unwrap();
            assert_eq!(parents.len(), 10);
            let lengths: Vec<f64> = parents.iter().map(|p| p.length(&geo).unwrap()).collect();
            for w in lengths.windows(2) {
                assert!(w[0] <= w[1], "parents not sorted: {lengths:?}");
            }
        }
    }

    #[test]
    fn test_select_parents_without_replacement() {
        let geo = line(6);
        let mut rng = create_rng(3);
        // Six distinct tours: rotations of the identity.
        let tours: Vec<Tour> = (0..6)
            .map(|r| {
                let mut cities: Vec<usize> = (0..6).collect();
                cities.rotate_left(r);
                Tour::new(cities).unwrap()
            })
            .collect();
        let pop = Population::from_tours(tours).unwrap();

        let parents = pop.select_parents(&geo, 6, &mut rng).unwrap();
        let mut firsts: Vec<usize> = parents.iter().map(|p| p.as_slice()[0]).collect();
        firsts.sort_unstable();
        assert_eq!(firsts, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_select_too_many_parents() {
        let geo = line(5);
        let mut rng = create_rng(42);
        let pop = Population::random(5, 4, &mut rng).unwrap();
        assert!(matches!(
            pop.select_parents(&geo, 5, &mut rng),
            Err(TspError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_breed_keeps_parents_first() {
        let mut rng = create_rng(42);
        let parents = Population::random(10, 5, &mut rng).unwrap().into_tours();
        let next = Population::breed(&parents, 12, &mut rng).unwrap();

        assert_eq!(next.len(), 12);
        assert_eq!(&next.tours()[..5], parents.as_slice());
        for tour in &next {
            assert!(tour.validate().is_ok());
        }
    }

    #[test]
    fn test_breed_single_parent() {
        let mut rng = create_rng(42);
        let parent = Tour::new(vec![2, 0, 1]).unwrap();
        let next = Population::breed(std::slice::from_ref(&parent), 2, &mut rng).unwrap();
        assert_eq!(next.tours(), &[parent.clone(), parent]);
    }

    #[test]
    fn test_breed_errors() {
        let mut rng = create_rng(42);
        assert!(Population::breed(&[], 4, &mut rng).is_err());
        let parents = vec![Tour::identity(3); 3];
        assert!(Population::breed(&parents, 2, &mut rng).is_err());
    }

    #[test]
    fn test_mutate_all_counts() {
        let mut rng = create_rng(42);
        let mut pop = Population::random(6, 10, &mut rng).unwrap();
        let before = pop.clone();
        assert_eq!(pop.mutate_all(0.0, &mut rng), 0);
        assert_eq!(pop, before);
        assert_eq!(pop.mutate_all(1.0, &mut rng), 10);
        for tour in &pop {
            assert!(tour.validate().is_ok());
        }
    }
}
