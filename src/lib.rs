//! Approximate Euclidean TSP solving with a genetic algorithm.
//!
//! Given a table of 2-D city coordinates, finds a short closed tour that
//! visits every city once. Provides:
//!
//! - **Geometry**: the coordinate table and pairwise Euclidean distance.
//! - **Tour**: a permutation of city ids read as a cycle, with its length.
//! - **Constructors**: random and nearest-neighbor baseline tours.
//! - **Genetic Algorithm**: selection, order crossover, swap mutation and a
//!   fixed-budget generational loop with best-so-far tracking.
//! - **Reference lengths**: best-known tour lengths for reporting.
//!
//! All randomness flows from one seedable stream, so a run is reproducible
//! from its seed.
//!
//! # Example
//!
//! ```
//! use tsp_ga::ga::{GaConfig, GaRunner};
//! use tsp_ga::{construct, Geometry};
//!
//! let geo = Geometry::from_table(4, &[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])?;
//!
//! let nn = construct::nearest_neighbor_from(&geo, 0)?;
//! assert_eq!(nn.length(&geo)?, 4.0);
//!
//! let config = GaConfig::default().with_num_generations(50).with_seed(42);
//! let result = GaRunner::run(&geo, &config)?;
//! assert!(result.best_length >= 4.0 - 1e-9);
//! # Ok::<(), tsp_ga::TspError>(())
//! ```
//!
//! # Logging
//!
//! Runs emit `tracing` events (`info` at start and end, `debug` on each
//! improvement, `trace` per generation). Install a subscriber to see them.

pub mod construct;
pub mod error;
pub mod ga;
pub mod geometry;
pub mod random;
pub mod reference;
pub mod tour;

pub use error::{Result, TspError};
pub use geometry::{City, Geometry};
pub use reference::ReferenceLengths;
pub use tour::Tour;
