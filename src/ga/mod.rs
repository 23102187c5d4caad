//! Genetic algorithm for the Euclidean TSP.
//!
//! Tours are evolved as permutations: parents are sampled without
//! replacement and ranked by length, carried over whole, and topped up with
//! order-crossover children. Every tour then gets one chance of a swap
//! mutation. The run is fixed-budget and fully reproducible from its seed.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, generation budget, mutation rate, seed
//! - [`Population`]: the tour pool with ranking, parent selection, breeding
//! - [`Evolution`]: one run, advanced a generation at a time
//! - [`GaRunner`]: drives an [`Evolution`] to completion
//! - [`GaResult`]: best tour, its length, and the best-so-far history
//!
//! # Submodules
//!
//! - [`operators`]: order crossover and swap mutation on tours
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
pub mod operators;
mod population;
mod runner;

pub use config::GaConfig;
pub use population::Population;
pub use runner::{Evolution, EvolutionState, GaResult, GaRunner};
