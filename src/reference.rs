//! Best-known reference lengths for reporting.
//!
//! Maps an instance identifier to a known optimal (or best-known) tour
//! length so a driver can report `found / reference`. Nothing in the
//! search reads this table.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Injected table of reference tour lengths keyed by instance id.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceLengths {
    lengths: HashMap<String, f64>,
}

impl ReferenceLengths {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Optimal lengths of the TSPLIB instances berlin52, eil101, lin318,
    /// pr1002, rl5934 and d18512.
    pub fn tsplib() -> Self {
        [
            ("berlin52", 7542.0),
            ("eil101", 629.0),
            ("lin318", 42029.0),
            ("pr1002", 259045.0),
            ("rl5934", 118282.0),
            ("d18512", 645238.0),
        ]
        .into_iter()
        .collect()
    }

    /// Adds or replaces the reference for `id`.
    pub fn insert(&mut self, id: impl Into<String>, length: f64) -> Option<f64> {
        self.lengths.insert(id.into(), length)
    }

    /// Reference length for `id`, if known.
    pub fn get(&self, id: &str) -> Option<f64> {
        self.lengths.get(id).copied()
    }

    /// Number of known instances.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// `length / reference` for `id`.
    ///
    /// `None` if `id` is unknown or its reference is not positive.
    pub fn relative_length(&self, id: &str, length: f64) -> Option<f64> {
        self.get(id)
            .filter(|&reference| reference > 0.0)
            .map(|reference| length / reference)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ReferenceLengths {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            lengths: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
