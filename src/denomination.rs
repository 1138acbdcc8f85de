use std::collections::HashMap;

use itertools::Itertools;
use opencv::core::Scalar;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// The four coin value classes, ordered by physical size in the source
/// imagery: $1 coins are the smallest, $10 the largest.
#[derive(EnumIter, Debug, Hash, Eq, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Denomination {
    One,
    Two,
    Five,
    Ten,
}

impl Denomination {
    pub fn value(self) -> u32 {
        match self {
            Denomination::One => 1,
            Denomination::Two => 2,
            Denomination::Five => 5,
            Denomination::Ten => 10,
        }
    }

    /// Outline color, BGR.
    pub fn color(self) -> Scalar {
        match self {
            Denomination::One => Scalar::new(0.0, 0.0, 255.0, 255.0),
            Denomination::Two => Scalar::new(255.0, 0.0, 0.0, 255.0),
            Denomination::Five => Scalar::new(0.0, 255.0, 255.0, 255.0),
            Denomination::Ten => Scalar::new(0.0, 255.0, 0.0, 255.0),
        }
    }

    /// All denominations, largest value first, the order the report prints in.
    pub fn descending() -> [Denomination; 4] {
        [
            Denomination::Ten,
            Denomination::Five,
            Denomination::Two,
            Denomination::One,
        ]
    }
}

/// Cluster-rank to denomination assignment: the cluster with the smallest
/// mean area is $1, then $2, $5, $10.
#[derive(Debug, Clone)]
pub struct DenominationMap {
    by_label: Vec<Denomination>,
}

impl DenominationMap {
    /// Builds the map from the clusterer's centroids, indexed by cluster
    /// label. Centroid order on input is arbitrary; ranking happens here.
    pub fn from_centroids(centroids: &[f32]) -> Self {
        let ranked: Vec<usize> = centroids
            .iter()
            .enumerate()
            .sorted_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(label, _)| label)
            .collect();

        let mut by_label = vec![Denomination::One; centroids.len()];
        for (rank, denom) in Denomination::iter().enumerate() {
            by_label[ranked[rank]] = denom;
        }
        Self { by_label }
    }

    pub fn denomination(&self, label: usize) -> Denomination {
        self.by_label[label]
    }
}

/// Raw occurrences per denomination, accumulated over the valid contours.
#[derive(Debug, Clone, Default)]
pub struct CountTable {
    counts: HashMap<Denomination, u32>,
}

impl CountTable {
    pub fn increment(&mut self, denom: Denomination) {
        *self.counts.entry(denom).or_insert(0) += 1;
    }

    pub fn raw(&self, denom: Denomination) -> u32 {
        self.counts.get(&denom).copied().unwrap_or(0)
    }

    pub fn total_objects(&self) -> u32 {
        self.counts.values().sum()
    }
}
