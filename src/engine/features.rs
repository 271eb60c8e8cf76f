//! Feature vectors fed to the oracle.
//!
//! Two fixed-arity layouts exist, one per oracle-driven policy:
//! - [`FeatureSet::Planet`]: a planet and its nearest neighbors
//! - [`FeatureSet::Pair`]: a sending planet and one candidate target

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{GraphIndex, Planet};

/// Neighbors described by a planet feature vector.
pub const NEAREST_NEIGHBORS: usize = 4;

/// Values describing one neighbor.
pub const NEIGHBOR_FEATURES: usize = 3;

/// Length of a planet feature vector.
pub const PLANET_FEATURES: usize = 2 + NEIGHBOR_FEATURES * NEAREST_NEIGHBORS;

/// Length of a pair feature vector.
pub const PAIR_FEATURES: usize = 4;

/// Neighbor slot used when a planet has fewer than [`NEAREST_NEIGHBORS`].
pub const MISSING_NEIGHBOR: [f64; NEIGHBOR_FEATURES] = [999.0, 0.0, 0.0];

/// Which feature layout an oracle consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSet {
    /// `[own health, signed target health, friendly health around target,
    /// hostile health around target]`.
    Pair,
    /// `[radius, health]` followed by `[squared distance, radius, signed
    /// health]` for the nearest neighbors.
    Planet,
}

impl FeatureSet {
    /// Number of values in a vector of this layout.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Pair => PAIR_FEATURES,
            Self::Planet => PLANET_FEATURES,
        }
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pair => write!(f, "pair"),
            Self::Planet => write!(f, "planet"),
        }
    }
}

/// Describe a planet by its size, health and nearest neighbors.
///
/// Neighbors are taken by ascending squared distance; equal distances keep
/// the order of the planet's neighbor list. Missing slots are filled with
/// [`MISSING_NEIGHBOR`].
#[must_use]
pub fn planet_features(planet: &Planet, index: &GraphIndex<'_>) -> [f64; PLANET_FEATURES] {
    let mut neighbors: Vec<(f64, &Planet)> = index
        .neighbors(planet)
        .map(|n| (planet.squared_distance_to(n), n))
        .collect();
    // Stable, so ties stay in neighbor-list order
    neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut features = [0.0; PLANET_FEATURES];
    features[0] = planet.radius;
    features[1] = planet.health;

    for slot in 0..NEAREST_NEIGHBORS {
        let values = neighbors.get(slot).map_or(MISSING_NEIGHBOR, |&(distance, n)| {
            [distance, n.radius, n.signed_health()]
        });
        let start = 2 + slot * NEIGHBOR_FEATURES;
        features[start..start + NEIGHBOR_FEATURES].copy_from_slice(&values);
    }

    features
}

/// Describe sending from `source` to `target`.
///
/// The two sums cover the target's own neighbors other than `source`:
/// friendly health is what the local player holds there, hostile health
/// what enemies and neutrals hold.
#[must_use]
pub fn pair_features(source: &Planet, target: &Planet, index: &GraphIndex<'_>) -> [f64; PAIR_FEATURES] {
    let mut friendly = 0.0;
    let mut hostile = 0.0;
    for around in index.neighbors(target).filter(|n| n.id != source.id) {
        if around.owner.is_mine() {
            friendly += around.health;
        } else {
            hostile += around.health;
        }
    }

    [source.health, target.signed_health(), friendly, hostile]
}
