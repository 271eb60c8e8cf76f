//! Oracle-weighted split over sender/target pairs.

use crate::engine::policy::{sanitize_score, split_power};
use crate::engine::{AllocationConfig, Policy, PolicyKind, TurnView, pair_features};
use crate::game::{Order, PlanetId};
use crate::oracle::Oracle;

/// Score every neighbor of a sending planet and split its spare health
/// in proportion to the scores.
///
/// The oracle sees [`pair_features`] for each (sender, neighbor) pair.
/// Friendly neighbors are scored too, so the oracle can choose to
/// reinforce rather than attack.
#[derive(Debug, Clone)]
pub struct OracleSplit<O> {
    oracle: O,
    allocation: AllocationConfig,
}

impl<O: Oracle> OracleSplit<O> {
    /// Create the policy around a pair-feature oracle.
    #[must_use]
    pub const fn new(oracle: O, allocation: AllocationConfig) -> Self {
        Self { oracle, allocation }
    }
}

impl<O: Oracle> Policy for OracleSplit<O> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Split
    }

    fn allocation(&self) -> &AllocationConfig {
        &self.allocation
    }

    fn decide(&self, view: &TurnView<'_>) -> Vec<Order> {
        let mut orders = Vec::new();

        for planet in view.my_planets() {
            if !self.allocation.can_send(planet.health) {
                continue;
            }

            let mut scores: Vec<(PlanetId, f64)> = Vec::with_capacity(planet.neighbors.len());
            for target in view.index.neighbors(planet) {
                if scores.iter().any(|&(id, _)| id == target.id) {
                    continue;
                }
                let features = pair_features(planet, target, &view.index);
                let score = sanitize_score(self.oracle.score(&features), target.id);
                scores.push((target.id, score));
            }

            let planet_orders = split_power(planet, &scores, &self.allocation);
            tracing::trace!(
                source = planet.id,
                targets = scores.len(),
                orders = planet_orders.len(),
                "oracle split"
            );
            orders.extend(planet_orders);
        }

        orders
    }
}
