//! Oracle score gradient over whole planets.

use crate::engine::policy::{sanitize_score, split_power};
use crate::engine::{AllocationConfig, Policy, PolicyKind, TurnView, planet_features};
use crate::game::{Order, PlanetId};
use crate::oracle::Oracle;

/// Score every planet once, then let ships flow uphill.
///
/// Each planet gets a score from its [`planet_features`]. A sending planet
/// splits its spare health across neighbors in proportion to
/// `score(neighbor) - score(sender)`; only neighbors scoring higher than
/// the sender receive ships.
#[derive(Debug, Clone)]
pub struct OracleGradient<O> {
    oracle: O,
    allocation: AllocationConfig,
}

impl<O: Oracle> OracleGradient<O> {
    /// Create the policy around a planet-feature oracle.
    #[must_use]
    pub const fn new(oracle: O, allocation: AllocationConfig) -> Self {
        Self { oracle, allocation }
    }

    /// Oracle score of every planet, indexed like the turn's planet list.
    #[must_use]
    pub fn planet_scores(&self, view: &TurnView<'_>) -> Vec<f64> {
        view.index
            .planets()
            .iter()
            .map(|planet| {
                let features = planet_features(planet, &view.index);
                sanitize_score(self.oracle.score(&features), planet.id)
            })
            .collect()
    }
}

impl<O: Oracle> Policy for OracleGradient<O> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Gradient
    }

    fn allocation(&self) -> &AllocationConfig {
        &self.allocation
    }

    fn decide(&self, view: &TurnView<'_>) -> Vec<Order> {
        let scores = self.planet_scores(view);
        let score_of = |id: PlanetId| view.index.slot(id).map_or(0.0, |slot| scores[slot]);

        let mut orders = Vec::new();
        for planet in view.my_planets() {
            if !self.allocation.can_send(planet.health) {
                continue;
            }

            let own = score_of(planet.id);
            let mut diffs: Vec<(PlanetId, f64)> = Vec::with_capacity(planet.neighbors.len());
            for &neighbor in &planet.neighbors {
                if diffs.iter().any(|&(id, _)| id == neighbor) {
                    continue;
                }
                diffs.push((neighbor, score_of(neighbor) - own));
            }

            let planet_orders = split_power(planet, &diffs, &self.allocation);
            tracing::trace!(
                source = planet.id,
                score = own,
                orders = planet_orders.len(),
                "oracle gradient"
            );
            orders.extend(planet_orders);
        }

        orders
    }
}
