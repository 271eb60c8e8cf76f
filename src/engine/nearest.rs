//! Nearest-frontier policy.

use crate::engine::{AllocationConfig, Frontline, Policy, PolicyKind, TurnView};
use crate::game::{Order, Planet};

/// Push everything one layer outwards, to the closest planet there.
///
/// Every owned planet strong enough to send picks, among its neighbors in
/// the next-lower layer, the one at the smallest squared distance (first in
/// neighbor-list order on ties) and sends all health above the reserve.
/// Frontier planets therefore attack, interior planets reinforce towards
/// the frontier, and nothing ever moves away from it.
#[derive(Debug, Clone, Copy)]
pub struct NearestFrontier {
    allocation: AllocationConfig,
}

impl NearestFrontier {
    /// Create the policy.
    #[must_use]
    pub const fn new(allocation: AllocationConfig) -> Self {
        Self { allocation }
    }

    /// Closest neighbor of `planet` in layer `depth`.
    fn closest_in_layer<'a>(
        view: &TurnView<'a>,
        frontline: &Frontline,
        planet: &'a Planet,
        depth: usize,
    ) -> Option<&'a Planet> {
        let mut best: Option<(f64, &Planet)> = None;
        for candidate in view
            .index
            .neighbors(planet)
            .filter(|n| frontline.depth_of(n.id) == Some(depth))
        {
            let distance = planet.squared_distance_to(candidate);
            if best.is_none_or(|(closest, _)| distance < closest) {
                best = Some((distance, candidate));
            }
        }
        best.map(|(_, target)| target)
    }
}

impl Default for NearestFrontier {
    fn default() -> Self {
        Self::new(AllocationConfig::NEAREST)
    }
}

impl Policy for NearestFrontier {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Nearest
    }

    fn allocation(&self) -> &AllocationConfig {
        &self.allocation
    }

    fn decide(&self, view: &TurnView<'_>) -> Vec<Order> {
        let frontline = Frontline::compute(&view.index);
        tracing::debug!(
            layers = frontline.len(),
            unreachable = frontline.unreachable().len(),
            "frontline layered"
        );
        let mut orders = Vec::new();

        for depth in 1..frontline.len() {
            for &id in frontline.layer(depth) {
                let Some(planet) = view.index.get(id) else {
                    continue;
                };
                if !self.allocation.can_send(planet.health) {
                    continue;
                }
                let Some(target) = Self::closest_in_layer(view, &frontline, planet, depth - 1) else {
                    continue;
                };

                let order = Order::new(self.allocation.available(planet.health), planet.id, target.id);
                if self.allocation.accepts(order.power) {
                    tracing::trace!(
                        source = order.source,
                        destination = order.destination,
                        power = order.power,
                        "nearest frontier order"
                    );
                    orders.push(order);
                }
            }
        }

        orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameSettings, Owner, PlanetId, Pos, Turn};

    fn planet(id: PlanetId, x: f64, y: f64, owner: Owner, health: f64, neighbors: Vec<PlanetId>) -> Planet {
        Planet::new(id, Pos::new(x, y), 1.0, owner, health, neighbors)
    }

    fn decide(planets: Vec<Planet>) -> Vec<Order> {
        let settings = GameSettings::new(0, 2, 0);
        let turn = Turn::new(planets, Vec::new());
        let view = TurnView::new(&settings, &turn).unwrap();
        NearestFrontier::default().decide(&view)
    }

    #[test]
    fn test_attacks_adjacent_enemy() {
        let orders = decide(vec![
            planet(0, 0.0, 0.0, Owner::Mine, 5.0, vec![1]),
            planet(1, 1.0, 0.0, Owner::Enemy(1), 3.0, vec![0]),
        ]);

        assert_eq!(orders.len(), 1);
        assert_eq!((orders[0].source, orders[0].destination), (0, 1));
        assert!((orders[0].power - 3.999_997).abs() < 1e-9);
    }

    #[test]
    fn test_weak_planet_holds() {
        let orders = decide(vec![
            planet(0, 0.0, 0.0, Owner::Mine, 2.0, vec![1]),
            planet(1, 1.0, 0.0, Owner::Enemy(1), 3.0, vec![0]),
        ]);
        assert!(orders.is_empty());
    }

    #[test]
    fn test_picks_closest_target() {
        let orders = decide(vec![
            planet(0, 0.0, 0.0, Owner::Mine, 5.0, vec![1, 2]),
            planet(1, 5.0, 0.0, Owner::Enemy(1), 1.0, vec![0]),
            planet(2, 0.0, 2.0, Owner::Neutral, 9.0, vec![0]),
        ]);
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].destination, 2);
    }

    #[test]
    fn test_tie_goes_to_first_listed_neighbor() {
        let orders = decide(vec![
            planet(0, 0.0, 0.0, Owner::Mine, 5.0, vec![2, 1]),
            planet(1, 3.0, 0.0, Owner::Enemy(1), 1.0, vec![0]),
            planet(2, 0.0, 3.0, Owner::Neutral, 1.0, vec![0]),
        ]);
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].destination, 2);
    }

    #[test]
    fn test_interior_reinforces_frontier_only() {
        // 2 is interior: its only lower-layer neighbor is 1, although 3 is closer.
        let orders = decide(vec![
            planet(0, 0.0, 0.0, Owner::Enemy(1), 1.0, vec![1]),
            planet(1, 1.0, 0.0, Owner::Mine, 1.5, vec![0, 2]),
            planet(2, 5.0, 0.0, Owner::Mine, 6.0, vec![1, 3]),
            planet(3, 5.5, 0.0, Owner::Mine, 1.0, vec![2]),
        ]);
        assert_eq!(orders.len(), 1);
        assert_eq!((orders[0].source, orders[0].destination), (2, 1));
    }

    #[test]
    fn test_unreachable_planets_hold() {
        let orders = decide(vec![
            planet(0, 0.0, 0.0, Owner::Mine, 10.0, vec![1]),
            planet(1, 1.0, 0.0, Owner::Mine, 10.0, vec![0]),
        ]);
        assert!(orders.is_empty());
    }
}
