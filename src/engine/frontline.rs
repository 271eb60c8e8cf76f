//! Frontline layering.
//!
//! Layer 0 holds every planet the local player does not own. Layer `k`
//! holds the owned planets that border layer `k - 1` and were not placed
//! earlier, so an owned planet's layer is its graph distance to the nearest
//! non-owned planet.

use std::collections::HashMap;

use crate::game::{GraphIndex, PlanetId};

/// Owned planets grouped by distance from non-owned territory.
#[derive(Debug, Clone, Default)]
pub struct Frontline {
    layers: Vec<Vec<PlanetId>>,
    depth: HashMap<PlanetId, usize>,
    unreachable: Vec<PlanetId>,
}

impl Frontline {
    /// Layer the planets of a turn.
    ///
    /// Expansion stops as soon as a pass places no planet. Owned planets
    /// left at that point have no path to non-owned territory and are
    /// reported by [`unreachable`](Self::unreachable) instead of a layer.
    #[must_use]
    pub fn compute(index: &GraphIndex<'_>) -> Self {
        let (mut remaining, others): (Vec<_>, Vec<_>) =
            index.planets().iter().partition(|p| p.owner.is_mine());

        let mut depth = HashMap::with_capacity(index.len());
        let outside: Vec<PlanetId> = others.iter().map(|p| p.id).collect();
        for &id in &outside {
            depth.insert(id, 0);
        }
        let mut layers = vec![outside];

        while !remaining.is_empty() {
            let previous = layers.len() - 1;
            let (next, rest): (Vec<_>, Vec<_>) = remaining.into_iter().partition(|p| {
                p.neighbors
                    .iter()
                    .any(|n| depth.get(n) == Some(&previous))
            });
            remaining = rest;

            if next.is_empty() {
                break;
            }

            let layer: Vec<PlanetId> = next.iter().map(|p| p.id).collect();
            for &id in &layer {
                depth.insert(id, previous + 1);
            }
            layers.push(layer);
        }

        let unreachable = remaining.iter().map(|p| p.id).collect();

        Self {
            layers,
            depth,
            unreachable,
        }
    }

    /// All layers, layer 0 first.
    #[must_use]
    pub fn layers(&self) -> &[Vec<PlanetId>] {
        &self.layers
    }

    /// Planets of one layer, empty if there is no such layer.
    #[must_use]
    pub fn layer(&self, depth: usize) -> &[PlanetId] {
        self.layers.get(depth).map_or(&[][..], Vec::as_slice)
    }

    /// Number of layers, including layer 0.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if there are no layers at all (only for a default value).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer a planet was placed in.
    #[must_use]
    #[inline]
    pub fn depth_of(&self, id: PlanetId) -> Option<usize> {
        self.depth.get(&id).copied()
    }

    /// Owned planets directly bordering non-owned territory.
    #[must_use]
    pub fn frontier(&self) -> &[PlanetId] {
        self.layer(1)
    }

    /// Owned planets with no path to non-owned territory.
    #[must_use]
    pub fn unreachable(&self) -> &[PlanetId] {
        &self.unreachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Owner, Planet, Pos};

    fn planet(id: PlanetId, owner: Owner, neighbors: Vec<PlanetId>) -> Planet {
        Planet::new(id, Pos::new(id as f64, 0.0), 1.0, owner, 5.0, neighbors)
    }

    #[test]
    fn test_chain_layers() {
        // 0(enemy) - 1 - 2 - 3, all but 0 mine
        let planets = vec![
            planet(0, Owner::Enemy(1), vec![1]),
            planet(1, Owner::Mine, vec![0, 2]),
            planet(2, Owner::Mine, vec![1, 3]),
            planet(3, Owner::Mine, vec![2]),
        ];
        let index = GraphIndex::new(&planets).unwrap();
        let frontline = Frontline::compute(&index);

        assert_eq!(frontline.layers(), &[vec![0], vec![1], vec![2], vec![3]]);
        assert_eq!(frontline.depth_of(3), Some(3));
        assert_eq!(frontline.frontier(), &[1]);
        assert!(frontline.unreachable().is_empty());
    }

    #[test]
    fn test_neutral_counts_as_outside() {
        let planets = vec![
            planet(0, Owner::Neutral, vec![1]),
            planet(1, Owner::Mine, vec![0]),
        ];
        let index = GraphIndex::new(&planets).unwrap();
        let frontline = Frontline::compute(&index);

        assert_eq!(frontline.layer(0), &[0]);
        assert_eq!(frontline.layer(1), &[1]);
    }

    #[test]
    fn test_layer_keeps_planet_order() {
        // Both 2 and 1 border the enemy; the layer follows the turn's order.
        let planets = vec![
            planet(2, Owner::Mine, vec![0]),
            planet(0, Owner::Enemy(1), vec![1, 2]),
            planet(1, Owner::Mine, vec![0]),
        ];
        let index = GraphIndex::new(&planets).unwrap();
        let frontline = Frontline::compute(&index);

        assert_eq!(frontline.layer(1), &[2, 1]);
    }

    #[test]
    fn test_disconnected_component_terminates() {
        // 2 and 3 only see each other.
        let planets = vec![
            planet(0, Owner::Enemy(1), vec![1]),
            planet(1, Owner::Mine, vec![0]),
            planet(2, Owner::Mine, vec![3]),
            planet(3, Owner::Mine, vec![2]),
        ];
        let index = GraphIndex::new(&planets).unwrap();
        let frontline = Frontline::compute(&index);

        assert_eq!(frontline.len(), 2);
        assert_eq!(frontline.unreachable(), &[2, 3]);
        assert_eq!(frontline.depth_of(2), None);
    }

    #[test]
    fn test_everything_owned() {
        let planets = vec![
            planet(0, Owner::Mine, vec![1]),
            planet(1, Owner::Mine, vec![0]),
        ];
        let index = GraphIndex::new(&planets).unwrap();
        let frontline = Frontline::compute(&index);

        assert_eq!(frontline.len(), 1);
        assert!(frontline.layer(0).is_empty());
        assert_eq!(frontline.unreachable(), &[0, 1]);
    }

    #[test]
    fn test_nothing_owned() {
        let planets = vec![planet(0, Owner::Enemy(1), vec![]), planet(1, Owner::Neutral, vec![])];
        let index = GraphIndex::new(&planets).unwrap();
        let frontline = Frontline::compute(&index);

        assert_eq!(frontline.layers(), &[vec![0, 1]]);
        assert!(frontline.frontier().is_empty());
    }

    #[test]
    fn test_shortcut_places_planet_early() {
        // 3 borders the enemy directly even though it is listed last.
        let planets = vec![
            planet(0, Owner::Enemy(1), vec![1, 3]),
            planet(1, Owner::Mine, vec![0, 2]),
            planet(2, Owner::Mine, vec![1, 3]),
            planet(3, Owner::Mine, vec![2, 0]),
        ];
        let index = GraphIndex::new(&planets).unwrap();
        let frontline = Frontline::compute(&index);

        assert_eq!(frontline.layer(1), &[1, 3]);
        assert_eq!(frontline.layer(2), &[2]);
    }
}
