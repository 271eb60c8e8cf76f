//! Planets and positions.

use crate::game::Owner;

/// Identifier of a planet, stable for the whole match.
pub type PlanetId = usize;

/// A position in the game plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pos {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Pos {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another position.
    #[must_use]
    #[inline]
    pub fn squared_distance(self, other: Pos) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A planet as sent by the engine for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    /// Unique identifier.
    pub id: PlanetId,
    /// Center of the planet.
    pub pos: Pos,
    /// Planet radius.
    pub radius: f64,
    /// Current owner.
    pub owner: Owner,
    /// Garrison strength, never negative.
    pub health: f64,
    /// Adjacent planets, in the order the engine listed them.
    pub neighbors: Vec<PlanetId>,
}

impl Planet {
    /// Create a new planet.
    #[must_use]
    pub fn new(
        id: PlanetId,
        pos: Pos,
        radius: f64,
        owner: Owner,
        health: f64,
        neighbors: Vec<PlanetId>,
    ) -> Self {
        Self {
            id,
            pos,
            radius,
            owner,
            health,
            neighbors,
        }
    }

    /// Squared distance between the centers of two planets.
    #[must_use]
    #[inline]
    pub fn squared_distance_to(&self, other: &Planet) -> f64 {
        self.pos.squared_distance(other.pos)
    }

    /// Health signed by allegiance: positive when mine, negative otherwise.
    #[must_use]
    #[inline]
    pub fn signed_health(&self) -> f64 {
        if self.owner.is_mine() {
            self.health
        } else {
            -self.health
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_distance() {
        let a = Pos::new(1.0, 2.0);
        let b = Pos::new(4.0, 6.0);
        assert!((a.squared_distance(b) - 25.0).abs() < f64::EPSILON);
        assert!((b.squared_distance(a) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_signed_health() {
        let mut planet = Planet::new(3, Pos::default(), 2.0, Owner::Mine, 4.5, vec![]);
        assert!((planet.signed_health() - 4.5).abs() < f64::EPSILON);

        planet.owner = Owner::Enemy(2);
        assert!((planet.signed_health() + 4.5).abs() < f64::EPSILON);

        planet.owner = Owner::Neutral;
        assert!((planet.signed_health() + 4.5).abs() < f64::EPSILON);
    }
}
