//! Ships in flight.

use crate::game::{Owner, PlanetId, Pos};

/// A ship travelling towards a planet.
///
/// Ships are part of every turn snapshot but no policy consumes them yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ship {
    /// Current position.
    pub pos: Pos,
    /// Planet the ship will land on.
    pub target: PlanetId,
    /// Who sent the ship.
    pub owner: Owner,
    /// Strength the ship lands with.
    pub power: f64,
}

impl Ship {
    /// Create a new ship.
    #[must_use]
    pub const fn new(pos: Pos, target: PlanetId, owner: Owner, power: f64) -> Self {
        Self {
            pos,
            target,
            owner,
            power,
        }
    }
}
