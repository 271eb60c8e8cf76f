//! Orders sent back to the engine.

use crate::game::PlanetId;

/// Send a ship of `power` from `source` to `destination`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    /// Strength of the ship, always positive when emitted.
    pub power: f64,
    /// Sending planet.
    pub source: PlanetId,
    /// Target planet.
    pub destination: PlanetId,
}

impl Order {
    /// Create a new order.
    #[must_use]
    pub const fn new(power: f64, source: PlanetId, destination: PlanetId) -> Self {
        Self {
            power,
            source,
            destination,
        }
    }

    /// Check the order is worth putting on the wire.
    #[must_use]
    pub fn is_sendable(&self) -> bool {
        self.power.is_finite() && self.power > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sendable() {
        assert!(Order::new(0.5, 0, 1).is_sendable());
        assert!(!Order::new(0.0, 0, 1).is_sendable());
        assert!(!Order::new(-1.0, 0, 1).is_sendable());
        assert!(!Order::new(f64::NAN, 0, 1).is_sendable());
        assert!(!Order::new(f64::INFINITY, 0, 1).is_sendable());
    }
}
