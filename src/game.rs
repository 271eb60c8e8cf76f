//! Game snapshot types.
//!
//! Everything the engine streams to a bot during one turn:
//! - Planets with position, owner, health and adjacency
//! - Ships in flight
//! - Match settings, fixed for the whole game
//! - Orders the bot sends back
//!
//! A [`Turn`] is rebuilt from the wire every turn and dropped afterwards.
//! Lookups by planet id go through a [`GraphIndex`] built from that turn.

mod index;
mod order;
mod owner;
mod planet;
mod settings;
mod ship;

pub use index::{GraphError, GraphIndex};
pub use order::Order;
pub use owner::{Owner, PlayerId};
pub use planet::{Planet, PlanetId, Pos};
pub use settings::GameSettings;
pub use ship::Ship;

/// Everything the engine sent for a single turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Turn {
    /// All planets, in the order the engine listed them.
    pub planets: Vec<Planet>,
    /// All ships in flight.
    pub ships: Vec<Ship>,
}

impl Turn {
    /// Create a turn from planets and ships.
    #[must_use]
    pub fn new(planets: Vec<Planet>, ships: Vec<Ship>) -> Self {
        Self { planets, ships }
    }

    /// Build the id lookup for this turn.
    ///
    /// # Errors
    ///
    /// Returns an error if two planets share an id or a neighbor id does
    /// not resolve to a planet of this turn.
    pub fn index(&self) -> Result<GraphIndex<'_>, GraphError> {
        GraphIndex::new(&self.planets)
    }

    /// Iterate over the planets owned by the local player.
    pub fn my_planets(&self) -> impl Iterator<Item = &Planet> {
        self.planets.iter().filter(|p| p.owner.is_mine())
    }
}
