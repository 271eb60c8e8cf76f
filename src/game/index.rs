//! Planet lookup by id.

use std::collections::HashMap;
use std::fmt;

use crate::game::{Planet, PlanetId};

/// The planet graph of a turn is not well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// Two planets share the same id.
    DuplicatePlanet(PlanetId),
    /// A neighbor id does not name any planet of the turn.
    UnknownNeighbor {
        /// Planet listing the neighbor.
        planet: PlanetId,
        /// The unresolved neighbor id.
        neighbor: PlanetId,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePlanet(id) => write!(f, "duplicate planet id {id}"),
            Self::UnknownNeighbor { planet, neighbor } => {
                write!(f, "planet {planet} lists unknown neighbor {neighbor}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Id to planet lookup over one turn's planets.
///
/// Construction checks that ids are unique and every neighbor resolves,
/// so lookups of ids taken from the same turn always succeed.
#[derive(Debug, Clone)]
pub struct GraphIndex<'a> {
    planets: &'a [Planet],
    by_id: HashMap<PlanetId, usize>,
}

impl<'a> GraphIndex<'a> {
    /// Build the index.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids or dangling neighbor ids.
    pub fn new(planets: &'a [Planet]) -> Result<Self, GraphError> {
        let mut by_id = HashMap::with_capacity(planets.len());
        for (slot, planet) in planets.iter().enumerate() {
            if by_id.insert(planet.id, slot).is_some() {
                return Err(GraphError::DuplicatePlanet(planet.id));
            }
        }

        for planet in planets {
            if let Some(&neighbor) = planet.neighbors.iter().find(|n| !by_id.contains_key(*n)) {
                return Err(GraphError::UnknownNeighbor {
                    planet: planet.id,
                    neighbor,
                });
            }
        }

        Ok(Self { planets, by_id })
    }

    /// Look up a planet by id.
    #[must_use]
    #[inline]
    pub fn get(&self, id: PlanetId) -> Option<&'a Planet> {
        self.by_id.get(&id).map(|&slot| &self.planets[slot])
    }

    /// Position of a planet in the turn's planet list.
    #[must_use]
    #[inline]
    pub fn slot(&self, id: PlanetId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Resolve the neighbors of a planet, in listed order.
    pub fn neighbors(&self, planet: &'a Planet) -> impl Iterator<Item = &'a Planet> + '_ {
        planet.neighbors.iter().filter_map(|&id| self.get(id))
    }

    /// All indexed planets.
    #[must_use]
    pub fn planets(&self) -> &'a [Planet] {
        self.planets
    }

    /// Number of indexed planets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.planets.len()
    }

    /// Check if there are no planets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}
