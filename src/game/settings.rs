//! Match settings.

use crate::game::PlayerId;

/// Settings sent once before the first turn.
///
/// Read at startup and passed by reference to every turn; nothing in the
/// bot mutates them afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// Seed the engine generated the map with.
    pub seed: i64,
    /// Number of players in the match.
    pub num_players: u32,
    /// The local player's id.
    pub player_id: PlayerId,
}

impl GameSettings {
    /// Create new settings.
    #[must_use]
    pub const fn new(seed: i64, num_players: u32, player_id: PlayerId) -> Self {
        Self {
            seed,
            num_players,
            player_id,
        }
    }

    /// Check the settings describe a playable match.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if there are no players.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_players == 0 {
            return Err("num-players must be at least 1".to_string());
        }
        Ok(())
    }
}
