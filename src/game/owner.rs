//! Ownership of planets and ships.

use std::fmt;

/// Identifier the engine assigns to each player.
pub type PlayerId = u32;

/// Who holds a planet or ship, relative to the local player.
///
/// The wire format sends either a player id or `neutral`; the id is
/// resolved against [`GameSettings::player_id`](crate::game::GameSettings)
/// while reading, so the rest of the bot never compares raw ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    /// Owned by the local player.
    Mine,
    /// Owned by another player.
    Enemy(PlayerId),
    /// Owned by nobody.
    Neutral,
}

impl Owner {
    /// Classify a raw owner as seen by player `me`.
    #[must_use]
    pub const fn from_player(player: Option<PlayerId>, me: PlayerId) -> Self {
        match player {
            Some(id) if id == me => Self::Mine,
            Some(id) => Self::Enemy(id),
            None => Self::Neutral,
        }
    }

    /// The raw player id, as the engine would send it.
    #[must_use]
    pub const fn player(self, me: PlayerId) -> Option<PlayerId> {
        match self {
            Self::Mine => Some(me),
            Self::Enemy(id) => Some(id),
            Self::Neutral => None,
        }
    }

    /// Check if the local player owns this.
    #[must_use]
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mine => write!(f, "mine"),
            Self::Enemy(id) => write!(f, "enemy {id}"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}
