//! Line protocol spoken with the game engine.
//!
//! The engine writes settings once, then one block per turn:
//!
//! ```text
//! seed 42
//! num-players 2
//! player-id 1
//! turn-init
//! num-planets 2
//! planet 0 10 20 5 1 12.5
//! neighbors 1
//! planet 1 30 20 5 neutral 3
//! neighbors 0
//! num-ships 0
//! turn-start
//! ```
//!
//! The bot answers each turn with zero or more `send-ship <power> <from> <to>`
//! lines followed by `end-turn`. After the last turn the engine sends
//! `game-end` instead of `turn-init`.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::{write_comment, write_end_turn, write_order, write_orders, write_settings, write_turn};

use std::fmt;
use std::io;

use crate::game::GraphError;

/// Keyword opening a turn.
pub const TURN_INIT: &str = "turn-init";
/// Keyword closing the engine's turn block.
pub const TURN_START: &str = "turn-start";
/// Keyword closing the bot's answer.
pub const END_TURN: &str = "end-turn";
/// Keyword sent instead of `turn-init` when the match is over.
pub const GAME_END: &str = "game-end";
/// Keyword of an order line.
pub const SEND_SHIP: &str = "send-ship";
/// Owner token of unowned planets and ships.
pub const NEUTRAL: &str = "neutral";

/// Malformed or out-of-sequence engine input.
///
/// Always fatal: nothing downstream can work on a half-read turn.
#[derive(Debug)]
pub enum ProtocolError {
    /// Reading from the engine failed.
    Io(io::Error),
    /// Input ended in the middle of the grammar.
    UnexpectedEof {
        /// What the reader was waiting for.
        expected: &'static str,
    },
    /// A line does not have the expected shape.
    UnexpectedLine {
        /// 1-based input line number.
        line: usize,
        /// The record that was expected.
        expected: &'static str,
        /// The line as received.
        found: String,
    },
    /// A token could not be parsed as the field's type.
    InvalidValue {
        /// 1-based input line number.
        line: usize,
        /// Name of the field.
        field: &'static str,
        /// The offending token.
        token: String,
    },
    /// The planets of a turn do not form a valid graph.
    Graph {
        /// Line number of the `turn-start` that closed the turn.
        line: usize,
        /// What is wrong with the graph.
        error: GraphError,
    },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof { expected } => {
                write!(f, "input ended while expecting {expected}")
            }
            Self::UnexpectedLine {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected}, got '{found}'"),
            Self::InvalidValue { line, field, token } => {
                write!(f, "line {line}: invalid {field} '{token}'")
            }
            Self::Graph { line, error } => write!(f, "turn ending at line {line}: {error}"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Graph { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for ProtocolError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
