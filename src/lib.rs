// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Frontline: a Planet Wars bot speaking the engine's line protocol.
//!
//! Each turn the engine streams the whole map on stdin; the bot answers
//! with `send-ship` orders on stdout. The bot is stateless between turns:
//! every decision is a pure function of the current snapshot.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Turn loop (Bot::run)              │
//! ├─────────────────────────────────────┤
//! │   Allocation engine + policies      │
//! │   (frontline, features, oracle)     │
//! ├─────────────────────────────────────┤
//! │   Graph index over the snapshot     │
//! ├─────────────────────────────────────┤
//! │   Protocol reader / order emitter   │
//! └─────────────────────────────────────┘
//! ```

pub mod bot;
pub mod engine;
pub mod error;
pub mod game;
pub mod oracle;
pub mod protocol;

pub use bot::{Bot, MatchSummary, TurnError};
pub use error::{BotError, ConfigError};
pub use protocol::ProtocolError;

// Re-export key game types at crate root for convenience
pub use game::{GameSettings, GraphIndex, Order, Owner, Planet, PlanetId, PlayerId, Turn};
