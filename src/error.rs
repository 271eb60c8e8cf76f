//! Error types for the bot.
//!
//! Protocol errors live in [`crate::protocol`]; this module holds the
//! startup configuration errors and the top-level error a match ends with.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::engine::{FeatureSet, PolicyKind};
use crate::protocol::ProtocolError;

/// The bot cannot start because its configuration is unusable.
///
/// Raised before the first turn is read, always fatal.
#[derive(Debug)]
pub enum ConfigError {
    /// The settings header could not be read.
    Settings(ProtocolError),
    /// The settings header was read but describes an impossible match.
    InvalidSettings(String),
    /// The selected policy needs an oracle but none was given.
    MissingOracle {
        /// The selected policy.
        policy: PolicyKind,
    },
    /// The oracle file could not be read.
    OracleIo {
        /// Path of the oracle file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The oracle file is not a valid model.
    OracleFormat(String),
    /// The model's input count does not match its declared feature set.
    ArityMismatch {
        /// Declared feature set.
        feature_set: FeatureSet,
        /// Inputs the feature set produces.
        expected: usize,
        /// Inputs the model takes.
        found: usize,
    },
    /// The oracle was built for other features than the policy feeds it.
    FeatureSetMismatch {
        /// The selected policy.
        policy: PolicyKind,
        /// Features the policy produces.
        expected: FeatureSet,
        /// Features the oracle was built for.
        found: FeatureSet,
    },
    /// An allocation constant is out of range.
    InvalidAllocation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings(e) => write!(f, "invalid game settings: {e}"),
            Self::InvalidSettings(msg) => write!(f, "invalid game settings: {msg}"),
            Self::MissingOracle { policy } => {
                write!(f, "policy '{policy}' requires an oracle file (--oracle)")
            }
            Self::OracleIo { path, source } => {
                write!(f, "failed to read oracle {}: {source}", path.display())
            }
            Self::OracleFormat(msg) => write!(f, "invalid oracle: {msg}"),
            Self::ArityMismatch {
                feature_set,
                expected,
                found,
            } => write!(
                f,
                "oracle takes {found} inputs but feature set '{feature_set}' has {expected}"
            ),
            Self::FeatureSetMismatch {
                policy,
                expected,
                found,
            } => write!(
                f,
                "policy '{policy}' feeds '{expected}' features, oracle expects '{found}'"
            ),
            Self::InvalidAllocation(msg) => write!(f, "invalid allocation settings: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Settings(e) => Some(e),
            Self::OracleIo { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Why a match ended abnormally.
#[derive(Debug)]
pub enum BotError {
    /// Bad configuration at startup.
    Config(ConfigError),
    /// Malformed engine input during the match.
    Protocol(ProtocolError),
    /// Writing orders to the engine failed.
    Output(io::Error),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Protocol(e) => write!(f, "protocol error: {e}"),
            Self::Output(e) => write!(f, "failed to write orders: {e}"),
        }
    }
}

impl std::error::Error for BotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Protocol(e) => Some(e),
            Self::Output(e) => Some(e),
        }
    }
}

impl From<ConfigError> for BotError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ProtocolError> for BotError {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}
