//! CLI command implementations for Frontline.

pub(crate) mod inspect;
pub(crate) mod play;
pub(crate) mod validate;

use clap::Args;
use frontline::engine::{AllocationOverrides, Policy, PolicyKind, build_policy};
use frontline::oracle::LoadedOracle;
use frontline::{BotError, ConfigError, ProtocolError};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Flags selecting and tuning the policy.
#[derive(Args, Debug, Clone)]
pub(crate) struct PolicyArgs {
    /// Allocation policy
    #[arg(short, long, value_enum, default_value_t = PolicyKind::Nearest)]
    pub(crate) policy: PolicyKind,

    /// Oracle model file (JSON), required by split and gradient
    #[arg(short, long)]
    pub(crate) oracle: Option<PathBuf>,

    /// Health kept back on every sending planet
    #[arg(long)]
    pub(crate) reserve: Option<f64>,

    /// Orders must be stronger than this to be sent
    #[arg(long)]
    pub(crate) min_power: Option<f64>,

    /// Planets only send when their health is above this
    #[arg(long)]
    pub(crate) attack_threshold: Option<f64>,
}

impl PolicyArgs {
    /// Load the oracle, if any, and build the selected policy.
    pub(crate) fn build(&self) -> Result<Box<dyn Policy>, ConfigError> {
        let kind = self.policy;
        let oracle = match &self.oracle {
            Some(path) => {
                let oracle = LoadedOracle::load(path)?;
                if kind.feature_set().is_none() {
                    tracing::warn!(policy = %kind, "policy does not use an oracle, ignoring it");
                }
                Some(oracle)
            }
            None => None,
        };

        let overrides = AllocationOverrides {
            attack_threshold: self.attack_threshold,
            reserve: self.reserve,
            min_power: self.min_power,
        };
        let policy = build_policy(kind, oracle, overrides)?;
        tracing::debug!(policy = %kind, allocation = ?policy.allocation(), "policy ready");
        Ok(policy)
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ProtocolError> for CliError {
    fn from(e: ProtocolError) -> Self {
        Self::new(format!("protocol error: {e}"))
    }
}

impl From<BotError> for CliError {
    fn from(e: BotError) -> Self {
        Self::new(e.to_string())
    }
}
