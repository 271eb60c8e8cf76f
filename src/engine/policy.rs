//! Policy plumbing shared by all allocation strategies.

use std::fmt;

use clap::ValueEnum;

use crate::engine::{FeatureSet, NearestFrontier, OracleGradient, OracleSplit};
use crate::error::ConfigError;
use crate::game::{GameSettings, GraphError, GraphIndex, Order, Planet, PlanetId, Turn};
use crate::oracle::LoadedOracle;

/// Thresholds deciding when and how much a planet sends.
///
/// Each policy keeps the constants it was tuned with; they are not shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationConfig {
    /// A planet only sends when its health is strictly above this.
    pub attack_threshold: f64,
    /// Health kept back; the rest is available to send.
    pub reserve: f64,
    /// Orders must be strictly stronger than this to be sent.
    pub min_power: f64,
}

impl AllocationConfig {
    /// Constants of the nearest-frontier policy.
    pub const NEAREST: Self = Self {
        attack_threshold: 2.0,
        reserve: 1.000_003,
        min_power: 0.0,
    };

    /// Constants of the oracle-split policy.
    pub const SPLIT: Self = Self {
        attack_threshold: 2.0,
        reserve: 1.0001,
        min_power: 1.0,
    };

    /// Constants of the oracle-gradient policy.
    pub const GRADIENT: Self = Self {
        attack_threshold: 2.0,
        reserve: 1.0001,
        min_power: 0.0,
    };

    /// Check the constants are usable.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("attack threshold", self.attack_threshold),
            ("reserve", self.reserve),
            ("min power", self.min_power),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidAllocation(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Check a planet is strong enough to send anything.
    #[must_use]
    #[inline]
    pub fn can_send(&self, health: f64) -> bool {
        health > self.attack_threshold
    }

    /// Health a planet may send away.
    #[must_use]
    #[inline]
    pub fn available(&self, health: f64) -> f64 {
        health - self.reserve
    }

    /// Check an order of this power is worth sending.
    #[must_use]
    #[inline]
    pub fn accepts(&self, power: f64) -> bool {
        power.is_finite() && power > 0.0 && power > self.min_power
    }
}

/// Command-line overrides of a policy's [`AllocationConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AllocationOverrides {
    /// Replaces `attack_threshold`.
    pub attack_threshold: Option<f64>,
    /// Replaces `reserve`.
    pub reserve: Option<f64>,
    /// Replaces `min_power`.
    pub min_power: Option<f64>,
}

impl AllocationOverrides {
    /// Apply the overrides on top of a policy's defaults.
    #[must_use]
    pub fn apply(self, base: AllocationConfig) -> AllocationConfig {
        AllocationConfig {
            attack_threshold: self.attack_threshold.unwrap_or(base.attack_threshold),
            reserve: self.reserve.unwrap_or(base.reserve),
            min_power: self.min_power.unwrap_or(base.min_power),
        }
    }
}

/// The available allocation policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum PolicyKind {
    /// Send everything to the closest planet one layer further out.
    Nearest,
    /// Split across neighbors by oracle score of each sender/target pair.
    Split,
    /// Split across neighbors by score difference of whole planets.
    Gradient,
}

impl PolicyKind {
    /// All policies.
    pub const ALL: [Self; 3] = [Self::Nearest, Self::Split, Self::Gradient];

    /// Allocation constants the policy was tuned with.
    #[must_use]
    pub const fn default_allocation(self) -> AllocationConfig {
        match self {
            Self::Nearest => AllocationConfig::NEAREST,
            Self::Split => AllocationConfig::SPLIT,
            Self::Gradient => AllocationConfig::GRADIENT,
        }
    }

    /// Features the policy feeds its oracle, if it uses one.
    #[must_use]
    pub const fn feature_set(self) -> Option<FeatureSet> {
        match self {
            Self::Nearest => None,
            Self::Split => Some(FeatureSet::Pair),
            Self::Gradient => Some(FeatureSet::Planet),
        }
    }

    /// Name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Split => "split",
            Self::Gradient => "gradient",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One turn as the policies see it.
#[derive(Debug, Clone)]
pub struct TurnView<'a> {
    /// Match settings.
    pub settings: &'a GameSettings,
    /// The turn snapshot.
    pub turn: &'a Turn,
    /// Id lookup over the turn's planets.
    pub index: GraphIndex<'a>,
}

impl<'a> TurnView<'a> {
    /// Index a turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the turn's planets do not form a valid graph.
    pub fn new(settings: &'a GameSettings, turn: &'a Turn) -> Result<Self, GraphError> {
        Ok(Self {
            settings,
            turn,
            index: turn.index()?,
        })
    }

    /// Owned planets, in turn order.
    pub fn my_planets(&self) -> impl Iterator<Item = &'a Planet> + use<'a> {
        self.turn.planets.iter().filter(|p| p.owner.is_mine())
    }
}

/// An allocation strategy.
///
/// Policies are pure: the same turn always yields the same orders, and
/// every returned order satisfies the policy's [`AllocationConfig`].
pub trait Policy: fmt::Debug {
    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// Constants in effect.
    fn allocation(&self) -> &AllocationConfig;

    /// Decide this turn's orders.
    fn decide(&self, view: &TurnView<'_>) -> Vec<Order>;
}

/// Build the policy selected at startup.
///
/// # Errors
///
/// Returns an error if the allocation constants are invalid, or if an
/// oracle policy has no oracle or an oracle built for other features.
pub fn build_policy(
    kind: PolicyKind,
    oracle: Option<LoadedOracle>,
    overrides: AllocationOverrides,
) -> Result<Box<dyn Policy>, ConfigError> {
    let allocation = overrides.apply(kind.default_allocation());
    allocation.validate()?;

    let Some(expected) = kind.feature_set() else {
        return Ok(Box::new(NearestFrontier::new(allocation)));
    };

    let oracle = oracle.ok_or(ConfigError::MissingOracle { policy: kind })?;
    if oracle.feature_set != expected {
        return Err(ConfigError::FeatureSetMismatch {
            policy: kind,
            expected,
            found: oracle.feature_set,
        });
    }

    Ok(match kind {
        PolicyKind::Split => Box::new(OracleSplit::new(oracle, allocation)),
        _ => Box::new(OracleGradient::new(oracle, allocation)),
    })
}

/// Split a planet's available health across scored targets.
///
/// Each target receives a share proportional to its score over the sum of
/// absolute scores, so negative scores take a share of the budget without
/// receiving ships. Nothing is sent when all scores are zero.
pub(crate) fn split_power(
    source: &Planet,
    scores: &[(PlanetId, f64)],
    allocation: &AllocationConfig,
) -> Vec<Order> {
    let available = allocation.available(source.health);
    let total: f64 = scores.iter().map(|(_, score)| score.abs()).sum();
    if available <= 0.0 || !total.is_finite() || total <= 0.0 {
        return Vec::new();
    }

    let per_score = available / total;
    scores
        .iter()
        .map(|&(target, score)| Order::new(per_score * score, source.id, target))
        .filter(|order| allocation.accepts(order.power))
        .collect()
}

/// Replace a non-finite oracle score by zero.
pub(crate) fn sanitize_score(score: f64, planet: PlanetId) -> f64 {
    if score.is_finite() {
        score
    } else {
        tracing::warn!(planet, score, "oracle returned a non-finite score");
        0.0
    }
}
