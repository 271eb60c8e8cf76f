//! Decision engine.
//!
//! Turns a validated [`Turn`](crate::game::Turn) into orders:
//! - Frontline layering by graph distance from non-owned planets
//! - Feature extraction for oracle scoring
//! - Pluggable allocation policies splitting each planet's spare health
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Policy (nearest/split/gradient)   │
//! ├──────────────────┬──────────────────┤
//! │    Frontline     │  Features+Oracle │
//! ├──────────────────┴──────────────────┤
//! │            Graph Index              │
//! └─────────────────────────────────────┘
//! ```

mod features;
mod frontline;
mod gradient;
mod nearest;
mod policy;
mod split;

pub use features::{
    FeatureSet, MISSING_NEIGHBOR, NEAREST_NEIGHBORS, NEIGHBOR_FEATURES, PAIR_FEATURES,
    PLANET_FEATURES, pair_features, planet_features,
};
pub use frontline::Frontline;
pub use gradient::OracleGradient;
pub use nearest::NearestFrontier;
pub use policy::{
    AllocationConfig, AllocationOverrides, Policy, PolicyKind, TurnView, build_policy,
};
pub use split::OracleSplit;
