//! Scoring oracles.
//!
//! An oracle maps a fixed-length feature vector to a single score. The
//! policies only see the [`Oracle`] trait, so any scoring function can be
//! plugged in; trained models are loaded from versioned JSON files:
//!
//! ```json
//! {
//!   "version": 1,
//!   "feature_set": "pair",
//!   "model": { "kind": "linear", "weights": [0.5, -1.0, 0.2, -0.2], "bias": 0.0 }
//! }
//! ```
//!
//! `feed_forward` models describe a weighted acyclic graph: input `i` has
//! key `-(i + 1)`, hidden and output nodes have non-negative keys, and the
//! first output node's value is the score.

mod linear;
mod model;
mod network;

pub use linear::LinearModel;
pub use model::{
    Activation, ConnectionSpec, FORMAT_VERSION, LinearSpec, ModelSpec, NetworkSpec, NodeSpec,
    OracleFile,
};
pub use network::FeedForwardNet;

use std::fmt;
use std::fs;
use std::path::Path;

use crate::engine::FeatureSet;
use crate::error::ConfigError;

/// A scoring function over fixed-length feature vectors.
pub trait Oracle: fmt::Debug {
    /// Number of features the oracle expects.
    fn arity(&self) -> usize;

    /// Score a feature vector of length [`arity`](Self::arity).
    fn score(&self, features: &[f64]) -> f64;
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn score(&self, features: &[f64]) -> f64 {
        (**self).score(features)
    }
}

/// An oracle backed by a plain function.
///
/// Mostly useful as a stand-in for a trained model.
#[derive(Clone, Copy)]
pub struct FnOracle<F> {
    arity: usize,
    f: F,
}

impl<F: Fn(&[f64]) -> f64> FnOracle<F> {
    /// Wrap a function taking `arity` features.
    #[must_use]
    pub const fn new(arity: usize, f: F) -> Self {
        Self { arity, f }
    }
}

impl<F> fmt::Debug for FnOracle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOracle").field("arity", &self.arity).finish_non_exhaustive()
    }
}

impl<F: Fn(&[f64]) -> f64> Oracle for FnOracle<F> {
    fn arity(&self) -> usize {
        self.arity
    }

    fn score(&self, features: &[f64]) -> f64 {
        (self.f)(features)
    }
}

/// A model ready to score.
#[derive(Debug, Clone)]
pub enum Model {
    /// Weighted sum of the features.
    Linear(LinearModel),
    /// Feed-forward network.
    FeedForward(FeedForwardNet),
}

impl Oracle for Model {
    fn arity(&self) -> usize {
        match self {
            Self::Linear(m) => m.arity(),
            Self::FeedForward(m) => m.arity(),
        }
    }

    fn score(&self, features: &[f64]) -> f64 {
        match self {
            Self::Linear(m) => m.score(features),
            Self::FeedForward(m) => m.score(features),
        }
    }
}

/// An oracle loaded from a file, with the feature layout it was built for.
#[derive(Debug, Clone)]
pub struct LoadedOracle {
    /// Features the model consumes.
    pub feature_set: FeatureSet,
    /// The model itself.
    pub model: Model,
}

impl LoadedOracle {
    /// Build an oracle from a parsed file.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported format version, an invalid model,
    /// or a model whose input count does not match its feature set.
    pub fn from_file(file: OracleFile) -> Result<Self, ConfigError> {
        if file.version != FORMAT_VERSION {
            return Err(ConfigError::OracleFormat(format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                file.version
            )));
        }

        let model = match file.model {
            ModelSpec::Linear(spec) => Model::Linear(LinearModel::new(spec.weights, spec.bias)),
            ModelSpec::FeedForward(spec) => Model::FeedForward(
                FeedForwardNet::compile(&spec).map_err(ConfigError::OracleFormat)?,
            ),
        };

        let expected = file.feature_set.arity();
        if model.arity() != expected {
            return Err(ConfigError::ArityMismatch {
                feature_set: file.feature_set,
                expected,
                found: model.arity(),
            });
        }

        Ok(Self {
            feature_set: file.feature_set,
            model,
        })
    }

    /// Parse an oracle from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid oracle file.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: OracleFile =
            serde_json::from_str(json).map_err(|e| ConfigError::OracleFormat(e.to_string()))?;
        Self::from_file(file)
    }

    /// Load an oracle file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid oracle.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::OracleIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl Oracle for LoadedOracle {
    fn arity(&self) -> usize {
        self.model.arity()
    }

    fn score(&self, features: &[f64]) -> f64 {
        self.model.score(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_oracle() {
        let oracle = FnOracle::new(2, |x: &[f64]| x[0] - x[1]);
        assert_eq!(oracle.arity(), 2);
        assert!((oracle.score(&[5.0, 3.0]) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boxed_oracle() {
        let oracle: Box<dyn Oracle> = Box::new(FnOracle::new(1, |x: &[f64]| x[0] * 2.0));
        assert_eq!(oracle.arity(), 1);
        assert!((oracle.score(&[1.5]) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_linear_from_json() {
        let oracle = LoadedOracle::from_json(
            r#"{"version":1,"feature_set":"pair","model":{"kind":"linear","weights":[1,0,0,-1],"bias":0.5}}"#,
        )
        .unwrap();
        assert_eq!(oracle.feature_set, FeatureSet::Pair);
        assert!((oracle.score(&[3.0, 9.0, 9.0, 1.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_unsupported_version() {
        let err = LoadedOracle::from_json(
            r#"{"version":2,"feature_set":"pair","model":{"kind":"linear","weights":[1,0,0,0]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::OracleFormat(_)));
    }

    #[test]
    fn test_arity_mismatch() {
        let err = LoadedOracle::from_json(
            r#"{"version":1,"feature_set":"planet","model":{"kind":"linear","weights":[1,0,0,0]}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ArityMismatch {
                feature_set: FeatureSet::Planet,
                expected: 14,
                found: 4
            }
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = LoadedOracle::from_json("{\"version\": 1").unwrap_err();
        assert!(matches!(err, ConfigError::OracleFormat(_)));
    }
}
