//! Linear scoring.

use crate::oracle::Oracle;

/// `bias + Σ weights[i] * x[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: Vec<f64>,
    bias: f64,
}

impl LinearModel {
    /// Create a model with one weight per feature.
    #[must_use]
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }
}

impl Oracle for LinearModel {
    fn arity(&self) -> usize {
        self.weights.len()
    }

    fn score(&self, features: &[f64]) -> f64 {
        self.bias
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}
