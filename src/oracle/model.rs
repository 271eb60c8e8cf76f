//! On-disk oracle format.

use serde::{Deserialize, Serialize};

use crate::engine::FeatureSet;

/// Oracle file format version this build reads.
pub const FORMAT_VERSION: u32 = 1;

/// A serialized oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleFile {
    /// Format version, must equal [`FORMAT_VERSION`].
    pub version: u32,
    /// Feature layout the model was trained on.
    pub feature_set: FeatureSet,
    /// The model.
    pub model: ModelSpec,
}

/// Serialized model, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    /// `bias + Σ weights[i] * x[i]`.
    Linear(LinearSpec),
    /// Feed-forward network.
    FeedForward(NetworkSpec),
}

/// Serialized linear model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSpec {
    /// One weight per feature.
    pub weights: Vec<f64>,
    /// Constant term.
    #[serde(default)]
    pub bias: f64,
}

/// Serialized feed-forward network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Number of inputs, keyed `-1..=-inputs`.
    pub inputs: usize,
    /// Hidden and output nodes.
    pub nodes: Vec<NodeSpec>,
    /// Weighted edges between inputs and nodes.
    pub connections: Vec<ConnectionSpec>,
    /// Output node keys; the first one is the score.
    pub outputs: Vec<i64>,
}

/// A network node computing `activation(bias + response * Σ w·v)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Node key, non-negative.
    pub id: i64,
    /// Added before activation.
    #[serde(default)]
    pub bias: f64,
    /// Multiplies the weighted input sum.
    #[serde(default = "default_response")]
    pub response: f64,
    /// Activation function.
    #[serde(default)]
    pub activation: Activation,
}

/// A weighted edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    /// Source key (input or node).
    pub from: i64,
    /// Target node key.
    pub to: i64,
    /// Edge weight.
    pub weight: f64,
    /// Disabled edges are ignored.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// Node activation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Logistic function of `5z`.
    #[default]
    Sigmoid,
    /// Hyperbolic tangent of `2.5z`.
    Tanh,
    /// `max(0, z)`.
    Relu,
    /// `z`.
    Identity,
    /// `z` clamped to `[-1, 1]`.
    Clamped,
}

impl Activation {
    /// Apply the activation.
    #[must_use]
    pub fn apply(self, z: f64) -> f64 {
        match self {
            Self::Sigmoid => {
                let z = (5.0 * z).clamp(-60.0, 60.0);
                1.0 / (1.0 + (-z).exp())
            }
            Self::Tanh => (2.5 * z).clamp(-60.0, 60.0).tanh(),
            Self::Relu => z.max(0.0),
            Self::Identity => z,
            Self::Clamped => z.clamp(-1.0, 1.0),
        }
    }
}

const fn default_response() -> f64 {
    1.0
}

const fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activations() {
        assert!((Activation::Sigmoid.apply(0.0) - 0.5).abs() < 1e-12);
        assert!(Activation::Sigmoid.apply(100.0) > 0.999_999);
        assert!(Activation::Sigmoid.apply(-100.0) < 1e-6);
        assert!((Activation::Tanh.apply(0.0)).abs() < 1e-12);
        assert!((Activation::Relu.apply(-2.0)).abs() < f64::EPSILON);
        assert!((Activation::Identity.apply(-2.0) + 2.0).abs() < f64::EPSILON);
        assert!((Activation::Clamped.apply(3.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_node_defaults() {
        let node: NodeSpec = serde_json::from_str(r#"{"id": 0}"#).unwrap();
        assert_eq!(node.activation, Activation::Sigmoid);
        assert!((node.response - 1.0).abs() < f64::EPSILON);
        assert!(node.bias.abs() < f64::EPSILON);

        let conn: ConnectionSpec = serde_json::from_str(r#"{"from": -1, "to": 0, "weight": 0.5}"#).unwrap();
        assert!(conn.enabled);
    }

    #[test]
    fn test_file_round_trip() {
        let file = OracleFile {
            version: FORMAT_VERSION,
            feature_set: FeatureSet::Planet,
            model: ModelSpec::FeedForward(NetworkSpec {
                inputs: 2,
                nodes: vec![NodeSpec {
                    id: 0,
                    bias: 0.1,
                    response: 1.0,
                    activation: Activation::Tanh,
                }],
                connections: vec![ConnectionSpec {
                    from: -1,
                    to: 0,
                    weight: 0.25,
                    enabled: true,
                }],
                outputs: vec![0],
            }),
        };
        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains(r#""kind":"feed_forward""#));
        let back: OracleFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, file);
    }
}
