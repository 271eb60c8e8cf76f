//! Feed-forward network evaluation.

use std::collections::{HashMap, VecDeque};

use crate::oracle::model::{Activation, NetworkSpec};
use crate::oracle::Oracle;

/// A node in evaluation order.
#[derive(Debug, Clone)]
struct Neuron {
    slot: usize,
    bias: f64,
    response: f64,
    activation: Activation,
    links: Vec<(usize, f64)>,
}

/// A compiled feed-forward network.
///
/// Values live in one flat buffer: inputs first, then nodes in the order
/// they were declared. Neurons are stored in topological order so one pass
/// evaluates the whole network.
#[derive(Debug, Clone)]
pub struct FeedForwardNet {
    inputs: usize,
    slots: usize,
    neurons: Vec<Neuron>,
    output: usize,
}

impl FeedForwardNet {
    /// Compile a network description.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem for duplicate or negative node
    /// keys, edges touching unknown keys or pointing into an input, missing
    /// outputs, and cycles.
    pub fn compile(spec: &NetworkSpec) -> Result<Self, String> {
        let mut slot_of: HashMap<i64, usize> = HashMap::new();
        for i in 0..spec.inputs {
            let key = -i64::try_from(i + 1).map_err(|_| "too many inputs".to_string())?;
            slot_of.insert(key, i);
        }
        for (offset, node) in spec.nodes.iter().enumerate() {
            if node.id < 0 {
                return Err(format!("node key {} is reserved for inputs", node.id));
            }
            if slot_of.insert(node.id, spec.inputs + offset).is_some() {
                return Err(format!("duplicate node key {}", node.id));
            }
        }

        let node_count = spec.nodes.len();
        let mut links: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut pending = vec![0usize; node_count];

        for conn in spec.connections.iter().filter(|c| c.enabled) {
            let from = *slot_of
                .get(&conn.from)
                .ok_or_else(|| format!("connection from unknown key {}", conn.from))?;
            let to = *slot_of
                .get(&conn.to)
                .ok_or_else(|| format!("connection to unknown key {}", conn.to))?;
            if to < spec.inputs {
                return Err(format!("connection into input key {}", conn.to));
            }

            let to_node = to - spec.inputs;
            links[to_node].push((from, conn.weight));
            if from >= spec.inputs {
                dependents[from - spec.inputs].push(to_node);
                pending[to_node] += 1;
            }
        }

        let first = spec
            .outputs
            .first()
            .ok_or_else(|| "network has no outputs".to_string())?;
        let output = *slot_of
            .get(first)
            .ok_or_else(|| format!("output key {first} is not a node"))?;
        if output < spec.inputs {
            return Err(format!("output key {first} is an input"));
        }

        // Kahn's algorithm over node-to-node edges
        let mut ready: VecDeque<usize> = (0..node_count).filter(|&n| pending[n] == 0).collect();
        let mut neurons = Vec::with_capacity(node_count);
        while let Some(n) = ready.pop_front() {
            for &next in &dependents[n] {
                pending[next] -= 1;
                if pending[next] == 0 {
                    ready.push_back(next);
                }
            }
            let node = &spec.nodes[n];
            neurons.push(Neuron {
                slot: spec.inputs + n,
                bias: node.bias,
                response: node.response,
                activation: node.activation,
                links: std::mem::take(&mut links[n]),
            });
        }
        if neurons.len() != node_count {
            return Err("network contains a cycle".to_string());
        }

        Ok(Self {
            inputs: spec.inputs,
            slots: spec.inputs + node_count,
            neurons,
            output,
        })
    }
}

impl Oracle for FeedForwardNet {
    fn arity(&self) -> usize {
        self.inputs
    }

    fn score(&self, features: &[f64]) -> f64 {
        let mut values = vec![0.0; self.slots];
        let n = features.len().min(self.inputs);
        values[..n].copy_from_slice(&features[..n]);

        for neuron in &self.neurons {
            let sum: f64 = neuron.links.iter().map(|&(from, w)| values[from] * w).sum();
            values[neuron.slot] = neuron.activation.apply(neuron.bias + neuron.response * sum);
        }

        values[self.output]
    }
}
