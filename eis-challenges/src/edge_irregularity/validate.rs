use super::{Graph, Vertex};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelingError {
    #[error("labeling has {actual} entries but the graph has {expected} vertices")]
    WrongLength { expected: usize, actual: usize },
    #[error("vertex #{vertex} has label {label} outside [1, {k}]")]
    LabelOutOfRange { vertex: usize, label: u32, k: u32 },
    #[error("edges {first:?} and {second:?} both have weight {weight}")]
    DuplicateWeight {
        first: (usize, usize),
        second: (usize, usize),
        weight: u64,
    },
}

/// Weight of an edge. Widened so labels up to `u32::MAX` cannot overflow.
#[inline]
pub fn weight_of(labels: &[u32], u: usize, v: usize) -> u64 {
    labels[u] as u64 + labels[v] as u64
}

/// Weight of every edge, in `Graph::edges` order.
pub fn edge_weights<V: Vertex>(graph: &Graph<V>, labels: &[u32]) -> Vec<u64> {
    graph.edges().map(|(u, v)| weight_of(labels, u, v)).collect()
}

/// Checks a complete labeling from scratch: one label per vertex, every label
/// in `[1, k]`, and no two edges sharing a weight.
pub fn verify_labeling<V: Vertex>(
    graph: &Graph<V>,
    labels: &[u32],
    k: u32,
) -> Result<(), LabelingError> {
    if labels.len() != graph.num_vertices() {
        return Err(LabelingError::WrongLength {
            expected: graph.num_vertices(),
            actual: labels.len(),
        });
    }
    if let Some((vertex, &label)) = labels
        .iter()
        .enumerate()
        .find(|(_, &l)| l < 1 || l > k)
    {
        return Err(LabelingError::LabelOutOfRange { vertex, label, k });
    }
    let mut seen: HashMap<u64, (usize, usize)> = HashMap::with_capacity(graph.num_edges());
    for (u, v) in graph.edges() {
        let weight = weight_of(labels, u, v);
        if let Some(&first) = seen.get(&weight) {
            return Err(LabelingError::DuplicateWeight {
                first,
                second: (u, v),
                weight,
            });
        }
        seen.insert(weight, (u, v));
    }
    Ok(())
}

pub fn is_valid_labeling<V: Vertex>(graph: &Graph<V>, labels: &[u32], k: u32) -> bool {
    verify_labeling(graph, labels, k).is_ok()
}
