mod bounds;
pub use bounds::*;
pub mod generators;
pub use generators::{GraphFamily, GridVertex};
mod graph;
pub use graph::*;
mod validate;
pub use validate::*;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{from_value, Map, Value};
use std::collections::BTreeMap;

/// A labeling of every vertex, indexed like `Graph::vertices`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub k: u32,
    pub labels: Vec<u32>,
}

impl Solution {
    pub fn new() -> Self {
        Self {
            k: 0,
            labels: Vec::new(),
        }
    }

    pub fn label_map<'a, V: Vertex>(&self, graph: &'a Graph<V>) -> BTreeMap<&'a V, u32> {
        graph
            .vertices()
            .iter()
            .zip(self.labels.iter().copied())
            .collect()
    }
}

impl TryFrom<Map<String, Value>> for Solution {
    type Error = serde_json::Error;

    fn try_from(v: Map<String, Value>) -> Result<Self, Self::Error> {
        from_value(Value::Object(v))
    }
}

#[derive(Debug, Clone)]
pub struct Challenge<V: Vertex> {
    pub seed: [u8; 32],
    pub graph: Graph<V>,
    /// Family-specific bound known to be valid for `graph`.
    pub known_lower_bound: Option<u32>,
}

impl<V: Vertex> Challenge<V> {
    pub fn new(seed: &[u8; 32], graph: Graph<V>) -> Result<Self> {
        if graph.is_empty() {
            return Err(anyhow!("Graph has no vertices"));
        }
        log::debug!(
            "Challenge graph: {} vertices, {} edges, max degree {}",
            graph.num_vertices(),
            graph.num_edges(),
            graph.max_degree()
        );
        Ok(Self {
            seed: seed.clone(),
            graph,
            known_lower_bound: None,
        })
    }

    pub fn with_known_lower_bound(mut self, bound: u32) -> Self {
        self.known_lower_bound = Some(bound);
        self
    }

    /// Generic bound, tightened by the family bound when one is attached.
    pub fn lower_bound(&self) -> u32 {
        let generic = lower_bound(&self.graph);
        self.known_lower_bound.map_or(generic, |b| b.max(generic))
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        verify_labeling(&self.graph, &solution.labels, solution.k)
            .map_err(|e| anyhow!("Invalid labeling: {}", e))
    }
}

impl Challenge<GridVertex> {
    pub fn mongolian_tent(seed: &[u8; 32], n: usize) -> Result<Self> {
        Self::new(seed, generators::mongolian_tent(n))
    }

    pub fn ladder(seed: &[u8; 32], n: usize) -> Result<Self> {
        Self::new(seed, generators::ladder(n))
    }
}

impl Challenge<u32> {
    pub fn circulant(seed: &[u8; 32], n: usize, r: usize) -> Result<Self> {
        Ok(Self::new(seed, generators::circulant(n, r)?)?
            .with_known_lower_bound(circulant_lower_bound(n, r)))
    }

    pub fn random(seed: &[u8; 32], n: usize, permille: u32) -> Result<Self> {
        Self::new(seed, generators::random(seed, n, permille)?)
    }
}
