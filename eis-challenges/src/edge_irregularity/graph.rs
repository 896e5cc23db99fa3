use anyhow::{anyhow, Result};
use std::{
    collections::{HashMap, VecDeque},
    fmt::Debug,
    hash::Hash,
};

/// Anything usable as a vertex identifier.
///
/// The ordering is only used for deterministic tie-breaking, so any total
/// order that is stable across runs works.
pub trait Vertex: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> Vertex for T {}

/// Undirected simple graph stored as an adjacency list over dense indices.
///
/// Vertices are interned in insertion order; `vertex(i)` maps an index back
/// to its identifier. Neighbor lists keep the order edges were added in.
#[derive(Debug, Clone)]
pub struct Graph<V: Vertex> {
    vertices: Vec<V>,
    index: HashMap<V, usize>,
    adjacency: Vec<Vec<usize>>,
    num_edges: usize,
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> Graph<V> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            num_edges: 0,
        }
    }

    /// Builds a graph from an adjacency mapping. Every edge may appear once or
    /// twice (as `u -> v` and `v -> u`); duplicates are collapsed.
    pub fn from_adjacency<I, N>(adjacency: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, N)>,
        N: IntoIterator<Item = V>,
    {
        let mut graph = Self::new();
        for (vertex, neighbors) in adjacency {
            graph.add_vertex(vertex.clone());
            for neighbor in neighbors {
                graph.add_edge(vertex.clone(), neighbor)?;
            }
        }
        Ok(graph)
    }

    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Returns the index of `vertex`, inserting it if it is new.
    pub fn add_vertex(&mut self, vertex: V) -> usize {
        if let Some(&idx) = self.index.get(&vertex) {
            return idx;
        }
        let idx = self.vertices.len();
        self.index.insert(vertex.clone(), idx);
        self.vertices.push(vertex);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Adds the undirected edge `{u, v}`. Parallel edges are ignored.
    pub fn add_edge(&mut self, u: V, v: V) -> Result<()> {
        if u == v {
            return Err(anyhow!("Self-loop at vertex {:?} is not allowed", u));
        }
        let a = self.add_vertex(u);
        let b = self.add_vertex(v);
        if self.adjacency[a].contains(&b) {
            return Ok(());
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        self.num_edges += 1;
        Ok(())
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn vertex(&self, idx: usize) -> &V {
        &self.vertices[idx]
    }

    pub fn index_of(&self, vertex: &V) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    pub fn degree(&self, idx: usize) -> usize {
        self.adjacency[idx].len()
    }

    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Each undirected edge exactly once, as `(lo, hi)` index pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, neighbors)| neighbors.iter().filter(move |&&v| u < v).map(move |&v| (u, v)))
    }

    pub fn is_regular(&self, degree: usize) -> bool {
        !self.is_empty() && self.adjacency.iter().all(|n| n.len() == degree)
    }

    /// Longest shortest path, or `None` when the graph is empty or disconnected.
    pub fn diameter(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let n = self.num_vertices();
        let mut diameter = 0;
        let mut dist = vec![usize::MAX; n];
        let mut queue = VecDeque::with_capacity(n);
        for source in 0..n {
            dist.iter_mut().for_each(|d| *d = usize::MAX);
            dist[source] = 0;
            queue.clear();
            queue.push_back(source);
            let mut reached = 1;
            while let Some(u) = queue.pop_front() {
                for &v in &self.adjacency[u] {
                    if dist[v] == usize::MAX {
                        dist[v] = dist[u] + 1;
                        diameter = diameter.max(dist[v]);
                        reached += 1;
                        queue.push_back(v);
                    }
                }
            }
            if reached < n {
                return None;
            }
        }
        Some(diameter)
    }
}
