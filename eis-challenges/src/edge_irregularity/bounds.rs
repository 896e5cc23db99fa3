use super::{Graph, Vertex};

/// Edge count and maximum degree.
pub fn graph_metrics<V: Vertex>(graph: &Graph<V>) -> (usize, usize) {
    (graph.num_edges(), graph.max_degree())
}

/// max(ceil((|E| + 1) / 2), Δ).
///
/// Every edge needs its own weight in `[2, 2k]`, which holds `2k - 1` values,
/// and the Δ edges at a max-degree vertex need Δ distinct neighbor labels.
/// Returns 0 for a graph without vertices.
pub fn lower_bound<V: Vertex>(graph: &Graph<V>) -> u32 {
    if graph.is_empty() {
        return 0;
    }
    let (edge_count, max_degree) = graph_metrics(graph);
    let by_edges = (edge_count + 1).div_ceil(2);
    by_edges.max(max_degree) as u32
}

/// Closed form for an `r`-regular circulant graph on `n` vertices:
/// max(ceil((n·r + 2) / 4), r).
pub fn circulant_lower_bound(n: usize, r: usize) -> u32 {
    if n == 0 {
        return 0;
    }
    let by_edges = (n * r + 2).div_ceil(4);
    by_edges.max(r) as u32
}
