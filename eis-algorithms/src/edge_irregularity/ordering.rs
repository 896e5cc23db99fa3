use eis_challenges::edge_irregularity::{Graph, Vertex};
use rand::{seq::SliceRandom, Rng};

/// Per-vertex count of attempts that got stuck on that vertex.
///
/// Lives in one heuristic run; nothing outside the run sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureCounters {
    counts: Vec<u32>,
}

impl FailureCounters {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            counts: vec![0; num_vertices],
        }
    }

    pub fn bump(&mut self, vertex: usize) {
        self.counts[vertex] = self.counts[vertex].saturating_add(1);
    }

    pub fn get(&self, vertex: usize) -> u32 {
        self.counts[vertex]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
    }
}

/// Highest degree first, ties broken by vertex identity. Deterministic for a
/// given graph, which keeps exact search trees reproducible.
pub fn degree_order<V: Vertex>(graph: &Graph<V>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..graph.num_vertices()).collect();
    order.sort_by(|&a, &b| {
        graph
            .degree(b)
            .cmp(&graph.degree(a))
            .then_with(|| graph.vertex(a).cmp(graph.vertex(b)))
    });
    order
}

/// Most failures first, then highest degree, then identity.
pub fn failure_order<V: Vertex>(graph: &Graph<V>, failures: &FailureCounters) -> Vec<usize> {
    let mut order: Vec<usize> = (0..graph.num_vertices()).collect();
    order.sort_by(|&a, &b| {
        failures
            .get(b)
            .cmp(&failures.get(a))
            .then_with(|| graph.degree(b).cmp(&graph.degree(a)))
            .then_with(|| graph.vertex(a).cmp(graph.vertex(b)))
    });
    order
}

/// `failure_order`, with each group of equal failure count split into
/// `buckets` degree quantiles that are shuffled internally. Quantiles are still
/// visited from highest degree to lowest.
pub fn degree_biased_order<V: Vertex, R: Rng>(
    graph: &Graph<V>,
    failures: &FailureCounters,
    buckets: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut order = failure_order(graph, failures);
    let buckets = buckets.max(1);
    let mut start = 0;
    while start < order.len() {
        let count = failures.get(order[start]);
        let end = order[start..]
            .iter()
            .position(|&v| failures.get(v) != count)
            .map_or(order.len(), |offset| start + offset);
        let group = &mut order[start..end];
        let len = group.len();
        for b in 0..buckets {
            let lo = b * len / buckets;
            let hi = (b + 1) * len / buckets;
            group[lo..hi].shuffle(rng);
        }
        start = end;
    }
    order
}
