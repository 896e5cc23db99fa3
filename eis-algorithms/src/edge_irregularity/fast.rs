use super::{
    events::{Observer, StepEvent},
    ordering::degree_order,
    state::LabelingState,
};
use eis_challenges::edge_irregularity::{Graph, Vertex};
use rand::{seq::SliceRandom, Rng};

/// Labels vertices in `order`, giving each the first label from `labels_for`
/// that forms no used weight. No backtracking: one stuck vertex fails the pass.
fn greedy_pass<V, O, F>(
    graph: &Graph<V>,
    order: &[usize],
    mut labels_for: F,
    observer: &mut O,
) -> Option<Vec<u32>>
where
    V: Vertex,
    O: Observer,
    F: FnMut(usize) -> Vec<u32>,
{
    let mut state = LabelingState::new(graph.num_vertices());
    let mut weights = Vec::new();
    for &vertex in order {
        let chosen = labels_for(vertex)
            .into_iter()
            .find(|&label| state.candidate_weights(graph, vertex, label, &mut weights));
        match chosen {
            Some(label) => {
                state.assign(vertex, label, &weights);
                observer.on_event(&StepEvent::VertexLabeled { vertex, label });
            }
            None => {
                log::trace!("greedy pass stuck at vertex #{}", vertex);
                return None;
            }
        }
    }
    Some(state.into_labels())
}

/// Deterministic first fit: highest degree first, smallest label that works.
pub fn first_fit<V: Vertex, O: Observer>(graph: &Graph<V>, k: u32, observer: &mut O) -> Option<Vec<u32>> {
    let order = degree_order(graph);
    greedy_pass(graph, &order, |_| (1..=k).collect(), observer)
}

/// Shuffled vertex order and shuffled labels per vertex.
pub fn randomized_pass<V: Vertex, R: Rng, O: Observer>(
    graph: &Graph<V>,
    k: u32,
    rng: &mut R,
    observer: &mut O,
) -> Option<Vec<u32>> {
    let mut order: Vec<usize> = (0..graph.num_vertices()).collect();
    order.shuffle(rng);
    greedy_pass(
        graph,
        &order,
        |_| {
            let mut labels: Vec<u32> = (1..=k).collect();
            labels.shuffle(rng);
            labels
        },
        observer,
    )
}

/// clamp(ceil(|V| / 2), 2, 10)
pub fn randomized_passes(num_vertices: usize) -> usize {
    num_vertices.div_ceil(2).clamp(2, 10)
}

/// Fast mode for one k: first fit, then a handful of randomized passes.
pub fn sweep<V: Vertex, R: Rng, O: Observer>(
    graph: &Graph<V>,
    k: u32,
    rng: &mut R,
    observer: &mut O,
) -> Option<Vec<u32>> {
    if let Some(labels) = first_fit(graph, k, observer) {
        log::debug!("k = {}: deterministic pass succeeded", k);
        return Some(labels);
    }
    for pass in 0..randomized_passes(graph.num_vertices()) {
        if let Some(labels) = randomized_pass(graph, k, rng, observer) {
            log::debug!("k = {}: randomized pass {} succeeded", k, pass);
            return Some(labels);
        }
    }
    None
}

/// Accurate mode for one k: up to `attempts` randomized passes.
pub fn multi_attempt<V: Vertex, R: Rng, O: Observer>(
    graph: &Graph<V>,
    k: u32,
    attempts: usize,
    rng: &mut R,
    observer: &mut O,
) -> Option<Vec<u32>> {
    for attempt in 0..attempts {
        if let Some(labels) = randomized_pass(graph, k, rng, observer) {
            log::debug!("k = {}: attempt {} succeeded", k, attempt);
            return Some(labels);
        }
        observer.on_event(&StepEvent::AttemptFailed {
            k,
            attempt,
            stuck: None,
        });
    }
    None
}
