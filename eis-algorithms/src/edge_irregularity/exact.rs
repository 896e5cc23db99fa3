use super::{
    events::{Observer, StepEvent},
    ordering::degree_order,
    state::LabelingState,
    Outcome,
};
use eis_challenges::edge_irregularity::{verify_labeling, Graph, Solution, Vertex};

/// Depth-first search for one fixed k over a fixed vertex order.
struct Search<'a, V: Vertex, O: Observer> {
    graph: &'a Graph<V>,
    order: &'a [usize],
    k: u32,
    state: LabelingState,
    observer: &'a mut O,
    nodes: u64,
}

impl<'a, V: Vertex, O: Observer> Search<'a, V, O> {
    fn new(graph: &'a Graph<V>, order: &'a [usize], k: u32, observer: &'a mut O) -> Self {
        Self {
            graph,
            order,
            k,
            state: LabelingState::new(graph.num_vertices()),
            observer,
            nodes: 0,
        }
    }

    fn run(&mut self) -> bool {
        self.descend(0)
    }

    fn descend(&mut self, idx: usize) -> bool {
        if idx == self.order.len() {
            return true;
        }
        let vertex = self.order[idx];
        let mut weights = Vec::with_capacity(self.graph.degree(vertex));
        for label in 1..=self.k {
            self.nodes += 1;
            if !self
                .state
                .candidate_weights(self.graph, vertex, label, &mut weights)
            {
                self.observer
                    .on_event(&StepEvent::LabelRejected { vertex, label });
                continue;
            }
            self.state.assign(vertex, label, &weights);
            self.observer
                .on_event(&StepEvent::VertexLabeled { vertex, label });
            if self.descend(idx + 1) {
                return true;
            }
            self.state.undo();
        }
        self.observer.on_event(&StepEvent::Backtrack { vertex });
        false
    }
}

/// Smallest k with a valid labeling, searching upward from `lower_bound`.
///
/// Each k starts from an empty labeling. Without `max_k` the loop only ends
/// when a labeling is found. `Infeasible` reports the last k actually
/// searched, which is `lower_bound - 1` when `max_k` is below the bound.
pub fn find_optimal<V: Vertex, O: Observer>(
    graph: &Graph<V>,
    lower_bound: u32,
    max_k: Option<u32>,
    observer: &mut O,
) -> Outcome {
    let order = degree_order(graph);
    let mut k = lower_bound.max(1);
    loop {
        if let Some(ceiling) = max_k {
            if k > ceiling {
                log::info!("Exact search reached the k ceiling ({})", ceiling);
                // a ceiling below the lower bound means nothing was tried
                return Outcome::Infeasible { tried_up_to: k - 1 };
            }
        }
        log::info!("Attempting to find a valid labeling for k = {}...", k);
        observer.on_event(&StepEvent::KStarted { k });

        let mut search = Search::new(graph, &order, k, observer);
        let found = search.run();
        let nodes = search.nodes;
        if found {
            let labels = search.state.into_labels();
            // incremental checks should make this redundant; it is the last gate
            match verify_labeling(graph, &labels, k) {
                Ok(()) => {
                    log::info!("Found a valid labeling for k = {} ({} nodes)", k, nodes);
                    observer.on_event(&StepEvent::SolutionFound { k });
                    return Outcome::Solved(Solution { k, labels });
                }
                Err(e) => log::error!("Exact search produced an invalid labeling for k = {}: {}", k, e),
            }
        } else {
            log::debug!("k = {} exhausted after {} nodes", k, nodes);
        }
        observer.on_event(&StepEvent::KExhausted { k });
        k += 1;
    }
}
