use super::{
    config::Config,
    events::{Observer, StepEvent},
    fast,
    ordering::{degree_biased_order, failure_order, FailureCounters},
};
use eis_challenges::edge_irregularity::{Graph, Vertex};
use rand::{seq::SliceRandom, Rng};

/// Edges currently holding each weight. Unlike `WeightTracker` a weight may be
/// held by several edges at once, which is how soft-accepted conflicts are
/// represented until repair removes them.
#[derive(Debug, Clone)]
struct WeightLedger {
    holders: Vec<Vec<(usize, usize)>>,
}

impl WeightLedger {
    fn new(k: u32) -> Self {
        Self {
            holders: vec![Vec::new(); 2 * k as usize + 1],
        }
    }

    fn count(&self, weight: u32) -> usize {
        self.holders[weight as usize].len()
    }

    fn holders(&self, weight: u32) -> &[(usize, usize)] {
        &self.holders[weight as usize]
    }

    fn insert(&mut self, weight: u32, edge: (usize, usize)) {
        self.holders[weight as usize].push(edge);
    }

    fn remove(&mut self, weight: u32, edge: (usize, usize)) {
        let holders = &mut self.holders[weight as usize];
        if let Some(pos) = holders.iter().position(|&e| e == edge) {
            holders.swap_remove(pos);
        } else {
            debug_assert!(false, "edge {:?} does not hold weight {}", edge, weight);
        }
    }

    /// Endpoints of every edge whose weight is shared, sorted and deduplicated.
    fn conflicting_vertices(&self) -> Vec<usize> {
        let mut vertices: Vec<usize> = self
            .holders
            .iter()
            .filter(|h| h.len() > 1)
            .flat_map(|h| h.iter().flat_map(|&(u, v)| [u, v]))
            .collect();
        vertices.sort_unstable();
        vertices.dedup();
        vertices
    }

    fn conflicting_edges(&self) -> usize {
        self.holders
            .iter()
            .filter(|h| h.len() > 1)
            .map(|h| h.len())
            .sum()
    }
}

fn edge(u: usize, v: usize) -> (usize, usize) {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    Complete(Vec<u32>),
    /// `stuck` holds the vertices blamed for the failure.
    Failed { stuck: Vec<usize> },
}

/// Bookkeeping of one attempt, exposed for tests and logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptStats {
    pub backjumps: usize,
    pub repair_rounds: usize,
    pub soft_accepts: usize,
}

/// One intelligent attempt at a fixed k.
///
/// Positions `0..pos` of `order` are labeled, so a backjump to position `t`
/// unlabels exactly `order[t..pos]`.
pub struct Attempt<'a, V: Vertex> {
    graph: &'a Graph<V>,
    config: &'a Config,
    k: u32,
    order: Vec<usize>,
    labels: Vec<u32>,
    ledger: WeightLedger,
    /// Labels already tried at a vertex since it was last reached fresh.
    excluded: Vec<Vec<u32>>,
    strict_until: usize,
    pub stats: AttemptStats,
}

impl<'a, V: Vertex> Attempt<'a, V> {
    pub fn new(graph: &'a Graph<V>, config: &'a Config, k: u32, order: Vec<usize>) -> Self {
        let n = graph.num_vertices();
        let strict_until = if config.adaptive_leniency {
            (n as f64 * config.strict_fraction).ceil() as usize
        } else {
            n
        };
        Self {
            graph,
            config,
            k,
            order,
            labels: vec![0; n],
            ledger: WeightLedger::new(k),
            excluded: vec![Vec::new(); n],
            strict_until,
            stats: AttemptStats::default(),
        }
    }

    /// Collisions `label` would create at `vertex` against the labeled
    /// neighbors, counting a repeated new weight as a collision too.
    fn conflict_score(&self, vertex: usize, label: u32, new_weights: &mut Vec<u32>) -> usize {
        new_weights.clear();
        let mut score = 0;
        for &neighbor in self.graph.neighbors(vertex) {
            let other = self.labels[neighbor];
            if other == 0 {
                continue;
            }
            let weight = label + other;
            score += self.ledger.count(weight);
            if new_weights.contains(&weight) {
                score += 1;
            }
            new_weights.push(weight);
        }
        score
    }

    /// Vertices responsible for `label` being rejected at `vertex`.
    fn blame(&self, vertex: usize, label: u32, culprits: &mut Vec<usize>) {
        let mut seen_weights: Vec<(u32, usize)> = Vec::new();
        for &neighbor in self.graph.neighbors(vertex) {
            let other = self.labels[neighbor];
            if other == 0 {
                continue;
            }
            let weight = label + other;
            let holders = self.ledger.holders(weight);
            if !holders.is_empty() {
                culprits.push(neighbor);
                culprits.extend(holders.iter().flat_map(|&(u, v)| [u, v]));
            }
            if let Some(&(_, twin)) = seen_weights.iter().find(|(w, _)| *w == weight) {
                culprits.push(neighbor);
                culprits.push(twin);
            }
            seen_weights.push((weight, neighbor));
        }
    }

    fn place(&mut self, vertex: usize, label: u32) {
        self.labels[vertex] = label;
        for &neighbor in self.graph.neighbors(vertex) {
            let other = self.labels[neighbor];
            if other != 0 {
                self.ledger.insert(label + other, edge(vertex, neighbor));
            }
        }
    }

    fn unplace(&mut self, vertex: usize) -> u32 {
        let label = self.labels[vertex];
        for &neighbor in self.graph.neighbors(vertex) {
            let other = self.labels[neighbor];
            if other != 0 {
                self.ledger.remove(label + other, edge(vertex, neighbor));
            }
        }
        self.labels[vertex] = 0;
        label
    }

    /// Minimum-score label among those not excluded at `vertex`, ties broken
    /// at random. `None` if every label is excluded.
    fn best_label<R: Rng>(&self, vertex: usize, rng: &mut R) -> Option<(u32, usize)> {
        let mut scratch = Vec::new();
        let mut best_score = usize::MAX;
        let mut best: Vec<u32> = Vec::new();
        for label in 1..=self.k {
            if self.excluded[vertex].contains(&label) {
                continue;
            }
            let score = self.conflict_score(vertex, label, &mut scratch);
            if score < best_score {
                best_score = score;
                best.clear();
            }
            if score == best_score {
                best.push(label);
            }
        }
        best.choose(rng).map(|&label| (label, best_score))
    }

    pub fn run<R: Rng, O: Observer>(&mut self, rng: &mut R, observer: &mut O) -> AttemptResult {
        let n = self.order.len();
        let mut pos = 0;
        while pos < n {
            let vertex = self.order[pos];
            let lenient = pos >= self.strict_until;
            let choice = self
                .best_label(vertex, rng)
                .filter(|&(_, score)| score == 0 || lenient);
            if let Some((label, score)) = choice {
                if score > 0 {
                    self.stats.soft_accepts += 1;
                }
                self.place(vertex, label);
                observer.on_event(&StepEvent::VertexLabeled { vertex, label });
                pos += 1;
                continue;
            }

            // dead end: every admissible label collides
            let mut culprits = Vec::new();
            for label in 1..=self.k {
                if !self.excluded[vertex].contains(&label) {
                    observer.on_event(&StepEvent::LabelRejected { vertex, label });
                    self.blame(vertex, label, &mut culprits);
                }
            }
            if culprits.is_empty() {
                culprits.extend(
                    self.graph
                        .neighbors(vertex)
                        .iter()
                        .copied()
                        .filter(|&u| self.labels[u] != 0),
                );
            }
            let target = self.order[..pos]
                .iter()
                .rposition(|u| culprits.contains(u));
            let target = match target {
                Some(t) if self.stats.backjumps < self.config.backjump_limit => t,
                _ => return AttemptResult::Failed { stuck: vec![vertex] },
            };

            self.stats.backjumps += 1;
            observer.on_event(&StepEvent::BackjumpTriggered {
                from: vertex,
                to: self.order[target],
                count: self.stats.backjumps,
            });
            for undo in (target..pos).rev() {
                let u = self.order[undo];
                let label = self.unplace(u);
                if undo == target {
                    self.excluded[u].push(label);
                } else {
                    self.excluded[u].clear();
                }
            }
            self.excluded[vertex].clear();
            pos = target;
        }

        if self.ledger.conflicting_edges() == 0 {
            return AttemptResult::Complete(self.labels.clone());
        }
        self.repair(rng, observer)
    }

    /// Min-conflict local search over the complete assignment.
    fn repair<R: Rng, O: Observer>(&mut self, rng: &mut R, observer: &mut O) -> AttemptResult {
        let max_rounds = self.config.repair_multiplier * self.graph.num_vertices();
        let mut scratch = Vec::new();
        for round in 0..max_rounds {
            let conflicting = self.ledger.conflicting_vertices();
            let vertex = match conflicting.choose(rng) {
                Some(&v) => v,
                None => return AttemptResult::Complete(self.labels.clone()),
            };
            self.stats.repair_rounds = round + 1;
            self.unplace(vertex);

            let mut best_score = usize::MAX;
            let mut best: Vec<u32> = Vec::new();
            for label in 1..=self.k {
                let score = self.conflict_score(vertex, label, &mut scratch);
                if score < best_score {
                    best_score = score;
                    best.clear();
                }
                if score == best_score {
                    best.push(label);
                }
            }
            let label = *best.choose(rng).unwrap_or(&1);
            self.place(vertex, label);
            observer.on_event(&StepEvent::RepairStep {
                round,
                vertex,
                label,
                conflicts: self.ledger.conflicting_edges(),
            });
        }

        let stuck = self.ledger.conflicting_vertices();
        if stuck.is_empty() {
            AttemptResult::Complete(self.labels.clone())
        } else {
            AttemptResult::Failed { stuck }
        }
    }
}

/// Intelligent mode for one k: the fast sweep, then conflict-directed
/// attempts if the sweep fails.
pub fn solve_k<V: Vertex, R: Rng, O: Observer>(
    graph: &Graph<V>,
    k: u32,
    config: &Config,
    failures: &mut FailureCounters,
    rng: &mut R,
    observer: &mut O,
) -> Option<Vec<u32>> {
    if let Some(labels) = fast::sweep(graph, k, rng, observer) {
        return Some(labels);
    }
    conflict_directed(graph, k, config, failures, rng, observer)
}

/// Up to `config.attempts` conflict-directed attempts at one k. Failed
/// attempts feed `failures`, which steers the ordering of later attempts.
pub fn conflict_directed<V: Vertex, R: Rng, O: Observer>(
    graph: &Graph<V>,
    k: u32,
    config: &Config,
    failures: &mut FailureCounters,
    rng: &mut R,
    observer: &mut O,
) -> Option<Vec<u32>> {
    for attempt in 0..config.attempts {
        let order = if config.degree_bias {
            degree_biased_order(graph, failures, config.degree_buckets, rng)
        } else {
            failure_order(graph, failures)
        };
        let mut run = Attempt::new(graph, config, k, order);
        match run.run(rng, observer) {
            AttemptResult::Complete(labels) => {
                log::debug!(
                    "k = {}: attempt {} complete ({:?})",
                    k,
                    attempt,
                    run.stats
                );
                return Some(labels);
            }
            AttemptResult::Failed { stuck } => {
                log::trace!("k = {}: attempt {} failed at {:?}", k, attempt, stuck);
                for &v in &stuck {
                    failures.bump(v);
                }
                observer.on_event(&StepEvent::AttemptFailed {
                    k,
                    attempt,
                    stuck: stuck.first().copied(),
                });
            }
        }
    }
    None
}
