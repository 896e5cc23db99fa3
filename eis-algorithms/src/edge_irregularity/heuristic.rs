use super::{
    config::{Config, Mode},
    events::{Observer, StepEvent},
    fast, intelligent,
    ordering::FailureCounters,
    Outcome,
};
use anyhow::{anyhow, Result};
use eis_challenges::edge_irregularity::{verify_labeling, Graph, Solution, Vertex};
use rand::{
    rngs::{SmallRng, StdRng},
    Rng, SeedableRng,
};

/// Generator for one k. Mixing k into the seed gives every k its own stream,
/// so fast and intelligent runs see identical draws for their opening sweep.
pub fn rng_for_k(seed: &[u8; 32], k: u32) -> SmallRng {
    let mut seed = *seed;
    for (byte, mix) in seed.iter_mut().zip(k.to_le_bytes()) {
        *byte ^= mix;
    }
    SmallRng::from_seed(StdRng::from_seed(seed).gen())
}

/// One heuristic solve. Failure counters live here and die with the run.
pub struct HeuristicRun<'a, V: Vertex> {
    graph: &'a Graph<V>,
    config: &'a Config,
    lower_bound: u32,
    failures: FailureCounters,
}

impl<'a, V: Vertex> HeuristicRun<'a, V> {
    pub fn new(graph: &'a Graph<V>, config: &'a Config, lower_bound: u32) -> Result<Self> {
        config.validate()?;
        if config.mode == Mode::Exact {
            return Err(anyhow!("Exact mode is not a heuristic mode"));
        }
        Ok(Self {
            graph,
            config,
            lower_bound,
            failures: FailureCounters::new(graph.num_vertices()),
        })
    }

    pub fn first_k(&self) -> u32 {
        self.lower_bound.max(1)
    }

    /// Largest k tried, `lower_bound * k_multiplier`.
    pub fn ceiling(&self) -> u32 {
        self.first_k().saturating_mul(self.config.k_multiplier)
    }

    pub fn failures(&self) -> &FailureCounters {
        &self.failures
    }

    /// Applies the failure-counter policy at the start of a k.
    pub fn begin_k(&mut self, k: u32) {
        if self.config.reset_failures_per_k && self.failures.total() > 0 {
            log::trace!("k = {}: resetting failure counters", k);
            self.failures.reset();
        }
    }

    /// Runs the configured mode for a single k.
    pub fn try_k<O: Observer>(&mut self, k: u32, seed: &[u8; 32], observer: &mut O) -> Option<Vec<u32>> {
        let mut rng = rng_for_k(seed, k);
        match self.config.mode {
            Mode::Fast => fast::sweep(self.graph, k, &mut rng, observer),
            Mode::Accurate => fast::multi_attempt(self.graph, k, self.config.attempts, &mut rng, observer),
            Mode::Intelligent => intelligent::solve_k(
                self.graph,
                k,
                self.config,
                &mut self.failures,
                &mut rng,
                observer,
            ),
            Mode::Exact => None,
        }
    }

    pub fn run<O: Observer>(&mut self, seed: &[u8; 32], observer: &mut O) -> Outcome {
        let ceiling = self.ceiling();
        for k in self.first_k()..=ceiling {
            self.begin_k(k);
            log::info!("Attempting to find a valid labeling for k = {}...", k);
            observer.on_event(&StepEvent::KStarted { k });
            if let Some(labels) = self.try_k(k, seed, observer) {
                match verify_labeling(self.graph, &labels, k) {
                    Ok(()) => {
                        log::info!("Found a valid labeling for k = {} ({} mode)", k, self.config.mode);
                        observer.on_event(&StepEvent::SolutionFound { k });
                        return Outcome::Solved(Solution { k, labels });
                    }
                    Err(e) => log::error!("Discarding invalid labeling for k = {}: {}", k, e),
                }
            }
            log::debug!("k = {} exhausted", k);
            observer.on_event(&StepEvent::KExhausted { k });
        }
        log::info!("No labeling found up to k = {}", ceiling);
        Outcome::Infeasible { tried_up_to: ceiling }
    }
}

/// Smallest k in `[lower_bound, lower_bound * k_multiplier]` for which the
/// configured heuristic finds a labeling.
pub fn find_feasible<V: Vertex, O: Observer>(
    graph: &Graph<V>,
    lower_bound: u32,
    config: &Config,
    seed: &[u8; 32],
    observer: &mut O,
) -> Result<Outcome> {
    let mut run = HeuristicRun::new(graph, config, lower_bound)?;
    Ok(run.run(seed, observer))
}
