pub mod config;
pub mod events;
pub mod exact;
pub mod fast;
pub mod heuristic;
pub mod intelligent;
pub mod ordering;
pub mod state;
pub mod weight_tracker;

pub use config::{Config, Mode};
pub use events::{EventLog, NoOp, Observer, StepEvent};
pub use heuristic::{find_feasible, HeuristicRun};
pub use weight_tracker::WeightTracker;

use anyhow::Result;
use eis_challenges::edge_irregularity::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of a solve. A partial labeling is never returned.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Solved(Solution),
    /// Every k up to `tried_up_to` failed.
    Infeasible { tried_up_to: u32 },
}

impl Outcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::Infeasible { .. } => None,
        }
    }
}

/// Runs `config.mode` on the challenge graph, starting from the challenge's
/// lower bound.
pub fn solve<V: Vertex, O: Observer>(
    challenge: &Challenge<V>,
    config: &Config,
    observer: &mut O,
) -> Result<Outcome> {
    config.validate()?;
    let lower_bound = challenge.lower_bound();
    match config.mode {
        Mode::Exact => Ok(exact::find_optimal(
            &challenge.graph,
            lower_bound,
            config.max_k,
            observer,
        )),
        _ => find_feasible(
            &challenge.graph,
            lower_bound,
            config,
            &challenge.seed,
            observer,
        ),
    }
}

pub fn solve_challenge<V: Vertex>(
    challenge: &Challenge<V>,
    save_solution: &dyn Fn(&Solution) -> Result<()>,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<()> {
    let config = Config::initialize(hyperparameters);
    match solve(challenge, &config, &mut NoOp)? {
        Outcome::Solved(solution) => save_solution(&solution),
        Outcome::Infeasible { tried_up_to } => {
            log::warn!("No labeling found for any k <= {}", tried_up_to);
            Ok(())
        }
    }
}

pub fn help() {
    println!("Edge irregularity strength solvers");
    println!("");
    println!("MODES (hyperparameter \"mode\"):");
    println!("  exact:       backtracking from the lower bound, returns the optimal k");
    println!("  fast:        degree-ordered first fit plus a few shuffled passes per k");
    println!("  accurate:    up to \"attempts\" shuffled greedy passes per k");
    println!("  intelligent: conflict-directed attempts with backjumping and repair (default)");
    println!("");
    println!("RECOMMENDED SETTINGS:");
    println!("");
    println!("Small graphs, optimal k:   {{\"mode\": \"exact\"}}");
    println!("Large graphs, quick:       {{\"mode\": \"fast\", \"k_multiplier\": 3}}");
    println!("Large graphs, tighter k:   {{\"mode\": \"intelligent\", \"attempts\": 200}}");
    println!("");
    println!("Heuristic modes give up after lower_bound * k_multiplier.");
}
