use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use eis_algorithms::edge_irregularity::{self as solver, Config, EventLog, Mode, Outcome};
use eis_challenges::edge_irregularity::{
    edge_weights, Challenge, Graph, GraphFamily, Solution, Vertex,
};
use eis_utils::{jsonify, jsonify_pretty, load_json_arg, read_json_arg, u8s_from_str};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fmt::Display, fs, path::PathBuf, str::FromStr, time::Instant};

fn cli() -> Command {
    Command::new("eis-runtime")
        .about("Computes, verifies or inspects edge irregular k-labelings")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compute_solution")
                .about("Computes a labeling")
                .arg(
                    arg!(<GRAPH> "Graph family (e.g. mongolian_tent:3, ladder:4, circulant:12:4), json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--mode [MODE] "exact, fast, accurate or intelligent. Overrides the hyperparameters")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--seed [SEED] "A string used in seed generation")
                        .default_value("0")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--hyperparameters [HYPERPARAMETERS] "Hyperparameters json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the report will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--events [EVENTS_FILE] "If set, every solver step will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("verify_solution")
                .about("Verifies a labeling")
                .arg(
                    arg!(<GRAPH> "Graph family, json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed string used when the graph was generated")
                        .default_value("0")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Prints graph metrics and the lower bound")
                .arg(
                    arg!(<GRAPH> "Graph family, json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed string used for random graphs")
                        .default_value("0")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("modes")
                .about("Describes the solver modes and their hyperparameters")
                .arg(arg!(--defaults "Print the default hyperparameters as json").action(ArgAction::SetTrue)),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("compute_solution", sub_m)) => compute_solution(
            sub_m.get_one::<String>("GRAPH").unwrap().clone(),
            sub_m.get_one::<String>("mode").cloned(),
            sub_m.get_one::<String>("seed").unwrap().clone(),
            sub_m.get_one::<String>("hyperparameters").cloned(),
            sub_m.get_one::<PathBuf>("output").cloned(),
            sub_m.get_one::<PathBuf>("events").cloned(),
        ),
        Some(("verify_solution", sub_m)) => verify_solution(
            sub_m.get_one::<String>("GRAPH").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
            sub_m.get_one::<String>("seed").unwrap().clone(),
        ),
        Some(("inspect", sub_m)) => inspect(
            sub_m.get_one::<String>("GRAPH").unwrap().clone(),
            sub_m.get_one::<String>("seed").unwrap().clone(),
        ),
        Some(("modes", sub_m)) => modes(sub_m.get_flag("defaults")),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Custom graphs: either an adjacency map or a list of edges.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum GraphJson {
    Adjacency(BTreeMap<String, Vec<String>>),
    Edges(Vec<(String, String)>),
}

enum GraphSource {
    Family(GraphFamily),
    Custom(Graph<String>),
}

impl GraphSource {
    fn load(arg: &str) -> Result<Self> {
        let looks_like_json = arg == "-"
            || arg.ends_with(".json")
            || arg.trim_start().starts_with(['{', '[']);
        if !looks_like_json {
            return Ok(GraphSource::Family(GraphFamily::from_str(arg)?));
        }
        let text = read_json_arg(arg)?;
        let graph = match eis_utils::dejsonify::<GraphJson>(&text)
            .map_err(|e| anyhow!("Failed to parse graph: {}", e))?
        {
            GraphJson::Adjacency(adjacency) => Graph::from_adjacency(adjacency)?,
            GraphJson::Edges(edges) => Graph::from_edges(edges)?,
        };
        Ok(GraphSource::Custom(graph))
    }

    fn name(&self) -> String {
        match self {
            GraphSource::Family(family) => family.to_string(),
            GraphSource::Custom(_) => "custom".to_string(),
        }
    }
}

/// Builds the challenge for `$source` and evaluates `$body` with it bound to
/// `$challenge`. Each arm has its own vertex type.
macro_rules! dispatch_graph {
    ($source:expr, $seed:expr, $challenge:ident => $body:expr) => {{
        match $source {
            GraphSource::Family(GraphFamily::MongolianTent { n }) => {
                let $challenge = Challenge::mongolian_tent($seed, n)?;
                $body
            }
            GraphSource::Family(GraphFamily::Ladder { n }) => {
                let $challenge = Challenge::ladder($seed, n)?;
                $body
            }
            GraphSource::Family(GraphFamily::Circulant { n, r }) => {
                let $challenge = Challenge::circulant($seed, n, r)?;
                $body
            }
            GraphSource::Family(GraphFamily::Random { n, permille }) => {
                let $challenge = Challenge::random($seed, n, permille)?;
                $body
            }
            GraphSource::Custom(graph) => {
                let $challenge = Challenge::new($seed, graph)?;
                $body
            }
        }
    }};
}

#[derive(Serialize, Debug)]
struct VertexReport {
    vertex: String,
    label: u32,
}

#[derive(Serialize, Debug)]
struct EdgeReport {
    u: String,
    v: String,
    weight: u64,
}

#[derive(Serialize, Debug)]
struct Report {
    graph_type: String,
    solver: String,
    status: String,
    k: Option<u32>,
    tried_up_to: Option<u32>,
    lower_bound: u32,
    /// `k - lower_bound`
    gap: Option<u32>,
    elapsed_seconds: f64,
    vertices: Vec<VertexReport>,
    edges: Vec<EdgeReport>,
}

impl Report {
    fn new<V: Vertex + Display>(
        graph_type: String,
        solver: Mode,
        challenge: &Challenge<V>,
        outcome: &Outcome,
        elapsed_seconds: f64,
    ) -> Self {
        let lower_bound = challenge.lower_bound();
        let graph = &challenge.graph;
        let (status, k, tried_up_to, vertices, edges) = match outcome {
            Outcome::Solved(solution) => {
                let vertices = graph
                    .vertices()
                    .iter()
                    .zip(&solution.labels)
                    .map(|(v, &label)| VertexReport {
                        vertex: v.to_string(),
                        label,
                    })
                    .collect();
                let edges = graph
                    .edges()
                    .zip(edge_weights(graph, &solution.labels))
                    .map(|((u, v), weight)| EdgeReport {
                        u: graph.vertex(u).to_string(),
                        v: graph.vertex(v).to_string(),
                        weight,
                    })
                    .collect();
                ("solved", Some(solution.k), None, vertices, edges)
            }
            Outcome::Infeasible { tried_up_to } => {
                ("infeasible", None, Some(*tried_up_to), Vec::new(), Vec::new())
            }
        };
        Self {
            graph_type,
            solver: solver.to_string(),
            status: status.to_string(),
            k,
            tried_up_to,
            lower_bound,
            gap: k.map(|k| k.saturating_sub(lower_bound)),
            elapsed_seconds,
            vertices,
            edges,
        }
    }
}

fn load_config(mode: Option<String>, hyperparameters: Option<String>) -> Result<Config> {
    let hyperparameters = match hyperparameters {
        Some(arg) => Some(load_json_arg::<Map<String, Value>>(&arg)?),
        None => None,
    };
    let mut config = Config::initialize(&hyperparameters);
    if let Some(mode) = mode {
        config.mode = Mode::from_str(&mode)?;
    }
    config.validate()?;
    Ok(config)
}

pub fn compute_solution(
    graph: String,
    mode: Option<String>,
    seed: String,
    hyperparameters: Option<String>,
    output_file: Option<PathBuf>,
    events_file: Option<PathBuf>,
) -> Result<()> {
    let source = GraphSource::load(&graph)?;
    let graph_type = source.name();
    let config = load_config(mode, hyperparameters)?;
    let seed = u8s_from_str(&seed);

    let (report, events) = dispatch_graph!(source, &seed, challenge => {
        let mut log = EventLog::new();
        let start = Instant::now();
        let outcome = if events_file.is_some() {
            solver::solve(&challenge, &config, &mut log)?
        } else {
            solver::solve(&challenge, &config, &mut solver::NoOp)?
        };
        let elapsed = start.elapsed().as_secs_f64();
        if let Some(solution) = outcome.solution() {
            challenge.verify_solution(solution)?;
        }
        (
            Report::new(graph_type, config.mode, &challenge, &outcome, elapsed),
            log,
        )
    });

    if let Some(path) = events_file {
        fs::write(&path, jsonify(&events.events)?)?;
        println!("{} events written to: {:?}", events.events.len(), path);
    }
    let text = jsonify_pretty(&report)?;
    if let Some(path) = output_file {
        fs::write(&path, &text)?;
        println!("report written to: {:?}", path);
    } else {
        println!("{}", text);
    }
    if report.status != "solved" {
        return Err(anyhow!(
            "No labeling found for any k <= {}",
            report.tried_up_to.unwrap_or(0)
        ));
    }
    Ok(())
}

pub fn verify_solution(graph: String, solution: String, seed: String) -> Result<()> {
    let source = GraphSource::load(&graph)?;
    let solution = load_json_arg::<Solution>(&solution)?;
    let seed = u8s_from_str(&seed);
    dispatch_graph!(source, &seed, challenge => {
        challenge.verify_solution(&solution)?;
        if solution.k < challenge.lower_bound() {
            log::warn!(
                "k = {} is below the lower bound {}",
                solution.k,
                challenge.lower_bound()
            );
        }
    });
    println!("Solution is valid");
    Ok(())
}

#[derive(Serialize, Debug)]
struct GraphSummary {
    graph_type: String,
    vertices: usize,
    edges: usize,
    max_degree: usize,
    regular: bool,
    diameter: Option<usize>,
    lower_bound: u32,
}

pub fn inspect(graph: String, seed: String) -> Result<()> {
    let source = GraphSource::load(&graph)?;
    let graph_type = source.name();
    let seed = u8s_from_str(&seed);
    let summary = dispatch_graph!(source, &seed, challenge => {
        let graph = &challenge.graph;
        GraphSummary {
            graph_type,
            vertices: graph.num_vertices(),
            edges: graph.num_edges(),
            max_degree: graph.max_degree(),
            regular: graph.is_regular(graph.max_degree()),
            diameter: graph.diameter(),
            lower_bound: challenge.lower_bound(),
        }
    });
    println!("{}", jsonify_pretty(&summary)?);
    Ok(())
}

pub fn modes(defaults: bool) -> Result<()> {
    if defaults {
        println!("{}", jsonify_pretty(&Config::default())?);
    } else {
        solver::help();
    }
    Ok(())
}
