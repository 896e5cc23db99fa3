use super::Graph;
use anyhow::{anyhow, Result};
use rand::{
    rngs::{SmallRng, StdRng},
    Rng, SeedableRng,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Vertex of the three-row ladder and the Mongolian Tent built on top of it.
///
/// Rows and columns are 1-based. Cells order before the apex, row-major.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GridVertex {
    Cell { row: u32, col: u32 },
    Apex,
}

impl fmt::Display for GridVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridVertex::Cell { row, col } => write!(f, "({},{})", row, col),
            GridVertex::Apex => write!(f, "x"),
        }
    }
}

/// The graph families the workspace can generate, parsed from strings such as
/// `mongolian_tent:3`, `ladder:4`, `circulant:12:4` or `random:10:300`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GraphFamily {
    MongolianTent { n: usize },
    Ladder { n: usize },
    Circulant { n: usize, r: usize },
    /// Edge probability is given in permille.
    Random { n: usize, permille: u32 },
}

impl GraphFamily {
    pub fn name(&self) -> &'static str {
        match self {
            GraphFamily::MongolianTent { .. } => "mongolian_tent",
            GraphFamily::Ladder { .. } => "ladder",
            GraphFamily::Circulant { .. } => "circulant",
            GraphFamily::Random { .. } => "random",
        }
    }
}

impl fmt::Display for GraphFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphFamily::MongolianTent { n } | GraphFamily::Ladder { n } => {
                write!(f, "{}:{}", self.name(), n)
            }
            GraphFamily::Circulant { n, r } => write!(f, "{}:{}:{}", self.name(), n, r),
            GraphFamily::Random { n, permille } => write!(f, "{}:{}:{}", self.name(), n, permille),
        }
    }
}

impl FromStr for GraphFamily {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let num = |i: usize| -> Result<usize> {
            parts
                .get(i)
                .ok_or_else(|| anyhow!("Graph family '{}' is missing parameter #{}", s, i))?
                .parse::<usize>()
                .map_err(|e| anyhow!("Invalid parameter in '{}': {}", s, e))
        };
        let family = match parts[0] {
            "mongolian_tent" | "tent" => GraphFamily::MongolianTent { n: num(1)? },
            "ladder" => GraphFamily::Ladder { n: num(1)? },
            "circulant" => GraphFamily::Circulant {
                n: num(1)?,
                r: num(2)?,
            },
            "random" => GraphFamily::Random {
                n: num(1)?,
                permille: num(2)? as u32,
            },
            other => return Err(anyhow!("Unknown graph family '{}'", other)),
        };
        Ok(family)
    }
}

/// Three rows of `n` vertices joined as paths, with rungs between rows 1-2
/// and 2-3 in every column. `n == 0` gives an empty graph.
pub fn ladder(n: usize) -> Graph<GridVertex> {
    let mut graph = Graph::new();
    let n = n as u32;
    for row in 1..=3 {
        for col in 1..=n {
            graph.add_vertex(GridVertex::Cell { row, col });
        }
    }
    let cell = |row, col| GridVertex::Cell { row, col };
    for col in 1..n {
        for row in 1..=3 {
            // rows are distinct cells, never a self-loop
            let _ = graph.add_edge(cell(row, col), cell(row, col + 1));
        }
    }
    for col in 1..=n {
        let _ = graph.add_edge(cell(1, col), cell(2, col));
        let _ = graph.add_edge(cell(2, col), cell(3, col));
    }
    graph
}

/// Mongolian Tent MT(3,n): the ladder plus an apex joined to every top-row vertex.
pub fn mongolian_tent(n: usize) -> Graph<GridVertex> {
    let mut graph = ladder(n);
    if n == 0 {
        return graph;
    }
    graph.add_vertex(GridVertex::Apex);
    for col in 1..=n as u32 {
        let _ = graph.add_edge(GridVertex::Apex, GridVertex::Cell { row: 1, col });
    }
    graph
}

/// `r`-regular circulant graph on `n` vertices.
///
/// Jumps `1..=r/2` are used; an odd `r` adds the diameter jump `n/2`, which
/// needs an even `n`.
pub fn circulant(n: usize, r: usize) -> Result<Graph<u32>> {
    if n < 3 {
        return Err(anyhow!("Circulant graph needs at least 3 vertices, got {}", n));
    }
    if r == 0 || r >= n {
        return Err(anyhow!("Circulant degree must be in [1, {}], got {}", n - 1, r));
    }
    if r % 2 == 1 && n % 2 == 1 {
        return Err(anyhow!(
            "Odd degree {} requires an even number of vertices, got {}",
            r,
            n
        ));
    }
    let mut graph = Graph::new();
    for v in 0..n as u32 {
        graph.add_vertex(v);
    }
    let mut jumps: Vec<usize> = (1..=r / 2).collect();
    if r % 2 == 1 {
        jumps.push(n / 2);
    }
    for v in 0..n {
        for &jump in &jumps {
            graph.add_edge(v as u32, ((v + jump) % n) as u32)?;
        }
    }
    Ok(graph)
}

/// Erdős–Rényi style graph drawn from `seed`. Isolated vertices are kept.
pub fn random(seed: &[u8; 32], n: usize, permille: u32) -> Result<Graph<u32>> {
    if permille > 1000 {
        return Err(anyhow!("Edge probability must be at most 1000 permille, got {}", permille));
    }
    let mut rng = SmallRng::from_seed(StdRng::from_seed(seed.clone()).gen());
    let mut graph = Graph::new();
    for v in 0..n as u32 {
        graph.add_vertex(v);
    }
    for u in 0..n as u32 {
        for v in (u + 1)..n as u32 {
            if rng.gen_range(0..1000) < permille {
                graph.add_edge(u, v)?;
            }
        }
    }
    Ok(graph)
}
