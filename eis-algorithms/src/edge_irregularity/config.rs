use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Iterative-deepening backtracking, optimal k.
    Exact,
    /// Degree-ordered first fit plus a few shuffled passes per k.
    Fast,
    /// `attempts` shuffled greedy passes per k.
    Accurate,
    /// Conflict-directed attempts with backjumping and repair.
    Intelligent,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Exact => "exact",
            Mode::Fast => "fast",
            Mode::Accurate => "accurate",
            Mode::Intelligent => "intelligent",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "exact" | "backtracking" => Ok(Mode::Exact),
            "fast" => Ok(Mode::Fast),
            "accurate" => Ok(Mode::Accurate),
            "intelligent" => Ok(Mode::Intelligent),
            other => Err(anyhow!("Unknown mode '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub mode: Mode,

    /// Heuristic modes stop after `lower_bound * k_multiplier`. Must be >= 1.
    pub k_multiplier: u32,

    /// Attempts per k for the accurate and intelligent modes.
    pub attempts: usize,

    /// Backjumps allowed in one intelligent attempt before it is abandoned.
    pub backjump_limit: usize,

    /// Repair rounds per attempt are capped at `repair_multiplier * |V|`.
    pub repair_multiplier: usize,

    /// Shuffle vertices inside degree quantiles instead of a fixed order.
    pub degree_bias: bool,

    /// Number of degree quantiles used by `degree_bias`.
    pub degree_buckets: usize,

    /// Accept the least-conflicting label in the tail of the ordering and
    /// leave the leftovers to repair.
    pub adaptive_leniency: bool,

    /// Share of the ordering, from the front, that only takes conflict-free labels.
    pub strict_fraction: f64,

    /// Zero the per-vertex failure counters whenever k moves up.
    pub reset_failures_per_k: bool,

    /// Optional ceiling for the exact search. `None` searches until a k works.
    pub max_k: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Intelligent,
            k_multiplier: 3,
            attempts: 100,
            backjump_limit: 3,
            repair_multiplier: 10,
            degree_bias: true,
            degree_buckets: 4,
            adaptive_leniency: true,
            strict_fraction: 0.5,
            reset_failures_per_k: true,
            max_k: None,
        }
    }
}

impl Config {
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Defaults overridden by any user-provided key. Values that do not fit the
    /// schema leave the defaults in place.
    pub fn initialize(hyperparameters: &Option<Map<String, Value>>) -> Self {
        let mut merged = match serde_json::to_value(Self::default()) {
            Ok(v) => v,
            Err(_) => return Self::default(),
        };
        if let (Value::Object(ref mut obj), Some(map)) = (&mut merged, hyperparameters) {
            for (k, v) in map {
                if !obj.contains_key(k) {
                    log::warn!("Ignoring unknown hyperparameter '{}'", k);
                    continue;
                }
                obj.insert(k.clone(), v.clone());
            }
        }

        #[cfg(debug_assertions)]
        if let Value::Object(ref map) = merged {
            for (k, v) in map {
                log::debug!("---- {:25} is set to {}", k, v);
            }
        }

        serde_json::from_value(merged).unwrap_or_else(|e| {
            log::warn!("Invalid hyperparameters ({}), falling back to defaults", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.k_multiplier < 1 {
            return Err(anyhow!("k_multiplier must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.strict_fraction) {
            return Err(anyhow!(
                "strict_fraction must be within [0, 1], got {}",
                self.strict_fraction
            ));
        }
        if self.degree_buckets == 0 {
            return Err(anyhow!("degree_buckets must be at least 1"));
        }
        Ok(())
    }
}
