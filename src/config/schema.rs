use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;
use crate::throughput::{default_workers, ThroughputOptions, DEFAULT_ITERATIONS};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bench: Option<BenchConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: Some(ScoringConfig::default()),
            bench: Some(BenchConfig {
                iterations: Some(DEFAULT_ITERATIONS),
                workers: None,
                warmup: Some(true),
                seed: None,
            }),
        }
    }
}

/// Throughput benchmark settings. Unset fields fall back to the harness defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,

    /// Worker threads (default: available parallelism)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warmup: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl BenchConfig {
    pub fn to_options(&self) -> ThroughputOptions {
        ThroughputOptions {
            iterations: self.iterations.unwrap_or(DEFAULT_ITERATIONS),
            workers: self.workers.unwrap_or_else(default_workers),
            warmup: self.warmup.unwrap_or(true),
            seed: self.seed,
        }
    }
}
