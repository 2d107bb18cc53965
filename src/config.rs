//! Configuration management for the matrix cluster analyzer

use serde::{Deserialize, Serialize};

use crate::cluster::ClusterStrategy;

/// Whether workers share one cache or each file gets its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CacheScope {
    /// One cache for the whole batch, shared by every worker
    #[default]
    Shared,

    /// A fresh cache per input file
    PerFile,
}

/// What to do with a line that does not decode into a grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedPolicy {
    /// Log and drop the line, keep processing the file
    #[default]
    Skip,

    /// Fail the whole file
    Abort,
}

/// Settings for a batch analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum memoized results (0 disables memoization)
    pub cache_capacity: usize,

    /// Cluster growth strategy
    pub strategy: ClusterStrategy,

    /// Cache sharing between workers
    pub cache_scope: CacheScope,

    /// Handling of undecodable lines
    pub on_malformed: MalformedPolicy,

    /// Extension of input files
    pub input_extension: String,

    /// Extension of result files
    pub output_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            strategy: ClusterStrategy::Greedy,
            cache_scope: CacheScope::Shared,
            on_malformed: MalformedPolicy::Skip,
            input_extension: "in".to_string(),
            output_extension: "out".to_string(),
        }
    }
}

impl Config {
    /// Create a configuration with custom analysis settings and default file extensions
    pub fn new(
        cache_capacity: usize,
        strategy: ClusterStrategy,
        cache_scope: CacheScope,
        on_malformed: MalformedPolicy,
    ) -> Self {
        Self {
            cache_capacity,
            strategy,
            cache_scope,
            on_malformed,
            ..Self::default()
        }
    }
}
