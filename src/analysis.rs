//! Per-grid analysis: isolated cells and isolated clusters of two and three

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheStats, MemoCache};
use crate::cluster::finder::find_clusters_with;
use crate::cluster::isolation::count_isolated_cells;
use crate::cluster::ClusterStrategy;
use crate::config::Config;
use crate::grid::Grid;

/// The three published metrics for one grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultTriple {
    /// Set cells with no set 8-neighbor
    pub isolated_cells: usize,

    /// Isolated clusters of exactly two cells
    pub clusters_of_two: usize,

    /// Isolated clusters of exactly three cells
    pub clusters_of_three: usize,
}

/// Renders the result line encoding `<isolated> <size2> <size3>`
impl fmt::Display for ResultTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.isolated_cells, self.clusters_of_two, self.clusters_of_three
        )
    }
}

/// Analyze a grid without memoization, using the greedy cluster strategy
pub fn analyze(grid: &Grid) -> ResultTriple {
    ResultTriple {
        isolated_cells: count_isolated_cells(grid),
        clusters_of_two: find_clusters_with(grid, 2, ClusterStrategy::Greedy),
        clusters_of_three: find_clusters_with(grid, 3, ClusterStrategy::Greedy),
    }
}

/// Memoized query over a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Query {
    IsolatedCells,
    Clusters { size: usize, strategy: ClusterStrategy },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemoKey {
    grid: Grid,
    query: Query,
}

/// Analysis facade backed by a bounded memoization cache.
///
/// Safe to share between worker threads; results never depend on the cache
/// state.
pub struct Analyzer {
    cache: MemoCache<MemoKey, usize>,
    strategy: ClusterStrategy,
}

impl Analyzer {
    /// Create an analyzer memoizing up to `cache_capacity` results
    pub fn new(cache_capacity: usize, strategy: ClusterStrategy) -> Self {
        Self {
            cache: MemoCache::new(cache_capacity),
            strategy,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_capacity, config.strategy)
    }

    /// Compute the result triple for one grid
    pub fn analyze(&self, grid: &Grid) -> ResultTriple {
        ResultTriple {
            isolated_cells: self.isolated_cells(grid),
            clusters_of_two: self.clusters(grid, 2),
            clusters_of_three: self.clusters(grid, 3),
        }
    }

    /// Memoized isolated cell count
    pub fn isolated_cells(&self, grid: &Grid) -> usize {
        let key = MemoKey {
            grid: grid.clone(),
            query: Query::IsolatedCells,
        };
        self.cache.get_or_compute(key, || count_isolated_cells(grid))
    }

    /// Memoized isolated cluster count for clusters of `size` cells
    pub fn clusters(&self, grid: &Grid, size: usize) -> usize {
        let strategy = self.strategy;
        let key = MemoKey {
            grid: grid.clone(),
            query: Query::Clusters { size, strategy },
        };
        self.cache
            .get_or_compute(key, || find_clusters_with(grid, size, strategy))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
