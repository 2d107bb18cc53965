//! Per-file and per-run reports

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::config::Config;

/// Outcome of processing one input file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,

    /// Grids analyzed and written
    pub grids: usize,

    /// Malformed lines dropped
    pub skipped_lines: usize,

    pub elapsed_ms: u64,

    /// Failure message when the file could not be processed
    pub error: Option<String>,
}

impl FileReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a whole batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Reports in input file order
    pub files: Vec<FileReport>,

    pub total_grids: usize,
    pub total_skipped_lines: usize,
    pub failed_files: usize,
    pub elapsed_secs: f64,

    /// Combined counters over every cache used in the run
    pub cache: CacheStats,

    pub config: Config,
}

impl BatchReport {
    /// Aggregate file reports into a run report
    pub fn from_files(files: Vec<FileReport>, cache: CacheStats, config: Config, elapsed: Duration) -> Self {
        let total_grids = files.iter().map(|f| f.grids).sum();
        let total_skipped_lines = files.iter().map(|f| f.skipped_lines).sum();
        let failed_files = files.iter().filter(|f| !f.succeeded()).count();

        Self {
            files,
            total_grids,
            total_skipped_lines,
            failed_files,
            elapsed_secs: elapsed.as_secs_f64(),
            cache,
            config,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.succeeded())
    }
}
