//! Batch pipeline: one rayon task per input file

pub mod report;

pub use report::{BatchReport, FileReport};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::analysis::{Analyzer, ResultTriple};
use crate::cache::CacheStats;
use crate::config::{CacheScope, Config, MalformedPolicy};
use crate::data::codec::read_grids;
use crate::storage::save_results;

/// Grid and skip counts for one processed file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOutcome {
    pub grids: usize,
    pub skipped: usize,
}

/// Files in `dir` with the given extension, sorted by path
pub fn list_input_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Output path for an input file: same stem, output extension, in `output_dir`
pub fn output_path_for(input: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".");
    name.push(extension);
    output_dir.join(name)
}

/// Decode, analyze and write results for a single file
pub fn process_file(
    input: &Path,
    output: &Path,
    analyzer: &Analyzer,
    policy: MalformedPolicy,
) -> Result<FileOutcome> {
    let decoded = read_grids(input, policy)?;

    let results: Vec<ResultTriple> = decoded.grids.iter().map(|grid| analyzer.analyze(grid)).collect();

    save_results(output, &results)?;

    log::debug!(
        "{} -> {}: {} grids, {} skipped lines",
        input.display(),
        output.display(),
        results.len(),
        decoded.skipped
    );

    Ok(FileOutcome {
        grids: results.len(),
        skipped: decoded.skipped,
    })
}

/// Process every input file on the current rayon pool.
///
/// A failing file is recorded in its report and does not stop the others.
/// Only failing to create the output directory aborts the run.
pub fn run_batch(inputs: &[PathBuf], output_dir: &Path, config: &Config) -> Result<BatchReport> {
    log::info!(
        "Processing {} files with {} worker threads ({:?} cache, capacity {})",
        inputs.len(),
        rayon::current_num_threads(),
        config.cache_scope,
        config.cache_capacity
    );

    fs::create_dir_all(output_dir).with_context(|| format!("creating {}", output_dir.display()))?;

    let started = Instant::now();
    let shared = match config.cache_scope {
        CacheScope::Shared => Some(Analyzer::from_config(config)),
        CacheScope::PerFile => None,
    };

    let outcomes: Vec<(FileReport, CacheStats)> = inputs
        .par_iter()
        .map(|input| {
            let output = output_path_for(input, output_dir, &config.output_extension);
            let file_started = Instant::now();

            let (outcome, stats) = match &shared {
                Some(analyzer) => (
                    process_file(input, &output, analyzer, config.on_malformed),
                    CacheStats::default(),
                ),
                None => {
                    let local = Analyzer::from_config(config);
                    let outcome = process_file(input, &output, &local, config.on_malformed);
                    (outcome, local.cache_stats())
                }
            };

            let mut report = FileReport {
                input: input.clone(),
                output,
                elapsed_ms: file_started.elapsed().as_millis() as u64,
                ..FileReport::default()
            };

            match outcome {
                Ok(done) => {
                    report.grids = done.grids;
                    report.skipped_lines = done.skipped;
                }
                Err(err) => {
                    log::warn!("Failed to process {}: {:#}", input.display(), err);
                    report.error = Some(format!("{:#}", err));
                }
            }

            (report, stats)
        })
        .collect();

    let mut cache = shared.as_ref().map(Analyzer::cache_stats).unwrap_or_default();
    let mut files = Vec::with_capacity(outcomes.len());
    for (report, stats) in outcomes {
        cache += stats;
        files.push(report);
    }

    let report = BatchReport::from_files(files, cache, config.clone(), started.elapsed());

    log::info!(
        "Analyzed {} grids across {} files ({} failed, {} skipped lines)",
        report.total_grids,
        report.files.len(),
        report.failed_files,
        report.total_skipped_lines
    );

    Ok(report)
}
