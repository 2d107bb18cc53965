use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use mat_cluster_analyzer::cluster::ClusterStrategy;
use mat_cluster_analyzer::config::{CacheScope, Config, MalformedPolicy};
use mat_cluster_analyzer::data::generate::{generate_inputs, GeneratorSettings};
use mat_cluster_analyzer::pipeline::{list_input_files, run_batch};
use mat_cluster_analyzer::storage;

#[derive(Parser, Debug)]
#[clap(
    name = "mat-cluster-analyzer",
    about = "Count isolated cells and isolated small clusters in batches of 0/1 matrices"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0", global = true)]
    threads: usize,

    /// Verbose logging
    #[clap(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write random matrix files
    Generate {
        /// Directory for generated `*.in` files
        #[clap(long, default_value = "input")]
        dir: PathBuf,

        #[clap(flatten)]
        generate: GenerateArgs,
    },

    /// Analyze every input file in a directory
    Analyze(AnalyzeArgs),

    /// Generate input files, then analyze them
    Run {
        #[clap(flatten)]
        generate: GenerateArgs,

        #[clap(flatten)]
        analyze: AnalyzeArgs,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of files to generate
    #[clap(long, default_value = "50")]
    files: usize,

    /// Matrices per file
    #[clap(long, default_value = "100000")]
    matrices: usize,

    /// Smallest row/column count
    #[clap(long, default_value = "5")]
    min_dim: usize,

    /// Largest row/column count
    #[clap(long, default_value = "10")]
    max_dim: usize,

    /// Seed for reproducible generation
    #[clap(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Directory holding `*.in` matrix files
    #[clap(long, default_value = "input")]
    input_dir: PathBuf,

    /// Directory for `*.out` result files
    #[clap(long, default_value = "output")]
    output_dir: PathBuf,

    /// Maximum memoized results (0 disables memoization)
    #[clap(long, default_value = "1000")]
    cache_capacity: usize,

    /// Share one cache across workers or use one per file
    #[clap(long, value_enum, default_value_t = CacheScope::Shared)]
    cache_scope: CacheScope,

    /// Cluster growth strategy
    #[clap(long, value_enum, default_value_t = ClusterStrategy::Greedy)]
    strategy: ClusterStrategy,

    /// Skip malformed lines or fail the file
    #[clap(long, value_enum, default_value_t = MalformedPolicy::Skip)]
    on_malformed: MalformedPolicy,

    /// Write summary.json to the output directory
    #[clap(long)]
    summary: bool,
}

impl GenerateArgs {
    fn settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            files: self.files,
            matrices_per_file: self.matrices,
            dimensions: self.min_dim..=self.max_dim,
            seed: self.seed,
        }
    }
}

impl AnalyzeArgs {
    fn config(&self) -> Config {
        Config::new(self.cache_capacity, self.strategy, self.cache_scope, self.on_malformed)
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_runtime(&args)?;

    match &args.command {
        Command::Generate { dir, generate } => generate_command(generate, dir),
        Command::Analyze(analyze) => analyze_command(analyze),
        Command::Run { generate, analyze } => {
            generate_command(generate, &analyze.input_dir)?;
            analyze_command(analyze)
        }
    }
}

/// Install the logger and size the global rayon pool; both subcommands share it
fn init_runtime(args: &Cli) -> Result<()> {
    let level = match args.verbose {
        true => log::LevelFilter::Debug,
        false => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_millis()
        .init();

    let workers = match args.threads {
        0 => num_cpus::get(),
        n => n,
    };
    rayon::ThreadPoolBuilder::new().num_threads(workers).build_global()?;
    log::debug!("Worker pool ready with {} threads", workers);

    Ok(())
}

fn generate_command(args: &GenerateArgs, dir: &Path) -> Result<()> {
    let started = Instant::now();
    let paths = generate_inputs(dir, &args.settings())?;
    log::info!(
        "Generated {} files in {:.2} seconds",
        paths.len(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

fn analyze_command(args: &AnalyzeArgs) -> Result<()> {
    log::info!("Input: {}", args.input_dir.display());
    log::info!("Output: {}", args.output_dir.display());

    let config = args.config();
    let inputs = list_input_files(&args.input_dir, &config.input_extension)?;
    if inputs.is_empty() {
        log::warn!("No .{} files found in {}", config.input_extension, args.input_dir.display());
    }

    let started = Instant::now();
    let report = run_batch(&inputs, &args.output_dir, &config)?;
    log::info!("Total runtime: {:.2} seconds", started.elapsed().as_secs_f64());

    let cache = &report.cache;
    log::info!(
        "Cache: {} hits, {} misses, {} evictions",
        cache.hits,
        cache.misses,
        cache.evictions
    );

    if args.summary {
        let path = storage::save_summary(&report, &args.output_dir)?;
        log::info!("Summary written to {}", path.display());
    }

    if report.failed_files > 0 {
        for failed in report.failures() {
            log::error!(
                "{}: {}",
                failed.input.display(),
                failed.error.as_deref().unwrap_or("unknown error")
            );
        }
        bail!("{} of {} files failed", report.failed_files, report.files.len());
    }

    Ok(())
}
