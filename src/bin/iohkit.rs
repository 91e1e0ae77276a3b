//! CLI for resolving benchmark functions and running experiments.
//!
//! Usage:
//!   iohkit list                                   # List every function
//!   iohkit list --suite PBO                       # List one suite
//!   iohkit run --suite PBO --fids 1-3 --dims 16   # Random search, sequential
//!   iohkit run --config exp.toml --backend pool   # Config file plus overrides
//!   iohkit run --backend timeout_pool --timeout 5 # Count-only timeout pool

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use iohkit::experiment::{Experiment, ExperimentConfig};
use iohkit::logger::CsvLogger;
use iohkit::parallel::{Backend, Dispatch};
use iohkit::registry::Suite;
use iohkit::tui;

#[derive(Debug, Parser)]
#[command(name = "iohkit", version, about = "Resolve IOH benchmark functions and run experiments", long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List available functions
    List {
        /// BBOB or PBO, omit for both
        #[arg(long)]
        suite: Option<String>,
    },
    /// Run random search over a suite
    Run(RunArgs),
}

#[derive(Debug, clap::Args)]
struct RunArgs {
    /// TOML experiment file; flags below override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long)]
    suite: Option<String>,

    /// Function ids, e.g. `1-3,5` (default: whole suite)
    #[arg(long)]
    fids: Option<String>,

    #[arg(long)]
    iids: Option<String>,

    #[arg(long)]
    dims: Option<String>,

    /// Independent runs per problem
    #[arg(long)]
    runs: Option<usize>,

    /// Evaluations per run
    #[arg(long)]
    budget: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// pool, timeout_pool, jobs or distributed (implies parallel evaluation)
    #[arg(long)]
    backend: Option<Backend>,

    #[arg(long)]
    threads: Option<usize>,

    /// Per-task timeout in seconds (timeout_pool only)
    #[arg(long)]
    timeout: Option<f64>,

    /// Force sequential evaluation
    #[arg(long, conflicts_with = "backend")]
    sequential: bool,

    /// Write improvements to this CSV file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

impl RunArgs {
    fn into_config(self) -> anyhow::Result<(ExperimentConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => ExperimentConfig::default(),
        };

        if let Some(suite) = self.suite {
            config.suite = suite;
        }
        if let Some(fids) = self.fids {
            config.fids = fids;
        }
        if let Some(iids) = self.iids {
            config.iids = iids;
        }
        if let Some(dims) = self.dims {
            config.dims = dims;
        }
        if let Some(runs) = self.runs {
            config.runs = runs;
        }
        if let Some(budget) = self.budget {
            config.budget = budget;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(backend) = self.backend {
            config.parallel.evaluate_parallel = true;
            config.parallel.backend = backend;
        }
        if self.sequential {
            config.parallel.evaluate_parallel = false;
        }
        if self.threads.is_some() {
            config.parallel.num_threads = self.threads;
        }
        if self.timeout.is_some() {
            config.parallel.timeout = self.timeout;
        }

        Ok((config, self.csv))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn list(suite: Option<String>) -> anyhow::Result<()> {
    let suites = match suite {
        Some(name) => vec![name.parse::<Suite>()?],
        None => Suite::ALL.to_vec(),
    };
    tui::print_available_functions(&suites);
    Ok(())
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let (config, csv) = args.into_config()?;
    let experiment = Experiment::from_config(&config)?;

    let backend = if config.parallel.evaluate_parallel {
        config.parallel.backend.to_string()
    } else {
        "sequential".to_string()
    };

    tui::print_header();
    tui::print_experiment_box(&experiment, &backend);

    match experiment.run(Some(&config.parallel))? {
        Dispatch::Collected(summaries) => {
            tui::print_results_table(&summaries);
            if let Some(path) = csv {
                let mut logger =
                    CsvLogger::create(&path).with_context(|| format!("creating {}", path.display()))?;
                logger.log_all(&summaries)?;
                logger.flush()?;
                println!("Wrote {} rows to {}", logger.rows(), path.display());
            }
        }
        Dispatch::Detached(report) => {
            tui::print_detached_report(&report);
            if csv.is_some() {
                eprintln!("Note: --csv is ignored, the {} backend returns no results.", backend);
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    match CliArgs::parse().command {
        Commands::List { suite } => list(suite),
        Commands::Run(args) => run(args),
    }
}
