//! # Experiments
//!
//! An experiment runs a baseline optimizer (uniform random search) on every
//! `(fid, iid, dim)` of a suite for a number of independent runs. Each run is
//! one task for [`run_parallel`]: the task resolves its own problem through
//! the registry, so nothing but plain ids crosses thread boundaries.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, ExperimentError, ProblemError};
use crate::parallel::{run_parallel, Dispatch, ParallelConfig};
use crate::problem::{Benchmark, Problem};
use crate::registry::{get_function, registry, Suite};
use crate::suite::{parse_id_list, parse_required_id_list};
use crate::utils::random::{bit_vec, seeded, time_seed};

/// A new best-so-far value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Improvement {
    pub evaluations: usize,
    pub y: f64,
}

/// Outcome of one optimizer run on one problem
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub suite: Suite,
    pub fid: u32,
    pub iid: u32,
    pub dim: usize,
    pub name: &'static str,
    pub run: usize,
    pub evaluations: usize,
    pub best_y: f64,
    /// Evaluation at which `best_y` was first reached
    pub best_evaluation: usize,
    pub optimum: Option<f64>,
    pub optimum_found: bool,
    pub improvements: Vec<Improvement>,
}

fn sample_loop<T: Copy>(
    problem: &mut Problem<T>,
    budget: usize,
    mut sample: impl FnMut() -> Vec<T>,
) -> Result<Vec<Improvement>, ProblemError> {
    let mut improvements = Vec::new();
    for _ in 0..budget {
        let (y, improved) = problem.evaluate_tracked(&sample())?;
        if improved {
            improvements.push(Improvement {
                evaluations: problem.state().evaluations,
                y,
            });
        }
        if problem.state().optimum_found {
            break;
        }
    }
    Ok(improvements)
}

/// Uniform random search for at most `budget` evaluations.
///
/// Samples uniformly inside the bounds (BBOB) or uniform bit strings (PBO),
/// stopping early once the known optimum is hit. The problem state is reset
/// first.
pub fn random_search(problem: &mut Benchmark, budget: usize, seed: u64) -> Result<RunSummary, ProblemError> {
    problem.reset();
    let mut rng = seeded(seed);

    let improvements = match problem {
        Benchmark::Real(p) => {
            let (low, high) = p.bounds();
            let dim = p.meta().dimension;
            sample_loop(p, budget, || (0..dim).map(|_| rng.random_range(low..=high)).collect())?
        }
        Benchmark::Integer(p) => {
            let dim = p.meta().dimension;
            sample_loop(p, budget, || bit_vec(&mut rng, dim))?
        }
    };

    let meta = problem.meta();
    let state = problem.state();
    Ok(RunSummary {
        suite: meta.suite,
        fid: meta.fid,
        iid: meta.iid,
        dim: meta.dimension,
        name: meta.name,
        run: 0,
        evaluations: state.evaluations,
        best_y: state.best_y,
        best_evaluation: state.best_evaluation,
        optimum: problem.optimum(),
        optimum_found: state.optimum_found,
        improvements,
    })
}

/// Seed of one run, derived from the experiment seed and the job ids
pub fn run_seed(base: u64, fid: u32, iid: u32, dim: usize, run: usize) -> u64 {
    base ^ ((fid as u64) << 48) ^ ((iid as u64) << 32) ^ ((dim as u64) << 16) ^ run as u64
}

/// Experiment description as read from TOML.
///
/// ```toml
/// suite = "PBO"
/// fids = "1-3,18"
/// iids = "1"
/// dims = "16,25"
/// runs = 5
/// budget = 1000
/// seed = 42
///
/// [parallel]
/// evaluate_parallel = true
/// backend = "pool"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub suite: String,
    /// Function ids, empty for the whole suite
    pub fids: String,
    pub iids: String,
    pub dims: String,
    pub runs: usize,
    pub budget: usize,
    /// Base seed, time-based when unset
    pub seed: Option<u64>,
    pub parallel: ParallelConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            suite: Suite::Pbo.to_string(),
            fids: String::new(),
            iids: "1".to_string(),
            dims: "16".to_string(),
            runs: 1,
            budget: 100,
            seed: None,
            parallel: ParallelConfig::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Largest instance id accepted in id lists
pub const MAX_INSTANCE: u32 = 100;

/// Largest dimension accepted in id lists
pub const MAX_DIMENSION: u32 = 100_000;

/// A fully resolved experiment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Experiment {
    pub suite: Suite,
    pub fids: Vec<u32>,
    pub iids: Vec<u32>,
    pub dims: Vec<usize>,
    pub runs: usize,
    pub budget: usize,
    pub seed: u64,
}

impl Experiment {
    pub fn from_config(config: &ExperimentConfig) -> Result<Self, ExperimentError> {
        let suite: Suite = config.suite.parse()?;
        let last_fid = registry().by_suite(suite).last().map_or(1, |e| e.fid);

        Ok(Self {
            suite,
            fids: parse_id_list(&config.fids, 1, last_fid)?,
            iids: parse_required_id_list(&config.iids, 1, MAX_INSTANCE)?,
            dims: parse_required_id_list(&config.dims, 1, MAX_DIMENSION)?
                .into_iter()
                .map(|d| d as usize)
                .collect(),
            runs: config.runs,
            budget: config.budget,
            seed: config.seed.unwrap_or_else(time_seed),
        })
    }

    /// `(fid, iid, dim, run)` for every task
    pub fn jobs(&self) -> Vec<(u32, u32, usize, usize)> {
        let mut jobs = Vec::with_capacity(self.fids.len() * self.iids.len() * self.dims.len() * self.runs);
        for &fid in &self.fids {
            for &iid in &self.iids {
                for &dim in &self.dims {
                    jobs.extend((0..self.runs).map(|run| (fid, iid, dim, run)));
                }
            }
        }
        jobs
    }

    /// Run every job through the dispatcher.
    ///
    /// Returns the run summaries in job order, or only outcome counts when the
    /// backend does not collect results.
    pub fn run(&self, config: Option<&ParallelConfig>) -> Result<Dispatch<RunSummary>, ExperimentError> {
        let jobs = self.jobs();
        info!(
            "Running {} jobs on {} ({} evaluations each)",
            jobs.len(),
            self.suite,
            self.budget
        );

        let suite = self.suite;
        let budget = self.budget;
        let base = self.seed;
        let task = move |fid: u32, iid: u32, dim: usize, run: usize| -> Result<RunSummary, ExperimentError> {
            let mut problem = get_function(fid, dim, iid, suite.as_str())?;
            let mut summary = random_search(&mut problem, budget, run_seed(base, fid, iid, dim, run))?;
            summary.run = run;
            debug!(
                "{} f{} i{} d{} run {}: best {} after {} evaluations",
                suite, fid, iid, dim, run, summary.best_y, summary.evaluations
            );
            Ok(summary)
        };

        match run_parallel(task, jobs, config)? {
            Dispatch::Collected(outcomes) => {
                let summaries = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;
                Ok(Dispatch::Collected(summaries))
            }
            Dispatch::Detached(report) => Ok(Dispatch::Detached(report)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::Backend;

    fn small_experiment(suite: Suite, fids: Vec<u32>) -> Experiment {
        Experiment {
            suite,
            fids,
            iids: vec![1, 2],
            dims: vec![4],
            runs: 2,
            budget: 50,
            seed: 7,
        }
    }

    #[test]
    fn test_random_search_finds_small_onemax_optimum() {
        let mut problem = get_function(1u32, 3, 1, "PBO").unwrap();
        let summary = random_search(&mut problem, 1_000, 1).unwrap();
        assert!(summary.optimum_found);
        assert_eq!(summary.best_y, 3.0);
        assert!(summary.evaluations < 1_000);
        assert_eq!(summary.improvements.last().map(|i| i.y), Some(3.0));
    }

    #[test]
    fn test_random_search_respects_budget() {
        let mut problem = get_function("Rastrigin", 10, 1, "BBOB").unwrap();
        let summary = random_search(&mut problem, 25, 3).unwrap();
        assert_eq!(summary.evaluations, 25);
        assert!(!summary.optimum_found);
        assert!(summary.best_y >= summary.optimum.unwrap());
        assert!(summary.improvements.windows(2).all(|w| w[1].y < w[0].y));
    }

    #[test]
    fn test_random_search_is_reproducible() {
        let mut a = get_function(12u32, 5, 3, "BBOB").unwrap();
        let mut b = get_function(12u32, 5, 3, "BBOB").unwrap();
        assert_eq!(random_search(&mut a, 40, 11).unwrap(), random_search(&mut b, 40, 11).unwrap());
    }

    #[test]
    fn test_jobs_cover_all_runs() {
        let experiment = small_experiment(Suite::Pbo, vec![1, 2, 3]);
        let jobs = experiment.jobs();
        assert_eq!(jobs.len(), 3 * 2 * 2);
        assert_eq!(jobs[0], (1, 1, 4, 0));
        assert_eq!(jobs[1], (1, 1, 4, 1));
        assert_eq!(jobs[11], (3, 2, 4, 1));
    }

    #[test]
    fn test_parallel_run_matches_sequential() {
        let experiment = small_experiment(Suite::Bbob, vec![1, 8, 20]);
        let sequential = experiment.run(None).unwrap();
        for backend in [Backend::Pool, Backend::Jobs, Backend::Distributed] {
            let config = ParallelConfig::parallel(backend).with_threads(3);
            assert_eq!(experiment.run(Some(&config)).unwrap(), sequential, "{}", backend);
        }

        let summaries = sequential.into_results().unwrap();
        assert_eq!(summaries.len(), 12);
        assert_eq!(summaries[1].run, 1);
        assert_eq!(summaries[11].fid, 20);
    }

    #[test]
    fn test_timeout_pool_only_counts() {
        let experiment = small_experiment(Suite::Pbo, vec![1, 2]);
        let config = ParallelConfig::parallel(Backend::TimeoutPool).with_threads(2);
        let out = experiment.run(Some(&config)).unwrap();
        assert_eq!(out.report().map(|r| r.completed), Some(8));
    }

    #[test]
    fn test_invalid_dimension_fails_the_run() {
        let mut experiment = small_experiment(Suite::Pbo, vec![23]);
        experiment.dims = vec![10];
        assert!(matches!(
            experiment.run(None),
            Err(ExperimentError::Resolve(crate::error::ResolveError::InvalidDimension { .. }))
        ));
    }

    #[test]
    fn test_timeout_pool_counts_failed_runs() {
        let mut experiment = small_experiment(Suite::Pbo, vec![23]);
        experiment.iids = vec![1];
        experiment.dims = vec![10];
        experiment.runs = 3;

        let config = ParallelConfig::parallel(Backend::TimeoutPool).with_threads(2);
        let out = experiment.run(Some(&config)).unwrap();
        let report = out.report().copied().unwrap();
        assert_eq!(report.failed, 3);
        assert_eq!(report.completed, 0);
        assert_eq!(report.timed_out, 0);
    }

    #[test]
    fn test_config_from_toml() {
        let text = r#"
            suite = "BBOB"
            fids = "1-3"
            dims = "2,5"
            runs = 3
            seed = 9

            [parallel]
            evaluate_parallel = true
            backend = "jobs"
        "#;
        let config = ExperimentConfig::from_toml_str(text).unwrap();
        assert_eq!(config.parallel, ParallelConfig::parallel(Backend::Jobs));

        let experiment = Experiment::from_config(&config).unwrap();
        assert_eq!(experiment.suite, Suite::Bbob);
        assert_eq!(experiment.fids, vec![1, 2, 3]);
        assert_eq!(experiment.iids, vec![1]);
        assert_eq!(experiment.dims, vec![2, 5]);
        assert_eq!(experiment.runs, 3);
        assert_eq!(experiment.budget, 100);
        assert_eq!(experiment.seed, 9);
    }

    #[test]
    fn test_config_defaults_to_whole_suite() {
        let experiment = Experiment::from_config(&ExperimentConfig::default()).unwrap();
        assert_eq!(experiment.suite, Suite::Pbo);
        assert_eq!(experiment.fids, (1..=23).collect::<Vec<_>>());

        let bad = ExperimentConfig {
            suite: "COCO".to_string(),
            ..ExperimentConfig::default()
        };
        assert!(matches!(Experiment::from_config(&bad), Err(ExperimentError::Resolve(_))));

        let bad = ExperimentConfig {
            fids: "30".to_string(),
            ..ExperimentConfig::default()
        };
        assert!(matches!(Experiment::from_config(&bad), Err(ExperimentError::Config(_))));
    }

    #[test]
    fn test_empty_instances_or_dimensions_are_rejected() {
        let bad = ExperimentConfig {
            dims: String::new(),
            ..ExperimentConfig::default()
        };
        assert!(matches!(Experiment::from_config(&bad), Err(ExperimentError::Config(_))));

        let bad = ExperimentConfig {
            iids: " ".to_string(),
            ..ExperimentConfig::default()
        };
        assert!(matches!(Experiment::from_config(&bad), Err(ExperimentError::Config(_))));
    }
}
