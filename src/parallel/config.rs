//! Dispatch configuration.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// Per-task timeout used by the timeout pool when none is configured
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

/// Parallel execution backend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Bounded thread pool map, ordered results
    #[default]
    Pool,
    /// Independent tasks with a per-task timeout, no results
    TimeoutPool,
    /// Worker threads pulling from a shared job queue
    Jobs,
    /// Master/worker rank pool over message channels
    Distributed,
}

impl Backend {
    pub const ALL: [Backend; 4] = [Backend::Pool, Backend::TimeoutPool, Backend::Jobs, Backend::Distributed];

    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Pool => "pool",
            Backend::TimeoutPool => "timeout_pool",
            Backend::Jobs => "jobs",
            Backend::Distributed => "distributed",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pool" => Ok(Backend::Pool),
            "timeout_pool" | "timeout" => Ok(Backend::TimeoutPool),
            "jobs" => Ok(Backend::Jobs),
            "distributed" | "mpi" => Ok(Backend::Distributed),
            other => Err(format!(
                "unknown backend '{}' (expected one of: pool, timeout_pool, jobs, distributed)",
                other
            )),
        }
    }
}

/// How [`run_parallel`](super::run_parallel) executes its tasks.
///
/// Every field is optional in TOML:
///
/// ```toml
/// evaluate_parallel = true
/// backend = "timeout_pool"
/// num_threads = 4
/// timeout = 10.0
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Run in parallel at all; false means sequential
    pub evaluate_parallel: bool,
    pub backend: Backend,
    /// Worker count, defaults to the number of available cores
    pub num_threads: Option<usize>,
    /// Per-task timeout in seconds, used by the timeout pool only
    pub timeout: Option<f64>,
}

impl ParallelConfig {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn parallel(backend: Backend) -> Self {
        Self {
            evaluate_parallel: true,
            backend,
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Per-task timeout, falling back to [`DEFAULT_TIMEOUT_SECS`] when unset or invalid
    pub fn task_timeout(&self) -> Duration {
        let fallback = Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS);
        match self.timeout {
            None => fallback,
            Some(seconds) => match Duration::try_from_secs_f64(seconds) {
                Ok(d) if !d.is_zero() => d,
                _ => {
                    warn!("Ignoring invalid timeout {}, using {}s", seconds, DEFAULT_TIMEOUT_SECS);
                    fallback
                }
            },
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_sequential() {
        let config = ParallelConfig::default();
        assert!(!config.evaluate_parallel);
        assert_eq!(config.backend, Backend::Pool);
        assert_eq!(config, ParallelConfig::sequential());
        assert_eq!(config.task_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = ParallelConfig::from_toml_str("evaluate_parallel = true\nbackend = \"jobs\"\n").unwrap();
        assert_eq!(config, ParallelConfig::parallel(Backend::Jobs));

        let config = ParallelConfig::from_toml_str("").unwrap();
        assert_eq!(config, ParallelConfig::default());

        let config = ParallelConfig::from_toml_str("timeout = 2.5\nnum_threads = 3").unwrap();
        assert_eq!(config.num_threads, Some(3));
        assert_eq!(config.task_timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(matches!(
            ParallelConfig::from_toml_str("backend = \"threads\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        for t in [0.0, -1.0, f64::NAN] {
            let config = ParallelConfig::parallel(Backend::TimeoutPool).with_timeout(t);
            assert_eq!(config.task_timeout(), Duration::from_secs(30));
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "evaluate_parallel = true").unwrap();
        writeln!(file, "backend = \"distributed\"").unwrap();
        writeln!(file, "num_threads = 2").unwrap();

        let config = ParallelConfig::load(file.path()).unwrap();
        assert_eq!(config, ParallelConfig::parallel(Backend::Distributed).with_threads(2));
        assert!(matches!(ParallelConfig::load("/nonexistent/iohkit.toml"), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_backend_names() {
        for backend in Backend::ALL {
            assert_eq!(backend.to_string().parse::<Backend>().unwrap(), backend);
        }
        assert_eq!("mpi".parse::<Backend>().unwrap(), Backend::Distributed);
        assert_eq!("timeout".parse::<Backend>().unwrap(), Backend::TimeoutPool);
        assert!("threads".parse::<Backend>().is_err());
    }
}
