//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised while resolving a benchmark function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("suite '{0}' is not yet supported")]
    UnsupportedSuite(String),

    #[error("function {fid} does not exist in suite {suite}")]
    UnknownFunction { suite: String, fid: u32 },

    #[error("no function named '{name}' in suite {suite}")]
    UnknownName { suite: String, name: String },

    #[error("invalid dimension {dimension} for {function}: {reason}")]
    InvalidDimension {
        function: String,
        dimension: usize,
        reason: &'static str,
    },
}

impl ResolveError {
    pub(crate) fn not_square(function: &str, dimension: usize) -> Self {
        ResolveError::InvalidDimension {
            function: function.to_string(),
            dimension,
            reason: "the dimension needs to be a perfect square",
        }
    }

    pub(crate) fn zero_dimension(function: &str) -> Self {
        ResolveError::InvalidDimension {
            function: function.to_string(),
            dimension: 0,
            reason: "the dimension must be at least 1",
        }
    }
}

/// Errors raised by a dispatch call.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("task {index} failed: {message}")]
    TaskFailed { index: usize, message: String },

    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),

    #[error("failed to spawn worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Errors raised when evaluating a problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("expected {expected} variables, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Errors raised while loading or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid id range '{input}': {reason}")]
    InvalidRange { input: String, reason: String },
}

/// Errors raised while running an experiment.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Problem(#[from] ProblemError),
}
