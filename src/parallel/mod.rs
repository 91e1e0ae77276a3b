//! # Parallel Dispatcher
//!
//! Runs one callable over many argument tuples, either sequentially or on one
//! of four parallel backends:
//!
//! | Backend | Engine | Results |
//! |---------|--------|---------|
//! | [`Backend::Pool`] | `rayon` thread pool | ordered |
//! | [`Backend::TimeoutPool`] | detached threads with a per-task timeout | counts only |
//! | [`Backend::Jobs`] | scoped workers on a shared `crossbeam` queue | ordered |
//! | [`Backend::Distributed`] | master/worker ranks over `crossbeam` channels | ordered |
//!
//! A panicking task fails the whole call with [`DispatchError::TaskFailed`],
//! except on the timeout pool where failures are logged and counted. Tasks
//! returning `Result` are counted as failed there when they return `Err`.

mod args;
mod config;
mod distributed;
mod jobs;
mod output;
mod pool;
mod sequential;
mod timeout;

#[cfg(test)]
pub mod test;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::debug;

pub use args::{Callable, IntoArgs};
pub use config::{Backend, ParallelConfig, DEFAULT_TIMEOUT_SECS};
pub use distributed::Distributed;
pub use jobs::Jobs;
pub use output::TaskOutput;
pub use pool::Pool;
pub use sequential::Sequential;
pub use timeout::TimeoutPool;

use crate::error::DispatchError;

/// Outcome counts of a dispatch that does not return results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetachedReport {
    pub completed: usize,
    pub failed: usize,
    pub timed_out: usize,
}

impl DetachedReport {
    pub fn total(&self) -> usize {
        self.completed + self.failed + self.timed_out
    }
}

/// What a dispatch call produced
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch<R> {
    /// One result per argument tuple, in input order
    Collected(Vec<R>),
    /// The backend does not collect results
    Detached(DetachedReport),
}

impl<R> Dispatch<R> {
    pub fn results(&self) -> Option<&[R]> {
        match self {
            Dispatch::Collected(results) => Some(results),
            Dispatch::Detached(_) => None,
        }
    }

    pub fn into_results(self) -> Option<Vec<R>> {
        match self {
            Dispatch::Collected(results) => Some(results),
            Dispatch::Detached(_) => None,
        }
    }

    pub fn report(&self) -> Option<&DetachedReport> {
        match self {
            Dispatch::Collected(_) => None,
            Dispatch::Detached(report) => Some(report),
        }
    }
}

/// A strategy for running a callable over a list of argument tuples
pub trait Executor {
    /// Name used in logs
    fn name(&self) -> &'static str;

    fn execute<F, A, R>(&self, func: Arc<F>, tasks: Vec<A>) -> Result<Dispatch<R>, DispatchError>
    where
        F: Callable<A, Output = R> + Send + Sync + 'static,
        A: Send + 'static,
        R: TaskOutput + Send + 'static;
}

/// Run `func` once per element of `arguments`.
///
/// Each element is converted with [`IntoArgs`]: tuples are spread into the
/// parameter list, plain values are passed as the single parameter. Without a
/// config, or with `evaluate_parallel = false`, tasks run sequentially.
///
/// ```
/// use iohkit::parallel::{run_parallel, Backend, ParallelConfig};
///
/// let config = ParallelConfig::parallel(Backend::Pool).with_threads(2);
/// let out = run_parallel(|a: u32, b: u32| a * b, vec![(1u32, 2u32), (3, 4)], Some(&config)).unwrap();
/// assert_eq!(out.into_results(), Some(vec![2, 12]));
/// ```
pub fn run_parallel<F, T, R>(
    func: F,
    arguments: impl IntoIterator<Item = T>,
    config: Option<&ParallelConfig>,
) -> Result<Dispatch<R>, DispatchError>
where
    T: IntoArgs,
    T::Args: Send + 'static,
    F: Callable<T::Args, Output = R> + Send + Sync + 'static,
    R: TaskOutput + Send + 'static,
{
    let tasks: Vec<T::Args> = arguments.into_iter().map(IntoArgs::into_args).collect();
    let func = Arc::new(func);

    let config = match config {
        Some(c) if c.evaluate_parallel => c,
        _ => return Sequential.execute(func, tasks),
    };

    debug!("Dispatching {} tasks to the {} backend", tasks.len(), config.backend);
    match config.backend {
        Backend::Pool => Pool::new(config.num_threads).execute(func, tasks),
        Backend::TimeoutPool => TimeoutPool::new(config.num_threads, config.task_timeout()).execute(func, tasks),
        Backend::Jobs => Jobs::new(config.num_threads).execute(func, tasks),
        Backend::Distributed => Distributed::new(config.num_threads).execute(func, tasks),
    }
}

/// Call `func`, turning a panic into [`DispatchError::TaskFailed`]
pub(crate) fn invoke<F, A, R>(func: &F, index: usize, args: A) -> Result<R, DispatchError>
where
    F: Callable<A, Output = R>,
{
    panic::catch_unwind(AssertUnwindSafe(|| func.call(args))).map_err(|payload| DispatchError::TaskFailed {
        index,
        message: panic_message(payload.as_ref()),
    })
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}
