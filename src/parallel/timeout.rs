use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, RecvTimeoutError};
use tracing::{debug, error, info, warn};

use super::{
    invoke, panic_message, Callable, DetachedReport, Dispatch, Executor, TaskOutput, DEFAULT_TIMEOUT_SECS,
};
use crate::error::DispatchError;
use crate::utils::cpu::worker_count;

/// Independent tasks, each bounded by a timeout.
///
/// Every task runs on its own detached thread, watched by one of the
/// supervisor threads. A task that times out is abandoned: its thread keeps
/// running and its result is discarded. Failures and timeouts are logged and
/// counted, never returned, and results are not collected.
#[derive(Clone, Copy, Debug)]
pub struct TimeoutPool {
    num_threads: Option<usize>,
    timeout: Duration,
}

impl TimeoutPool {
    pub fn new(num_threads: Option<usize>, timeout: Duration) -> Self {
        Self { num_threads, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TimeoutPool {
    fn default() -> Self {
        Self::new(None, Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS))
    }
}

#[derive(Default)]
struct Counters {
    completed: AtomicUsize,
    failed: AtomicUsize,
    timed_out: AtomicUsize,
}

impl Counters {
    fn report(&self) -> DetachedReport {
        DetachedReport {
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
        }
    }
}

impl TimeoutPool {
    /// Run one task on a detached thread and wait for it at most `self.timeout`
    fn supervise<F, A, R>(&self, func: &Arc<F>, index: usize, args: A, counters: &Counters) -> Result<(), DispatchError>
    where
        F: Callable<A, Output = R> + Send + Sync + 'static,
        A: Send + 'static,
        R: TaskOutput + Send + 'static,
    {
        let (tx, rx) = channel::bounded(1);
        let func = Arc::clone(func);
        thread::Builder::new()
            .name(format!("iohkit-task-{}", index))
            .spawn(move || {
                // The supervisor may have given up on us already
                let _ = tx.send(invoke(func.as_ref(), index, args).map(|output| output.failure()));
            })?;

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(None)) => {
                debug!("Task {} completed", index);
                counters.completed.fetch_add(1, Ordering::Relaxed);
            }
            Ok(Ok(Some(message))) => {
                error!("Task {} returned an error: {}", index, message);
                counters.failed.fetch_add(1, Ordering::Relaxed);
            }
            Ok(Err(e)) => {
                error!("Task {} raised an exception: {}", index, e);
                counters.failed.fetch_add(1, Ordering::Relaxed);
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!("Task {} timed out after {:.1}s", index, self.timeout.as_secs_f64());
                counters.timed_out.fetch_add(1, Ordering::Relaxed);
            }
            Err(RecvTimeoutError::Disconnected) => {
                error!("Task {} exited without reporting", index);
                counters.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
        Ok(())
    }
}

impl Executor for TimeoutPool {
    fn name(&self) -> &'static str {
        "timeout pool"
    }

    fn execute<F, A, R>(&self, func: Arc<F>, tasks: Vec<A>) -> Result<Dispatch<R>, DispatchError>
    where
        F: Callable<A, Output = R> + Send + Sync + 'static,
        A: Send + 'static,
        R: TaskOutput + Send + 'static,
    {
        let supervisors = worker_count(self.num_threads, tasks.len());
        info!(
            "Running {} with {} threads and a {:.1}s timeout per task",
            self.name(),
            supervisors,
            self.timeout.as_secs_f64()
        );

        let (task_tx, task_rx) = channel::unbounded::<(usize, A)>();
        for task in tasks.into_iter().enumerate() {
            if task_tx.send(task).is_err() {
                break;
            }
        }
        drop(task_tx);

        let counters = Counters::default();
        thread::scope(|scope| -> Result<(), DispatchError> {
            let mut handles = Vec::with_capacity(supervisors);
            for id in 0..supervisors {
                let queue = task_rx.clone();
                let func = &func;
                let counters = &counters;
                let handle = thread::Builder::new()
                    .name(format!("iohkit-supervisor-{}", id))
                    .spawn_scoped(scope, move || -> Result<(), DispatchError> {
                        for (index, args) in queue.iter() {
                            self.supervise(func, index, args, counters)?;
                        }
                        Ok(())
                    })?;
                handles.push(handle);
            }

            for handle in handles {
                handle
                    .join()
                    .map_err(|payload| DispatchError::PoolBuild(panic_message(payload.as_ref())))??;
            }
            Ok(())
        })?;

        Ok(Dispatch::Detached(counters.report()))
    }
}
