use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam::channel;
use tracing::{debug, info};

use super::{invoke, panic_message, Callable, Dispatch, Executor, TaskOutput};
use crate::error::DispatchError;
use crate::utils::cpu::worker_count;

/// Scoped worker threads pulling jobs from a shared queue.
///
/// Once a job fails, workers skip every later job; earlier jobs still run, so
/// the reported failure is the first one in input order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Jobs {
    num_threads: Option<usize>,
}

impl Jobs {
    pub fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }
}

type WorkerOutput<R> = Result<Vec<(usize, R)>, DispatchError>;

/// Input position of a task failure; errors not tied to a task sort first
fn failed_index(error: &DispatchError) -> usize {
    match error {
        DispatchError::TaskFailed { index, .. } => *index,
        _ => 0,
    }
}

impl Executor for Jobs {
    fn name(&self) -> &'static str {
        "jobs"
    }

    fn execute<F, A, R>(&self, func: Arc<F>, tasks: Vec<A>) -> Result<Dispatch<R>, DispatchError>
    where
        F: Callable<A, Output = R> + Send + Sync + 'static,
        A: Send + 'static,
        R: TaskOutput + Send + 'static,
    {
        let total = tasks.len();
        let workers = worker_count(self.num_threads, total);
        info!("Running {} with {} workers", self.name(), workers);

        let (job_tx, job_rx) = channel::unbounded::<(usize, A)>();
        for job in tasks.into_iter().enumerate() {
            if job_tx.send(job).is_err() {
                break;
            }
        }
        drop(job_tx);

        let first_failure = AtomicUsize::new(usize::MAX);
        let outputs: Vec<WorkerOutput<R>> = crossbeam::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            for id in 0..workers {
                let queue = job_rx.clone();
                let func = func.as_ref();
                let first_failure = &first_failure;
                let spawned = scope
                    .builder()
                    .name(format!("iohkit-job-{}", id))
                    .spawn(move |_| -> WorkerOutput<R> {
                        let mut done = Vec::new();
                        let mut failure = None;
                        for (index, args) in queue.iter() {
                            if index > first_failure.load(Ordering::Relaxed) {
                                continue;
                            }
                            match invoke(func, index, args) {
                                Ok(result) => {
                                    debug!("Worker {} finished job {}", id, index);
                                    done.push((index, result));
                                }
                                Err(e) => {
                                    first_failure.fetch_min(index, Ordering::Relaxed);
                                    failure = Some(e);
                                }
                            }
                        }
                        match failure {
                            Some(e) => Err(e),
                            None => Ok(done),
                        }
                    });
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        first_failure.store(0, Ordering::Relaxed);
                        return vec![Err(DispatchError::Spawn(e))];
                    }
                }
            }

            handles
                .into_iter()
                .map(|h| {
                    h.join()
                        .unwrap_or_else(|payload| Err(DispatchError::PoolBuild(panic_message(payload.as_ref()))))
                })
                .collect()
        })
        .map_err(|payload| DispatchError::PoolBuild(panic_message(payload.as_ref())))?;

        let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
        let mut failure: Option<DispatchError> = None;
        for output in outputs {
            match output {
                Ok(done) => {
                    for (index, result) in done {
                        slots[index] = Some(result);
                    }
                }
                Err(e) => {
                    failure = match failure {
                        Some(prev) if failed_index(&prev) <= failed_index(&e) => Some(prev),
                        _ => Some(e),
                    };
                }
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        let results: Option<Vec<R>> = slots.into_iter().collect();
        results
            .map(Dispatch::Collected)
            .ok_or_else(|| DispatchError::PoolBuild("a worker stopped before the queue was drained".to_string()))
    }
}
