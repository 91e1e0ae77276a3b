use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::info;

use super::{invoke, Callable, Dispatch, Executor, TaskOutput};
use crate::error::DispatchError;
use crate::utils::cpu::worker_count;

/// Map over a bounded `rayon` pool, blocking until every task is done
#[derive(Clone, Copy, Debug, Default)]
pub struct Pool {
    num_threads: Option<usize>,
}

impl Pool {
    pub fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }
}

impl Executor for Pool {
    fn name(&self) -> &'static str {
        "pool"
    }

    fn execute<F, A, R>(&self, func: Arc<F>, tasks: Vec<A>) -> Result<Dispatch<R>, DispatchError>
    where
        F: Callable<A, Output = R> + Send + Sync + 'static,
        A: Send + 'static,
        R: TaskOutput + Send + 'static,
    {
        let threads = worker_count(self.num_threads, tasks.len());
        info!("Running {} with {} threads", self.name(), threads);

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("iohkit-pool-{}", i))
            .build()
            .map_err(|e| DispatchError::PoolBuild(e.to_string()))?;

        let outcomes: Vec<Result<R, DispatchError>> = pool.install(|| {
            tasks
                .into_par_iter()
                .enumerate()
                .map(|(index, args)| invoke(func.as_ref(), index, args))
                .collect()
        });

        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            results.push(outcome?);
        }
        Ok(Dispatch::Collected(results))
    }
}
