use std::sync::Arc;

use super::{invoke, Callable, Dispatch, Executor, TaskOutput};
use crate::error::DispatchError;

/// In-order invocation on the calling thread
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequential;

impl Executor for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn execute<F, A, R>(&self, func: Arc<F>, tasks: Vec<A>) -> Result<Dispatch<R>, DispatchError>
    where
        F: Callable<A, Output = R> + Send + Sync + 'static,
        A: Send + 'static,
        R: TaskOutput + Send + 'static,
    {
        tasks
            .into_iter()
            .enumerate()
            .map(|(index, args)| invoke(func.as_ref(), index, args))
            .collect::<Result<Vec<R>, _>>()
            .map(Dispatch::Collected)
    }
}
