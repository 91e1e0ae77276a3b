//! Master/worker rank pool.
//!
//! Rank 0 is the master and runs on the calling thread. Ranks `1..=n` are
//! workers, each with its own inbox. The master seeds every worker with one
//! task, then hands the next pending task to whichever rank replies first.
//! Replies are tagged with the rank and the task index so results can be
//! put back in input order.

use std::sync::Arc;
use std::thread;

use crossbeam::channel::{self, Receiver, Sender};
use tracing::{debug, info};

use super::{invoke, Callable, Dispatch, Executor, TaskOutput};
use crate::error::DispatchError;
use crate::utils::cpu::worker_count;

/// Rank of the master
pub const MASTER: usize = 0;

enum Message<A> {
    Task(usize, A),
    Shutdown,
}

struct Reply<R> {
    rank: usize,
    index: usize,
    outcome: Result<R, DispatchError>,
}

/// Emulated MPI pool: the caller is rank 0, worker ranks are threads
#[derive(Clone, Copy, Debug, Default)]
pub struct Distributed {
    num_threads: Option<usize>,
}

impl Distributed {
    pub fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }
}

fn worker<F, A, R>(rank: usize, func: &F, inbox: Receiver<Message<A>>, outbox: Sender<Reply<R>>)
where
    F: Callable<A, Output = R>,
{
    while let Ok(Message::Task(index, args)) = inbox.recv() {
        let outcome = invoke(func, index, args);
        if outbox.send(Reply { rank, index, outcome }).is_err() {
            break;
        }
    }
    debug!("Rank {} shutting down", rank);
}

impl Executor for Distributed {
    fn name(&self) -> &'static str {
        "distributed pool"
    }

    fn execute<F, A, R>(&self, func: Arc<F>, tasks: Vec<A>) -> Result<Dispatch<R>, DispatchError>
    where
        F: Callable<A, Output = R> + Send + Sync + 'static,
        A: Send + 'static,
        R: TaskOutput + Send + 'static,
    {
        let total = tasks.len();
        let ranks = worker_count(self.num_threads, total);
        info!("Running {} with {} worker ranks", self.name(), ranks);

        let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();

        thread::scope(|scope| -> Result<(), DispatchError> {
            let (reply_tx, reply_rx) = channel::unbounded::<Reply<R>>();
            let mut inboxes: Vec<Sender<Message<A>>> = Vec::with_capacity(ranks);

            for rank in 1..=ranks {
                let (tx, rx) = channel::unbounded();
                let outbox = reply_tx.clone();
                let func = func.as_ref();
                thread::Builder::new()
                    .name(format!("iohkit-rank-{}", rank))
                    .spawn_scoped(scope, move || worker(rank, func, rx, outbox))?;
                inboxes.push(tx);
            }
            drop(reply_tx);

            let mut pending = tasks.into_iter().enumerate();
            let mut in_flight = 0usize;
            let mut failure: Option<DispatchError> = None;

            let send = |rank: usize, (index, args): (usize, A)| -> Result<(), DispatchError> {
                inboxes[rank - 1]
                    .send(Message::Task(index, args))
                    .map_err(|_| DispatchError::TaskFailed {
                        index,
                        message: format!("rank {} is no longer receiving", rank),
                    })
            };

            for rank in 1..=ranks {
                if let Some(task) = pending.next() {
                    send(rank, task)?;
                    in_flight += 1;
                }
            }

            while in_flight > 0 {
                let Ok(reply) = reply_rx.recv() else {
                    break;
                };
                in_flight -= 1;

                match reply.outcome {
                    Ok(result) => slots[reply.index] = Some(result),
                    Err(e) => {
                        failure.get_or_insert(e);
                    }
                }
                if failure.is_some() {
                    continue;
                }
                if let Some(task) = pending.next() {
                    send(reply.rank, task)?;
                    in_flight += 1;
                }
            }

            for inbox in &inboxes {
                let _ = inbox.send(Message::Shutdown);
            }
            debug!("Rank {} collected all replies", MASTER);

            match failure {
                Some(e) => Err(e),
                None => Ok(()),
            }
        })?;

        let results: Option<Vec<R>> = slots.into_iter().collect();
        results
            .map(Dispatch::Collected)
            .ok_or_else(|| DispatchError::PoolBuild("a worker rank exited before replying".to_string()))
    }
}
