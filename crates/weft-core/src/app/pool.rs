//! WorkerPool - a fixed set of workers and the channels to each of them.
//!
//! Every worker gets a dedicated pair of channels: an inbox for
//! `WorkerMessage`s and an outbox for `CompletionRecord`s. The pool keeps the
//! inbox senders keyed by `WorkerId` and merges every outbox into one
//! `StreamMap`, so the dispatcher can wait on all workers at once without
//! polling.

use std::collections::BTreeMap;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt, StreamMap};
use tracing::{debug, warn};

use super::worker::worker_loop;
use crate::domain::{CompletionRecord, DispatchError, Task, WorkerId, WorkerMessage};
use crate::ports::{Clock, TaskRunner};

/// `None` marks the end of a worker's outbox.
type Outbox = Pin<Box<dyn Stream<Item = Option<CompletionRecord>> + Send>>;

/// Something observed on a worker's outbox.
#[derive(Debug)]
pub enum PoolEvent {
    Completed(WorkerId, CompletionRecord),
    /// The worker dropped its outbox: it has terminated.
    Exited(WorkerId),
}

struct WorkerHandle {
    inbox: mpsc::Sender<WorkerMessage>,
    join: JoinHandle<()>,
}

pub struct WorkerPool {
    workers: BTreeMap<WorkerId, WorkerHandle>,
    outboxes: StreamMap<WorkerId, Outbox>,
}

impl WorkerPool {
    /// Spawn `count` workers, ids `0..count` in pool order.
    pub fn spawn(count: usize, runner: Arc<dyn TaskRunner>, clock: Arc<dyn Clock>) -> Self {
        let mut workers = BTreeMap::new();
        let mut outboxes = StreamMap::with_capacity(count);

        for index in 0..count {
            let id = WorkerId::new(index);
            // Capacity 1: a worker never has more than one task queued.
            let (task_tx, task_rx) = mpsc::channel(1);
            let (done_tx, done_rx) = mpsc::channel(1);

            let join = tokio::spawn(worker_loop(
                id,
                task_rx,
                done_tx,
                Arc::clone(&runner),
                Arc::clone(&clock),
            ));

            let outbox: Outbox = Box::pin(
                ReceiverStream::new(done_rx)
                    .map(Some)
                    .chain(tokio_stream::once(None)),
            );

            workers.insert(id, WorkerHandle { inbox: task_tx, join });
            outboxes.insert(id, outbox);
        }

        debug!(workers = count, "worker pool spawned");
        Self { workers, outboxes }
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Worker ids in pool order.
    pub fn ids(&self) -> impl Iterator<Item = WorkerId> + '_ {
        self.workers.keys().copied()
    }

    /// Hand `task` to `worker`.
    pub async fn assign(&self, worker: WorkerId, task: Task) -> Result<(), DispatchError> {
        let handle = self
            .workers
            .get(&worker)
            .ok_or(DispatchError::WorkerUnavailable(worker))?;
        handle
            .inbox
            .send(WorkerMessage::Task(task))
            .await
            .map_err(|_| DispatchError::WorkerUnavailable(worker))
    }

    /// Wait until any worker reports. `None` once every outbox has ended.
    pub async fn next_event(&mut self) -> Option<PoolEvent> {
        let (worker, item) = self.outboxes.next().await?;
        Some(match item {
            Some(record) => PoolEvent::Completed(worker, record),
            None => PoolEvent::Exited(worker),
        })
    }

    /// Send `Shutdown` to every worker.
    pub async fn broadcast_shutdown(&self) {
        for (id, handle) in &self.workers {
            if handle.inbox.send(WorkerMessage::Shutdown).await.is_err() {
                // already terminated; nothing to stop
                warn!(worker = %id, "worker gone before shutdown");
            }
        }
    }

    /// Wait for every worker task to finish. Reports the first worker that
    /// panicked or was cancelled, after joining all of them.
    pub async fn join_all(self) -> Result<(), DispatchError> {
        let mut first_error = None;
        for (id, handle) in self.workers {
            if let Err(e) = handle.join.await {
                warn!(worker = %id, error = %e, "worker join failed");
                if first_error.is_none() {
                    first_error = Some(DispatchError::Join {
                        worker: id,
                        reason: e.to_string(),
                    });
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
