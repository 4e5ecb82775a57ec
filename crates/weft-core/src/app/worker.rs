//! Worker loop: `Idle -> Executing -> Idle -> ... -> Terminated`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::domain::{CompletionRecord, WorkerId, WorkerMessage};
use crate::ports::{Clock, TaskRunner};

/// Run one worker until it is told to shut down.
///
/// Each `Task` is stamped on receipt, handed to `runner`, stamped again and
/// reported on `outbox`. The loop also ends if the dispatcher drops either
/// end of the channel pair, since nobody can hand it work or read its results.
pub(crate) async fn worker_loop(
    id: WorkerId,
    mut inbox: mpsc::Receiver<WorkerMessage>,
    outbox: mpsc::Sender<CompletionRecord>,
    runner: Arc<dyn TaskRunner>,
    clock: Arc<dyn Clock>,
) {
    debug!(worker = %id, "worker started");
    while let Some(message) = inbox.recv().await {
        let task = match message {
            WorkerMessage::Shutdown => break,
            WorkerMessage::Task(task) => task,
        };

        let received_at = clock.now();
        trace!(worker = %id, task = %task, "executing");
        runner.run(&task).await;
        let completed_at = clock.now();

        let record = CompletionRecord::new(task.name(), id, received_at, completed_at);
        if outbox.send(record).await.is_err() {
            break;
        }
    }
    // Dropping `inbox` and `outbox` here closes this worker's channels.
    debug!(worker = %id, "worker terminated");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;
    use crate::impls::SimulatedWork;
    use crate::ports::SystemClock;
    use std::time::Duration;

    fn spawn_worker(
        id: usize,
    ) -> (
        mpsc::Sender<WorkerMessage>,
        mpsc::Receiver<CompletionRecord>,
        tokio::task::JoinHandle<()>,
    ) {
        let (task_tx, task_rx) = mpsc::channel(1);
        let (done_tx, done_rx) = mpsc::channel(1);
        let join = tokio::spawn(worker_loop(
            WorkerId::new(id),
            task_rx,
            done_tx,
            Arc::new(SimulatedWork::with_unit(Duration::from_millis(10))),
            Arc::new(SystemClock),
        ));
        (task_tx, done_rx, join)
    }

    #[tokio::test]
    async fn reports_each_task_with_its_identity() {
        let (tx, mut rx, join) = spawn_worker(7);

        tx.send(Task::new("build", 1).into()).await.unwrap();
        let first = rx.recv().await.unwrap();
        tx.send(Task::new("test", 0).into()).await.unwrap();
        let second = rx.recv().await.unwrap();

        assert_eq!(first.task_name(), "build");
        assert_eq!(second.task_name(), "test");
        assert_eq!(first.worker_id(), WorkerId::new(7));
        assert_eq!(second.worker_id(), WorkerId::new(7));
        assert!(first.completed_at() >= first.received_at());

        tx.send(WorkerMessage::Shutdown).await.unwrap();
        join.await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_is_terminal() {
        let (tx, mut rx, join) = spawn_worker(0);

        tx.send(WorkerMessage::Shutdown).await.unwrap();
        join.await.unwrap();

        // The worker dropped its inbox, so further sends fail and no record
        // is ever produced.
        assert!(tx.send(Task::new("late", 0).into()).await.is_err());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn exits_when_dispatcher_goes_away() {
        let (tx, rx, join) = spawn_worker(0);
        drop(tx);
        drop(rx);
        tokio::time::timeout(Duration::from_secs(1), join)
            .await
            .expect("worker should exit once its inbox closes")
            .unwrap();
    }
}
