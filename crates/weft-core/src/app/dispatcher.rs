//! Dispatcher - the control loop of a run.
//!
//! # Flow
//! 1. spawn `min(pool_size, tasks)` workers
//! 2. prime every worker with one task, in pool order
//! 3. wait on all outboxes at once; on each completion record the result and
//!    hand the next pending task to the worker that just finished
//! 4. once every task has a record, shut the pool down and join it
//!
//! Records are returned in the order completions arrived, not submission
//! order. No ordering between workers that finish together is guaranteed.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::pool::{PoolEvent, WorkerPool};
use super::status::DispatchCounts;
use crate::domain::{CompletionRecord, DispatchError, Task, WorkerId};
use crate::ports::{Clock, SystemClock, TaskRunner};

pub struct Dispatcher {
    runner: Arc<dyn TaskRunner>,
    clock: Arc<dyn Clock>,
    progress: watch::Sender<DispatchCounts>,
}

/// State owned by a single `run`. The dispatcher is its only writer.
struct RunState {
    pending: VecDeque<Task>,
    in_flight: usize,
    completed: Vec<CompletionRecord>,
    total: usize,
}

impl RunState {
    fn new(tasks: Vec<Task>) -> Self {
        let total = tasks.len();
        Self {
            pending: tasks.into(),
            in_flight: 0,
            completed: Vec::with_capacity(total),
            total,
        }
    }

    fn counts(&self) -> DispatchCounts {
        DispatchCounts {
            pending: self.pending.len(),
            in_flight: self.in_flight,
            completed: self.completed.len(),
            total: self.total,
        }
    }

    fn is_finished(&self) -> bool {
        self.completed.len() == self.total
    }
}

impl Dispatcher {
    pub fn new(runner: Arc<dyn TaskRunner>) -> Self {
        Self::with_clock(runner, Arc::new(SystemClock))
    }

    pub fn with_clock(runner: Arc<dyn TaskRunner>, clock: Arc<dyn Clock>) -> Self {
        let (progress, _) = watch::channel(DispatchCounts::default());
        Self {
            runner,
            clock,
            progress,
        }
    }

    /// Subscribe to progress snapshots of the current (or next) run.
    pub fn progress(&self) -> watch::Receiver<DispatchCounts> {
        self.progress.subscribe()
    }

    /// Number of workers a run actually starts: never more than there are tasks.
    pub fn worker_count(pool_size: usize, task_count: usize) -> usize {
        pool_size.min(task_count)
    }

    /// Run `tasks` to completion on at most `pool_size` workers.
    pub async fn run(
        &self,
        tasks: Vec<Task>,
        pool_size: usize,
    ) -> Result<Vec<CompletionRecord>, DispatchError> {
        if pool_size == 0 {
            return Err(DispatchError::InvalidPoolSize);
        }

        let mut state = RunState::new(tasks);
        self.publish(&state);
        if state.total == 0 {
            info!("no tasks to dispatch");
            return Ok(Vec::new());
        }

        let workers = Self::worker_count(pool_size, state.total);
        info!(
            tasks = state.total,
            workers,
            requested = pool_size,
            "starting dispatch"
        );

        let mut pool = WorkerPool::spawn(workers, Arc::clone(&self.runner), Arc::clone(&self.clock));

        for worker in pool.ids() {
            self.assign_next(&pool, &mut state, worker).await?;
        }
        self.publish(&state);

        while !state.is_finished() {
            match pool.next_event().await {
                Some(PoolEvent::Completed(worker, record)) => {
                    debug!(
                        worker = %worker,
                        task = record.task_name(),
                        "task completed"
                    );
                    state.in_flight -= 1;
                    state.completed.push(record);
                    self.assign_next(&pool, &mut state, worker).await?;
                    self.publish(&state);
                }
                Some(PoolEvent::Exited(worker)) => {
                    warn!(worker = %worker, "worker exited mid-run");
                    return Err(DispatchError::WorkerLost {
                        worker,
                        completed: state.completed.len(),
                        expected: state.total,
                    });
                }
                None => {
                    return Err(DispatchError::WorkersExited {
                        completed: state.completed.len(),
                        expected: state.total,
                    });
                }
            }
        }

        pool.broadcast_shutdown().await;
        pool.join_all().await?;

        info!(completed = state.completed.len(), "dispatch finished");
        Ok(state.completed)
    }

    /// Give `worker` the next pending task, if any. Idle workers are only left
    /// idle once `pending` is empty.
    async fn assign_next(
        &self,
        pool: &WorkerPool,
        state: &mut RunState,
        worker: WorkerId,
    ) -> Result<(), DispatchError> {
        let Some(task) = state.pending.pop_front() else {
            return Ok(());
        };
        debug!(worker = %worker, task = %task, "assigning");
        pool.assign(worker, task).await?;
        state.in_flight += 1;
        Ok(())
    }

    fn publish(&self, state: &RunState) {
        let counts = state.counts();
        debug_assert!(counts.is_balanced(), "unbalanced dispatch counts: {counts:?}");
        self.progress.send_replace(counts);
    }
}
