use async_trait::async_trait;

use crate::domain::Task;

/// Performs the work of one task inside a worker.
///
/// Implementations must not block the thread: a worker awaiting `run` has to
/// leave every other worker free to make progress.
#[async_trait]
pub trait TaskRunner: Send + Sync {
    async fn run(&self, task: &Task);
}
