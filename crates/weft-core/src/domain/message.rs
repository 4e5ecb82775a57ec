use super::Task;

/// Message sent from the dispatcher to one worker.
///
/// A worker handles `Task` by running it and reporting a `CompletionRecord`;
/// `Shutdown` is terminal and nothing is processed after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    Task(Task),
    Shutdown,
}

impl From<Task> for WorkerMessage {
    fn from(task: Task) -> Self {
        Self::Task(task)
    }
}
