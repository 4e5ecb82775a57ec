//! Errors - one enum per stage of a run.
//!
//! - `LoadError`: the task list could not be read or parsed (fatal, before any worker starts)
//! - `DispatchError`: the worker pool could not finish the batch
//! - `SinkError`: results could not be written

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::WorkerId;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read task list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed task on line {line} ({content:?}): {reason}")]
    Malformed {
        line: usize,
        content: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("pool size must be at least 1")]
    InvalidPoolSize,

    #[error("channel to {0} is closed")]
    WorkerUnavailable(WorkerId),

    #[error("{worker} exited unexpectedly after {completed} of {expected} completions")]
    WorkerLost {
        worker: WorkerId,
        completed: usize,
        expected: usize,
    },

    #[error("all workers exited after {completed} of {expected} completions")]
    WorkersExited { completed: usize, expected: usize },

    #[error("{worker} did not shut down cleanly: {reason}")]
    Join { worker: WorkerId, reason: String },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write results: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode record: {0}")]
    Json(#[from] serde_json::Error),
}
