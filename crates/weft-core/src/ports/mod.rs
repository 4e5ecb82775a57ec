//! Ports - seams for the collaborators around the dispatch loop.
//!
//! - **Clock**: wall-clock timestamps for completion records
//! - **TaskRunner**: what a worker does with one task
//! - **TaskSource**: where the batch comes from
//! - **ResultSink**: where completion records go

pub mod clock;
pub mod result_sink;
pub mod task_runner;
pub mod task_source;

pub use clock::{Clock, SystemClock};
pub use result_sink::ResultSink;
pub use task_runner::TaskRunner;
pub use task_source::TaskSource;
