//! Domain model (tasks, worker identity, completion records, errors).

pub mod errors;
pub mod ids;
pub mod message;
pub mod record;
pub mod task;

pub use errors::{DispatchError, LoadError, SinkError};
pub use ids::WorkerId;
pub use message::WorkerMessage;
pub use record::CompletionRecord;
pub use task::Task;
