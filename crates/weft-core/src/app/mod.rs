//! App - the dispatch loop and the workers it drives.
//!
//! # Components
//! - **worker**: per-worker receive / run / report loop
//! - **WorkerPool**: spawns workers, owns their channels, shuts them down
//! - **Dispatcher**: assigns tasks, refills idle workers, collects records
//! - **DispatchCounts**: progress snapshot published while a run is active

pub mod dispatcher;
pub mod pool;
pub mod status;
pub mod worker;

pub use self::dispatcher::Dispatcher;
pub use self::pool::WorkerPool;
pub use self::status::DispatchCounts;
