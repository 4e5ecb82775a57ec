//! Impls - concrete adapters for the ports.
//!
//! - TextTaskSource: `<name> <duration>` task list
//! - CsvSink / JsonLinesSink: completion record output
//! - SimulatedWork: sleep-based task runner

pub mod csv_sink;
pub mod json_sink;
pub mod simulated_work;
pub mod text_source;

pub use self::csv_sink::CsvSink;
pub use self::json_sink::JsonLinesSink;
pub use self::simulated_work::SimulatedWork;
pub use self::text_source::{TextTaskSource, parse_tasks};
