//! Command-line / environment configuration.
//!
//! Every flag can also come from the environment (or a `.env` file loaded
//! before parsing).

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "weft")]
#[command(about = "Run a task list on a fixed pool of workers and record when each task finished")]
#[command(version)]
pub struct Config {
    /// Number of workers in the pool
    #[arg(short = 'p', long = "processes", env = "WEFT_POOL_SIZE")]
    pub pool_size: NonZeroUsize,

    /// Task list, one `<name> <duration>` per line
    #[arg(short = 'f', long = "file", env = "WEFT_TASK_FILE")]
    pub file: PathBuf,

    /// Where to write the completion records
    #[arg(short, long, env = "WEFT_OUTPUT", default_value = "output.csv")]
    pub output: PathBuf,

    /// Output format
    #[arg(long, env = "WEFT_FORMAT", value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Length of one task duration unit, in milliseconds
    #[arg(long, env = "WEFT_TIME_UNIT_MS", default_value_t = 1000)]
    pub time_unit_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Jsonl,
}

impl Config {
    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }
}
