//! Completion metadata reported by a worker.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::WorkerId;

/// Timestamp format used in tabular output (`HH:MM:SS`, local time).
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// When and by whom a task finished.
///
/// Invariant: `completed_at >= received_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    task_name: String,
    worker_id: WorkerId,
    received_at: DateTime<Local>,
    completed_at: DateTime<Local>,
}

impl CompletionRecord {
    /// Build a record. A `completed_at` earlier than `received_at` (wall clock
    /// stepped backwards) is clamped to `received_at`.
    pub fn new(
        task_name: impl Into<String>,
        worker_id: WorkerId,
        received_at: DateTime<Local>,
        completed_at: DateTime<Local>,
    ) -> Self {
        Self {
            task_name: task_name.into(),
            worker_id,
            received_at,
            completed_at: completed_at.max(received_at),
        }
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    pub fn received_at(&self) -> DateTime<Local> {
        self.received_at
    }

    pub fn completed_at(&self) -> DateTime<Local> {
        self.completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 5, 1, h, m, s)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn keeps_ordered_timestamps() {
        let record = CompletionRecord::new("build", WorkerId::new(0), at(9, 0, 0), at(9, 0, 2));
        assert_eq!(record.received_at(), at(9, 0, 0));
        assert_eq!(record.completed_at(), at(9, 0, 2));
    }

    #[test]
    fn clamps_completion_before_receipt() {
        let received = at(9, 0, 5);
        let record = CompletionRecord::new(
            "build",
            WorkerId::new(1),
            received,
            received - Duration::seconds(1),
        );
        assert_eq!(record.completed_at(), received);
    }

    #[test]
    fn formats_as_wall_clock_seconds() {
        let record = CompletionRecord::new("test", WorkerId::new(0), at(7, 5, 9), at(7, 5, 9));
        assert_eq!(record.received_at().format(TIME_FORMAT).to_string(), "07:05:09");
    }
}
