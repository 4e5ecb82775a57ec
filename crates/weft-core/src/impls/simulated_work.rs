//! SimulatedWork - a task "runs" by sleeping for its duration.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::Task;
use crate::ports::TaskRunner;

/// Sleeps `task.duration() * unit` on the tokio timer.
///
/// The sleep is async, so a long task only parks its own worker.
#[derive(Debug, Clone)]
pub struct SimulatedWork {
    unit: Duration,
}

impl SimulatedWork {
    /// One duration unit == one second.
    pub fn new() -> Self {
        Self::with_unit(Duration::from_secs(1))
    }

    pub fn with_unit(unit: Duration) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> Duration {
        self.unit
    }

    fn work_time(&self, task: &Task) -> Duration {
        let units = u32::try_from(task.duration()).unwrap_or(u32::MAX);
        self.unit.saturating_mul(units)
    }
}

impl Default for SimulatedWork {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRunner for SimulatedWork {
    async fn run(&self, task: &Task) {
        let work_time = self.work_time(task);
        if work_time.is_zero() {
            return;
        }
        tokio::time::sleep(work_time).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn work_time_scales_with_unit() {
        let runner = SimulatedWork::with_unit(Duration::from_millis(250));
        assert_eq!(runner.work_time(&Task::new("a", 4)), Duration::from_secs(1));
        assert_eq!(runner.work_time(&Task::new("b", 0)), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_for_task_duration() {
        let runner = SimulatedWork::new();
        let start = Instant::now();
        runner.run(&Task::new("deploy", 3)).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn zero_duration_returns_immediately() {
        let runner = SimulatedWork::new();
        let start = Instant::now();
        runner.run(&Task::new("noop", 0)).await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
