use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of schedulable work.
///
/// `duration` is expressed in abstract units (seconds by default); the
/// `TaskRunner` decides how long one unit really is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    name: String,
    duration: u64,
}

impl Task {
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s)", self.name, self.duration)
    }
}
