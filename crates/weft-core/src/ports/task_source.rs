use crate::domain::{LoadError, Task};

/// Produces the ordered batch of tasks for one run.
pub trait TaskSource {
    fn load(&self) -> Result<Vec<Task>, LoadError>;
}
