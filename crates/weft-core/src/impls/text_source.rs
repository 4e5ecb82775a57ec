//! TextTaskSource - reads a plain-text task list.
//!
//! One task per line: `<name> <duration>`. The duration is the last
//! whitespace-separated token; everything before it (trimmed) is the name,
//! which may itself contain spaces. Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{LoadError, Task};
use crate::ports::TaskSource;

pub struct TextTaskSource {
    path: PathBuf,
}

impl TextTaskSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskSource for TextTaskSource {
    fn load(&self) -> Result<Vec<Task>, LoadError> {
        let file = File::open(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let tasks = parse_tasks(BufReader::new(file), &self.path)?;
        debug!(path = %self.path.display(), count = tasks.len(), "task list parsed");
        Ok(tasks)
    }
}

/// Parse every line of `reader`. `origin` is only used in error messages.
pub fn parse_tasks<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<Task>, LoadError> {
    let mut tasks = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: origin.to_path_buf(),
            source,
        })?;
        let line_no = index + 1;
        match parse_line(&line) {
            Ok(Some(task)) => tasks.push(task),
            Ok(None) => {}
            Err(reason) => {
                return Err(LoadError::Malformed {
                    line: line_no,
                    content: line,
                    reason,
                });
            }
        }
    }
    Ok(tasks)
}

fn parse_line(line: &str) -> Result<Option<Task>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some((name, duration)) = line.rsplit_once(char::is_whitespace) else {
        return Err("expected `<name> <duration>`".to_string());
    };

    let name = name.trim();
    if name.is_empty() {
        return Err("task name is empty".to_string());
    }

    let duration = duration
        .parse::<u64>()
        .map_err(|e| format!("duration {duration:?} is not a non-negative integer: {e}"))?;

    Ok(Some(Task::new(name, duration)))
}
