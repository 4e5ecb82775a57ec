use std::io::Write;

use crate::domain::{CompletionRecord, SinkError};
use crate::ports::ResultSink;

/// Writes one JSON object per completion record, one per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for JsonLinesSink<W> {
    fn write(&mut self, records: &[CompletionRecord]) -> Result<(), SinkError> {
        for record in records {
            serde_json::to_writer(&mut self.writer, record)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WorkerId;
    use chrono::Local;

    #[test]
    fn writes_one_object_per_line() {
        let now = Local::now();
        let records = vec![
            CompletionRecord::new("build", WorkerId::new(0), now, now),
            CompletionRecord::new("test", WorkerId::new(1), now, now),
        ];

        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write(&records).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();

        let decoded: Vec<CompletionRecord> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(decoded, records);

        let first: serde_json::Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();
        assert_eq!(first["task_name"], "build");
        assert_eq!(first["worker_id"], 0);
    }
}
