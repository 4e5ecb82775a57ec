//! CsvSink - completion records as a comma-separated table.

use std::borrow::Cow;
use std::io::Write;

use crate::domain::record::TIME_FORMAT;
use crate::domain::{CompletionRecord, SinkError};
use crate::ports::ResultSink;

pub const HEADER: [&str; 4] = ["Task Name", "Process ID", "Received Time", "Completed Time"];

pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<(), SinkError> {
        let row = fields
            .iter()
            .map(|f| escape(f.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.writer.write_all(row.as_bytes())?;
        self.writer.write_all(b"\r\n")?;
        Ok(())
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn write(&mut self, records: &[CompletionRecord]) -> Result<(), SinkError> {
        self.write_row(&HEADER)?;
        for record in records {
            self.write_row(&[
                record.task_name().to_string(),
                record.worker_id().to_string(),
                record.received_at().format(TIME_FORMAT).to_string(),
                record.completed_at().format(TIME_FORMAT).to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Quote a field only when it contains a delimiter, quote or line break.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WorkerId;
    use chrono::{DateTime, Local, TimeZone};
    use rstest::rstest;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 5, 1, h, m, s)
            .single()
            .expect("unambiguous local time")
    }

    fn render(records: &[CompletionRecord]) -> String {
        let mut sink = CsvSink::new(Vec::new());
        sink.write(records).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[rstest]
    #[case::plain("build", "build")]
    #[case::comma("a,b", "\"a,b\"")]
    #[case::quote("say \"hi\"", "\"say \"\"hi\"\"\"")]
    #[case::newline("two\nlines", "\"two\nlines\"")]
    fn escapes_fields(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[test]
    fn empty_run_writes_header_only() {
        assert_eq!(
            render(&[]),
            "Task Name,Process ID,Received Time,Completed Time\r\n"
        );
    }

    #[test]
    fn rows_follow_completion_order() {
        let records = vec![
            CompletionRecord::new("test", WorkerId::new(1), at(10, 0, 0), at(10, 0, 1)),
            CompletionRecord::new("build", WorkerId::new(0), at(10, 0, 0), at(10, 0, 2)),
        ];
        let out = render(&records);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "test,worker-1,10:00:00,10:00:01");
        assert_eq!(lines[2], "build,worker-0,10:00:00,10:00:02");
    }
}
