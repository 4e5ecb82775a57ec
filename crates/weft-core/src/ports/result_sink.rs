use crate::domain::{CompletionRecord, SinkError};

/// Serializes completion records once the run has finished.
///
/// Records arrive in completion order; sinks keep that order.
pub trait ResultSink {
    fn write(&mut self, records: &[CompletionRecord]) -> Result<(), SinkError>;
}
