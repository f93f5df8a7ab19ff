//! crates/logging-sink/src/tracing_sink.rs
//! Native log facility: forwards records as `tracing` events.

use logging::{LogRecord, Severity, Sink};

/// Target of every event emitted by [`TracingSink`].
pub const TRACING_TARGET: &str = "logshim";

/// Sink that turns each record into a `tracing` event.
///
/// Severities map to levels as Verbose → TRACE, Debug → DEBUG, Info → INFO,
/// Warn → WARN, Error → ERROR. The record tag and continuation flag travel as
/// the `tag` and `continuation` fields; the chunk is the event message. The
/// installed subscriber supplies timestamps and line framing.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Sink for TracingSink {
    fn write_record(&self, record: &LogRecord<'_>) {
        let tag = record.tag();
        let continuation = record.is_continuation();
        let message = record.message();
        match record.severity() {
            Severity::Verbose => {
                tracing::trace!(target: TRACING_TARGET, tag, continuation, "{message}");
            }
            Severity::Debug => {
                tracing::debug!(target: TRACING_TARGET, tag, continuation, "{message}");
            }
            Severity::Info => {
                tracing::info!(target: TRACING_TARGET, tag, continuation, "{message}");
            }
            Severity::Warn => {
                tracing::warn!(target: TRACING_TARGET, tag, continuation, "{message}");
            }
            Severity::Error => {
                tracing::error!(target: TRACING_TARGET, tag, continuation, "{message}");
            }
        }
    }
}
