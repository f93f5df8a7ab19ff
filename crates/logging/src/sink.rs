//! crates/logging/src/sink.rs
//! The environment-specific writer every record is dispatched to.

use std::error::Error;
use std::sync::Arc;

use crate::clock::{LocalClock, TimeFormatter};
use crate::record::LogRecord;
use crate::render::{CauseChainRenderer, ErrorRenderer};

/// Destination for log records.
///
/// A process selects one implementation at start-up (console stream, system
/// log, native log facility). Implementations must not panic and must not
/// report failures to the caller: a write that fails is recovered inside the
/// sink.
pub trait Sink: Send + Sync {
    /// Writes one chunk. Continuation records append to the previous line
    /// without repeating the prefix.
    fn write_record(&self, record: &LogRecord<'_>);

    /// Called once after the last chunk of a logical message has been written.
    ///
    /// Line-oriented sinks terminate the current line here. The default does
    /// nothing.
    fn finish_message(&self) {}

    /// Renders an error for appending to a message.
    fn render_error(&self, error: Option<&(dyn Error + 'static)>) -> String {
        CauseChainRenderer::new().render(error)
    }

    /// Returns the timestamp used when framing a line.
    fn current_time(&self) -> String {
        LocalClock.now()
    }
}

impl<S> Sink for Box<S>
where
    S: Sink + ?Sized,
{
    fn write_record(&self, record: &LogRecord<'_>) {
        (**self).write_record(record);
    }

    fn finish_message(&self) {
        (**self).finish_message();
    }

    fn render_error(&self, error: Option<&(dyn Error + 'static)>) -> String {
        (**self).render_error(error)
    }

    fn current_time(&self) -> String {
        (**self).current_time()
    }
}

impl<S> Sink for Arc<S>
where
    S: Sink + ?Sized,
{
    fn write_record(&self, record: &LogRecord<'_>) {
        (**self).write_record(record);
    }

    fn finish_message(&self) {
        (**self).finish_message();
    }

    fn render_error(&self, error: Option<&(dyn Error + 'static)>) -> String {
        (**self).render_error(error)
    }

    fn current_time(&self) -> String {
        (**self).current_time()
    }
}
