//! crates/logging-sink/src/format.rs
//! Prefix rendering shared by line-oriented sinks.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use logging::{LocalClock, LogRecord, TimeFormatter};

/// Renders the `TIMESTAMP\tTAG\t[X]\t` prefix and streams records into a writer.
///
/// The timestamp comes from a [`TimeFormatter`] and is uppercased when the
/// prefix is rendered, so `05-03-2025 02:07:09 pm` appears as
/// `05-03-2025 02:07:09 PM`.
#[derive(Clone)]
pub struct RecordFormatter {
    clock: Arc<dyn TimeFormatter>,
}

impl RecordFormatter {
    /// Creates a formatter stamping lines with the local wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(LocalClock)
    }

    /// Creates a formatter using `clock` for the timestamp column.
    pub fn with_clock(clock: impl TimeFormatter + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    /// Returns the current time as reported by the clock, before uppercasing.
    #[must_use]
    pub fn current_time(&self) -> String {
        self.clock.now()
    }

    /// Renders the prefix for `record`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{LogRecord, Severity, TimeFormatter};
    /// use logging_sink::RecordFormatter;
    ///
    /// struct Noon;
    /// impl TimeFormatter for Noon {
    ///     fn now(&self) -> String {
    ///         "01-02-2025 12:00:00 pm".into()
    ///     }
    /// }
    ///
    /// let formatter = RecordFormatter::with_clock(Noon);
    /// let record = LogRecord::new(Severity::Warn, "Net", "slow", false);
    /// assert_eq!(formatter.prefix(&record), "01-02-2025 12:00:00 PM\tNet\t[W]\t");
    /// ```
    #[must_use]
    pub fn prefix(&self, record: &LogRecord<'_>) -> String {
        format!(
            "{}\t{}\t[{}]\t",
            self.clock.now().to_uppercase(),
            record.tag(),
            record.severity().code()
        )
    }

    /// Writes `record` to `writer`: prefix and chunk for a full record, the
    /// bare chunk for a continuation. No line terminator is written.
    pub fn write_record<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        record: &LogRecord<'_>,
    ) -> io::Result<()> {
        if record.framing().emits_prefix() {
            writer.write_all(self.prefix(record).as_bytes())?;
        }
        writer.write_all(record.message().as_bytes())
    }
}

impl Default for RecordFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordFormatter").finish_non_exhaustive()
    }
}
