//! crates/logging-sink/src/stream/mod.rs
//! Buffered console/stream sink.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use logging::{LogRecord, Sink};

use crate::error::SinkError;
use crate::format::RecordFormatter;

/// Buffer size used by [`StreamSink::new`].
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Line-oriented sink writing framed records to an [`io::Write`] target.
///
/// Records are buffered and flushed once per logical message. Write failures
/// never reach the logging caller: they set an error flag, readable through
/// [`check_error`](Self::check_error), and are reported once on the `tracing`
/// target `logshim::sink`. A failed write does not block later ones.
///
/// The sink tracks whether the last physical line is still open. A fresh
/// record arriving while a line is open first terminates it, and
/// [`Sink::finish_message`] terminates the line after the final chunk.
///
/// # Examples
///
/// ```
/// use logging::{LogRecord, Severity, Sink};
/// use logging_sink::StreamSink;
///
/// let sink = StreamSink::new(Vec::new());
/// sink.write_record(&LogRecord::new(Severity::Info, "Net", "up", false));
/// sink.finish_message();
///
/// let output = String::from_utf8(sink.into_inner()?).unwrap();
/// assert!(output.ends_with("\tNet\t[I]\tup\n"));
/// # Ok::<(), logging_sink::SinkError>(())
/// ```
pub struct StreamSink<W: Write> {
    state: Mutex<StreamState<W>>,
    error: AtomicBool,
    formatter: RecordFormatter,
}

struct StreamState<W: Write> {
    writer: BufWriter<W>,
    line_open: bool,
}

impl StreamSink<io::Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl StreamSink<io::Stderr> {
    /// Creates a sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl StreamSink<File> {
    /// Opens `path` for appending, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> StreamSink<W> {
    /// Creates a sink with a [`DEFAULT_BUFFER_CAPACITY`] buffer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::build(writer, DEFAULT_BUFFER_CAPACITY)
    }

    /// Creates a sink with an explicit buffer capacity.
    ///
    /// A zero capacity is rejected with [`SinkError::ZeroCapacity`].
    pub fn with_capacity(writer: W, capacity: usize) -> Result<Self, SinkError> {
        if capacity == 0 {
            return Err(SinkError::ZeroCapacity);
        }
        Ok(Self::build(writer, capacity))
    }

    fn build(writer: W, capacity: usize) -> Self {
        Self {
            state: Mutex::new(StreamState {
                writer: BufWriter::with_capacity(capacity, writer),
                line_open: false,
            }),
            error: AtomicBool::new(false),
            formatter: RecordFormatter::new(),
        }
    }

    /// Replaces the formatter, typically to inject a fixed clock.
    #[must_use]
    pub fn with_formatter(mut self, formatter: RecordFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Returns the formatter.
    #[must_use]
    pub const fn formatter(&self) -> &RecordFormatter {
        &self.formatter
    }

    /// Flushes pending output and reports whether any write has failed since
    /// construction or the last [`clear_error`](Self::clear_error).
    pub fn check_error(&self) -> bool {
        // A failing flush sets the flag itself; the result is read below.
        let _ = self.flush();
        self.error.load(Ordering::Relaxed)
    }

    /// Resets the error flag.
    pub fn clear_error(&self) {
        self.error.store(false, Ordering::Relaxed);
    }

    /// Flushes buffered output to the underlying writer.
    ///
    /// A failure also sets the error flag.
    pub fn flush(&self) -> io::Result<()> {
        let result = self.lock().writer.flush();
        if let Err(error) = &result {
            self.record_failure(error);
        }
        result
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        state
            .writer
            .into_inner()
            .map_err(|error| SinkError::Io(error.into_error()))
    }

    fn lock(&self) -> MutexGuard<'_, StreamState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_failure(&self, error: &io::Error) {
        if !self.error.swap(true, Ordering::Relaxed) {
            tracing::warn!(target: "logshim::sink", %error, "stream sink write failed");
        }
    }
}

impl<W: Write> StreamState<W> {
    fn write(&mut self, formatter: &RecordFormatter, record: &LogRecord<'_>) -> io::Result<()> {
        if self.line_open && !record.is_continuation() {
            self.writer.write_all(b"\n")?;
            self.line_open = false;
        }
        formatter.write_record(&mut self.writer, record)?;
        self.line_open = true;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.line_open {
            self.writer.write_all(b"\n")?;
            self.line_open = false;
        }
        self.writer.flush()
    }
}

impl<W: Write + Send> Sink for StreamSink<W> {
    fn write_record(&self, record: &LogRecord<'_>) {
        let result = self.lock().write(&self.formatter, record);
        if let Err(error) = result {
            self.record_failure(&error);
        }
    }

    fn finish_message(&self) {
        let result = self.lock().finish();
        if let Err(error) = result {
            self.record_failure(&error);
        }
    }

    fn current_time(&self) -> String {
        self.formatter.current_time()
    }
}

impl<W: Write> fmt::Debug for StreamSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSink")
            .field("error", &self.error.load(Ordering::Relaxed))
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}
