//! crates/test-support/src/lib.rs
//!
//! Test doubles shared by the workspace's integration tests: a sink that
//! records every call, a clock frozen at one instant, and writers for
//! exercising stream sinks.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logging::{LogRecord, Severity, Sink, TimeFormatter};

/// Owned copy of a [`LogRecord`] captured by [`RecordingSink`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Recorded {
    /// Record severity.
    pub severity: Severity,
    /// Record tag.
    pub tag: String,
    /// Chunk text.
    pub message: String,
    /// Continuation flag.
    pub continuation: bool,
}

impl Recorded {
    /// Builds an expected record for comparisons.
    pub fn new(severity: Severity, tag: &str, message: &str, continuation: bool) -> Self {
        Self {
            severity,
            tag: tag.to_owned(),
            message: message.to_owned(),
            continuation,
        }
    }
}

/// Sink that stores every record and counts finished messages.
///
/// Clones share the same storage, so a test can keep one handle while the
/// logger owns another.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    inner: Arc<Mutex<Recording>>,
}

#[derive(Debug, Default)]
struct Recording {
    records: Vec<Recorded>,
    finished: usize,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record written so far.
    pub fn records(&self) -> Vec<Recorded> {
        self.lock().records.clone()
    }

    /// Returns the chunk texts written so far.
    pub fn messages(&self) -> Vec<String> {
        self.lock()
            .records
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    /// Returns the number of records written.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    /// Reports whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many times [`Sink::finish_message`] was called.
    pub fn finished_messages(&self) -> usize {
        self.lock().finished
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        let mut recording = self.lock();
        recording.records.clear();
        recording.finished = 0;
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for RecordingSink {
    fn write_record(&self, record: &LogRecord<'_>) {
        self.lock().records.push(Recorded {
            severity: record.severity(),
            tag: record.tag().to_owned(),
            message: record.message().to_owned(),
            continuation: record.is_continuation(),
        });
    }

    fn finish_message(&self) {
        self.lock().finished += 1;
    }
}

/// Clock that always reports the same text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FixedClock(pub String);

impl FixedClock {
    /// Creates a clock reporting `now`.
    pub fn new(now: impl Into<String>) -> Self {
        Self(now.into())
    }
}

impl TimeFormatter for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

/// Writer whose every write and flush fails with `BrokenPipe`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

/// In-memory writer whose clones share one buffer.
///
/// [`set_failing`](Self::set_failing) makes writes fail until switched back,
/// for exercising recovery after an error.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
    failing: Arc<AtomicBool>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the buffered bytes as UTF-8 text.
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Makes subsequent writes and flushes fail (`true`) or succeed (`false`).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> io::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        } else {
            Ok(())
        }
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check()?;
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.check()
    }
}
