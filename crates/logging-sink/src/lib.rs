#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the [`Sink`](logging::Sink) implementations a
//! process chooses between at start-up:
//!
//! - [`StreamSink`] frames records as `TIMESTAMP\tTAG\t[X]\tMESSAGE` lines on
//!   stdout, stderr, a file or any [`std::io::Write`] target.
//! - [`syslog::SyslogSink`] (unix) sends each record to syslog(3).
//! - [`TracingSink`] forwards records as `tracing` events for whichever
//!   subscriber the application installed.
//!
//! # Errors
//!
//! Writing never fails from the caller's point of view. Stream failures set
//! the sink's error flag and are reported once on the `logshim::sink` tracing
//! target. Construction problems surface as [`SinkError`].
//!
//! # Examples
//!
//! ```
//! use logging::Logger;
//! use logging_sink::StreamSink;
//!
//! let logger = Logger::new(StreamSink::stderr());
//! logger.log(logging::Severity::Info, "Demo", "written to stderr", false);
//! ```

mod error;
mod format;
mod stream;
#[cfg(unix)]
pub mod syslog;
mod tracing_sink;

pub use error::SinkError;
pub use format::RecordFormatter;
pub use stream::{DEFAULT_BUFFER_CAPACITY, StreamSink};
pub use tracing_sink::{TRACING_TARGET, TracingSink};
