#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is the platform-neutral core of the `logshim` façade. It owns the
//! [`Severity`] model, the process-wide enable switch, caller-derived tag
//! resolution and the chunking dispatcher that hands [`LogRecord`]s to a
//! [`Sink`]. Concrete sinks (console streams, syslog, `tracing`) live in the
//! `logging-sink` crate.
//!
//! # Design
//!
//! Every entry point funnels into [`Logger::emit`]. When no tag is supplied
//! the logger captures a [`CallStack`] and reads the frame a fixed
//! [`FORWARDING_DEPTH`] past the capture point, formatting it as
//! `Scope$site`. Messages longer than [`MAX_CHUNK_CHARS`] are cut into several
//! records; every record after the first is flagged as a continuation so sinks
//! can omit the line prefix.
//!
//! # Invariants
//!
//! - Message and tag producers never run while logging is disabled.
//! - Records of one message reach the sink in order and share tag and severity.
//! - A rendered error is appended on its own line; an empty rendering leaves
//!   the message untouched.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use logging::{LogRecord, Logger, Sink, NO_TAG};
//!
//! #[derive(Default)]
//! struct Lines(Mutex<Vec<String>>);
//!
//! impl Sink for Lines {
//!     fn write_record(&self, record: &LogRecord<'_>) {
//!         let line = format!("[{}] {}", record.severity().code(), record.message());
//!         self.0.lock().unwrap().push(line);
//!     }
//! }
//!
//! let sink = Arc::new(Lines::default());
//! let logger = Logger::new(Arc::clone(&sink));
//! logger.info(Some(|| "Demo"), || format!("{} items", 3));
//! logger.warn(NO_TAG, || "slow", None);
//!
//! assert_eq!(*sink.0.lock().unwrap(), ["[I] 3 items", "[W] slow"]);
//! ```

mod caller;
mod clock;
mod enabled;
mod framing;
mod logger;
mod record;
mod render;
mod severity;
mod sink;
mod split;

pub use caller::{
    CallFrame, CallStack, CallerResolver, FORWARDING_DEPTH, caller_name, keep_frame,
    strip_synthetic_suffix,
};
pub use clock::{LocalClock, TimeFormatter, format_timestamp};
pub use enabled::{EnabledGuard, is_logging_enabled, set_logging_enabled};
pub use framing::Framing;
pub use logger::{DEFAULT_TAG, LazyText, Logger, NO_TAG, NoTag};
pub use record::LogRecord;
pub use render::{CauseChainRenderer, ErrorRenderer, QuietPredicate, is_host_unreachable};
pub use severity::Severity;
pub use sink::Sink;
pub use split::{MAX_CHUNK_CHARS, MessageChunks, split_message};
