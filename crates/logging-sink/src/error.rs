//! crates/logging-sink/src/error.rs
//! Construction errors for sinks.

use std::io;

/// Failure to construct or tear down a sink.
///
/// Writing records never fails from the caller's point of view; these errors
/// only surface from constructors and from [`StreamSink::into_inner`](crate::StreamSink::into_inner).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// A stream sink was asked for a zero-byte buffer.
    #[error("stream buffer capacity must be greater than zero")]
    ZeroCapacity,

    /// The syslog ident contains an interior NUL byte.
    #[error("syslog ident {ident:?} contains a NUL byte")]
    InvalidIdent {
        /// The rejected ident.
        ident: String,
    },

    /// Opening or flushing the underlying stream failed.
    #[error("stream I/O failed: {0}")]
    Io(#[from] io::Error),
}
