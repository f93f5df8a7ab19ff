//! crates/logging/src/record.rs
//! Transient record handed from the dispatcher to a sink.

use crate::framing::Framing;
use crate::severity::Severity;

/// A single sink invocation: one chunk of one logical message.
///
/// Records borrow the tag and chunk from the dispatcher and are never stored;
/// sinks that need to keep the data must copy it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LogRecord<'a> {
    severity: Severity,
    tag: &'a str,
    message: &'a str,
    continuation: bool,
}

impl<'a> LogRecord<'a> {
    /// Creates a record for `message` tagged with `tag`.
    #[must_use]
    pub const fn new(severity: Severity, tag: &'a str, message: &'a str, continuation: bool) -> Self {
        Self {
            severity,
            tag,
            message,
            continuation,
        }
    }

    /// Returns the record severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the tag shown in the prefix column.
    #[must_use]
    pub const fn tag(&self) -> &'a str {
        self.tag
    }

    /// Returns the chunk text.
    #[must_use]
    pub const fn message(&self) -> &'a str {
        self.message
    }

    /// Reports whether this record continues the previous one.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.continuation
    }

    /// Returns the [`Framing`] a sink should apply to the record.
    #[must_use]
    pub const fn framing(&self) -> Framing {
        if self.continuation {
            Framing::Continuation
        } else {
            Framing::Full
        }
    }
}
