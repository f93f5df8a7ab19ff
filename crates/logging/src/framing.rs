//! crates/logging/src/framing.rs
//! Prefix framing selected per record.

/// Controls whether a sink renders the `timestamp / tag / [level]` prefix for a record.
///
/// Every chunk of a logical message after the first continues the previous
/// physical line, so sinks emit the prefix only for [`Framing::Full`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Framing {
    /// Start a fresh line with the full prefix.
    #[default]
    Full,
    /// Append to the line started by an earlier record.
    Continuation,
}

impl Framing {
    /// Reports whether the framing starts a new prefixed line.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Framing;
    ///
    /// assert!(Framing::Full.emits_prefix());
    /// assert!(!Framing::Continuation.emits_prefix());
    /// ```
    #[must_use]
    pub const fn emits_prefix(self) -> bool {
        matches!(self, Self::Full)
    }
}
