//! crates/logging/src/severity.rs
//! Closed severity model used as the dispatch discriminant for every record.

use std::fmt;

/// Severity attached to a log record.
///
/// The set is closed and deliberately unordered: severities select how a sink
/// renders a record, they never participate in filtering. Adding a variant is a
/// breaking change that every exhaustive `match` in the workspace surfaces.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Chatty tracing output.
    Verbose,
    /// Developer diagnostics.
    Debug,
    /// Normal operational messages.
    Info,
    /// Something unexpected that the program recovered from.
    Warn,
    /// A failure. Also used for "what a terrible failure" calls.
    Error,
}

impl Severity {
    /// Every severity in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Verbose,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
    ];

    /// Returns the single-letter code rendered inside the `[X]` prefix column.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Severity;
    ///
    /// assert_eq!(Severity::Verbose.code(), 'V');
    /// assert_eq!(Severity::Warn.code(), 'W');
    /// ```
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Verbose => 'V',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }

    /// Returns the lowercase label used by configuration and `Display`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_single_letters() {
        let codes: Vec<char> = Severity::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec!['V', 'D', 'I', 'W', 'E']);
    }

    #[test]
    fn display_matches_as_str() {
        for severity in Severity::ALL {
            assert_eq!(severity.to_string(), severity.as_str());
        }
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn severity_serde_uses_labels() {
            for severity in Severity::ALL {
                let json = serde_json::to_string(&severity).unwrap();
                assert_eq!(json, format!("\"{}\"", severity.as_str()));
                let decoded: Severity = serde_json::from_str(&json).unwrap();
                assert_eq!(decoded, severity);
            }
        }
    }
}
