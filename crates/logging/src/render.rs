//! crates/logging/src/render.rs
//! Error-to-text rendering appended to warn/error messages.

use std::error::Error;
use std::io;

/// Renders an optional error as text for inclusion in a log message.
pub trait ErrorRenderer: Send + Sync {
    /// Returns the rendered error, or an empty string when there is nothing worth logging.
    fn render(&self, error: Option<&(dyn Error + 'static)>) -> String;
}

/// Predicate deciding whether an error in a cause chain silences the whole rendering.
pub type QuietPredicate = fn(&(dyn Error + 'static)) -> bool;

/// Renders an error followed by one `Caused by:` line per source.
///
/// When any link of the cause chain satisfies the quiet predicate the result is
/// empty. The default predicate matches "host unreachable" I/O errors, which
/// are expected whenever the network is absent.
#[derive(Clone, Copy, Debug)]
pub struct CauseChainRenderer {
    quiet: QuietPredicate,
}

impl CauseChainRenderer {
    /// Creates a renderer that silences unreachable-host errors.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            quiet: is_host_unreachable,
        }
    }

    /// Creates a renderer with a custom quiet predicate.
    #[must_use]
    pub const fn with_quiet(quiet: QuietPredicate) -> Self {
        Self { quiet }
    }
}

impl Default for CauseChainRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorRenderer for CauseChainRenderer {
    fn render(&self, error: Option<&(dyn Error + 'static)>) -> String {
        let Some(error) = error else {
            return String::new();
        };

        let mut link = Some(error);
        while let Some(current) = link {
            if (self.quiet)(current) {
                return String::new();
            }
            link = current.source();
        }

        let mut text = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            text.push_str("\nCaused by: ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        text
    }
}

/// Matches I/O errors reporting an unreachable host or network.
#[must_use]
pub fn is_host_unreachable(error: &(dyn Error + 'static)) -> bool {
    error.downcast_ref::<io::Error>().is_some_and(|io_error| {
        matches!(
            io_error.kind(),
            io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable
        )
    })
}
