//! crates/logging/src/enabled.rs
//! Process-wide logging switch and its scoped override guard.

use std::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turns every logging entry point on or off for the whole process.
///
/// The flag is read with relaxed ordering and is not synchronized with
/// in-flight calls: a thread already past the check finishes its message even
/// if another thread disables logging meanwhile.
pub fn set_logging_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Reports whether logging is currently enabled. Defaults to `true`.
#[must_use]
pub fn is_logging_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// RAII guard that overrides the logging switch and restores the previous value on drop.
///
/// # Examples
///
/// ```
/// use logging::{EnabledGuard, is_logging_enabled};
///
/// {
///     let _quiet = EnabledGuard::new(false);
///     assert!(!is_logging_enabled());
/// }
/// assert!(is_logging_enabled());
/// ```
#[must_use = "dropping the guard immediately restores the previous logging state"]
#[derive(Debug)]
pub struct EnabledGuard {
    previous: bool,
}

impl EnabledGuard {
    /// Sets the switch to `enabled`, remembering the value it replaced.
    pub fn new(enabled: bool) -> Self {
        let previous = ENABLED.swap(enabled, Ordering::Relaxed);
        Self { previous }
    }

    /// Returns the value that will be restored when the guard is dropped.
    #[must_use]
    pub const fn previous(&self) -> bool {
        self.previous
    }
}

impl Drop for EnabledGuard {
    fn drop(&mut self) {
        ENABLED.store(self.previous, Ordering::Relaxed);
    }
}
