//! crates/logging-sink/src/syslog.rs
//! OS log sink backed by syslog(3).
//!
//! Uses libc `openlog`/`syslog`/`closelog` directly. Each record becomes one
//! syslog entry; syslogd supplies the timestamp, so only the tag and chunk are
//! sent.

use std::ffi::CString;
use std::fmt;

use logging::{LogRecord, Severity, Sink};

use crate::error::SinkError;

/// Syslog facility codes matching the POSIX syslog(3) constants.
///
/// Each variant corresponds to a `LOG_*` facility from `<syslog.h>`.
/// Configuration maps string names (e.g., `"user"`, `"local0"`) to these
/// constants via [`SyslogFacility::from_name`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogFacility {
    /// Kernel messages (LOG_KERN).
    Kern = libc::LOG_KERN,
    /// User-level messages (LOG_USER), the default for applications.
    #[default]
    User = libc::LOG_USER,
    /// Mail system (LOG_MAIL).
    Mail = libc::LOG_MAIL,
    /// System daemons (LOG_DAEMON).
    Daemon = libc::LOG_DAEMON,
    /// Security/authorization messages (LOG_AUTH).
    Auth = libc::LOG_AUTH,
    /// Messages generated internally by syslogd (LOG_SYSLOG).
    Syslog = libc::LOG_SYSLOG,
    /// Line printer subsystem (LOG_LPR).
    Lpr = libc::LOG_LPR,
    /// Network news subsystem (LOG_NEWS).
    News = libc::LOG_NEWS,
    /// UUCP subsystem (LOG_UUCP).
    Uucp = libc::LOG_UUCP,
    /// Clock daemon (LOG_CRON).
    Cron = libc::LOG_CRON,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    /// Every facility in `<syslog.h>` order.
    pub const ALL: [Self; 18] = [
        Self::Kern,
        Self::User,
        Self::Mail,
        Self::Daemon,
        Self::Auth,
        Self::Syslog,
        Self::Lpr,
        Self::News,
        Self::Uucp,
        Self::Cron,
        Self::Local0,
        Self::Local1,
        Self::Local2,
        Self::Local3,
        Self::Local4,
        Self::Local5,
        Self::Local6,
        Self::Local7,
    ];

    /// Parses a facility name, case-insensitively.
    ///
    /// Returns `None` for unrecognised names.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(unix)]
    /// # {
    /// use logging_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("user"), Some(SyslogFacility::User));
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("unknown"), None);
    /// # }
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|facility| facility.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns the lowercase facility name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kern => "kern",
            Self::User => "user",
            Self::Mail => "mail",
            Self::Daemon => "daemon",
            Self::Auth => "auth",
            Self::Syslog => "syslog",
            Self::Lpr => "lpr",
            Self::News => "news",
            Self::Uucp => "uucp",
            Self::Cron => "cron",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default ident prepended by syslogd to every entry.
pub const DEFAULT_SYSLOG_IDENT: &str = "logshim";

/// Facility and ident passed to [`openlog(3)`](libc::openlog).
///
/// Constructing a [`SyslogConfig`] does not open the connection; pass it to
/// [`SyslogSink::open`].
///
/// # Examples
///
/// ```
/// # #[cfg(unix)]
/// # {
/// use logging_sink::syslog::{SyslogConfig, SyslogFacility};
///
/// let config = SyslogConfig::new(SyslogFacility::Local5, "my-app");
/// assert_eq!(config.facility(), SyslogFacility::Local5);
/// assert_eq!(config.ident(), "my-app");
/// # }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyslogConfig {
    facility: SyslogFacility,
    ident: String,
}

impl SyslogConfig {
    /// Creates a configuration with the given facility and ident.
    pub fn new(facility: SyslogFacility, ident: impl Into<String>) -> Self {
        Self {
            facility,
            ident: ident.into(),
        }
    }

    /// Returns the configured facility.
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Returns the configured ident.
    pub fn ident(&self) -> &str {
        &self.ident
    }
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self::new(SyslogFacility::default(), DEFAULT_SYSLOG_IDENT)
    }
}

/// Syslog priority levels matching POSIX syslog(3) severity constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogPriority {
    /// Error conditions (LOG_ERR).
    Error = libc::LOG_ERR,
    /// Warning conditions (LOG_WARNING).
    Warning = libc::LOG_WARNING,
    /// Informational messages (LOG_INFO).
    Info = libc::LOG_INFO,
    /// Debug-level messages (LOG_DEBUG).
    Debug = libc::LOG_DEBUG,
}

impl From<Severity> for SyslogPriority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Verbose | Severity::Debug => Self::Debug,
            Severity::Info => Self::Info,
            Severity::Warn => Self::Warning,
            Severity::Error => Self::Error,
        }
    }
}

/// Sink writing each record to syslog(3).
///
/// The connection is opened on construction and closed when the sink is
/// dropped. syslog keeps one connection per process, so only one sink should
/// be alive at a time; opening a second one replaces the first's ident and
/// facility.
///
/// # Examples
///
/// ```no_run
/// # #[cfg(unix)]
/// # {
/// use logging::{LogRecord, Severity, Sink};
/// use logging_sink::syslog::{SyslogConfig, SyslogSink};
///
/// let sink = SyslogSink::open(SyslogConfig::default())?;
/// sink.write_record(&LogRecord::new(Severity::Info, "Startup", "ready", false));
/// # }
/// # Ok::<(), logging_sink::SinkError>(())
/// ```
pub struct SyslogSink {
    config: SyslogConfig,
    // Must outlive the connection: syslog(3) keeps the pointer.
    ident: CString,
}

impl SyslogSink {
    /// Opens the syslog connection described by `config`.
    ///
    /// Fails with [`SinkError::InvalidIdent`] when the ident contains a NUL byte.
    #[allow(unsafe_code)]
    pub fn open(config: SyslogConfig) -> Result<Self, SinkError> {
        let ident = CString::new(config.ident()).map_err(|_| SinkError::InvalidIdent {
            ident: config.ident().to_owned(),
        })?;

        // SAFETY: `ident` is a valid C string owned by the returned sink and
        // is only freed after `closelog` runs in `Drop`. glibc serializes
        // openlog/syslog/closelog behind an internal lock.
        unsafe {
            libc::openlog(
                ident.as_ptr(),
                libc::LOG_PID,
                config.facility() as libc::c_int,
            );
        }

        Ok(Self { config, ident })
    }

    /// Returns the configuration the sink was opened with.
    pub const fn config(&self) -> &SyslogConfig {
        &self.config
    }

    /// Returns the ident passed to `openlog`.
    pub fn ident(&self) -> &str {
        self.ident.to_str().unwrap_or_default()
    }
}

impl Sink for SyslogSink {
    fn write_record(&self, record: &LogRecord<'_>) {
        let line = format!("{}: {}", record.tag(), record.message());
        if let Err(error) = syslog_message(record.severity().into(), &line) {
            tracing::warn!(target: "logshim::sink", %error, tag = record.tag(), "syslog record dropped");
        }
    }
}

impl fmt::Debug for SyslogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyslogSink")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Drop for SyslogSink {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: closelog has no preconditions. The ident stays allocated
        // until this function returns.
        unsafe {
            libc::closelog();
        }
    }
}

/// Sends `message` to syslog(3) with the given priority.
///
/// Messages containing a NUL byte cannot be passed to C and are rejected.
#[allow(unsafe_code)]
pub fn syslog_message(priority: SyslogPriority, message: &str) -> Result<(), std::ffi::NulError> {
    let c_message = CString::new(message)?;

    // SAFETY: the `%s` format keeps `%` in the message from being interpreted,
    // and both arguments are valid NUL-terminated strings for the duration of
    // the call.
    unsafe {
        libc::syslog(priority as libc::c_int, c"%s".as_ptr(), c_message.as_ptr());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_facility_is_user() {
        assert_eq!(SyslogFacility::default(), SyslogFacility::User);
    }

    #[test]
    fn from_name_recognises_all_facilities() {
        for facility in SyslogFacility::ALL {
            assert_eq!(
                SyslogFacility::from_name(facility.as_str()),
                Some(facility),
                "failed for facility name '{facility}'"
            );
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(
            SyslogFacility::from_name("DAEMON"),
            Some(SyslogFacility::Daemon)
        );
        assert_eq!(
            SyslogFacility::from_name("Local0"),
            Some(SyslogFacility::Local0)
        );
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(SyslogFacility::from_name(""), None);
        assert_eq!(SyslogFacility::from_name("local8"), None);
        assert_eq!(SyslogFacility::from_name("LOG_USER"), None);
    }

    #[test]
    fn facility_values_match_libc_constants() {
        assert_eq!(SyslogFacility::User as i32, libc::LOG_USER);
        assert_eq!(SyslogFacility::Daemon as i32, libc::LOG_DAEMON);
        assert_eq!(SyslogFacility::Local7 as i32, libc::LOG_LOCAL7);
    }

    #[test]
    fn config_default_uses_user_facility_and_default_ident() {
        let config = SyslogConfig::default();
        assert_eq!(config.facility(), SyslogFacility::User);
        assert_eq!(config.ident(), DEFAULT_SYSLOG_IDENT);
    }

    #[test]
    fn severity_maps_to_priority() {
        assert_eq!(SyslogPriority::from(Severity::Verbose), SyslogPriority::Debug);
        assert_eq!(SyslogPriority::from(Severity::Debug), SyslogPriority::Debug);
        assert_eq!(SyslogPriority::from(Severity::Info), SyslogPriority::Info);
        assert_eq!(SyslogPriority::from(Severity::Warn), SyslogPriority::Warning);
        assert_eq!(SyslogPriority::from(Severity::Error), SyslogPriority::Error);
    }

    #[test]
    fn priority_values_match_libc_constants() {
        assert_eq!(SyslogPriority::Error as i32, libc::LOG_ERR);
        assert_eq!(SyslogPriority::Warning as i32, libc::LOG_WARNING);
        assert_eq!(SyslogPriority::Info as i32, libc::LOG_INFO);
        assert_eq!(SyslogPriority::Debug as i32, libc::LOG_DEBUG);
    }

    #[test]
    fn open_rejects_nul_in_ident() {
        let result = SyslogSink::open(SyslogConfig::new(SyslogFacility::User, "bad\0ident"));
        assert!(matches!(result, Err(SinkError::InvalidIdent { ref ident }) if ident == "bad\0ident"));
    }

    #[test]
    fn open_and_write_do_not_panic() {
        let sink = SyslogSink::open(SyslogConfig::new(SyslogFacility::Local7, "logshim-tests"))
            .expect("valid ident");
        assert_eq!(sink.ident(), "logshim-tests");
        sink.write_record(&LogRecord::new(Severity::Debug, "Tests", "100% done", false));
        sink.write_record(&LogRecord::new(Severity::Debug, "Tests", "tail", true));
    }

    #[test]
    fn syslog_message_rejects_nul_bytes() {
        assert!(syslog_message(SyslogPriority::Info, "before\0after").is_err());
    }

    #[test]
    fn sink_debug_format() {
        let sink = SyslogSink::open(SyslogConfig::default()).expect("valid ident");
        let debug = format!("{sink:?}");
        assert!(debug.contains("SyslogSink"));
        assert!(debug.contains(DEFAULT_SYSLOG_IDENT));
    }
}
