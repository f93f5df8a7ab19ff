//! src/config.rs
//! Logger configuration and sink selection.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use logging::{DEFAULT_TAG, FORWARDING_DEPTH, Logger, MAX_CHUNK_CHARS, Sink};
use logging_sink::{DEFAULT_BUFFER_CAPACITY, StreamSink, TracingSink};

use crate::error::{ConfigError, InitError};

/// Environment variable selecting the sink kind.
pub const ENV_SINK: &str = "LOGSHIM_SINK";
/// Environment variable overriding the default tag.
pub const ENV_TAG: &str = "LOGSHIM_TAG";
/// Environment variable naming the syslog facility.
pub const ENV_SYSLOG_FACILITY: &str = "LOGSHIM_SYSLOG_FACILITY";
/// Environment variable setting the initial enabled state.
pub const ENV_ENABLED: &str = "LOGSHIM_ENABLED";

/// Default syslog facility name.
pub const DEFAULT_SYSLOG_FACILITY: &str = "user";

/// Which [`Sink`] the process-wide logger writes to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SinkKind {
    /// Framed lines on standard output.
    #[default]
    Console,
    /// Framed lines on standard error.
    Stderr,
    /// syslog(3). Unix only.
    Syslog,
    /// `tracing` events for the installed subscriber.
    Tracing,
}

impl SinkKind {
    /// The sink used when nothing is configured.
    ///
    /// Console output is available on every target, so it is the default
    /// everywhere; the OS log has to be selected explicitly.
    pub const fn platform_default() -> Self {
        Self::Console
    }

    /// Returns the configuration name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Stderr => "stderr",
            Self::Syslog => "syslog",
            Self::Tracing => "tracing",
        }
    }

    /// Reports whether the sink can be constructed on this target.
    pub const fn is_available(self) -> bool {
        match self {
            Self::Console | Self::Stderr | Self::Tracing => true,
            Self::Syslog => cfg!(unix),
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SinkKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        [Self::Console, Self::Stderr, Self::Syslog, Self::Tracing]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .or_else(|| name.eq_ignore_ascii_case("stdout").then_some(Self::Console))
            .ok_or_else(|| ConfigError::UnknownSink(s.to_owned()))
    }
}

/// Settings for the process-wide logger.
///
/// # Examples
///
/// ```
/// use logshim::{LoggerConfig, SinkKind};
///
/// let config = LoggerConfig::default()
///     .with_sink(SinkKind::Stderr)
///     .with_default_tag("MyApp");
/// assert_eq!(config.sink, SinkKind::Stderr);
/// assert_eq!(config.default_tag, "MyApp");
/// assert!(config.enabled);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Selected sink.
    pub sink: SinkKind,
    /// Tag used when caller resolution fails.
    pub default_tag: String,
    /// Frames between the stack capture and the application caller.
    pub caller_depth: usize,
    /// Largest chunk, in chars, per record.
    pub chunk_limit: NonZeroUsize,
    /// Stream sink buffer size in bytes. Must be non-zero.
    pub buffer_capacity: usize,
    /// syslog facility name, e.g. `user` or `local0`.
    pub syslog_facility: String,
    /// syslog ident.
    pub syslog_ident: String,
    /// Initial state of the process-wide switch.
    pub enabled: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::platform_default(),
            default_tag: DEFAULT_TAG.to_owned(),
            caller_depth: FORWARDING_DEPTH,
            chunk_limit: MAX_CHUNK_CHARS,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            syslog_facility: DEFAULT_SYSLOG_FACILITY.to_owned(),
            syslog_ident: DEFAULT_TAG.to_owned(),
            enabled: true,
        }
    }
}

impl LoggerConfig {
    /// Reads `LOGSHIM_*` variables from the process environment over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source.
    ///
    /// # Examples
    ///
    /// ```
    /// use logshim::{LoggerConfig, SinkKind};
    ///
    /// let config = LoggerConfig::from_lookup(|key| match key {
    ///     "LOGSHIM_SINK" => Some("tracing".into()),
    ///     "LOGSHIM_ENABLED" => Some("off".into()),
    ///     _ => None,
    /// })?;
    /// assert_eq!(config.sink, SinkKind::Tracing);
    /// assert!(!config.enabled);
    /// # Ok::<(), logshim::ConfigError>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(sink) = lookup(ENV_SINK) {
            config.sink = sink.parse()?;
        }
        if let Some(tag) = lookup(ENV_TAG).filter(|tag| !tag.is_empty()) {
            config.syslog_ident.clone_from(&tag);
            config.default_tag = tag;
        }
        if let Some(facility) = lookup(ENV_SYSLOG_FACILITY) {
            validate_facility(&facility)?;
            config.syslog_facility = facility;
        }
        if let Some(enabled) = lookup(ENV_ENABLED) {
            config.enabled = parse_flag(ENV_ENABLED, &enabled)?;
        }
        Ok(config)
    }

    /// Selects the sink.
    pub fn with_sink(mut self, sink: SinkKind) -> Self {
        self.sink = sink;
        self
    }

    /// Sets the fallback tag.
    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }

    /// Sets the caller depth.
    pub fn with_caller_depth(mut self, depth: usize) -> Self {
        self.caller_depth = depth;
        self
    }

    /// Sets the chunk limit.
    pub fn with_chunk_limit(mut self, limit: NonZeroUsize) -> Self {
        self.chunk_limit = limit;
        self
    }

    /// Sets the stream buffer capacity.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Sets the syslog facility name.
    pub fn with_syslog_facility(mut self, facility: impl Into<String>) -> Self {
        self.syslog_facility = facility.into();
        self
    }

    /// Sets the syslog ident.
    pub fn with_syslog_ident(mut self, ident: impl Into<String>) -> Self {
        self.syslog_ident = ident.into();
        self
    }

    /// Sets the initial enabled state.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Constructs a [`Logger`] for this configuration.
    ///
    /// Does not touch the process-wide logger or switch.
    pub fn build(&self) -> Result<Logger, InitError> {
        let sink = self.build_sink()?;
        Ok(Logger::from_boxed(sink)
            .with_default_tag(self.default_tag.clone())
            .with_caller_depth(self.caller_depth)
            .with_chunk_limit(self.chunk_limit))
    }

    fn build_sink(&self) -> Result<Box<dyn Sink>, InitError> {
        Ok(match self.sink {
            SinkKind::Console => Box::new(StreamSink::with_capacity(
                std::io::stdout(),
                self.buffer_capacity,
            )?),
            SinkKind::Stderr => Box::new(StreamSink::with_capacity(
                std::io::stderr(),
                self.buffer_capacity,
            )?),
            SinkKind::Syslog => self.build_syslog()?,
            SinkKind::Tracing => Box::new(TracingSink::new()),
        })
    }

    #[cfg(unix)]
    fn build_syslog(&self) -> Result<Box<dyn Sink>, InitError> {
        use logging_sink::syslog::{SyslogConfig, SyslogFacility, SyslogSink};

        let facility = SyslogFacility::from_name(&self.syslog_facility)
            .ok_or_else(|| ConfigError::UnknownFacility(self.syslog_facility.clone()))?;
        let sink = SyslogSink::open(SyslogConfig::new(facility, self.syslog_ident.clone()))?;
        Ok(Box::new(sink))
    }

    #[cfg(not(unix))]
    fn build_syslog(&self) -> Result<Box<dyn Sink>, InitError> {
        Err(InitError::Unsupported(SinkKind::Syslog.as_str()))
    }
}

#[cfg(unix)]
fn validate_facility(name: &str) -> Result<(), ConfigError> {
    logging_sink::syslog::SyslogFacility::from_name(name)
        .map(|_| ())
        .ok_or_else(|| ConfigError::UnknownFacility(name.to_owned()))
}

// Facilities are only meaningful where syslog exists.
#[cfg(not(unix))]
fn validate_facility(_name: &str) -> Result<(), ConfigError> {
    Ok(())
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_core_constants() {
        let config = LoggerConfig::default();
        assert_eq!(config.sink, SinkKind::Console);
        assert_eq!(config.default_tag, DEFAULT_TAG);
        assert_eq!(config.caller_depth, FORWARDING_DEPTH);
        assert_eq!(config.chunk_limit, MAX_CHUNK_CHARS);
        assert_eq!(config.buffer_capacity, DEFAULT_BUFFER_CAPACITY);
        assert_eq!(config.syslog_facility, "user");
        assert!(config.enabled);
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = LoggerConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn environment_overrides_fields() {
        let config = LoggerConfig::from_lookup(lookup(&[
            (ENV_SINK, "Stderr"),
            (ENV_TAG, "Svc"),
            (ENV_SYSLOG_FACILITY, "local3"),
            (ENV_ENABLED, "0"),
        ]))
        .expect("valid environment");
        assert_eq!(config.sink, SinkKind::Stderr);
        assert_eq!(config.default_tag, "Svc");
        assert_eq!(config.syslog_ident, "Svc");
        assert_eq!(config.syslog_facility, "local3");
        assert!(!config.enabled);
    }

    #[test]
    fn empty_tag_is_ignored() {
        let config = LoggerConfig::from_lookup(lookup(&[(ENV_TAG, "")])).expect("valid");
        assert_eq!(config.default_tag, DEFAULT_TAG);
    }

    #[test]
    fn unknown_sink_is_rejected() {
        let error = LoggerConfig::from_lookup(lookup(&[(ENV_SINK, "journald")])).unwrap_err();
        assert_eq!(error, ConfigError::UnknownSink("journald".into()));
    }

    #[test]
    fn invalid_flag_is_rejected() {
        let error = LoggerConfig::from_lookup(lookup(&[(ENV_ENABLED, "maybe")])).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidFlag { key: ENV_ENABLED, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn unknown_facility_is_rejected() {
        let error =
            LoggerConfig::from_lookup(lookup(&[(ENV_SYSLOG_FACILITY, "local9")])).unwrap_err();
        assert_eq!(error, ConfigError::UnknownFacility("local9".into()));
    }

    #[test]
    fn sink_kind_parses_names_and_stdout_alias() {
        assert_eq!("console".parse::<SinkKind>(), Ok(SinkKind::Console));
        assert_eq!("STDOUT".parse::<SinkKind>(), Ok(SinkKind::Console));
        assert_eq!(" syslog ".parse::<SinkKind>(), Ok(SinkKind::Syslog));
        assert_eq!("tracing".parse::<SinkKind>(), Ok(SinkKind::Tracing));
        for kind in [SinkKind::Console, SinkKind::Stderr, SinkKind::Syslog, SinkKind::Tracing] {
            assert_eq!(kind.to_string().parse::<SinkKind>(), Ok(kind));
        }
    }

    #[test]
    fn platform_default_is_available() {
        assert!(SinkKind::platform_default().is_available());
        assert_eq!(SinkKind::Syslog.is_available(), cfg!(unix));
    }

    #[test]
    fn build_applies_logger_settings() {
        let limit = NonZeroUsize::new(128).expect("non-zero");
        let logger = LoggerConfig::default()
            .with_sink(SinkKind::Tracing)
            .with_default_tag("Built")
            .with_caller_depth(5)
            .with_chunk_limit(limit)
            .build()
            .expect("tracing sink");
        assert_eq!(logger.default_tag(), "Built");
        assert_eq!(logger.caller_depth(), 5);
        assert_eq!(logger.chunk_limit(), limit);
    }

    #[test]
    fn zero_buffer_capacity_fails_construction() {
        let result = LoggerConfig::default()
            .with_sink(SinkKind::Stderr)
            .with_buffer_capacity(0)
            .build();
        assert!(matches!(
            result,
            Err(InitError::Sink(logging_sink::SinkError::ZeroCapacity))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn syslog_build_rejects_bad_facility_and_ident() {
        let bad_facility = LoggerConfig::default()
            .with_sink(SinkKind::Syslog)
            .with_syslog_facility("nowhere")
            .build();
        assert!(matches!(
            bad_facility,
            Err(InitError::Config(ConfigError::UnknownFacility(_)))
        ));

        let bad_ident = LoggerConfig::default()
            .with_sink(SinkKind::Syslog)
            .with_syslog_ident("a\0b")
            .build();
        assert!(matches!(
            bad_ident,
            Err(InitError::Sink(logging_sink::SinkError::InvalidIdent { .. }))
        ));
    }
}
