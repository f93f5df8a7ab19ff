#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logshim` is a synchronous print-through logging façade. Each call carries
//! a severity, a tag and a message; when the tag is omitted it is derived from
//! the calling function as `Scope$site`. Messages longer than 3000 chars are
//! written as several records, the later ones flagged as continuations, and
//! every record goes straight to the sink selected at start-up: framed console
//! lines, syslog, or `tracing` events.
//!
//! # Design
//!
//! The process holds one [`Logger`], installed by [`init`] or created on first
//! use with console output. The free functions ([`info`], [`warn`], …) and the
//! matching macros forward to it. Tag resolution reads a fixed number of
//! frames up the stack, so these functions call [`Logger::emit`] directly, are
//! never inlined and call [`keep_frame`] afterwards. Code that wraps them adds a
//! frame, must call [`keep_frame`] after forwarding too, and must raise
//! [`LoggerConfig::caller_depth`] accordingly. The same applies to a function
//! that calls the free functions as its last statement; the macros handle it.
//!
//! A single switch, [`set_logging_enabled`], turns every entry point into a
//! no-op that evaluates neither the tag nor the message.
//!
//! # Examples
//!
//! ```
//! use logshim::{LoggerConfig, SinkKind};
//!
//! logshim::init(LoggerConfig::default().with_sink(SinkKind::Stderr))?;
//!
//! logshim::info!("starting {} workers", 4);
//! logshim::debug!(tag: "Pool", "worker {} idle", 2);
//!
//! let error = std::io::Error::other("connection reset");
//! logshim::error!(err: &error, "sync failed");
//! # Ok::<(), logshim::InitError>(())
//! ```

mod config;
mod error;
mod macros;

use std::error::Error;
use std::sync::OnceLock;

pub use config::{
    DEFAULT_SYSLOG_FACILITY, ENV_ENABLED, ENV_SINK, ENV_SYSLOG_FACILITY, ENV_TAG, LoggerConfig,
    SinkKind,
};
pub use error::{ConfigError, InitError};
pub use logging::{
    DEFAULT_TAG, EnabledGuard, FORWARDING_DEPTH, LazyText, LogRecord, Logger, MAX_CHUNK_CHARS,
    NO_TAG, NoTag, Severity, Sink, is_logging_enabled, keep_frame, set_logging_enabled,
};
pub use logging_sink::{RecordFormatter, SinkError, StreamSink, TracingSink};

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process-wide logger described by `config` and applies its
/// initial enabled state.
///
/// Fails with [`InitError::AlreadyInitialized`] if a logger is already in
/// place, including the default one created by an earlier log call.
pub fn init(config: LoggerConfig) -> Result<(), InitError> {
    install(config.build()?)?;
    set_logging_enabled(config.enabled);
    Ok(())
}

/// Installs a prebuilt logger, e.g. one over a custom [`Sink`].
pub fn install(logger: Logger) -> Result<(), InitError> {
    LOGGER
        .set(logger)
        .map_err(|_| InitError::AlreadyInitialized)
}

/// Installs a `tracing` subscriber printing to stderr, filtered by `RUST_LOG`
/// (default `trace`).
///
/// Pair with [`SinkKind::Tracing`] when the application has no subscriber of
/// its own.
pub fn install_tracing_subscriber() -> Result<(), InitError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

/// Returns the process-wide logger, creating a console logger on first use.
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(StreamSink::stdout()))
}

/// Writes `message` under an explicit `tag`, bypassing caller resolution.
pub fn log(severity: Severity, tag: &str, message: &str) {
    logger().log(severity, tag, message, false);
}

/// Logs at [`Severity::Verbose`]. Pass [`NO_TAG`] to derive the tag from the caller.
#[inline(never)]
pub fn verbose<T: LazyText, M: LazyText>(tag: Option<T>, message: M) {
    logger().emit(Severity::Verbose, tag, message, None);
    keep_frame();
}

/// Logs at [`Severity::Debug`].
#[inline(never)]
pub fn debug<T: LazyText, M: LazyText>(tag: Option<T>, message: M) {
    logger().emit(Severity::Debug, tag, message, None);
    keep_frame();
}

/// Logs at [`Severity::Info`].
#[inline(never)]
pub fn info<T: LazyText, M: LazyText>(tag: Option<T>, message: M) {
    logger().emit(Severity::Info, tag, message, None);
    keep_frame();
}

/// Logs at [`Severity::Warn`], appending the rendered `error` when present.
#[inline(never)]
pub fn warn<T: LazyText, M: LazyText>(
    tag: Option<T>,
    message: M,
    error: Option<&(dyn Error + 'static)>,
) {
    logger().emit(Severity::Warn, tag, message, error);
    keep_frame();
}

/// Logs at [`Severity::Error`], appending the rendered `error` when present.
#[inline(never)]
pub fn error<T: LazyText, M: LazyText>(
    tag: Option<T>,
    message: M,
    error: Option<&(dyn Error + 'static)>,
) {
    logger().emit(Severity::Error, tag, message, error);
    keep_frame();
}

/// Reports a condition that should never happen. Logs at [`Severity::Error`].
#[inline(never)]
pub fn wtf<T: LazyText, M: LazyText>(
    tag: Option<T>,
    message: M,
    error: Option<&(dyn Error + 'static)>,
) {
    logger().emit(Severity::Error, tag, message, error);
    keep_frame();
}
