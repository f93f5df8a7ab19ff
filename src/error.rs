//! src/error.rs
//! Initialization and configuration errors.

use logging_sink::SinkError;

/// A configuration value could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The sink name is not one of `console`, `stderr`, `syslog`, `tracing`.
    #[error("unknown sink {0:?} (expected console, stderr, syslog or tracing)")]
    UnknownSink(String),

    /// The syslog facility name is not recognised.
    #[error("unknown syslog facility {0:?}")]
    UnknownFacility(String),

    /// A boolean setting was not `true`/`false`/`1`/`0`/`on`/`off`.
    #[error("invalid value {value:?} for {key}")]
    InvalidFlag {
        /// The variable or field name.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Installing the process-wide logger failed.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// [`init`](crate::init) already ran, or a log call installed the default logger first.
    #[error("logger already initialized")]
    AlreadyInitialized,

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The selected sink could not be constructed.
    #[error("failed to construct sink: {0}")]
    Sink(#[from] SinkError),

    /// The selected sink does not exist on this platform.
    #[error("{0} sink is not available on this platform")]
    Unsupported(&'static str),

    /// A global `tracing` subscriber was already installed.
    #[error(transparent)]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
