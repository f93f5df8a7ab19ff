//! crates/logging/src/logger.rs
//! The dispatcher every entry point funnels through.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::num::NonZeroUsize;

use crate::caller::{CallStack, CallerResolver, keep_frame};
use crate::enabled::is_logging_enabled;
use crate::record::LogRecord;
use crate::severity::Severity;
use crate::sink::Sink;
use crate::split::{MAX_CHUNK_CHARS, split_message};

/// Tag used when the caller cannot be resolved from the stack.
pub const DEFAULT_TAG: &str = "logshim";

/// A deferred piece of text: a closure producing something string-like.
///
/// Producers passed to the logging entry points only run when logging is
/// enabled, so building an expensive message costs nothing while disabled.
pub trait LazyText {
    /// The produced text.
    type Text: AsRef<str>;

    /// Runs the producer.
    fn produce(self) -> Self::Text;
}

impl<F, S> LazyText for F
where
    F: FnOnce() -> S,
    S: AsRef<str>,
{
    type Text = S;

    fn produce(self) -> S {
        self()
    }
}

/// Producer type for "no explicit tag".
pub type NoTag = fn() -> &'static str;

/// Pass as the tag argument to have the tag resolved from the call stack.
pub const NO_TAG: Option<NoTag> = None;

/// Formats messages, resolves tags and hands chunked records to a [`Sink`].
///
/// # Examples
///
/// ```
/// use logging::{Logger, LogRecord, Sink, Severity};
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Default)]
/// struct Collect(Mutex<Vec<(String, bool)>>);
///
/// impl Sink for Collect {
///     fn write_record(&self, record: &LogRecord<'_>) {
///         self.0
///             .lock()
///             .unwrap()
///             .push((record.message().to_owned(), record.is_continuation()));
///     }
/// }
///
/// let sink = Arc::new(Collect::default());
/// let logger = Logger::new(Arc::clone(&sink));
/// logger.log(Severity::Info, "Net", &"a".repeat(3500), false);
///
/// let records = sink.0.lock().unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0], ("a".repeat(3000), false));
/// assert_eq!(records[1], ("a".repeat(500), true));
/// ```
pub struct Logger {
    sink: Box<dyn Sink>,
    resolver: CallerResolver,
    default_tag: Cow<'static, str>,
    chunk_limit: NonZeroUsize,
}

impl Logger {
    /// Creates a logger writing to `sink`.
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self::from_boxed(Box::new(sink))
    }

    /// Creates a logger from an already boxed sink.
    #[must_use]
    pub fn from_boxed(sink: Box<dyn Sink>) -> Self {
        Self {
            sink,
            resolver: CallerResolver::default(),
            default_tag: Cow::Borrowed(DEFAULT_TAG),
            chunk_limit: MAX_CHUNK_CHARS,
        }
    }

    /// Replaces the tag used when caller resolution fails.
    #[must_use]
    pub fn with_default_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.default_tag = tag.into();
        self
    }

    /// Sets how many frames past the capture anchor the caller sits.
    ///
    /// Code that wraps the entry points in its own function adds one frame per
    /// wrapper and must add the same number here.
    #[must_use]
    pub fn with_caller_depth(mut self, depth: usize) -> Self {
        self.resolver = CallerResolver::new(depth);
        self
    }

    /// Sets the largest chunk, in chars, handed to the sink.
    #[must_use]
    pub fn with_chunk_limit(mut self, limit: NonZeroUsize) -> Self {
        self.chunk_limit = limit;
        self
    }

    /// Returns the sink.
    #[must_use]
    pub fn sink(&self) -> &dyn Sink {
        self.sink.as_ref()
    }

    /// Returns the fallback tag.
    #[must_use]
    pub fn default_tag(&self) -> &str {
        &self.default_tag
    }

    /// Returns the caller depth used for tag resolution.
    #[must_use]
    pub fn caller_depth(&self) -> usize {
        self.resolver.depth()
    }

    /// Returns the chunk limit.
    #[must_use]
    pub fn chunk_limit(&self) -> NonZeroUsize {
        self.chunk_limit
    }

    /// Dispatches `message` under an explicit tag.
    ///
    /// Messages longer than the chunk limit are written as several records in
    /// order. The first record carries `continuation`; every later one is a
    /// continuation. Nothing is written while logging is disabled.
    pub fn log(&self, severity: Severity, tag: &str, message: &str, continuation: bool) {
        if !is_logging_enabled() {
            return;
        }
        for (index, chunk) in split_message(message, self.chunk_limit).enumerate() {
            let record = LogRecord::new(severity, tag, chunk, continuation || index > 0);
            self.sink.write_record(&record);
        }
        self.sink.finish_message();
    }

    /// Logs at [`Severity::Verbose`].
    #[inline(never)]
    pub fn verbose<T: LazyText, M: LazyText>(&self, tag: Option<T>, message: M) {
        self.emit(Severity::Verbose, tag, message, None);
        keep_frame();
    }

    /// Logs at [`Severity::Debug`].
    #[inline(never)]
    pub fn debug<T: LazyText, M: LazyText>(&self, tag: Option<T>, message: M) {
        self.emit(Severity::Debug, tag, message, None);
        keep_frame();
    }

    /// Logs at [`Severity::Info`].
    #[inline(never)]
    pub fn info<T: LazyText, M: LazyText>(&self, tag: Option<T>, message: M) {
        self.emit(Severity::Info, tag, message, None);
        keep_frame();
    }

    /// Logs at [`Severity::Warn`], appending the rendered `error` if any.
    #[inline(never)]
    pub fn warn<T: LazyText, M: LazyText>(
        &self,
        tag: Option<T>,
        message: M,
        error: Option<&(dyn Error + 'static)>,
    ) {
        self.emit(Severity::Warn, tag, message, error);
        keep_frame();
    }

    /// Logs at [`Severity::Error`], appending the rendered `error` if any.
    #[inline(never)]
    pub fn error<T: LazyText, M: LazyText>(
        &self,
        tag: Option<T>,
        message: M,
        error: Option<&(dyn Error + 'static)>,
    ) {
        self.emit(Severity::Error, tag, message, error);
        keep_frame();
    }

    /// Reports a condition that should never happen. Logs at [`Severity::Error`].
    #[inline(never)]
    pub fn wtf<T: LazyText, M: LazyText>(
        &self,
        tag: Option<T>,
        message: M,
        error: Option<&(dyn Error + 'static)>,
    ) {
        self.emit(Severity::Error, tag, message, error);
        keep_frame();
    }

    /// Shared body of the severity entry points.
    ///
    /// Must be called directly by an entry point that calls
    /// [`keep_frame`](crate::keep_frame) afterwards: tag resolution counts this
    /// frame and the entry point's frame (see
    /// [`FORWARDING_DEPTH`](crate::FORWARDING_DEPTH)).
    #[inline(never)]
    pub fn emit<T: LazyText, M: LazyText>(
        &self,
        severity: Severity,
        tag: Option<T>,
        message: M,
        error: Option<&(dyn Error + 'static)>,
    ) {
        if !is_logging_enabled() {
            return;
        }

        let message = message.produce();
        let rendered = error.map(|error| self.sink.render_error(Some(error)));
        let text = compose(message.as_ref(), rendered.as_deref());

        match tag {
            Some(tag) => self.log(severity, tag.produce().as_ref(), &text, false),
            None => {
                let tag = self.resolve_tag();
                self.log(severity, &tag, &text, false);
            }
        }
    }

    #[inline(never)]
    fn resolve_tag(&self) -> String {
        let stack = CallStack::capture();
        self.resolver
            .resolve(&stack)
            .unwrap_or_else(|| self.default_tag.clone().into_owned())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("default_tag", &self.default_tag)
            .field("caller_depth", &self.resolver.depth())
            .field("chunk_limit", &self.chunk_limit)
            .finish_non_exhaustive()
    }
}

// A rendered error goes on its own line after the message; an error-only call
// logs the rendering alone.
fn compose<'a>(message: &'a str, rendered: Option<&str>) -> Cow<'a, str> {
    match rendered {
        Some(rendered) if !rendered.is_empty() => {
            if message.is_empty() {
                Cow::Owned(rendered.to_owned())
            } else {
                Cow::Owned(format!("{message}\n{rendered}"))
            }
        }
        _ => Cow::Borrowed(message),
    }
}
