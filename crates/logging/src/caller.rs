//! crates/logging/src/caller.rs
//! Call-stack snapshots and the resolver that turns them into tags.
//!
//! A tag is derived from the frame of the code that invoked a logging entry
//! point. The resolver does not search for that frame; it reads a fixed depth
//! into the snapshot. The depth therefore has to match the number of forwarding
//! layers between [`CallStack::capture`] and the application, which is what
//! [`FORWARDING_DEPTH`] records.

use std::sync::LazyLock;

use regex::Regex;

/// Frames between [`CallStack::capture`] and the application code that called
/// a severity entry point.
///
/// The chain is `entry point -> Logger::emit -> Logger::resolve_tag ->
/// CallStack::capture`, so the application frame sits three entries past the
/// capture anchor. Each of these functions is `#[inline(never)]` and calls
/// [`keep_frame`] after forwarding, so the count holds in optimized builds.
/// Wrappers that add their own forwarding layer must do the same and raise the
/// depth through [`Logger::with_caller_depth`](crate::Logger::with_caller_depth).
pub const FORWARDING_DEPTH: usize = 3;

/// Keeps the calling function's frame on the stack for the call before it.
///
/// Optimized builds turn a call in tail position into a jump, which drops the
/// caller's frame before [`CallStack::capture`] runs. A function that logs
/// without a tag as its last statement loses its own frame the same way;
/// the logging macros call this after every entry point.
#[inline]
pub fn keep_frame() {
    std::hint::black_box(());
}

// Trailing closure/async markers: legacy `::{{closure}}` and v0 `::{closure#0}`.
static SYNTHETIC_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:::\{\{[a-z_]+\}\}|::\{[a-z_]+#\d+\})+$")
        .expect("synthetic suffix pattern is valid")
});

/// One entry of a [`CallStack`]: the demangled path of the function executing at that depth.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CallFrame {
    symbol: String,
}

impl CallFrame {
    /// Creates a frame from a demangled symbol path such as `app::net::Client::connect`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Creates a frame from its declaring scope and invocation site.
    pub fn from_parts(scope: &str, site: &str) -> Self {
        if scope.is_empty() {
            Self::new(site)
        } else {
            Self::new(format!("{scope}::{site}"))
        }
    }

    /// Returns the full demangled symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the declaring scope: everything before the final path segment.
    ///
    /// Empty for frames without a path (unresolved or foreign symbols).
    #[must_use]
    pub fn scope(&self) -> &str {
        split_last_segment(&self.symbol).map_or("", |(scope, _)| scope)
    }

    /// Returns the invocation site: the final path segment without turbofish arguments.
    #[must_use]
    pub fn site(&self) -> &str {
        let site = split_last_segment(&self.symbol).map_or(self.symbol.as_str(), |(_, site)| site);
        without_generics(site)
    }
}

/// Ordered snapshot of the current thread's stack, innermost frame first.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    /// Builds a snapshot from explicit frames, innermost first.
    pub fn from_frames(frames: impl IntoIterator<Item = CallFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Builds a snapshot from demangled symbol paths, innermost first.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_frames(symbols.into_iter().map(CallFrame::new))
    }

    /// Captures the current stack.
    ///
    /// Frame 0 of the result is the function that called `capture`; the
    /// unwinder's own frames and `capture` itself are dropped. Frames whose
    /// symbols cannot be resolved are kept as empty entries so that depths stay
    /// aligned. When the capture frame itself cannot be identified (stripped
    /// binaries), the snapshot is empty.
    #[inline(never)]
    pub fn capture() -> Self {
        let mut frames = Vec::new();
        let mut anchored = false;

        backtrace::trace(|frame| {
            let mut resolved = false;
            backtrace::resolve_frame(frame, |symbol| {
                resolved = true;
                let name = symbol.name().map(|name| format!("{name:#}"));
                if anchored {
                    frames.push(CallFrame::new(name.unwrap_or_default()));
                } else if name.as_deref().is_some_and(is_capture_frame) {
                    anchored = true;
                }
            });
            if anchored && !resolved {
                frames.push(CallFrame::default());
            }
            true
        });

        Self { frames }
    }

    /// Returns the frame at `depth`, or `None` when the stack is shallower.
    #[must_use]
    pub fn frame(&self, depth: usize) -> Option<&CallFrame> {
        self.frames.get(depth)
    }

    /// Returns the frames, innermost first.
    #[must_use]
    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    /// Returns the number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Reports whether the snapshot has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

// Legacy demangling prints `logging::caller::CallStack::capture`, v0 prints
// `<logging::caller::CallStack>::capture`.
fn is_capture_frame(name: &str) -> bool {
    name.ends_with("::capture") && name.contains("CallStack")
}

/// Reads a fixed depth into a [`CallStack`] and formats the frame found there as a tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CallerResolver {
    depth: usize,
}

impl CallerResolver {
    /// Creates a resolver that reads the frame `depth` entries past the capture anchor.
    #[must_use]
    pub const fn new(depth: usize) -> Self {
        Self { depth }
    }

    /// Returns the configured depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Resolves the caller tag from `stack`.
    ///
    /// Returns `None` when the stack is shallower than the configured depth or
    /// the frame there carries no usable scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{CallStack, CallerResolver};
    ///
    /// let stack = CallStack::from_symbols([
    ///     "logging::logger::Logger::resolve_tag",
    ///     "app::sync::Worker::run::{{closure}}",
    /// ]);
    /// assert_eq!(
    ///     CallerResolver::new(1).resolve(&stack).as_deref(),
    ///     Some("Worker$run")
    /// );
    /// assert_eq!(CallerResolver::new(2).resolve(&stack), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, stack: &CallStack) -> Option<String> {
        stack
            .frame(self.depth)
            .and_then(|frame| caller_name(frame.symbol()))
    }
}

impl Default for CallerResolver {
    fn default() -> Self {
        Self::new(FORWARDING_DEPTH)
    }
}

/// Formats a demangled symbol as `<ScopeName>$<InvocationSiteName>`.
///
/// Trailing closure and async markers are removed first so that a closure
/// reports the function that defines it. The scope is shortened to its final
/// unqualified segment; for trait methods the implementing type is used.
#[must_use]
pub fn caller_name(symbol: &str) -> Option<String> {
    let logical = strip_synthetic_suffix(symbol);
    let (scope, site) = split_last_segment(logical)?;
    let scope = short_scope(scope);
    let site = without_generics(site);
    if scope.is_empty() || site.is_empty() {
        return None;
    }
    Some(format!("{scope}${site}"))
}

/// Removes the trailing run of compiler-generated closure/async markers.
#[must_use]
pub fn strip_synthetic_suffix(symbol: &str) -> &str {
    match SYNTHETIC_SUFFIX.find(symbol) {
        Some(found) => &symbol[..found.start()],
        None => symbol,
    }
}

/// Splits `path` at its last `::` that is not nested inside `<...>`.
///
/// The `::` opening turbofish arguments (`f::<T>`) is not a separator, and the
/// `>` of a `->` return arrow closes nothing.
fn split_last_segment(path: &str) -> Option<(&str, &str)> {
    let bytes = path.as_bytes();
    let mut depth = 0usize;
    let mut split = None;
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'<' => depth += 1,
            b'>' if is_arrow(bytes, index) => {}
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(index + 1) == Some(&b':') => {
                if bytes.get(index + 2) != Some(&b'<') {
                    split = Some(index);
                }
                index += 1;
            }
            _ => {}
        }
        index += 1;
    }
    split.map(|at| (&path[..at], &path[at + 2..]))
}

fn is_arrow(bytes: &[u8], index: usize) -> bool {
    index > 0 && bytes[index - 1] == b'-'
}

// `<Type as Trait>` splits at the ` as ` outside any brackets.
fn split_qualified(qualified: &str) -> (&str, Option<&str>) {
    let bytes = qualified.as_bytes();
    let mut depth = 0usize;
    for (index, &byte) in bytes.iter().enumerate() {
        match byte {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' if is_arrow(bytes, index) => {}
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b' ' if depth == 0 && qualified[index..].starts_with(" as ") => {
                return (&qualified[..index], Some(&qualified[index + 4..]));
            }
            _ => {}
        }
    }
    (qualified, None)
}

// Function pointers, tuples, slices and trait objects have no type name.
fn is_named_type(ty: &str) -> bool {
    const UNNAMED: [&str; 5] = ["fn(", "fn ", "dyn ", "unsafe ", "extern "];
    ty.starts_with(|c: char| c.is_alphabetic() || c == '_')
        && !UNNAMED.iter().any(|prefix| ty.starts_with(prefix))
}

fn short_scope(scope: &str) -> &str {
    let scope = scope.trim();
    let named = match scope.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        // `<Type as Trait>` or `<Type>`
        Some(qualified) => {
            let (self_type, trait_path) = split_qualified(qualified);
            let self_type = self_type.trim_start_matches(['&', '*']).trim_start();
            let self_type = self_type
                .strip_prefix("mut ")
                .or_else(|| self_type.strip_prefix("const "))
                .unwrap_or(self_type);
            match trait_path {
                Some(trait_path) if !is_named_type(self_type) => trait_path,
                _ => self_type,
            }
        }
        None => scope,
    };
    let last = split_last_segment(named).map_or(named, |(_, last)| last);
    without_generics(last)
}

fn without_generics(segment: &str) -> &str {
    let end = segment.find('<').unwrap_or(segment.len());
    segment[..end].trim_end_matches("::")
}
