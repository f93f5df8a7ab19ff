//! src/macros.rs
//! `format!`-style front ends for the per-severity functions.
//!
//! Each macro accepts an optional leading `tag: <expr>,`; warn/error/wtf also
//! accept `err: <expr>` (a reference to a `std::error::Error + 'static`),
//! optionally without a message. Arguments are only evaluated when logging is
//! enabled. Every expansion ends with [`keep_frame`](crate::keep_frame) so the
//! calling function stays on the stack for tag resolution.

/// Logs at Verbose.
///
/// ```
/// logshim::verbose!("cache has {} entries", 3);
/// logshim::verbose!(tag: "Cache", "evicted {}", "k1");
/// ```
#[macro_export]
macro_rules! verbose {
    (tag: $tag:expr, $($arg:tt)+) => {{
        $crate::verbose(
            ::core::option::Option::Some(|| $tag),
            || ::std::format!($($arg)+),
        );
        $crate::keep_frame();
    }};
    ($($arg:tt)+) => {{
        $crate::verbose($crate::NO_TAG, || ::std::format!($($arg)+));
        $crate::keep_frame();
    }};
}

/// Logs at Debug.
///
/// ```
/// logshim::debug!("retrying in {}ms", 250);
/// ```
#[macro_export]
macro_rules! debug {
    (tag: $tag:expr, $($arg:tt)+) => {{
        $crate::debug(
            ::core::option::Option::Some(|| $tag),
            || ::std::format!($($arg)+),
        );
        $crate::keep_frame();
    }};
    ($($arg:tt)+) => {{
        $crate::debug($crate::NO_TAG, || ::std::format!($($arg)+));
        $crate::keep_frame();
    }};
}

/// Logs at Info.
///
/// ```
/// logshim::info!(tag: "Net", "connected to {}", "example.org");
/// ```
#[macro_export]
macro_rules! info {
    (tag: $tag:expr, $($arg:tt)+) => {{
        $crate::info(
            ::core::option::Option::Some(|| $tag),
            || ::std::format!($($arg)+),
        );
        $crate::keep_frame();
    }};
    ($($arg:tt)+) => {{
        $crate::info($crate::NO_TAG, || ::std::format!($($arg)+));
        $crate::keep_frame();
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_with_error {
    ($func:ident, tag: $tag:expr, err: $err:expr $(,)?) => {
        $crate::$func(
            ::core::option::Option::Some(|| $tag),
            ::std::string::String::new,
            ::core::option::Option::Some($err),
        )
    };
    ($func:ident, tag: $tag:expr, err: $err:expr, $($arg:tt)+) => {
        $crate::$func(
            ::core::option::Option::Some(|| $tag),
            || ::std::format!($($arg)+),
            ::core::option::Option::Some($err),
        )
    };
    ($func:ident, tag: $tag:expr, $($arg:tt)+) => {
        $crate::$func(
            ::core::option::Option::Some(|| $tag),
            || ::std::format!($($arg)+),
            ::core::option::Option::None,
        )
    };
    ($func:ident, err: $err:expr $(,)?) => {
        $crate::$func(
            $crate::NO_TAG,
            ::std::string::String::new,
            ::core::option::Option::Some($err),
        )
    };
    ($func:ident, err: $err:expr, $($arg:tt)+) => {
        $crate::$func(
            $crate::NO_TAG,
            || ::std::format!($($arg)+),
            ::core::option::Option::Some($err),
        )
    };
    ($func:ident, $($arg:tt)+) => {
        $crate::$func(
            $crate::NO_TAG,
            || ::std::format!($($arg)+),
            ::core::option::Option::None,
        )
    };
}

/// Logs at Warn, optionally appending an error.
///
/// ```
/// let error = std::io::Error::other("timed out");
/// logshim::warn!(err: &error, "sync deferred");
/// logshim::warn!(tag: "Sync", "{} items pending", 4);
/// ```
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {{
        $crate::__log_with_error!(warn, $($arg)+);
        $crate::keep_frame();
    }};
}

/// Logs at Error, optionally appending an error.
///
/// ```
/// let error = std::io::Error::other("disk full");
/// logshim::error!(tag: "Store", err: &error, "save failed");
/// logshim::error!(err: &error);
/// ```
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {{
        $crate::__log_with_error!(error, $($arg)+);
        $crate::keep_frame();
    }};
}

/// Reports a condition that should never happen. Logs at Error.
///
/// ```
/// logshim::wtf!("state {} unreachable", 7);
/// ```
#[macro_export]
macro_rules! wtf {
    ($($arg:tt)+) => {{
        $crate::__log_with_error!(wtf, $($arg)+);
        $crate::keep_frame();
    }};
}
