//! Integration tests for the process-wide functions and macros.
//!
//! One recording logger is installed for the whole binary. Tests run in
//! parallel, so each one filters the shared records by a tag unique to it.
//! Tests that expect their own name as the tag are `#[inline(never)]`.

use std::io;
use std::sync::OnceLock;

use logshim::{InitError, Logger, LoggerConfig, NO_TAG, Severity};
use test_support::{Recorded, RecordingSink};

fn sink() -> &'static RecordingSink {
    static SINK: OnceLock<RecordingSink> = OnceLock::new();
    SINK.get_or_init(|| {
        let sink = RecordingSink::new();
        logshim::install(Logger::new(sink.clone())).expect("first install");
        sink
    })
}

fn tagged(tag: &str) -> Vec<Recorded> {
    sink()
        .records()
        .into_iter()
        .filter(|record| record.tag == tag)
        .collect()
}

// ============================================================================
// Explicit Dispatch
// ============================================================================

/// `log(Info, "Net", "a"*3500)` yields two records in order.
#[test]
fn log_splits_long_message() {
    sink();
    logshim::log(Severity::Info, "Net", &"a".repeat(3500));
    assert_eq!(
        tagged("Net"),
        vec![
            Recorded::new(Severity::Info, "Net", &"a".repeat(3000), false),
            Recorded::new(Severity::Info, "Net", &"a".repeat(500), true),
        ]
    );
}

/// A second installation is refused.
#[test]
fn second_install_is_rejected() {
    sink();
    let again = logshim::install(Logger::new(RecordingSink::new()));
    assert!(matches!(again, Err(InitError::AlreadyInitialized)));
    let init = logshim::init(LoggerConfig::default());
    assert!(matches!(init, Err(InitError::AlreadyInitialized)));
}

// ============================================================================
// Caller-Derived Tags
// ============================================================================

/// The free functions resolve the test function as the caller.
#[test]
#[inline(never)]
fn free_functions_resolve_caller() {
    sink();
    logshim::verbose(NO_TAG, || "v");
    logshim::debug(NO_TAG, || "d");
    logshim::info(NO_TAG, || "i");
    logshim::warn(NO_TAG, || "w", None);
    logshim::error(NO_TAG, || "e", None);
    logshim::wtf(NO_TAG, || "f", None);

    let records = tagged("global_entry_points$free_functions_resolve_caller");
    let severities: Vec<Severity> = records.iter().map(|r| r.severity).collect();
    assert_eq!(
        severities,
        [
            Severity::Verbose,
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Error,
        ]
    );
}

/// Macros expand in place, so the caller is the function using them.
#[test]
#[inline(never)]
fn macros_resolve_caller() {
    sink();
    let count = 2;
    logshim::info!("{count} widgets");
    logshim::warn!("low on {}", "space");
    let messages: Vec<String> = tagged("global_entry_points$macros_resolve_caller")
        .into_iter()
        .map(|r| r.message)
        .collect();
    assert_eq!(messages, ["2 widgets", "low on space"]);
}

struct Importer;

impl Importer {
    #[inline(never)]
    fn run(&self) {
        logshim::debug!("importing");
    }
}

/// A method using a macro is tagged with its type, even when the macro is its
/// last statement.
#[test]
fn macro_in_method_uses_type_scope() {
    sink();
    Importer.run();
    assert_eq!(tagged("Importer$run").len(), 1);
}

// ============================================================================
// Macro Arms
// ============================================================================

/// `tag:` overrides resolution for every macro.
#[test]
fn macros_accept_explicit_tag() {
    sink();
    logshim::verbose!(tag: "MacroTag", "v{}", 1);
    logshim::debug!(tag: "MacroTag", "d{}", 2);
    logshim::info!(tag: "MacroTag", "i{}", 3);
    logshim::warn!(tag: "MacroTag", "w{}", 4);
    logshim::error!(tag: "MacroTag", "e{}", 5);
    logshim::wtf!(tag: "MacroTag", "f{}", 6);
    let messages: Vec<String> = tagged("MacroTag").into_iter().map(|r| r.message).collect();
    assert_eq!(messages, ["v1", "d2", "i3", "w4", "e5", "f6"]);
}

/// `err:` appends the rendered error; without a message the error stands alone.
#[test]
fn error_macros_accept_errors() {
    sink();
    let error = io::Error::other("disk full");
    logshim::warn!(tag: "ErrTag", err: &error, "save {}", "deferred");
    logshim::error!(tag: "ErrTag", err: &error);
    logshim::wtf!(tag: "ErrTag", err: &error, "impossible");
    let messages: Vec<String> = tagged("ErrTag").into_iter().map(|r| r.message).collect();
    assert_eq!(
        messages,
        ["save deferred\ndisk full", "disk full", "impossible\ndisk full"]
    );
}

/// `err:` without `tag:` still resolves the caller.
#[test]
#[inline(never)]
fn error_macro_without_tag_resolves_caller() {
    sink();
    let error = io::Error::other("refused");
    logshim::error!(err: &error, "connect failed");
    logshim::warn!(err: &error);
    let messages: Vec<String> = tagged("global_entry_points$error_macro_without_tag_resolves_caller")
        .into_iter()
        .map(|r| r.message)
        .collect();
    assert_eq!(messages, ["connect failed\nrefused", "refused"]);
}

/// An unreachable-host error adds nothing to the message.
#[test]
fn unreachable_host_is_not_rendered() {
    sink();
    let error = io::Error::from(io::ErrorKind::HostUnreachable);
    logshim::warn!(tag: "Offline", err: &error, "sync skipped");
    let messages: Vec<String> = tagged("Offline").into_iter().map(|r| r.message).collect();
    assert_eq!(messages, ["sync skipped"]);
}

#[inline(never)]
fn report_progress(done: usize) {
    logshim::info!("{done} done");
}

#[inline(never)]
fn report_through_function(done: usize) {
    logshim::info(NO_TAG, || format!("{done} via fn"));
    logshim::keep_frame();
}

/// Functions whose last statement logs keep their own frame.
#[test]
fn tail_position_callers_resolve_to_themselves() {
    sink();
    report_progress(3);
    report_through_function(4);
    let from_macro: Vec<String> = tagged("global_entry_points$report_progress")
        .into_iter()
        .map(|r| r.message)
        .collect();
    let from_fn: Vec<String> = tagged("global_entry_points$report_through_function")
        .into_iter()
        .map(|r| r.message)
        .collect();
    assert_eq!(from_macro, ["3 done"]);
    assert_eq!(from_fn, ["4 via fn"]);
}
