//! Integration tests for caller-derived tags.
//!
//! Each test logs without a tag from a different kind of call site and checks
//! the `Scope$site` tag the logger resolved from the stack. The workspace test
//! profile is optimized, so these run against the frame layout that ships.
//! Helpers and the tests that expect their own name are `#[inline(never)]`,
//! and helpers that log as their last statement call `keep_frame`.

use logging::{DEFAULT_TAG, FORWARDING_DEPTH, Logger, NO_TAG, keep_frame};
use test_support::RecordingSink;

fn recording() -> (RecordingSink, Logger) {
    let sink = RecordingSink::new();
    let logger = Logger::new(sink.clone());
    (sink, logger)
}

fn only_tag(sink: &RecordingSink) -> String {
    let records = sink.records();
    assert_eq!(records.len(), 1);
    records[0].tag.clone()
}

mod net {
    use super::{Logger, NO_TAG, keep_frame};

    #[inline(never)]
    pub fn connect(logger: &Logger) {
        logger.info(NO_TAG, || "connecting");
        keep_frame();
    }
}

struct Client;

impl Client {
    #[inline(never)]
    fn fetch(&self, logger: &Logger) {
        logger.debug(NO_TAG, || "fetching");
        keep_frame();
    }
}

trait Store {
    fn flush(&self, logger: &Logger);
}

struct Disk;

impl Store for Disk {
    #[inline(never)]
    fn flush(&self, logger: &Logger) {
        logger.warn(NO_TAG, || "flush slow", None);
        keep_frame();
    }
}

#[inline(never)]
fn log_through_wrapper(logger: &Logger, message: &str) {
    logger.info(NO_TAG, || message);
    keep_frame();
}

// ============================================================================
// Call Site Shapes
// ============================================================================

/// A free function reports its module as the scope.
#[test]
fn free_function_uses_module_scope() {
    let (sink, logger) = recording();
    net::connect(&logger);
    assert_eq!(only_tag(&sink), "net$connect");
}

/// An inherent method reports its type.
#[test]
fn inherent_method_uses_type_scope() {
    let (sink, logger) = recording();
    Client.fetch(&logger);
    assert_eq!(only_tag(&sink), "Client$fetch");
}

/// A trait method reports the implementing type.
#[test]
fn trait_method_uses_implementing_type() {
    let (sink, logger) = recording();
    Disk.flush(&logger);
    assert_eq!(only_tag(&sink), "Disk$flush");
}

/// A closure reports the function that defines it, without closure markers.
#[test]
#[inline(never)]
fn closure_reports_enclosing_function() {
    let (sink, logger) = recording();
    let log = || logger.error(NO_TAG, || "from closure", None);
    log();
    assert_eq!(only_tag(&sink), "caller_resolution$closure_reports_enclosing_function");
}

/// Each severity entry point resolves the same caller.
#[test]
#[inline(never)]
fn every_entry_point_resolves_the_caller() {
    let (sink, logger) = recording();
    logger.verbose(NO_TAG, || "v");
    logger.debug(NO_TAG, || "d");
    logger.info(NO_TAG, || "i");
    logger.warn(NO_TAG, || "w", None);
    logger.error(NO_TAG, || "e", None);
    logger.wtf(NO_TAG, || "f", None);
    let tags: Vec<String> = sink.records().into_iter().map(|r| r.tag).collect();
    assert_eq!(tags.len(), 6);
    assert!(
        tags.iter()
            .all(|tag| tag == "caller_resolution$every_entry_point_resolves_the_caller"),
        "{tags:?}"
    );
}

// ============================================================================
// Depth Adjustment
// ============================================================================

/// Without adjustment, a wrapper is reported as the caller.
#[test]
fn wrapper_is_reported_at_default_depth() {
    let (sink, logger) = recording();
    log_through_wrapper(&logger, "wrapped");
    assert_eq!(only_tag(&sink), "caller_resolution$log_through_wrapper");
}

/// Raising the depth by one skips the wrapper frame.
#[test]
#[inline(never)]
fn extra_depth_skips_wrapper() {
    let sink = RecordingSink::new();
    let logger = Logger::new(sink.clone()).with_caller_depth(FORWARDING_DEPTH + 1);
    log_through_wrapper(&logger, "wrapped");
    assert_eq!(only_tag(&sink), "caller_resolution$extra_depth_skips_wrapper");
}

/// A depth past the bottom of the stack falls back to the default tag.
#[test]
fn unreachable_depth_uses_default_tag() {
    let sink = RecordingSink::new();
    let logger = Logger::new(sink.clone()).with_caller_depth(usize::MAX);
    logger.info(NO_TAG, || "lost");
    assert_eq!(only_tag(&sink), DEFAULT_TAG);
}

/// Explicit tags bypass resolution.
#[test]
fn explicit_tag_wins() {
    let (sink, logger) = recording();
    logger.info(Some(|| "Explicit"), || "tagged");
    assert_eq!(only_tag(&sink), "Explicit");
}

// ============================================================================
// Tail Position
// ============================================================================

#[inline(never)]
fn log_as_last_statement(logger: &Logger) {
    logger.info(NO_TAG, || "last");
    keep_frame();
}

#[inline(never)]
fn log_through_tail_call(logger: &Logger) {
    log_as_last_statement(logger);
    keep_frame();
}

/// A caller whose only statement is the log call still reports itself, and the
/// caller above it is found one frame further out.
#[test]
fn caller_logging_in_tail_position_keeps_its_frame() {
    let (sink, logger) = recording();
    log_as_last_statement(&logger);
    assert_eq!(only_tag(&sink), "caller_resolution$log_as_last_statement");

    let sink = RecordingSink::new();
    let logger = Logger::new(sink.clone()).with_caller_depth(FORWARDING_DEPTH + 1);
    log_through_tail_call(&logger);
    assert_eq!(only_tag(&sink), "caller_resolution$log_through_tail_call");
}
