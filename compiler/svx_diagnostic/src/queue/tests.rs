use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;
use svx_ir::Span;

fn err(code: ErrorCode, start: u32) -> Diagnostic {
    Diagnostic::new(code)
        .with_message(format!("{code} at {start}"))
        .with_label(Span::new(start, start + 1), "here")
}

#[test]
fn flush_sorts_by_position() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.add(err(ErrorCode::E3003, 20));
    queue.add(err(ErrorCode::E2004, 5));
    queue.add(err(ErrorCode::E3001, 12));

    let codes: Vec<_> = queue.flush().into_iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2004, ErrorCode::E3001, ErrorCode::E3003]);
    assert!(queue.is_empty());
    assert_eq!(queue.error_count(), 0);
}

#[test]
fn error_limit_drops_excess_errors() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: false,
    });
    assert!(queue.add(err(ErrorCode::E2002, 0)));
    assert!(queue.add(err(ErrorCode::E2002, 4)));
    assert!(!queue.add(err(ErrorCode::E2002, 8)));
    assert!(queue.limit_reached());
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn warnings_bypass_error_limit() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 1,
        deduplicate: false,
    });
    queue.add(err(ErrorCode::E2002, 0));
    assert!(queue.add(err(ErrorCode::W5001, 3)));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.error_count(), 1);
}

#[test]
fn deduplicates_identical_diagnostics() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(err(ErrorCode::E3004, 3)));
    assert!(!queue.add(err(ErrorCode::E3004, 3)));
    assert!(queue.add(err(ErrorCode::E3004, 9)));
    assert_eq!(queue.len(), 2);
}

#[test]
fn unlimited_keeps_duplicates() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.add(err(ErrorCode::E3004, 3));
    queue.add(err(ErrorCode::E3004, 3));
    assert_eq!(queue.len(), 2);
}

#[test]
fn has_errors_requires_an_error() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.has_errors().is_none());
    queue.add(err(ErrorCode::W5001, 0));
    assert!(queue.has_errors().is_none());
    let _proof = queue.emit_error(err(ErrorCode::E5003, 1));
    assert!(queue.has_errors().is_some());
}

#[test]
fn diagnostics_without_span_sort_last() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.add(Diagnostic::new(ErrorCode::E9001).with_message("no location"));
    queue.add(err(ErrorCode::E2002, 40));

    let codes: Vec<_> = queue.flush().into_iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2002, ErrorCode::E9001]);
}

#[test]
fn iter_keeps_report_order() {
    let mut queue = DiagnosticQueue::new();
    queue.add(err(ErrorCode::E3003, 20));
    queue.add(err(ErrorCode::E2004, 5));

    let codes: Vec<_> = (&queue).into_iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E3003, ErrorCode::E2004]);
    assert_eq!(queue.len(), 2);
}
