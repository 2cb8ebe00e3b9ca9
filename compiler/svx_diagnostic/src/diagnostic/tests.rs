use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builder_keeps_labels_in_order() {
    let diag = Diagnostic::new(ErrorCode::E2004)
        .with_message("redefinition of 'x'")
        .with_label(Span::new(10, 11), "redefined here")
        .with_declared_here(Span::new(2, 3))
        .with_note("pattern variables share one namespace");

    assert_eq!(diag.code, ErrorCode::E2004);
    assert!(diag.is_error());
    assert_eq!(diag.primary_span(), Some(Span::new(10, 11)));
    let related: Vec<_> = diag.secondary_labels().map(|l| l.span).collect();
    assert_eq!(related, vec![Span::new(2, 3)]);
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn primary_span_skips_related_labels() {
    let diag = Diagnostic::new(ErrorCode::E5007)
        .with_secondary_label(Span::new(1, 2), "referenced here")
        .with_label(Span::new(8, 9), "written here");
    assert_eq!(diag.primary_span(), Some(Span::new(8, 9)));

    assert_eq!(Diagnostic::new(ErrorCode::E9001).primary_span(), None);
}

#[test]
fn warning_codes_produce_warnings() {
    let diag = Diagnostic::new(ErrorCode::W5001);
    assert_eq!(diag.severity, Severity::Warning);
    assert!(!diag.is_error());
}

#[test]
fn display() {
    let diag = Diagnostic::new(ErrorCode::E4001)
        .with_message("too few arguments to '$urandom_range'")
        .with_label(Span::new(0, 5), "here")
        .with_declared_here(Span::new(7, 9));

    assert_eq!(
        diag.to_string(),
        "error[E4001]: too few arguments to '$urandom_range'\n  at 0..5: here\n  see 7..9: declared here"
    );
}
