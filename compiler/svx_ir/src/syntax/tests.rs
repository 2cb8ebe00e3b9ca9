use super::*;
use pretty_assertions::assert_eq;

fn ident(raw: u32, start: u32, end: u32) -> Ident {
    Ident::new(Name::from_raw(raw), Span::new(start, end))
}

#[test]
fn dotted_name_span_covers_all_segments() {
    let name = NameSyntax::dotted(vec![ident(1, 4, 7), ident(2, 8, 14)]);
    assert_eq!(name.span, Span::new(4, 14));
    assert!(!name.is_simple());
    assert_eq!(name.last(), Some(ident(2, 8, 14)));
}

#[test]
fn missing_ident_uses_empty_name() {
    let id = Ident::missing(Span::point(3));
    assert!(id.is_missing());
    assert_eq!(id.name, Name::EMPTY);
}

#[test]
fn pattern_kind_and_span() {
    let pattern = PatternSyntax::Parenthesized {
        pattern: Box::new(PatternSyntax::Wildcard {
            span: Span::new(1, 3),
        }),
        span: Span::new(0, 4),
    };
    assert_eq!(pattern.kind(), PatternSyntaxKind::Parenthesized);
    assert_eq!(pattern.span(), Span::new(0, 4));
}

#[test]
fn expression_span_of_name() {
    let expr = ExprSyntax::Name(NameSyntax::simple(ident(5, 10, 12)));
    assert_eq!(expr.span(), Span::new(10, 12));
    assert_eq!(ExprSyntax::int(7, Span::new(0, 1)).span(), Span::new(0, 1));
}
