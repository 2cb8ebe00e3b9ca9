use super::*;
use pretty_assertions::assert_eq;

#[test]
fn merge_covers_both() {
    let merged = Span::new(4, 8).merge(Span::new(1, 5));
    assert_eq!(merged, Span::new(1, 8));
    assert_eq!(merged.len(), 7);
}

#[test]
fn merge_with_point_location() {
    // A type mismatch covers from the assignment point to the end of the value.
    let value = Span::new(12, 20);
    assert_eq!(Span::new(3, 9).location().merge(value), Span::new(3, 20));
}

#[test]
fn location_is_zero_length_at_start() {
    let loc = Span::new(10, 20).location();
    assert!(loc.is_empty());
    assert_eq!(loc, Span::point(10));
}

#[test]
fn debug_format_is_compact() {
    assert_eq!(format!("{:?}", Span::new(3, 9)), "3..9");
}
