use super::*;

/// Stand-in for a chain of nested tagged patterns.
enum Nested {
    Leaf(u32),
    Tagged(Box<Nested>),
}

fn build(depth: usize) -> Nested {
    let mut node = Nested::Leaf(7);
    for _ in 0..depth {
        node = Nested::Tagged(Box::new(node));
    }
    node
}

fn depth_of(node: &Nested) -> usize {
    ensure_sufficient_stack(|| match node {
        Nested::Leaf(_) => 0,
        Nested::Tagged(inner) => depth_of(inner) + 1,
    })
}

fn leaf_of(node: &Nested) -> u32 {
    ensure_sufficient_stack(|| match node {
        Nested::Leaf(v) => *v,
        Nested::Tagged(inner) => leaf_of(inner),
    })
}

#[test]
fn shallow_nesting() {
    assert_eq!(depth_of(&build(3)), 3);
}

#[test]
fn deep_nesting_does_not_overflow() {
    let tree = build(200_000);
    assert_eq!(depth_of(&tree), 200_000);
    assert_eq!(leaf_of(&tree), 7);
    // Drop iteratively; the default recursive drop would overflow.
    let mut node = tree;
    while let Nested::Tagged(inner) = node {
        node = *inner;
    }
}

#[test]
fn passes_result_through() {
    let r: Result<u8, &str> = ensure_sufficient_stack(|| Err("bad pattern"));
    assert_eq!(r, Err("bad pattern"));
}
