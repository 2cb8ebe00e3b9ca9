//! Property-based tests for structure and tagged patterns.
//!
//! Checks that a structure pattern gives the same answer whether the struct
//! is packed (fields sliced out of one integer) or unpacked (one element per
//! field), and that both agree with matching each field on its own.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use svx_ir::{ExprSyntax, Ident, PatternId, PatternSyntax, Span, StructurePatternMember};
use svx_sema::{BindContext, Compilation, EvalContext, LookupLocation, Pattern, PatternKind};
use svx_types::{ConstantValue, FieldDecl, SvInt, TypeId};

/// One field's sub-pattern.
#[derive(Clone, Debug)]
enum Leaf {
    Wildcard,
    Constant(u8),
    Variable,
}

impl Leaf {
    fn matches(&self, value: u8) -> bool {
        match self {
            Leaf::Wildcard | Leaf::Variable => true,
            Leaf::Constant(c) => *c == value,
        }
    }

    fn syntax(&self, comp: &Compilation, var: &str, at: u32) -> PatternSyntax {
        match self {
            Leaf::Wildcard => PatternSyntax::Wildcard {
                span: Span::new(at, at + 2),
            },
            Leaf::Constant(c) => {
                let span = Span::new(at, at + 3);
                PatternSyntax::Expression {
                    expr: ExprSyntax::int(u64::from(*c), span),
                    span,
                }
            }
            Leaf::Variable => PatternSyntax::Variable {
                name: Ident::new(comp.intern(var), Span::new(at + 1, at + 2)),
                span: Span::new(at, at + 2),
            },
        }
    }
}

fn leaf_strategy() -> impl Strategy<Value = Leaf> {
    prop_oneof![
        Just(Leaf::Wildcard),
        any::<u8>().prop_map(Leaf::Constant),
        Just(Leaf::Variable),
    ]
}

/// `struct [packed] { logic [7:0] hi; logic [7:0] lo; }`
fn pair_type(comp: &mut Compilation, packed: bool) -> TypeId {
    let byte = comp.types_mut().logic_vector(8);
    let fields = [
        FieldDecl::new(comp.intern("hi"), byte, Span::DUMMY),
        FieldDecl::new(comp.intern("lo"), byte, Span::DUMMY),
    ];
    let name = comp.intern("pair");
    comp.types_mut().add_struct(name, packed, &fields)
}

fn byte(value: u8) -> ConstantValue {
    ConstantValue::Integer(SvInt::new(8, u64::from(value), false).unwrap())
}

fn pair_value(packed: bool, hi: u8, lo: u8) -> ConstantValue {
    if packed {
        let bits = (u64::from(hi) << 8) | u64::from(lo);
        ConstantValue::Integer(SvInt::new(16, bits, false).unwrap())
    } else {
        ConstantValue::Unpacked(vec![byte(hi), byte(lo)])
    }
}

/// Bind `'{hi, lo}` against the pair type. Fails the case on any diagnostic.
fn bind_pair(comp: &mut Compilation, target: TypeId, hi: &Leaf, lo: &Leaf) -> PatternId {
    let members = [(hi, "x", 2), (lo, "y", 10)]
        .into_iter()
        .map(|(leaf, var, at)| {
            let pattern = leaf.syntax(comp, var, at);
            StructurePatternMember::Ordered {
                span: pattern.span(),
                pattern,
            }
        })
        .collect();
    let syntax = PatternSyntax::Structure {
        members,
        span: Span::new(0, 20),
    };

    let root = comp.root();
    let id = BindContext::new(comp, LookupLocation::end_of(root)).bind_pattern(&syntax, target);
    assert!(comp.take_diagnostics().is_empty());
    id
}

/// Evaluate the pair pattern, returning the result and the value bound to
/// the `hi` variable, if any.
fn match_pair(packed: bool, hi: &Leaf, lo: &Leaf, a: u8, b: u8) -> (ConstantValue, Option<ConstantValue>) {
    let mut comp = Compilation::default();
    let target = pair_type(&mut comp, packed);
    let id = bind_pair(&mut comp, target, hi, lo);

    let mut ctx = EvalContext::new(&comp);
    let result = Pattern::eval(&mut ctx, id, &pair_value(packed, a, b));

    let PatternKind::Structure { patterns } = &comp.ast().pattern(id).kind else {
        panic!("pair pattern did not bind");
    };
    let bound_hi = match comp.ast().pattern(patterns[0].pattern).kind {
        PatternKind::Variable { var } => ctx.find_local(var).cloned(),
        _ => None,
    };
    (result, bound_hi)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Packed and unpacked layouts agree with matching each field separately.
    #[test]
    fn packed_and_unpacked_agree(
        hi in leaf_strategy(),
        lo in leaf_strategy(),
        a in any::<u8>(),
        b in any::<u8>(),
    ) {
        let (unpacked, _) = match_pair(false, &hi, &lo, a, b);
        let (packed, _) = match_pair(true, &hi, &lo, a, b);
        let expected = ConstantValue::logic(hi.matches(a) && lo.matches(b));

        prop_assert_eq!(&unpacked, &expected);
        prop_assert_eq!(&packed, &expected);
    }

    /// A variable in the first field sees that field's value in both layouts.
    #[test]
    fn variable_binds_field_value(lo in leaf_strategy(), a in any::<u8>(), b in any::<u8>()) {
        for packed in [false, true] {
            let (result, bound) = match_pair(packed, &Leaf::Variable, &lo, a, b);
            prop_assert_eq!(result.is_true(), lo.matches(b));
            prop_assert_eq!(bound, Some(byte(a)));
        }
    }

    /// A tagged pattern matches exactly when the active member is the named one.
    #[test]
    fn tagged_matches_only_active_member(named in 0u32..3, active in 0u32..3, payload in any::<u8>()) {
        let mut comp = Compilation::default();
        let byte_type = comp.types_mut().logic_vector(8);
        let members = ["A", "B", "C"];
        let fields: Vec<_> = members
            .iter()
            .map(|m| FieldDecl::new(comp.intern(m), byte_type, Span::DUMMY))
            .collect();
        let name = comp.intern("u");
        let target = comp.types_mut().add_union(name, true, false, &fields);

        let member = members[usize::try_from(named).unwrap()];
        let syntax = PatternSyntax::Tagged {
            member: Ident::new(comp.intern(member), Span::new(7, 8)),
            pattern: Some(Box::new(PatternSyntax::Wildcard { span: Span::new(9, 11) })),
            span: Span::new(0, 11),
        };
        let root = comp.root();
        let id = BindContext::new(&mut comp, LookupLocation::end_of(root)).bind_pattern(&syntax, target);
        prop_assert!(comp.take_diagnostics().is_empty());

        let mut ctx = EvalContext::new(&comp);
        let value = ConstantValue::tagged(active, byte(payload));
        prop_assert_eq!(Pattern::eval(&mut ctx, id, &value), ConstantValue::logic(named == active));
    }
}
