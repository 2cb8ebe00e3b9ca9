//! Pattern evaluation.
//!
//! Every valid pattern evaluates to a one-bit logical value. A `Null` result
//! means evaluation itself failed and is passed up unchanged, so callers can
//! tell "did not match" from "could not tell".

use std::borrow::Cow;

use svx_ir::PatternId;
use svx_stack::ensure_sufficient_stack;
use svx_types::{ConstantValue, FieldSymbol, SvInt, TypeArena};

use super::{FieldPattern, Pattern, PatternKind};
use crate::errors;
use crate::eval::EvalContext;

/// Extracts field values from one representation of a struct value.
trait FieldAccessor {
    fn field_value(&self, types: &TypeArena, field: &FieldSymbol) -> Option<Cow<'_, ConstantValue>>;
}

/// Unpacked structs hold one element per field, indexed by offset.
impl FieldAccessor for [ConstantValue] {
    fn field_value(&self, _: &TypeArena, field: &FieldSymbol) -> Option<Cow<'_, ConstantValue>> {
        self.get(field.offset as usize).map(Cow::Borrowed)
    }
}

/// Packed structs are one integer; fields are bit slices above their offset.
impl FieldAccessor for SvInt {
    fn field_value(&self, types: &TypeArena, field: &FieldSymbol) -> Option<Cow<'_, ConstantValue>> {
        let width = types.bit_width(field.ty)?;
        let msb = width.checked_add(field.offset)?.checked_sub(1)?;
        let slice = self.slice(msb, field.offset).ok()?;
        Some(Cow::Owned(ConstantValue::Integer(slice)))
    }
}

impl Pattern {
    /// Match `value` against pattern `id`, binding pattern variables into the
    /// current frame of `ctx`.
    pub fn eval(ctx: &mut EvalContext<'_>, id: PatternId, value: &ConstantValue) -> ConstantValue {
        ensure_sufficient_stack(|| eval_pattern(ctx, id, value))
    }
}

fn eval_pattern(ctx: &mut EvalContext<'_>, id: PatternId, value: &ConstantValue) -> ConstantValue {
    let comp = ctx.comp();
    let pattern = comp.ast().pattern(id);

    match &pattern.kind {
        PatternKind::Invalid { .. } => ConstantValue::Null,
        PatternKind::Wildcard => ConstantValue::logic(true),
        PatternKind::Constant { expr } => match &comp.ast().expr(*expr).constant {
            Some(constant) => ConstantValue::logic(constant == value),
            None => {
                ctx.add_diag(errors::internal_error(
                    pattern.span,
                    "constant pattern was never folded",
                ));
                ConstantValue::Null
            }
        },
        PatternKind::Variable { var } => {
            ctx.create_local(*var, value.clone());
            ConstantValue::logic(true)
        }
        PatternKind::Tagged {
            member,
            value: nested,
        } => {
            if value.bad() {
                return ConstantValue::Null;
            }
            let Some(union_value) = value.union_value() else {
                ctx.add_diag(errors::internal_error(
                    pattern.span,
                    "tagged pattern matched against a value that is not a tagged union",
                ));
                return ConstantValue::Null;
            };

            let offset = comp.types().field(*member).offset;
            if union_value.active_member != Some(offset) {
                tracing::trace!(offset, active = ?union_value.active_member, "tag mismatch");
                return ConstantValue::logic(false);
            }
            match nested {
                Some(nested) => Pattern::eval(ctx, *nested, &union_value.value),
                None => ConstantValue::logic(true),
            }
        }
        PatternKind::Structure { patterns } => {
            if value.bad() {
                return ConstantValue::Null;
            }
            if let Some(elems) = value.elements() {
                eval_fields(ctx, patterns, elems)
            } else if let Some(int) = value.integer() {
                eval_fields(ctx, patterns, int)
            } else {
                ctx.add_diag(errors::internal_error(
                    pattern.span,
                    "structure pattern matched against a value that is not a struct",
                ));
                ConstantValue::Null
            }
        }
    }
}

/// Match each field in turn, stopping at the first result that is not true.
fn eval_fields<A: FieldAccessor + ?Sized>(
    ctx: &mut EvalContext<'_>,
    patterns: &[FieldPattern],
    value: &A,
) -> ConstantValue {
    let types = ctx.comp().types();
    for fp in patterns {
        let field = types.field(fp.field);
        let Some(field_value) = value.field_value(types, field) else {
            let span = ctx.comp().ast().pattern(fp.pattern).span;
            ctx.add_diag(errors::internal_error(span, "struct value has no element for field"));
            return ConstantValue::Null;
        };

        let result = Pattern::eval(ctx, fp.pattern, &field_value);
        if !result.is_true() {
            tracing::trace!(field = field.offset, "structure pattern stopped");
            return result;
        }
    }
    ConstantValue::logic(true)
}
