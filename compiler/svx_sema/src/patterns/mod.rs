//! Patterns for `matches` constructs.
//!
//! Binding turns [`PatternSyntax`] into a [`Pattern`] tree checked against a
//! target type. Failed binds still produce a node: `PatternKind::Invalid`,
//! wrapping whatever partial pattern existed, so consumers can walk it and
//! diagnostics are never lost.
//!
//! Variable patterns declare [`PatternVar`]s. The variables of one top-level
//! bind are collected in a [`VarMap`], which rejects duplicates and is then
//! published to the [`BindContext`] so guard expressions and match bodies
//! can refer to them.
//!
//! Evaluation lives in [`eval`](self::eval).

mod eval;

use smallvec::SmallVec;
use svx_ir::{
    ExprId, ExprSyntax, Ident, Name, PatternId, PatternSyntax, PatternSyntaxKind, PatternVarId,
    Span, StructurePatternMember,
};
use svx_stack::ensure_sufficient_stack;
use svx_types::{FieldRef, TypeId};

use crate::binding::BindContext;
use crate::errors;

/// A variable declared by a variable pattern.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PatternVar {
    pub name: Name,
    pub span: Span,
    pub ty: TypeId,
}

/// One `(field, pattern)` pair of a structure pattern.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FieldPattern {
    pub field: FieldRef,
    pub pattern: PatternId,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum PatternKind {
    /// Failed to bind. Never matches.
    Invalid { child: Option<PatternId> },
    /// `.*`
    Wildcard,
    /// A constant expression, already folded.
    Constant { expr: ExprId },
    /// `.name`
    Variable { var: PatternVarId },
    /// `tagged Member [pattern]`
    Tagged {
        member: FieldRef,
        value: Option<PatternId>,
    },
    /// `'{ ... }`, in field declaration order for ordered members and in
    /// source order for named ones.
    Structure { patterns: Vec<FieldPattern> },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
    /// Shape of the syntax this was bound from. `None` for synthesized
    /// patterns.
    pub syntax: Option<PatternSyntaxKind>,
}

impl Pattern {
    pub fn new(kind: PatternKind, span: Span) -> Self {
        Pattern {
            kind,
            span,
            syntax: None,
        }
    }

    #[inline]
    pub fn bad(&self) -> bool {
        matches!(self.kind, PatternKind::Invalid { .. })
    }
}

/// Variables declared while binding one top-level pattern.
#[derive(Clone, Debug, Default)]
pub struct VarMap {
    vars: SmallVec<[(Name, PatternVarId); 4]>,
}

impl VarMap {
    pub fn new() -> Self {
        VarMap::default()
    }

    pub fn get(&self, name: Name) -> Option<PatternVarId> {
        self.vars.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    /// Add `var` under `name`. Returns the earlier variable if the name is
    /// already taken.
    pub fn insert(&mut self, name: Name, var: PatternVarId) -> Result<(), PatternVarId> {
        if let Some(prev) = self.get(name) {
            return Err(prev);
        }
        self.vars.push((name, var));
        Ok(())
    }

    /// Declared variables, oldest first.
    pub fn vars(&self) -> impl Iterator<Item = PatternVarId> + '_ {
        self.vars.iter().map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Pattern {
    /// Bind `syntax` against `target`, declaring variables into `var_map`.
    ///
    /// Most callers want [`BindContext::bind_pattern`], which also makes the
    /// declared variables visible.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn bind(
        ctx: &mut BindContext<'_>,
        syntax: &PatternSyntax,
        target: TypeId,
        var_map: &mut VarMap,
    ) -> PatternId {
        ensure_sufficient_stack(|| {
            let id = match syntax {
                PatternSyntax::Parenthesized { pattern, .. } => {
                    return Pattern::bind(ctx, pattern, target, var_map);
                }
                PatternSyntax::Wildcard { span } => {
                    ctx.alloc_pattern(Pattern::new(PatternKind::Wildcard, *span))
                }
                PatternSyntax::Expression { expr, span } => {
                    bind_constant(ctx, expr, target, *span)
                }
                PatternSyntax::Variable { name, span } => {
                    bind_variable(ctx, name.name, name.span, target, var_map, *span)
                }
                PatternSyntax::Tagged {
                    member,
                    pattern,
                    span,
                } => bind_tagged(ctx, *member, pattern.as_deref(), target, var_map, *span),
                PatternSyntax::Structure { members, span } => {
                    bind_structure(ctx, members, target, var_map, *span)
                }
            };
            ctx.comp_mut().ast_mut().pattern_mut(id).syntax = Some(syntax.kind());
            id
        })
    }
}

fn bad_pattern(ctx: &mut BindContext<'_>, child: Option<PatternId>, span: Span) -> PatternId {
    ctx.alloc_pattern(Pattern::new(PatternKind::Invalid { child }, span))
}

fn bind_constant(
    ctx: &mut BindContext<'_>,
    expr: &ExprSyntax,
    target: TypeId,
    span: Span,
) -> PatternId {
    let location = expr.span().location();
    let bound = ctx.bind_rvalue(target, expr, location);
    if ctx.is_bad(bound) || !ctx.eval(bound) {
        tracing::trace!("constant pattern is not a constant");
        return bad_pattern(ctx, None, span);
    }
    ctx.alloc_pattern(Pattern::new(PatternKind::Constant { expr: bound }, span))
}

fn bind_variable(
    ctx: &mut BindContext<'_>,
    name: Name,
    name_span: Span,
    target: TypeId,
    var_map: &mut VarMap,
    span: Span,
) -> PatternId {
    let var = ctx.alloc_pattern_var(PatternVar {
        name,
        span: name_span,
        ty: target,
    });

    if !name.is_empty() {
        if let Err(prev) = var_map.insert(name, var) {
            let prev_span = ctx.comp().ast().pattern_var(prev).span;
            let diag = errors::redefinition(name_span, ctx.comp().name_str(name), prev_span);
            ctx.report(diag);
            return bad_pattern(ctx, None, span);
        }
    }

    ctx.alloc_pattern(Pattern::new(PatternKind::Variable { var }, span))
}

fn bind_tagged(
    ctx: &mut BindContext<'_>,
    member: Ident,
    nested: Option<&PatternSyntax>,
    target: TypeId,
    var_map: &mut VarMap,
    span: Span,
) -> PatternId {
    let types = ctx.comp().types();
    if !types.is_tagged_union(target) {
        if !types.is_error(target) {
            let diag = errors::pattern_tagged_type(span, &ctx.type_name(target));
            ctx.report(diag);
        }
        return bad_pattern(ctx, None, span);
    }

    let Some(field) = types.find_member(target, member.name) else {
        if !member.is_missing() {
            let diag = errors::unknown_member(
                member.span,
                ctx.comp().name_str(member.name),
                &ctx.type_name(target),
            );
            ctx.report(diag);
        }
        return bad_pattern(ctx, None, span);
    };

    let field_type = types.field(field).ty;
    let value = nested.map(|p| Pattern::bind(ctx, p, field_type, var_map));
    let result = ctx.alloc_pattern(Pattern::new(
        PatternKind::Tagged {
            member: field,
            value,
        },
        span,
    ));

    match value {
        Some(v) if ctx.comp().ast().pattern(v).bad() => bad_pattern(ctx, Some(result), span),
        _ => result,
    }
}

fn bind_structure(
    ctx: &mut BindContext<'_>,
    members: &[StructurePatternMember],
    target: TypeId,
    var_map: &mut VarMap,
    span: Span,
) -> PatternId {
    let types = ctx.comp().types();
    let Some(first) = members.first().filter(|_| types.is_struct(target)) else {
        if !types.is_error(target) && !members.is_empty() {
            let diag = errors::pattern_struct_type(span, &ctx.type_name(target));
            ctx.report(diag);
        }
        return bad_pattern(ctx, None, span);
    };

    let mut bad = false;
    let mut patterns = Vec::with_capacity(members.len());

    if first.is_ordered() {
        let fields: SmallVec<[FieldRef; 8]> = types.field_refs(target).collect();
        let mut fields = fields.into_iter();
        for member in members {
            let StructurePatternMember::Ordered { pattern, span: member_span } = member else {
                unreachable!("structure pattern mixes ordered and named members");
            };
            let Some(field) = fields.next() else {
                let diag = errors::pattern_struct_too_many(*member_span, &ctx.type_name(target));
                ctx.report(diag);
                bad = true;
                break;
            };

            let field_type = ctx.comp().types().field(field).ty;
            let pattern = Pattern::bind(ctx, pattern, field_type, var_map);
            bad |= ctx.comp().ast().pattern(pattern).bad();
            patterns.push(FieldPattern { field, pattern });
        }

        if fields.next().is_some() {
            let diag = errors::pattern_struct_too_few(span, &ctx.type_name(target));
            ctx.report(diag);
            bad = true;
        }
    } else {
        for member in members {
            let StructurePatternMember::Named { name, pattern, .. } = member else {
                unreachable!("structure pattern mixes ordered and named members");
            };
            let Some(field) = ctx.comp().types().find_member(target, name.name) else {
                if !name.is_missing() {
                    let diag = errors::unknown_member(
                        name.span,
                        ctx.comp().name_str(name.name),
                        &ctx.type_name(target),
                    );
                    ctx.report(diag);
                }
                bad = true;
                continue;
            };

            let field_type = ctx.comp().types().field(field).ty;
            let pattern = Pattern::bind(ctx, pattern, field_type, var_map);
            bad |= ctx.comp().ast().pattern(pattern).bad();
            patterns.push(FieldPattern { field, pattern });
        }
    }

    let result = ctx.alloc_pattern(Pattern::new(PatternKind::Structure { patterns }, span));
    if bad {
        return bad_pattern(ctx, Some(result), span);
    }
    result
}
