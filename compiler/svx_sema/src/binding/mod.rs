//! Expression binding.
//!
//! A [`BindContext`] turns [`ExprSyntax`] into typed [`Expression`] nodes in
//! the compilation's arena. Failures produce `ExprKind::Invalid` nodes and a
//! diagnostic; callers check [`Expression::bad`] before trusting a result.

use svx_diagnostic::Diagnostic;
use svx_ir::{ExprId, ExprSyntax, Ident, NameSyntax, PatternId, PatternSyntax, PatternVarId, Span};
use svx_types::{SvInt, TypeId};

use crate::ast::{ExprKind, Expression};
use crate::compilation::Compilation;
use crate::errors;
use crate::eval::EvalContext;
use crate::lookup::{lookup_name, LookupFlags, LookupLocation};
use crate::patterns::{Pattern, PatternVar, VarMap};
use crate::subroutines::bind_system_call;
use crate::symbols::{ArgumentDirection, SymbolKind};

/// Width of an unsized integer literal.
const UNSIZED_LITERAL_WIDTH: u32 = 32;

pub struct BindContext<'a> {
    comp: &'a mut Compilation,
    location: LookupLocation,
    /// Pattern variables visible to names bound through this context,
    /// oldest first.
    pattern_vars: Vec<PatternVarId>,
}

impl<'a> BindContext<'a> {
    pub fn new(comp: &'a mut Compilation, location: LookupLocation) -> Self {
        BindContext {
            comp,
            location,
            pattern_vars: Vec::new(),
        }
    }

    #[inline]
    pub fn comp(&self) -> &Compilation {
        &*self.comp
    }

    #[inline]
    pub fn comp_mut(&mut self) -> &mut Compilation {
        &mut *self.comp
    }

    #[inline]
    pub fn location(&self) -> LookupLocation {
        self.location
    }

    pub fn report(&mut self, diag: Diagnostic) {
        self.comp.report(diag);
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expression {
        self.comp.ast().expr(id)
    }

    #[inline]
    pub fn is_bad(&self, id: ExprId) -> bool {
        self.expr(id).bad()
    }

    pub fn type_name(&self, ty: TypeId) -> String {
        self.comp.type_name(ty)
    }

    /// Pattern variables visible here, oldest first.
    pub fn pattern_vars(&self) -> &[PatternVarId] {
        &self.pattern_vars
    }

    /// Make the variables declared by a bound pattern visible to later names.
    pub fn add_pattern_vars(&mut self, vars: &VarMap) {
        self.pattern_vars.extend(vars.vars());
    }

    pub(crate) fn alloc_expr(&mut self, kind: ExprKind, ty: TypeId, span: Span) -> ExprId {
        self.comp
            .ast_mut()
            .alloc_expr(Expression::new(kind, ty, span))
    }

    pub(crate) fn alloc_pattern(&mut self, pattern: Pattern) -> PatternId {
        self.comp.ast_mut().alloc_pattern(pattern)
    }

    pub(crate) fn alloc_pattern_var(&mut self, var: PatternVar) -> PatternVarId {
        self.comp.ast_mut().alloc_pattern_var(var)
    }

    /// An invalid expression, optionally wrapping a partial result.
    pub fn bad_expr(&mut self, child: Option<ExprId>, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Invalid { child }, TypeId::ERROR, span)
    }

    /// Bind a pattern against `target` with a fresh variable map, then make
    /// its variables visible to later names bound through this context.
    pub fn bind_pattern(&mut self, syntax: &PatternSyntax, target: TypeId) -> PatternId {
        let mut var_map = VarMap::new();
        let pattern = Pattern::bind(self, syntax, target, &mut var_map);
        self.add_pattern_vars(&var_map);
        pattern
    }

    /// Bind an expression with no type constraint.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn bind(&mut self, syntax: &ExprSyntax) -> ExprId {
        match syntax {
            ExprSyntax::IntegerLiteral {
                value,
                width,
                signed,
                span,
            } => self.bind_integer_literal(*value, *width, *signed, *span),
            ExprSyntax::StringLiteral { value, span } => {
                self.alloc_expr(ExprKind::StringLiteral(value.clone()), TypeId::STRING, *span)
            }
            ExprSyntax::Name(name) => self.bind_name(name),
            ExprSyntax::Parenthesized { inner, .. } => self.bind(inner),
            ExprSyntax::SystemCall { name, args, span } => {
                let Some(subroutine) = self.comp.registry().get(self.comp.name_str(name.name)) else {
                    return self.unknown_system_name(*name);
                };
                bind_system_call(self, subroutine, None, args, *span)
            }
            ExprSyntax::MethodCall {
                receiver,
                method,
                args,
                span,
            } => {
                let receiver = self.bind(receiver);
                if self.is_bad(receiver) {
                    return self.bad_expr(Some(receiver), *span);
                }
                let receiver_type = self.expr(receiver).ty;
                let name = self.comp.name_str(method.name);
                let method_sub = self.comp.registry().method(self.comp.types(), receiver_type, name);
                let Some(subroutine) = method_sub else {
                    return self.unknown_system_name(*method);
                };
                bind_system_call(self, subroutine, Some(receiver), args, *span)
            }
            ExprSyntax::Missing { span } => self.bad_expr(None, *span),
        }
    }

    fn unknown_system_name(&mut self, name: Ident) -> ExprId {
        if !name.is_missing() {
            let diag = errors::unknown_system_name(name.span, self.comp.name_str(name.name));
            self.report(diag);
        }
        self.bad_expr(None, name.span)
    }

    fn bind_integer_literal(
        &mut self,
        value: u64,
        width: Option<u32>,
        signed: bool,
        span: Span,
    ) -> ExprId {
        let (width, signed, ty) = match width {
            // Unsized literals are `int`.
            None => (UNSIZED_LITERAL_WIDTH, true, TypeId::INT),
            Some(w) => (w, signed, self.comp.types_mut().integral(w, signed, true)),
        };
        match SvInt::new(width, value, signed) {
            Ok(int) => self.alloc_expr(ExprKind::IntegerLiteral(int), ty, span),
            Err(err) => {
                self.report(errors::internal_error(span, &err.to_string()));
                self.bad_expr(None, span)
            }
        }
    }

    fn bind_name(&mut self, name: &NameSyntax) -> ExprId {
        // Pattern variables shadow everything; the newest declaration wins.
        if let Some(ident) = name.last().filter(|_| name.is_simple()) {
            let var = self
                .pattern_vars
                .iter()
                .rev()
                .copied()
                .find(|v| self.comp.ast().pattern_var(*v).name == ident.name);
            if let Some(var) = var {
                let ty = self.comp.ast().pattern_var(var).ty;
                return self.alloc_expr(ExprKind::PatternVar(var), ty, name.span);
            }
        }

        let mut result = lookup_name(&*self.comp, name, self.location, LookupFlags::empty());
        result.report_diagnostics(self.comp);
        let Some(found) = result.found else {
            return self.bad_expr(None, name.span);
        };

        let symbol = self.comp.symbol(found);
        match symbol.value_type() {
            Some(ty) => self.alloc_expr(
                ExprKind::NamedValue {
                    symbol: found,
                    hierarchical: result.is_hierarchical,
                },
                ty,
                name.span,
            ),
            None => {
                let diag = errors::not_a_value(name.span, self.comp.name_str(symbol.name));
                self.report(diag);
                self.bad_expr(None, name.span)
            }
        }
    }

    /// Bind an expression that is read and assigned to a location of type
    /// `target`, inserting an implicit conversion when the types differ.
    pub fn bind_rvalue(&mut self, target: TypeId, syntax: &ExprSyntax, location: Span) -> ExprId {
        let expr = self.bind(syntax);
        self.convert_assignment(target, expr, location)
    }

    fn convert_assignment(&mut self, target: TypeId, expr: ExprId, location: Span) -> ExprId {
        let (source, span) = {
            let e = self.expr(expr);
            (e.ty, e.span)
        };
        if self.is_bad(expr) || target.is_error() {
            return expr;
        }

        let types = self.comp.types();
        if types.is_matching(target, source) {
            return expr;
        }
        if types.is_assignment_compatible(target, source) {
            return self.alloc_expr(ExprKind::Conversion { operand: expr }, target, span);
        }

        let diag = errors::type_mismatch(location.merge(span), &self.type_name(target), &self.type_name(source));
        self.report(diag);
        self.bad_expr(Some(expr), span)
    }

    /// Bind a subroutine argument passed with `direction`.
    pub fn bind_argument(
        &mut self,
        target: TypeId,
        direction: ArgumentDirection,
        syntax: &ExprSyntax,
    ) -> ExprId {
        if direction == ArgumentDirection::In {
            return self.bind_rvalue(target, syntax, syntax.span());
        }

        let expr = self.bind(syntax);
        if self.is_bad(expr) {
            return expr;
        }
        if !self.require_lvalue(expr) {
            let span = self.expr(expr).span;
            return self.bad_expr(Some(expr), span);
        }
        let source = self.expr(expr).ty;
        if !self.comp.types().is_assignment_compatible(source, target) {
            let span = self.expr(expr).span;
            let diag = errors::type_mismatch(span, &self.type_name(source), &self.type_name(target));
            self.report(diag);
            return self.bad_expr(Some(expr), span);
        }
        expr
    }

    /// Check that `expr` names an assignable location, reporting if not.
    pub fn require_lvalue(&mut self, expr: ExprId) -> bool {
        let e = self.expr(expr);
        if e.bad() {
            return false;
        }
        let span = e.span;
        let assignable = match &e.kind {
            ExprKind::NamedValue { symbol, .. } => {
                matches!(self.comp.symbol(*symbol).kind, SymbolKind::Variable { .. })
            }
            _ => false,
        };
        if !assignable {
            self.report(errors::not_assignable(span));
        }
        assignable
    }

    /// Constant-fold `expr`, storing the value on success.
    ///
    /// On failure the evaluation diagnostics are reported to the compilation.
    pub fn eval(&mut self, expr: ExprId) -> bool {
        if let Some(constant) = &self.expr(expr).constant {
            return !constant.bad();
        }

        let (value, diagnostics) = {
            let mut ctx = EvalContext::new(&*self.comp);
            let value = ctx.eval_expr(expr);
            (value, ctx.take_diagnostics())
        };

        if value.bad() {
            for diag in diagnostics {
                self.report(diag);
            }
            return false;
        }
        self.comp.ast_mut().expr_mut(expr).constant = Some(value);
        true
    }
}
