//! Constant evaluation.
//!
//! An [`EvalContext`] folds bound expressions and patterns into
//! [`ConstantValue`]s. Pattern variables live in a stack of frames owned by
//! the context, so independent evaluations never see each other's bindings.
//! Problems are collected in the context rather than the compilation; the
//! caller decides whether they matter.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use svx_diagnostic::Diagnostic;
use svx_ir::{ExprId, PatternVarId};
use svx_stack::ensure_sufficient_stack;
use svx_types::ConstantValue;

use crate::ast::{ExprKind, Expression};
use crate::compilation::Compilation;
use crate::errors;
use crate::subroutines::SystemCallInfo;
use crate::symbols::SymbolKind;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct EvalFlags: u8 {
        /// Evaluating for a script or tool rather than the design itself.
        const IS_SCRIPT = 1 << 0;
    }
}

#[derive(Debug, Default)]
struct Frame {
    locals: FxHashMap<PatternVarId, ConstantValue>,
}

pub struct EvalContext<'a> {
    comp: &'a Compilation,
    frames: Vec<Frame>,
    diagnostics: Vec<Diagnostic>,
    flags: EvalFlags,
}

impl<'a> EvalContext<'a> {
    pub fn new(comp: &'a Compilation) -> Self {
        Self::with_flags(comp, EvalFlags::empty())
    }

    pub fn with_flags(comp: &'a Compilation, flags: EvalFlags) -> Self {
        EvalContext {
            comp,
            frames: vec![Frame::default()],
            diagnostics: Vec::new(),
            flags,
        }
    }

    #[inline]
    pub fn comp(&self) -> &'a Compilation {
        self.comp
    }

    #[inline]
    pub fn flags(&self) -> EvalFlags {
        self.flags
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Discard the innermost frame and its locals. The outermost frame stays.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Bind `value` to `var` in the current frame, replacing any earlier value.
    pub fn create_local(&mut self, var: PatternVarId, value: ConstantValue) {
        if let Some(frame) = self.frames.last_mut() {
            frame.locals.insert(var, value);
        }
    }

    /// Value of `var` in the current frame.
    pub fn find_local(&self, var: PatternVarId) -> Option<&ConstantValue> {
        self.frames.last().and_then(|frame| frame.locals.get(&var))
    }

    pub fn add_diag(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Fold `id` to a constant. Returns [`ConstantValue::Null`] on failure
    /// after recording why.
    pub fn eval_expr(&mut self, id: ExprId) -> ConstantValue {
        ensure_sufficient_stack(|| self.eval_expr_inner(id))
    }

    fn eval_expr_inner(&mut self, id: ExprId) -> ConstantValue {
        let comp = self.comp;
        let expr = comp.ast().expr(id);
        if let Some(constant) = &expr.constant {
            return constant.clone();
        }

        match &expr.kind {
            ExprKind::Invalid { .. } | ExprKind::EmptyArgument => ConstantValue::Null,
            ExprKind::IntegerLiteral(value) => ConstantValue::Integer(value.clone()),
            ExprKind::StringLiteral(value) => ConstantValue::Str(value.clone()),
            ExprKind::NamedValue { symbol, .. } => {
                let symbol = comp.symbol(*symbol);
                match &symbol.kind {
                    SymbolKind::Parameter { value, .. } => value.clone(),
                    _ => {
                        self.add_diag(errors::expression_not_constant(
                            expr.span,
                            comp.name_str(symbol.name),
                        ));
                        ConstantValue::Null
                    }
                }
            }
            ExprKind::PatternVar(var) => {
                if let Some(value) = self.find_local(*var) {
                    return value.clone();
                }
                let name = comp.name_str(comp.ast().pattern_var(*var).name);
                self.add_diag(errors::pattern_var_no_value(expr.span, name));
                ConstantValue::Null
            }
            ExprKind::Conversion { operand } => {
                let value = self.eval_expr(*operand);
                self.convert(value, expr)
            }
            ExprKind::SystemCall(call) => {
                let info = SystemCallInfo {
                    iter_or_this: call.iter_or_this,
                };
                call.subroutine.eval(self, &call.args, expr.span, &info)
            }
        }
    }

    /// Apply an implicit conversion to the type of `target`.
    fn convert(&mut self, value: ConstantValue, target: &Expression) -> ConstantValue {
        let types = self.comp.types();
        match (value, types.bit_width(target.ty)) {
            (ConstantValue::Integer(int), Some(width)) => match int.resize(width) {
                Ok(resized) => {
                    ConstantValue::Integer(resized.with_signed(types.is_signed(target.ty)))
                }
                Err(err) => {
                    self.add_diag(errors::internal_error(target.span, &err.to_string()));
                    ConstantValue::Null
                }
            },
            (value, _) => value,
        }
    }
}
