//! System subroutines: builtin functions and tasks such as `$clog2`.
//!
//! Every builtin implements [`SystemSubroutine`]. One static instance per
//! builtin is shared by every call site; the [`SystemSubroutineRegistry`]
//! maps names to those instances.
//!
//! A call goes through three steps:
//! 1. [`bind_system_call`] binds each argument with
//!    [`SystemSubroutine::bind_argument`], which may depend on the
//!    arguments bound before it.
//! 2. [`SystemSubroutine::check_arguments`] validates the bound arguments
//!    and returns the result type, or [`TypeId::ERROR`].
//! 3. [`SystemSubroutine::eval`] folds the call when a constant is needed.
//!
//! Builtins that need special code generation also override
//! [`SystemSubroutine::lower`].

use std::fmt;

use svx_ir::{ExprId, ExprSyntax, Span};
use svx_types::{ConstantValue, TypeId};

use crate::ast::{ExprKind, SystemCall};
use crate::binding::BindContext;
use crate::errors;
use crate::eval::{EvalContext, EvalFlags};
use crate::symbols::{ArgumentDirection, SubroutineKind};

/// Delegate the binding half of [`SystemSubroutine`] to a
/// [`SimpleSystemSubroutine`] field.
macro_rules! delegate_to_simple {
    ($field:ident) => {
        fn info(&self) -> &$crate::subroutines::SubroutineInfo {
            self.$field.info()
        }

        fn bind_argument(
            &self,
            arg_index: usize,
            ctx: &mut $crate::binding::BindContext<'_>,
            syntax: &svx_ir::ExprSyntax,
            previous: &[svx_ir::ExprId],
        ) -> svx_ir::ExprId {
            self.$field.bind_argument(arg_index, ctx, syntax, previous)
        }

        fn check_arguments(
            &self,
            ctx: &mut $crate::binding::BindContext<'_>,
            args: &[svx_ir::ExprId],
            range: svx_ir::Span,
            _iter_or_this: Option<svx_ir::ExprId>,
        ) -> svx_types::TypeId {
            self.$field.check_arguments(ctx, args, range)
        }
    };
}

mod builtins;
mod registry;

pub use builtins::{FinishTask, IntegerMathFunction, MathOp, SignConversion, StringLenMethod};
pub use registry::SystemSubroutineRegistry;

/// How a trailing `with` clause on a call is interpreted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum WithClauseMode {
    /// No `with` clause allowed.
    #[default]
    None,
    /// `with (expr)` over an iterator, as in array methods.
    Iterator,
    /// `with { constraints }`, as in `randomize`.
    Randomize,
}

/// Properties shared by every system subroutine, plus the diagnostics
/// helpers that mention its name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubroutineInfo {
    pub name: &'static str,
    pub kind: SubroutineKind,
    pub has_output_args: bool,
    pub with_clause_mode: WithClauseMode,
}

impl SubroutineInfo {
    pub const fn function(name: &'static str) -> Self {
        SubroutineInfo {
            name,
            kind: SubroutineKind::Function,
            has_output_args: false,
            with_clause_mode: WithClauseMode::None,
        }
    }

    pub const fn task(name: &'static str) -> Self {
        SubroutineInfo {
            name,
            kind: SubroutineKind::Task,
            has_output_args: false,
            with_clause_mode: WithClauseMode::None,
        }
    }

    #[must_use]
    pub const fn with_output_args(self) -> Self {
        SubroutineInfo {
            has_output_args: true,
            ..self
        }
    }

    #[must_use]
    pub const fn with_clause(self, mode: WithClauseMode) -> Self {
        SubroutineInfo {
            with_clause_mode: mode,
            ..self
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self.kind {
            SubroutineKind::Task => "task",
            SubroutineKind::Function => "function",
        }
    }

    /// Check that the number of arguments is within `[min, max]`.
    ///
    /// For methods the receiver is `args[0]` and is not counted. Also fails,
    /// without a new diagnostic, if any argument already failed to bind.
    pub fn check_arg_count(
        &self,
        ctx: &mut BindContext<'_>,
        is_method: bool,
        args: &[ExprId],
        range: Span,
        min: usize,
        max: usize,
    ) -> bool {
        let receiver = usize::from(is_method);
        let provided = args.len().saturating_sub(receiver);

        if provided < min {
            ctx.report(errors::too_few_arguments(range, self.name, min, provided));
            return false;
        }

        if provided > max {
            let span = args
                .get(max + receiver)
                .map_or(range, |arg| ctx.expr(*arg).span);
            ctx.report(errors::too_many_arguments(span, self.name, max, provided));
            return false;
        }

        !args.iter().any(|arg| ctx.is_bad(*arg))
    }

    /// Report `arg` as having a type this subroutine does not accept.
    pub fn bad_arg(&self, ctx: &mut BindContext<'_>, arg: ExprId) -> TypeId {
        let (span, ty) = {
            let expr = ctx.expr(arg);
            (expr.span, expr.ty)
        };
        let diag = errors::bad_system_subroutine_arg(span, &ctx.type_name(ty), self.kind_str());
        ctx.report(diag);
        TypeId::ERROR
    }

    /// Report that this subroutine cannot be called in a constant expression.
    pub fn not_const(&self, ctx: &mut EvalContext<'_>, range: Span) -> bool {
        ctx.add_diag(errors::sys_func_not_const(range, self.name));
        false
    }

    /// Reject hierarchical references in a constant argument unless the
    /// options or evaluation flags allow them.
    pub fn no_hierarchical(&self, ctx: &mut EvalContext<'_>, expr: ExprId) -> bool {
        let comp = ctx.comp();
        if comp.ast().has_hierarchical_reference(expr)
            && !comp.options().allow_hierarchical_const
            && !ctx.flags().contains(EvalFlags::IS_SCRIPT)
        {
            let span = comp.ast().expr(expr).span;
            ctx.add_diag(errors::sys_func_hierarchical_not_allowed(span, self.name));
            return false;
        }
        true
    }
}

/// Extra call information available during evaluation.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SystemCallInfo {
    /// Method receiver or `with` clause iterator.
    pub iter_or_this: Option<ExprId>,
}

/// Receiver of custom lowering from [`SystemSubroutine::lower`].
pub trait Procedure {
    fn emit_system_call(&mut self, subroutine: &'static str, args: &[ExprId]);
}

/// A builtin function or task.
pub trait SystemSubroutine: fmt::Debug + Send + Sync {
    fn info(&self) -> &SubroutineInfo;

    fn name(&self) -> &'static str {
        self.info().name
    }

    /// Whether argument `arg_index` may be left empty (`$f(a,,b)`).
    fn allow_empty_argument(&self, _arg_index: usize) -> bool {
        false
    }

    /// Whether argument `arg_index` may be a clocking event.
    fn allow_clocking_argument(&self, _arg_index: usize) -> bool {
        false
    }

    /// Bind argument `arg_index`. `previous` holds the arguments bound so
    /// far, including the receiver of a method call.
    fn bind_argument(
        &self,
        _arg_index: usize,
        ctx: &mut BindContext<'_>,
        syntax: &ExprSyntax,
        _previous: &[ExprId],
    ) -> ExprId {
        ctx.bind(syntax)
    }

    /// Validate the bound arguments and return the call's type, or
    /// [`TypeId::ERROR`] after reporting why not.
    fn check_arguments(
        &self,
        ctx: &mut BindContext<'_>,
        args: &[ExprId],
        range: Span,
        iter_or_this: Option<ExprId>,
    ) -> TypeId;

    /// Fold a call. Returns [`ConstantValue::Null`] after recording a
    /// diagnostic in `ctx` if the call is not constant.
    fn eval(
        &self,
        ctx: &mut EvalContext<'_>,
        args: &[ExprId],
        range: Span,
        info: &SystemCallInfo,
    ) -> ConstantValue;

    /// Custom lowering. Most builtins lower as ordinary calls and do nothing here.
    fn lower(&self, _procedure: &mut dyn Procedure, _args: &[ExprId]) {}
}

/// The common subroutine shape: fixed argument types, a fixed return type
/// and a number of required leading arguments.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SimpleSystemSubroutine {
    info: SubroutineInfo,
    arg_types: &'static [TypeId],
    return_type: TypeId,
    required_args: usize,
    is_method: bool,
    first_arg_lvalue: bool,
}

impl SimpleSystemSubroutine {
    pub const fn new(
        info: SubroutineInfo,
        required_args: usize,
        arg_types: &'static [TypeId],
        return_type: TypeId,
        is_method: bool,
    ) -> Self {
        assert!(required_args <= arg_types.len());
        SimpleSystemSubroutine {
            info,
            arg_types,
            return_type,
            required_args,
            is_method,
            first_arg_lvalue: false,
        }
    }

    /// Require the first argument to be assignable.
    #[must_use]
    pub const fn first_arg_lvalue(self) -> Self {
        SimpleSystemSubroutine {
            first_arg_lvalue: true,
            ..self
        }
    }

    #[inline]
    pub fn info(&self) -> &SubroutineInfo {
        &self.info
    }

    /// Bind declared arguments as inputs of their declared type. Arguments
    /// past the declared list are bound without a type.
    pub fn bind_argument(
        &self,
        arg_index: usize,
        ctx: &mut BindContext<'_>,
        syntax: &ExprSyntax,
        _previous: &[ExprId],
    ) -> ExprId {
        let index = arg_index.saturating_sub(usize::from(self.is_method));
        match self.arg_types.get(index) {
            Some(ty) => ctx.bind_argument(*ty, ArgumentDirection::In, syntax),
            None => ctx.bind(syntax),
        }
    }

    pub fn check_arguments(&self, ctx: &mut BindContext<'_>, args: &[ExprId], range: Span) -> TypeId {
        let max = self.arg_types.len();
        if !self
            .info
            .check_arg_count(ctx, self.is_method, args, range, self.required_args, max)
        {
            return TypeId::ERROR;
        }

        if self.first_arg_lvalue {
            if let Some(first) = args.first() {
                if !ctx.require_lvalue(*first) {
                    return TypeId::ERROR;
                }
            }
        }

        self.return_type
    }
}

/// A function with only run-time semantics. Calling it in a constant
/// expression is always an error.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NonConstantFunction {
    base: SimpleSystemSubroutine,
}

impl NonConstantFunction {
    pub const fn new(
        name: &'static str,
        return_type: TypeId,
        required_args: usize,
        arg_types: &'static [TypeId],
    ) -> Self {
        NonConstantFunction {
            base: SimpleSystemSubroutine::new(
                SubroutineInfo::function(name),
                required_args,
                arg_types,
                return_type,
                false,
            ),
        }
    }

    #[must_use]
    pub const fn first_arg_lvalue(self) -> Self {
        NonConstantFunction {
            base: self.base.first_arg_lvalue(),
        }
    }
}

impl SystemSubroutine for NonConstantFunction {
    delegate_to_simple!(base);

    fn eval(
        &self,
        ctx: &mut EvalContext<'_>,
        _args: &[ExprId],
        range: Span,
        _info: &SystemCallInfo,
    ) -> ConstantValue {
        self.info().not_const(ctx, range);
        ConstantValue::Null
    }
}

/// Bind a call to `subroutine`.
///
/// `receiver` is the already bound object of a method call; it becomes the
/// first argument. Returns an invalid expression wrapping the call if the
/// arguments do not check.
#[tracing::instrument(level = "trace", skip_all, fields(subroutine = subroutine.name()))]
pub fn bind_system_call(
    ctx: &mut BindContext<'_>,
    subroutine: &'static dyn SystemSubroutine,
    receiver: Option<ExprId>,
    args: &[Option<ExprSyntax>],
    range: Span,
) -> ExprId {
    let mut bound = Vec::with_capacity(args.len() + usize::from(receiver.is_some()));
    bound.extend(receiver);

    for syntax in args {
        let index = bound.len();
        let arg = match syntax {
            Some(syntax) => subroutine.bind_argument(index, ctx, syntax, &bound),
            None if subroutine.allow_empty_argument(index) => {
                ctx.alloc_expr(ExprKind::EmptyArgument, TypeId::VOID, range)
            }
            None => {
                ctx.report(errors::empty_argument_not_allowed(range, subroutine.name()));
                ctx.bad_expr(None, range)
            }
        };
        bound.push(arg);
    }

    let ty = subroutine.check_arguments(ctx, &bound, range, receiver);
    let call = ctx.alloc_expr(
        ExprKind::SystemCall(SystemCall {
            subroutine,
            args: bound,
            iter_or_this: receiver,
        }),
        ty,
        range,
    );

    if ty.is_error() {
        return ctx.bad_expr(Some(call), range);
    }
    call
}

#[cfg(test)]
mod tests;
