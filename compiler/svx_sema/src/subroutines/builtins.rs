//! Builtin system subroutines.

use svx_ir::{ExprId, Span};
use svx_types::{ConstantValue, SvInt, TypeId, TypeKind};

use super::{
    NonConstantFunction, Procedure, SimpleSystemSubroutine, SubroutineInfo, SystemCallInfo,
    SystemSubroutine,
};
use crate::binding::BindContext;
use crate::eval::EvalContext;

/// Width of the `int` results produced here.
const INT_WIDTH: u32 = 32;

fn int_value(value: u64) -> ConstantValue {
    SvInt::new(INT_WIDTH, value, true).map_or(ConstantValue::Null, ConstantValue::Integer)
}

/// Evaluate the single integral argument of a constant function.
fn eval_integral_arg(
    info: &SubroutineInfo,
    ctx: &mut EvalContext<'_>,
    args: &[ExprId],
) -> Option<SvInt> {
    let arg = *args.first()?;
    if !info.no_hierarchical(ctx, arg) {
        return None;
    }
    match ctx.eval_expr(arg) {
        ConstantValue::Integer(value) => Some(value),
        _ => None,
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MathOp {
    /// `$clog2`
    Clog2,
    /// `$countones`
    CountOnes,
}

/// Constant functions of one integral argument that return `int`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IntegerMathFunction {
    info: SubroutineInfo,
    op: MathOp,
}

impl IntegerMathFunction {
    pub const fn new(name: &'static str, op: MathOp) -> Self {
        IntegerMathFunction {
            info: SubroutineInfo::function(name),
            op,
        }
    }
}

impl SystemSubroutine for IntegerMathFunction {
    fn info(&self) -> &SubroutineInfo {
        &self.info
    }

    fn check_arguments(
        &self,
        ctx: &mut BindContext<'_>,
        args: &[ExprId],
        range: Span,
        _iter_or_this: Option<ExprId>,
    ) -> TypeId {
        if !self.info.check_arg_count(ctx, false, args, range, 1, 1) {
            return TypeId::ERROR;
        }
        let arg = args[0];
        if !ctx.comp().types().is_integral(ctx.expr(arg).ty) {
            return self.info.bad_arg(ctx, arg);
        }
        TypeId::INT
    }

    fn eval(
        &self,
        ctx: &mut EvalContext<'_>,
        args: &[ExprId],
        _range: Span,
        _info: &SystemCallInfo,
    ) -> ConstantValue {
        let Some(value) = eval_integral_arg(&self.info, ctx, args) else {
            return ConstantValue::Null;
        };
        let result = match self.op {
            MathOp::Clog2 => value.clog2(),
            MathOp::CountOnes => value.count_ones(),
        };
        int_value(u64::from(result))
    }
}

/// `$signed` and `$unsigned`: reinterpret an integral value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SignConversion {
    info: SubroutineInfo,
    signed: bool,
}

impl SignConversion {
    pub const fn new(name: &'static str, signed: bool) -> Self {
        SignConversion {
            info: SubroutineInfo::function(name),
            signed,
        }
    }
}

impl SystemSubroutine for SignConversion {
    fn info(&self) -> &SubroutineInfo {
        &self.info
    }

    fn check_arguments(
        &self,
        ctx: &mut BindContext<'_>,
        args: &[ExprId],
        range: Span,
        _iter_or_this: Option<ExprId>,
    ) -> TypeId {
        if !self.info.check_arg_count(ctx, false, args, range, 1, 1) {
            return TypeId::ERROR;
        }
        let arg = args[0];
        let arg_type = ctx.expr(arg).ty;
        let shape = match ctx.comp().types().canonical_kind(arg_type) {
            TypeKind::Integral {
                width, four_state, ..
            } => Some((*width, *four_state)),
            _ => None,
        };
        match shape {
            Some((width, four_state)) => {
                ctx.comp_mut()
                    .types_mut()
                    .integral(width, self.signed, four_state)
            }
            None => self.info.bad_arg(ctx, arg),
        }
    }

    fn eval(
        &self,
        ctx: &mut EvalContext<'_>,
        args: &[ExprId],
        _range: Span,
        _info: &SystemCallInfo,
    ) -> ConstantValue {
        eval_integral_arg(&self.info, ctx, args).map_or(ConstantValue::Null, |value| {
            ConstantValue::Integer(value.with_signed(self.signed))
        })
    }
}

/// `$finish [(n)]`. A task, so never constant; lowers to a dedicated
/// runtime call.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FinishTask {
    base: SimpleSystemSubroutine,
}

impl FinishTask {
    pub const fn new() -> Self {
        FinishTask {
            base: SimpleSystemSubroutine::new(
                SubroutineInfo::task("$finish"),
                0,
                &[TypeId::INT],
                TypeId::VOID,
                false,
            ),
        }
    }
}

impl Default for FinishTask {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemSubroutine for FinishTask {
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

    fn lower(&self, procedure: &mut dyn Procedure, args: &[ExprId]) {
        procedure.emit_system_call(self.name(), args);
    }
}

/// `str.len()`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct StringLenMethod {
    base: SimpleSystemSubroutine,
}

impl StringLenMethod {
    pub const fn new() -> Self {
        StringLenMethod {
            base: SimpleSystemSubroutine::new(
                SubroutineInfo::function("len"),
                0,
                &[],
                TypeId::INT,
                true,
            ),
        }
    }
}

impl Default for StringLenMethod {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemSubroutine for StringLenMethod {
    delegate_to_simple!(base);

    fn eval(
        &self,
        ctx: &mut EvalContext<'_>,
        args: &[ExprId],
        _range: Span,
        info: &SystemCallInfo,
    ) -> ConstantValue {
        let Some(receiver) = info.iter_or_this.or_else(|| args.first().copied()) else {
            return ConstantValue::Null;
        };
        match ctx.eval_expr(receiver) {
            ConstantValue::Str(s) => u64::try_from(s.len()).map_or(ConstantValue::Null, int_value),
            _ => ConstantValue::Null,
        }
    }
}

static CLOG2: IntegerMathFunction = IntegerMathFunction::new("$clog2", MathOp::Clog2);
static COUNTONES: IntegerMathFunction =
    IntegerMathFunction::new("$countones", MathOp::CountOnes);
static SIGNED: SignConversion = SignConversion::new("$signed", true);
static UNSIGNED: SignConversion = SignConversion::new("$unsigned", false);
static RANDOM: NonConstantFunction =
    NonConstantFunction::new("$random", TypeId::INT, 0, &[TypeId::INT]).first_arg_lvalue();
static URANDOM: NonConstantFunction =
    NonConstantFunction::new("$urandom", TypeId::INT, 0, &[TypeId::INT]).first_arg_lvalue();
static URANDOM_RANGE: NonConstantFunction =
    NonConstantFunction::new("$urandom_range", TypeId::INT, 1, &[TypeId::INT, TypeId::INT]);
static TIME: NonConstantFunction = NonConstantFunction::new("$time", TypeId::TIME, 0, &[]);
static FINISH: FinishTask = FinishTask::new();
static STRING_LEN: StringLenMethod = StringLenMethod::new();

/// Free-standing `$name` subroutines.
pub(super) static SUBROUTINES: &[&dyn SystemSubroutine] = &[
    &CLOG2,
    &COUNTONES,
    &SIGNED,
    &UNSIGNED,
    &RANDOM,
    &URANDOM,
    &URANDOM_RANGE,
    &TIME,
    &FINISH,
];

/// Methods callable on `string` values.
pub(super) static STRING_METHODS: &[&dyn SystemSubroutine] = &[&STRING_LEN];
