use super::*;
use crate::test_helpers::{codes, span, Fixture};
use crate::CompilationOptions;
use pretty_assertions::assert_eq;
use svx_diagnostic::ErrorCode;
use svx_types::{SvInt, TypeKind};

fn call(fx: &Fixture, name: &str, args: Vec<Option<ExprSyntax>>) -> ExprSyntax {
    ExprSyntax::SystemCall {
        name: fx.ident(name, 0),
        args,
        span: span(0, 40),
    }
}

fn sized(value: u64, width: u32, at: u32) -> Option<ExprSyntax> {
    Some(ExprSyntax::IntegerLiteral {
        value,
        width: Some(width),
        signed: false,
        span: span(at, at + 4),
    })
}

fn int(value: u64, at: u32) -> Option<ExprSyntax> {
    Some(ExprSyntax::int(value, span(at, at + 1)))
}

fn string(value: &str, at: u32) -> ExprSyntax {
    let len = u32::try_from(value.len()).unwrap();
    ExprSyntax::StringLiteral {
        value: value.into(),
        span: span(at, at + len + 2),
    }
}

fn eval(fx: &Fixture, id: ExprId) -> (ConstantValue, Vec<ErrorCode>) {
    let mut ctx = EvalContext::new(&fx.comp);
    let value = ctx.eval_expr(id);
    (value, codes(ctx.diagnostics()))
}

fn int_value(value: u64) -> ConstantValue {
    ConstantValue::Integer(SvInt::new(32, value, true).unwrap())
}

/// Records lowered calls.
#[derive(Default)]
struct Recorder {
    calls: Vec<(&'static str, usize)>,
}

impl Procedure for Recorder {
    fn emit_system_call(&mut self, subroutine: &'static str, args: &[ExprId]) {
        self.calls.push((subroutine, args.len()));
    }
}

// Registry

#[test]
fn registry_knows_every_builtin() {
    let registry = SystemSubroutineRegistry::new();
    assert_eq!(registry.len(), 9);

    let mut names: Vec<_> = registry.names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "$clog2",
            "$countones",
            "$finish",
            "$random",
            "$signed",
            "$time",
            "$unsigned",
            "$urandom",
            "$urandom_range",
        ]
    );
    assert!(registry.get("$display").is_none());
}

#[test]
fn registry_methods_depend_on_receiver() {
    let fx = Fixture::new();
    let registry = fx.comp.registry();
    let types = fx.comp.types();
    let len = registry.method(types, TypeId::STRING, "len");
    assert_eq!(len.map(|s| s.name()), Some("len"));
    assert!(registry.method(types, TypeId::INT, "len").is_none());
    assert!(registry.method(types, TypeId::STRING, "toupper").is_none());
}

#[test]
fn subroutine_info_builders() {
    let info = SubroutineInfo::task("$t")
        .with_output_args()
        .with_clause(WithClauseMode::Iterator);
    assert_eq!(info.kind_str(), "task");
    assert!(info.has_output_args);
    assert_eq!(info.with_clause_mode, WithClauseMode::Iterator);
    assert_eq!(SubroutineInfo::function("$f").kind_str(), "function");
}

// Argument counts

#[test]
fn too_few_arguments_reported_at_call() {
    let mut fx = Fixture::new();
    let syntax = call(&fx, "$urandom_range", Vec::new());
    let id = fx.bind_ctx().bind(&syntax);
    assert!(matches!(
        fx.comp.ast().expr(id).kind,
        ExprKind::Invalid { child: Some(_) }
    ));

    let diags = fx.comp.take_diagnostics();
    assert_eq!(codes(&diags), vec![ErrorCode::E4001]);
    assert_eq!(diags[0].primary_span(), Some(span(0, 40)));
}

#[test]
fn too_many_arguments_reported_at_first_extra() {
    let mut fx = Fixture::new();
    let syntax = call(&fx, "$urandom_range", vec![int(1, 16), int(2, 19), int(3, 22)]);
    let id = fx.bind_ctx().bind(&syntax);
    assert!(fx.comp.ast().expr(id).bad());

    let diags = fx.comp.take_diagnostics();
    assert_eq!(codes(&diags), vec![ErrorCode::E4002]);
    assert_eq!(diags[0].primary_span(), Some(span(22, 23)));
}

#[test]
fn method_receiver_is_not_counted() {
    let mut fx = Fixture::new();
    let ok = ExprSyntax::MethodCall {
        receiver: Box::new(string("abc", 0)),
        method: fx.ident("len", 6),
        args: Vec::new(),
        span: span(0, 11),
    };
    let extra = ExprSyntax::MethodCall {
        receiver: Box::new(string("abc", 20)),
        method: fx.ident("len", 26),
        args: vec![int(5, 30)],
        span: span(20, 32),
    };

    let mut ctx = fx.bind_ctx();
    let ok = ctx.bind(&ok);
    let extra = ctx.bind(&extra);
    assert_eq!(ctx.expr(ok).ty, TypeId::INT);
    assert!(ctx.is_bad(extra));

    let diags = fx.comp.take_diagnostics();
    assert_eq!(codes(&diags), vec![ErrorCode::E4002]);
    assert_eq!(diags[0].primary_span(), Some(span(30, 31)));
}

#[test]
fn bad_argument_fails_count_check_silently() {
    let mut fx = Fixture::new();
    let syntax = call(
        &fx,
        "$urandom_range",
        vec![Some(fx.name_expr("nope", 16))],
    );
    let id = fx.bind_ctx().bind(&syntax);
    assert!(fx.comp.ast().expr(id).bad());
    assert_eq!(codes(&fx.comp.take_diagnostics()), vec![ErrorCode::E2002]);
}

#[test]
fn empty_argument_not_allowed() {
    let mut fx = Fixture::new();
    let syntax = call(&fx, "$clog2", vec![None]);
    let id = fx.bind_ctx().bind(&syntax);
    assert!(fx.comp.ast().expr(id).bad());
    assert_eq!(codes(&fx.comp.take_diagnostics()), vec![ErrorCode::E2007]);
}

// Argument types

#[test]
fn math_function_rejects_non_integral() {
    let mut fx = Fixture::new();
    let syntax = call(&fx, "$clog2", vec![Some(string("s", 7))]);
    let id = fx.bind_ctx().bind(&syntax);
    assert!(fx.comp.ast().expr(id).bad());

    let diags = fx.comp.take_diagnostics();
    assert_eq!(codes(&diags), vec![ErrorCode::E4003]);
    assert_eq!(diags[0].primary_span(), Some(span(7, 10)));
}

#[test]
fn declared_argument_types_convert() {
    let mut fx = Fixture::new();
    let syntax = call(&fx, "$urandom_range", vec![sized(7, 4, 16)]);
    let id = fx.bind_ctx().bind(&syntax);
    let ExprKind::SystemCall(call) = &fx.comp.ast().expr(id).kind else {
        panic!("expected a system call");
    };
    let arg = fx.comp.ast().expr(call.args[0]);
    assert!(matches!(arg.kind, ExprKind::Conversion { .. }));
    assert_eq!(arg.ty, TypeId::INT);
}

#[test]
fn seed_argument_must_be_assignable() {
    let mut fx = Fixture::new();
    let root = fx.root();
    let seed = fx.ident("seed", 0);
    fx.comp.declare_variable(root, seed, TypeId::INT);

    let literal = call(&fx, "$random", vec![int(5, 8)]);
    let variable = call(&fx, "$random", vec![Some(fx.name_expr("seed", 8))]);
    let mut ctx = fx.bind_ctx();
    let literal = ctx.bind(&literal);
    let variable = ctx.bind(&variable);
    assert!(ctx.is_bad(literal));
    assert_eq!(ctx.expr(variable).ty, TypeId::INT);
    assert_eq!(codes(&fx.comp.take_diagnostics()), vec![ErrorCode::E2005]);
}

#[test]
fn sign_conversion_keeps_width() {
    let mut fx = Fixture::new();
    let syntax = call(&fx, "$signed", vec![sized(0xff, 8, 8)]);
    let id = fx.bind_ctx().bind(&syntax);
    let ty = fx.comp.ast().expr(id).ty;
    assert_eq!(
        fx.comp.types().canonical_kind(ty),
        &TypeKind::Integral {
            width: 8,
            signed: true,
            four_state: true,
        }
    );

    let (value, diags) = eval(&fx, id);
    assert!(diags.is_empty());
    let ConstantValue::Integer(value) = value else {
        panic!("expected an integer");
    };
    assert!(value.is_negative());
}

// Evaluation

#[test]
fn clog2_and_countones_fold() {
    let mut fx = Fixture::new();
    let clog2 = call(&fx, "$clog2", vec![sized(9, 8, 7)]);
    let ones = call(&fx, "$countones", vec![sized(0b1011, 8, 11)]);
    let (clog2, ones) = {
        let mut ctx = fx.bind_ctx();
        (ctx.bind(&clog2), ctx.bind(&ones))
    };
    assert_eq!(eval(&fx, clog2), (int_value(4), Vec::new()));
    assert_eq!(eval(&fx, ones), (int_value(3), Vec::new()));
}

#[test]
fn non_constant_function_reports_once() {
    let mut fx = Fixture::new();
    let syntax = call(&fx, "$urandom_range", vec![int(1, 16)]);
    let id = fx.bind_ctx().bind(&syntax);
    assert!(fx.comp.take_diagnostics().is_empty());

    assert_eq!(eval(&fx, id), (ConstantValue::Null, vec![ErrorCode::E4004]));
}

#[test]
fn time_has_time_type() {
    let mut fx = Fixture::new();
    let syntax = call(&fx, "$time", Vec::new());
    let id = fx.bind_ctx().bind(&syntax);
    assert_eq!(fx.comp.ast().expr(id).ty, TypeId::TIME);
}

#[test]
fn string_len_folds() {
    let mut fx = Fixture::new();
    let syntax = ExprSyntax::MethodCall {
        receiver: Box::new(string("hello", 0)),
        method: fx.ident("len", 8),
        args: Vec::new(),
        span: span(0, 13),
    };
    let id = fx.bind_ctx().bind(&syntax);
    assert_eq!(eval(&fx, id), (int_value(5), Vec::new()));
}

fn hierarchical_param(fx: &mut Fixture) -> ExprSyntax {
    let root = fx.root();
    let top = fx.ident("top", 0);
    let body = fx.comp.declare_instance(root, top);
    let p = fx.ident("P", 4);
    fx.comp
        .declare_parameter(body, p, TypeId::INT, int_value(16));
    let path = ExprSyntax::Name(fx.dotted(&["top", "P"], 7));
    call(fx, "$clog2", vec![Some(path)])
}

#[test]
fn hierarchical_argument_rejected_in_constant() {
    let mut fx = Fixture::new();
    let syntax = hierarchical_param(&mut fx);
    let id = fx.bind_ctx().bind(&syntax);
    assert!(fx.comp.take_diagnostics().is_empty());
    assert_eq!(eval(&fx, id), (ConstantValue::Null, vec![ErrorCode::E4005]));
}

#[test]
fn hierarchical_argument_allowed_by_option() {
    let mut fx = Fixture::with_options(CompilationOptions {
        allow_hierarchical_const: true,
        ..CompilationOptions::default()
    });
    let syntax = hierarchical_param(&mut fx);
    let id = fx.bind_ctx().bind(&syntax);
    assert_eq!(eval(&fx, id), (int_value(4), Vec::new()));
}

#[test]
fn hierarchical_argument_allowed_in_scripts() {
    let mut fx = Fixture::new();
    let syntax = hierarchical_param(&mut fx);
    let id = fx.bind_ctx().bind(&syntax);

    let mut ctx = EvalContext::with_flags(&fx.comp, EvalFlags::IS_SCRIPT);
    assert_eq!(ctx.eval_expr(id), int_value(4));
    assert!(ctx.diagnostics().is_empty());
}

// Lowering

#[test]
fn finish_lowers_to_runtime_call() {
    let mut fx = Fixture::new();
    let syntax = call(&fx, "$finish", vec![int(1, 8)]);
    let id = fx.bind_ctx().bind(&syntax);
    let ExprKind::SystemCall(call) = &fx.comp.ast().expr(id).kind else {
        panic!("expected a system call");
    };
    assert_eq!(fx.comp.ast().expr(id).ty, TypeId::VOID);

    let mut recorder = Recorder::default();
    call.subroutine.lower(&mut recorder, &call.args);
    assert_eq!(recorder.calls, vec![("$finish", 1)]);

    assert_eq!(eval(&fx, id), (ConstantValue::Null, vec![ErrorCode::E4004]));
}

#[test]
fn ordinary_builtins_do_not_lower() {
    let fx = Fixture::new();
    let clog2 = fx.comp.registry().get("$clog2").unwrap();
    let mut recorder = Recorder::default();
    clog2.lower(&mut recorder, &[]);
    assert!(recorder.calls.is_empty());
}
