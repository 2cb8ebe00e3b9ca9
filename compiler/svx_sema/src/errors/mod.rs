//! Diagnostic factories.
//!
//! One function per diagnostic. Callers resolve names and types to display
//! strings first, so nothing here needs the compilation.

use svx_diagnostic::{Diagnostic, ErrorCode};
use svx_ir::Span;

// Lookup and binding (E2xxx)

#[cold]
pub(crate) fn type_mismatch(span: Span, target: &str, source: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E2001)
        .with_message(format!("value of type '{source}' cannot be assigned to type '{target}'"))
        .with_label(span, format!("expected '{target}'"))
}

#[cold]
pub(crate) fn undeclared_identifier(span: Span, name: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E2002)
        .with_message(format!("use of undeclared identifier '{name}'"))
        .with_label(span, "not found in this scope")
}

#[cold]
pub(crate) fn not_a_value(span: Span, name: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E2002)
        .with_message(format!("'{name}' does not name a value"))
        .with_label(span, "expected a variable or parameter")
}

#[cold]
pub(crate) fn unknown_system_name(span: Span, name: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E2002)
        .with_message(format!("unknown system name '{name}'"))
        .with_label(span, "no such system subroutine")
}

#[cold]
pub(crate) fn unknown_member(span: Span, member: &str, ty: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E2003)
        .with_message(format!("no member named '{member}' in '{ty}'"))
        .with_label(span, "unknown member")
}

#[cold]
pub(crate) fn redefinition(span: Span, name: &str, previous: Span) -> Diagnostic {
    Diagnostic::new(ErrorCode::E2004)
        .with_message(format!("redefinition of '{name}'"))
        .with_label(span, "redefined here")
        .with_declared_here(previous)
}

#[cold]
pub(crate) fn not_assignable(span: Span) -> Diagnostic {
    Diagnostic::new(ErrorCode::E2005)
        .with_message("expression is not assignable")
        .with_label(span, "must be a variable")
}

#[cold]
pub(crate) fn selectors_not_allowed(span: Span) -> Diagnostic {
    Diagnostic::new(ErrorCode::E2006)
        .with_message("selectors are not allowed in this name")
        .with_label(span, "remove the select")
}

#[cold]
pub(crate) fn empty_argument_not_allowed(span: Span, subroutine: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E2007)
        .with_message(format!("'{subroutine}' does not allow empty arguments"))
        .with_label(span, "argument elided here")
}

#[cold]
pub(crate) fn unresolved_hierarchical_path(span: Span, segment: &str, parent: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E2008)
        .with_message(format!("could not resolve '{segment}' in '{parent}'"))
        .with_label(span, "no such member")
}

// Patterns (E3xxx)

#[cold]
pub(crate) fn pattern_tagged_type(span: Span, ty: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E3001)
        .with_message(format!("tagged pattern cannot match type '{ty}'"))
        .with_label(span, "target is not a tagged union")
}

#[cold]
pub(crate) fn pattern_struct_type(span: Span, ty: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E3002)
        .with_message(format!("structure pattern cannot match type '{ty}'"))
        .with_label(span, "target is not a struct")
}

#[cold]
pub(crate) fn pattern_struct_too_many(span: Span, ty: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E3003)
        .with_message(format!("too many members in pattern for '{ty}'"))
        .with_label(span, "no field left for this member")
}

#[cold]
pub(crate) fn pattern_struct_too_few(span: Span, ty: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E3004)
        .with_message(format!("not enough members in pattern for '{ty}'"))
        .with_label(span, "every field needs a pattern")
}

// System subroutines (E4xxx)

#[cold]
pub(crate) fn too_few_arguments(span: Span, name: &str, min: usize, provided: usize) -> Diagnostic {
    Diagnostic::new(ErrorCode::E4001)
        .with_message(format!(
            "too few arguments to '{name}': expected at least {min}, found {provided}"
        ))
        .with_label(span, "in this call")
}

#[cold]
pub(crate) fn too_many_arguments(span: Span, name: &str, max: usize, provided: usize) -> Diagnostic {
    Diagnostic::new(ErrorCode::E4002)
        .with_message(format!(
            "too many arguments to '{name}': expected at most {max}, found {provided}"
        ))
        .with_label(span, "unexpected argument")
}

#[cold]
pub(crate) fn bad_system_subroutine_arg(span: Span, ty: &str, kind: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E4003)
        .with_message(format!("argument of type '{ty}' is not valid for this system {kind}"))
        .with_label(span, "unsupported argument type")
}

#[cold]
pub(crate) fn sys_func_not_const(span: Span, name: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E4004)
        .with_message(format!("'{name}' is not allowed in a constant expression"))
        .with_label(span, "not constant")
}

#[cold]
pub(crate) fn sys_func_hierarchical_not_allowed(span: Span, name: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E4005)
        .with_message(format!(
            "hierarchical references are not allowed in arguments to '{name}' in a constant expression"
        ))
        .with_label(span, "hierarchical reference")
}

// Net types (E5xxx / W5xxx)

#[cold]
pub(crate) fn not_a_subroutine(span: Span, name: &str, declared: Span) -> Diagnostic {
    Diagnostic::new(ErrorCode::E5001)
        .with_message(format!("'{name}' is not a task or function"))
        .with_label(span, "expected a subroutine")
        .with_declared_here(declared)
}

/// Shared shape of every resolution function rule violation.
fn resolver_error(
    code: ErrorCode,
    span: Span,
    net_type: &str,
    message: String,
    resolver: Span,
) -> Diagnostic {
    Diagnostic::new(code)
        .with_message(message)
        .with_label(span, format!("resolution function of net type '{net_type}'"))
        .with_declared_here(resolver)
}

#[cold]
pub(crate) fn nt_resolve_single_arg(span: Span, net_type: &str, ty: &str, resolver: Span) -> Diagnostic {
    resolver_error(
        ErrorCode::E5002,
        span,
        net_type,
        format!("resolution function must take a single argument of type '{ty}$[]'"),
        resolver,
    )
}

#[cold]
pub(crate) fn nt_resolve_task(span: Span, net_type: &str, resolver: Span) -> Diagnostic {
    resolver_error(
        ErrorCode::E5003,
        span,
        net_type,
        "resolution function must be a function, not a task".to_owned(),
        resolver,
    )
}

#[cold]
pub(crate) fn nt_resolve_class(span: Span, net_type: &str, resolver: Span) -> Diagnostic {
    resolver_error(
        ErrorCode::E5004,
        span,
        net_type,
        "resolution function declared in a class must be static".to_owned(),
        resolver,
    )
}

#[cold]
pub(crate) fn nt_resolve_user_def(span: Span, net_type: &str, resolver: Span) -> Diagnostic {
    resolver_error(
        ErrorCode::E5005,
        span,
        net_type,
        "resolution function cannot be an import, randomize or non-constant method".to_owned(),
        resolver,
    )
}

#[cold]
pub(crate) fn nt_resolve_return(span: Span, net_type: &str, ty: &str, resolver: Span) -> Diagnostic {
    resolver_error(
        ErrorCode::E5006,
        span,
        net_type,
        format!("resolution function must return '{ty}'"),
        resolver,
    )
}

#[cold]
pub(crate) fn nt_resolve_arg_modify(
    driver: Span,
    net_type: &str,
    arg: &str,
    referenced: Span,
) -> Diagnostic {
    Diagnostic::new(ErrorCode::E5007)
        .with_message(format!(
            "resolution function of net type '{net_type}' must not modify its argument '{arg}'"
        ))
        .with_label(driver, "argument written here")
        .with_secondary_label(referenced, "referenced here")
}

#[cold]
pub(crate) fn net_type_coercion(span: Span, internal: &str, external: &str, governing: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::W5001)
        .with_message(format!(
            "port connection of '{internal}' to '{external}' is simulated as '{governing}'"
        ))
        .with_label(span, "net types differ in resolution")
}

// Constant evaluation (E6xxx)

#[cold]
pub(crate) fn expression_not_constant(span: Span, name: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E6001)
        .with_message(format!("reference to '{name}' is not allowed in a constant expression"))
        .with_label(span, "not a constant")
}

#[cold]
pub(crate) fn pattern_var_no_value(span: Span, name: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E6002)
        .with_message(format!("pattern variable '{name}' has no value here"))
        .with_label(span, "not bound in this evaluation")
}

#[cold]
pub(crate) fn internal_error(span: Span, message: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E9001)
        .with_message(format!("internal error: {message}"))
        .with_label(span, "while evaluating this")
}
