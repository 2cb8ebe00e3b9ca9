//! Semantic core for SystemVerilog pattern matching, system subroutines and
//! user-defined net types.
//!
//! # Architecture
//!
//! A [`Compilation`] owns everything: the type pool, scopes and symbols, the
//! arena of bound expressions and patterns, the builtin subroutine registry
//! and the diagnostic sink.
//!
//! Two phases touch the core:
//! - **Binding** ([`BindContext`]) turns syntax into typed nodes and reports
//!   legality errors.
//! - **Constant evaluation** ([`EvalContext`]) folds bound nodes into
//!   [`ConstantValue`](svx_types::ConstantValue)s. It keeps its own
//!   diagnostics so a failed attempt can be discarded.
//!
//! # Modules
//!
//! - [`patterns`]: bind and evaluate `matches` patterns
//! - [`subroutines`]: the system subroutine contract and builtins
//! - [`nettype`]: net kinds and resolution function validation
//! - [`lookup`]: name resolution through the scope tree

mod ast;
pub mod binding;
pub mod compilation;
mod errors;
pub mod eval;
pub mod lookup;
pub mod nettype;
mod options;
pub mod patterns;
pub mod subroutines;
pub mod symbols;
mod tracing_setup;

#[cfg(test)]
mod test_helpers;

pub use ast::{AstArena, ExprKind, Expression, SystemCall};
pub use binding::BindContext;
pub use compilation::Compilation;
pub use eval::{EvalContext, EvalFlags};
pub use lookup::{lookup_name, LookupFlags, LookupLocation, LookupResult};
pub use nettype::{NetKind, NetTypeSymbol, ResolverState, SimulatedNetType};
pub use options::CompilationOptions;
pub use patterns::{FieldPattern, Pattern, PatternKind, PatternVar, VarMap};
pub use subroutines::{
    bind_system_call, NonConstantFunction, Procedure, SimpleSystemSubroutine, SubroutineInfo,
    SystemCallInfo, SystemSubroutine, SystemSubroutineRegistry, WithClauseMode,
};
pub use symbols::{
    ArgumentDirection, FormalArgument, MethodFlags, Scope, ScopeKind, SubroutineKind,
    SubroutineSymbol, Symbol, SymbolKind,
};
pub use tracing_setup::init_tracing;
