//! svx IR - shared leaf types for the SystemVerilog semantic core.
//!
//! This crate contains the data that every other `svx_` crate agrees on:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Lightweight arena handles (`ExprId`, `PatternId`, `SymbolId`, ...)
//! - The immutable syntax input consumed by binding
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers become `Name(u32)`
//! - **Flatten Everything**: bound nodes reference each other by handle
//! - Syntax is produced by an external parser and never mutated here

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod ids;
mod interner;
mod name;
mod span;
pub mod syntax;

pub use ids::{ExprId, PatternId, PatternVarId, ScopeId, SymbolId};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
pub use syntax::{
    ExprSyntax, Ident, NameSyntax, NetTypeDeclarationSyntax, PatternSyntax, PatternSyntaxKind,
    StructurePatternMember,
};
