//! Types and constant values for the svx semantic core.
//!
//! - [`TypeArena`] owns every type of one compilation; [`TypeId`] is the
//!   32-bit handle used everywhere else. Predefined types have fixed handles.
//! - [`ConstantValue`] is the result of constant evaluation, including the
//!   `Null` sentinel that signals failure.
//! - [`SvInt`] is the two-state arbitrary-width integer behind integral and
//!   packed aggregate values.

mod ty;
mod value;

pub use ty::{FieldDecl, FieldRef, FieldSymbol, StructType, TypeArena, TypeId, TypeKind, UnionType};
pub use value::{ConstantValue, SvInt, UnionValue, ValueError};
