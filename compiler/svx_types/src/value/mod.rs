//! Constant values produced by constant evaluation.

mod sv_int;

use std::fmt;

pub use sv_int::{SvInt, MAX_WIDTH};

/// Failure to build an integer value.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("integer width must be at least one bit")]
    ZeroWidth,
    #[error("integer width {width} exceeds the maximum of {MAX_WIDTH} bits")]
    WidthTooLarge { width: u32 },
    #[error("slice [{msb}:{lsb}] is out of range for a {width}-bit value")]
    SliceOutOfRange { msb: u32, lsb: u32, width: u32 },
}

/// Value of a tagged union: which member is active and what it holds.
#[derive(Clone, Debug, PartialEq)]
pub struct UnionValue {
    /// Offset of the active member, `None` if no member was ever written.
    pub active_member: Option<u32>,
    pub value: ConstantValue,
}

/// Result of constant evaluation.
///
/// `Null` is the failure sentinel. It is distinct from a zero or false
/// integer, which is a successful evaluation to false.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConstantValue {
    #[default]
    Null,
    /// Integral values and packed aggregates.
    Integer(SvInt),
    Str(String),
    /// Unpacked structs and arrays, one element per field or index.
    Unpacked(Vec<ConstantValue>),
    /// Tagged unions.
    Union(Box<UnionValue>),
}

impl ConstantValue {
    /// One-bit logical result.
    pub fn logic(value: bool) -> Self {
        ConstantValue::Integer(SvInt::logic(value))
    }

    /// Whether evaluation failed.
    #[inline]
    pub fn bad(&self) -> bool {
        matches!(self, ConstantValue::Null)
    }

    /// True for a non-zero integer; every other value is not true.
    pub fn is_true(&self) -> bool {
        matches!(self, ConstantValue::Integer(v) if v.is_true())
    }

    /// False for a zero integer.
    pub fn is_false(&self) -> bool {
        matches!(self, ConstantValue::Integer(v) if !v.is_true())
    }

    pub fn integer(&self) -> Option<&SvInt> {
        match self {
            ConstantValue::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn elements(&self) -> Option<&[ConstantValue]> {
        match self {
            ConstantValue::Unpacked(elems) => Some(elems),
            _ => None,
        }
    }

    pub fn union_value(&self) -> Option<&UnionValue> {
        match self {
            ConstantValue::Union(u) => Some(u),
            _ => None,
        }
    }

    /// Build an unpacked tagged-union value with `member` active.
    pub fn tagged(member: u32, value: ConstantValue) -> Self {
        ConstantValue::Union(Box::new(UnionValue {
            active_member: Some(member),
            value,
        }))
    }

    /// Pack an unpacked aggregate of integers into one integer, first element
    /// in the most significant bits. Nested aggregates are packed recursively.
    pub fn pack(&self) -> Option<SvInt> {
        match self {
            ConstantValue::Integer(v) => Some(v.clone()),
            ConstantValue::Unpacked(elems) => {
                let parts = elems.iter().map(ConstantValue::pack).collect::<Option<Vec<_>>>()?;
                SvInt::concat(&parts).ok()
            }
            _ => None,
        }
    }
}

impl From<SvInt> for ConstantValue {
    fn from(value: SvInt) -> Self {
        ConstantValue::Integer(value)
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Null => write!(f, "<null>"),
            ConstantValue::Integer(v) => write!(f, "{v}"),
            ConstantValue::Str(s) => write!(f, "{s:?}"),
            ConstantValue::Unpacked(elems) => {
                write!(f, "'{{")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                write!(f, "}}")
            }
            ConstantValue::Union(u) => match u.active_member {
                Some(member) => write!(f, "tagged #{member} {}", u.value),
                None => write!(f, "tagged <none>"),
            },
        }
    }
}

#[cfg(test)]
mod tests;
