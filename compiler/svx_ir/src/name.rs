//! Interned identifiers.

use std::fmt;

/// Handle to a string in a [`StringInterner`](crate::StringInterner).
///
/// Slot 0 holds the empty string. The parser produces it for identifiers it
/// had to make up, so `is_empty` doubles as "missing identifier".
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Slot in the interner's table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == Name::EMPTY.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Name(<missing>)")
        } else {
            write!(f, "Name({})", self.0)
        }
    }
}
