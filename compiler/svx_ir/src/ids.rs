//! Arena handles.
//!
//! Every node produced during binding lives in an arena owned by the
//! compilation and is referenced by one of these 32-bit handles. Handles are
//! `Copy`, compare in O(1), and never dangle for the lifetime of the arena
//! that issued them.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from an arena index.
            ///
            /// # Panics
            /// Panics if the index does not fit in 32 bits.
            #[inline]
            pub fn from_index(index: usize) -> Self {
                $name(u32::try_from(index).unwrap_or_else(|_| {
                    panic!(concat!(stringify!($name), " arena exceeded u32::MAX entries"))
                }))
            }

            /// Get the index into the arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw u32 value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// Handle to a bound expression.
    ExprId
);
define_id!(
    /// Handle to a bound pattern.
    PatternId
);
define_id!(
    /// Handle to a variable declared by a variable pattern.
    PatternVarId
);
define_id!(
    /// Handle to a declared symbol.
    SymbolId
);
define_id!(
    /// Handle to a lexical scope.
    ScopeId
);

crate::static_assert_size!(ExprId, 4);
crate::static_assert_size!(Option<PatternId>, 8);
