//! Lookup of builtin subroutines by name.

use rustc_hash::FxHashMap;
use svx_types::{TypeArena, TypeId};

use super::builtins::{STRING_METHODS, SUBROUTINES};
use super::SystemSubroutine;

/// Maps names to the builtin subroutine instances.
///
/// Every entry is a static, so lookups hand out `&'static` references that
/// outlive any borrow of the registry.
pub struct SystemSubroutineRegistry {
    subroutines: FxHashMap<&'static str, &'static dyn SystemSubroutine>,
    string_methods: FxHashMap<&'static str, &'static dyn SystemSubroutine>,
}

impl SystemSubroutineRegistry {
    /// Create a registry with every builtin registered.
    pub fn new() -> Self {
        let subroutines: FxHashMap<_, _> = SUBROUTINES.iter().map(|s| (s.name(), *s)).collect();
        let string_methods: FxHashMap<_, _> =
            STRING_METHODS.iter().map(|s| (s.name(), *s)).collect();
        tracing::debug!(
            subroutines = subroutines.len(),
            methods = string_methods.len(),
            "registered system subroutines"
        );
        SystemSubroutineRegistry {
            subroutines,
            string_methods,
        }
    }

    /// Free-standing subroutine named `name`, including its `$`.
    pub fn get(&self, name: &str) -> Option<&'static dyn SystemSubroutine> {
        self.subroutines.get(name).copied()
    }

    /// Builtin method `name` on a value of type `receiver`.
    pub fn method(
        &self,
        types: &TypeArena,
        receiver: TypeId,
        name: &str,
    ) -> Option<&'static dyn SystemSubroutine> {
        if types.is_string(receiver) {
            return self.string_methods.get(name).copied();
        }
        None
    }

    /// Names of the free-standing subroutines, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.subroutines.keys().copied()
    }

    /// Number of free-standing subroutines.
    pub fn len(&self) -> usize {
        self.subroutines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subroutines.is_empty()
    }
}

impl Default for SystemSubroutineRegistry {
    fn default() -> Self {
        Self::new()
    }
}
