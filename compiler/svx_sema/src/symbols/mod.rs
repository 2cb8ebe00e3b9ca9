//! Symbols and scopes.
//!
//! Symbols are stored in the [`Compilation`](crate::Compilation) and referred
//! to by [`SymbolId`]. Every symbol records the scope it was declared in and
//! its declaration index there, which is what declaration-order lookup uses.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use svx_ir::{Name, ScopeId, Span, SymbolId};
use svx_types::{ConstantValue, TypeId};

use crate::nettype::NetTypeSymbol;

bitflags! {
    /// Qualifiers on a subroutine declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MethodFlags: u16 {
        const STATIC = 1 << 0;
        const VIRTUAL = 1 << 1;
        /// `import` of an interface method.
        const INTERFACE_IMPORT = 1 << 2;
        /// `import "DPI-C"`.
        const DPI_IMPORT = 1 << 3;
        /// Function that may not be called from a constant expression.
        const NOT_CONST = 1 << 4;
        /// Built-in `randomize` and friends.
        const RANDOMIZE = 1 << 5;
        const CONSTRUCTOR = 1 << 6;
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SubroutineKind {
    Function,
    Task,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArgumentDirection {
    In,
    Out,
    InOut,
    Ref,
}

/// A formal argument of a user subroutine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormalArgument {
    pub name: Name,
    pub ty: TypeId,
    pub direction: ArgumentDirection,
    pub span: Span,
    /// Places in the subroutine body that write to this argument, in source order.
    pub drivers: Vec<Span>,
}

impl FormalArgument {
    pub fn new(name: Name, ty: TypeId, direction: ArgumentDirection, span: Span) -> Self {
        FormalArgument {
            name,
            ty,
            direction,
            span,
            drivers: Vec::new(),
        }
    }

    pub fn first_driver(&self) -> Option<Span> {
        self.drivers.first().copied()
    }
}

/// A user-declared function or task.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubroutineSymbol {
    pub kind: SubroutineKind,
    pub return_type: TypeId,
    pub args: Vec<FormalArgument>,
    pub flags: MethodFlags,
}

impl SubroutineSymbol {
    pub fn function(return_type: TypeId, args: Vec<FormalArgument>) -> Self {
        SubroutineSymbol {
            kind: SubroutineKind::Function,
            return_type,
            args,
            flags: MethodFlags::empty(),
        }
    }

    pub fn task(args: Vec<FormalArgument>) -> Self {
        SubroutineSymbol {
            kind: SubroutineKind::Task,
            return_type: TypeId::VOID,
            args,
            flags: MethodFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags = flags;
        self
    }
}

#[derive(Clone, Debug)]
pub enum SymbolKind {
    Variable { ty: TypeId },
    Parameter { ty: TypeId, value: ConstantValue },
    Subroutine(SubroutineSymbol),
    NetType(NetTypeSymbol),
    Package { scope: ScopeId },
    ClassType { scope: ScopeId },
    /// A module instance; its body is reachable through hierarchical names.
    Instance { scope: ScopeId },
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: Name,
    pub span: Span,
    /// Scope the symbol was declared in.
    pub parent: ScopeId,
    /// Declaration index within `parent`.
    pub index: u32,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn as_subroutine(&self) -> Option<&SubroutineSymbol> {
        match &self.kind {
            SymbolKind::Subroutine(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_net_type(&self) -> Option<&NetTypeSymbol> {
        match &self.kind {
            SymbolKind::NetType(n) => Some(n),
            _ => None,
        }
    }

    /// Scope opened by this symbol, for symbols hierarchical names can descend into.
    pub fn child_scope(&self) -> Option<ScopeId> {
        match self.kind {
            SymbolKind::Package { scope }
            | SymbolKind::ClassType { scope }
            | SymbolKind::Instance { scope } => Some(scope),
            _ => None,
        }
    }

    /// Type of a value symbol.
    pub fn value_type(&self) -> Option<TypeId> {
        match self.kind {
            SymbolKind::Variable { ty } | SymbolKind::Parameter { ty, .. } => Some(ty),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeKind {
    Root,
    Package,
    Module,
    Class,
    Subroutine,
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Symbol that opened this scope. `None` for the root.
    pub owner: Option<SymbolId>,
    members: FxHashMap<Name, SymbolId>,
    order: Vec<SymbolId>,
}

impl Scope {
    pub(crate) fn new(kind: ScopeKind, parent: Option<ScopeId>, owner: Option<SymbolId>) -> Self {
        Scope {
            kind,
            parent,
            owner,
            members: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Look up a member by name, regardless of declaration order.
    pub fn find(&self, name: Name) -> Option<SymbolId> {
        self.members.get(&name).copied()
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[SymbolId] {
        &self.order
    }

    /// Next declaration index.
    pub(crate) fn next_index(&self) -> u32 {
        u32::try_from(self.order.len()).unwrap_or(u32::MAX)
    }

    /// Record a member. Returns the previous declaration when the name is
    /// already taken; the earlier declaration stays visible.
    pub(crate) fn insert(&mut self, name: Name, symbol: SymbolId) -> Result<(), SymbolId> {
        self.order.push(symbol);
        if name.is_empty() {
            return Ok(());
        }
        match self.members.get(&name) {
            Some(&previous) => Err(previous),
            None => {
                self.members.insert(name, symbol);
                Ok(())
            }
        }
    }
}
