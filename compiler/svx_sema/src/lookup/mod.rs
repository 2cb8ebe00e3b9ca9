//! Name lookup.
//!
//! Simple names search outward through the scope chain. Inside the scope
//! where the lookup happens, only symbols declared before the lookup location
//! are visible unless [`LookupFlags::FORCE_HIERARCHICAL`] is set. Dotted names
//! resolve their first segment the same way and then descend through package,
//! class and instance scopes, where declaration order does not matter.

use bitflags::bitflags;
use svx_diagnostic::Diagnostic;
use svx_ir::{Name, NameSyntax, ScopeId, SymbolId};

use crate::compilation::Compilation;
use crate::errors;
use crate::symbols::{Symbol, SymbolKind};

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LookupFlags: u8 {
        /// Ignore declaration order, as hierarchical references do.
        const FORCE_HIERARCHICAL = 1 << 0;
        /// Reject names with element or range selects.
        const NO_SELECTORS = 1 << 1;
    }
}

/// A point within a scope from which a lookup is performed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LookupLocation {
    pub scope: ScopeId,
    /// Symbols of `scope` with a declaration index below this are visible.
    pub index: u32,
}

impl LookupLocation {
    /// Just after `symbol` in its declaring scope.
    pub fn after(symbol: &Symbol) -> Self {
        LookupLocation {
            scope: symbol.parent,
            index: symbol.index.saturating_add(1),
        }
    }

    /// Just before `symbol` in its declaring scope.
    pub fn before(symbol: &Symbol) -> Self {
        LookupLocation {
            scope: symbol.parent,
            index: symbol.index,
        }
    }

    /// After every declaration of `scope`.
    pub fn end_of(scope: ScopeId) -> Self {
        LookupLocation {
            scope,
            index: u32::MAX,
        }
    }
}

/// Outcome of a lookup.
#[derive(Clone, Debug, Default)]
pub struct LookupResult {
    pub found: Option<SymbolId>,
    /// The path went through a module instance.
    pub is_hierarchical: bool,
    /// Problems found along the way. The caller decides where they go.
    pub diagnostics: Vec<Diagnostic>,
}

impl LookupResult {
    pub fn has_error(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Move the collected diagnostics into the compilation.
    pub fn report_diagnostics(&mut self, comp: &mut Compilation) {
        for diag in self.diagnostics.drain(..) {
            comp.report(diag);
        }
    }
}

/// Resolve `name` as seen from `location`.
#[tracing::instrument(level = "trace", skip_all)]
pub fn lookup_name(
    comp: &Compilation,
    name: &NameSyntax,
    location: LookupLocation,
    flags: LookupFlags,
) -> LookupResult {
    let mut result = LookupResult::default();

    if name.has_selectors && flags.contains(LookupFlags::NO_SELECTORS) {
        result.diagnostics.push(errors::selectors_not_allowed(name.span));
        return result;
    }

    let Some((first, rest)) = name.segments.split_first() else {
        return result;
    };
    // The parser already complained about a missing identifier.
    if first.is_missing() {
        return result;
    }

    let Some(mut current) = unqualified(comp, first.name, location, flags) else {
        result
            .diagnostics
            .push(errors::undeclared_identifier(first.span, comp.name_str(first.name)));
        return result;
    };

    for segment in rest {
        if segment.is_missing() {
            return result;
        }
        let symbol = comp.symbol(current);
        if matches!(symbol.kind, SymbolKind::Instance { .. }) {
            result.is_hierarchical = true;
        }
        let member = symbol
            .child_scope()
            .and_then(|scope| comp.scope(scope).find(segment.name));
        match member {
            Some(member) => current = member,
            None => {
                result.diagnostics.push(errors::unresolved_hierarchical_path(
                    segment.span,
                    comp.name_str(segment.name),
                    comp.name_str(symbol.name),
                ));
                return result;
            }
        }
    }

    result.found = Some(current);
    result
}

/// Search outward from `location` for `name`.
pub fn unqualified(
    comp: &Compilation,
    name: Name,
    location: LookupLocation,
    flags: LookupFlags,
) -> Option<SymbolId> {
    let mut scope = Some(location.scope);
    while let Some(id) = scope {
        let current = comp.scope(id);
        if let Some(found) = current.find(name) {
            let ordered = id == location.scope && !flags.contains(LookupFlags::FORCE_HIERARCHICAL);
            if !ordered || comp.symbol(found).index < location.index {
                return Some(found);
            }
        }
        scope = current.parent;
    }
    None
}
