//! The compilation: owner of every type, symbol and bound node.

use rustc_hash::FxHashMap;
use svx_diagnostic::{Diagnostic, DiagnosticQueue, ErrorGuaranteed};
use svx_ir::{Ident, Name, NetTypeDeclarationSyntax, ScopeId, Span, StringInterner, SymbolId};
use svx_types::{ConstantValue, TypeArena, TypeId};

use crate::ast::AstArena;
use crate::errors;
use crate::nettype::{NetKind, NetTypeSymbol};
use crate::options::CompilationOptions;
use crate::subroutines::SystemSubroutineRegistry;
use crate::symbols::{Scope, ScopeKind, SubroutineSymbol, Symbol, SymbolKind};

/// Everything one compilation knows.
///
/// Declarations are added up front through the `declare_*` methods; binding
/// and evaluation then refer to them by handle. Diagnostics from every phase
/// except constant evaluation land in one queue owned here.
pub struct Compilation {
    options: CompilationOptions,
    interner: StringInterner,
    types: TypeArena,
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
    ast: AstArena,
    registry: SystemSubroutineRegistry,
    builtin_net_types: FxHashMap<NetKind, SymbolId>,
    diagnostics: DiagnosticQueue,
}

impl Default for Compilation {
    fn default() -> Self {
        Self::new(CompilationOptions::default())
    }
}

impl Compilation {
    pub fn new(options: CompilationOptions) -> Self {
        let diagnostics = DiagnosticQueue::with_config(options.diagnostic_config());
        let mut comp = Compilation {
            options,
            interner: StringInterner::new(),
            types: TypeArena::new(),
            scopes: vec![Scope::new(ScopeKind::Root, None, None)],
            symbols: Vec::new(),
            ast: AstArena::default(),
            registry: SystemSubroutineRegistry::new(),
            builtin_net_types: FxHashMap::default(),
            diagnostics,
        };
        comp.create_builtin_net_types();
        comp
    }

    fn create_builtin_net_types(&mut self) {
        let root = self.root();
        for kind in NetKind::BUILTIN {
            let data_type = if kind == NetKind::Unknown {
                TypeId::ERROR
            } else {
                TypeId::LOGIC
            };
            let name = self.interner.intern(kind.keyword());
            let id = SymbolId::from_index(self.symbols.len());
            self.symbols.push(Symbol {
                name,
                span: Span::DUMMY,
                parent: root,
                index: u32::MAX,
                kind: SymbolKind::NetType(NetTypeSymbol::builtin(kind, data_type)),
            });
            self.builtin_net_types.insert(kind, id);
        }
    }

    #[inline]
    pub fn options(&self) -> &CompilationOptions {
        &self.options
    }


    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    #[inline]
    pub fn types(&self) -> &TypeArena {
        &self.types
    }

    #[inline]
    pub fn types_mut(&mut self) -> &mut TypeArena {
        &mut self.types
    }

    /// Display name of a type for diagnostics.
    pub fn type_name(&self, ty: TypeId) -> String {
        self.types.display(ty, &self.interner)
    }

    /// The compilation unit scope.
    pub fn root(&self) -> ScopeId {
        ScopeId::from_index(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub(crate) fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    #[inline]
    pub fn ast(&self) -> &AstArena {
        &self.ast
    }

    #[inline]
    pub(crate) fn ast_mut(&mut self) -> &mut AstArena {
        &mut self.ast
    }

    #[inline]
    pub fn registry(&self) -> &SystemSubroutineRegistry {
        &self.registry
    }

    /// The predefined net type for a builtin kind. `None` for `UserDefined`.
    pub fn builtin_net_type(&self, kind: NetKind) -> Option<SymbolId> {
        self.builtin_net_types.get(&kind).copied()
    }

    // Declarations

    fn add_scope(&mut self, kind: ScopeKind, parent: ScopeId, owner: SymbolId) -> ScopeId {
        let id = ScopeId::from_index(self.scopes.len());
        self.scopes.push(Scope::new(kind, Some(parent), Some(owner)));
        id
    }

    fn add_symbol(&mut self, scope: ScopeId, name: Ident, kind: SymbolKind) -> SymbolId {
        let id = SymbolId::from_index(self.symbols.len());
        let index = self.scopes[scope.index()].next_index();
        self.symbols.push(Symbol {
            name: name.name,
            span: name.span,
            parent: scope,
            index,
            kind,
        });
        if let Err(previous) = self.scopes[scope.index()].insert(name.name, id) {
            let previous = self.symbol(previous).span;
            let diag = errors::redefinition(name.span, self.name_str(name.name), previous);
            self.report(diag);
        }
        id
    }

    pub fn declare_variable(&mut self, scope: ScopeId, name: Ident, ty: TypeId) -> SymbolId {
        self.add_symbol(scope, name, SymbolKind::Variable { ty })
    }

    pub fn declare_parameter(
        &mut self,
        scope: ScopeId,
        name: Ident,
        ty: TypeId,
        value: ConstantValue,
    ) -> SymbolId {
        self.add_symbol(scope, name, SymbolKind::Parameter { ty, value })
    }

    pub fn declare_subroutine(
        &mut self,
        scope: ScopeId,
        name: Ident,
        subroutine: SubroutineSymbol,
    ) -> SymbolId {
        self.add_symbol(scope, name, SymbolKind::Subroutine(subroutine))
    }

    /// Declare a package and return the scope of its body.
    pub fn declare_package(&mut self, scope: ScopeId, name: Ident) -> ScopeId {
        self.declare_scoped(scope, name, ScopeKind::Package)
    }

    /// Declare a class and return the scope of its body.
    pub fn declare_class(&mut self, scope: ScopeId, name: Ident) -> ScopeId {
        self.declare_scoped(scope, name, ScopeKind::Class)
    }

    /// Declare a module instance and return the scope of its body.
    pub fn declare_instance(&mut self, scope: ScopeId, name: Ident) -> ScopeId {
        self.declare_scoped(scope, name, ScopeKind::Module)
    }

    fn declare_scoped(&mut self, scope: ScopeId, name: Ident, kind: ScopeKind) -> ScopeId {
        // The body scope id is known before the symbol exists.
        let body = ScopeId::from_index(self.scopes.len());
        let symbol_kind = match kind {
            ScopeKind::Package => SymbolKind::Package { scope: body },
            ScopeKind::Class => SymbolKind::ClassType { scope: body },
            _ => SymbolKind::Instance { scope: body },
        };
        let owner = self.add_symbol(scope, name, symbol_kind);
        let created = self.add_scope(kind, scope, owner);
        debug_assert_eq!(created, body);
        body
    }

    /// Declare a user-defined net type whose data type is already bound.
    pub fn declare_net_type(
        &mut self,
        scope: ScopeId,
        syntax: NetTypeDeclarationSyntax,
        data_type: TypeId,
    ) -> SymbolId {
        let name = syntax.name;
        self.add_symbol(
            scope,
            name,
            SymbolKind::NetType(NetTypeSymbol::user_defined(syntax, data_type)),
        )
    }

    /// Record that the body of `subroutine` writes to its argument `arg`.
    pub fn record_argument_driver(&mut self, subroutine: SymbolId, arg: usize, span: Span) {
        if let SymbolKind::Subroutine(sub) = &mut self.symbol_mut(subroutine).kind {
            if let Some(formal) = sub.args.get_mut(arg) {
                formal.drivers.push(span);
            }
        }
    }

    // Diagnostics

    pub fn report(&mut self, diag: Diagnostic) {
        tracing::trace!(code = %diag.code, "diagnostic reported");
        self.diagnostics.add(diag);
    }

    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.diagnostics
    }

    /// Drain every reported diagnostic, sorted by position.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.flush()
    }

    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        self.diagnostics.has_errors()
    }
}
