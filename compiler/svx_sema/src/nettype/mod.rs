//! Net types and resolution function validation.
//!
//! A user-defined net type may name a resolution function in its
//! `with` clause. The function is looked up the first time someone asks for
//! it, validated against the net type's data type, and the outcome is cached
//! on the net type symbol for the rest of the compilation.

use svx_ir::{NetTypeDeclarationSyntax, Span, SymbolId};
use svx_types::TypeId;

use crate::compilation::Compilation;
use crate::errors;
use crate::lookup::{lookup_name, LookupFlags, LookupLocation};
use crate::symbols::{ArgumentDirection, MethodFlags, ScopeKind, SubroutineKind, SymbolKind};

/// Kind of net.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NetKind {
    /// The error net type.
    Unknown,
    Wire,
    WAnd,
    WOr,
    Tri,
    TriAnd,
    TriOr,
    Tri0,
    Tri1,
    TriReg,
    Supply0,
    Supply1,
    UWire,
    Interconnect,
    UserDefined,
}

impl NetKind {
    /// Kinds that have a predefined net type in every compilation.
    pub const BUILTIN: [NetKind; 14] = [
        NetKind::Unknown,
        NetKind::Wire,
        NetKind::WAnd,
        NetKind::WOr,
        NetKind::Tri,
        NetKind::TriAnd,
        NetKind::TriOr,
        NetKind::Tri0,
        NetKind::Tri1,
        NetKind::TriReg,
        NetKind::Supply0,
        NetKind::Supply1,
        NetKind::UWire,
        NetKind::Interconnect,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            NetKind::Unknown => "<error>",
            NetKind::Wire => "wire",
            NetKind::WAnd => "wand",
            NetKind::WOr => "wor",
            NetKind::Tri => "tri",
            NetKind::TriAnd => "triand",
            NetKind::TriOr => "trior",
            NetKind::Tri0 => "tri0",
            NetKind::Tri1 => "tri1",
            NetKind::TriReg => "trireg",
            NetKind::Supply0 => "supply0",
            NetKind::Supply1 => "supply1",
            NetKind::UWire => "uwire",
            NetKind::Interconnect => "interconnect",
            NetKind::UserDefined => "nettype",
        }
    }

    /// Which side of a port connection governs simulation, and whether the
    /// combination deserves a warning.
    ///
    /// Follows the port coercion table of IEEE 1800-2017 23.3.3.7, with
    /// `internal` the net inside the instance and `external` the one connected
    /// from outside.
    pub fn simulated_side(internal: NetKind, external: NetKind) -> (PortSide, bool) {
        use NetKind::{
            Interconnect, Supply0, Supply1, Tri, Tri0, Tri1, TriAnd, TriOr, TriReg, UWire,
            Unknown, UserDefined, WAnd, WOr, Wire,
        };
        use PortSide::{External, Internal};

        match internal {
            Unknown | UserDefined => (Internal, false),
            Wire | Tri | Interconnect => (External, false),
            WAnd | TriAnd => match external {
                Wire | Tri | Interconnect => (Internal, false),
                WOr | TriOr | TriReg | Tri0 | Tri1 | UWire => (External, true),
                _ => (External, false),
            },
            WOr | TriOr => match external {
                Wire | Tri | Interconnect => (Internal, false),
                WAnd | TriAnd | TriReg | Tri0 | Tri1 | UWire => (External, true),
                _ => (External, false),
            },
            TriReg => match external {
                Wire | Tri | Interconnect => (Internal, false),
                WAnd | TriAnd | WOr | TriOr | UWire => (External, true),
                _ => (External, false),
            },
            Tri0 => match external {
                Wire | Tri | TriReg | Interconnect => (Internal, false),
                WAnd | TriAnd | WOr | TriOr | UWire | Tri1 => (External, true),
                _ => (External, false),
            },
            Tri1 => match external {
                Wire | Tri | TriReg | Interconnect => (Internal, false),
                WAnd | TriAnd | WOr | TriOr | UWire | Tri0 => (External, true),
                _ => (External, false),
            },
            UWire => match external {
                UWire | Supply0 | Supply1 => (External, false),
                WAnd | TriAnd | WOr | TriOr | TriReg | Tri0 | Tri1 => (Internal, true),
                _ => (Internal, false),
            },
            Supply0 => match external {
                Supply0 => (External, false),
                Supply1 => (External, true),
                _ => (Internal, false),
            },
            Supply1 => match external {
                Supply1 => (External, false),
                Supply0 => (External, true),
                _ => (Internal, false),
            },
        }
    }
}

/// One side of a port connection.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PortSide {
    Internal,
    External,
}

/// Memoized outcome of looking up a net type's resolution function.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ResolverState {
    #[default]
    Unresolved,
    Present(SymbolId),
    Absent,
}

/// A builtin or user-defined net type.
#[derive(Clone, Debug)]
pub struct NetTypeSymbol {
    pub net_kind: NetKind,
    /// Data type carried by nets of this type.
    pub declared_type: TypeId,
    /// Declaration syntax. Absent for builtin net types.
    pub syntax: Option<NetTypeDeclarationSyntax>,
    resolver: ResolverState,
}

impl NetTypeSymbol {
    pub(crate) fn builtin(net_kind: NetKind, declared_type: TypeId) -> Self {
        NetTypeSymbol {
            net_kind,
            declared_type,
            syntax: None,
            resolver: ResolverState::Unresolved,
        }
    }

    pub(crate) fn user_defined(syntax: NetTypeDeclarationSyntax, declared_type: TypeId) -> Self {
        NetTypeSymbol {
            net_kind: NetKind::UserDefined,
            declared_type,
            syntax: Some(syntax),
            resolver: ResolverState::Unresolved,
        }
    }

    /// Cached resolver outcome, without triggering resolution.
    pub fn resolver_state(&self) -> ResolverState {
        self.resolver
    }

    pub fn is_error(&self) -> bool {
        self.net_kind == NetKind::Unknown
    }
}

/// Outcome of [`Compilation::simulated_net_type`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SimulatedNetType {
    /// The net type whose semantics govern the connection.
    pub net_type: SymbolId,
    pub should_warn: bool,
}

impl Compilation {
    /// The resolution function of a user-defined net type.
    ///
    /// Looked up and validated on first call; later calls return the cached
    /// outcome without reporting anything again. Returns `None` for symbols
    /// that are not net types.
    pub fn resolution_function(&mut self, net_type: SymbolId) -> Option<SymbolId> {
        let state = self.symbol(net_type).as_net_type()?.resolver;
        match state {
            ResolverState::Present(resolver) => return Some(resolver),
            ResolverState::Absent => return None,
            ResolverState::Unresolved => {}
        }

        let found = self.resolve_with_function(net_type);
        let state = found.map_or(ResolverState::Absent, ResolverState::Present);
        tracing::debug!(
            net_type = self.name_str(self.symbol(net_type).name),
            ?state,
            "resolved net type resolution function"
        );
        if let SymbolKind::NetType(nt) = &mut self.symbol_mut(net_type).kind {
            nt.resolver = state;
        }
        found
    }

    fn resolve_with_function(&mut self, net_type: SymbolId) -> Option<SymbolId> {
        let symbol = self.symbol(net_type);
        let with_function = symbol
            .as_net_type()?
            .syntax
            .as_ref()?
            .with_function
            .clone()?;

        let location = LookupLocation::after(symbol);
        let result = lookup_name(
            self,
            &with_function,
            location,
            LookupFlags::FORCE_HIERARCHICAL | LookupFlags::NO_SELECTORS,
        );
        if !result.diagnostics.is_empty() {
            for diag in result.diagnostics {
                self.report(diag);
            }
            return None;
        }
        let found = result.found?;

        let range = with_function.span;
        let found_symbol = self.symbol(found);
        if found_symbol.as_subroutine().is_none() {
            let diag =
                errors::not_a_subroutine(range, self.name_str(found_symbol.name), found_symbol.span);
            self.report(diag);
            return None;
        }

        self.validate_resolver(net_type, found, range);
        Some(found)
    }

    /// Check the resolution function signature against the net type's data
    /// type. Stops at the first violated rule.
    fn validate_resolver(&mut self, net_type: SymbolId, resolver: SymbolId, range: Span) {
        let nt_symbol = self.symbol(net_type);
        let Some(nt) = nt_symbol.as_net_type() else {
            return;
        };
        let data_type = nt.declared_type;
        if nt.is_error() || self.types().is_error(data_type) {
            return;
        }
        let nt_name = self.name_str(nt_symbol.name);

        let resolver_symbol = self.symbol(resolver);
        let Some(sub) = resolver_symbol.as_subroutine() else {
            return;
        };
        let declared_at = resolver_symbol.span;
        let in_class = self.scope(resolver_symbol.parent).kind == ScopeKind::Class;

        let diag = 'rules: {
            let [arg] = sub.args.as_slice() else {
                break 'rules Some(errors::nt_resolve_single_arg(
                    range,
                    nt_name,
                    &self.type_name(data_type),
                    declared_at,
                ));
            };

            let types = self.types();
            let arg_type = types.canonical(arg.ty);
            if types.is_error(sub.return_type) || arg_type.is_error() {
                break 'rules None;
            }

            if sub.kind != SubroutineKind::Function {
                break 'rules Some(errors::nt_resolve_task(range, nt_name, declared_at));
            }

            if in_class && !sub.flags.contains(MethodFlags::STATIC) {
                break 'rules Some(errors::nt_resolve_class(range, nt_name, declared_at));
            }

            if sub.flags.intersects(
                MethodFlags::INTERFACE_IMPORT
                    | MethodFlags::DPI_IMPORT
                    | MethodFlags::NOT_CONST
                    | MethodFlags::RANDOMIZE,
            ) {
                break 'rules Some(errors::nt_resolve_user_def(range, nt_name, declared_at));
            }

            if !types.is_matching(data_type, sub.return_type) {
                break 'rules Some(errors::nt_resolve_return(
                    range,
                    nt_name,
                    &self.type_name(data_type),
                    declared_at,
                ));
            }

            let element_matches = types
                .dynamic_array_element(arg_type)
                .is_some_and(|element| types.is_matching(element, data_type));
            if !element_matches || arg.direction != ArgumentDirection::In {
                break 'rules Some(errors::nt_resolve_single_arg(
                    range,
                    nt_name,
                    &self.type_name(data_type),
                    declared_at,
                ));
            }

            arg.first_driver().map(|driver| {
                errors::nt_resolve_arg_modify(driver, nt_name, self.name_str(arg.name), range)
            })
        };

        if let Some(diag) = diag {
            self.report(diag);
        }
    }

    /// Which net type governs a port connection between `internal` (inside
    /// the instance) and `external` (the connected net).
    ///
    /// Returns `None` if either symbol is not a net type.
    pub fn simulated_net_type(
        &self,
        internal: SymbolId,
        external: SymbolId,
    ) -> Option<SimulatedNetType> {
        let internal_kind = self.symbol(internal).as_net_type()?.net_kind;
        let external_kind = self.symbol(external).as_net_type()?.net_kind;
        let (side, should_warn) = NetKind::simulated_side(internal_kind, external_kind);
        let net_type = match side {
            PortSide::Internal => internal,
            PortSide::External => external,
        };
        Some(SimulatedNetType {
            net_type,
            should_warn,
        })
    }

    /// Resolve the governing net type of a port connection, warning at
    /// `span` when the combination changes resolution semantics.
    pub fn connect_port_nets(
        &mut self,
        internal: SymbolId,
        external: SymbolId,
        span: Span,
    ) -> Option<SymbolId> {
        let simulated = self.simulated_net_type(internal, external)?;
        if simulated.should_warn {
            let diag = errors::net_type_coercion(
                span,
                self.name_str(self.symbol(internal).name),
                self.name_str(self.symbol(external).name),
                self.name_str(self.symbol(simulated.net_type).name),
            );
            self.report(diag);
        }
        Some(simulated.net_type)
    }
}
