//! Shared fixtures for unit tests.
//!
//! [`Fixture`] builds a compilation with a handful of common types and
//! helpers for writing syntax by hand.

#![allow(clippy::unwrap_used)]

use svx_diagnostic::{Diagnostic, ErrorCode};
use svx_ir::{
    ExprSyntax, Ident, NameSyntax, PatternSyntax, ScopeId, Span, StructurePatternMember,
};
use svx_types::{FieldDecl, TypeId};

use crate::lookup::LookupLocation;
use crate::{init_tracing, BindContext, Compilation, CompilationOptions};

/// A compilation preloaded with test types.
pub struct Fixture {
    pub comp: Compilation,
    /// `logic [3:0]`
    pub nibble: TypeId,
    /// `logic [7:0]`
    pub byte_vec: TypeId,
    /// `struct { int a; int b; }`
    pub pair: TypeId,
    /// `struct packed { logic [3:0] hi; logic [3:0] lo; }`
    pub packed_pair: TypeId,
    /// `union tagged { void Invalid; int Valid; pair Both; }`
    pub maybe: TypeId,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_options(CompilationOptions::default())
    }

    pub fn with_options(options: CompilationOptions) -> Self {
        init_tracing();
        let mut comp = Compilation::new(options);

        let n = |comp: &Compilation, s: &str| comp.intern(s);
        let nibble = comp.types_mut().logic_vector(4);
        let byte_vec = comp.types_mut().logic_vector(8);

        let fields = [
            FieldDecl::new(n(&comp, "a"), TypeId::INT, Span::DUMMY),
            FieldDecl::new(n(&comp, "b"), TypeId::INT, Span::DUMMY),
        ];
        let pair_name = n(&comp, "pair");
        let pair = comp.types_mut().add_struct(pair_name, false, &fields);

        let fields = [
            FieldDecl::new(n(&comp, "hi"), nibble, Span::DUMMY),
            FieldDecl::new(n(&comp, "lo"), nibble, Span::DUMMY),
        ];
        let packed_name = n(&comp, "packed_pair");
        let packed_pair = comp.types_mut().add_struct(packed_name, true, &fields);

        let fields = [
            FieldDecl::new(n(&comp, "Invalid"), TypeId::VOID, Span::DUMMY),
            FieldDecl::new(n(&comp, "Valid"), TypeId::INT, Span::DUMMY),
            FieldDecl::new(n(&comp, "Both"), pair, Span::DUMMY),
        ];
        let maybe_name = n(&comp, "maybe");
        let maybe = comp.types_mut().add_union(maybe_name, true, false, &fields);

        Fixture {
            comp,
            nibble,
            byte_vec,
            pair,
            packed_pair,
            maybe,
        }
    }

    pub fn root(&self) -> ScopeId {
        self.comp.root()
    }

    /// A binding context at the end of the root scope.
    pub fn bind_ctx(&mut self) -> BindContext<'_> {
        let root = self.comp.root();
        BindContext::new(&mut self.comp, LookupLocation::end_of(root))
    }

    /// An identifier spanning `at..at + name.len()`.
    pub fn ident(&self, name: &str, at: u32) -> Ident {
        let len = u32::try_from(name.len()).unwrap();
        Ident::new(self.comp.intern(name), Span::new(at, at + len))
    }

    pub fn name(&self, name: &str, at: u32) -> NameSyntax {
        NameSyntax::simple(self.ident(name, at))
    }

    pub fn dotted(&self, path: &[&str], at: u32) -> NameSyntax {
        let mut offset = at;
        let segments = path
            .iter()
            .map(|segment| {
                let ident = self.ident(segment, offset);
                offset = ident.span.end + 1;
                ident
            })
            .collect();
        NameSyntax::dotted(segments)
    }

    pub fn name_expr(&self, name: &str, at: u32) -> ExprSyntax {
        ExprSyntax::Name(self.name(name, at))
    }

    /// `.name`
    pub fn var_pat(&self, name: &str, at: u32) -> PatternSyntax {
        let ident = self.ident(name, at + 1);
        PatternSyntax::Variable {
            name: ident,
            span: Span::new(at, ident.span.end),
        }
    }

    /// `tagged Member [pattern]`
    pub fn tagged_pat(&self, member: &str, nested: Option<PatternSyntax>, at: u32) -> PatternSyntax {
        let member = self.ident(member, at + 7);
        let end = nested.as_ref().map_or(member.span.end, |p| p.span().end);
        PatternSyntax::Tagged {
            member,
            pattern: nested.map(Box::new),
            span: Span::new(at, end),
        }
    }

    /// `'{ name: pattern, ... }`
    pub fn named_pat(&self, members: Vec<(&str, PatternSyntax)>, at: u32) -> PatternSyntax {
        let members: Vec<_> = members
            .into_iter()
            .map(|(name, pattern)| {
                let start = pattern.span().start;
                let len = u32::try_from(name.len()).unwrap();
                let name = self.ident(name, start.saturating_sub(len + 2));
                StructurePatternMember::Named {
                    span: name.span.merge(pattern.span()),
                    name,
                    pattern,
                }
            })
            .collect();
        structure(members, at)
    }
}

pub fn span(start: u32, end: u32) -> Span {
    Span::new(start, end)
}

/// Unsized integer literal pattern.
pub fn int_pat(value: u64, at: u32) -> PatternSyntax {
    let span = Span::new(at, at + 1);
    PatternSyntax::Expression {
        expr: ExprSyntax::int(value, span),
        span,
    }
}

/// `.*`
pub fn wildcard(at: u32) -> PatternSyntax {
    PatternSyntax::Wildcard {
        span: Span::new(at, at + 2),
    }
}

/// `'{ p1, p2, ... }`
pub fn ordered_pat(patterns: Vec<PatternSyntax>, at: u32) -> PatternSyntax {
    let members = patterns
        .into_iter()
        .map(|pattern| StructurePatternMember::Ordered {
            span: pattern.span(),
            pattern,
        })
        .collect();
    structure(members, at)
}

fn structure(members: Vec<StructurePatternMember>, at: u32) -> PatternSyntax {
    let end = members.last().map_or(at + 3, |m| m.span().end + 1);
    PatternSyntax::Structure {
        members,
        span: Span::new(at, end),
    }
}

/// Codes of `diags`, in order.
pub fn codes(diags: &[Diagnostic]) -> Vec<ErrorCode> {
    diags.iter().map(|d| d.code).collect()
}
