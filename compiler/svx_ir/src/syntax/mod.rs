//! Syntax input consumed by binding.
//!
//! These nodes are produced by an external parser and handed to the
//! semantic core read-only. Only the shapes the core interprets are modeled:
//! patterns, the expression forms a constant pattern or system call
//! argument needs (system calls included), hierarchical names, and net type
//! declarations.
//!
//! A missing identifier token is represented by an [`Ident`] whose name is
//! [`Name::EMPTY`]; the parser has already reported it, so binding stays
//! silent about it.

use crate::{Name, Span};

/// An identifier token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Ident {
    pub name: Name,
    pub span: Span,
}

impl Ident {
    pub const fn new(name: Name, span: Span) -> Self {
        Ident { name, span }
    }

    /// An identifier the parser expected but did not find.
    pub const fn missing(span: Span) -> Self {
        Ident {
            name: Name::EMPTY,
            span,
        }
    }

    pub const fn is_missing(&self) -> bool {
        self.name.is_empty()
    }
}

/// A possibly dotted name such as `f`, `pkg.f` or `top.u1.f`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NameSyntax {
    /// Path segments, outermost first. Never empty.
    pub segments: Vec<Ident>,
    /// Whether any segment carried an element or range select (`a[0].f`).
    pub has_selectors: bool,
    pub span: Span,
}

impl NameSyntax {
    /// A single identifier.
    pub fn simple(ident: Ident) -> Self {
        NameSyntax {
            segments: vec![ident],
            has_selectors: false,
            span: ident.span,
        }
    }

    /// A dotted path. The span covers every segment.
    pub fn dotted(segments: Vec<Ident>) -> Self {
        let span = segments
            .iter()
            .map(|s| s.span)
            .reduce(Span::merge)
            .unwrap_or(Span::DUMMY);
        NameSyntax {
            segments,
            has_selectors: false,
            span,
        }
    }

    #[must_use]
    pub fn with_selectors(mut self) -> Self {
        self.has_selectors = true;
        self
    }

    /// Final segment of the path.
    pub fn last(&self) -> Option<Ident> {
        self.segments.last().copied()
    }

    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }
}

/// Expression forms the core binds directly.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ExprSyntax {
    /// `42`, `8'd3`, `4'sb1010`. An unsized literal has no width.
    IntegerLiteral {
        value: u64,
        width: Option<u32>,
        signed: bool,
        span: Span,
    },
    StringLiteral {
        value: String,
        span: Span,
    },
    Name(NameSyntax),
    Parenthesized {
        inner: Box<ExprSyntax>,
        span: Span,
    },
    /// `$name(args)`. An elided argument (`$f(a,,b)`) is `None`.
    SystemCall {
        name: Ident,
        args: Vec<Option<ExprSyntax>>,
        span: Span,
    },
    /// `receiver.name(args)` for builtin methods.
    MethodCall {
        receiver: Box<ExprSyntax>,
        method: Ident,
        args: Vec<Option<ExprSyntax>>,
        span: Span,
    },
    /// Placeholder for an expression the parser failed to produce.
    Missing {
        span: Span,
    },
}

impl ExprSyntax {
    /// An unsized decimal literal such as `42`.
    pub fn int(value: u64, span: Span) -> Self {
        ExprSyntax::IntegerLiteral {
            value,
            width: None,
            signed: true,
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ExprSyntax::IntegerLiteral { span, .. }
            | ExprSyntax::StringLiteral { span, .. }
            | ExprSyntax::Parenthesized { span, .. }
            | ExprSyntax::SystemCall { span, .. }
            | ExprSyntax::MethodCall { span, .. }
            | ExprSyntax::Missing { span } => *span,
            ExprSyntax::Name(name) => name.span,
        }
    }
}

/// Discriminant of a [`PatternSyntax`] node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PatternSyntaxKind {
    Parenthesized,
    Wildcard,
    Expression,
    Variable,
    Tagged,
    Structure,
}

/// Pattern syntax as it appears in `case ... matches`, `if ... matches` and
/// conditional `matches` expressions.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum PatternSyntax {
    /// `( pattern )`
    Parenthesized {
        pattern: Box<PatternSyntax>,
        span: Span,
    },
    /// `.*`
    Wildcard { span: Span },
    /// A constant expression.
    Expression { expr: ExprSyntax, span: Span },
    /// `.name`
    Variable { name: Ident, span: Span },
    /// `tagged Member [pattern]`
    Tagged {
        member: Ident,
        pattern: Option<Box<PatternSyntax>>,
        span: Span,
    },
    /// `'{ p1, p2 }` or `'{ a: p1, b: p2 }`
    Structure {
        members: Vec<StructurePatternMember>,
        span: Span,
    },
}

impl PatternSyntax {
    pub fn kind(&self) -> PatternSyntaxKind {
        match self {
            PatternSyntax::Parenthesized { .. } => PatternSyntaxKind::Parenthesized,
            PatternSyntax::Wildcard { .. } => PatternSyntaxKind::Wildcard,
            PatternSyntax::Expression { .. } => PatternSyntaxKind::Expression,
            PatternSyntax::Variable { .. } => PatternSyntaxKind::Variable,
            PatternSyntax::Tagged { .. } => PatternSyntaxKind::Tagged,
            PatternSyntax::Structure { .. } => PatternSyntaxKind::Structure,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            PatternSyntax::Parenthesized { span, .. }
            | PatternSyntax::Wildcard { span }
            | PatternSyntax::Expression { span, .. }
            | PatternSyntax::Variable { span, .. }
            | PatternSyntax::Tagged { span, .. }
            | PatternSyntax::Structure { span, .. } => *span,
        }
    }
}

/// One member of a structure pattern.
///
/// A well-formed structure pattern uses a single member shape throughout.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum StructurePatternMember {
    /// Positional member, paired with struct fields in declaration order.
    Ordered { pattern: PatternSyntax, span: Span },
    /// `name: pattern`
    Named {
        name: Ident,
        pattern: PatternSyntax,
        span: Span,
    },
}

impl StructurePatternMember {
    pub fn span(&self) -> Span {
        match self {
            StructurePatternMember::Ordered { span, .. }
            | StructurePatternMember::Named { span, .. } => *span,
        }
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self, StructurePatternMember::Ordered { .. })
    }
}

/// `nettype T name [with resolver];`
///
/// The data type is bound by the declaring scope before the net type symbol
/// is created, so only the parts the resolver validation needs are kept.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NetTypeDeclarationSyntax {
    pub name: Ident,
    pub with_function: Option<NameSyntax>,
    pub span: Span,
}

#[cfg(test)]
mod tests;
