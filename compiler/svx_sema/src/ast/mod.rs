//! Bound nodes and the arena that owns them.

use svx_ir::{ExprId, PatternId, PatternVarId, Span, SymbolId};
use svx_types::{ConstantValue, SvInt, TypeId};

use crate::patterns::{Pattern, PatternVar};
use crate::subroutines::SystemSubroutine;

/// A call to a builtin subroutine.
#[derive(Clone, Debug)]
pub struct SystemCall {
    pub subroutine: &'static dyn SystemSubroutine,
    /// Bound arguments. For method calls the receiver comes first.
    pub args: Vec<ExprId>,
    /// Receiver of a method call, or the iterator of a `with` clause.
    pub iter_or_this: Option<ExprId>,
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    /// Failed to bind. Keeps the partially bound node, if any.
    Invalid { child: Option<ExprId> },
    IntegerLiteral(SvInt),
    StringLiteral(String),
    /// Reference to a variable or parameter.
    NamedValue { symbol: SymbolId, hierarchical: bool },
    /// Reference to a variable declared by a pattern.
    PatternVar(PatternVarId),
    /// Implicit conversion of `operand` to the expression's type.
    Conversion { operand: ExprId },
    SystemCall(SystemCall),
    /// An elided argument the called subroutine accepts.
    EmptyArgument,
}

#[derive(Clone, Debug)]
pub struct Expression {
    pub kind: ExprKind,
    pub ty: TypeId,
    pub span: Span,
    /// Folded value, filled in by [`BindContext::eval`](crate::BindContext::eval).
    pub constant: Option<ConstantValue>,
}

impl Expression {
    pub fn new(kind: ExprKind, ty: TypeId, span: Span) -> Self {
        Expression {
            kind,
            ty,
            span,
            constant: None,
        }
    }

    #[inline]
    pub fn bad(&self) -> bool {
        matches!(self.kind, ExprKind::Invalid { .. })
    }
}

/// Arena of every expression, pattern and pattern variable bound in one
/// compilation. Nodes are never removed.
#[derive(Clone, Debug, Default)]
pub struct AstArena {
    exprs: Vec<Expression>,
    patterns: Vec<Pattern>,
    pattern_vars: Vec<PatternVar>,
}

impl AstArena {
    pub fn alloc_expr(&mut self, expr: Expression) -> ExprId {
        let id = ExprId::from_index(self.exprs.len());
        self.exprs.push(expr);
        id
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expression {
        &self.exprs[id.index()]
    }

    pub(crate) fn expr_mut(&mut self, id: ExprId) -> &mut Expression {
        &mut self.exprs[id.index()]
    }

    pub fn alloc_pattern(&mut self, pattern: Pattern) -> PatternId {
        let id = PatternId::from_index(self.patterns.len());
        self.patterns.push(pattern);
        id
    }

    #[inline]
    pub fn pattern(&self, id: PatternId) -> &Pattern {
        &self.patterns[id.index()]
    }

    pub(crate) fn pattern_mut(&mut self, id: PatternId) -> &mut Pattern {
        &mut self.patterns[id.index()]
    }

    pub fn alloc_pattern_var(&mut self, var: PatternVar) -> PatternVarId {
        let id = PatternVarId::from_index(self.pattern_vars.len());
        self.pattern_vars.push(var);
        id
    }

    #[inline]
    pub fn pattern_var(&self, id: PatternVarId) -> &PatternVar {
        &self.pattern_vars[id.index()]
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Whether `id` refers to anything through a module instance path.
    pub fn has_hierarchical_reference(&self, id: ExprId) -> bool {
        match &self.expr(id).kind {
            ExprKind::NamedValue { hierarchical, .. } => *hierarchical,
            ExprKind::Invalid { child } => child.is_some_and(|c| self.has_hierarchical_reference(c)),
            ExprKind::Conversion { operand } => self.has_hierarchical_reference(*operand),
            ExprKind::SystemCall(call) => {
                call.args.iter().any(|a| self.has_hierarchical_reference(*a))
            }
            ExprKind::IntegerLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::PatternVar(_)
            | ExprKind::EmptyArgument => false,
        }
    }
}
