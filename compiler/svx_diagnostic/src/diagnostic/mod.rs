//! The diagnostic record and its builder.

use std::fmt;

use svx_ir::Span;

use crate::ErrorCode;

/// How bad a diagnostic is. Decided by its code.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn of(code: ErrorCode) -> Self {
        if code.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a label marks the offending code or something it relates to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LabelRole {
    /// Where the problem is. The diagnostic is sorted by the first one.
    Primary,
    /// A related location: a prior declaration, a use site.
    Related,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub role: LabelRole,
}

impl Label {
    #[inline]
    pub fn is_primary(&self) -> bool {
        self.role == LabelRole::Primary
    }
}

/// One reported problem.
///
/// Built with the `with_*` methods, starting from [`Diagnostic::new`]:
///
/// ```
/// # use svx_diagnostic::{Diagnostic, ErrorCode};
/// # use svx_ir::Span;
/// let diag = Diagnostic::new(ErrorCode::E2004)
///     .with_message("redefinition of 'x'")
///     .with_label(Span::new(10, 11), "redefined here")
///     .with_declared_here(Span::new(2, 3));
/// assert_eq!(diag.primary_span(), Some(Span::new(10, 11)));
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "a diagnostic does nothing until it is reported"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    /// Labels in the order they were added.
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    #[cold]
    pub fn new(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::of(code),
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    fn push_label(mut self, span: Span, message: impl Into<String>, role: LabelRole) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
            role,
        });
        self
    }

    /// Mark where the problem is.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(span, message, LabelRole::Primary)
    }

    /// Point at a related location.
    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(span, message, LabelRole::Related)
    }

    pub fn with_declared_here(self, span: Span) -> Self {
        self.with_secondary_label(span, "declared here")
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary()).map(|l| l.span)
    }

    pub fn secondary_labels(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter().filter(|l| !l.is_primary())
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Plain-text rendering, one line per label and note.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        for label in &self.labels {
            let role = match label.role {
                LabelRole::Primary => "at",
                LabelRole::Related => "see",
            };
            write!(f, "\n  {role} {:?}: {}", label.span, label.message)?;
        }
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
