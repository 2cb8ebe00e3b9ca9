//! Compilation-wide settings.

use svx_diagnostic::DiagnosticConfig;

/// Options that change how a [`Compilation`](crate::Compilation) reports
/// and folds.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CompilationOptions {
    /// Maximum number of errors kept in the diagnostic sink (0 = unlimited).
    pub error_limit: usize,
    /// Allow hierarchical references as arguments of constant system functions.
    pub allow_hierarchical_const: bool,
    /// Drop a diagnostic identical to one already reported.
    pub deduplicate_diagnostics: bool,
}

impl CompilationOptions {
    pub(crate) fn diagnostic_config(&self) -> DiagnosticConfig {
        DiagnosticConfig {
            error_limit: self.error_limit,
            deduplicate: self.deduplicate_diagnostics,
        }
    }
}
