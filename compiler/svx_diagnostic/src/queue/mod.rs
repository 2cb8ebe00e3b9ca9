//! Collection point for reported diagnostics.
//!
//! Diagnostics are kept in report order and handed back sorted by primary
//! span. The queue can cap the number of errors and drop exact repeats,
//! which keeps a cascade from one broken declaration readable.

use crate::{Diagnostic, ErrorGuaranteed};

/// Filtering applied by a [`DiagnosticQueue`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Errors past this count are dropped. 0 disables the cap. Warnings are
    /// never dropped.
    pub error_limit: usize,
    /// Drop a diagnostic equal to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Keep everything.
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            deduplicate: false,
            ..DiagnosticConfig::default()
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticQueue {
    config: DiagnosticConfig,
    pending: Vec<Diagnostic>,
    errors: usize,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..DiagnosticQueue::default()
        }
    }

    /// Queue `diag` unless the config filters it. Returns whether it was kept.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        let counts = diag.is_error();
        if counts && self.limit_reached() {
            tracing::debug!(code = %diag.code, limit = self.config.error_limit, "dropping error past limit");
            return false;
        }
        if self.config.deduplicate && self.pending.contains(&diag) {
            return false;
        }

        self.errors += usize::from(counts);
        self.pending.push(diag);
        true
    }

    /// Queue an error and take proof of it.
    ///
    /// A filtered error still yields proof: it was either a repeat of a queued
    /// error or arrived after the limit was hit.
    pub fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diag.is_error(), "emit_error called with a {}", diag.severity);
        self.add(diag);
        ErrorGuaranteed::new()
    }

    pub fn limit_reached(&self) -> bool {
        match self.config.error_limit {
            0 => false,
            limit => self.errors >= limit,
        }
    }

    /// Errors queued since the last flush.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.errors)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queued diagnostics in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.pending.iter()
    }

    /// Empty the queue, returning its contents ordered by primary span.
    ///
    /// Diagnostics without a primary span go last. Ties keep report order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.errors = 0;
        let mut drained = std::mem::take(&mut self.pending);
        drained.sort_by_key(|d| d.primary_span().map_or(u32::MAX, |span| span.start));
        drained
    }
}

impl<'a> IntoIterator for &'a DiagnosticQueue {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests;
