//! Diagnostics - error and warning reporting for documents.
//!
//! Syntax errors, unresolved references and validation findings all end up
//! as [`Diagnostic`] values stored on the document that produced them.

use std::sync::Arc;

use crate::base::{LineIndex, Segment};
use crate::parser::SyntaxError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// Build phase that produced a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticSource {
    Syntax,
    Linking,
    Validation,
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the problem is.
    pub segment: Segment,
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
    pub source: DiagnosticSource,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(segment: Segment, message: impl Into<Arc<str>>) -> Self {
        Self {
            segment,
            severity: Severity::Error,
            code: None,
            message: message.into(),
            source: DiagnosticSource::Validation,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(segment: Segment, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(segment, message)
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_source(mut self, source: DiagnosticSource) -> Self {
        self.source = source;
        self
    }

    /// Convert a parser error.
    pub fn from_syntax_error(error: &SyntaxError, line_index: &LineIndex) -> Self {
        Self::error(line_index.segment(error.range), error.message.as_str())
            .with_code(codes::SYNTAX_ERROR)
            .with_source(DiagnosticSource::Syntax)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Code Ranges
///
/// - **P0001-P0099**: Parse errors
/// - **E0001-E0099**: Semantic errors (linking, validation)
pub mod codes {
    /// Syntax error reported by the parser.
    pub const SYNTAX_ERROR: &str = "P0001";
    /// Undefined reference (name not found).
    pub const UNDEFINED_REFERENCE: &str = "E0001";
    /// Duplicate declaration in one container.
    pub const DUPLICATE_DEFINITION: &str = "E0004";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during validation.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a duplicate declaration error at the later declaration's name.
    pub fn duplicate_definition(&mut self, segment: Segment, name: &str) {
        self.add(
            Diagnostic::error(segment, format!("duplicate declaration '{}'", name))
                .with_code(codes::DUPLICATE_DEFINITION),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Finish and return the collected diagnostics.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
