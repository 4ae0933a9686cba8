//! # tessera-base
//!
//! Core library for grammar-driven language services: a staged document
//! build pipeline, scope-based cross-reference resolution and an
//! incrementally updated workspace index.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide        → Request handlers (definition, rename, references, symbols)
//!   ↓
//! workspace  → Documents, IndexManager, DocumentBuilder, References
//!   ↓
//! hir        → Paths, names, scopes, linking, diagnostics, validation
//!   ↓
//! parser     → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base       → Primitives (DocumentUri, LineIndex, Segment, LangError)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → workspace → ide)
// ============================================================================

/// Foundation types: URIs, positions, line index, errors
pub mod base;

/// Parser: Logos lexer, rowan CST, typed AST for the `.lang` grammar
pub mod parser;

/// Per-document semantics: names, scopes, linking, validation
pub mod hir;

/// Workspace state: documents, index, build pipeline
pub mod workspace;

/// IDE features: go-to-definition, rename, find-references, workspace symbols
pub mod ide;

// Re-export foundation types
pub use base::{
    DocumentUri, LangError, LineIndex, Position, Result, Segment, Span, TextRange, TextSize,
};
pub use workspace::{BuildOptions, DocumentChange, DocumentState, Workspace};
