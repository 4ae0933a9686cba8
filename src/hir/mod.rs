//! High-level IR (HIR) - per-document semantics.
//!
//! Everything here is a pure function of one document's syntax tree plus,
//! for linking, a read-only view of the global scope. Cross-document state
//! (documents, index, pipeline) lives in [`crate::workspace`].
//!
//! ## Key Types
//!
//! - [`AstPath`] / [`NodeRef`] - Weak, structural references to AST nodes
//! - [`AstNodeDescription`] - Serializable summary of one exported declaration
//! - [`NameProvider`] - Single source of truth for a declaration's name span
//! - [`Scope`] - Nested name bindings, local first and global outermost
//! - [`Linker`] - Resolves every cross-reference of a document
//! - [`Validator`] - Pluggable validation of linked documents
//!
//! ## Flow
//!
//! ```text
//! SourceFile
//!     │
//!     ├── compute_exports        → AstNodeDescription*   (index content)
//!     ├── compute_local_scopes   → LocalScopes           (per container)
//!     ▼
//! Linker::link(scopes, global)   → CrossReference*       (+ link diagnostics)
//!     │
//!     ▼
//! Validator::validate            → Diagnostic*
//! ```

mod description;
mod diagnostics;
mod linker;
mod name;
mod path;
mod scope;
mod validation;

pub use description::{AstNodeDescription, NodeKind, NodeRef};
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticSource, Severity, codes};
pub use linker::{
    CrossReference, LinkError, LinkResult, Linkage, Linker, ReferenceProperty, ReferenceSite,
    collect_reference_sites,
};
pub use name::NameProvider;
pub use path::{AstPath, ParsePathError, walk_members};
pub use scope::{
    DefaultScopeComputation, DefaultScopeProvider, GlobalScope, LocalScope, LocalScopes, Scope,
    ScopeComputation, ScopeProvider,
};
pub use validation::{DefaultValidator, ValidationContext, Validator};
