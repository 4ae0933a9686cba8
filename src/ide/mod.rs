//! IDE features - request handlers over a built workspace.
//!
//! Each function corresponds to an editor request and only reads the
//! linked state through [`crate::workspace::References`] and the index;
//! none of them re-implements resolution.
//!
//! ## Design Principles
//!
//! 1. **Thin consumers**: Resolve through `References`, never by hand
//! 2. **No LSP types**: Uses our own types, converted at the LSP boundary
//! 3. **Cancellable**: Every handler takes a token and returns
//!    `Err(LangError::Cancelled)` distinct from an empty result
//!
//! ## Usage
//!
//! ```ignore
//! use tessera::workspace::Workspace;
//!
//! let workspace = Workspace::new();
//! workspace.set_document("file:///a.lang", "def foo;")?;
//!
//! let analysis = workspace.analysis();
//! let symbols = analysis.workspace_symbols("foo")?;
//! ```

mod analysis;
mod fuzzy;
mod goto;
mod references;
mod rename;
mod symbols;

use std::sync::Arc;

pub use analysis::Analysis;
pub use fuzzy::{DefaultFuzzyMatcher, FuzzyMatcher};
pub use goto::{DefinitionLink, get_definition};
pub use references::find_references_at;
pub use rename::{TextEdit, WorkspaceEdit, prepare_rename, rename};
pub use symbols::{
    NodeKindProvider, SymbolKind, WorkspaceSymbol, workspace_symbols, workspace_symbols_with,
};

use crate::base::{DocumentUri, LangError, Result, TextSize};
use crate::parser::{SyntaxToken, find_name_token_at_offset};
use crate::workspace::{Document, Workspace};

fn document(workspace: &Workspace, uri: &DocumentUri) -> Result<Arc<Document>> {
    workspace
        .document(uri)
        .ok_or_else(|| LangError::UnknownDocument(uri.clone()))
}

fn name_token(document: &Document, offset: TextSize) -> Option<SyntaxToken> {
    find_name_token_at_offset(&document.syntax()?, offset)
}
