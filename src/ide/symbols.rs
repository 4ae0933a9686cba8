//! Workspace symbol search.

use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use super::fuzzy::{DefaultFuzzyMatcher, FuzzyMatcher};
use crate::base::{DocumentUri, Result, Segment, check_cancelled};
use crate::hir::NodeKind;
use crate::workspace::IndexManager;

/// Editor-facing symbol kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Class,
}

impl SymbolKind {
    /// Convert to LSP symbol kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            SymbolKind::Namespace => 3,
            SymbolKind::Class => 5,
        }
    }
}

/// Maps declaration kinds to symbol kinds.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeKindProvider;

impl NodeKindProvider {
    pub fn symbol_kind(&self, kind: NodeKind) -> SymbolKind {
        match kind {
            NodeKind::Package => SymbolKind::Namespace,
            NodeKind::Definition => SymbolKind::Class,
        }
    }
}

/// A symbol for the workspace symbol list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceSymbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// Range of the symbol's name.
    pub range: Segment,
    pub uri: DocumentUri,
}

/// Search exported declarations with the default matcher.
pub fn workspace_symbols(
    index: &IndexManager,
    query: &str,
    cancel: &CancellationToken,
) -> Result<Vec<WorkspaceSymbol>> {
    workspace_symbols_with(index, query, &DefaultFuzzyMatcher, cancel)
}

/// Search exported declarations, sorted by name then document.
///
/// Cancellation is checked before every candidate; a cancelled search
/// returns [`crate::base::LangError::Cancelled`], never a partial list.
pub fn workspace_symbols_with(
    index: &IndexManager,
    query: &str,
    matcher: &dyn FuzzyMatcher,
    cancel: &CancellationToken,
) -> Result<Vec<WorkspaceSymbol>> {
    let query = query.to_lowercase();
    let kinds = NodeKindProvider;
    let mut symbols = Vec::new();
    for description in index.all_elements(None) {
        check_cancelled(cancel)?;
        if matcher.matches(&query, &description.name) {
            symbols.push(WorkspaceSymbol {
                kind: kinds.symbol_kind(description.kind),
                range: description.name_segment,
                name: description.name,
                uri: description.document_uri,
            });
        }
    }
    symbols.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.uri.as_str().cmp(b.uri.as_str()))
    });
    Ok(symbols)
}
