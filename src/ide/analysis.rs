//! Analysis - position-based entry point for the request handlers.
//!
//! `Analysis` borrows a [`Workspace`], converts editor positions to
//! offsets and forwards to the handler functions. Every query made
//! through one `Analysis` shares its cancellation token.
//!
//! ## Usage
//!
//! ```ignore
//! let workspace = Workspace::new();
//! workspace.set_document("file:///a.lang", "def foo;")?;
//!
//! let analysis = workspace.analysis();
//! let link = analysis.goto_definition(&uri, Position::new(0, 5))?;
//! let symbols = analysis.workspace_symbols("fo")?;
//! ```

use tokio_util::sync::CancellationToken;

use super::{DefinitionLink, WorkspaceEdit, WorkspaceSymbol};
use crate::base::{DocumentUri, Position, Result, Segment, TextSize};
use crate::hir::Diagnostic;
use crate::workspace::{Reference, Workspace};

impl Workspace {
    /// Get a query snapshot over the current state.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            workspace: self,
            cancel: CancellationToken::new(),
        }
    }
}

pub struct Analysis<'a> {
    workspace: &'a Workspace,
    cancel: CancellationToken,
}

impl<'a> Analysis<'a> {
    /// Use `cancel` for every following query.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Go to definition at a position.
    pub fn goto_definition(
        &self,
        uri: &DocumentUri,
        position: Position,
    ) -> Result<Option<DefinitionLink>> {
        let Some(offset) = self.offset(uri, position)? else {
            return Ok(None);
        };
        super::get_definition(self.workspace, uri, offset, &self.cancel)
    }

    /// Find all references to the symbol at a position.
    pub fn find_references(
        &self,
        uri: &DocumentUri,
        position: Position,
        include_declaration: bool,
    ) -> Result<Vec<Reference>> {
        let Some(offset) = self.offset(uri, position)? else {
            return Ok(Vec::new());
        };
        super::find_references_at(
            self.workspace,
            uri,
            offset,
            include_declaration,
            &self.cancel,
        )
    }

    pub fn rename(
        &self,
        uri: &DocumentUri,
        position: Position,
        new_name: &str,
    ) -> Result<Option<WorkspaceEdit>> {
        let Some(offset) = self.offset(uri, position)? else {
            return Ok(None);
        };
        super::rename(self.workspace, uri, offset, new_name, &self.cancel)
    }

    pub fn prepare_rename(&self, uri: &DocumentUri, position: Position) -> Result<Option<Segment>> {
        let Some(offset) = self.offset(uri, position)? else {
            return Ok(None);
        };
        super::prepare_rename(self.workspace, uri, offset, &self.cancel)
    }

    /// Search for symbols across the workspace.
    pub fn workspace_symbols(&self, query: &str) -> Result<Vec<WorkspaceSymbol>> {
        super::workspace_symbols(self.workspace.index(), query, &self.cancel)
    }

    /// Diagnostics of a document in its current state.
    pub fn diagnostics(&self, uri: &DocumentUri) -> Result<Vec<Diagnostic>> {
        Ok(super::document(self.workspace, uri)?.diagnostics())
    }

    fn offset(&self, uri: &DocumentUri, position: Position) -> Result<Option<TextSize>> {
        let document = super::document(self.workspace, uri)?;
        Ok(document.line_index().offset(position))
    }
}
