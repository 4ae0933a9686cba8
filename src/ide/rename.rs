//! Rename and prepare-rename.

use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;

use super::{document, name_token};
use crate::base::{DocumentUri, Result, Segment, TextSize, check_cancelled, is_identifier};
use crate::parser::{Lexer, token_segment};
use crate::workspace::{FindReferencesOptions, Workspace};

/// Replace the text of `range` with `new_text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Segment,
    pub new_text: String,
}

/// Edits grouped by document, each list ordered by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkspaceEdit {
    pub changes: IndexMap<DocumentUri, Vec<TextEdit>>,
}

impl WorkspaceEdit {
    pub fn edits_for(&self, uri: &DocumentUri) -> &[TextEdit] {
        self.changes.get(uri).map_or(&[], Vec::as_slice)
    }

    /// Total number of edits across documents.
    pub fn len(&self) -> usize {
        self.changes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Rename the declaration named or referenced at `offset` to `new_name`.
///
/// Returns `Ok(None)` ("nothing to rename") when `new_name` is not a valid
/// identifier (keywords included) or the offset is not on a resolvable name.
pub fn rename(
    workspace: &Workspace,
    uri: &DocumentUri,
    offset: TextSize,
    new_name: &str,
    cancel: &CancellationToken,
) -> Result<Option<WorkspaceEdit>> {
    check_cancelled(cancel)?;
    if !is_valid_name(new_name) {
        return Ok(None);
    }
    let document = document(workspace, uri)?;
    let Some(token) = name_token(&document, offset) else {
        return Ok(None);
    };
    let Some(declaration) = workspace.references().find_declaration(&document, &token)? else {
        return Ok(None);
    };

    let options = FindReferencesOptions {
        only_local: false,
        include_declaration: true,
    };
    let references = workspace
        .references()
        .find_references(&declaration.description, options, cancel)?;

    let mut edit = WorkspaceEdit::default();
    for reference in references {
        edit.changes
            .entry(reference.source_uri)
            .or_default()
            .push(TextEdit {
                range: reference.segment,
                new_text: new_name.to_string(),
            });
    }
    Ok((!edit.is_empty()).then_some(edit))
}

fn is_valid_name(text: &str) -> bool {
    is_identifier(text) && !Lexer::new(text).any(|token| token.kind.is_keyword())
}

/// The span a rename at `offset` would edit.
///
/// `Ok(None)` unless the offset is on a declaration's name or on a
/// reference that resolves.
pub fn prepare_rename(
    workspace: &Workspace,
    uri: &DocumentUri,
    offset: TextSize,
    cancel: &CancellationToken,
) -> Result<Option<Segment>> {
    check_cancelled(cancel)?;
    let document = document(workspace, uri)?;
    let Some(token) = name_token(&document, offset) else {
        return Ok(None);
    };
    let segment = token_segment(&token, document.line_index());
    if workspace.services().name_provider.is_name_node(&token) {
        return Ok(Some(segment));
    }
    let resolved = workspace
        .references()
        .find_declaration(&document, &token)?
        .is_some();
    Ok(resolved.then_some(segment))
}
