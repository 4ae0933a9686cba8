//! Find-references implementation.

use tokio_util::sync::CancellationToken;

use super::{document, name_token};
use crate::base::{DocumentUri, Result, TextSize, check_cancelled};
use crate::workspace::{FindReferencesOptions, Reference, Workspace};

/// Find every reference to the declaration named or referenced at `offset`.
///
/// Empty when the offset is not on a resolvable name.
pub fn find_references_at(
    workspace: &Workspace,
    uri: &DocumentUri,
    offset: TextSize,
    include_declaration: bool,
    cancel: &CancellationToken,
) -> Result<Vec<Reference>> {
    check_cancelled(cancel)?;
    let document = document(workspace, uri)?;
    let Some(token) = name_token(&document, offset) else {
        return Ok(Vec::new());
    };
    let references = workspace.references();
    let Some(declaration) = references.find_declaration(&document, &token)? else {
        return Ok(Vec::new());
    };
    let options = FindReferencesOptions {
        only_local: false,
        include_declaration,
    };
    references.find_references(&declaration.description, options, cancel)
}
