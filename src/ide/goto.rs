//! Go-to-definition implementation.

use tokio_util::sync::CancellationToken;

use super::{document, name_token};
use crate::base::{DocumentUri, Result, Segment, TextSize, check_cancelled};
use crate::parser::{AstNode, token_segment};
use crate::workspace::Workspace;

/// Result of a go-to-definition request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefinitionLink {
    pub target_uri: DocumentUri,
    /// The whole declaration when its document is loaded, otherwise its name.
    pub target_range: Segment,
    /// The declaration's name.
    pub target_selection_range: Segment,
    /// The clicked identifier.
    pub source_range: Segment,
}

/// Find the declaration of the identifier at `offset`.
///
/// Returns `Ok(None)` when the offset is not on an identifier or the
/// reference does not resolve.
pub fn get_definition(
    workspace: &Workspace,
    uri: &DocumentUri,
    offset: TextSize,
    cancel: &CancellationToken,
) -> Result<Option<DefinitionLink>> {
    check_cancelled(cancel)?;
    let document = document(workspace, uri)?;
    let Some(token) = name_token(&document, offset) else {
        return Ok(None);
    };

    let references = workspace.references();
    let Some(declaration) = references.find_declaration(&document, &token)? else {
        return Ok(None);
    };
    let name = references.name_location(&declaration);

    let target_range = declaration
        .node
        .as_ref()
        .zip(workspace.document(&name.uri))
        .map(|(member, target)| target.line_index().segment(member.syntax().text_range()))
        .unwrap_or(name.segment);

    Ok(Some(DefinitionLink {
        target_uri: name.uri,
        target_range,
        target_selection_range: name.segment,
        source_range: token_segment(&token, document.line_index()),
    }))
}
