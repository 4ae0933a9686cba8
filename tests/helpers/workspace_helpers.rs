//! Workspace setup and position helpers.

use tessera::base::{DocumentUri, Position, TextSize};
use tessera::workspace::{Document, DocumentChange, Workspace};
use tokio_util::sync::CancellationToken;

/// URI for a test document name.
pub fn uri(name: &str) -> DocumentUri {
    DocumentUri::new(format!("memory:/{}", name))
}

/// Builds a workspace from `(name, text)` pairs in one batch.
pub fn workspace_from_sources(files: &[(&str, &str)]) -> Workspace {
    let workspace = Workspace::new();
    build_into(&workspace, files);
    workspace
}

/// Applies `(name, text)` pairs as one batch, bumping versions.
pub fn build_into(workspace: &Workspace, files: &[(&str, &str)]) {
    let changes = files
        .iter()
        .map(|(name, text)| {
            let uri = uri(name);
            let version = workspace.document(&uri).map_or(1, |d| d.version() + 1);
            DocumentChange::new(uri, version, *text)
        })
        .collect();
    workspace
        .update(changes, Vec::new(), &CancellationToken::new())
        .expect("build should not be cancelled");
}

pub fn document(workspace: &Workspace, name: &str) -> std::sync::Arc<Document> {
    workspace
        .document(&uri(name))
        .unwrap_or_else(|| panic!("document '{}' should exist", name))
}

/// Byte offset of the `nth` (0-based) occurrence of `needle` in `text`.
pub fn offset_of(text: &str, needle: &str, nth: usize) -> TextSize {
    let offset = text
        .match_indices(needle)
        .nth(nth)
        .map(|(offset, _)| offset)
        .unwrap_or_else(|| panic!("'{}' occurs fewer than {} times", needle, nth + 1));
    TextSize::new(offset as u32)
}

/// Line/column of the `nth` occurrence of `needle` in `text`.
pub fn position_of(text: &str, needle: &str, nth: usize) -> Position {
    let offset = u32::from(offset_of(text, needle, nth)) as usize;
    let before = &text[..offset];
    let line = before.matches('\n').count();
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count());
    Position::new(line, column)
}

/// Applies the edits of one document to its text, last edit first.
pub fn apply_edits(text: &str, edits: &[tessera::ide::TextEdit]) -> String {
    let mut result = text.to_string();
    let mut edits: Vec<_> = edits.iter().collect();
    edits.sort_by_key(|e| std::cmp::Reverse(e.range.range.start()));
    for edit in edits {
        let start = u32::from(edit.range.range.start()) as usize;
        let end = u32::from(edit.range.range.end()) as usize;
        result.replace_range(start..end, &edit.new_text);
    }
    result
}
