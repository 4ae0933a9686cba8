//! Foundation types shared by every layer.
//!
//! - [`DocumentUri`] - Unique key of a document in the workspace
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`] - Offset ↔ line/column conversion
//! - [`Position`], [`Span`], [`Segment`] - Line/column ranges for editor requests
//! - [`LangError`] - Error type, including the cancellation outcome
//!
//! This module has NO dependencies on other tessera modules.

mod error;
mod line_index;
mod position;
mod uri;

pub use error::{LangError, Result, check_cancelled};
pub use line_index::LineIndex;
pub use position::{Position, Segment, Span};
pub use uri::DocumentUri;

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};

/// Check whether `text` is a valid identifier of the reference language.
///
/// Follows Unicode Standard Annex #31, with `_` allowed as a start character.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}
