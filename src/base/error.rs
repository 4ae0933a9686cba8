//! Error types shared by the pipeline and request handlers.

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::DocumentUri;

/// Errors surfaced by multi-document operations and requests.
///
/// Expected failures (syntax errors, unresolved names) are never
/// represented here; they are data on the document.
#[derive(Debug, Error)]
pub enum LangError {
    /// The operation observed its cancellation token. Not the same as "not found".
    #[error("operation cancelled")]
    Cancelled,

    /// A request named a document that is not in the workspace.
    #[error("unknown document: {0}")]
    UnknownDocument(DocumentUri),

    /// An index entry points at a path that no longer exists in its own document.
    #[error("index entry {path} no longer resolves inside {uri}")]
    DanglingPath { uri: DocumentUri, path: String },

    /// IO error while reading or writing a persisted index.
    #[cfg(feature = "persistence")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed persisted index.
    #[cfg(feature = "persistence")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Persisted index written with a different layout.
    #[cfg(feature = "persistence")]
    #[error("unsupported index format {found} (expected {expected})")]
    IndexFormat { found: u32, expected: u32 },
}

impl LangError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, LangError>;

/// Return [`LangError::Cancelled`] if the token has been signalled.
pub fn check_cancelled(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        Err(LangError::Cancelled)
    } else {
        Ok(())
    }
}
