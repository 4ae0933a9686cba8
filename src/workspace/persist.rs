//! Persisted export table.
//!
//! Saves the index's exports keyed by URI as JSON so a later session can
//! resolve names in documents it has not parsed yet.

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::index::IndexManager;
use crate::base::{DocumentUri, LangError, Result};
use crate::hir::AstNodeDescription;

/// Bumped when the layout of [`PersistedIndex`] changes.
pub const INDEX_FORMAT_VERSION: u32 = 1;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedIndex {
    pub format: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<PersistedDocument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub uri: DocumentUri,
    pub exports: Vec<AstNodeDescription>,
}

impl IndexManager {
    /// Snapshot of the export table in index order.
    pub fn to_persisted(&self) -> PersistedIndex {
        let documents = self
            .uris()
            .into_iter()
            .filter_map(|uri| {
                let exports = self.exports_of(&uri)?;
                Some(PersistedDocument {
                    uri,
                    exports: exports.to_vec(),
                })
            })
            .collect();
        PersistedIndex {
            format: INDEX_FORMAT_VERSION,
            documents,
        }
    }

    /// Write the export table as JSON.
    pub fn save(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.to_persisted())?;
        Ok(())
    }

    /// Load a persisted export table, replacing the slices of the URIs it
    /// contains. Returns the number of documents loaded.
    ///
    /// A table of another format version is rejected and nothing is loaded.
    pub fn load(&self, reader: impl Read) -> Result<usize> {
        let persisted: PersistedIndex = serde_json::from_reader(reader)?;
        if persisted.format != INDEX_FORMAT_VERSION {
            return Err(LangError::IndexFormat {
                found: persisted.format,
                expected: INDEX_FORMAT_VERSION,
            });
        }
        let count = persisted.documents.len();
        for document in persisted.documents {
            self.set_exports(&document.uri, document.exports);
        }
        debug!("[INDEX] loaded {} persisted documents", count);
        Ok(count)
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.save(std::io::BufWriter::new(file))
    }

    pub fn read_from_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let file = std::fs::File::open(path.as_ref())?;
        self.load(std::io::BufReader::new(file))
    }
}
