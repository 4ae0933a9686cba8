//! Document store: the workspace's documents keyed by URI.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::document::Document;
use crate::base::DocumentUri;

/// Documents in insertion order.
///
/// Each entry is replaced as a whole, so readers holding an `Arc<Document>`
/// always see one consistent state of that document.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<IndexMap<DocumentUri, Arc<Document>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, uri: &DocumentUri) -> Option<Arc<Document>> {
        self.documents.read().get(uri).cloned()
    }

    pub fn contains(&self, uri: &DocumentUri) -> bool {
        self.documents.read().contains_key(uri)
    }

    /// Insert or replace a document, keeping the position of an existing entry.
    pub fn insert(&self, document: impl Into<Arc<Document>>) -> Option<Arc<Document>> {
        let document = document.into();
        self.documents
            .write()
            .insert(document.uri().clone(), document)
    }

    pub fn remove(&self, uri: &DocumentUri) -> Option<Arc<Document>> {
        self.documents.write().shift_remove(uri)
    }

    /// Snapshot of all documents in insertion order.
    pub fn all(&self) -> Vec<Arc<Document>> {
        self.documents.read().values().cloned().collect()
    }

    pub fn uris(&self) -> Vec<DocumentUri> {
        self.documents.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}
