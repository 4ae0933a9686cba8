//! Workspace - documents, the global index and the build pipeline.
//!
//! [`Workspace`] owns all mutable state. Changes go through
//! [`Workspace::update`] (or the single-document helpers), which runs a
//! [`DocumentBuilder`] batch; queries read the stored documents and the
//! [`IndexManager`] through [`References`] or an `Analysis` snapshot.
//!
//! ## Usage
//!
//! ```ignore
//! let workspace = Workspace::new();
//! workspace.set_document("file:///a.lang", "def foo;")?;
//! workspace.set_document("file:///b.lang", "use foo;")?;
//!
//! let doc = workspace.document(&"file:///b.lang".into()).unwrap();
//! assert!(doc.diagnostics().is_empty());
//! ```

mod builder;
mod document;
mod index;
#[cfg(feature = "persistence")]
mod persist;
mod references;
mod store;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

pub use builder::{BuildOptions, BuildSummary, DocumentBuilder, DocumentChange};
pub use document::{Document, DocumentState};
pub use index::{IndexManager, ReferenceDescription};
#[cfg(feature = "persistence")]
pub use persist::{INDEX_FORMAT_VERSION, PersistedDocument, PersistedIndex};
pub use references::{Declaration, FindReferencesOptions, NameLocation, Reference, References};
pub use store::DocumentStore;

use crate::base::{DocumentUri, Result};
use crate::hir::{
    DefaultScopeComputation, DefaultScopeProvider, DefaultValidator, NameProvider,
    ScopeComputation, ScopeProvider, Validator,
};
use crate::parser::{LangParser, SourceParser};

/// The pluggable strategies of a language.
pub struct LanguageServices {
    pub parser: Arc<dyn SourceParser>,
    pub scope_computation: Arc<dyn ScopeComputation>,
    pub scope_provider: Arc<dyn ScopeProvider>,
    pub validator: Arc<dyn Validator>,
    pub name_provider: NameProvider,
}

impl Default for LanguageServices {
    fn default() -> Self {
        Self {
            parser: Arc::new(LangParser),
            scope_computation: Arc::new(DefaultScopeComputation::default()),
            scope_provider: Arc::new(DefaultScopeProvider),
            validator: Arc::new(DefaultValidator::default()),
            name_provider: NameProvider,
        }
    }
}

/// Owns every document of a workspace and keeps them built.
pub struct Workspace {
    services: Arc<LanguageServices>,
    documents: Arc<DocumentStore>,
    index: Arc<IndexManager>,
    builder: DocumentBuilder,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// A workspace for the built-in language with default options.
    pub fn new() -> Self {
        Self::with_services(LanguageServices::default(), BuildOptions::default())
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self::with_services(LanguageServices::default(), options)
    }

    pub fn with_services(services: LanguageServices, options: BuildOptions) -> Self {
        let services = Arc::new(services);
        let documents = Arc::new(DocumentStore::new());
        let index = Arc::new(IndexManager::new());
        let builder = DocumentBuilder::new(
            services.clone(),
            documents.clone(),
            index.clone(),
            options,
        );
        Self {
            services,
            documents,
            index,
            builder,
        }
    }

    /// Apply a batch of changes and deletions and build to the target state.
    pub fn update(
        &self,
        changes: Vec<DocumentChange>,
        deleted: Vec<DocumentUri>,
        cancel: &CancellationToken,
    ) -> Result<BuildSummary> {
        self.builder.update(changes, deleted, cancel)
    }

    /// Set one document's text, bumping its version.
    pub fn set_document(
        &self,
        uri: impl Into<DocumentUri>,
        text: impl Into<String>,
    ) -> Result<BuildSummary> {
        let uri = uri.into();
        let version = self.documents.get(&uri).map_or(1, |doc| doc.version() + 1);
        let change = DocumentChange::new(uri, version, text);
        self.update(vec![change], Vec::new(), &CancellationToken::new())
    }

    pub fn remove_document(&self, uri: &DocumentUri) -> Result<BuildSummary> {
        self.remove_documents(std::slice::from_ref(uri))
    }

    /// Evict documents and relink everything that referenced them.
    pub fn remove_documents(&self, uris: &[DocumentUri]) -> Result<BuildSummary> {
        self.update(Vec::new(), uris.to_vec(), &CancellationToken::new())
    }

    pub fn document(&self, uri: &DocumentUri) -> Option<Arc<Document>> {
        self.documents.get(uri)
    }

    pub fn documents(&self) -> Vec<Arc<Document>> {
        self.documents.all()
    }

    pub fn index(&self) -> &IndexManager {
        &self.index
    }

    pub fn builder(&self) -> &DocumentBuilder {
        &self.builder
    }

    pub fn services(&self) -> &LanguageServices {
        &self.services
    }

    pub fn references(&self) -> References<'_> {
        References::new(&self.documents, &self.index, &self.services)
    }

    /// Seed the index with a persisted export table.
    ///
    /// Documents opened later replace their seeded slice.
    #[cfg(feature = "persistence")]
    pub fn seed_index(&self, reader: impl std::io::Read) -> Result<usize> {
        self.index.load(reader)
    }

    #[cfg(feature = "persistence")]
    pub fn save_index(&self, writer: impl std::io::Write) -> Result<()> {
        self.index.save(writer)
    }
}
