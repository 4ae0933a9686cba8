//! Document build pipeline.
//!
//! Drives documents through the states of [`DocumentState`] in batches:
//!
//! ```text
//! phase 1 (all changed documents, parse in parallel)
//!     Created ─► Parsed ─► IndexedContent
//!                                 │  every new export is now visible
//!                                 ▼
//! affected documents reset to IndexedContent
//!                                 │
//! phase 2 (changed + affected, one document at a time, cancellable)
//!     ComputedScopes ─► Linked ─► IndexedReferences ─► Validated
//! ```
//!
//! Phase 2 does not start before phase 1 has finished for the whole batch,
//! so no document is linked against a partially updated index.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::LanguageServices;
use super::document::{Document, DocumentState};
use super::index::IndexManager;
use super::store::DocumentStore;
use crate::base::{DocumentUri, LangError, Result, check_cancelled};
use crate::hir::{Linker, ValidationContext};

/// Pipeline configuration.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Run the `Validated` phase. When off, builds stop at `IndexedReferences`.
    pub validation: bool,
    /// Parse the documents of a batch on the rayon thread pool.
    pub parallel_parse: bool,
    /// Compute local scopes in `ComputedScopes` instead of on first lookup.
    pub eager_scopes: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            validation: true,
            parallel_parse: true,
            eager_scopes: true,
        }
    }
}

impl BuildOptions {
    pub fn with_validation(mut self, validation: bool) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_parallel_parse(mut self, parallel_parse: bool) -> Self {
        self.parallel_parse = parallel_parse;
        self
    }

    pub fn with_eager_scopes(mut self, eager_scopes: bool) -> Self {
        self.eager_scopes = eager_scopes;
        self
    }

    /// State a completed build leaves every document in.
    pub fn target_state(&self) -> DocumentState {
        if self.validation {
            DocumentState::Validated
        } else {
            DocumentState::IndexedReferences
        }
    }
}

/// New or changed text for one document.
#[derive(Clone, Debug)]
pub struct DocumentChange {
    pub uri: DocumentUri,
    pub version: i32,
    pub text: String,
}

impl DocumentChange {
    pub fn new(uri: impl Into<DocumentUri>, version: i32, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            version,
            text: text.into(),
        }
    }
}

/// What a completed batch did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Documents whose text changed.
    pub changed: Vec<DocumentUri>,
    /// Documents removed from the workspace.
    pub removed: Vec<DocumentUri>,
    /// Unchanged documents relinked because of the change.
    pub affected: Vec<DocumentUri>,
    /// Documents that reached the target state in this batch.
    pub built: usize,
}

type BuildListener = Box<dyn Fn(&[Arc<Document>]) + Send + Sync>;

/// Runs build batches for a workspace.
pub struct DocumentBuilder {
    services: Arc<LanguageServices>,
    documents: Arc<DocumentStore>,
    index: Arc<IndexManager>,
    options: BuildOptions,
    /// Held for the duration of a batch.
    build_lock: Mutex<()>,
    /// Token of the batch in flight, cancelled when a new batch starts.
    current: Mutex<CancellationToken>,
    listeners: RwLock<Vec<(DocumentState, BuildListener)>>,
}

impl DocumentBuilder {
    pub fn new(
        services: Arc<LanguageServices>,
        documents: Arc<DocumentStore>,
        index: Arc<IndexManager>,
        options: BuildOptions,
    ) -> Self {
        Self {
            services,
            documents,
            index,
            options,
            build_lock: Mutex::new(()),
            current: Mutex::new(CancellationToken::new()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Register a callback run after every document of a batch reached `state`.
    ///
    /// Listeners run on the building thread while the build lock is held and
    /// must not start another build or register listeners.
    pub fn on_build_phase(
        &self,
        state: DocumentState,
        listener: impl Fn(&[Arc<Document>]) + Send + Sync + 'static,
    ) {
        self.listeners.write().push((state, Box::new(listener)));
    }

    /// Apply changes and deletions, then build the workspace to the target state.
    ///
    /// Starting a batch cancels the batch in flight. On cancellation the
    /// changed documents are left at `IndexedContent` or later and the call
    /// returns [`LangError::Cancelled`]; the next batch picks them up.
    pub fn update(
        &self,
        changes: Vec<DocumentChange>,
        deleted: Vec<DocumentUri>,
        cancel: &CancellationToken,
    ) -> Result<BuildSummary> {
        let token = self.begin_batch(cancel);
        let _guard = self.build_lock.lock();
        debug!(
            "[BUILD] batch: {} changed, {} deleted",
            changes.len(),
            deleted.len()
        );

        let mut summary = BuildSummary::default();
        let mut changed: FxHashSet<DocumentUri> = FxHashSet::default();

        for uri in deleted {
            self.documents.remove(&uri);
            self.index.remove(&uri);
            changed.insert(uri.clone());
            summary.removed.push(uri);
        }
        for change in changes {
            let document = Document::new(change.uri.clone(), change.version, change.text);
            // Edges of the previous text must not outlive it.
            self.index.update_references(&document);
            self.documents.insert(document);
            changed.insert(change.uri.clone());
            summary.changed.push(change.uri);
        }

        // Phase 1: make every new export visible before anything links.
        self.parse_pending();
        self.run_phase(DocumentState::IndexedContent, None)?;

        // Documents interrupted by an earlier cancelled batch were linked
        // against an older index and relink as well.
        let target = self.options.target_state();
        for document in self.documents.all() {
            if changed.contains(document.uri())
                || document.state() <= DocumentState::IndexedContent
            {
                continue;
            }
            if document.state() == target
                && (changed.is_empty() || !self.index.is_affected(document.uri(), &changed))
            {
                continue;
            }
            trace!("[BUILD] {} affected, relinking", document.uri());
            let mut reset = (*document).clone();
            reset.reset_to(DocumentState::IndexedContent);
            self.index.update_references(&reset);
            self.documents.insert(reset);
            summary.affected.push(document.uri().clone());
        }

        // Phase 2: scopes, linking, reference indexing, validation.
        let mut state = DocumentState::IndexedContent;
        while let Some(next) = state.next().filter(|next| *next <= target) {
            let advanced = self.run_phase(next, Some(&token)).inspect_err(|e| {
                if e.is_cancelled() {
                    debug!("[BUILD] batch cancelled before {}", next);
                }
            })?;
            if next == target {
                summary.built = advanced;
            }
            state = next;
        }

        debug!(
            "[BUILD] batch done: {} built, {} affected",
            summary.built,
            summary.affected.len()
        );
        Ok(summary)
    }

    /// Advance one document to `target`, one state at a time.
    ///
    /// Idempotent: a document already at or past `target` is returned as is.
    /// Cancellation is checked before each step from `ComputedScopes` on.
    pub fn advance(
        &self,
        uri: &DocumentUri,
        target: DocumentState,
        cancel: &CancellationToken,
    ) -> Result<Arc<Document>> {
        let _guard = self.build_lock.lock();
        let mut document = self
            .documents
            .get(uri)
            .ok_or_else(|| LangError::UnknownDocument(uri.clone()))?;
        while document.state() < target {
            if document.state() >= DocumentState::IndexedContent {
                check_cancelled(cancel)?;
            }
            let next = Arc::new(self.step(&document));
            self.documents.insert(next.clone());
            document = next;
        }
        Ok(document)
    }

    fn begin_batch(&self, cancel: &CancellationToken) -> CancellationToken {
        let token = cancel.child_token();
        let previous = std::mem::replace(&mut *self.current.lock(), token.clone());
        previous.cancel();
        token
    }

    /// Parse every `Created` document, in parallel when configured.
    fn parse_pending(&self) {
        let pending: Vec<Arc<Document>> = self
            .documents
            .all()
            .into_iter()
            .filter(|d| d.state() == DocumentState::Created)
            .collect();
        let parsed: Vec<Document> = if self.options.parallel_parse {
            pending.par_iter().map(|d| self.step(d)).collect()
        } else {
            pending.iter().map(|d| self.step(d)).collect()
        };
        let parsed: Vec<Arc<Document>> = parsed.into_iter().map(Arc::new).collect();
        for document in &parsed {
            self.documents.insert(document.clone());
        }
        self.notify(DocumentState::Parsed, &parsed);
    }

    /// Move every document that is one step short of `state` to `state`.
    ///
    /// Returns the number of documents advanced. With a token, cancellation
    /// is checked between documents.
    fn run_phase(&self, state: DocumentState, cancel: Option<&CancellationToken>) -> Result<usize> {
        let mut advanced = Vec::new();
        for document in self.documents.all() {
            if document.state().next() != Some(state) {
                continue;
            }
            if let Some(cancel) = cancel {
                check_cancelled(cancel)?;
            }
            let next = Arc::new(self.step(&document));
            self.documents.insert(next.clone());
            advanced.push(next);
        }
        trace!("[BUILD] {} documents reached {}", advanced.len(), state);
        self.notify(state, &advanced);
        Ok(advanced.len())
    }

    /// Perform the single transition out of the document's current state.
    fn step(&self, document: &Document) -> Document {
        let mut next = document.clone();
        let Some(state) = document.state().next() else {
            return next;
        };
        let computation = self.services.scope_computation.as_ref();
        match state {
            DocumentState::Created => {}
            DocumentState::Parsed => {
                next.set_parse(self.services.parser.parse(document.text()));
            }
            DocumentState::IndexedContent => {
                self.index.update_content(&next, computation);
            }
            DocumentState::ComputedScopes => {
                if self.options.eager_scopes {
                    next.local_scopes(computation);
                }
            }
            DocumentState::Linked => {
                if let (Some(file), Some(scopes)) =
                    (next.source_file(), next.local_scopes(computation))
                {
                    let linker =
                        Linker::new(self.services.scope_provider.as_ref(), self.index.as_ref());
                    let result = linker.link(&file, next.line_index(), &scopes);
                    next.set_links(result.references, result.diagnostics);
                }
            }
            DocumentState::IndexedReferences => {
                self.index.update_references(&next);
            }
            DocumentState::Validated => {
                if let Some(file) = next.source_file() {
                    let ctx = ValidationContext {
                        uri: next.uri(),
                        file: &file,
                        line_index: next.line_index(),
                        references: next.references(),
                    };
                    let diagnostics = self.services.validator.validate(&ctx);
                    next.set_validation(diagnostics);
                }
            }
        }
        trace!("[BUILD] {} -> {}", document.uri(), state);
        next.set_state(state);
        next
    }

    fn notify(&self, state: DocumentState, documents: &[Arc<Document>]) {
        if documents.is_empty() {
            return;
        }
        for (listen_state, listener) in self.listeners.read().iter() {
            if *listen_state == state {
                listener(documents);
            }
        }
    }
}
