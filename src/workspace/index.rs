//! Index manager - the workspace-wide table of exports and reference edges.
//!
//! The index holds per-document slices:
//!
//! - **exports**: the `AstNodeDescription`s a document contributes to the
//!   global scope, in document insertion order
//! - **references**: the document's outgoing reference sites with their
//!   resolved targets
//! - **dependents**: reverse edges, target document → documents that
//!   reference into it
//!
//! All mutation goes through [`IndexManager::update_content`],
//! [`IndexManager::update_references`] and [`IndexManager::remove`]. Each
//! replaces one document's slice under a single write lock, so readers never
//! see a half-updated slice.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::document::Document;
use crate::base::{DocumentUri, Result, Segment, check_cancelled};
use crate::hir::{AstNodeDescription, AstPath, GlobalScope, NodeKind, NodeRef, ScopeComputation};

/// One outgoing reference as recorded in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceDescription {
    pub source_uri: DocumentUri,
    /// Member owning the reference.
    pub source_path: AstPath,
    /// Range of the referencing name occurrence.
    pub segment: Segment,
    /// Resolved target; `None` for a reference that failed to link.
    pub target: Option<NodeRef>,
    /// The name as written.
    pub name: SmolStr,
}

impl ReferenceDescription {
    /// Whether the reference resolved into its own document.
    pub fn is_local(&self) -> bool {
        self.target
            .as_ref()
            .is_some_and(|target| target.uri == self.source_uri)
    }
}

#[derive(Debug, Default)]
struct IndexState {
    exports: IndexMap<DocumentUri, Arc<[AstNodeDescription]>>,
    /// Exported name → documents exporting it.
    by_name: FxHashMap<SmolStr, Vec<DocumentUri>>,
    references: FxHashMap<DocumentUri, Arc<[ReferenceDescription]>>,
    dependents: FxHashMap<DocumentUri, FxHashSet<DocumentUri>>,
}

impl IndexState {
    fn set_exports(&mut self, uri: &DocumentUri, exports: Arc<[AstNodeDescription]>) {
        self.unlink_names(uri);
        for name in exports.iter().map(|d| &d.name) {
            let uris = self.by_name.entry(name.clone()).or_default();
            if !uris.contains(uri) {
                uris.push(uri.clone());
            }
        }
        self.exports.insert(uri.clone(), exports);
    }

    fn unlink_names(&mut self, uri: &DocumentUri) {
        let Some(previous) = self.exports.get(uri) else {
            return;
        };
        for description in previous.iter() {
            if let Some(uris) = self.by_name.get_mut(&description.name) {
                uris.retain(|u| u != uri);
                if uris.is_empty() {
                    self.by_name.remove(&description.name);
                }
            }
        }
    }

    fn set_references(&mut self, uri: &DocumentUri, references: Arc<[ReferenceDescription]>) {
        self.unlink_dependents(uri);
        for target in references.iter().filter_map(|r| r.target.as_ref()) {
            if target.uri != *uri {
                self.dependents
                    .entry(target.uri.clone())
                    .or_default()
                    .insert(uri.clone());
            }
        }
        self.references.insert(uri.clone(), references);
    }

    fn unlink_dependents(&mut self, uri: &DocumentUri) {
        let Some(previous) = self.references.get(uri) else {
            return;
        };
        for target in previous.iter().filter_map(|r| r.target.as_ref()) {
            if let Some(sources) = self.dependents.get_mut(&target.uri) {
                sources.remove(uri);
                if sources.is_empty() {
                    self.dependents.remove(&target.uri);
                }
            }
        }
    }

    /// Global tie-break: the first-indexed document wins, then declaration order.
    fn lookup(&self, name: &str) -> Option<&AstNodeDescription> {
        let uris = self.by_name.get(name)?;
        let (_, _, exports) = uris
            .iter()
            .filter_map(|uri| self.exports.get_full(uri))
            .min_by_key(|(position, _, _)| *position)?;
        exports.iter().find(|d| d.name == name)
    }
}

/// Workspace-wide store of exported declarations and reference edges.
#[derive(Debug, Default)]
pub struct IndexManager {
    state: RwLock<IndexState>,
}

impl IndexManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute and store a document's exports.
    ///
    /// Replaces the previous slice for the URI as a whole. A document that is
    /// not parsed exports nothing.
    pub fn update_content(&self, document: &Document, computation: &dyn ScopeComputation) {
        let exports: Vec<AstNodeDescription> = document
            .source_file()
            .map(|file| computation.compute_exports(document.uri(), &file, document.line_index()))
            .unwrap_or_default();
        trace!(
            "[INDEX] content {} ({} exports)",
            document.uri(),
            exports.len()
        );
        self.set_exports(document.uri(), exports);
    }

    /// Store exports computed elsewhere (e.g. loaded from a persisted index).
    pub fn set_exports(&self, uri: &DocumentUri, exports: Vec<AstNodeDescription>) {
        self.state.write().set_exports(uri, exports.into());
    }

    /// Publish a document's outgoing references.
    pub fn update_references(&self, document: &Document) {
        let references: Vec<ReferenceDescription> = document
            .references()
            .iter()
            .map(|cross_ref| ReferenceDescription {
                source_uri: document.uri().clone(),
                source_path: cross_ref.site.owner.clone(),
                segment: cross_ref.site.segment,
                target: cross_ref.target().map(AstNodeDescription::node_ref),
                name: cross_ref.site.text.clone(),
            })
            .collect();
        trace!(
            "[INDEX] references {} ({} sites)",
            document.uri(),
            references.len()
        );
        self.state
            .write()
            .set_references(document.uri(), references.into());
    }

    /// Evict every contribution of a document.
    pub fn remove(&self, uri: &DocumentUri) {
        let mut state = self.state.write();
        state.unlink_names(uri);
        state.unlink_dependents(uri);
        state.exports.shift_remove(uri);
        state.references.remove(uri);
    }

    /// Lazily iterate all exported declarations, optionally of one kind.
    ///
    /// Iterates a snapshot of the per-document slices taken at call time;
    /// concurrent updates are not observed.
    pub fn all_elements(
        &self,
        kind: Option<NodeKind>,
    ) -> impl Iterator<Item = AstNodeDescription> + use<> {
        let slices: Vec<Arc<[AstNodeDescription]>> =
            self.state.read().exports.values().cloned().collect();
        slices
            .into_iter()
            .flat_map(|slice| slice.to_vec())
            .filter(move |d| kind.is_none_or(|k| d.kind == k))
    }

    pub fn exports_of(&self, uri: &DocumentUri) -> Option<Arc<[AstNodeDescription]>> {
        self.state.read().exports.get(uri).cloned()
    }

    pub fn references_of(&self, uri: &DocumentUri) -> Option<Arc<[ReferenceDescription]>> {
        self.state.read().references.get(uri).cloned()
    }

    /// Documents with at least one reference into `uri`, other than `uri` itself.
    pub fn dependents_of(&self, uri: &DocumentUri) -> Vec<DocumentUri> {
        let state = self.state.read();
        let mut uris: Vec<_> = state
            .dependents
            .get(uri)
            .map(|sources| sources.iter().cloned().collect())
            .unwrap_or_default();
        uris.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        uris
    }

    pub fn contains(&self, uri: &DocumentUri) -> bool {
        self.state.read().exports.contains_key(uri)
    }

    /// URIs with an export slice, in index order.
    pub fn uris(&self) -> Vec<DocumentUri> {
        self.state.read().exports.keys().cloned().collect()
    }

    /// Whether `uri` must be relinked because the documents in `changed` changed.
    ///
    /// True if one of its references targets a changed document, failed to
    /// link (a changed document may now provide the name), or names something
    /// a changed document exports (the binding may now be shadowed).
    pub fn is_affected(&self, uri: &DocumentUri, changed: &FxHashSet<DocumentUri>) -> bool {
        let state = self.state.read();
        let Some(references) = state.references.get(uri) else {
            return false;
        };
        references.iter().any(|reference| match &reference.target {
            None => true,
            Some(target) if target.uri != *uri && changed.contains(&target.uri) => true,
            Some(_) if reference.is_local() => false,
            Some(_) => state
                .by_name
                .get(&reference.name)
                .is_some_and(|uris| uris.iter().any(|u| changed.contains(u))),
        })
    }

    /// Every recorded reference resolving to `target`.
    ///
    /// Only the target's own document and the documents recorded as its
    /// dependents are examined. Cancellation is checked per document.
    pub fn references_to(
        &self,
        target: &NodeRef,
        only_local: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<ReferenceDescription>> {
        let mut sources = vec![target.uri.clone()];
        if !only_local {
            sources.extend(self.dependents_of(&target.uri));
        }

        let mut found = Vec::new();
        for source in &sources {
            check_cancelled(cancel)?;
            let Some(references) = self.references_of(source) else {
                continue;
            };
            found.extend(
                references
                    .iter()
                    .filter(|r| r.target.as_ref() == Some(target))
                    .cloned(),
            );
        }
        Ok(found)
    }
}

impl GlobalScope for IndexManager {
    fn lookup(&self, name: &str) -> Option<AstNodeDescription> {
        self.state.read().lookup(name).cloned()
    }
}
