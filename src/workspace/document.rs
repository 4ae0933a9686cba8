//! Documents and their build state.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::base::{DocumentUri, LineIndex};
use crate::hir::{CrossReference, Diagnostic, LocalScopes, ScopeComputation};
use crate::parser::{Parse, SourceFile, SyntaxNode};

/// Build pipeline states, strictly ordered.
///
/// A document only ever moves to the next state; a change moves it back to
/// `Created` and dependents back to `IndexedContent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentState {
    Created,
    Parsed,
    IndexedContent,
    ComputedScopes,
    Linked,
    IndexedReferences,
    Validated,
}

impl DocumentState {
    pub const ALL: [DocumentState; 7] = [
        Self::Created,
        Self::Parsed,
        Self::IndexedContent,
        Self::ComputedScopes,
        Self::Linked,
        Self::IndexedReferences,
        Self::Validated,
    ];

    /// The successor state, `None` for `Validated`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Created => Some(Self::Parsed),
            Self::Parsed => Some(Self::IndexedContent),
            Self::IndexedContent => Some(Self::ComputedScopes),
            Self::ComputedScopes => Some(Self::Linked),
            Self::Linked => Some(Self::IndexedReferences),
            Self::IndexedReferences => Some(Self::Validated),
            Self::Validated => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Parsed => "Parsed",
            Self::IndexedContent => "IndexedContent",
            Self::ComputedScopes => "ComputedScopes",
            Self::Linked => "Linked",
            Self::IndexedReferences => "IndexedReferences",
            Self::Validated => "Validated",
        }
    }
}

impl fmt::Display for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of source text and everything computed from it.
///
/// Documents are immutable once stored; the pipeline clones a document,
/// advances the clone by one state, and swaps it in.
#[derive(Debug, Clone)]
pub struct Document {
    uri: DocumentUri,
    version: i32,
    text: Arc<str>,
    line_index: Arc<LineIndex>,
    state: DocumentState,
    parse: Option<Parse>,
    local_scopes: OnceLock<Arc<LocalScopes>>,
    references: Arc<[CrossReference]>,
    syntax_diagnostics: Vec<Diagnostic>,
    link_diagnostics: Vec<Diagnostic>,
    validation_diagnostics: Vec<Diagnostic>,
}

impl Document {
    pub fn new(uri: DocumentUri, version: i32, text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let line_index = Arc::new(LineIndex::new(text.clone()));
        Self {
            uri,
            version,
            text,
            line_index,
            state: DocumentState::Created,
            parse: None,
            local_scopes: OnceLock::new(),
            references: Arc::from(Vec::new()),
            syntax_diagnostics: Vec::new(),
            link_diagnostics: Vec::new(),
            validation_diagnostics: Vec::new(),
        }
    }

    pub fn uri(&self) -> &DocumentUri {
        &self.uri
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn parse(&self) -> Option<&Parse> {
        self.parse.as_ref()
    }

    pub fn syntax(&self) -> Option<SyntaxNode> {
        self.parse.as_ref().map(Parse::syntax)
    }

    pub fn source_file(&self) -> Option<SourceFile> {
        self.parse.as_ref().map(Parse::source_file)
    }

    /// Outgoing cross-references; empty before `Linked`.
    pub fn references(&self) -> &[CrossReference] {
        &self.references
    }

    /// Syntax, link and validation diagnostics in that order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.syntax_diagnostics
            .iter()
            .chain(&self.link_diagnostics)
            .chain(&self.validation_diagnostics)
            .cloned()
            .collect()
    }

    /// Local scopes of this version, computed on first use.
    ///
    /// `None` before the document is parsed.
    pub fn local_scopes(&self, computation: &dyn ScopeComputation) -> Option<Arc<LocalScopes>> {
        let file = self.source_file()?;
        let scopes = self.local_scopes.get_or_init(|| {
            Arc::new(computation.compute_local_scopes(&self.uri, &file, &self.line_index))
        });
        Some(scopes.clone())
    }

    pub fn has_cached_scopes(&self) -> bool {
        self.local_scopes.get().is_some()
    }

    pub(crate) fn set_parse(&mut self, parse: Parse) {
        self.syntax_diagnostics = parse
            .errors
            .iter()
            .map(|e| Diagnostic::from_syntax_error(e, &self.line_index))
            .collect();
        self.parse = Some(parse);
    }

    pub(crate) fn set_links(
        &mut self,
        references: Vec<CrossReference>,
        diagnostics: Vec<Diagnostic>,
    ) {
        self.references = references.into();
        self.link_diagnostics = diagnostics;
    }

    pub(crate) fn set_validation(&mut self, diagnostics: Vec<Diagnostic>) {
        self.validation_diagnostics = diagnostics;
    }

    pub(crate) fn set_state(&mut self, state: DocumentState) {
        debug_assert!(
            self.state.next() == Some(state),
            "{} cannot move from {} to {}",
            self.uri,
            self.state,
            state
        );
        self.state = state;
    }

    /// Move back to `state`, discarding everything computed after it.
    /// A no-op when the document is already at or before `state`.
    pub fn reset_to(&mut self, state: DocumentState) {
        if state >= self.state {
            return;
        }
        if state < DocumentState::Parsed {
            self.parse = None;
            self.syntax_diagnostics.clear();
        }
        if state < DocumentState::ComputedScopes {
            self.local_scopes = OnceLock::new();
        }
        if state < DocumentState::Linked {
            self.references = Arc::from(Vec::new());
            self.link_diagnostics.clear();
        }
        if state < DocumentState::Validated {
            self.validation_diagnostics.clear();
        }
        self.state = state;
    }
}
