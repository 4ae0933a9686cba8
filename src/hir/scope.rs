//! Scopes - the name bindings visible at a point in the AST.
//!
//! A [`Scope`] is a chain of layers. Each layer is either a container's
//! local bindings or the global workspace index; lookups walk from the
//! innermost layer outward and the first match wins (shadowing).
//!
//! Computing scopes is split the same way documents are built:
//!
//! 1. [`ScopeComputation`] - per document, independent of other documents:
//!    what it exports and what each container declares locally.
//! 2. [`ScopeProvider`] - per reference: chain the enclosing containers'
//!    local scopes and put the global scope outermost.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::description::AstNodeDescription;
use super::linker::ReferenceSite;
use super::name::NameProvider;
use super::path::{AstPath, walk_members};
use crate::base::{DocumentUri, LineIndex};
use crate::parser::{Member, SourceFile};

// ============================================================================
// LOCAL SCOPES (computed once per document version)
// ============================================================================

/// Names declared directly inside one container, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalScope {
    bindings: IndexMap<SmolStr, AstNodeDescription>,
}

impl LocalScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a declaration. The first declaration of a name wins; returns
    /// `false` if the name was already bound.
    pub fn insert(&mut self, description: AstNodeDescription) -> bool {
        match self.bindings.entry(description.name.clone()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(description);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&AstNodeDescription> {
        self.bindings.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AstNodeDescription> {
        self.bindings.values()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Local scopes of a document keyed by container path (`/` is the file).
pub type LocalScopes = FxHashMap<AstPath, LocalScope>;

/// Read access to the workspace-wide exported names.
pub trait GlobalScope {
    /// The binding for `name`, applying the global tie-break.
    fn lookup(&self, name: &str) -> Option<AstNodeDescription>;
}

// ============================================================================
// SCOPE CHAIN
// ============================================================================

enum Layer<'a> {
    Local(&'a LocalScope),
    Global(&'a dyn GlobalScope),
}

/// An ordered, nested set of bindings.
pub struct Scope<'a> {
    layer: Layer<'a>,
    outer: Option<Box<Scope<'a>>>,
}

impl<'a> Scope<'a> {
    /// The outermost scope: every exported declaration in the workspace.
    pub fn global(global: &'a dyn GlobalScope) -> Self {
        Self {
            layer: Layer::Global(global),
            outer: None,
        }
    }

    /// A local layer in front of `outer`.
    pub fn local(bindings: &'a LocalScope, outer: Scope<'a>) -> Self {
        Self {
            layer: Layer::Local(bindings),
            outer: Some(Box::new(outer)),
        }
    }

    /// Look up a name, consulting outer layers only when this one has no match.
    pub fn get_element(&self, name: &str) -> Option<AstNodeDescription> {
        let found = match self.layer {
            Layer::Local(bindings) => bindings.get(name).cloned(),
            Layer::Global(global) => global.lookup(name),
        };
        found.or_else(|| self.outer.as_ref().and_then(|o| o.get_element(name)))
    }

    /// Number of layers in the chain.
    pub fn depth(&self) -> usize {
        1 + self.outer.as_ref().map_or(0, |o| o.depth())
    }
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Per-document scope computation.
pub trait ScopeComputation: Send + Sync {
    /// Declarations this document makes visible to other documents.
    fn compute_exports(
        &self,
        uri: &DocumentUri,
        file: &SourceFile,
        line_index: &LineIndex,
    ) -> Vec<AstNodeDescription>;

    /// Local bindings of every container in this document.
    fn compute_local_scopes(
        &self,
        uri: &DocumentUri,
        file: &SourceFile,
        line_index: &LineIndex,
    ) -> LocalScopes;
}

/// Exports the named top-level members; every container scopes its named
/// direct members.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScopeComputation {
    name_provider: NameProvider,
}

impl DefaultScopeComputation {
    fn scope_of(
        &self,
        uri: &DocumentUri,
        parent: &AstPath,
        members: impl Iterator<Item = Member>,
        line_index: &LineIndex,
    ) -> LocalScope {
        let mut scope = LocalScope::new();
        for (index, member) in members.enumerate() {
            let path = parent.child(index as u32);
            if let Some(description) = AstNodeDescription::describe(
                &self.name_provider,
                uri,
                path,
                &member,
                line_index,
            ) {
                scope.insert(description);
            }
        }
        scope
    }
}

impl ScopeComputation for DefaultScopeComputation {
    fn compute_exports(
        &self,
        uri: &DocumentUri,
        file: &SourceFile,
        line_index: &LineIndex,
    ) -> Vec<AstNodeDescription> {
        file.members()
            .enumerate()
            .filter_map(|(index, member)| {
                AstNodeDescription::describe(
                    &self.name_provider,
                    uri,
                    AstPath::root().child(index as u32),
                    &member,
                    line_index,
                )
            })
            .collect()
    }

    fn compute_local_scopes(
        &self,
        uri: &DocumentUri,
        file: &SourceFile,
        line_index: &LineIndex,
    ) -> LocalScopes {
        let mut scopes = LocalScopes::default();
        let root = AstPath::root();
        scopes.insert(
            root.clone(),
            self.scope_of(uri, &root, file.members(), line_index),
        );
        walk_members(file, |path, member| {
            if let Some(body) = member.body() {
                scopes.insert(
                    path.clone(),
                    self.scope_of(uri, path, body.members(), line_index),
                );
            }
        });
        scopes
    }
}

/// Builds the scope for a reference site.
pub trait ScopeProvider: Send + Sync {
    fn scope<'a>(
        &self,
        site: &ReferenceSite,
        local_scopes: &'a LocalScopes,
        global: &'a dyn GlobalScope,
    ) -> Scope<'a>;
}

/// Enclosing containers innermost first, then the global scope.
///
/// A reference is resolved in the scope of the container holding its
/// owner, so `def a : T { ... }` does not see the members of its own body.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScopeProvider;

impl ScopeProvider for DefaultScopeProvider {
    fn scope<'a>(
        &self,
        site: &ReferenceSite,
        local_scopes: &'a LocalScopes,
        global: &'a dyn GlobalScope,
    ) -> Scope<'a> {
        let containers: Vec<AstPath> = site
            .owner
            .parent()
            .map(|parent| parent.ancestors().collect())
            .unwrap_or_default();
        let mut scope = Scope::global(global);
        for path in containers.iter().rev() {
            if let Some(bindings) = local_scopes.get(path) {
                scope = Scope::local(bindings, scope);
            }
        }
        scope
    }
}
