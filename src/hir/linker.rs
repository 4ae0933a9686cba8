//! Linking - binding cross-reference sites to declarations.
//!
//! A document's reference sites are collected once per version; the
//! [`Linker`] resolves each through the scope chain built by a
//! [`ScopeProvider`]. Unresolved names become data (an error linkage plus
//! a diagnostic), never an `Err`.

use smol_str::SmolStr;
use thiserror::Error;
use tracing::trace;

use super::description::AstNodeDescription;
use super::diagnostics::{Diagnostic, DiagnosticSource, codes};
use super::path::{AstPath, walk_members};
use super::scope::{GlobalScope, LocalScopes, ScopeProvider};
use crate::base::{LineIndex, Segment};
use crate::parser::{Member, SourceFile};

/// Which property of the owning member holds the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceProperty {
    /// `use <target>;`
    Target,
    /// `def x : <type>`
    Type,
}

/// One place in a document where a name is used to point at a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSite {
    /// Member that owns the reference.
    pub owner: AstPath,
    pub property: ReferenceProperty,
    /// The name as written.
    pub text: SmolStr,
    pub segment: Segment,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("could not resolve reference to '{name}'")]
    Unresolved { name: SmolStr },
}

/// Link state of a reference. Resolution is attempted at most once per
/// document version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Linkage {
    Unresolved,
    Resolved(AstNodeDescription),
    Error(LinkError),
}

/// A reference site together with its link state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReference {
    pub site: ReferenceSite,
    pub linkage: Linkage,
}

impl CrossReference {
    pub fn target(&self) -> Option<&AstNodeDescription> {
        match &self.linkage {
            Linkage::Resolved(target) => Some(target),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.linkage, Linkage::Error(_))
    }
}

/// Collect every reference site of a file in document order.
pub fn collect_reference_sites(file: &SourceFile, line_index: &LineIndex) -> Vec<ReferenceSite> {
    let mut sites = Vec::new();
    walk_members(file, |path, member| {
        let Some(name_ref) = member.name_ref() else {
            return;
        };
        let Some(token) = name_ref.ident() else {
            return;
        };
        let property = match member {
            Member::Usage(_) => ReferenceProperty::Target,
            _ => ReferenceProperty::Type,
        };
        sites.push(ReferenceSite {
            owner: path.clone(),
            property,
            text: SmolStr::new(token.text()),
            segment: line_index.segment(token.text_range()),
        });
    });
    sites
}

/// Output of linking one document.
#[derive(Debug, Default)]
pub struct LinkResult {
    pub references: Vec<CrossReference>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolves reference sites against local scopes and the global scope.
pub struct Linker<'a> {
    scope_provider: &'a dyn ScopeProvider,
    global: &'a dyn GlobalScope,
}

impl<'a> Linker<'a> {
    pub fn new(scope_provider: &'a dyn ScopeProvider, global: &'a dyn GlobalScope) -> Self {
        Self {
            scope_provider,
            global,
        }
    }

    /// Resolve one site. Never fails; unresolvable names yield [`Linkage::Error`].
    pub fn resolve(&self, site: &ReferenceSite, local_scopes: &LocalScopes) -> Linkage {
        let scope = self.scope_provider.scope(site, local_scopes, self.global);
        match scope.get_element(&site.text) {
            Some(target) => {
                trace!(
                    "[LINK] '{}' at {} -> {}{}",
                    site.text, site.owner, target.document_uri, target.path
                );
                Linkage::Resolved(target)
            }
            None => Linkage::Error(LinkError::Unresolved {
                name: site.text.clone(),
            }),
        }
    }

    /// Link every reference site of a document.
    pub fn link(
        &self,
        file: &SourceFile,
        line_index: &LineIndex,
        local_scopes: &LocalScopes,
    ) -> LinkResult {
        let mut result = LinkResult::default();
        for site in collect_reference_sites(file, line_index) {
            let linkage = self.resolve(&site, local_scopes);
            if let Linkage::Error(error) = &linkage {
                result.diagnostics.push(
                    Diagnostic::error(site.segment, error.to_string())
                        .with_code(codes::UNDEFINED_REFERENCE)
                        .with_source(DiagnosticSource::Linking),
                );
            }
            result.references.push(CrossReference { site, linkage });
        }
        result
    }
}
