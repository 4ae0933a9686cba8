//! Declaration lookup and reference search.
//!
//! Thin queries over the linked document state and the index. Nothing here
//! mutates documents; a document that is not linked yet is resolved on the
//! fly against its local scopes and the current index.

use tokio_util::sync::CancellationToken;

use super::LanguageServices;
use super::document::{Document, DocumentState};
use super::index::IndexManager;
use super::store::DocumentStore;
use crate::base::{DocumentUri, LangError, Result, Segment};
use crate::hir::{
    AstNodeDescription, AstPath, Linkage, Linker, NodeRef, ReferenceProperty, ReferenceSite,
};
use crate::parser::{AstNode, Member, NameRef, SyntaxToken};

/// A resolved declaration.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub description: AstNodeDescription,
    /// The declaring member, when its document is loaded.
    pub node: Option<Member>,
}

/// Where a declaration's name is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameLocation {
    pub uri: DocumentUri,
    pub segment: Segment,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindReferencesOptions {
    /// Only search the declaring document.
    pub only_local: bool,
    /// Include the declaration's own name occurrence.
    pub include_declaration: bool,
}

/// One occurrence of a declaration's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub source_uri: DocumentUri,
    pub segment: Segment,
    pub target: NodeRef,
    pub is_declaration: bool,
}

pub struct References<'a> {
    documents: &'a DocumentStore,
    index: &'a IndexManager,
    services: &'a LanguageServices,
}

impl<'a> References<'a> {
    pub fn new(
        documents: &'a DocumentStore,
        index: &'a IndexManager,
        services: &'a LanguageServices,
    ) -> Self {
        Self {
            documents,
            index,
            services,
        }
    }

    /// Resolve an identifier token to the declaration it names or refers to.
    ///
    /// A declaration's own name resolves to itself. Returns `Ok(None)` for
    /// tokens that are neither, and for references that do not resolve.
    pub fn find_declaration(
        &self,
        document: &Document,
        token: &SyntaxToken,
    ) -> Result<Option<Declaration>> {
        let name_provider = &self.services.name_provider;
        if let Some(member) = name_provider.declaring_member(token) {
            let Some(path) = AstPath::of(member.syntax()) else {
                return Ok(None);
            };
            let description = AstNodeDescription::describe(
                name_provider,
                document.uri(),
                path,
                &member,
                document.line_index(),
            );
            return Ok(description.map(|description| Declaration {
                description,
                node: Some(member),
            }));
        }

        let Some(site) = self.reference_site(document, token) else {
            return Ok(None);
        };
        match self.linkage(document, &site) {
            Linkage::Resolved(description) => self.locate(description).map(Some),
            Linkage::Unresolved | Linkage::Error(_) => Ok(None),
        }
    }

    /// Map a clicked identifier straight to the target's name occurrence.
    pub fn find_declaration_node(
        &self,
        document: &Document,
        token: &SyntaxToken,
    ) -> Result<Option<NameLocation>> {
        Ok(self
            .find_declaration(document, token)?
            .map(|declaration| self.name_location(&declaration)))
    }

    /// Where a resolved declaration's name is written.
    ///
    /// Read from the loaded tree when there is one, otherwise from the
    /// description.
    pub fn name_location(&self, declaration: &Declaration) -> NameLocation {
        let uri = declaration.description.document_uri.clone();
        let segment = match (&declaration.node, self.documents.get(&uri)) {
            (Some(member), Some(target)) => self
                .services
                .name_provider
                .get_name_node(member)
                .map(|token| target.line_index().segment(token.text_range()))
                .unwrap_or(declaration.description.name_segment),
            _ => declaration.description.name_segment,
        };
        NameLocation { uri, segment }
    }

    /// Every occurrence of `target` across the workspace, sorted by document
    /// and position.
    pub fn find_references(
        &self,
        target: &AstNodeDescription,
        options: FindReferencesOptions,
        cancel: &CancellationToken,
    ) -> Result<Vec<Reference>> {
        let node = target.node_ref();
        let mut references: Vec<Reference> = self
            .index
            .references_to(&node, options.only_local, cancel)?
            .into_iter()
            .map(|r| Reference {
                source_uri: r.source_uri,
                segment: r.segment,
                target: node.clone(),
                is_declaration: false,
            })
            .collect();
        if options.include_declaration {
            references.push(Reference {
                source_uri: target.document_uri.clone(),
                segment: target.name_segment,
                target: node.clone(),
                is_declaration: true,
            });
        }
        references.sort_by(|a, b| {
            a.source_uri
                .as_str()
                .cmp(b.source_uri.as_str())
                .then(a.segment.range.start().cmp(&b.segment.range.start()))
        });
        references.dedup_by(|a, b| a.source_uri == b.source_uri && a.segment == b.segment);
        Ok(references)
    }

    /// The reference site an identifier token belongs to.
    fn reference_site(&self, document: &Document, token: &SyntaxToken) -> Option<ReferenceSite> {
        let name_ref = token.parent().and_then(NameRef::cast)?;
        let owner_node = name_ref.syntax().ancestors().find_map(Member::cast)?;
        let property = match owner_node {
            Member::Usage(_) => ReferenceProperty::Target,
            _ => ReferenceProperty::Type,
        };
        Some(ReferenceSite {
            owner: AstPath::of(owner_node.syntax())?,
            property,
            text: token.text().into(),
            segment: document.line_index().segment(token.text_range()),
        })
    }

    /// Link state of a site: the stored result once the document is linked,
    /// otherwise resolved now.
    fn linkage(&self, document: &Document, site: &ReferenceSite) -> Linkage {
        if document.state() >= DocumentState::Linked {
            if let Some(cross_ref) = document
                .references()
                .iter()
                .find(|r| r.site.owner == site.owner && r.site.segment == site.segment)
            {
                return cross_ref.linkage.clone();
            }
        }
        let Some(scopes) = document.local_scopes(self.services.scope_computation.as_ref()) else {
            return Linkage::Unresolved;
        };
        Linker::new(self.services.scope_provider.as_ref(), self.index).resolve(site, &scopes)
    }

    /// Re-locate a description's node in its (loaded) document.
    fn locate(&self, description: AstNodeDescription) -> Result<Declaration> {
        let Some(file) = self
            .documents
            .get(&description.document_uri)
            .and_then(|doc| doc.source_file())
        else {
            return Ok(Declaration {
                description,
                node: None,
            });
        };
        match description.path.resolve(&file) {
            Some(member) => Ok(Declaration {
                description,
                node: Some(member),
            }),
            None => Err(LangError::DanglingPath {
                uri: description.document_uri.clone(),
                path: description.path.to_string(),
            }),
        }
    }
}
