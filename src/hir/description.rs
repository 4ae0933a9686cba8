//! Descriptions of exported declarations and weak node references.

use smol_str::SmolStr;

use super::name::NameProvider;
use super::path::AstPath;
use crate::base::{DocumentUri, LineIndex, Segment};
use crate::parser::Member;

/// Grammar rule kind of a named node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Package,
    Definition,
}

impl NodeKind {
    /// Kind of a named member; `None` for unnamed kinds.
    pub fn of(member: &Member) -> Option<Self> {
        match member {
            Member::Package(_) => Some(Self::Package),
            Member::Definition(_) => Some(Self::Definition),
            Member::Usage(_) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Package => "Package",
            Self::Definition => "Definition",
        }
    }
}

/// Weak reference to an AST node: document identity plus structural path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRef {
    pub uri: DocumentUri,
    pub path: AstPath,
}

impl NodeRef {
    pub fn new(uri: DocumentUri, path: AstPath) -> Self {
        Self { uri, path }
    }
}

/// Lightweight summary of one named declaration.
///
/// Holds no tree: the node is re-located through `path` when needed, so an
/// index of descriptions can outlive the document's syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct AstNodeDescription {
    pub name: SmolStr,
    pub kind: NodeKind,
    pub document_uri: DocumentUri,
    pub path: AstPath,
    /// Range of the name occurrence.
    pub name_segment: Segment,
}

impl AstNodeDescription {
    /// Describe a member; `None` when it has no name.
    pub fn describe(
        name_provider: &NameProvider,
        uri: &DocumentUri,
        path: AstPath,
        member: &Member,
        line_index: &LineIndex,
    ) -> Option<Self> {
        let kind = NodeKind::of(member)?;
        let token = name_provider.get_name_node(member)?;
        Some(Self {
            name: SmolStr::new(token.text()),
            kind,
            document_uri: uri.clone(),
            path,
            name_segment: line_index.segment(token.text_range()),
        })
    }

    pub fn node_ref(&self) -> NodeRef {
        NodeRef::new(self.document_uri.clone(), self.path.clone())
    }

    pub fn points_to(&self, target: &NodeRef) -> bool {
        self.document_uri == target.uri && self.path == target.path
    }
}
