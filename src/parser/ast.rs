//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

/// The "is named" capability.
///
/// Implemented only by node kinds that declare a name; everything else
/// reports no name rather than failing.
pub trait HasName: AstNode {
    fn name(&self) -> Option<Name> {
        self.syntax().children().find_map(Name::cast)
    }
}

/// Nodes that may own a body of nested members.
pub trait HasBody: AstNode {
    fn body(&self) -> Option<Body> {
        self.syntax().children().find_map(Body::cast)
    }
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    /// Wrap a parse root. The parser always produces a SOURCE_FILE root.
    pub(crate) fn from_root(node: SyntaxNode) -> Self {
        debug_assert_eq!(node.kind(), SyntaxKind::SOURCE_FILE);
        Self(node)
    }

    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.0.children().filter_map(Member::cast)
    }
}

// ============================================================================
// Members
// ============================================================================

/// Any member of a file or body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Package(Package),
    Definition(Definition),
    Usage(Usage),
}

impl AstNode for Member {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::PACKAGE | SyntaxKind::DEFINITION | SyntaxKind::USAGE
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PACKAGE => Some(Self::Package(Package(node))),
            SyntaxKind::DEFINITION => Some(Self::Definition(Definition(node))),
            SyntaxKind::USAGE => Some(Self::Usage(Usage(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Package(n) => n.syntax(),
            Self::Definition(n) => n.syntax(),
            Self::Usage(n) => n.syntax(),
        }
    }
}

impl Member {
    /// Name of the member, if its kind has the "is named" capability.
    pub fn name(&self) -> Option<Name> {
        match self {
            Self::Package(n) => n.name(),
            Self::Definition(n) => n.name(),
            Self::Usage(_) => None,
        }
    }

    /// Body of the member, if it is a container.
    pub fn body(&self) -> Option<Body> {
        match self {
            Self::Package(n) => n.body(),
            Self::Definition(n) => n.body(),
            Self::Usage(_) => None,
        }
    }

    /// Cross-reference written by this member, if any.
    pub fn name_ref(&self) -> Option<NameRef> {
        match self {
            Self::Package(_) => None,
            Self::Definition(n) => n.type_ref().and_then(|t| t.target()),
            Self::Usage(n) => n.target(),
        }
    }

    /// Nested members of the body (empty for non-containers).
    pub fn members(&self) -> Vec<Member> {
        self.body()
            .map(|b| b.members().collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Package
// ============================================================================

ast_node!(Package, PACKAGE);

impl HasName for Package {}
impl HasBody for Package {}

// ============================================================================
// Definition
// ============================================================================

ast_node!(Definition, DEFINITION);

impl HasName for Definition {}
impl HasBody for Definition {}

impl Definition {
    pub fn type_ref(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }
}

// ============================================================================
// Usage
// ============================================================================

ast_node!(Usage, USAGE);

impl Usage {
    pub fn target(&self) -> Option<NameRef> {
        self.0.children().find_map(NameRef::cast)
    }
}

// ============================================================================
// Body / TypeRef
// ============================================================================

ast_node!(Body, BODY);

impl Body {
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.0.children().filter_map(Member::cast)
    }
}

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    pub fn target(&self) -> Option<NameRef> {
        self.0.children().find_map(NameRef::cast)
    }
}

// ============================================================================
// Names
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        ident_token(&self.0)
    }

    pub fn text(&self) -> Option<String> {
        self.ident().map(|t| t.text().to_string())
    }
}

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn ident(&self) -> Option<SyntaxToken> {
        ident_token(&self.0)
    }

    pub fn text(&self) -> Option<String> {
        self.ident().map(|t| t.text().to_string())
    }
}

fn ident_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == SyntaxKind::IDENT)
}
