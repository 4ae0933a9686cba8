//! Name provider - what text span is a declaration's identity.
//!
//! Indexing, rename, and reference search all go through this type, so
//! they agree on span boundaries.

use smol_str::SmolStr;

use crate::parser::{AstNode, Member, Name, SyntaxToken};

#[derive(Debug, Default, Clone, Copy)]
pub struct NameProvider;

impl NameProvider {
    /// Declared name of a member; absent for kinds without the "is named" capability.
    pub fn get_name(&self, member: &Member) -> Option<SmolStr> {
        self.get_name_node(member).map(|t| SmolStr::new(t.text()))
    }

    /// The identifier token where the member's name is written.
    pub fn get_name_node(&self, member: &Member) -> Option<SyntaxToken> {
        member.name()?.ident()
    }

    /// The member that `token` names, if `token` is a declaration's name node.
    pub fn declaring_member(&self, token: &SyntaxToken) -> Option<Member> {
        let name = token.parent().and_then(Name::cast)?;
        let member = name.syntax().parent().and_then(Member::cast)?;
        (self.get_name_node(&member).as_ref() == Some(token)).then_some(member)
    }

    pub fn is_name_node(&self, token: &SyntaxToken) -> bool {
        self.declaring_member(token).is_some()
    }
}
