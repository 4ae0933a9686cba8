//! Structural paths: weak references to members of a document.
//!
//! A path is the list of member indices from the root, so `/1/0` is the
//! first member in the body of the second top-level member. Paths never
//! keep a tree alive and survive serialization.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::parser::{AstNode, Member, SourceFile, SyntaxKind, SyntaxNode};

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct AstPath(Vec<u32>);

impl AstPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, index: u32) -> Self {
        let mut segments = self.0.clone();
        segments.push(index);
        Self(segments)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.0.split_last()?;
        Some(Self(init.to_vec()))
    }

    pub fn segments(&self) -> &[u32] {
        &self.0
    }

    /// This path, then each enclosing path up to and including the root.
    pub fn ancestors(&self) -> impl Iterator<Item = AstPath> + '_ {
        (0..=self.0.len()).rev().map(|len| Self(self.0[..len].to_vec()))
    }

    /// Path of a member node (`PACKAGE`, `DEFINITION`, `USAGE`).
    ///
    /// Returns `None` for nodes that are not members or are detached from a
    /// `SOURCE_FILE` root.
    pub fn of(node: &SyntaxNode) -> Option<Self> {
        if !Member::can_cast(node.kind()) {
            return None;
        }
        let mut indices = Vec::new();
        let mut current = node.clone();
        loop {
            let parent = current.parent()?;
            let index = parent
                .children()
                .filter(|c| Member::can_cast(c.kind()))
                .position(|c| c == current)?;
            indices.push(index as u32);
            match parent.kind() {
                SyntaxKind::SOURCE_FILE => break,
                SyntaxKind::BODY => {
                    current = parent.parent()?;
                    if !Member::can_cast(current.kind()) {
                        return None;
                    }
                }
                _ => return None,
            }
        }
        indices.reverse();
        Some(Self(indices))
    }

    /// Path of the innermost member containing `node` (the node itself included).
    pub fn containing(node: &SyntaxNode) -> Option<Self> {
        node.ancestors()
            .find(|n| Member::can_cast(n.kind()))
            .and_then(|n| Self::of(&n))
    }

    /// Re-locate the member this path denotes. The root is not a member.
    pub fn resolve(&self, file: &SourceFile) -> Option<Member> {
        let (first, rest) = self.0.split_first()?;
        let mut member = file.members().nth(*first as usize)?;
        for index in rest {
            member = member.body()?.members().nth(*index as usize)?;
        }
        Some(member)
    }
}

impl fmt::Display for AstPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid AST path '{0}'")]
pub struct ParsePathError(String);

impl FromStr for AstPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix('/')
            .ok_or_else(|| ParsePathError(s.to_string()))?;
        if rest.is_empty() {
            return Ok(Self::root());
        }
        rest.split('/')
            .map(|segment| segment.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|_| ParsePathError(s.to_string()))
    }
}

/// Visit every member of a file in pre-order together with its path.
pub fn walk_members(file: &SourceFile, mut f: impl FnMut(&AstPath, &Member)) {
    fn walk(members: Vec<Member>, parent: &AstPath, f: &mut dyn FnMut(&AstPath, &Member)) {
        for (index, member) in members.into_iter().enumerate() {
            let path = parent.child(index as u32);
            f(&path, &member);
            walk(member.members(), &path, f);
        }
    }
    walk(file.members().collect(), &AstPath::root(), &mut f);
}
