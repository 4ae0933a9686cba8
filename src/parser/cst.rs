//! CST navigation helpers used by the request handlers.

use rowan::{TextSize, TokenAtOffset};

use super::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::base::{LineIndex, Segment};

/// Find the identifier token at `offset`.
///
/// When the offset sits between two tokens (e.g. directly after a name),
/// the identifier on either side is accepted, preferring the right one.
/// Returns `None` unless the token is an identifier.
pub fn find_name_token_at_offset(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    if offset > root.text_range().end() {
        return None;
    }
    match root.token_at_offset(offset) {
        TokenAtOffset::None => None,
        TokenAtOffset::Single(token) => is_ident(&token).then_some(token),
        TokenAtOffset::Between(left, right) => {
            if is_ident(&right) {
                Some(right)
            } else if is_ident(&left) {
                Some(left)
            } else {
                None
            }
        }
    }
}

/// Located text of a token.
pub fn token_segment(token: &SyntaxToken, line_index: &LineIndex) -> Segment {
    line_index.segment(token.text_range())
}

fn is_ident(token: &SyntaxToken) -> bool {
    token.kind() == SyntaxKind::IDENT
}
