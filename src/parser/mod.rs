//! Rowan-based parser for the reference language
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone, Send + Sync)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```
//!
//! The rest of the crate only consumes this module through [`SourceParser`],
//! so a different grammar can be plugged in as long as it produces the same
//! node kinds.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod cst;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use cst::{find_name_token_at_offset, token_segment};
pub use lexer::{Lexer, Token};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{LangLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};

/// The parser capability consumed by the document build pipeline.
///
/// Must be a pure function of the text: no workspace access.
pub trait SourceParser: Send + Sync {
    fn parse(&self, text: &str) -> Parse;
}

/// Parser for the reference `.lang` grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct LangParser;

impl SourceParser for LangParser {
    fn parse(&self, text: &str) -> Parse {
        parse(text)
    }
}
