//! Recursive descent parser
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Get the typed root
    pub fn source_file(&self) -> super::SourceFile {
        super::SourceFile::from_root(self.syntax())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, TextSize::of(input));
    parser.parse_source_file();
    parser.finish()
}

/// Recovery set at the top level of a file
const TOP_LEVEL_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::PACKAGE_KW,
    SyntaxKind::DEF_KW,
    SyntaxKind::USE_KW,
];

/// Recovery set inside a body
const BODY_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::PACKAGE_KW,
    SyntaxKind::DEF_KW,
    SyntaxKind::USE_KW,
    SyntaxKind::R_BRACE,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    end: TextSize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], end: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}", what));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(self.end));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    /// SourceFile = Member*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        loop {
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            if self.current_kind().starts_member() {
                self.parse_member();
            } else {
                self.error_recover("expected 'package', 'def' or 'use'", TOP_LEVEL_RECOVERY);
            }
        }
        self.finish_node();
    }

    /// Member = Package | Definition | Usage
    fn parse_member(&mut self) {
        match self.current_kind() {
            SyntaxKind::PACKAGE_KW => self.parse_package(),
            SyntaxKind::DEF_KW => self.parse_definition(),
            SyntaxKind::USE_KW => self.parse_usage(),
            _ => self.error_recover("expected 'package', 'def' or 'use'", BODY_RECOVERY),
        }
    }

    /// Package = 'package' Name Body
    fn parse_package(&mut self) {
        self.start_node(SyntaxKind::PACKAGE);
        self.bump();
        self.skip_trivia();
        self.parse_name();
        self.skip_trivia();
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_body();
        } else {
            self.error("expected '{'");
        }
        self.finish_node();
    }

    /// Definition = 'def' Name TypeRef? (Body | ';')
    fn parse_definition(&mut self) {
        self.start_node(SyntaxKind::DEFINITION);
        self.bump();
        self.skip_trivia();
        self.parse_name();
        self.skip_trivia();
        if self.at(SyntaxKind::COLON) {
            self.parse_type_ref();
            self.skip_trivia();
        }
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_body();
        } else {
            self.expect(SyntaxKind::SEMICOLON, "';' or '{'");
        }
        self.finish_node();
    }

    /// Usage = 'use' NameRef ';'
    fn parse_usage(&mut self) {
        self.start_node(SyntaxKind::USAGE);
        self.bump();
        self.skip_trivia();
        self.parse_name_ref();
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON, "';'");
        self.finish_node();
    }

    /// TypeRef = ':' NameRef
    fn parse_type_ref(&mut self) {
        self.start_node(SyntaxKind::TYPE_REF);
        self.bump();
        self.skip_trivia();
        self.parse_name_ref();
        self.finish_node();
    }

    /// Body = '{' Member* '}'
    fn parse_body(&mut self) {
        self.start_node(SyntaxKind::BODY);
        self.bump();
        loop {
            self.skip_trivia();
            if self.at_eof() {
                self.error("expected '}'");
                break;
            }
            if self.eat(SyntaxKind::R_BRACE) {
                break;
            }
            self.parse_member();
        }
        self.finish_node();
    }

    fn parse_name(&mut self) {
        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected a name");
        }
    }

    fn parse_name_ref(&mut self) {
        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::NAME_REF);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected a name");
        }
    }
}
