//! Parser tests
//!
//! Tests for:
//! - Lossless CST
//! - Error recovery
//! - Typed AST accessors

pub mod tests_parser;
