//! IDE request handler tests

pub mod tests_rename;
pub mod tests_symbols;
