//! Workspace tests
//!
//! Tests for:
//! - Build pipeline states and batches
//! - Incremental relinking
//! - Cancellation
//! - Index manager
//! - Declaration and reference queries
//! - Persisted index

#[cfg(feature = "persistence")]
pub mod tests_persistence;
pub mod tests_references;
