//! # triage-store
//!
//! Durable history/stats persistence for inboxtriage.
//!
//! This crate provides:
//! - `StateStore` trait over the two named persisted values
//! - JSON-file-backed implementation with atomic writes
//! - In-memory implementation for unit tests
//! - The history/stats aggregator that owns bounded-history and
//!   counter-consistency invariants

pub mod aggregator;
pub mod store;

// Re-export core types
pub use triage_core::*;

pub use aggregator::Aggregator;
pub use store::{FileStore, MemoryStore, PersistedState, StateStore};
