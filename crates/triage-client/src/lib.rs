//! # triage-client
//!
//! Classification service boundary for inboxtriage.
//!
//! This crate provides:
//! - Pluggable classifier backend trait
//! - HTTP implementation speaking the service's multipart contract
//! - Submission lifecycle state machine with single-flight enforcement
//! - Deterministic mock backend for tests (feature `mock`)
//!
//! The backend is an opaque RPC boundary: it produces [`triage_core::Outcome`]
//! values and nothing else. Persistence and rendering happen in the caller.

pub mod backend;
pub mod http;
pub mod submission;

// Mock classification backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use triage_core::*;

pub use backend::ClassifierBackend;
pub use http::HttpClassifier;
pub use submission::SubmissionController;

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCall, MockClassifier};
