//! # triage-app
//!
//! Submission engine wiring for inboxtriage: the request builder, batch
//! reconciler, view-sink interface, and the engine that drives one
//! classification from selection to rendered, persisted state.

pub mod builder;
pub mod config;
pub mod engine;
pub mod reconcile;
pub mod view;

pub use builder::{build, cap_files, BuildWarning, BuiltRequest, InputTab, Selection};
pub use config::AppConfig;
pub use engine::Engine;
pub use reconcile::reconcile;
pub use view::ViewSink;
