//! Infrastructure layer for gabarito
//!
//! This crate contains the adapters that connect the application layer to
//! the outside world: provider HTTP clients, configuration loading, question
//! extraction parsing and report persistence.

pub mod config;
pub mod extraction;
pub mod persist;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use extraction::JsonQuestionSource;
pub use persist::FileResultSink;
pub use providers::build_registry;
