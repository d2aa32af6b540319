//! Core domain types shared across the crate

pub mod error;
pub mod provider;
pub mod query;

pub use error::DomainError;
pub use provider::ProviderId;
pub use query::{ItemId, Query, QuestionKind};
