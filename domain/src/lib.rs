//! Domain layer for gabarito
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Ballot
//!
//! Every configured provider is asked the same exam question. Each reply is
//! normalized into a canonical answer token and collected, together with the
//! provider's voting weight, into a [`Ballot`].
//!
//! ## Consensus
//!
//! The [`consensus`] module reduces a ballot into a single winning answer
//! using weighted-majority voting with deterministic tie-breaks. It is a pure
//! function of the ballot: no I/O, no hidden state, and it never fails — an
//! empty ballot simply yields no verdict.

pub mod answer;
pub mod ballot;
pub mod consensus;
pub mod core;
pub mod prompt;
pub mod report;

// Re-export commonly used types
pub use answer::{
    Letter, NormalizedAnswer, Verdict, normalize_answer, normalize_binary, normalize_choice,
};
pub use ballot::{Ballot, ProviderAnswer};
pub use consensus::{ConsensusResult, resolve};
pub use core::{
    error::DomainError,
    provider::ProviderId,
    query::{ItemId, Query, QuestionKind},
};
pub use prompt::PromptTemplate;
pub use report::format_sheet_report;
