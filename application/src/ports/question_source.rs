//! Question source port
//!
//! Turns an extracted exam document into queries. The concrete format (the
//! JSON emitted by the vision extraction step) is an infrastructure concern.

use gabarito_domain::Query;
use thiserror::Error;

/// Errors that can occur while parsing extracted questions
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("No questions found")]
    Empty,
}

/// Parser for extracted exam documents
pub trait QuestionSource: Send + Sync {
    /// Parse a raw extracted document into queries, in sheet order
    fn questions(&self, raw: &str) -> Result<Vec<Query>, SourceError>;
}
