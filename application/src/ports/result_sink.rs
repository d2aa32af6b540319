//! Result sink port
//!
//! Persists the final sheet report after a run.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a report
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for finished sheet reports
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist the report text; returns where it was written
    async fn persist(&self, report: &str) -> Result<PathBuf, SinkError>;
}
