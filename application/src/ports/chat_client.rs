//! Chat client port
//!
//! Defines the interface for sending one prompt to one provider model.
//! Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use gabarito_domain::QuestionKind;
use thiserror::Error;

/// One request to a provider model
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Provider-specific model identifier, e.g. "claude-3-5-sonnet-20240620"
    pub model: String,
    /// Optional system message (ignored by clients whose API has no system role)
    pub system: Option<String>,
    /// The user prompt
    pub user: String,
    /// Reply token budget
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, user: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            model: model.into(),
            system: None,
            user: user.into(),
            max_tokens: kind.max_tokens(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Errors that can occur while talking to a provider
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        /// Provider error code, e.g. "insufficient_quota", when present
        code: Option<String>,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout")]
    Timeout,

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// How the invoker should react to a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The model does not exist for this account: skip to the next
    /// candidate model immediately, no backoff
    ModelUnavailable,
    /// Rate limit, quota or overload: retry the same model after backoff
    Transient,
    /// Anything else: give up on this model, move to the next candidate
    Fatal,
}

impl ClientError {
    /// Classify this error for retry handling.
    ///
    /// This is the single place where provider error shapes are interpreted.
    /// Adapters must not pre-classify; they report status, code and message
    /// verbatim and the decision happens here.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Timeout => ErrorKind::Transient,
            // Network-level failures are worth one more try
            ClientError::Transport(_) => ErrorKind::Transient,
            ClientError::Malformed(_) => ErrorKind::Fatal,
            ClientError::Api {
                status,
                code,
                message,
            } => {
                let message = message.to_lowercase();
                if *status == 404
                    || message.contains("model not found")
                    || message.contains("does not exist")
                    || message.contains("not supported")
                {
                    return ErrorKind::ModelUnavailable;
                }
                let code = code.as_deref().unwrap_or("");
                if *status == 429
                    || *status == 529
                    || code == "insufficient_quota"
                    || code == "overloaded_error"
                    || message.contains("rate limit")
                    || message.contains("quota")
                {
                    return ErrorKind::Transient;
                }
                ErrorKind::Fatal
            }
        }
    }
}

/// Client for one provider's chat API
///
/// One implementation per provider family; the same instance serves every
/// candidate model of that provider.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one request and return the reply text
    async fn send(&self, request: &ChatRequest) -> Result<String, ClientError>;
}
