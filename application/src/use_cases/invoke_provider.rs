//! Provider invocation with model fallback and retry
//!
//! One provider exposes several candidate models, tried in order. Each model
//! gets a bounded number of attempts with exponential backoff on transient
//! failures; a model the account cannot use is skipped immediately. Every
//! attempt runs under a hard timeout so one slow provider can never stall
//! the whole ballot.
//!
//! Failure here is absorbed, never propagated: when every candidate model is
//! exhausted the provider simply contributes no answer.

use crate::ports::chat_client::{ChatClient, ChatRequest, ClientError, ErrorKind};
use gabarito_domain::ProviderId;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry and timeout policy for provider calls
#[derive(Debug, Clone, Copy)]
pub struct InvokerSettings {
    /// Extra attempts per model after the first one
    pub max_retries: u32,
    /// First backoff delay; doubles on every retry of the same model
    pub initial_retry_delay_ms: u64,
    /// Hard per-attempt timeout
    pub timeout_ms: u64,
}

impl Default for InvokerSettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_retry_delay_ms: 1000,
            timeout_ms: 10_000,
        }
    }
}

/// Runs one provider's model-fallback loop
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelInvoker {
    settings: InvokerSettings,
}

impl ModelInvoker {
    pub fn new(settings: InvokerSettings) -> Self {
        Self { settings }
    }

    /// Ask the provider, trying each candidate model in turn.
    ///
    /// Returns the first successful reply, trimmed; `None` when every model
    /// is exhausted.
    pub async fn invoke(
        &self,
        provider: ProviderId,
        client: &dyn ChatClient,
        models: &[String],
        request: &ChatRequest,
    ) -> Option<String> {
        for model in models {
            let request = ChatRequest {
                model: model.clone(),
                ..request.clone()
            };
            if let Some(reply) = self.try_model(provider, client, &request).await {
                return Some(reply);
            }
        }

        warn!("{provider}: all candidate models exhausted");
        None
    }

    /// All attempts against one model; `None` means move on to the next
    async fn try_model(
        &self,
        provider: ProviderId,
        client: &dyn ChatClient,
        request: &ChatRequest,
    ) -> Option<String> {
        let mut retry_delay = Duration::from_millis(self.settings.initial_retry_delay_ms);
        let timeout = Duration::from_millis(self.settings.timeout_ms);

        for attempt in 0..=self.settings.max_retries {
            if attempt > 0 {
                debug!(
                    "{provider}: querying {} (attempt {}/{})",
                    request.model,
                    attempt + 1,
                    self.settings.max_retries + 1
                );
            } else {
                debug!("{provider}: querying {}", request.model);
            }

            // The timeout drops the in-flight request, cancelling it
            let outcome = match tokio::time::timeout(timeout, client.send(request)).await {
                Ok(result) => result,
                Err(_) => Err(ClientError::Timeout),
            };

            let error = match outcome {
                Ok(reply) => return Some(reply.trim().to_string()),
                Err(e) => e,
            };

            match error.kind() {
                ErrorKind::ModelUnavailable => {
                    debug!("{provider}: model {} unavailable: {error}", request.model);
                    return None;
                }
                ErrorKind::Transient => {
                    if attempt < self.settings.max_retries {
                        debug!(
                            "{provider}: transient failure on {}, retrying in {:?}: {error}",
                            request.model, retry_delay
                        );
                        tokio::time::sleep(retry_delay).await;
                        retry_delay *= 2;
                    } else {
                        warn!(
                            "{provider}: model {} still failing after {} attempts: {error}",
                            request.model,
                            self.settings.max_retries + 1
                        );
                    }
                }
                ErrorKind::Fatal => {
                    warn!("{provider}: model {} failed: {error}", request.model);
                    return None;
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gabarito_domain::QuestionKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_settings() -> InvokerSettings {
        InvokerSettings {
            max_retries: 2,
            initial_retry_delay_ms: 1,
            timeout_ms: 50,
        }
    }

    fn request() -> ChatRequest {
        ChatRequest::new("placeholder", "pergunta", QuestionKind::Binary)
    }

    fn models(names: &[&str]) -> Vec<String> {
        names.iter().map(|m| m.to_string()).collect()
    }

    /// Fails a fixed number of times, then succeeds
    struct FlakyClient {
        calls: AtomicUsize,
        failures: usize,
    }

    #[async_trait]
    impl ChatClient for FlakyClient {
        async fn send(&self, _request: &ChatRequest) -> Result<String, ClientError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(ClientError::Api {
                    status: 429,
                    code: None,
                    message: "rate limit".into(),
                })
            } else {
                Ok("  VERDADEIRO  ".into())
            }
        }
    }

    struct AlwaysErrClient {
        calls: AtomicUsize,
        error: fn() -> ClientError,
    }

    #[async_trait]
    impl ChatClient for AlwaysErrClient {
        async fn send(&self, _request: &ChatRequest) -> Result<String, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err((self.error)())
        }
    }

    #[tokio::test]
    async fn test_transient_failures_retry_then_succeed() {
        let client = FlakyClient {
            calls: AtomicUsize::new(0),
            failures: 2,
        };
        let invoker = ModelInvoker::new(fast_settings());

        let reply = invoker
            .invoke(ProviderId::Gpt, &client, &models(&["gpt-4o"]), &request())
            .await;

        assert_eq!(reply.as_deref(), Some("VERDADEIRO"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_attempts_bounded_per_model() {
        let client = AlwaysErrClient {
            calls: AtomicUsize::new(0),
            error: || ClientError::Api {
                status: 429,
                code: None,
                message: "rate limit".into(),
            },
        };
        let invoker = ModelInvoker::new(fast_settings());

        let reply = invoker
            .invoke(
                ProviderId::Claude,
                &client,
                &models(&["model-a", "model-b"]),
                &request(),
            )
            .await;

        assert!(reply.is_none());
        // max_retries + 1 attempts for each of the two candidate models
        assert_eq!(client.calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_unavailable_model_skipped_without_retry() {
        let client = AlwaysErrClient {
            calls: AtomicUsize::new(0),
            error: || ClientError::Api {
                status: 404,
                code: None,
                message: "model not found".into(),
            },
        };
        let invoker = ModelInvoker::new(fast_settings());

        let reply = invoker
            .invoke(
                ProviderId::Grok,
                &client,
                &models(&["grok-9", "grok-10"]),
                &request(),
            )
            .await;

        assert!(reply.is_none());
        // One attempt per model, no retries
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fatal_error_moves_to_next_model() {
        let client = AlwaysErrClient {
            calls: AtomicUsize::new(0),
            error: || ClientError::Api {
                status: 400,
                code: None,
                message: "bad request".into(),
            },
        };
        let invoker = ModelInvoker::new(fast_settings());

        let reply = invoker
            .invoke(
                ProviderId::DeepSeek,
                &client,
                &models(&["m1", "m2", "m3"]),
                &request(),
            )
            .await;

        assert!(reply.is_none());
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    /// Never replies; every attempt must be cut off by the timeout
    struct HangingClient;

    #[async_trait]
    impl ChatClient for HangingClient {
        async fn send(&self, _request: &ChatRequest) -> Result<String, ClientError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("unreachable".into())
        }
    }

    #[tokio::test]
    async fn test_hanging_provider_is_cut_off() {
        let invoker = ModelInvoker::new(InvokerSettings {
            max_retries: 1,
            initial_retry_delay_ms: 1,
            timeout_ms: 10,
        });

        let start = std::time::Instant::now();
        let reply = invoker
            .invoke(
                ProviderId::Maritaca,
                &HangingClient,
                &models(&["sabia-3"]),
                &request(),
            )
            .await;

        assert!(reply.is_none());
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
