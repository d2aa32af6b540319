//! Resolve-answer use case
//!
//! Fans one query out to every configured provider in parallel, collects the
//! normalized answers into a ballot and hands it to the consensus resolver.
//! Provider failures never fail the query; they become absences in the
//! ballot.

use crate::ports::chat_client::ChatRequest;
use crate::registry::{ProviderBinding, ProviderRegistry};
use crate::use_cases::invoke_provider::ModelInvoker;
use gabarito_domain::{
    Ballot, ConsensusResult, PromptTemplate, ProviderAnswer, ProviderId, Query, QuestionKind,
    normalize_answer, resolve,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Use case for answering one query by provider consensus
#[derive(Clone)]
pub struct ResolveAnswerUseCase {
    registry: Arc<ProviderRegistry>,
    invoker: ModelInvoker,
}

impl ResolveAnswerUseCase {
    pub fn new(registry: Arc<ProviderRegistry>, invoker: ModelInvoker) -> Self {
        Self { registry, invoker }
    }

    /// Query every configured provider and resolve the ballot.
    ///
    /// `None` means no provider produced an answer — whether they all
    /// failed or none was configured to begin with; an empty ballot is an
    /// all-absent ballot, not an error.
    pub async fn execute(&self, query: &Query) -> Option<ConsensusResult> {
        info!(
            "Item {}: querying {} providers",
            query.item(),
            self.registry.configured_count()
        );

        let mut join_set = JoinSet::new();

        for binding in self.registry.configured() {
            let Some(client) = binding.client.clone() else {
                continue;
            };
            let models = binding.models.clone();
            let provider = binding.id;
            let invoker = self.invoker;
            let request = build_request(binding, query);

            join_set.spawn(async move {
                let reply = invoker.invoke(provider, client.as_ref(), &models, &request).await;
                (provider, reply)
            });
        }

        let mut replies: HashMap<ProviderId, String> = HashMap::new();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((provider, Some(reply))) => {
                    debug!("{provider} replied: {reply}");
                    replies.insert(provider, reply);
                }
                Ok((provider, None)) => {
                    warn!("{provider} produced no answer");
                }
                Err(e) => {
                    warn!("Task join error: {e}");
                }
            }
        }

        // Ballot entries in trust-priority (registry) order, not completion
        // order: the raw-answer fallback of the resolver depends on it
        let entries = self
            .registry
            .bindings()
            .iter()
            .map(|binding| match replies.get(&binding.id) {
                Some(raw) => ProviderAnswer::answered(
                    binding.id,
                    binding.weight,
                    normalize_answer(query.kind(), raw),
                ),
                None => ProviderAnswer::absent(binding.id, binding.weight),
            })
            .collect();

        let ballot = Ballot::new(entries);
        info!("Item {}: votes {}", query.item(), ballot.tally_line());

        let result = resolve(query.kind(), ballot);
        match &result {
            Some(r) => info!("Item {}: {}", query.item(), r.answer.display_text()),
            None => warn!("Item {}: no provider answered", query.item()),
        }

        result
    }
}

/// Render the query into this provider's request.
///
/// Providers flagged `strict_format` get the reinforced multiple-choice
/// prompt pair instead of the regular one.
fn build_request(binding: &ProviderBinding, query: &Query) -> ChatRequest {
    let strict = binding.strict_format && query.kind() == QuestionKind::MultipleChoice;

    let (system, user) = if strict {
        (
            PromptTemplate::strict_system_prompt(query.kind()),
            PromptTemplate::choice_prompt_strict(query),
        )
    } else {
        (
            PromptTemplate::system_prompt(query.kind()),
            PromptTemplate::user_prompt(query),
        )
    };

    ChatRequest::new(String::new(), user, query.kind()).with_system(system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_client::{ChatClient, ClientError};
    use crate::use_cases::invoke_provider::InvokerSettings;
    use async_trait::async_trait;
    use gabarito_domain::{NormalizedAnswer, Verdict};

    struct FixedClient(&'static str);

    #[async_trait]
    impl ChatClient for FixedClient {
        async fn send(&self, _request: &ChatRequest) -> Result<String, ClientError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl ChatClient for FailingClient {
        async fn send(&self, _request: &ChatRequest) -> Result<String, ClientError> {
            Err(ClientError::Api {
                status: 500,
                code: None,
                message: "internal".into(),
            })
        }
    }

    fn binding(id: ProviderId, reply: &'static str) -> ProviderBinding {
        ProviderBinding::with_defaults(id, Some(Arc::new(FixedClient(reply))))
    }

    fn use_case(registry: ProviderRegistry) -> ResolveAnswerUseCase {
        let settings = InvokerSettings {
            max_retries: 0,
            initial_retry_delay_ms: 1,
            timeout_ms: 100,
        };
        ResolveAnswerUseCase::new(Arc::new(registry), ModelInvoker::new(settings))
    }

    #[tokio::test]
    async fn test_majority_verdict_wins() {
        let registry = ProviderRegistry::new(vec![
            binding(ProviderId::Claude, "VERDADEIRO"),
            binding(ProviderId::Gemini, "VERDADEIRO"),
            binding(ProviderId::Gpt, "FALSO"),
            binding(ProviderId::DeepSeek, "VERDADEIRO"),
        ]);
        let query = Query::new("O item está correto.", "1", QuestionKind::Binary);

        let result = use_case(registry).execute(&query).await.unwrap();
        assert_eq!(result.answer, NormalizedAnswer::Verdict(Verdict::True));
        assert_eq!(result.ballot.answered_count(), 4);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_absent_in_ballot() {
        let registry = ProviderRegistry::new(vec![
            binding(ProviderId::Claude, "FALSO"),
            ProviderBinding::with_defaults(ProviderId::Maritaca, None),
        ]);
        let query = Query::new("O item está correto.", "2", QuestionKind::Binary);

        let result = use_case(registry).execute(&query).await.unwrap();
        assert!(result.ballot.answer_of(ProviderId::Maritaca).is_none());
        assert_eq!(result.answer, NormalizedAnswer::Verdict(Verdict::False));
    }

    #[tokio::test]
    async fn test_all_failures_yield_none() {
        let registry = ProviderRegistry::new(vec![ProviderBinding::with_defaults(
            ProviderId::Gpt,
            Some(Arc::new(FailingClient)),
        )]);
        let query = Query::new("O item está correto.", "3", QuestionKind::Binary);

        let result = use_case(registry).execute(&query).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_all_unconfigured_yields_none() {
        // A registry where no provider has a client behaves like one where
        // every provider failed: a null result, not an error
        let registry = ProviderRegistry::new(
            ProviderId::priority_order()
                .into_iter()
                .map(|p| ProviderBinding::with_defaults(p, None))
                .collect(),
        );
        let query = Query::new("O item está correto.", "4", QuestionKind::Binary);

        let result = use_case(registry).execute(&query).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_choice_ballot_resolves_letter() {
        let registry = ProviderRegistry::new(vec![
            binding(ProviderId::Claude, "A alternativa correta é (C)"),
            binding(ProviderId::Gemini, "(C)"),
            binding(ProviderId::Gpt, "C"),
            binding(ProviderId::Grok, "letra D"),
        ]);
        let query = Query::new("Qual alternativa?", "5", QuestionKind::MultipleChoice);

        let result = use_case(registry).execute(&query).await.unwrap();
        assert_eq!(result.answer.display_text(), "A alternativa correta é (C)");
    }

    struct HangingClient;

    #[async_trait]
    impl ChatClient for HangingClient {
        async fn send(&self, _request: &ChatRequest) -> Result<String, ClientError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_hanging_provider_does_not_block_the_others() {
        let registry = ProviderRegistry::new(vec![
            ProviderBinding::with_defaults(ProviderId::Claude, Some(Arc::new(HangingClient))),
            binding(ProviderId::Gemini, "VERDADEIRO"),
        ]);
        let query = Query::new("O item está correto.", "6", QuestionKind::Binary);

        let started = std::time::Instant::now();
        let result = use_case(registry).execute(&query).await.unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(2));

        // The hanging provider is an absence, not a missing ballot entry
        assert_eq!(result.ballot.entries().len(), 2);
        assert!(result.ballot.answer_of(ProviderId::Claude).is_none());
        assert_eq!(result.answer, NormalizedAnswer::Verdict(Verdict::True));
    }
}
