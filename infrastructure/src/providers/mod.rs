//! Provider API adapters
//!
//! One [`ChatClient`](gabarito_application::ChatClient) implementation per
//! provider API family. Claude speaks the Anthropic Messages API, Gemini the
//! generateContent API, and everyone else (GPT, Grok, DeepSeek, Maritaca) an
//! OpenAI-compatible chat completions endpoint behind different base URLs.
//!
//! Adapters report errors verbatim; retry classification happens in the
//! application layer.

mod anthropic;
mod gemini;
mod openai_compat;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use openai_compat::OpenAiCompatClient;

use crate::config::FileConfig;
use gabarito_application::{ChatClient, ProviderBinding, ProviderRegistry};
use gabarito_domain::ProviderId;
use std::sync::Arc;
use tracing::{debug, info};

/// Build the provider registry from configuration.
///
/// Called once at startup; the registry is shared by every query of the run.
/// Providers without an API key (or disabled in config) get no client and
/// will show up as absences in every ballot.
pub fn build_registry(config: &FileConfig) -> ProviderRegistry {
    let http = reqwest::Client::new();
    let mut bindings = Vec::new();

    for id in ProviderId::priority_order() {
        let provider_config = config.providers.get(id);

        let client: Option<Arc<dyn ChatClient>> = if !provider_config.enabled {
            debug!("{id}: disabled in configuration");
            None
        } else {
            match provider_config.resolve_api_key() {
                Some(api_key) => Some(make_client(
                    id,
                    http.clone(),
                    api_key,
                    provider_config.base_url.clone(),
                )),
                None => {
                    debug!("{id}: no API key ({})", provider_config.api_key_env);
                    None
                }
            }
        };

        bindings.push(
            ProviderBinding::new(
                id,
                provider_config.models.clone(),
                provider_config.weight,
                client,
            )
            .with_strict_format(provider_config.strict_format),
        );
    }

    let registry = ProviderRegistry::new(bindings);
    info!(
        "Provider registry: {}/{} configured",
        registry.configured_count(),
        registry.bindings().len()
    );
    registry
}

fn make_client(
    id: ProviderId,
    http: reqwest::Client,
    api_key: String,
    base_url: String,
) -> Arc<dyn ChatClient> {
    match id {
        ProviderId::Claude => Arc::new(AnthropicClient::new(http, api_key, base_url)),
        ProviderId::Gemini => Arc::new(GeminiClient::new(http, api_key, base_url)),
        ProviderId::Gpt | ProviderId::Grok | ProviderId::DeepSeek | ProviderId::Maritaca => {
            Arc::new(OpenAiCompatClient::new(http, api_key, base_url))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_without_keys_has_no_clients() {
        // Point every provider at an env var that cannot exist
        let mut config = FileConfig::default();
        config.providers.claude.api_key_env = "GABARITO_TEST_NO_SUCH_KEY_1".into();
        config.providers.gpt.api_key_env = "GABARITO_TEST_NO_SUCH_KEY_2".into();
        config.providers.grok.api_key_env = "GABARITO_TEST_NO_SUCH_KEY_3".into();
        config.providers.gemini.api_key_env = "GABARITO_TEST_NO_SUCH_KEY_4".into();
        config.providers.deepseek.api_key_env = "GABARITO_TEST_NO_SUCH_KEY_5".into();
        config.providers.maritaca.api_key_env = "GABARITO_TEST_NO_SUCH_KEY_6".into();

        let registry = build_registry(&config);
        assert_eq!(registry.bindings().len(), 6);
        assert_eq!(registry.configured_count(), 0);
    }

    #[test]
    fn test_registry_respects_explicit_keys_and_enabled_flag() {
        let mut config = FileConfig::default();
        config.providers.claude.api_key = Some("sk-ant-test".into());
        config.providers.gpt.api_key = Some("sk-test".into());
        config.providers.gpt.enabled = false;
        config.providers.grok.api_key_env = "GABARITO_TEST_NO_SUCH_KEY".into();
        config.providers.gemini.api_key_env = "GABARITO_TEST_NO_SUCH_KEY".into();
        config.providers.deepseek.api_key_env = "GABARITO_TEST_NO_SUCH_KEY".into();
        config.providers.maritaca.api_key_env = "GABARITO_TEST_NO_SUCH_KEY".into();

        let registry = build_registry(&config);
        assert_eq!(registry.configured_count(), 1);
        assert_eq!(
            registry.configured().next().map(|b| b.id),
            Some(ProviderId::Claude)
        );
    }

    #[test]
    fn test_registry_keeps_priority_order() {
        let registry = build_registry(&FileConfig::default());
        let order: Vec<ProviderId> = registry.bindings().iter().map(|b| b.id).collect();
        assert_eq!(order, ProviderId::priority_order().to_vec());
    }
}
