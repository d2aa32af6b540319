//! Provider registry
//!
//! The registry is built once at startup from configuration and shared by
//! every query of the run. A provider without a client (no API key) stays in
//! the registry so its absence is visible in ballots, but it is never
//! dispatched to.

use crate::ports::chat_client::ChatClient;
use gabarito_domain::ProviderId;
use std::sync::Arc;

/// One provider's runtime binding: identity, candidate models, weight and
/// (when configured) a live client
#[derive(Clone)]
pub struct ProviderBinding {
    pub id: ProviderId,
    /// Candidate model identifiers, tried in order
    pub models: Vec<String>,
    /// Voting weight carried into every ballot entry
    pub weight: u32,
    /// Whether this provider needs the reinforced reply-format prompt
    pub strict_format: bool,
    /// `None` when the provider has no API key configured
    pub client: Option<Arc<dyn ChatClient>>,
}

impl ProviderBinding {
    pub fn new(
        id: ProviderId,
        models: Vec<String>,
        weight: u32,
        client: Option<Arc<dyn ChatClient>>,
    ) -> Self {
        Self {
            id,
            models,
            weight,
            // Grok is the one provider observed to drift from the
            // multiple-choice reply format
            strict_format: id == ProviderId::Grok,
            client,
        }
    }

    /// Binding with the provider's default models and weight
    pub fn with_defaults(id: ProviderId, client: Option<Arc<dyn ChatClient>>) -> Self {
        Self::new(id, id.default_models(), id.default_weight(), client)
    }

    pub fn with_strict_format(mut self, strict: bool) -> Self {
        self.strict_format = strict;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

impl std::fmt::Debug for ProviderBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderBinding")
            .field("id", &self.id)
            .field("models", &self.models)
            .field("weight", &self.weight)
            .field("strict_format", &self.strict_format)
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// All provider bindings for a run, in trust-priority order
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    bindings: Vec<ProviderBinding>,
}

impl ProviderRegistry {
    pub fn new(bindings: Vec<ProviderBinding>) -> Self {
        Self { bindings }
    }

    /// Every binding, configured or not, in trust-priority order
    pub fn bindings(&self) -> &[ProviderBinding] {
        &self.bindings
    }

    /// Bindings with a live client
    pub fn configured(&self) -> impl Iterator<Item = &ProviderBinding> {
        self.bindings.iter().filter(|b| b.is_configured())
    }

    pub fn configured_count(&self) -> usize {
        self.configured().count()
    }
}
