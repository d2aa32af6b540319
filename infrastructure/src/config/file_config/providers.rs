//! Provider configuration from TOML (`[providers]` section)

use gabarito_domain::ProviderId;
use serde::{Deserialize, Serialize};

/// One provider's settings.
///
/// `api_key` takes precedence over `api_key_env` when set; neither being
/// available leaves the provider unconfigured, which is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Whether this provider participates at all
    pub enabled: bool,
    /// Environment variable name for the API key
    pub api_key_env: String,
    /// Direct API key (not recommended — use env var instead)
    pub api_key: Option<String>,
    /// Base URL for the provider API
    pub base_url: String,
    /// Candidate models, tried in order
    pub models: Vec<String>,
    /// Voting weight
    pub weight: u32,
    /// Use the reinforced reply-format prompt for multiple choice
    pub strict_format: bool,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        // A concrete provider default is always applied over this; serde
        // just needs some Default to fill partial sections
        Self::for_provider(ProviderId::Claude)
    }
}

impl FileProviderConfig {
    /// Built-in defaults for one provider
    pub fn for_provider(id: ProviderId) -> Self {
        let (api_key_env, base_url) = match id {
            ProviderId::Claude => ("ANTHROPIC_API_KEY", "https://api.anthropic.com"),
            ProviderId::Gpt => ("OPENAI_API_KEY", "https://api.openai.com/v1"),
            ProviderId::Grok => ("XAI_API_KEY", "https://api.x.ai/v1"),
            ProviderId::Gemini => ("GEMINI_API_KEY", "https://generativelanguage.googleapis.com"),
            ProviderId::DeepSeek => ("DEEPSEEK_API_KEY", "https://api.deepseek.com"),
            ProviderId::Maritaca => ("MARITACA_API_KEY", "https://chat.maritaca.ai/api"),
        };

        Self {
            enabled: true,
            api_key_env: api_key_env.to_string(),
            api_key: None,
            base_url: base_url.to_string(),
            models: id.default_models(),
            weight: id.default_weight(),
            strict_format: id == ProviderId::Grok,
        }
    }

    /// Resolve the API key: explicit value first, then the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key
            && !key.is_empty()
        {
            return Some(key.clone());
        }
        std::env::var(&self.api_key_env).ok().filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub claude: FileProviderConfig,
    pub gpt: FileProviderConfig,
    pub grok: FileProviderConfig,
    pub gemini: FileProviderConfig,
    pub deepseek: FileProviderConfig,
    pub maritaca: FileProviderConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            claude: FileProviderConfig::for_provider(ProviderId::Claude),
            gpt: FileProviderConfig::for_provider(ProviderId::Gpt),
            grok: FileProviderConfig::for_provider(ProviderId::Grok),
            gemini: FileProviderConfig::for_provider(ProviderId::Gemini),
            deepseek: FileProviderConfig::for_provider(ProviderId::DeepSeek),
            maritaca: FileProviderConfig::for_provider(ProviderId::Maritaca),
        }
    }
}

impl FileProvidersConfig {
    pub fn get(&self, id: ProviderId) -> &FileProviderConfig {
        match id {
            ProviderId::Claude => &self.claude,
            ProviderId::Gpt => &self.gpt,
            ProviderId::Grok => &self.grok,
            ProviderId::Gemini => &self.gemini,
            ProviderId::DeepSeek => &self.deepseek,
            ProviderId::Maritaca => &self.maritaca,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_provider_table() {
        let config = FileProvidersConfig::default();
        assert_eq!(config.gemini.weight, 6);
        assert_eq!(config.maritaca.weight, 3);
        assert_eq!(config.claude.api_key_env, "ANTHROPIC_API_KEY");
        assert!(config.grok.base_url.contains("x.ai"));
    }

    #[test]
    fn test_explicit_api_key_beats_env() {
        let config = FileProviderConfig {
            api_key: Some("sk-test".to_string()),
            ..FileProviderConfig::for_provider(ProviderId::Gpt)
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-test"));
    }
}
