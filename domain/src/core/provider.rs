//! Provider identity value object
//!
//! Each provider is one external AI answer-generation service. The set is
//! closed: voting weights and the trust-priority order below are empirical
//! and the consensus tie-breaks depend on them being stable.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The AI providers that can be polled for an answer (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Claude,
    Gpt,
    Grok,
    Gemini,
    DeepSeek,
    Maritaca,
}

impl ProviderId {
    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Claude => "claude",
            ProviderId::Gpt => "gpt",
            ProviderId::Grok => "grok",
            ProviderId::Gemini => "gemini",
            ProviderId::DeepSeek => "deepseek",
            ProviderId::Maritaca => "maritaca",
        }
    }

    /// All providers, in trust-priority order (most trusted first).
    ///
    /// This order is the final consensus tie-break: when no voting rule
    /// produces a winner, the first provider in this list that voted at all
    /// decides the answer.
    pub fn priority_order() -> [ProviderId; 6] {
        [
            ProviderId::Claude,
            ProviderId::Gemini,
            ProviderId::Gpt,
            ProviderId::Grok,
            ProviderId::DeepSeek,
            ProviderId::Maritaca,
        ]
    }

    /// Default voting weight for this provider.
    ///
    /// Weights reflect empirically assigned trust; they are only compared
    /// against each other, the absolute scale carries no meaning.
    pub fn default_weight(&self) -> u32 {
        match self {
            ProviderId::Claude => 5,
            ProviderId::Gemini => 6,
            ProviderId::Gpt => 4,
            ProviderId::Grok => 4,
            ProviderId::DeepSeek => 3,
            ProviderId::Maritaca => 3,
        }
    }

    /// Default candidate model list, in preference order (most capable first).
    ///
    /// The invoker walks this list front to back, falling back to the next
    /// entry when a model is unavailable or keeps failing.
    pub fn default_models(&self) -> Vec<String> {
        let models: &[&str] = match self {
            ProviderId::Claude => &[
                "claude-3-7-sonnet-20250219",
                "claude-3-5-sonnet-20241022",
                "claude-3-5-haiku-20241022",
            ],
            ProviderId::Gpt => &["gpt-4.5-preview", "gpt-4o", "gpt-3.5-turbo"],
            ProviderId::Grok => &["grok-3-beta", "grok-3-fast-beta"],
            ProviderId::Gemini => &["gemini-2.0-flash", "gemini-1.0-pro", "gemini-pro"],
            ProviderId::DeepSeek => &["deepseek-reasoner", "deepseek-chat"],
            ProviderId::Maritaca => &["sabia-3", "sabiazinho-3"],
        };
        models.iter().map(|m| m.to_string()).collect()
    }

    /// Whether this provider counts as a principal (high-trust) voter.
    ///
    /// A two-vote letter backed by at least one principal provider is
    /// accepted as partial consensus.
    pub fn is_principal(&self) -> bool {
        matches!(
            self,
            ProviderId::Claude | ProviderId::Gemini | ProviderId::Gpt | ProviderId::Grok
        )
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = super::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claude" => Ok(ProviderId::Claude),
            "gpt" => Ok(ProviderId::Gpt),
            "grok" | "xai" => Ok(ProviderId::Grok),
            "gemini" => Ok(ProviderId::Gemini),
            "deepseek" => Ok(ProviderId::DeepSeek),
            "maritaca" => Ok(ProviderId::Maritaca),
            other => Err(super::error::DomainError::UnknownProvider(
                other.to_string(),
            )),
        }
    }
}

impl Serialize for ProviderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
