//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Everything is optional with sensible defaults: an empty file (or no file
//! at all) yields a working configuration that only needs API keys in the
//! environment.

mod invoker;
mod output;
mod providers;

pub use invoker::FileInvokerConfig;
pub use output::FileOutputConfig;
pub use providers::{FileProviderConfig, FileProvidersConfig};

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider settings (models, weights, API key sources)
    pub providers: FileProvidersConfig,
    /// Retry and timeout policy
    pub invoker: FileInvokerConfig,
    /// Report output settings
    pub output: FileOutputConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[providers.claude]
models = ["claude-3-5-sonnet-20241022"]
weight = 7

[invoker]
timeout_ms = 20000
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.claude.weight, 7);
        assert_eq!(config.providers.claude.models.len(), 1);
        assert_eq!(config.invoker.timeout_ms, 20_000);
        // Untouched sections keep their defaults
        assert_eq!(config.invoker.max_retries, 2);
        assert!(config.providers.gemini.enabled);
        assert_eq!(config.output.responses_dir, "responses");
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.invoker.max_retries, 2);
        assert_eq!(config.invoker.initial_retry_delay_ms, 1000);
        assert_eq!(config.invoker.timeout_ms, 10_000);
        assert!(!config.providers.claude.models.is_empty());
    }
}
