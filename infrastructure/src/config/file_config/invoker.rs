//! Retry and timeout configuration from TOML (`[invoker]` section)

use gabarito_application::InvokerSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInvokerConfig {
    /// Extra attempts per model after the first one (default: 2)
    pub max_retries: u32,
    /// First backoff delay in milliseconds; doubles per retry (default: 1000)
    pub initial_retry_delay_ms: u64,
    /// Hard per-attempt timeout in milliseconds (default: 10000)
    pub timeout_ms: u64,
}

impl Default for FileInvokerConfig {
    fn default() -> Self {
        let settings = InvokerSettings::default();
        Self {
            max_retries: settings.max_retries,
            initial_retry_delay_ms: settings.initial_retry_delay_ms,
            timeout_ms: settings.timeout_ms,
        }
    }
}

impl FileInvokerConfig {
    pub fn to_settings(&self) -> InvokerSettings {
        InvokerSettings {
            max_retries: self.max_retries,
            initial_retry_delay_ms: self.initial_retry_delay_ms,
            timeout_ms: self.timeout_ms,
        }
    }
}
