//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Directory where sheet reports are written (default: "responses")
    pub responses_dir: String,
    /// Colored terminal output (default: true)
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            responses_dir: "responses".to_string(),
            color: true,
        }
    }
}
