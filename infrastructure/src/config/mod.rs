//! Configuration loading

pub mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileInvokerConfig, FileOutputConfig, FileProviderConfig, FileProvidersConfig,
};
pub use loader::ConfigLoader;
