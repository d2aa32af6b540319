//! Report persistence
//!
//! Writes each finished sheet report to a timestamped text file under the
//! configured responses directory.

use async_trait::async_trait;
use chrono::Local;
use gabarito_application::{ResultSink, SinkError};
use std::path::{Path, PathBuf};

/// Sink writing reports to `<dir>/response-<timestamp>.txt`
pub struct FileResultSink {
    dir: PathBuf,
}

impl FileResultSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ResultSink for FileResultSink {
    async fn persist(&self, report: &str) -> Result<PathBuf, SinkError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let filename = format!("response-{}.txt", Local::now().format("%Y-%m-%dT%H-%M-%S"));
        let path = self.dir.join(filename);
        tokio::fs::write(&path, report).await?;

        Ok(path)
    }
}
