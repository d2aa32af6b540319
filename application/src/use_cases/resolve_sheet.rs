//! Resolve-sheet use case
//!
//! Answers every item of an exam sheet concurrently, assembles the report
//! and hands it to the result sink.

use crate::ports::result_sink::ResultSink;
use crate::use_cases::resolve_answer::ResolveAnswerUseCase;
use gabarito_domain::{ConsensusResult, ItemId, Query, format_sheet_report};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Errors that can occur when resolving a sheet
#[derive(Error, Debug)]
pub enum ResolveSheetError {
    #[error("Empty sheet")]
    EmptySheet,
}

/// Everything produced by one sheet run
#[derive(Debug)]
pub struct SheetOutcome {
    /// Per-item consensus results, in sheet order
    pub results: Vec<(ItemId, Option<ConsensusResult>)>,
    /// The formatted report
    pub report: String,
    /// Where the report was persisted, when a sink was attached and succeeded
    pub saved_to: Option<PathBuf>,
}

/// Use case for answering a whole exam sheet
pub struct ResolveSheetUseCase {
    answer: ResolveAnswerUseCase,
    sink: Option<Arc<dyn ResultSink>>,
}

impl ResolveSheetUseCase {
    pub fn new(answer: ResolveAnswerUseCase, sink: Option<Arc<dyn ResultSink>>) -> Self {
        Self { answer, sink }
    }

    /// Resolve every item concurrently, keeping sheet order in the report.
    ///
    /// A failed persist is logged, not fatal: the results are already in
    /// hand and the caller still gets the report text.
    pub async fn execute(&self, queries: Vec<Query>) -> Result<SheetOutcome, ResolveSheetError> {
        if queries.is_empty() {
            return Err(ResolveSheetError::EmptySheet);
        }

        info!("Resolving sheet with {} items", queries.len());

        let mut join_set = JoinSet::new();

        for (index, query) in queries.into_iter().enumerate() {
            let answer = self.answer.clone();
            join_set.spawn(async move {
                let item = query.item().clone();
                let result = answer.execute(&query).await;
                (index, item, result)
            });
        }

        let mut indexed: Vec<(usize, ItemId, Option<ConsensusResult>)> = Vec::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, item, result)) => indexed.push((index, item, result)),
                Err(e) => {
                    warn!("Task join error: {e}");
                }
            }
        }

        indexed.sort_by_key(|(index, _, _)| *index);
        let results: Vec<(ItemId, Option<ConsensusResult>)> = indexed
            .into_iter()
            .map(|(_, item, result)| (item, result))
            .collect();

        let report = format_sheet_report(&results);

        let saved_to = match &self.sink {
            Some(sink) => match sink.persist(&report).await {
                Ok(path) => {
                    info!("Report saved to {}", path.display());
                    Some(path)
                }
                Err(e) => {
                    warn!("Failed to persist report: {e}");
                    None
                }
            },
            None => None,
        };

        Ok(SheetOutcome {
            results,
            report,
            saved_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_client::{ChatClient, ChatRequest, ClientError};
    use crate::ports::result_sink::SinkError;
    use crate::registry::{ProviderBinding, ProviderRegistry};
    use crate::use_cases::invoke_provider::{InvokerSettings, ModelInvoker};
    use async_trait::async_trait;
    use gabarito_domain::{ProviderId, QuestionKind};
    use std::sync::Mutex;

    struct FixedClient(&'static str);

    #[async_trait]
    impl ChatClient for FixedClient {
        async fn send(&self, _request: &ChatRequest) -> Result<String, ClientError> {
            Ok(self.0.to_string())
        }
    }

    struct MemorySink {
        saved: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ResultSink for MemorySink {
        async fn persist(&self, report: &str) -> Result<PathBuf, SinkError> {
            self.saved.lock().unwrap().push(report.to_string());
            Ok(PathBuf::from("responses/response-test.txt"))
        }
    }

    fn answer_use_case() -> ResolveAnswerUseCase {
        let registry = ProviderRegistry::new(vec![ProviderBinding::with_defaults(
            ProviderId::Claude,
            Some(Arc::new(FixedClient("VERDADEIRO"))),
        )]);
        let settings = InvokerSettings {
            max_retries: 0,
            initial_retry_delay_ms: 1,
            timeout_ms: 100,
        };
        ResolveAnswerUseCase::new(Arc::new(registry), ModelInvoker::new(settings))
    }

    #[tokio::test]
    async fn test_sheet_keeps_item_order_and_persists() {
        let sink = Arc::new(MemorySink {
            saved: Mutex::new(vec![]),
        });
        let use_case = ResolveSheetUseCase::new(answer_use_case(), Some(sink.clone()));

        let queries = vec![
            Query::new("Item um.", "1", QuestionKind::Binary),
            Query::new("Item dois.", "2", QuestionKind::Binary),
            Query::new("Item três.", "3", QuestionKind::Binary),
        ];

        let outcome = use_case.execute(queries).await.unwrap();

        let items: Vec<&str> = outcome.results.iter().map(|(i, _)| i.as_str()).collect();
        assert_eq!(items, vec!["1", "2", "3"]);
        assert!(outcome.report.contains("Item 2: VERDADEIRO"));
        assert!(outcome.saved_to.is_some());
        assert_eq!(sink.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_sheet_is_an_error() {
        let use_case = ResolveSheetUseCase::new(answer_use_case(), None);
        let result = use_case.execute(vec![]).await;
        assert!(matches!(result, Err(ResolveSheetError::EmptySheet)));
    }

    struct BrokenSink;

    #[async_trait]
    impl ResultSink for BrokenSink {
        async fn persist(&self, _report: &str) -> Result<PathBuf, SinkError> {
            Err(SinkError::Io(std::io::Error::other("disk full")))
        }
    }

    #[tokio::test]
    async fn test_persist_failure_is_not_fatal() {
        let use_case = ResolveSheetUseCase::new(answer_use_case(), Some(Arc::new(BrokenSink)));
        let queries = vec![Query::new("Item um.", "1", QuestionKind::Binary)];

        let outcome = use_case.execute(queries).await.unwrap();
        assert!(outcome.saved_to.is_none());
        assert!(outcome.report.contains("Item 1"));
    }
}
