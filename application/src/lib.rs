//! Application layer for gabarito
//!
//! This crate contains use cases and port definitions. Use cases orchestrate
//! the flow of one exam run: fan the question out to every configured
//! provider, absorb their failures into absences, and hand the resulting
//! ballot to the domain's consensus resolver.
//!
//! Ports define how the application talks to the outside world; adapters for
//! them live in the infrastructure layer.

pub mod ports;
pub mod registry;
pub mod use_cases;

// Re-export commonly used types
pub use ports::chat_client::{ChatClient, ChatRequest, ClientError, ErrorKind};
pub use ports::question_source::{QuestionSource, SourceError};
pub use ports::result_sink::{ResultSink, SinkError};
pub use registry::{ProviderBinding, ProviderRegistry};
pub use use_cases::invoke_provider::{InvokerSettings, ModelInvoker};
pub use use_cases::resolve_answer::ResolveAnswerUseCase;
pub use use_cases::resolve_sheet::{ResolveSheetError, ResolveSheetUseCase, SheetOutcome};
