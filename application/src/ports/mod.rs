//! Port definitions (interfaces to the outside world)

pub mod chat_client;
pub mod question_source;
pub mod result_sink;
