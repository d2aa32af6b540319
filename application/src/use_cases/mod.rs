//! Use cases (application services)

pub mod invoke_provider;
pub mod resolve_answer;
pub mod resolve_sheet;
