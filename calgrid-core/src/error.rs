//! Error types for the calgrid crates.

use thiserror::Error;

/// Errors surfaced by the event store client and the state machines.
///
/// Everything here ends up in front of the user as a notification; none of
/// these are retried and none are fatal to the application.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Server rejected the request (status {status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    #[error("An event needs a title or a description")]
    EmptyEvent,

    #[error("No stored event is selected")]
    NoSelection,

    #[error("Invalid month {month} in year {year}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Result type alias for calgrid operations.
pub type StoreResult<T> = Result<T, StoreError>;
