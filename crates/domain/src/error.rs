//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PanelError`]
//! at port boundaries, either via `#[from]` or an explicit `into_domain()`.

/// Top-level error for every operation that crosses a port.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// A response body could not be parsed as JSON.
    #[error("invalid JSON payload")]
    Payload(#[from] serde_json::Error),

    /// A value bound to a date field is not a date.
    #[error("invalid date value")]
    Date(#[from] DateError),

    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The HTTP transport failed (connection refused, timeout, …).
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The page (DOM or its host-side stand-in) rejected an update.
    #[error("page error")]
    Page(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A value bound to a date field could not be read as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot read {value:?} as a date")]
pub struct DateError {
    pub value: String,
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("field name must not be empty")]
    EmptyName,

    #[error("unknown page action {0:?}")]
    UnknownPageAction(String),

    #[error("unknown HTTP method {0:?}")]
    UnknownMethod(String),
}
