//! HTTP adapter error types.

use panelweb_domain::error::PanelError;

/// Errors specific to the reqwest adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The device base address is not a usable URL.
    #[error("invalid device address {0:?}")]
    InvalidBase(String),

    /// A request path could not be resolved against the base address.
    #[error("invalid request target {0:?}")]
    InvalidTarget(String),

    /// The underlying client failed (connect, timeout, body read, …).
    #[error("HTTP client error")]
    Client(#[from] reqwest::Error),

    /// The device answered a download with a non-2xx status.
    #[error("unexpected status {0}")]
    Status(u16),
}

impl HttpError {
    /// Convert into a [`PanelError::Transport`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> PanelError {
        PanelError::Transport(Box::new(self))
    }
}

impl From<HttpError> for PanelError {
    fn from(err: HttpError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_invalid_base() {
        let err = HttpError::InvalidBase("plate01".to_string());
        assert_eq!(err.to_string(), "invalid device address \"plate01\"");
    }

    #[test]
    fn should_convert_to_transport_error() {
        let err: PanelError = HttpError::Status(503).into();
        assert!(matches!(err, PanelError::Transport(_)));
    }
}
