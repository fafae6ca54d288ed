//! Browser adapter error types.

use panelweb_domain::error::PanelError;

/// Errors specific to the browser adapter. JS values are rendered to text
/// so the error stays `Send`.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("no document to work on")]
    NoDocument,

    #[error("no element with id {0:?}")]
    MissingElement(String),

    #[error("element {id:?} is not {expected}")]
    WrongElement { id: String, expected: &'static str },

    #[error("request failed: {0}")]
    Http(String),

    #[error("script error: {0}")]
    Js(String),
}

impl DomError {
    /// Convert into a [`PanelError`] for propagation across port boundaries.
    #[must_use]
    pub fn into_domain(self) -> PanelError {
        match self {
            Self::Http(_) => PanelError::Transport(Box::new(self)),
            other => PanelError::Page(Box::new(other)),
        }
    }
}

impl From<DomError> for PanelError {
    fn from(err: DomError) -> Self {
        err.into_domain()
    }
}

impl From<gloo_net::Error> for DomError {
    fn from(err: gloo_net::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<wasm_bindgen::JsValue> for DomError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}
