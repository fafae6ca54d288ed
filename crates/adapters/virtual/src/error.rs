//! Virtual adapter error types.

use panelweb_domain::error::{PanelError, ValidationError};

/// Errors specific to the virtual page.
#[derive(Debug, thiserror::Error)]
pub enum VirtualError {
    /// The page description could not be read.
    #[error("cannot read page description")]
    Io(#[from] std::io::Error),

    /// The page description is not valid TOML for a page.
    #[error("invalid page description")]
    Parse(#[from] toml::de::Error),

    /// The page could not be written back as TOML.
    #[error("cannot serialize page")]
    Serialize(#[from] toml::ser::Error),

    /// The page declares its elements and `0` is not one of them.
    #[error("no element with id {0:?}")]
    MissingElement(String),

    /// A form of the page breaks a domain invariant.
    #[error("domain error")]
    Domain(#[source] ValidationError),
}

impl VirtualError {
    /// Convert into a [`PanelError`] for propagation across port boundaries.
    #[must_use]
    pub fn into_domain(self) -> PanelError {
        match self {
            Self::Domain(err) => PanelError::Validation(err),
            other => PanelError::Page(Box::new(other)),
        }
    }
}

impl From<VirtualError> for PanelError {
    fn from(err: VirtualError) -> Self {
        err.into_domain()
    }
}
