//! HTTP port: one request against the device, body read as text.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use panelweb_domain::error::{PanelError, ValidationError};

/// Request methods the pages issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ValidationError::UnknownMethod(s.to_string())),
        }
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues requests against the device.
///
/// `uri` is either absolute or a path resolved against the device's base
/// address by the adapter. Any status is a successful exchange; only a
/// failure to complete it is an error.
pub trait HttpClient {
    /// Send a request with an empty body.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Transport`] if the exchange could not complete.
    fn send(
        &self,
        method: Method,
        uri: &str,
    ) -> impl Future<Output = Result<HttpResponse, PanelError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_method_case_insensitively() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("Post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn should_reject_unknown_method() {
        assert_eq!(
            "PATCH".parse::<Method>().unwrap_err(),
            ValidationError::UnknownMethod("PATCH".to_string())
        );
    }

    #[test]
    fn should_treat_only_2xx_as_ok() {
        assert!(HttpResponse::new(200, "").ok());
        assert!(HttpResponse::new(204, "").ok());
        assert!(!HttpResponse::new(304, "").ok());
        assert!(!HttpResponse::new(400, "Bad Request").ok());
        assert!(!HttpResponse::new(503, "").ok());
    }
}
