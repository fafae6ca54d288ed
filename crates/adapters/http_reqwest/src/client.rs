//! `HttpClient` over a shared `reqwest::Client`.

use std::time::Duration;

use panelweb_app::ports::{HttpClient, HttpResponse, Method};
use panelweb_domain::error::PanelError;
use reqwest::Url;

use crate::error::HttpError;

/// Requests against one device, paths resolved against its base address.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestHttpClient {
    /// Create a client for the device at `base_url` (`http://plate01/`).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidBase`] if `base_url` is not an absolute
    /// URL, or [`HttpError::Client`] if the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let base = Url::parse(base_url).map_err(|_| HttpError::InvalidBase(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(HttpError::InvalidBase(base_url.to_string()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// The device base address.
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    pub(crate) fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Resolve `uri` against the base address.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidTarget`] if `uri` cannot be joined.
    pub fn resolve(&self, uri: &str) -> Result<Url, HttpError> {
        self.base
            .join(uri)
            .map_err(|_| HttpError::InvalidTarget(uri.to_string()))
    }

    /// GET `uri` and return the body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Status`] on a non-2xx answer, or a client error.
    #[tracing::instrument(skip(self))]
    pub async fn download(&self, uri: &str) -> Result<Vec<u8>, HttpError> {
        let response = self.client.get(self.resolve(uri)?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn execute(&self, method: Method, uri: &str) -> Result<HttpResponse, HttpError> {
        let url = self.resolve(uri)?;
        let response = self
            .client
            .request(to_reqwest(method), url)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(%method, uri, status, "device answered");
        Ok(HttpResponse { status, body })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn send(&self, method: Method, uri: &str) -> Result<HttpResponse, PanelError> {
        self.execute(method, uri).await.map_err(HttpError::into_domain)
    }
}
