//! `SubmitTransport` that POSTs the flattened form as a JSON object.

use panelweb_app::ports::SubmitTransport;
use panelweb_domain::error::PanelError;
use panelweb_domain::submission::Submission;

use crate::client::ReqwestHttpClient;
use crate::error::HttpError;

/// Posts submissions to a fixed path on the device.
#[derive(Debug, Clone)]
pub struct ReqwestSubmitTransport {
    http: ReqwestHttpClient,
    uri: String,
}

impl ReqwestSubmitTransport {
    pub fn new(http: ReqwestHttpClient, uri: impl Into<String>) -> Self {
        Self {
            http,
            uri: uri.into(),
        }
    }

    async fn post(&self, submission: &Submission) -> Result<(), HttpError> {
        let url = self.http.resolve(&self.uri)?;
        let response = self.http.inner().post(url).json(submission).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status.as_u16()));
        }
        tracing::info!(uri = %self.uri, fields = submission.len(), "submission delivered");
        Ok(())
    }
}

impl SubmitTransport for ReqwestSubmitTransport {
    async fn submit(&self, submission: &Submission) -> Result<(), PanelError> {
        self.post(submission).await.map_err(HttpError::into_domain)
    }
}
