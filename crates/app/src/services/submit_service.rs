//! Submit service: flatten a form and hand it to a transport.

use panelweb_domain::error::PanelError;
use panelweb_domain::form::FormTarget;
use panelweb_domain::submission::Submission;

use crate::ports::SubmitTransport;

/// Transport that only logs the submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTransport;

impl SubmitTransport for LoggingTransport {
    async fn submit(&self, submission: &Submission) -> Result<(), PanelError> {
        tracing::info!(value = %submission.to_json(), "form submitted");
        Ok(())
    }
}

/// Flattens forms into [`Submission`]s and delivers them.
pub struct SubmitService<S> {
    transport: S,
}

impl<S: SubmitTransport> SubmitService<S> {
    pub fn new(transport: S) -> Self {
        Self { transport }
    }

    /// Flatten `form` and deliver it; returns what was delivered.
    ///
    /// # Errors
    ///
    /// Propagates the transport's error.
    #[tracing::instrument(skip_all)]
    pub async fn submit<F>(&self, form: &F) -> Result<Submission, PanelError>
    where
        F: FormTarget + ?Sized,
    {
        let submission = Submission::from_form(form);
        tracing::debug!(fields = submission.len(), "submitting form");
        self.transport.submit(&submission).await?;
        Ok(submission)
    }
}

impl Default for SubmitService<LoggingTransport> {
    fn default() -> Self {
        Self::new(LoggingTransport)
    }
}
