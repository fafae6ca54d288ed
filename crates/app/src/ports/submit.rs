//! Submit port: where a flattened form goes.

use std::future::Future;

use panelweb_domain::error::PanelError;
use panelweb_domain::submission::Submission;

/// Receives submissions produced by `SubmitService`.
pub trait SubmitTransport {
    /// Deliver one submission.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Transport`] if the submission could not be delivered.
    fn submit(&self, submission: &Submission) -> impl Future<Output = Result<(), PanelError>>;
}
