//! Config binder: fetch a configuration object and populate the page forms.

use panelweb_domain::error::PanelError;
use panelweb_domain::populate::{PopulateReport, populate};
use serde_json::Value;

use crate::ports::{FormHost, HttpClient, Method};

/// Which forms of the page receive the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormScope {
    /// Only the first form in document order.
    First,
    /// Every form of the page.
    #[default]
    All,
}

/// Loads configuration documents into forms.
pub struct ConfigBinder<H> {
    http: H,
}

impl<H: HttpClient> ConfigBinder<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Request `uri` and [`fill`](Self::fill) the forms with the JSON body.
    ///
    /// The body is parsed whatever the status; the device answers unknown
    /// sections with a plain-text `400`, which fails as a payload error.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Transport`] if the request fails,
    /// [`PanelError::Payload`] if the body is not JSON, or
    /// [`PanelError::Date`] if a date control receives a non-date.
    #[tracing::instrument(skip(self, host))]
    pub async fn load<F>(
        &self,
        method: Method,
        uri: &str,
        host: &mut F,
        scope: FormScope,
    ) -> Result<Vec<PopulateReport>, PanelError>
    where
        F: FormHost + ?Sized,
    {
        let response = self.http.send(method, uri).await?;
        if !response.ok() {
            tracing::warn!(status = response.status, "configuration request not ok");
        }
        let payload: Value = serde_json::from_str(&response.body)?;
        Self::fill(&payload, host, scope)
    }

    /// Populate the forms in `scope` from `payload`, one report per form.
    ///
    /// A payload that is not an object binds nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Date`] if a date control receives a non-date;
    /// later forms are left untouched.
    pub fn fill<F>(
        payload: &Value,
        host: &mut F,
        scope: FormScope,
    ) -> Result<Vec<PopulateReport>, PanelError>
    where
        F: FormHost + ?Sized,
    {
        let Value::Object(data) = payload else {
            tracing::warn!("configuration payload is not an object, nothing to bind");
            return Ok(Vec::new());
        };
        let count = match scope {
            FormScope::First => host.form_count().min(1),
            FormScope::All => host.form_count(),
        };

        let mut reports = Vec::with_capacity(count);
        for index in 0..count {
            let Some(form) = host.form_mut(index) else {
                continue;
            };
            let report = populate(form, data)?;
            for name in &report.skipped {
                tracing::trace!(form = index, %name, "no control for key");
            }
            tracing::debug!(
                form = index,
                bound = report.bound.len(),
                skipped = report.skipped.len(),
                "form populated"
            );
            reports.push(report);
        }
        tracing::debug!(forms = reports.len(), "configuration applied");
        Ok(reports)
    }
}
