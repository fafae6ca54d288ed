//! Live view service: keep the screenshot image in step with the device.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use panelweb_domain::error::PanelError;
use panelweb_domain::live_view::{
    AutoRefresh, CacheBuster, IMAGE_ELEMENT_ID, LiveViewState, PageAction, ProbeStep,
    RetryPolicy, image_src, probe_uri,
};
use panelweb_domain::time::Millis;

use crate::ports::{Clock, HttpClient, Method, PageView, Timer};

/// How a refresh ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The image now points at a fresh screenshot, busted with `ts`.
    Updated { ts: Millis },
    /// Every probe failed; the image was left alone.
    GaveUp,
}

/// Probes the device screenshot and points the `bmp` image at it.
///
/// Refreshes may overlap; each runs its own retry state and only the
/// cache-busting timestamps are shared.
pub struct LiveViewService<H, C, T, P> {
    http: H,
    clock: C,
    timer: T,
    page: P,
    policy: RetryPolicy,
    auto_refresh: AutoRefresh,
    buster: Mutex<CacheBuster>,
}

impl<H, C, T, P> LiveViewService<H, C, T, P>
where
    H: HttpClient,
    C: Clock,
    T: Timer,
    P: PageView,
{
    /// Create a service with the default retry and auto-refresh timings.
    pub fn new(http: H, clock: C, timer: T, page: P) -> Self {
        Self {
            http,
            clock,
            timer,
            page,
            policy: RetryPolicy::default(),
            auto_refresh: AutoRefresh::default(),
            buster: Mutex::new(CacheBuster::new()),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_auto_refresh(mut self, auto_refresh: AutoRefresh) -> Self {
        self.auto_refresh = auto_refresh;
        self
    }

    /// Wait `delay`, then [`refresh`](Self::refresh).
    ///
    /// # Errors
    ///
    /// See [`refresh`](Self::refresh).
    #[tracing::instrument(skip(self))]
    pub async fn request_refresh(
        &self,
        delay: Duration,
        action: PageAction,
    ) -> Result<RefreshOutcome, PanelError> {
        self.timer.sleep(delay).await;
        self.refresh(action).await
    }

    /// Probe the screenshot endpoint and update the image once it answers 2xx.
    ///
    /// A failed probe (non-2xx or transport failure) is retried per the
    /// [`RetryPolicy`]. Retries carry [`PageAction::Refresh`] so a
    /// navigation command is never applied twice.
    ///
    /// # Errors
    ///
    /// Probe failures are absorbed. Only a failure to update the image
    /// element is returned.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self, action: PageAction) -> Result<RefreshOutcome, PanelError> {
        let mut action = action;
        let mut state = LiveViewState::Idle;
        loop {
            let ts = self.next_timestamp();
            let ok = match self.http.send(Method::Get, &probe_uri(ts, action)).await {
                Ok(response) if response.ok() => true,
                Ok(response) => {
                    tracing::debug!(status = response.status, "screenshot not ready");
                    false
                }
                Err(err) => {
                    tracing::debug!(error = %err, "screenshot probe failed");
                    false
                }
            };

            let (next, step) = state.after_probe(ok, &self.policy);
            state = next;

            match step {
                ProbeStep::UpdateImage => {
                    let ts = self.update_image(action)?;
                    return Ok(RefreshOutcome::Updated { ts });
                }
                ProbeStep::Retry { after } => {
                    tracing::warn!(?after, "screenshot probe failed, retrying");
                    self.timer.sleep(after).await;
                    action = PageAction::Refresh;
                }
                ProbeStep::GiveUp => {
                    tracing::warn!("screenshot probe failed, giving up");
                    return Ok(RefreshOutcome::GaveUp);
                }
            }
        }
    }

    /// Point the image at `?a=<action>&q=<ts>` with a fresh timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Page`] if the page rejects the update.
    pub fn update_image(&self, action: PageAction) -> Result<Millis, PanelError> {
        let ts = self.next_timestamp();
        let src = image_src(action, ts);
        self.page.set_image_src(IMAGE_ELEMENT_ID, &src)?;
        tracing::debug!(%src, "image updated");
        Ok(ts)
    }

    /// Re-arm after the image finished loading (`loaded`) or failed to load.
    ///
    /// # Errors
    ///
    /// See [`refresh`](Self::refresh).
    pub async fn rearm(&self, loaded: bool) -> Result<RefreshOutcome, PanelError> {
        let delay = self.auto_refresh.next_delay(loaded);
        self.request_refresh(delay, PageAction::Refresh).await
    }

    fn next_timestamp(&self) -> Millis {
        let now = self.clock.now_millis();
        self.lock().issue(now)
    }

    fn lock(&self) -> MutexGuard<'_, CacheBuster> {
        self.buster.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
