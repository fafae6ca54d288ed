//! Live view: the screenshot liveness probe and its retry state machine.
//!
//! A probe is a `GET /screenshot?d=<ts>&a=<action>`. A 2xx answer means a
//! fresh screenshot is ready and the `bmp` image is pointed at
//! `?a=<action>&q=<ts>`. Any other outcome is retried after
//! [`RetryPolicy::delay`], at most [`RetryPolicy::max_retries`] times.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::Millis;

/// Path of the device's screenshot endpoint.
pub const SCREENSHOT_PATH: &str = "/screenshot";

/// Id of the image element showing the screenshot.
pub const IMAGE_ELEMENT_ID: &str = "bmp";

/// Navigation command sent with a probe; the device applies it before
/// taking the screenshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PageAction {
    /// Refresh the current page. Sent as an empty parameter.
    #[default]
    Refresh,
    Prev,
    Next,
    Back,
}

impl PageAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Refresh => "",
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Back => "back",
        }
    }
}

impl fmt::Display for PageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "refresh" => Ok(Self::Refresh),
            "prev" => Ok(Self::Prev),
            "next" => Ok(Self::Next),
            "back" => Ok(Self::Back),
            other => Err(ValidationError::UnknownPageAction(other.to_string())),
        }
    }
}

impl TryFrom<String> for PageAction {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PageAction> for String {
    fn from(action: PageAction) -> Self {
        action.as_str().to_string()
    }
}

/// How a failed probe is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_retries: u32,
}

impl RetryPolicy {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    #[must_use]
    pub fn new(delay: Duration, max_retries: u32) -> Self {
        Self { delay, max_retries }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY, 1)
    }
}

/// Delays after which the live image re-arms itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRefresh {
    pub after_load: Duration,
    pub after_error: Duration,
}

impl AutoRefresh {
    /// The delay before the next refresh, given whether the image loaded.
    #[must_use]
    pub fn next_delay(&self, loaded: bool) -> Duration {
        if loaded {
            self.after_load
        } else {
            self.after_error
        }
    }
}

impl Default for AutoRefresh {
    fn default() -> Self {
        Self {
            after_load: Duration::from_secs(5),
            after_error: Duration::from_secs(15),
        }
    }
}

/// Where the poller stands between probes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LiveViewState {
    #[default]
    Idle,
    /// `attempt` retries have been scheduled since the last success or give-up.
    Retrying { attempt: u32 },
}

/// What to do after a probe completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStep {
    UpdateImage,
    Retry { after: Duration },
    GiveUp,
}

impl LiveViewState {
    /// Advance on a probe outcome.
    #[must_use]
    pub fn after_probe(self, ok: bool, policy: &RetryPolicy) -> (Self, ProbeStep) {
        if ok {
            return (Self::Idle, ProbeStep::UpdateImage);
        }
        let attempt = match self {
            Self::Idle => 0,
            Self::Retrying { attempt } => attempt,
        };
        if attempt < policy.max_retries {
            (
                Self::Retrying {
                    attempt: attempt + 1,
                },
                ProbeStep::Retry {
                    after: policy.delay,
                },
            )
        } else {
            (Self::Idle, ProbeStep::GiveUp)
        }
    }
}

/// Issues strictly increasing cache-busting timestamps, whatever the clock does.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheBuster {
    last: Option<Millis>,
}

impl CacheBuster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The next timestamp: `now`, or one past the previous one if the clock
    /// stalled or stepped back.
    pub fn issue(&mut self, now: Millis) -> Millis {
        let ts = match self.last {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last = Some(ts);
        ts
    }

    #[must_use]
    pub fn last(&self) -> Option<Millis> {
        self.last
    }
}

/// URI of the liveness probe.
#[must_use]
pub fn probe_uri(ts: Millis, action: PageAction) -> String {
    format!("{SCREENSHOT_PATH}?d={ts}&a={action}")
}

/// Source the live image is pointed at, relative to the current document.
#[must_use]
pub fn image_src(action: PageAction, ts: Millis) -> String {
    format!("?a={action}&q={ts}")
}
