//! In-memory port implementations shared by the service tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use panelweb_domain::error::PanelError;
use panelweb_domain::submission::Submission;
use panelweb_domain::time::Millis;

use crate::ports::{Clock, HttpClient, HttpResponse, Method, PageView, SubmitTransport, Timer};

#[derive(Debug)]
struct Unreachable;

impl std::fmt::Display for Unreachable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("connection refused")
    }
}

impl std::error::Error for Unreachable {}

/// Answers requests from a script, in order; an exhausted script refuses
/// the connection.
#[derive(Default)]
pub struct ScriptedHttp {
    replies: Mutex<VecDeque<Option<HttpResponse>>>,
    pub requests: Mutex<Vec<(Method, String)>>,
}

impl ScriptedHttp {
    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Some(HttpResponse::new(status, body)));
        self
    }

    pub fn refuse(self) -> Self {
        self.replies.lock().unwrap().push_back(None);
        self
    }

    pub fn uris(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, uri)| uri.clone())
            .collect()
    }
}

impl HttpClient for ScriptedHttp {
    async fn send(&self, method: Method, uri: &str) -> Result<HttpResponse, PanelError> {
        self.requests
            .lock()
            .unwrap()
            .push((method, uri.to_string()));
        let reply = self.replies.lock().unwrap().pop_front().flatten();
        reply.ok_or_else(|| PanelError::Transport(Box::new(Unreachable)))
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<Millis>,
}

impl ManualClock {
    pub fn at(now: Millis) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: Millis) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> Millis {
        *self.now.lock().unwrap()
    }
}

/// Returns immediately and remembers every requested delay.
#[derive(Default)]
pub struct RecordingTimer {
    pub sleeps: Mutex<Vec<Duration>>,
}

impl Timer for RecordingTimer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Yields to the scheduler instead of waiting, so concurrent tasks interleave.
pub struct YieldingTimer;

impl Timer for YieldingTimer {
    async fn sleep(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageWrite {
    ImageSrc { element: String, src: String },
    InnerHtml { container: String, html: String },
}

/// Records every write in order.
#[derive(Default)]
pub struct RecordingPage {
    pub writes: Mutex<Vec<PageWrite>>,
}

impl RecordingPage {
    pub fn image_sources(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter_map(|w| match w {
                PageWrite::ImageSrc { src, .. } => Some(src.clone()),
                PageWrite::InnerHtml { .. } => None,
            })
            .collect()
    }

    pub fn html_of(&self, container: &str) -> Option<String> {
        self.writes.lock().unwrap().iter().rev().find_map(|w| match w {
            PageWrite::InnerHtml { container: c, html } if c == container => Some(html.clone()),
            _ => None,
        })
    }
}

impl PageView for RecordingPage {
    fn set_image_src(&self, element_id: &str, src: &str) -> Result<(), PanelError> {
        self.writes.lock().unwrap().push(PageWrite::ImageSrc {
            element: element_id.to_string(),
            src: src.to_string(),
        });
        Ok(())
    }

    fn set_inner_html(&self, container: &str, html: &str) -> Result<(), PanelError> {
        self.writes.lock().unwrap().push(PageWrite::InnerHtml {
            container: container.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

/// Keeps every submission it receives.
#[derive(Default)]
pub struct CollectingTransport {
    pub received: Mutex<Vec<Submission>>,
}

impl SubmitTransport for CollectingTransport {
    async fn submit(&self, submission: &Submission) -> Result<(), PanelError> {
        self.received.lock().unwrap().push(submission.clone());
        Ok(())
    }
}
