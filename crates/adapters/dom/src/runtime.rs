//! HTTP, clock, timer and submit transport on browser APIs.

use std::time::Duration;

use gloo_net::http::Request;
use panelweb_app::ports::{Clock, HttpClient, HttpResponse, Method, SubmitTransport, Timer};
use panelweb_domain::error::PanelError;
use panelweb_domain::submission::Submission;
use panelweb_domain::time::Millis;
use wasm_bindgen::JsValue;

use crate::error::DomError;

/// `fetch` through `gloo-net`; URIs resolve against the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooHttp;

impl GlooHttp {
    async fn execute(method: Method, uri: &str) -> Result<HttpResponse, DomError> {
        let request = match method {
            Method::Get => Request::get(uri),
            Method::Post => Request::post(uri),
            Method::Put => Request::put(uri),
            Method::Delete => Request::delete(uri),
        };
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for GlooHttp {
    async fn send(&self, method: Method, uri: &str) -> Result<HttpResponse, PanelError> {
        Self::execute(method, uri).await.map_err(DomError::into_domain)
    }
}

/// `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl Clock for JsClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_millis(&self) -> Millis {
        js_sys::Date::now() as Millis
    }
}

/// `setTimeout` through `gloo-timers`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

/// Logs submissions to the browser console as `{ value: {...} }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTransport;

impl SubmitTransport for ConsoleTransport {
    async fn submit(&self, submission: &Submission) -> Result<(), PanelError> {
        let line = serde_json::json!({ "value": submission.to_json() }).to_string();
        web_sys::console::log_1(&JsValue::from_str(&line));
        Ok(())
    }
}

/// Report a failed operation on the console.
pub fn log_error(operation: &str, err: &PanelError) {
    let mut message = format!("{operation}: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    web_sys::console::error_1(&JsValue::from_str(&message));
}
