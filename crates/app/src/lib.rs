//! # panelweb-app
//!
//! Application layer: services and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HttpClient`: one request against the device
//!   - `Clock` and `Timer`: cache-busting timestamps and delays
//!   - `PageView`: image sources and container markup of the page
//!   - `FormHost`: the forms of the page
//!   - `SubmitTransport`: where a flattened submission goes
//! - Define **driving/inbound ports** as services:
//!   - `LiveViewService`: probe the screenshot, retry, swap the image
//!   - `ConfigBinder`: fetch a configuration object and populate forms
//!   - `SubmitService`: flatten a form and hand it to a transport
//!   - `AboutService` and `InfoService`: inject the about panel and info table
//! - Provide **in-process infrastructure** (`LoggingTransport`) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `panelweb-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.
//!
//! Port futures are not `Send`: the same services run on the browser event
//! loop and on a single-threaded tokio runtime.

pub mod ports;
pub mod services;

#[cfg(test)]
mod fakes;
