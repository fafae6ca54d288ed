//! # panelweb-adapter-http-reqwest
//!
//! Host-side HTTP adapter built on `reqwest`.
//!
//! ## Responsibilities
//! - Implement the `HttpClient` port against a device base address
//! - Implement the `SubmitTransport` port by POSTing submissions as JSON
//! - Download binary resources (the screenshot bitmap)
//!
//! ## Dependency rule
//! Depends on `panelweb-app` (for port traits) and `panelweb-domain` (for types).
//! The app layer never sees `reqwest` types.

mod client;
mod error;
mod submit;

pub use client::ReqwestHttpClient;
pub use error::HttpError;
pub use submit::ReqwestSubmitTransport;
