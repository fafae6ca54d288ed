//! # panelweb-adapter-virtual
//!
//! Host-side stand-ins for the browser: a page whose forms are described in
//! TOML and whose writes are recorded, a system clock and a tokio timer.
//!
//! | Port | Implementation | Behaviour |
//! |------|----------------|-----------|
//! | `FormHost` | [`VirtualPage`] | Forms loaded from a page description |
//! | `PageView` | [`VirtualPage`] | Records image sources and container markup |
//! | `Clock` | [`SystemClock`] | UTC wall clock |
//! | `Timer` | [`TokioTimer`] | `tokio::time::sleep` |
//!
//! ## Dependency rule
//!
//! Depends on `panelweb-app` (port traits) and `panelweb-domain` only.

mod error;
mod page;
mod time;

pub use error::VirtualError;
pub use page::VirtualPage;
pub use time::{SystemClock, TokioTimer};
