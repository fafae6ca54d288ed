//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod config_binder;
pub mod live_view_service;
pub mod panel_service;
pub mod submit_service;

pub use config_binder::{ConfigBinder, FormScope};
pub use live_view_service::{LiveViewService, RefreshOutcome};
pub use panel_service::{AboutService, InfoService};
pub use submit_service::{LoggingTransport, SubmitService};
