//! Time ports: wall clock and delays.

use std::future::Future;
use std::time::Duration;

use panelweb_domain::time::Millis;

/// Source of cache-busting timestamps.
pub trait Clock {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> Millis;
}

/// Suspends the calling task without blocking the event loop.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
