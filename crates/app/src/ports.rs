//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the service layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod http;
pub mod page;
pub mod submit;
pub mod time;

pub use http::{HttpClient, HttpResponse, Method};
pub use page::{FormHost, PageView};
pub use submit::SubmitTransport;
pub use time::{Clock, Timer};
