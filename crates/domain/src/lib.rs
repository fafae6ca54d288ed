//! # panelweb-domain
//!
//! Pure domain model for the panelweb device configuration pages.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps, JSON value coercions
//! - Define **field paths** (`net[ssid]`, `dns[]`) mirroring configuration nesting
//! - Define **field kinds** (text, radio, checkbox, selects, date) and an
//!   in-memory form model
//! - **Populate** a form from a configuration object, and flatten a form back
//!   into a **submission**
//! - Render the **about panel** and the **diagnostic info table**
//! - Drive the **live view** retry state machine and cache-busting URLs
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;
pub mod value;

pub mod about;
pub mod date;
pub mod field;
pub mod form;
pub mod info;
pub mod live_view;
pub mod path;
pub mod populate;
pub mod submission;
