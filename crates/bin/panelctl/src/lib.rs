//! # panelctl
//!
//! Composition root for running the panel page logic from a terminal.
//!
//! ## Responsibilities
//! - Load configuration (file, environment, command line)
//! - Construct the reqwest and virtual-page adapters
//! - Inject them into the application services, one subcommand each
//!
//! ## Dependency rule
//! The only crate that depends on every other crate. No page logic lives here.

pub mod commands;
pub mod config;
