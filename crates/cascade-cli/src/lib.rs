//! Library half of the `cascade` binary.
//!
//! The binary replays a page build captured as JSON (module graph, page
//! list and the server and client output bundles) through the CSS passes
//! and reports which stylesheets each page links.

pub mod build;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
