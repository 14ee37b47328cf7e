//! # cascade-css
//!
//! CSS bundling and page association for page-oriented builds.
//!
//! A site build runs the bundler twice: once for server rendering and once
//! for the browser. Both passes emit CSS. This crate decides:
//!
//! - which pages each emitted stylesheet belongs to, and where it sits in
//!   the page's cascade ([`attribute_server_pass`], [`attribute_client_pass`])
//! - what shared CSS chunks are called ([`ChunkNamer`], [`name_for_parent_pages`])
//! - which client stylesheets duplicate server output and can be dropped
//!   ([`CssDedupSet`])
//!
//! Pages are registered up front in a [`BuildInternals`], the build-scoped
//! registry that the passes write into. [`CssBuildPlugin`] wires everything
//! to a bundler's `manualChunks` and `generateBundle` hooks.
//!
//! ## Logging
//!
//! The crate emits `tracing` events and never installs a subscriber; the
//! embedding application chooses the output.

pub mod attribution;
pub mod dedup;
pub mod error;
pub mod head;
pub mod internals;
pub mod links;
pub mod minify;
pub mod naming;
pub mod page;
pub mod plugin;
pub mod pure_css;
pub mod single_css;

pub use attribution::{
    BuildTarget, ChunkOutcome, ClientPassReport, CssAttributor, PassState, attribute_client_pass,
    attribute_server_pass,
};
pub use dedup::CssDedupSet;
pub use error::{CssError, Result};
pub use head::{prefix_base, render_head};
pub use internals::BuildInternals;
pub use links::{PageCssLink, sorted_css};
pub use minify::minify_css_assets;
pub use naming::{ChunkNamer, ManualChunks, name_for_parent_pages};
pub use page::{CssAttribution, HoistedScript, PageBuildData};
pub use plugin::{CssBuildPlugin, PassReport};
pub use pure_css::restore_pure_css_chunks;
pub use single_css::{SINGLE_CSS_ASSET_NAME, attribute_single_css};

#[cfg(test)]
mod tests;
