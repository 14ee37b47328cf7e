//! # cascade-graph
//!
//! Pure data structures for the module graph and output bundle that the CSS
//! layer of a page build operates on.
//!
//! The bundler that produces these graphs is an external collaborator. This
//! crate only models what the CSS layer needs from it:
//!
//! - **Module info**: importer edges, ordered import lists and the
//!   "top-level page" flag, reachable through [`ModuleInfoLookup`]
//! - **Output bundle**: the chunks and assets emitted by one build pass
//! - **Importer walks**: [`walk_parent_infos`] and [`get_top_level_pages`],
//!   cycle-safe upward traversals annotated with depth and order
//!
//! ## Quick Start
//!
//! ```rust
//! use cascade_graph::{ModuleGraph, get_top_level_pages};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = ModuleGraph::new();
//! graph.add_import("/src/pages/index.astro", "/src/styles/global.css")?;
//! graph.mark_page("/src/pages/index.astro")?;
//!
//! let pages: Vec<_> = get_top_level_pages("/src/styles/global.css", &graph)
//!     .map(|step| step.info.id.clone())
//!     .collect();
//! assert_eq!(pages.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! No I/O happens here. Everything is serde-serializable so that graphs and
//! bundles can be captured to JSON and replayed.

pub mod css_request;
pub mod graph;
pub mod module;
pub mod module_id;
pub mod output;
pub mod walk;

pub use css_request::is_css_request;
pub use graph::{ModuleGraph, ModuleInfoLookup};
pub use module::{ModuleInfo, ModuleInfoBuilder};
pub use module_id::ModuleId;
pub use output::{AssetSource, Output, OutputAsset, OutputBundle, OutputChunk};
pub use walk::{
    PAGE_VIRTUAL_MODULE_PREFIX, ParentWalk, WalkStep, get_top_level_pages,
    module_is_top_level_page, walk_parent_infos,
};

/// Error types for graph construction.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A module id was empty.
    #[error("module id cannot be empty")]
    EmptyModuleId,

    /// An operation referenced a module the graph does not contain.
    #[error("unknown module: {0}")]
    UnknownModule(String),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests;
