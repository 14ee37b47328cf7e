//! Content-derived names for shared CSS chunks.
//!
//! A stylesheet imported by several pages is grouped with every other
//! stylesheet imported by exactly the same pages. The group name is the
//! first page's file stem plus a short hash of all page ids, so it only
//! changes when the set of pages using the CSS changes.

use std::fmt;

use cascade_config::CssBuildConfig;
use cascade_graph::{ModuleInfoLookup, get_top_level_pages, is_css_request};
use indexmap::IndexMap;
use sha2::{Digest, Sha256};

const FALLBACK_NAME: &str = "index";

/// `<first page stem>.<hash8>` for the pages that transitively import `id`.
///
/// ```
/// use cascade_css::name_for_parent_pages;
/// use cascade_graph::ModuleGraph;
///
/// let mut graph = ModuleGraph::new();
/// graph.add_import("/src/pages/about.astro", "/src/styles/a.css").unwrap();
/// graph.mark_page("/src/pages/about.astro").unwrap();
///
/// let name = name_for_parent_pages("/src/styles/a.css", &graph);
/// assert!(name.starts_with("about."));
/// assert_eq!(name.len(), "about.".len() + 8);
/// ```
pub fn name_for_parent_pages<L>(id: &str, lookup: &L) -> String
where
    L: ModuleInfoLookup + ?Sized,
{
    let mut hasher = Sha256::new();
    let mut pages = get_top_level_pages(id, lookup).peekable();

    // Only the first page names the chunk, even when its stem is empty.
    let primary = pages
        .peek()
        .map(|step| step.info)
        .and_then(|info| info.id.file_stem())
        .filter(|stem| !stem.is_empty());
    for step in pages {
        hasher.update(step.info.id.as_str().as_bytes());
    }

    let hash = format!("{:x}", hasher.finalize());
    format!("{}.{}", primary.unwrap_or(FALLBACK_NAME), &hash[..8])
}

type ManualChunksFn = dyn Fn(&str, &dyn ModuleInfoLookup) -> Option<String> + Send + Sync;

/// User chunk assignments, consulted before page-derived names.
#[derive(Default)]
pub enum ManualChunks {
    #[default]
    None,
    /// Module id → chunk name.
    Map(IndexMap<String, String>),
    Function(Box<ManualChunksFn>),
}

impl ManualChunks {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&str, &dyn ModuleInfoLookup) -> Option<String> + Send + Sync + 'static,
    {
        ManualChunks::Function(Box::new(f))
    }

    fn resolve(&self, id: &str, lookup: &dyn ModuleInfoLookup) -> Option<String> {
        match self {
            ManualChunks::None => None,
            ManualChunks::Map(map) => map.get(id).cloned(),
            ManualChunks::Function(f) => f(id, lookup).filter(|name| !name.is_empty()),
        }
    }
}

impl fmt::Debug for ManualChunks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManualChunks::None => f.write_str("None"),
            ManualChunks::Map(map) => f.debug_tuple("Map").field(map).finish(),
            ManualChunks::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// The bundler's chunk-assignment hook.
#[derive(Debug, Default)]
pub struct ChunkNamer {
    manual: ManualChunks,
}

impl ChunkNamer {
    pub fn new(manual: ManualChunks) -> Self {
        Self { manual }
    }

    pub fn from_config(config: &CssBuildConfig) -> Self {
        if config.manual_chunks.is_empty() {
            Self::default()
        } else {
            Self::new(ManualChunks::Map(config.manual_chunks.clone()))
        }
    }

    /// Chunk name for `id`, or `None` to let the bundler decide.
    pub fn chunk_name(&self, id: &str, lookup: &dyn ModuleInfoLookup) -> Option<String> {
        if let Some(name) = self.manual.resolve(id, lookup) {
            return Some(name);
        }
        if is_css_request(id) {
            let name = name_for_parent_pages(id, lookup);
            tracing::trace!(id, name = %name, "derived CSS chunk name");
            return Some(name);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_graph::ModuleGraph;

    fn sha8(input: &str) -> String {
        let hash = format!("{:x}", Sha256::digest(input.as_bytes()));
        hash[..8].to_string()
    }

    #[test]
    fn single_page_uses_its_stem() {
        let mut graph = ModuleGraph::new();
        graph.add_import("/src/pages/blog/[slug].astro", "/src/styles/post.css").unwrap();
        graph.mark_page("/src/pages/blog/[slug].astro").unwrap();

        assert_eq!(
            name_for_parent_pages("/src/styles/post.css", &graph),
            format!("[slug].{}", sha8("/src/pages/blog/[slug].astro"))
        );
    }

    #[test]
    fn empty_first_stem_falls_back_to_index() {
        let mut graph = ModuleGraph::new();
        for page in ["/", "/src/pages/b.astro"] {
            graph.add_import(page, "/src/styles/common.css").unwrap();
            graph.mark_page(page).unwrap();
        }

        assert_eq!(
            name_for_parent_pages("/src/styles/common.css", &graph),
            format!("index.{}", sha8("//src/pages/b.astro"))
        );
    }

    #[test]
    fn no_pages_falls_back_to_index() {
        let mut graph = ModuleGraph::new();
        graph.add_import("/src/components/Orphan.jsx", "/src/styles/orphan.css").unwrap();

        assert_eq!(
            name_for_parent_pages("/src/styles/orphan.css", &graph),
            format!("index.{}", sha8(""))
        );
    }

    #[test]
    fn hash_covers_all_pages_in_walk_order() {
        let mut graph = ModuleGraph::new();
        graph.add_import("/src/pages/b.astro", "/src/styles/common.css").unwrap();
        graph.add_import("/src/pages/a.astro", "/src/styles/common.css").unwrap();
        graph.mark_page("/src/pages/a.astro").unwrap();
        graph.mark_page("/src/pages/b.astro").unwrap();

        assert_eq!(
            name_for_parent_pages("/src/styles/common.css", &graph),
            format!("a.{}", sha8("/src/pages/a.astro/src/pages/b.astro"))
        );
    }

    #[test]
    fn manual_map_takes_precedence() {
        let graph = ModuleGraph::new();
        let mut map = IndexMap::new();
        map.insert("/src/styles/vendor.css".to_string(), "vendor".to_string());
        let namer = ChunkNamer::new(ManualChunks::Map(map));

        assert_eq!(
            namer.chunk_name("/src/styles/vendor.css", &graph).as_deref(),
            Some("vendor")
        );
    }

    #[test]
    fn manual_function_falls_through_on_none_or_empty() {
        let mut graph = ModuleGraph::new();
        graph.add_import("/src/pages/index.astro", "/src/styles/a.css").unwrap();
        graph.mark_page("/src/pages/index.astro").unwrap();

        let namer = ChunkNamer::new(ManualChunks::function(|id, _| {
            if id.contains("lib") {
                Some("lib".to_string())
            } else if id.ends_with("a.css") {
                Some(String::new())
            } else {
                None
            }
        }));

        assert_eq!(namer.chunk_name("/node_modules/lib/x.js", &graph).as_deref(), Some("lib"));
        assert!(
            namer
                .chunk_name("/src/styles/a.css", &graph)
                .is_some_and(|name| name.starts_with("index."))
        );
    }

    #[test]
    fn non_css_modules_defer_to_bundler() {
        let graph = ModuleGraph::new();
        let namer = ChunkNamer::default();
        assert_eq!(namer.chunk_name("/src/components/Card.jsx", &graph), None);
    }
}
