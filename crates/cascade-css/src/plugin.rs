//! The CSS build plugin, as driven by a bundler's output hooks.

use cascade_config::{CascadeConfig, CssBuildConfig, validate_schema};
use cascade_graph::{ModuleInfoLookup, OutputBundle};

use crate::attribution::{BuildTarget, attribute_client_pass, attribute_server_pass};
use crate::dedup::CssDedupSet;
use crate::error::Result;
use crate::internals::BuildInternals;
use crate::minify::minify_css_assets;
use crate::naming::{ChunkNamer, ManualChunks};
use crate::pure_css::restore_pure_css_chunks;
use crate::single_css::attribute_single_css;

/// What one `generate_bundle` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub target: BuildTarget,
    /// Client pass only: duplicate stylesheets dropped from the bundle.
    pub removed_assets: Vec<String>,
    /// The single stylesheet linked to every page, when code splitting is off.
    pub single_css: Option<String>,
    /// Server pass only: number of stylesheets reprinted.
    pub minified_assets: usize,
    /// Server pass only: stub chunks put back into the bundle.
    pub restored_chunks: Vec<String>,
}

impl PassReport {
    fn new(target: BuildTarget) -> Self {
        Self {
            target,
            removed_assets: Vec::new(),
            single_css: None,
            minified_assets: 0,
            restored_chunks: Vec::new(),
        }
    }
}

/// CSS handling for both bundler passes of a page build.
///
/// # Example
///
/// ```
/// use cascade_css::{BuildInternals, BuildTarget, CssBuildPlugin, CssDedupSet, PageBuildData};
/// use cascade_config::CascadeConfig;
/// use cascade_graph::{ModuleGraph, Output, OutputAsset, OutputBundle, OutputChunk};
///
/// let mut graph = ModuleGraph::new();
/// graph.add_import("/src/pages/index.astro", "/src/styles/a.css").unwrap();
/// graph.mark_page("/src/pages/index.astro").unwrap();
///
/// let mut internals = BuildInternals::new();
/// internals.add_page(PageBuildData::new("/src/pages/index.astro", "src/pages/index.astro"));
///
/// let mut bundle: OutputBundle = [
///     Output::from(
///         OutputChunk::new("entry.mjs")
///             .with_modules(["/src/styles/a.css"])
///             .with_imported_css(["assets/a.css"]),
///     ),
///     Output::from(OutputAsset::new("assets/a.css", "a { color: red }").with_name("a.css")),
/// ]
/// .into_iter()
/// .collect();
///
/// let plugin = CssBuildPlugin::from_config(&CascadeConfig::default()).unwrap();
/// let mut dedup = CssDedupSet::new();
/// plugin
///     .generate_bundle(BuildTarget::Server, &mut bundle, &graph, &mut internals, &mut dedup)
///     .unwrap();
///
/// let links = internals.page_css("/src/pages/index.astro", plugin.config().unordered_placement);
/// assert_eq!(links[0].href, "assets/a.css");
/// ```
#[derive(Debug)]
pub struct CssBuildPlugin {
    config: CssBuildConfig,
    namer: ChunkNamer,
}

impl CssBuildPlugin {
    pub fn new(config: CssBuildConfig) -> Self {
        let namer = ChunkNamer::from_config(&config);
        Self { config, namer }
    }

    /// Validate `config` and build a plugin from its CSS section.
    pub fn from_config(config: &CascadeConfig) -> Result<Self> {
        validate_schema(config)?;
        Ok(Self::new(config.css.clone()))
    }

    /// Replace the manual chunk assignments, e.g. with a function.
    pub fn with_manual_chunks(mut self, manual: ManualChunks) -> Self {
        self.namer = ChunkNamer::new(manual);
        self
    }

    pub fn config(&self) -> &CssBuildConfig {
        &self.config
    }

    /// The bundler's `manualChunks` hook.
    pub fn manual_chunks(&self, id: &str, lookup: &dyn ModuleInfoLookup) -> Option<String> {
        self.namer.chunk_name(id, lookup)
    }

    /// The bundler's `generateBundle` hook.
    ///
    /// The server pass adds to `dedup`; the client pass reads it. Hooks run
    /// in order: page attribution, single stylesheet, then (server only)
    /// minification and pure-CSS chunk restoration.
    pub fn generate_bundle<L>(
        &self,
        target: BuildTarget,
        bundle: &mut OutputBundle,
        lookup: &L,
        internals: &mut BuildInternals,
        dedup: &mut CssDedupSet,
    ) -> Result<PassReport>
    where
        L: ModuleInfoLookup + ?Sized,
    {
        let mut report = PassReport::new(target);

        match target {
            BuildTarget::Server => {
                let claimed = attribute_server_pass(bundle, lookup, internals)?;
                dedup.extend(claimed);
            }
            BuildTarget::Client => {
                let client = attribute_client_pass(bundle, lookup, internals, dedup)?;
                report.removed_assets = client.removed_assets;
            }
        }

        report.single_css = attribute_single_css(bundle, internals, self.config.code_split);

        if target == BuildTarget::Server {
            report.minified_assets = minify_css_assets(bundle, self.config.minify)?;
            report.restored_chunks = restore_pure_css_chunks(bundle);
        }

        Ok(report)
    }
}
