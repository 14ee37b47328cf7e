//! Attribution of CSS chunks to the pages that depend on them.
//!
//! Runs once per bundler pass over the emitted [`OutputBundle`]. For every
//! chunk that pulled in CSS, each source module in the chunk is walked up
//! the importer graph; every top-level page reached records the chunk's
//! stylesheets with the walk's depth and order.
//!
//! The server pass also remembers which modules produced CSS, and under
//! which asset names. The client pass drops every stylesheet the server
//! already emitted. Pages rendering a client-only island that needs such a
//! stylesheet link the server's copy instead, as an unordered entry.

use cascade_graph::{
    ModuleId, ModuleInfoLookup, OutputBundle, OutputChunk, module_is_top_level_page,
    walk_parent_infos,
};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::dedup::CssDedupSet;
use crate::error::{CssError, Result};
use crate::internals::BuildInternals;
use crate::page::CssAttribution;

/// Which bundler pass produced the bundle being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTarget {
    Server,
    Client,
}

impl std::fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildTarget::Server => write!(f, "server"),
            BuildTarget::Client => write!(f, "client"),
        }
    }
}

/// Cross-pass state threaded through [`CssAttributor::attribute_chunk`].
#[derive(Debug)]
pub enum PassState<'d> {
    /// Collects the modules whose CSS the server emitted.
    Server(&'d mut CssDedupSet),
    /// Reads what the server pass collected.
    Client(&'d CssDedupSet),
}

impl PassState<'_> {
    pub fn target(&self) -> BuildTarget {
        match self {
            PassState::Server(_) => BuildTarget::Server,
            PassState::Client(_) => BuildTarget::Client,
        }
    }
}

/// What happened to one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// The chunk has no CSS.
    Skipped,
    /// The chunk's CSS was attributed to pages.
    Attributed,
    /// Client pass only: the server already emitted all of this CSS. The
    /// caller should drop the chunk's stylesheets from the bundle. Client-only
    /// owner pages have been pointed at the server assets.
    Duplicate,
}

/// Result of a client pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPassReport {
    /// CSS asset file names removed from the client bundle.
    pub removed_assets: Vec<String>,
    pub attributed_chunks: usize,
}

/// Attributes chunks of one pass against a module lookup and page registry.
pub struct CssAttributor<'a, L: ModuleInfoLookup + ?Sized> {
    lookup: &'a L,
    internals: &'a mut BuildInternals,
}

impl<'a, L: ModuleInfoLookup + ?Sized> CssAttributor<'a, L> {
    pub fn new(lookup: &'a L, internals: &'a mut BuildInternals) -> Self {
        Self { lookup, internals }
    }

    pub fn attribute_chunk(&mut self, chunk: &OutputChunk, state: &mut PassState<'_>) -> ChunkOutcome {
        if chunk.imported_css.is_empty() {
            return ChunkOutcome::Skipped;
        }

        let client_only_pages = match state {
            PassState::Server(dedup) => {
                for id in &chunk.modules {
                    dedup.insert(id.clone(), chunk.imported_css.iter().cloned());
                }
                IndexSet::new()
            }
            PassState::Client(dedup) => {
                let dedup: &CssDedupSet = dedup;
                let owners = self.client_only_owners(chunk);
                if dedup.contains_all(&chunk.modules) {
                    let server_assets: IndexSet<String> = chunk
                        .modules
                        .iter()
                        .flat_map(|id| dedup.server_assets(id.as_str()))
                        .map(str::to_string)
                        .collect();
                    self.force_unordered(&owners, &server_assets);
                    tracing::debug!(
                        chunk = %chunk.file_name,
                        client_only = owners.len(),
                        "CSS already emitted by server pass"
                    );
                    return ChunkOutcome::Duplicate;
                }
                owners
            }
        };

        self.force_unordered(&client_only_pages, &chunk.imported_css);

        let target = state.target();
        for id in &chunk.modules {
            self.attribute_module(id, chunk, target);
        }

        tracing::debug!(
            chunk = %chunk.file_name,
            %target,
            css = chunk.imported_css.len(),
            client_only = client_only_pages.len(),
            "attributed CSS chunk"
        );
        ChunkOutcome::Attributed
    }

    fn attribute_module(&mut self, id: &ModuleId, chunk: &OutputChunk, target: BuildTarget) {
        for step in walk_parent_infos(id.as_str(), self.lookup) {
            let ancestor = step.info.id.as_str();
            if module_is_top_level_page(step.info) {
                let attribution =
                    CssAttribution::from_walk(step.import_site_depth(), step.order);
                self.internals
                    .append_css_to_page(ancestor, &chunk.imported_css, attribution);
            } else if target == BuildTarget::Client && self.internals.is_hoisted_script(ancestor) {
                let order = CssAttribution::from_walk(0, step.order).order;
                let pages: Vec<ModuleId> = self
                    .internals
                    .pages_by_hoisted_script_id(ancestor)
                    .map(|page| page.module_id.clone())
                    .collect();
                for page_id in pages {
                    self.internals.append_css_to_page(
                        page_id.as_str(),
                        &chunk.imported_css,
                        CssAttribution::new(-1, order),
                    );
                }
            }
        }
    }

    fn force_unordered(&mut self, pages: &IndexSet<ModuleId>, assets: &IndexSet<String>) {
        for page_id in pages {
            if let Some(page) = self.internals.page_by_module_id_mut(page_id.as_str()) {
                for asset in assets {
                    page.force_unordered_css(asset);
                }
            }
        }
    }

    /// Pages rendering a client-only island that (transitively) imports
    /// one of the chunk's modules.
    fn client_only_owners(&self, chunk: &OutputChunk) -> IndexSet<ModuleId> {
        let mut owners = IndexSet::new();
        for id in &chunk.modules {
            for step in walk_parent_infos(id.as_str(), self.lookup) {
                for page in self.internals.pages_by_client_only_id(step.info.id.as_str()) {
                    owners.insert(page.module_id.clone());
                }
            }
        }
        owners
    }
}

/// Attribute every CSS chunk of the server bundle and collect the modules
/// whose CSS it emitted.
pub fn attribute_server_pass<L>(
    bundle: &OutputBundle,
    lookup: &L,
    internals: &mut BuildInternals,
) -> Result<CssDedupSet>
where
    L: ModuleInfoLookup + ?Sized,
{
    let mut dedup = CssDedupSet::new();
    let mut attributor = CssAttributor::new(lookup, internals);
    let mut attributed = 0;
    {
        let mut state = PassState::Server(&mut dedup);
        for chunk in bundle.chunks() {
            if attributor.attribute_chunk(chunk, &mut state) == ChunkOutcome::Attributed {
                attributed += 1;
            }
        }
    }

    tracing::info!(
        chunks = attributed,
        modules = dedup.len(),
        "server CSS attribution complete"
    );
    Ok(dedup)
}

/// Attribute every CSS chunk of the client bundle, removing stylesheets
/// the server pass already emitted.
///
/// # Errors
///
/// [`CssError::ManifestInconsistency`] if a duplicate chunk lists a
/// stylesheet the bundle does not contain.
pub fn attribute_client_pass<L>(
    bundle: &mut OutputBundle,
    lookup: &L,
    internals: &mut BuildInternals,
    dedup: &CssDedupSet,
) -> Result<ClientPassReport>
where
    L: ModuleInfoLookup + ?Sized,
{
    let mut report = ClientPassReport::default();
    let mut attributor = CssAttributor::new(lookup, internals);
    let mut state = PassState::Client(dedup);

    let chunk_names: Vec<String> = bundle.chunks().map(|c| c.file_name.clone()).collect();
    for name in chunk_names {
        let Some(chunk) = bundle.get(&name).and_then(|o| o.as_chunk()) else {
            continue;
        };

        match attributor.attribute_chunk(chunk, &mut state) {
            ChunkOutcome::Skipped => {}
            ChunkOutcome::Attributed => report.attributed_chunks += 1,
            ChunkOutcome::Duplicate => {
                let assets: Vec<String> = chunk.imported_css.iter().cloned().collect();
                remove_duplicate_css(bundle, &name, assets, &mut report.removed_assets)?;
            }
        }
    }

    tracing::info!(
        chunks = report.attributed_chunks,
        removed = report.removed_assets.len(),
        "client CSS attribution complete"
    );
    Ok(report)
}

fn remove_duplicate_css(
    bundle: &mut OutputBundle,
    chunk_name: &str,
    assets: Vec<String>,
    removed: &mut Vec<String>,
) -> Result<()> {
    for asset in assets {
        if bundle.remove(&asset).is_some() {
            removed.push(asset);
        } else if !removed.contains(&asset) {
            return Err(CssError::ManifestInconsistency {
                chunk: chunk_name.to_string(),
                asset,
            });
        }
    }

    if let Some(chunk) = bundle.get_mut(chunk_name).and_then(|o| o.as_chunk_mut()) {
        chunk.imported_css.clear();
    }
    Ok(())
}
