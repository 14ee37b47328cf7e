//! Captured build descriptions and their replay.

use std::fs;
use std::path::Path;

use anyhow::Context;
use cascade_css::{
    BuildInternals, BuildTarget, CssBuildPlugin, CssDedupSet, PageBuildData, PassReport,
};
use cascade_graph::{ModuleGraph, ModuleInfoLookup, OutputBundle};
use serde::Deserialize;

use crate::error::CliError;

/// A page build captured as JSON.
///
/// ```json
/// {
///   "modules": [{ "id": "/src/pages/index.astro", "imported_ids": ["/src/a.css"], "is_page": true }],
///   "pages": [{ "module_id": "/src/pages/index.astro", "component": "src/pages/index.astro" }],
///   "server": {},
///   "client": {}
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct BuildDescription {
    pub modules: ModuleGraph,
    pub pages: Vec<PageEntry>,
    #[serde(default)]
    pub server: OutputBundle,
    #[serde(default)]
    pub client: OutputBundle,
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    #[serde(flatten)]
    pub page: PageBuildData,
    /// Module id of the page's hoisted script, if it has one.
    #[serde(default)]
    pub hoisted_script_id: Option<String>,
    /// Components the page renders client-only.
    #[serde(default)]
    pub client_only: Vec<String>,
}

impl BuildDescription {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.to_path_buf()).into());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid build description in {}", path.display()))
    }

    /// Register every page, with its hoisted script and client-only islands.
    pub fn internals(&self) -> anyhow::Result<BuildInternals> {
        let mut internals = BuildInternals::new();
        for entry in &self.pages {
            let page_id = entry.page.module_id.clone();
            if self.modules.module_info(page_id.as_str()).is_none() {
                return Err(CliError::UnknownPage {
                    page: page_id.to_string(),
                }
                .into());
            }
            if let Some(script) = &entry.hoisted_script_id {
                internals.register_hoisted_script(script.as_str(), page_id.clone());
            }
            for component in &entry.client_only {
                internals.register_client_only(component.as_str(), page_id.clone());
            }
            internals.add_page(entry.page.clone());
        }
        Ok(internals)
    }
}

/// State after both passes ran.
#[derive(Debug)]
pub struct ReplayedBuild {
    pub internals: BuildInternals,
    pub server: OutputBundle,
    pub client: OutputBundle,
    pub reports: [PassReport; 2],
}

/// Run the server pass, then the client pass, the way a build driver does.
pub fn replay(description: BuildDescription, plugin: &CssBuildPlugin) -> anyhow::Result<ReplayedBuild> {
    let mut internals = description.internals()?;
    let BuildDescription {
        modules,
        mut server,
        mut client,
        ..
    } = description;

    let mut dedup = CssDedupSet::new();
    let server_report = plugin
        .generate_bundle(BuildTarget::Server, &mut server, &modules, &mut internals, &mut dedup)
        .context("server CSS pass failed")?;
    let client_report = plugin
        .generate_bundle(BuildTarget::Client, &mut client, &modules, &mut internals, &mut dedup)
        .context("client CSS pass failed")?;

    tracing::info!(
        pages = internals.page_count(),
        removed = client_report.removed_assets.len(),
        restored = server_report.restored_chunks.len(),
        "replayed build"
    );

    Ok(ReplayedBuild {
        internals,
        server,
        client,
        reports: [server_report, client_report],
    })
}
