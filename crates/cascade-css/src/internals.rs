//! Build-scoped page registry.
//!
//! One [`BuildInternals`] lives for the duration of a build. The driver
//! registers pages (and the hoisted scripts and client-only islands that
//! belong to them) before bundling, and the CSS passes fill in each page's
//! stylesheet records as the bundler emits output.

use cascade_config::UnorderedPlacement;
use cascade_graph::ModuleId;
use indexmap::{IndexMap, IndexSet};

use crate::links::{PageCssLink, sorted_css};
use crate::page::{CssAttribution, PageBuildData};

#[derive(Debug, Default)]
pub struct BuildInternals {
    pages: IndexMap<ModuleId, PageBuildData>,
    /// Page component path → page module id.
    components: IndexMap<String, ModuleId>,
    /// Hoisted script module id → owning pages.
    hoisted_scripts: IndexMap<ModuleId, IndexSet<ModuleId>>,
    /// Client-only component id → pages that render it.
    client_only: IndexMap<ModuleId, IndexSet<ModuleId>>,
}

impl BuildInternals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page. A page with the same module id is replaced.
    pub fn add_page(&mut self, page: PageBuildData) {
        self.components
            .insert(page.component.clone(), page.module_id.clone());
        if let Some(previous) = self.pages.insert(page.module_id.clone(), page) {
            tracing::warn!(page = %previous.module_id, "page registered twice, replacing");
        }
    }

    /// The page whose entry module is `id`. `None` for non-page modules.
    pub fn page_by_module_id(&self, id: &str) -> Option<&PageBuildData> {
        self.pages.get(id)
    }

    pub fn page_by_module_id_mut(&mut self, id: &str) -> Option<&mut PageBuildData> {
        self.pages.get_mut(id)
    }

    pub fn page_by_component(&self, component: &str) -> Option<&PageBuildData> {
        self.components
            .get(component)
            .and_then(|id| self.pages.get(id))
    }

    pub fn register_hoisted_script(
        &mut self,
        script_id: impl Into<ModuleId>,
        page_id: impl Into<ModuleId>,
    ) {
        self.hoisted_scripts
            .entry(script_id.into())
            .or_default()
            .insert(page_id.into());
    }

    pub fn is_hoisted_script(&self, id: &str) -> bool {
        self.hoisted_scripts.contains_key(id)
    }

    /// Pages that share the hoisted script `id`, in registration order.
    pub fn pages_by_hoisted_script_id<'a>(
        &'a self,
        id: &str,
    ) -> impl Iterator<Item = &'a PageBuildData> + 'a {
        Self::pages_in(&self.pages, self.hoisted_scripts.get(id))
    }

    pub fn register_client_only(
        &mut self,
        component_id: impl Into<ModuleId>,
        page_id: impl Into<ModuleId>,
    ) {
        self.client_only
            .entry(component_id.into())
            .or_default()
            .insert(page_id.into());
    }

    /// Pages that render `id` as a client-only island, in registration order.
    pub fn pages_by_client_only_id<'a>(
        &'a self,
        id: &str,
    ) -> impl Iterator<Item = &'a PageBuildData> + 'a {
        Self::pages_in(&self.pages, self.client_only.get(id))
    }

    pub fn pages(&self) -> impl Iterator<Item = &PageBuildData> {
        self.pages.values()
    }

    pub fn pages_mut(&mut self) -> impl Iterator<Item = &mut PageBuildData> {
        self.pages.values_mut()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Merge `attribution` for every asset in `assets` into page `page_id`.
    /// Returns `false` if no such page is registered.
    pub fn append_css_to_page<'s>(
        &mut self,
        page_id: &str,
        assets: impl IntoIterator<Item = &'s String>,
        attribution: CssAttribution,
    ) -> bool {
        let Some(page) = self.pages.get_mut(page_id) else {
            tracing::trace!(page = page_id, "no build record for page");
            return false;
        };
        for asset in assets {
            page.append_css(asset, attribution);
        }
        true
    }

    /// Sorted stylesheet links for a page, unordered entries placed per
    /// `placement`. Empty for unknown pages.
    pub fn page_css(&self, page_id: &str, placement: UnorderedPlacement) -> Vec<PageCssLink> {
        self.page_by_module_id(page_id)
            .map(|page| sorted_css(page, placement))
            .unwrap_or_default()
    }

    fn pages_in<'a>(
        pages: &'a IndexMap<ModuleId, PageBuildData>,
        ids: Option<&'a IndexSet<ModuleId>>,
    ) -> impl Iterator<Item = &'a PageBuildData> + 'a {
        ids.into_iter()
            .flatten()
            .filter_map(move |id| pages.get(id.as_str()))
    }
}
