//! In-memory module graph.
//!
//! The CSS layer only ever reads the graph through [`ModuleInfoLookup`], the
//! same narrow view a bundler exposes through its `getModuleInfo` hook.
//! [`ModuleGraph`] is the concrete implementation used by tests and by the
//! CLI when a build is replayed from JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{GraphError, ModuleId, ModuleInfo, Result};

/// Read-only access to bundler module info.
pub trait ModuleInfoLookup {
    /// Look up a module by id. `None` for ids the bundler does not know.
    fn module_info(&self, id: &str) -> Option<&ModuleInfo>;
}

impl<T: ModuleInfoLookup + ?Sized> ModuleInfoLookup for &T {
    fn module_info(&self, id: &str) -> Option<&ModuleInfo> {
        (**self).module_info(id)
    }
}

/// Module graph keyed by module id, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ModuleInfo>", into = "Vec<ModuleInfo>")]
pub struct ModuleGraph {
    modules: IndexMap<ModuleId, ModuleInfo>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from module records that list their forward edges.
    ///
    /// Importer lists are derived from `imported_ids` and
    /// `dynamically_imported_ids`; any importers already present on the
    /// records are kept. Targets that have no record of their own get an
    /// empty placeholder.
    pub fn from_modules(modules: impl IntoIterator<Item = ModuleInfo>) -> Self {
        let mut graph = Self::new();
        let mut edges = Vec::new();

        for mut module in modules {
            if module.is_empty_id() {
                tracing::warn!("skipping module with empty id");
                continue;
            }
            let imports = std::mem::take(&mut module.imported_ids);
            let dynamic_imports = std::mem::take(&mut module.dynamically_imported_ids);
            edges.push((module.id.clone(), imports, dynamic_imports));
            graph.insert_or_merge(module);
        }

        for (from, imports, dynamic_imports) in edges {
            for to in imports {
                graph.link(&from, to, false);
            }
            for to in dynamic_imports {
                graph.link(&from, to, true);
            }
        }

        graph
    }

    /// Add a module record. Existing importer lists are preserved.
    pub fn add_module(&mut self, module: ModuleInfo) -> Result<()> {
        if module.is_empty_id() {
            return Err(GraphError::EmptyModuleId);
        }
        self.insert_or_merge(module);
        Ok(())
    }

    /// Add a static import edge `from → to`, creating either module if missing.
    pub fn add_import(&mut self, from: impl Into<ModuleId>, to: impl Into<ModuleId>) -> Result<()> {
        let (from, to) = (from.into(), to.into());
        if from.is_empty() || to.is_empty() {
            return Err(GraphError::EmptyModuleId);
        }
        self.ensure(&from);
        self.link(&from, to, false);
        Ok(())
    }

    /// Add a dynamic import edge `from → to`, creating either module if missing.
    pub fn add_dynamic_import(
        &mut self,
        from: impl Into<ModuleId>,
        to: impl Into<ModuleId>,
    ) -> Result<()> {
        let (from, to) = (from.into(), to.into());
        if from.is_empty() || to.is_empty() {
            return Err(GraphError::EmptyModuleId);
        }
        self.ensure(&from);
        self.link(&from, to, true);
        Ok(())
    }

    /// Flag a module as a top-level page.
    pub fn mark_page(&mut self, id: &str) -> Result<()> {
        let module = self
            .modules
            .get_mut(id)
            .ok_or_else(|| GraphError::UnknownModule(id.to_string()))?;
        module.is_page = true;
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleInfo> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn ensure(&mut self, id: &ModuleId) -> &mut ModuleInfo {
        self.modules
            .entry(id.clone())
            .or_insert_with(|| ModuleInfo::new(id.clone()))
    }

    fn insert_or_merge(&mut self, mut module: ModuleInfo) {
        match self.modules.get_mut(&module.id) {
            Some(existing) => {
                existing.is_entry |= module.is_entry;
                existing.is_page |= module.is_page;
                for id in module.imported_ids {
                    push_unique(&mut existing.imported_ids, id);
                }
                for id in module.dynamically_imported_ids {
                    push_unique(&mut existing.dynamically_imported_ids, id);
                }
                for id in module.importers {
                    insert_sorted(&mut existing.importers, id);
                }
                for id in module.dynamic_importers {
                    insert_sorted(&mut existing.dynamic_importers, id);
                }
            }
            None => {
                module.importers.sort();
                module.importers.dedup();
                module.dynamic_importers.sort();
                module.dynamic_importers.dedup();
                self.modules.insert(module.id.clone(), module);
            }
        }
    }

    fn link(&mut self, from: &ModuleId, to: ModuleId, dynamic: bool) {
        if let Some(importer) = self.modules.get_mut(from) {
            let list = if dynamic {
                &mut importer.dynamically_imported_ids
            } else {
                &mut importer.imported_ids
            };
            push_unique(list, to.clone());
        }

        let target = self.ensure(&to);
        let list = if dynamic {
            &mut target.dynamic_importers
        } else {
            &mut target.importers
        };
        insert_sorted(list, from.clone());
    }
}

impl ModuleInfoLookup for ModuleGraph {
    fn module_info(&self, id: &str) -> Option<&ModuleInfo> {
        self.modules.get(id)
    }
}

impl From<Vec<ModuleInfo>> for ModuleGraph {
    fn from(modules: Vec<ModuleInfo>) -> Self {
        Self::from_modules(modules)
    }
}

impl From<ModuleGraph> for Vec<ModuleInfo> {
    fn from(graph: ModuleGraph) -> Self {
        graph.modules.into_values().collect()
    }
}

impl FromIterator<ModuleInfo> for ModuleGraph {
    fn from_iter<I: IntoIterator<Item = ModuleInfo>>(iter: I) -> Self {
        Self::from_modules(iter)
    }
}

impl ModuleInfo {
    fn is_empty_id(&self) -> bool {
        self.id.is_empty()
    }
}

fn push_unique(list: &mut Vec<ModuleId>, id: ModuleId) {
    if !list.contains(&id) {
        list.push(id);
    }
}

fn insert_sorted(list: &mut Vec<ModuleId>, id: ModuleId) {
    if let Err(pos) = list.binary_search(&id) {
        list.insert(pos, id);
    }
}
