use serde::{Deserialize, Serialize};

use super::ModuleId;

/// Bundler-provided metadata for one module.
///
/// `imported_ids` and `dynamically_imported_ids` keep the author's import
/// order, which is what cascade ordering is derived from. `importers` and
/// `dynamic_importers` are kept sorted by the owning [`ModuleGraph`], so
/// upward walks do not depend on the order edges were discovered in.
///
/// [`ModuleGraph`]: crate::ModuleGraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub id: ModuleId,
    #[serde(default)]
    pub imported_ids: Vec<ModuleId>,
    #[serde(default)]
    pub dynamically_imported_ids: Vec<ModuleId>,
    #[serde(default)]
    pub importers: Vec<ModuleId>,
    #[serde(default)]
    pub dynamic_importers: Vec<ModuleId>,
    #[serde(default)]
    pub is_entry: bool,
    /// Recognized by the bundler as a top-level page entry.
    #[serde(default)]
    pub is_page: bool,
}

impl ModuleInfo {
    pub fn new(id: impl Into<ModuleId>) -> Self {
        Self {
            id: id.into(),
            imported_ids: Vec::new(),
            dynamically_imported_ids: Vec::new(),
            importers: Vec::new(),
            dynamic_importers: Vec::new(),
            is_entry: false,
            is_page: false,
        }
    }

    /// Create a new module builder with sensible defaults.
    pub fn builder(id: impl Into<ModuleId>) -> ModuleInfoBuilder {
        ModuleInfoBuilder {
            module: Self::new(id),
        }
    }

    /// Position of `child` in this module's import sequence.
    ///
    /// Static imports come first; dynamic imports are numbered after them.
    pub fn import_index(&self, child: &str) -> Option<usize> {
        if let Some(idx) = self.imported_ids.iter().position(|id| id == child) {
            return Some(idx);
        }
        self.dynamically_imported_ids
            .iter()
            .position(|id| id == child)
            .map(|idx| self.imported_ids.len() + idx)
    }

    /// Static importers followed by dynamic importers.
    pub fn all_importers(&self) -> impl DoubleEndedIterator<Item = &ModuleId> {
        self.importers.iter().chain(self.dynamic_importers.iter())
    }
}

/// Builder for `ModuleInfo`, mostly useful when describing graphs by hand.
pub struct ModuleInfoBuilder {
    module: ModuleInfo,
}

impl ModuleInfoBuilder {
    pub fn imports<I, T>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ModuleId>,
    {
        self.module.imported_ids = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn dynamic_imports<I, T>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ModuleId>,
    {
        self.module.dynamically_imported_ids = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn entry(mut self, is_entry: bool) -> Self {
        self.module.is_entry = is_entry;
        self
    }

    pub fn page(mut self, is_page: bool) -> Self {
        self.module.is_page = is_page;
        self
    }

    pub fn build(self) -> ModuleInfo {
        self.module
    }
}
