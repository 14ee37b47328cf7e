//! Per-page build records.

use cascade_graph::ModuleId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placement hints for one stylesheet on one page.
///
/// `depth` is the distance from the module that imported the stylesheet to
/// the page, `order` the cumulative import position along that path. `-1`
/// in either field means "unknown" and is what client-only islands and the
/// single `style.css` of a non-split build receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CssAttribution {
    pub depth: i32,
    pub order: i32,
}

impl CssAttribution {
    pub const UNORDERED: Self = Self {
        depth: -1,
        order: -1,
    };

    pub fn new(depth: i32, order: i32) -> Self {
        Self { depth, order }
    }

    /// Build from walk coordinates, saturating values that do not fit.
    pub fn from_walk(depth: usize, order: usize) -> Self {
        Self {
            depth: i32::try_from(depth).unwrap_or(i32::MAX),
            order: i32::try_from(order).unwrap_or(i32::MAX),
        }
    }

    /// Fold a newly discovered attribution into this one.
    ///
    /// Depth keeps the minimum. Order takes the new value if this one is
    /// unknown, otherwise only a smaller known order replaces it.
    pub fn merge(&mut self, new: CssAttribution) {
        if new.depth < self.depth {
            self.depth = new.depth;
        }
        if self.order == -1 || (new.order < self.order && new.order > -1) {
            self.order = new.order;
        }
    }

    pub fn is_unordered(&self) -> bool {
        self.order == -1
    }
}

/// Script hoisted out of a page's components into a single module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HoistedScript {
    /// Emitted as a file; `src` is relative to the site base.
    External { src: String },
    Inline { content: String },
}

/// Build record for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBuildData {
    /// Module id of the page entry, as the bundler sees it.
    pub module_id: ModuleId,
    /// Source path of the page component.
    pub component: String,
    #[serde(default)]
    pub route: String,
    /// CSS asset file name → placement, in discovery order.
    #[serde(default)]
    pub css: IndexMap<String, CssAttribution>,
    #[serde(default)]
    pub hoisted_script: Option<HoistedScript>,
}

impl PageBuildData {
    pub fn new(module_id: impl Into<ModuleId>, component: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            component: component.into(),
            route: String::new(),
            css: IndexMap::new(),
            hoisted_script: None,
        }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    pub fn with_hoisted_script(mut self, script: HoistedScript) -> Self {
        self.hoisted_script = Some(script);
        self
    }

    /// Record that this page needs `asset`, merging with any earlier record.
    pub fn append_css(&mut self, asset: &str, attribution: CssAttribution) {
        match self.css.get_mut(asset) {
            Some(existing) => existing.merge(attribution),
            None => {
                self.css.insert(asset.to_string(), attribution);
            }
        }
    }

    /// Overwrite the record for `asset` with [`CssAttribution::UNORDERED`].
    pub fn force_unordered_css(&mut self, asset: &str) {
        self.css.insert(asset.to_string(), CssAttribution::UNORDERED);
    }

    pub fn css_for(&self, asset: &str) -> Option<CssAttribution> {
        self.css.get(asset).copied()
    }
}
