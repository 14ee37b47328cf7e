//! Upward walks over importer edges.
//!
//! Given a module (typically a stylesheet), [`walk_parent_infos`] visits the
//! module itself and then every module that transitively imports it, each
//! annotated with:
//!
//! - **depth**: number of importer edges between the start module and the
//!   ancestor, along the path the walk discovered it on
//! - **order**: the sum of import positions along that path, where each
//!   edge contributes the index of the child in the parent's import list
//!   (static imports first, then dynamic imports)
//!
//! The walk is a depth-first pre-order traversal driven by an explicit
//! stack. Static importers are explored before dynamic importers, each list
//! in its sorted order, so a fixed graph always produces the same sequence.
//! A walk-wide visited set guarantees that no module is yielded or expanded
//! twice, which makes the walk terminate in `O(V + E)` on any graph,
//! including import cycles.
//!
//! ```text
//!   page.astro ──imports[1]──▶ Card.astro ──imports[0]──▶ card.css
//!
//!   walk(card.css):  card.css   depth 0, order 0
//!                    Card.astro depth 1, order 0
//!                    page.astro depth 2, order 1
//! ```

use rustc_hash::FxHashSet;

use super::{ModuleId, ModuleInfo, ModuleInfoLookup};

/// Prefix of the virtual module a bundler uses to wrap page entries. A
/// module whose first importer carries this prefix is a top-level page even
/// when the bundler did not flag it as one.
pub const PAGE_VIRTUAL_MODULE_PREFIX: &str = "\0@page:";

/// One module reached by a walk.
#[derive(Debug, Clone, Copy)]
pub struct WalkStep<'a> {
    pub info: &'a ModuleInfo,
    pub depth: usize,
    pub order: usize,
}

impl WalkStep<'_> {
    /// Distance from the module holding the import statement to this
    /// ancestor. A page that imports a stylesheet directly is at 0.
    pub fn import_site_depth(&self) -> usize {
        self.depth.saturating_sub(1)
    }
}

#[derive(Debug)]
struct Frame {
    id: ModuleId,
    child: Option<ModuleId>,
    depth: usize,
    order: usize,
}

/// Iterator returned by [`walk_parent_infos`].
pub struct ParentWalk<'a, L: ModuleInfoLookup + ?Sized> {
    lookup: &'a L,
    stack: Vec<Frame>,
    seen: FxHashSet<ModuleId>,
}

impl<'a, L: ModuleInfoLookup + ?Sized> Iterator for ParentWalk<'a, L> {
    type Item = WalkStep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            if !self.seen.insert(frame.id.clone()) {
                continue;
            }

            let Some(info) = self.lookup.module_info(frame.id.as_str()) else {
                tracing::trace!(id = %frame.id, "module info unavailable, not expanding");
                continue;
            };

            let edge_index = frame
                .child
                .as_ref()
                .and_then(|child| info.import_index(child.as_str()))
                .unwrap_or(0);
            let order = frame.order + edge_index;

            // Reverse so the first importer is popped first.
            for importer in info.all_importers().rev() {
                if !self.seen.contains(importer) {
                    self.stack.push(Frame {
                        id: importer.clone(),
                        child: Some(info.id.clone()),
                        depth: frame.depth + 1,
                        order,
                    });
                }
            }

            return Some(WalkStep {
                info,
                depth: frame.depth,
                order,
            });
        }
        None
    }
}

/// Walk `id` and every module that transitively imports it.
///
/// The start module is yielded first (depth 0, order 0) when the lookup
/// knows it. Unknown ids yield nothing.
pub fn walk_parent_infos<'a, L>(id: &str, lookup: &'a L) -> ParentWalk<'a, L>
where
    L: ModuleInfoLookup + ?Sized,
{
    ParentWalk {
        lookup,
        stack: vec![Frame {
            id: ModuleId::from(id),
            child: None,
            depth: 0,
            order: 0,
        }],
        seen: FxHashSet::default(),
    }
}

/// The top-level pages that transitively import `id`, in walk order.
///
/// Each page appears once. Modules with no page ancestor produce an empty
/// sequence.
pub fn get_top_level_pages<'a, L>(id: &str, lookup: &'a L) -> impl Iterator<Item = WalkStep<'a>>
where
    L: ModuleInfoLookup + ?Sized,
{
    walk_parent_infos(id, lookup).filter(|step| module_is_top_level_page(step.info))
}

pub fn module_is_top_level_page(info: &ModuleInfo) -> bool {
    info.is_page
        || info
            .importers
            .first()
            .is_some_and(|id| id.starts_with(PAGE_VIRTUAL_MODULE_PREFIX))
        || info
            .dynamic_importers
            .first()
            .is_some_and(|id| id.starts_with(PAGE_VIRTUAL_MODULE_PREFIX))
}
