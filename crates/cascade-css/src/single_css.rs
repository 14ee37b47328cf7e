//! Attribution for builds with CSS code splitting turned off.
//!
//! Without code splitting the bundler writes every stylesheet into one
//! asset named `style.css`, which then belongs to every page.

use cascade_graph::OutputBundle;

use crate::internals::BuildInternals;

pub const SINGLE_CSS_ASSET_NAME: &str = "style.css";

/// Link the single stylesheet to every registered page.
///
/// Returns the stylesheet's file name, or `None` when code splitting is on
/// or the bundle holds no such asset.
pub fn attribute_single_css(
    bundle: &OutputBundle,
    internals: &mut BuildInternals,
    code_split: bool,
) -> Option<String> {
    if code_split {
        return None;
    }

    let file_name = bundle
        .assets()
        .find(|asset| asset.name.as_deref() == Some(SINGLE_CSS_ASSET_NAME))?
        .file_name
        .clone();

    for page in internals.pages_mut() {
        page.force_unordered_css(&file_name);
    }
    tracing::debug!(asset = %file_name, pages = internals.page_count(), "linked single stylesheet");
    Some(file_name)
}
