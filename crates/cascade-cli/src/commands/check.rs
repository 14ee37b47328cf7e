//! `cascade check`: load and validate the configuration.

use super::load_plugin;
use crate::cli::CheckArgs;

pub fn execute(args: &CheckArgs) -> anyhow::Result<String> {
    let plugin = load_plugin(&args.root)?;
    let css = plugin.config();
    Ok(format!(
        "configuration ok (code_split: {}, minify: {}, base: {}, manual chunks: {})",
        css.code_split,
        css.minify,
        css.base,
        css.manual_chunks.len()
    ))
}
