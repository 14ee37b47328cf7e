//! `cascade names`: show the shared chunk name of every stylesheet.

use std::fmt::Write as _;

use cascade_graph::is_css_request;

use super::load_plugin;
use crate::build::BuildDescription;
use crate::cli::NamesArgs;

pub fn execute(args: &NamesArgs) -> anyhow::Result<String> {
    let plugin = load_plugin(&args.root)?;
    let description = BuildDescription::load(&args.build)?;

    let mut out = String::new();
    for module in description.modules.modules() {
        if !is_css_request(module.id.as_str()) {
            continue;
        }
        if let Some(name) = plugin.manual_chunks(module.id.as_str(), &description.modules) {
            writeln!(out, "{}  {}", module.id, name)?;
        }
    }
    Ok(out.trim_end().to_string())
}
