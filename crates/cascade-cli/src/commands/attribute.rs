//! `cascade attribute`: replay a build and list each page's stylesheets.

use std::fmt::Write as _;

use cascade_css::{PageCssLink, prefix_base, render_head, sorted_css};
use serde::Serialize;

use super::load_plugin;
use crate::build::{BuildDescription, replay};
use crate::cli::{AttributeArgs, OutputFormat};

#[derive(Debug, Serialize)]
struct PageSummary {
    route: String,
    component: String,
    css: Vec<PageCssLink>,
}

pub fn execute(args: &AttributeArgs) -> anyhow::Result<String> {
    let plugin = load_plugin(&args.root)?;
    let description = BuildDescription::load(&args.build)?;
    let build = replay(description, &plugin)?;
    let config = plugin.config();

    let summaries: Vec<PageSummary> = build
        .internals
        .pages()
        .map(|page| PageSummary {
            route: page.route.clone(),
            component: page.component.clone(),
            css: sorted_css(page, config.unordered_placement)
                .into_iter()
                .map(|link| PageCssLink {
                    href: prefix_base(&config.base, &link.href),
                    ..link
                })
                .collect(),
        })
        .collect();

    if args.format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&summaries)?);
    }

    let mut out = String::new();
    for (summary, page) in summaries.iter().zip(build.internals.pages()) {
        writeln!(out, "{} ({})", summary.route, summary.component)?;
        if summary.css.is_empty() {
            writeln!(out, "  (no stylesheets)")?;
        }
        for link in &summary.css {
            writeln!(out, "  {}  depth {} order {}", link.href, link.depth, link.order)?;
        }
        if args.head {
            for line in render_head(page, &config.base, config.unordered_placement).lines() {
                writeln!(out, "  | {line}")?;
            }
        }
    }

    let removed = &build.reports[1].removed_assets;
    if !removed.is_empty() {
        writeln!(out, "removed from client bundle: {}", removed.join(", "))?;
    }
    Ok(out.trim_end().to_string())
}
