//! Head markup for a page's stylesheets and hoisted script.

use cascade_config::UnorderedPlacement;

use crate::links::sorted_css;
use crate::page::{HoistedScript, PageBuildData};

/// Join a site base and a root-relative asset path.
pub fn prefix_base(base: &str, path: &str) -> String {
    if base.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Render `<link>` tags for the page's CSS, in cascade order, followed by
/// its hoisted script. One element per line.
pub fn render_head(page: &PageBuildData, base: &str, placement: UnorderedPlacement) -> String {
    let mut elements: Vec<String> = sorted_css(page, placement)
        .into_iter()
        .map(|link| {
            format!(
                r#"<link rel="stylesheet" href="{}">"#,
                escape_attr(&prefix_base(base, &link.href))
            )
        })
        .collect();

    match &page.hoisted_script {
        Some(HoistedScript::External { src }) => elements.push(format!(
            r#"<script type="module" data-hoist src="{}"></script>"#,
            escape_attr(&prefix_base(base, src))
        )),
        Some(HoistedScript::Inline { content }) => elements.push(format!(
            r#"<script type="module" data-hoist>{}</script>"#,
            escape_script(content)
        )),
        None => {}
    }

    elements.join("\n")
}

/// Keep inline script content from closing its element early.
fn escape_script(content: &str) -> String {
    content.replace("</", "<\\/")
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
