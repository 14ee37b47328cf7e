//! Ordering of a page's stylesheets for `<link>` emission.
//!
//! Stylesheets with a known order are emitted by ascending order, so CSS
//! imported earlier lands earlier in the cascade. On ties, entries with an
//! unknown depth go first, then deeper (more widely shared) stylesheets
//! before page-specific ones, then by file name so output is stable.
//! Unordered entries (`order == -1`) form their own group placed before or
//! after the ordered ones.

use std::cmp::{Ordering, Reverse};

use cascade_config::UnorderedPlacement;
use serde::Serialize;

use crate::page::{CssAttribution, PageBuildData};

/// One stylesheet link for the template layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCssLink {
    /// Asset file name, relative to the site base.
    pub href: String,
    pub depth: i32,
    pub order: i32,
}

pub fn sorted_css(page: &PageBuildData, placement: UnorderedPlacement) -> Vec<PageCssLink> {
    let mut links: Vec<PageCssLink> = page
        .css
        .iter()
        .map(|(href, attr)| PageCssLink {
            href: href.clone(),
            depth: attr.depth,
            order: attr.order,
        })
        .collect();
    links.sort_by(|a, b| compare(a, b, placement));
    links
}

fn compare(a: &PageCssLink, b: &PageCssLink, placement: UnorderedPlacement) -> Ordering {
    let group = |link: &PageCssLink| {
        let unordered = CssAttribution::new(link.depth, link.order).is_unordered();
        match placement {
            UnorderedPlacement::First => !unordered,
            UnorderedPlacement::Last => unordered,
        }
    };

    group(a)
        .cmp(&group(b))
        .then(a.order.cmp(&b.order))
        .then((a.depth != -1).cmp(&(b.depth != -1)))
        .then(Reverse(a.depth).cmp(&Reverse(b.depth)))
        .then_with(|| a.href.cmp(&b.href))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(entries: &[(&str, i32, i32)]) -> PageBuildData {
        let mut page = PageBuildData::new("/src/pages/index.astro", "src/pages/index.astro");
        for (href, depth, order) in entries {
            page.css
                .insert(href.to_string(), CssAttribution::new(*depth, *order));
        }
        page
    }

    fn hrefs(links: &[PageCssLink]) -> Vec<&str> {
        links.iter().map(|l| l.href.as_str()).collect()
    }

    #[test]
    fn orders_by_import_order() {
        let page = page(&[("b.css", 0, 2), ("a.css", 0, 0), ("c.css", 0, 1)]);
        let links = sorted_css(&page, UnorderedPlacement::First);
        assert_eq!(hrefs(&links), vec!["a.css", "c.css", "b.css"]);
    }

    #[test]
    fn unordered_placement_is_configurable() {
        let page = page(&[("page.css", 0, 0), ("island.css", -1, -1)]);

        let first = sorted_css(&page, UnorderedPlacement::First);
        assert_eq!(hrefs(&first), vec!["island.css", "page.css"]);

        let last = sorted_css(&page, UnorderedPlacement::Last);
        assert_eq!(hrefs(&last), vec!["page.css", "island.css"]);
    }

    #[test]
    fn ties_put_shared_css_before_page_css() {
        let page = page(&[("page.css", 0, 1), ("shared.css", 2, 1), ("hoisted.css", -1, 1)]);
        let links = sorted_css(&page, UnorderedPlacement::First);
        assert_eq!(hrefs(&links), vec!["hoisted.css", "shared.css", "page.css"]);
    }

    #[test]
    fn full_ties_fall_back_to_name() {
        let page = page(&[("z.css", 1, 1), ("m.css", 1, 1)]);
        let links = sorted_css(&page, UnorderedPlacement::First);
        assert_eq!(hrefs(&links), vec!["m.css", "z.css"]);
    }
}
