//! Walker scenarios over realistic page graphs.

use crate::{ModuleGraph, ModuleInfo, get_top_level_pages, walk_parent_infos};

/// Two pages sharing a layout, a component used by one page and a
/// stylesheet shared through the layout.
fn site_graph() -> ModuleGraph {
    ModuleGraph::from_modules([
        ModuleInfo::builder("/src/pages/index.astro")
            .imports(["/src/layouts/Base.astro", "/src/components/Hero.astro"])
            .page(true)
            .build(),
        ModuleInfo::builder("/src/pages/about.astro")
            .imports(["/src/layouts/Base.astro"])
            .page(true)
            .build(),
        ModuleInfo::builder("/src/layouts/Base.astro")
            .imports(["/src/styles/reset.css", "/src/styles/global.css"])
            .build(),
        ModuleInfo::builder("/src/components/Hero.astro")
            .imports(["/src/styles/hero.css"])
            .build(),
    ])
}

#[test]
fn shared_layout_css_reaches_both_pages() {
    let graph = site_graph();

    let pages: Vec<_> = get_top_level_pages("/src/styles/global.css", &graph)
        .map(|step| (step.info.id.to_string(), step.depth, step.order))
        .collect();

    // importers of Base.astro sorted: about before index
    assert_eq!(
        pages,
        vec![
            ("/src/pages/about.astro".to_string(), 2, 1),
            ("/src/pages/index.astro".to_string(), 2, 1),
        ]
    );
}

#[test]
fn component_css_reaches_only_its_page() {
    let graph = site_graph();

    let pages: Vec<_> = get_top_level_pages("/src/styles/hero.css", &graph)
        .map(|step| (step.info.id.to_string(), step.import_site_depth(), step.order))
        .collect();

    assert_eq!(pages, vec![("/src/pages/index.astro".to_string(), 1, 1)]);
}

#[test]
fn repeated_walks_are_identical() {
    let graph = site_graph();

    let collect = || {
        walk_parent_infos("/src/styles/reset.css", &graph)
            .map(|step| (step.info.id.clone(), step.depth, step.order))
            .collect::<Vec<_>>()
    };

    let first = collect();
    for _ in 0..10 {
        assert_eq!(collect(), first);
    }
}

#[test]
fn self_importing_module_terminates() {
    let mut graph = ModuleGraph::new();
    graph.add_import("/a.js", "/a.js").unwrap();
    graph.add_import("/a.js", "/a.css").unwrap();

    assert_eq!(walk_parent_infos("/a.css", &graph).count(), 2);
}

#[test]
fn page_inside_cycle_is_found_once() {
    let mut graph = ModuleGraph::new();
    graph.add_import("/page.astro", "/Nav.astro").unwrap();
    graph.add_import("/Nav.astro", "/page.astro").unwrap();
    graph.add_import("/Nav.astro", "/nav.css").unwrap();
    graph.mark_page("/page.astro").unwrap();

    let pages: Vec<_> = get_top_level_pages("/nav.css", &graph).collect();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].info.id, "/page.astro");
}
