//! Property-based tests for attribution merging and chunk naming.
//!
//! Run with: cargo test --features proptest --package cascade-css property_tests

#![cfg(feature = "proptest")]

use cascade_graph::ModuleGraph;
use proptest::prelude::*;

use crate::{BuildInternals, CssAttribution, CssDedupSet, PageBuildData, name_for_parent_pages};
use crate::{attribute_client_pass, attribute_server_pass};
use cascade_graph::{Output, OutputAsset, OutputBundle, OutputChunk};

fn attribution() -> impl Strategy<Value = CssAttribution> {
    (-1i32..20, -1i32..20).prop_map(|(depth, order)| CssAttribution::new(depth, order))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: merged depth is the minimum of all depths seen.
    #[test]
    fn prop_merge_depth_is_minimum(entries in prop::collection::vec(attribution(), 1..10)) {
        let mut merged = entries[0];
        for entry in &entries[1..] {
            merged.merge(*entry);
        }
        let min_depth = entries.iter().map(|e| e.depth).min().unwrap();
        prop_assert_eq!(merged.depth, min_depth);
    }

    /// Property: merged order is the smallest known order, or -1 if none is known.
    #[test]
    fn prop_merge_order_is_smallest_known(entries in prop::collection::vec(attribution(), 1..10)) {
        let mut merged = entries[0];
        for entry in &entries[1..] {
            merged.merge(*entry);
        }
        let expected = entries
            .iter()
            .map(|e| e.order)
            .filter(|order| *order > -1)
            .min()
            .unwrap_or(-1);
        prop_assert_eq!(merged.order, expected);
    }

    /// Property: the shared chunk name depends only on which pages import the CSS.
    #[test]
    fn prop_name_independent_of_page_insertion_order(
        pages in prop::collection::btree_set("[a-z]{1,6}", 1..6),
        seed in any::<u64>(),
    ) {
        let ids: Vec<String> = pages.iter().map(|p| format!("/src/pages/{p}.astro")).collect();
        let mut shuffled = ids.clone();
        // deterministic rotation driven by the seed
        let len = shuffled.len();
        shuffled.rotate_left((seed as usize) % len);

        let name = |order: &[String]| {
            let mut graph = ModuleGraph::new();
            for id in order {
                graph.add_import(id.as_str(), "/src/styles/common.css").unwrap();
                graph.mark_page(id).unwrap();
            }
            name_for_parent_pages("/src/styles/common.css", &graph)
        };

        prop_assert_eq!(name(&ids), name(&shuffled));
    }

    /// Property: CSS fully claimed by the server leaves no stylesheet in the
    /// client bundle; a client-only island's page still links it.
    #[test]
    fn prop_server_claimed_css_is_not_duplicated(
        claimed in prop::collection::vec(prop::bool::ANY, 1..8),
        island in prop::bool::ANY,
    ) {
        let mut graph = ModuleGraph::new();
        graph.add_import("/src/pages/index.astro", "/src/components/Island.jsx").unwrap();
        graph.mark_page("/src/pages/index.astro").unwrap();
        let mut internals = BuildInternals::new();
        internals.add_page(PageBuildData::new("/src/pages/index.astro", "src/pages/index.astro"));
        if island {
            internals.register_client_only("/src/components/Island.jsx", "/src/pages/index.astro");
        }

        let mut server = OutputBundle::new();
        let mut client = OutputBundle::new();
        for (i, is_claimed) in claimed.iter().enumerate() {
            let module = format!("/src/styles/s{i}.css");
            graph.add_import("/src/components/Island.jsx", module.as_str()).unwrap();
            let asset = format!("assets/s{i}.css");
            let chunk = OutputChunk::new(format!("s{i}.js"))
                .with_modules([module.as_str()])
                .with_imported_css([asset.as_str()]);
            if *is_claimed {
                server.insert(Output::from(chunk.clone()));
            }
            client.insert(Output::from(chunk));
            client.insert(Output::from(OutputAsset::new(asset, "a{}")));
        }

        let dedup: CssDedupSet = attribute_server_pass(&server, &graph, &mut internals).unwrap();
        attribute_client_pass(&mut client, &graph, &mut internals, &dedup).unwrap();

        let page = internals.page_by_module_id("/src/pages/index.astro").unwrap();
        for (i, is_claimed) in claimed.iter().enumerate() {
            let asset = format!("assets/s{i}.css");
            let kept = client.contains(&asset);
            prop_assert_eq!(kept, !*is_claimed);
            if island {
                prop_assert_eq!(page.css_for(&asset).map(|a| a.depth), Some(-1));
            }
        }
    }
}
