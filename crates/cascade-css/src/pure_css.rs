//! Restoration of "pure CSS" chunks.
//!
//! The bundler's CSS post-processing drops JavaScript chunks that contained
//! nothing but stylesheets. Server entries that still import bindings from
//! such a chunk would fail to load, so an empty stand-in module exporting
//! those bindings is put back in its place.

use cascade_graph::{ModuleId, Output, OutputBundle, OutputChunk};
use indexmap::IndexMap;

const CHUNKS_DIR: &str = "chunks/";

/// Insert stub chunks for missing `chunks/` imports. Returns their file names.
pub fn restore_pure_css_chunks(bundle: &mut OutputBundle) -> Vec<String> {
    let mut missing: IndexMap<String, Vec<String>> = IndexMap::new();

    for chunk in bundle.chunks() {
        for (import, bindings) in &chunk.imported_bindings {
            if import.starts_with(CHUNKS_DIR)
                && !bundle.contains(import)
                && chunk.code.contains(import.as_str())
            {
                let entry = missing.entry(import.clone()).or_default();
                for binding in bindings {
                    if !entry.contains(binding) {
                        entry.push(binding.clone());
                    }
                }
            }
        }
    }

    let restored: Vec<String> = missing.keys().cloned().collect();
    for (file_name, bindings) in missing {
        tracing::debug!(chunk = %file_name, bindings = bindings.len(), "restoring pure CSS chunk");
        bundle.insert(Output::Chunk(stub_chunk(file_name, bindings)));
    }
    restored
}

fn stub_chunk(file_name: String, bindings: Vec<String>) -> OutputChunk {
    let exports: String = bindings
        .iter()
        .map(|binding| format!("export const {binding} = {{}};"))
        .collect();

    OutputChunk {
        code: format!("/* Pure CSS chunk {file_name} */ {exports}"),
        facade_module_id: Some(ModuleId::from(file_name.as_str())),
        exports: bindings,
        ..OutputChunk::new(file_name)
    }
}
