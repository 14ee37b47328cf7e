//! Output bundle emitted by one bundler pass.
//!
//! Mirrors the shape of a Rollup/Rolldown `OutputBundle`: a map from output
//! file name to either a chunk (JavaScript, with metadata about the source
//! modules it contains and the CSS it pulled in) or a raw asset.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::ModuleId;

/// All outputs of one pass, keyed by file name, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputBundle {
    outputs: IndexMap<String, Output>,
}

impl OutputBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an output under its own file name, replacing any previous one.
    pub fn insert(&mut self, output: Output) -> Option<Output> {
        self.outputs.insert(output.file_name().to_string(), output)
    }

    pub fn get(&self, file_name: &str) -> Option<&Output> {
        self.outputs.get(file_name)
    }

    pub fn get_mut(&mut self, file_name: &str) -> Option<&mut Output> {
        self.outputs.get_mut(file_name)
    }

    /// Remove an output, keeping the order of the remaining ones.
    pub fn remove(&mut self, file_name: &str) -> Option<Output> {
        self.outputs.shift_remove(file_name)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.outputs.contains_key(file_name)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Output)> {
        self.outputs.iter().map(|(name, output)| (name.as_str(), output))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Output> {
        self.outputs.values_mut()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &OutputChunk> {
        self.outputs.values().filter_map(Output::as_chunk)
    }

    pub fn assets(&self) -> impl Iterator<Item = &OutputAsset> {
        self.outputs.values().filter_map(Output::as_asset)
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl FromIterator<Output> for OutputBundle {
    fn from_iter<I: IntoIterator<Item = Output>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for output in iter {
            bundle.insert(output);
        }
        bundle
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Output {
    Chunk(OutputChunk),
    Asset(OutputAsset),
}

impl Output {
    pub fn file_name(&self) -> &str {
        match self {
            Output::Chunk(chunk) => &chunk.file_name,
            Output::Asset(asset) => &asset.file_name,
        }
    }

    pub fn as_chunk(&self) -> Option<&OutputChunk> {
        match self {
            Output::Chunk(chunk) => Some(chunk),
            Output::Asset(_) => None,
        }
    }

    pub fn as_chunk_mut(&mut self) -> Option<&mut OutputChunk> {
        match self {
            Output::Chunk(chunk) => Some(chunk),
            Output::Asset(_) => None,
        }
    }

    pub fn as_asset(&self) -> Option<&OutputAsset> {
        match self {
            Output::Asset(asset) => Some(asset),
            Output::Chunk(_) => None,
        }
    }

    pub fn as_asset_mut(&mut self) -> Option<&mut OutputAsset> {
        match self {
            Output::Asset(asset) => Some(asset),
            Output::Chunk(_) => None,
        }
    }
}

impl From<OutputChunk> for Output {
    fn from(chunk: OutputChunk) -> Self {
        Output::Chunk(chunk)
    }
}

impl From<OutputAsset> for Output {
    fn from(asset: OutputAsset) -> Self {
        Output::Asset(asset)
    }
}

/// A JavaScript chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputChunk {
    pub file_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub facade_module_id: Option<ModuleId>,
    #[serde(default)]
    pub code: String,
    /// Source modules rendered into this chunk, in render order.
    #[serde(default)]
    pub modules: Vec<ModuleId>,
    /// CSS asset file names this chunk pulled in.
    #[serde(default)]
    pub imported_css: IndexSet<String>,
    #[serde(default)]
    pub imported_assets: IndexSet<String>,
    /// Import path → bindings imported from it.
    #[serde(default)]
    pub imported_bindings: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub dynamic_imports: Vec<String>,
    #[serde(default)]
    pub exports: Vec<String>,
    #[serde(default)]
    pub is_entry: bool,
    #[serde(default)]
    pub is_dynamic_entry: bool,
}

impl OutputChunk {
    pub fn new(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            name: file_name.clone(),
            file_name,
            ..Self::default()
        }
    }

    pub fn with_modules<I, T>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ModuleId>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_imported_css<I, T>(mut self, css: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.imported_css = css.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

/// A raw emitted file, e.g. a stylesheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputAsset {
    pub file_name: String,
    #[serde(default)]
    pub name: Option<String>,
    pub source: AssetSource,
}

impl OutputAsset {
    pub fn new(file_name: impl Into<String>, source: impl Into<AssetSource>) -> Self {
        Self {
            file_name: file_name.into(),
            name: None,
            source: source.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetSource {
    Text(String),
    Binary(Vec<u8>),
}

impl AssetSource {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AssetSource::Text(text) => Some(text),
            AssetSource::Binary(_) => None,
        }
    }
}

impl From<String> for AssetSource {
    fn from(value: String) -> Self {
        AssetSource::Text(value)
    }
}

impl From<&str> for AssetSource {
    fn from(value: &str) -> Self {
        AssetSource::Text(value.to_string())
    }
}

impl From<Vec<u8>> for AssetSource {
    fn from(value: Vec<u8>) -> Self {
        AssetSource::Binary(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_keeps_emission_order() {
        let mut bundle: OutputBundle = [
            Output::from(OutputChunk::new("a.js")),
            Output::from(OutputAsset::new("a.css", "a{}")),
            Output::from(OutputChunk::new("b.js")),
        ]
        .into_iter()
        .collect();

        assert!(bundle.remove("a.css").is_some());
        assert_eq!(bundle.file_names().collect::<Vec<_>>(), vec!["a.js", "b.js"]);
    }

    #[test]
    fn deserializes_tagged_outputs() {
        let bundle: OutputBundle = serde_json::from_str(
            r#"{
                "entry.js": {
                    "type": "chunk",
                    "file_name": "entry.js",
                    "modules": ["/src/pages/index.astro", "/src/styles/a.css"],
                    "imported_css": ["assets/index.1234abcd.css"]
                },
                "assets/index.1234abcd.css": {
                    "type": "asset",
                    "file_name": "assets/index.1234abcd.css",
                    "name": "index.css",
                    "source": "body{color:red}"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(bundle.chunks().count(), 1);
        let chunk = bundle.chunks().next().unwrap();
        assert_eq!(chunk.modules.len(), 2);
        assert!(chunk.imported_css.contains("assets/index.1234abcd.css"));
        let asset = bundle.assets().next().unwrap();
        assert_eq!(asset.source.as_text(), Some("body{color:red}"));
    }
}
