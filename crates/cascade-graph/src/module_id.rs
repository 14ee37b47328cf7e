use std::borrow::Borrow;
use std::fmt;
use std::path::Path;

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

/// Opaque module identifier as reported by the bundler.
///
/// Ids are usually absolute file paths, optionally followed by a `?query`
/// (e.g. `/src/pages/index.astro?astro&type=style&index=0&lang.css`), or
/// virtual ids prefixed with `\0`. Cloning is a reference-count bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(ArcStr);

impl ModuleId {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The id without its `?query` suffix.
    pub fn without_query(&self) -> &str {
        match self.0.find('?') {
            Some(idx) => &self.0[..idx],
            None => self.as_str(),
        }
    }

    /// File stem of the id's path: last segment, query stripped, final
    /// extension removed. `/src/pages/about.astro` → `about`.
    pub fn file_stem(&self) -> Option<&str> {
        Path::new(self.without_query())
            .file_stem()
            .and_then(|stem| stem.to_str())
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ModuleId {
    fn from(value: &str) -> Self {
        Self(ArcStr::from(value))
    }
}

impl From<String> for ModuleId {
    fn from(value: String) -> Self {
        Self(ArcStr::from(value))
    }
}

impl From<&ModuleId> for ModuleId {
    fn from(value: &ModuleId) -> Self {
        value.clone()
    }
}

impl PartialEq<str> for ModuleId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ModuleId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
