use cascade_graph::ModuleId;
use indexmap::IndexSet;
use rustc_hash::FxHashMap;

/// Module ids whose CSS the server pass already emitted, with the server
/// asset names each module's chunk produced.
///
/// Filled by the server pass and read by the client pass, which drops any
/// CSS chunk made up entirely of these modules.
#[derive(Debug, Clone, Default)]
pub struct CssDedupSet {
    ids: FxHashMap<ModuleId, IndexSet<String>>,
}

impl CssDedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id` and record the server assets it was emitted in. Returns
    /// true if the id was not claimed before.
    pub fn insert<I, S>(&mut self, id: impl Into<ModuleId>, assets: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut is_new = false;
        let entry = self.ids.entry(id.into()).or_insert_with(|| {
            is_new = true;
            IndexSet::new()
        });
        entry.extend(assets.into_iter().map(Into::into));
        is_new
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// True when every id is claimed. Vacuously true for no ids.
    pub fn contains_all<'a>(&self, ids: impl IntoIterator<Item = &'a ModuleId>) -> bool {
        ids.into_iter().all(|id| self.ids.contains_key(id))
    }

    /// Server asset names recorded for `id`, in emission order.
    pub fn server_assets<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.ids
            .get(id)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn extend(&mut self, other: CssDedupSet) {
        for (id, assets) in other.ids {
            self.ids.entry(id).or_default().extend(assets);
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_all_requires_every_id() {
        let mut set = CssDedupSet::new();
        set.insert("/a.css", ["assets/a.css"]);
        set.insert("/b.css", ["assets/b.css"]);

        let claimed = [ModuleId::from("/a.css"), ModuleId::from("/b.css")];
        let partial = [ModuleId::from("/a.css"), ModuleId::from("/c.css")];
        assert!(set.contains_all(&claimed));
        assert!(!set.contains_all(&partial));
    }

    #[test]
    fn extend_merges_sets() {
        let mut server = CssDedupSet::new();
        server.insert("/a.css", ["assets/a.css"]);
        let mut more = CssDedupSet::new();
        more.insert("/b.css", ["assets/b.css"]);
        more.insert("/a.css", ["assets/common.css"]);

        server.extend(more);
        assert_eq!(server.len(), 2);
        assert!(server.contains("/b.css"));
        assert_eq!(
            server.server_assets("/a.css").collect::<Vec<_>>(),
            vec!["assets/a.css", "assets/common.css"]
        );
    }

    #[test]
    fn repeated_claims_accumulate_assets() {
        let mut set = CssDedupSet::new();
        assert!(set.insert("/a.css", ["assets/a.css"]));
        assert!(!set.insert("/a.css", ["assets/a.css", "assets/extra.css"]));

        assert_eq!(set.server_assets("/a.css").count(), 2);
        assert_eq!(set.server_assets("/missing.css").count(), 0);
    }
}
