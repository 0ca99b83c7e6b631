use dashmap::{mapref::entry::Entry, DashMap};

/// In-memory table from short key to original URL. Lives as long as the
/// process; every access goes through the map's shard locks.
#[derive(Debug, Default)]
pub struct UrlStore {
    urls: DashMap<String, String>,
}

impl UrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: String, url: String) {
        self.urls.insert(key, url);
    }

    /// Inserts only when `key` is vacant. Returns `false` on collision and
    /// leaves the existing mapping alone.
    pub fn insert_new(&self, key: String, url: String) -> bool {
        match self.urls.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(url);
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.urls.get(key).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
