//! Optional key-value persistence for favorites and the live draft
//!
//! Nothing in the catalog or composer requires a store. Callers that want
//! state to outlive the process inject one and call the save/restore pairs.
//!
//! Keys: `favorites/verse`, `favorites/background`, `draft`.

use crate::catalog::Catalog;
use crate::draft::{CardDraft, Composer};
use crate::error::Result;
use crate::favorites::{ContentType, FavoriteSet};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DRAFT_KEY: &str = "draft";

pub fn favorites_key(content_type: ContentType) -> String {
    format!("favorites/{}", content_type.as_str())
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// All entries in a single JSON object file, rewritten on every `set`
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// `<data dir>/prayercards/state.json`, falling back to the working
    /// directory when the platform has no data dir
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("prayercards"))
            .unwrap_or_default()
            .join("state.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl Catalog {
    pub fn save_favorites(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        for content_type in ContentType::all() {
            let json = serde_json::to_string(self.favorites(content_type))?;
            store.set(&favorites_key(content_type), json)?;
        }
        Ok(())
    }

    /// Replace in-memory favorites with whatever the store holds. Content
    /// types with no stored entry are left as they are.
    pub fn restore_favorites(&mut self, store: &dyn KeyValueStore) -> Result<()> {
        for content_type in ContentType::all() {
            if let Some(json) = store.get(&favorites_key(content_type))? {
                let restored: FavoriteSet = serde_json::from_str(&json)?;
                debug!(%content_type, count = restored.len(), "restored favorites");
                *self.favorites_mut(content_type) = restored;
            }
        }
        Ok(())
    }
}

impl Composer {
    pub fn save_draft(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(DRAFT_KEY, serde_json::to_string(self.draft())?)
    }

    /// Returns `true` if a stored draft replaced the current one
    pub fn restore_draft(&mut self, store: &dyn KeyValueStore) -> Result<bool> {
        match store.get(DRAFT_KEY)? {
            Some(json) => {
                let draft: CardDraft = serde_json::from_str(&json)?;
                *self = Composer::from_draft(draft);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontFamily;

    #[test]
    fn test_favorites_survive_store() {
        let mut store = MemoryStore::new();
        let mut catalog = Catalog::new();
        catalog.toggle_favorite(ContentType::Verse, "6");
        catalog.toggle_favorite(ContentType::Verse, "1");
        catalog.toggle_favorite(ContentType::Background, "unknown");
        catalog.save_favorites(&mut store).unwrap();

        let mut fresh = Catalog::new();
        fresh.restore_favorites(&store).unwrap();
        assert_eq!(fresh.list_favorites(ContentType::Verse), &["6", "1"]);
        assert_eq!(fresh.list_favorites(ContentType::Background), &["unknown"]);
    }

    #[test]
    fn test_restored_duplicates_still_toggle_off() {
        let mut store = MemoryStore::new();
        store.set(&favorites_key(ContentType::Verse), r#"["1","1"]"#.to_string()).unwrap();

        let mut catalog = Catalog::new();
        catalog.restore_favorites(&store).unwrap();
        assert_eq!(catalog.list_favorites(ContentType::Verse), &["1"]);

        assert!(!catalog.toggle_favorite(ContentType::Verse, "1"));
        assert!(!catalog.is_favorite(ContentType::Verse, "1"));
        assert!(catalog.list_favorites(ContentType::Verse).is_empty());
    }

    #[test]
    fn test_restore_from_empty_store_is_noop() {
        let store = MemoryStore::new();
        let mut catalog = Catalog::new();
        catalog.toggle_favorite(ContentType::Verse, "2");
        catalog.restore_favorites(&store).unwrap();
        assert_eq!(catalog.list_favorites(ContentType::Verse), &["2"]);

        let mut composer = Composer::new();
        assert!(!composer.restore_draft(&store).unwrap());
        assert_eq!(composer.draft(), &CardDraft::default());
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state.json");

        let mut composer = Composer::new();
        composer.set_font(FontFamily::Monospace);
        composer.adjust_font_size(4);
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            composer.save_draft(&mut store).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        let mut restored = Composer::new();
        assert!(restored.restore_draft(&store).unwrap());
        assert_eq!(restored.draft(), composer.draft());
        assert_eq!(restored.draft().style.font_size_pt(), 22);
    }

    #[test]
    fn test_json_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();
        assert!(JsonFileStore::open(&path).is_err());
    }

    #[test]
    fn test_keys() {
        assert_eq!(favorites_key(ContentType::Verse), "favorites/verse");
        assert_eq!(favorites_key(ContentType::Background), "favorites/background");
    }
}
