use serde::{Deserialize, Serialize};
use std::fmt;

/// Which corpus a favorite id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Verse,
    Background,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Verse => "verse",
            ContentType::Background => "background",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "verse" | "verses" => Some(ContentType::Verse),
            "background" | "backgrounds" | "image" | "images" => Some(ContentType::Background),
            _ => None,
        }
    }

    pub fn all() -> Vec<ContentType> {
        vec![ContentType::Verse, ContentType::Background]
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Favorite ids for one content type, kept in the order they were added.
///
/// Ids are not checked against any corpus, so an unknown id can be
/// favorited like any other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FavoriteSet {
    ids: Vec<String>,
}

/// Keeps the first occurrence of each id
impl From<Vec<String>> for FavoriteSet {
    fn from(ids: Vec<String>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }
}

impl From<FavoriteSet> for Vec<String> {
    fn from(set: FavoriteSet) -> Self {
        set.ids
    }
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`, returning whether it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.ids.retain(|existing| existing != id);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
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
    fn test_toggle_adds_then_removes() {
        let mut favs = FavoriteSet::new();
        assert!(favs.toggle("3"));
        assert!(favs.contains("3"));
        assert!(!favs.toggle("3"));
        assert!(!favs.contains("3"));
        assert!(favs.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut favs = FavoriteSet::new();
        favs.toggle("1");
        let before = favs.clone();

        for id in ["1", "2", "not-in-any-corpus"] {
            favs.toggle(id);
            favs.toggle(id);
            assert_eq!(favs, before);
        }
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut favs = FavoriteSet::new();
        favs.toggle("5");
        favs.toggle("2");
        favs.toggle("4");
        assert_eq!(favs.ids(), &["5", "2", "4"]);

        // Re-adding goes to the back
        favs.toggle("5");
        favs.toggle("5");
        assert_eq!(favs.ids(), &["2", "4", "5"]);
    }

    #[test]
    fn test_duplicate_ids_collapse_on_load() {
        let mut favs: FavoriteSet = serde_json::from_str(r#"["1", "2", "1"]"#).unwrap();
        assert_eq!(favs.ids(), &["1", "2"]);

        assert!(!favs.toggle("1"));
        assert!(!favs.contains("1"));
        assert!(favs.toggle("1"));
        assert_eq!(favs.ids(), &["2", "1"]);
        assert_eq!(serde_json::to_string(&favs).unwrap(), r#"["2","1"]"#);
    }

    #[test]
    fn test_content_type_round_trip_names() {
        for ct in ContentType::all() {
            assert_eq!(ContentType::from_str(ct.as_str()), Some(ct));
        }
        assert_eq!(ContentType::from_str("Images"), Some(ContentType::Background));
        assert_eq!(ContentType::from_str("psalm"), None);
    }
}
