use crate::error::{CardError, Result};
use crate::favorites::{ContentType, FavoriteSet};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, info};

/// Category filter value that matches every background
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Verse {
    pub id: String,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl Verse {
    /// Display reference, e.g. "John 3:16"
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    pub id: String,
    pub url: String,
    pub category: String,
    pub title: String,
}

/// A parsed `Book C:V` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseReference {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseReference {
    pub fn parse(reference: &str) -> Result<Self> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r"^\s*((?:[1-3]\s+)?[A-Za-z][A-Za-z .'&]*?)\s+(\d+):(\d+)\s*$")
                .expect("verse reference pattern is valid")
        });

        let invalid = || CardError::InvalidReference(reference.to_string());
        let caps = pattern.captures(reference).ok_or_else(invalid)?;

        let chapter: u32 = caps[2].parse().map_err(|_| invalid())?;
        let verse: u32 = caps[3].parse().map_err(|_| invalid())?;
        if chapter == 0 || verse == 0 {
            return Err(invalid());
        }

        Ok(Self {
            book: caps[1].split_whitespace().collect::<Vec<_>>().join(" "),
            chapter,
            verse,
        })
    }

    pub fn matches(&self, verse: &Verse) -> bool {
        same_book(&verse.book, &self.book)
            && verse.chapter == self.chapter
            && verse.verse == self.verse
    }
}

/// Single psalm references ("Psalm 23:1") name the book "Psalms"
fn canonical_book(name: &str) -> &str {
    match name {
        "Psalm" => "Psalms",
        other => other,
    }
}

fn same_book(a: &str, b: &str) -> bool {
    canonical_book(a) == canonical_book(b)
}

/// On-disk shape accepted by [`Catalog::load_from_json`]
#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusFile {
    pub verses: Vec<Verse>,
    pub backgrounds: Vec<BackgroundImage>,
}

/// Fixed verse and background corpora plus per-type favorites.
pub struct Catalog {
    verses: Vec<Verse>,
    backgrounds: Vec<BackgroundImage>,
    verse_favorites: FavoriteSet,
    background_favorites: FavoriteSet,
}

impl Catalog {
    /// Catalog over the built-in corpus
    pub fn new() -> Self {
        Self {
            verses: builtin_verses(),
            backgrounds: builtin_backgrounds(),
            verse_favorites: FavoriteSet::new(),
            background_favorites: FavoriteSet::new(),
        }
    }

    /// Replace the corpora with the contents of a JSON corpus file.
    ///
    /// Favorites are left untouched since they are tracked independently of
    /// corpus membership.
    pub async fn load_from_json(&mut self, path: &str) -> Result<()> {
        let content = tokio::fs::read_to_string(path).await?;
        let corpus: CorpusFile = serde_json::from_str(&content)?;

        if corpus.verses.is_empty() {
            return Err(CardError::EmptyCorpus(format!("{path}: no verses")));
        }
        if corpus.backgrounds.is_empty() {
            return Err(CardError::EmptyCorpus(format!("{path}: no backgrounds")));
        }

        self.verses = corpus.verses;
        self.backgrounds = corpus.backgrounds;

        info!(
            path,
            verses = self.verses.len(),
            backgrounds = self.backgrounds.len(),
            "loaded corpus"
        );
        Ok(())
    }

    pub fn list_verses(&self) -> &[Verse] {
        &self.verses
    }

    /// Backgrounds in declaration order, optionally narrowed to one category.
    ///
    /// `None` and the `"All"` sentinel both return everything. Matching is
    /// exact and case-sensitive; an unknown category yields nothing.
    pub fn list_backgrounds(&self, category: Option<&str>) -> Vec<&BackgroundImage> {
        match category {
            None | Some(ALL_CATEGORIES) => self.backgrounds.iter().collect(),
            Some(category) => self
                .backgrounds
                .iter()
                .filter(|image| image.category == category)
                .collect(),
        }
    }

    /// Filter chips offered by the gallery, sentinel first
    pub fn categories() -> Vec<&'static str> {
        vec![ALL_CATEGORIES, "Nature", "Spiritual", "Abstract", "Sunrise", "Mountains", "Ocean"]
    }

    /// Book chips offered by the verse browser
    pub fn books() -> Vec<&'static str> {
        BIBLE_BOOKS.to_vec()
    }

    pub fn verses_in_book(&self, book: &str) -> Vec<&Verse> {
        self.verses.iter().filter(|v| same_book(&v.book, book)).collect()
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<&Verse> {
        let query_lower = query.to_lowercase();

        self.verses
            .iter()
            .filter(|verse| {
                verse.text.to_lowercase().contains(&query_lower)
                    || verse.book.to_lowercase().contains(&query_lower)
                    || verse.reference().to_lowercase().contains(&query_lower)
            })
            .take(limit)
            .collect()
    }

    /// Look up a verse by reference (e.g. "John 3:16")
    pub fn lookup(&self, reference: &str) -> Result<Option<&Verse>> {
        let parsed = VerseReference::parse(reference)?;
        Ok(self.verses.iter().find(|v| parsed.matches(v)))
    }

    pub fn verse(&self, id: &str) -> Option<&Verse> {
        self.verses.iter().find(|v| v.id == id)
    }

    pub fn background(&self, id: &str) -> Option<&BackgroundImage> {
        self.backgrounds.iter().find(|b| b.id == id)
    }

    /// Flip favorite membership, returning the new state. Never fails, even
    /// for ids outside the corpus.
    pub fn toggle_favorite(&mut self, content_type: ContentType, id: &str) -> bool {
        let now_favorite = self.favorites_mut(content_type).toggle(id);
        debug!(%content_type, id, now_favorite, "toggled favorite");
        now_favorite
    }

    pub fn is_favorite(&self, content_type: ContentType, id: &str) -> bool {
        self.favorites(content_type).contains(id)
    }

    /// Favorite ids in the order they were added
    pub fn list_favorites(&self, content_type: ContentType) -> &[String] {
        self.favorites(content_type).ids()
    }

    /// Favorited verses in corpus order
    pub fn favorite_verses(&self) -> Vec<&Verse> {
        self.verses
            .iter()
            .filter(|v| self.verse_favorites.contains(&v.id))
            .collect()
    }

    /// Favorited backgrounds in corpus order
    pub fn favorite_backgrounds(&self) -> Vec<&BackgroundImage> {
        self.backgrounds
            .iter()
            .filter(|b| self.background_favorites.contains(&b.id))
            .collect()
    }

    pub fn favorites(&self, content_type: ContentType) -> &FavoriteSet {
        match content_type {
            ContentType::Verse => &self.verse_favorites,
            ContentType::Background => &self.background_favorites,
        }
    }

    pub(crate) fn favorites_mut(&mut self, content_type: ContentType) -> &mut FavoriteSet {
        match content_type {
            ContentType::Verse => &mut self.verse_favorites,
            ContentType::Background => &mut self.background_favorites,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

const BIBLE_BOOKS: [&str; 30] = [
    "Genesis", "Exodus", "Leviticus", "Numbers", "Deuteronomy",
    "Joshua", "Judges", "Ruth", "1 Samuel", "2 Samuel",
    "Psalms", "Proverbs", "Ecclesiastes", "Isaiah", "Jeremiah",
    "Matthew", "Mark", "Luke", "John", "Acts",
    "Romans", "1 Corinthians", "2 Corinthians", "Galatians", "Ephesians",
    "Philippians", "Colossians", "1 Thessalonians", "2 Thessalonians",
    "Revelation",
];

fn verse(id: &str, book: &str, chapter: u32, verse: u32, text: &str) -> Verse {
    Verse {
        id: id.to_string(),
        book: book.to_string(),
        chapter,
        verse,
        text: text.to_string(),
    }
}

fn builtin_verses() -> Vec<Verse> {
    vec![
        verse("1", "John", 3, 16, "For God so loved the world that he gave his one and only Son, that whoever believes in him shall not perish but have eternal life."),
        verse("2", "Jeremiah", 29, 11, "For I know the plans I have for you, declares the Lord, plans to prosper you and not to harm you, to give you hope and a future."),
        verse("3", "Philippians", 4, 13, "I can do all this through him who gives me strength."),
        verse("4", "Psalm", 23, 1, "The Lord is my shepherd, I lack nothing."),
        verse("5", "Romans", 8, 28, "And we know that in all things God works for the good of those who love him, who have been called according to his purpose."),
        verse("6", "Isaiah", 40, 31, "But those who hope in the Lord will renew their strength. They will soar on wings like eagles; they will run and not grow weary, they will walk and not be faint."),
    ]
}

fn pexels(photo: u32) -> String {
    format!("https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=800")
}

fn image(id: &str, photo: u32, category: &str, title: &str) -> BackgroundImage {
    BackgroundImage {
        id: id.to_string(),
        url: pexels(photo),
        category: category.to_string(),
        title: title.to_string(),
    }
}

fn builtin_backgrounds() -> Vec<BackgroundImage> {
    vec![
        image("1", 1323550, "Nature", "Golden Sunset"),
        image("2", 1287145, "Spiritual", "Cross Silhouette"),
        image("3", 1323712, "Nature", "Mountain Vista"),
        image("4", 1366919, "Ocean", "Peaceful Waters"),
        image("5", 1591447, "Sunrise", "Dawn Light"),
        image("6", 1624496, "Abstract", "Soft Clouds"),
        image("7", 1671325, "Mountains", "Majestic Peaks"),
        image("8", 1714208, "Nature", "Forest Path"),
    ]
}
