//! The card being edited and the operations that change it
//!
//! A [`Composer`] owns exactly one [`CardDraft`]. Every mutation is total:
//! there is no input that leaves the draft unrenderable, and the only
//! guarded field is the font size, which clamps instead of failing.

use crate::catalog::{BackgroundImage, Verse};
use crate::render::RenderedCard;
use crate::style::{FontColor, FontFamily, StyleOptions, FONT_SIZE_STEP};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_SCRIPTURE_TEXT: &str = "For I know the plans I have for you, declares the Lord...";
pub const DEFAULT_MESSAGE_TEXT: &str = "Trust in His perfect timing and plan for your life.";
pub const DEFAULT_BACKGROUND_URL: &str =
    "https://images.pexels.com/photos/1323550/pexels-photo-1323550.jpeg?auto=compress&cs=tinysrgb&w=800";

/// Where the card background comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackgroundRef {
    /// A catalog image, remembered by id and url
    Image { id: String, url: String },
    /// A raw resource locator with no catalog entry
    Url { url: String },
}

impl BackgroundRef {
    pub fn url(&self) -> &str {
        match self {
            BackgroundRef::Image { url, .. } | BackgroundRef::Url { url } => url,
        }
    }

    pub fn image_id(&self) -> Option<&str> {
        match self {
            BackgroundRef::Image { id, .. } => Some(id),
            BackgroundRef::Url { .. } => None,
        }
    }
}

impl From<&BackgroundImage> for BackgroundRef {
    fn from(image: &BackgroundImage) -> Self {
        BackgroundRef::Image {
            id: image.id.clone(),
            url: image.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraft {
    pub scripture_text: String,
    pub message_text: String,
    pub background: BackgroundRef,
    pub style: StyleOptions,
}

impl CardDraft {
    pub fn with_style(style: StyleOptions) -> Self {
        Self {
            scripture_text: DEFAULT_SCRIPTURE_TEXT.to_string(),
            message_text: DEFAULT_MESSAGE_TEXT.to_string(),
            background: BackgroundRef::Url {
                url: DEFAULT_BACKGROUND_URL.to_string(),
            },
            style,
        }
    }
}

impl Default for CardDraft {
    fn default() -> Self {
        Self::with_style(StyleOptions::default())
    }
}

/// Holds the live draft for one editing session
#[derive(Debug, Clone, Default)]
pub struct Composer {
    draft: CardDraft,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session whose draft uses `style` instead of the stock style
    pub fn with_style(style: StyleOptions) -> Self {
        Self {
            draft: CardDraft::with_style(style),
        }
    }

    pub fn from_draft(draft: CardDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &CardDraft {
        &self.draft
    }

    /// Discard the current draft and begin a fresh one
    pub fn reset(&mut self, style: StyleOptions) {
        debug!("draft reset");
        self.draft = CardDraft::with_style(style);
    }

    /// Copy a verse's text into the scripture field. Unsaved scripture edits
    /// are overwritten; nothing else changes.
    pub fn seed_from_verse(&mut self, verse: &Verse) {
        debug!(verse_id = %verse.id, reference = %verse.reference(), "seeded scripture from verse");
        self.draft.scripture_text = verse.text.clone();
    }

    pub fn set_scripture_text(&mut self, text: impl Into<String>) {
        self.draft.scripture_text = text.into();
    }

    pub fn set_message_text(&mut self, text: impl Into<String>) {
        self.draft.message_text = text.into();
    }

    /// Use a catalog image, regardless of any category filter in effect
    pub fn select_background(&mut self, image: &BackgroundImage) {
        debug!(image_id = %image.id, "selected background");
        self.draft.background = BackgroundRef::from(image);
    }

    pub fn select_background_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        debug!(%url, "selected background url");
        self.draft.background = BackgroundRef::Url { url };
    }

    pub fn set_font(&mut self, family: FontFamily) {
        debug!(%family, "set font family");
        self.draft.style.font_family = family;
    }

    pub fn set_font_color(&mut self, color: FontColor) {
        debug!(%color, "set font color");
        self.draft.style.font_color = color;
    }

    /// Apply `delta` to the font size, clamped to the supported range.
    /// Returns the resulting size.
    pub fn adjust_font_size(&mut self, delta: i32) -> i32 {
        let current = self.draft.style.font_size_pt();
        let size = self.draft.style.set_font_size(current.saturating_add(delta));
        debug!(delta, size, "adjusted font size");
        size
    }

    pub fn step_font_size_up(&mut self) -> i32 {
        self.adjust_font_size(FONT_SIZE_STEP)
    }

    pub fn step_font_size_down(&mut self) -> i32 {
        self.adjust_font_size(-FONT_SIZE_STEP)
    }

    pub fn render(&self) -> RenderedCard {
        RenderedCard::from_draft(&self.draft)
    }
}
