//! Projection of a draft into a displayable layer stack
//!
//! Rendering never mutates the draft and never touches image data. The same
//! draft always yields an equal [`RenderedCard`].

use crate::draft::CardDraft;
use crate::error::{CardError, Result};
use crate::export::ImageLoader;
use crate::style::{FontColor, FontFamily};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Darkening applied between the background and the text, top to bottom
pub const SCRIM_TOP: &str = "rgba(0,0,0,0.3)";
pub const SCRIM_BOTTOM: &str = "rgba(0,0,0,0.6)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub top: String,
    pub bottom: String,
}

impl Gradient {
    pub fn scrim() -> Self {
        Self {
            top: SCRIM_TOP.to_string(),
            bottom: SCRIM_BOTTOM.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub font_family: FontFamily,
    pub font_size_pt: i32,
    pub color: FontColor,
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum Layer {
    Background { url: String },
    Scrim(Gradient),
    Scripture(TextBlock),
    Message(TextBlock),
}

/// The resolved visual tree of a card, bottom layer first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedCard {
    pub layers: Vec<Layer>,
}

impl RenderedCard {
    pub fn from_draft(draft: &CardDraft) -> Self {
        Self::compose(draft, draft.background.url().to_string())
    }

    fn compose(draft: &CardDraft, background_url: String) -> Self {
        let style = &draft.style;
        let block = |text: String, font_size_pt: i32| TextBlock {
            text,
            font_family: style.font_family.clone(),
            font_size_pt,
            color: style.font_color.clone(),
            align: TextAlign::Center,
        };

        Self {
            layers: vec![
                Layer::Background { url: background_url },
                Layer::Scrim(Gradient::scrim()),
                Layer::Scripture(block(
                    format!("\"{}\"", draft.scripture_text),
                    style.font_size_pt(),
                )),
                Layer::Message(block(draft.message_text.clone(), style.message_font_size())),
            ],
        }
    }

    /// Render after checking the background with `loader`. An unavailable
    /// background is swapped for `placeholder_url`; any other loader error
    /// is returned as is.
    pub fn render_with(
        draft: &CardDraft,
        loader: &dyn ImageLoader,
        placeholder_url: &str,
    ) -> Result<Self> {
        let url = draft.background.url();
        match loader.load(url) {
            Ok(_) => Ok(Self::from_draft(draft)),
            Err(CardError::ResourceUnavailable(reason)) => {
                warn!(%url, %reason, placeholder = placeholder_url, "background unavailable, using placeholder");
                Ok(Self::compose(draft, placeholder_url.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    pub fn background_url(&self) -> Option<&str> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Background { url } => Some(url.as_str()),
            _ => None,
        })
    }

    pub fn scripture(&self) -> Option<&TextBlock> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Scripture(block) => Some(block),
            _ => None,
        })
    }

    pub fn message(&self) -> Option<&TextBlock> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Message(block) => Some(block),
            _ => None,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
