pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod export;
pub mod favorites;
pub mod persistence;
pub mod render;
pub mod session;
pub mod style;

// Re-export main types for convenience
pub use catalog::{BackgroundImage, Catalog, Verse, VerseReference, ALL_CATEGORIES};
pub use config::Config;
pub use draft::{BackgroundRef, CardDraft, Composer};
pub use error::{CardError, Result};
pub use export::{
    ExportReceipt, ExportSink, FileImageLoader, HttpImageLoader, ImageData, ImageLoader, JsonFileSink,
    MemorySink,
};
pub use favorites::{ContentType, FavoriteSet};
pub use persistence::{JsonFileStore, KeyValueStore, MemoryStore};
pub use render::{Gradient, Layer, RenderedCard, TextAlign, TextBlock};
pub use session::{Session, SharedSession};
pub use style::{FontColor, FontFamily, StyleOptions};
