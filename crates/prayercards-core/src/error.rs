//! Error types for prayer card composition

use thiserror::Error;

/// Errors raised at the edges of the core: loaders, parsers, sinks and stores.
///
/// Catalog queries and draft mutations never fail; only the operations that
/// touch external collaborators or parse user-supplied strings return this.
#[derive(Error, Debug)]
pub enum CardError {
    /// The image loader could not provide data for a background reference
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// Not a `#RGB` or `#RRGGBB` color
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Verse reference did not parse as `Book C:V`
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// A loaded corpus had no verses or no backgrounds
    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    /// Config directory could not be located or a config value is unusable
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CardError>;
