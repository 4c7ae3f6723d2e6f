//! Error types shared across Glyphpack crates.

/// Top-level error type for Glyphpack operations.
#[derive(Debug, thiserror::Error)]
pub enum GlyphpackError {
    /// The drawing or encoding primitive is missing or failed. Fatal to a
    /// run; there are no retries.
    #[error("Rendering unavailable: {message}")]
    RenderUnavailable { message: String },

    /// An archive entry name was registered twice. Catalog names are unique,
    /// so this indicates a programming error and fails fast.
    #[error("Duplicate archive entry: {name}")]
    DuplicateEntry { name: String },

    /// The glyph catalog could not be fetched or parsed. The pipeline is
    /// never constructed when this occurs.
    #[error("Catalog fetch failed: {message}")]
    CatalogFetch { message: String },

    #[error("Archive error: {message}")]
    Archive { message: String },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using GlyphpackError.
pub type GlyphpackResult<T> = Result<T, GlyphpackError>;

impl GlyphpackError {
    pub fn render_unavailable(msg: impl Into<String>) -> Self {
        Self::RenderUnavailable {
            message: msg.into(),
        }
    }

    pub fn duplicate_entry(name: impl Into<String>) -> Self {
        Self::DuplicateEntry { name: name.into() }
    }

    pub fn catalog_fetch(msg: impl Into<String>) -> Self {
        Self::CatalogFetch {
            message: msg.into(),
        }
    }

    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive {
            message: msg.into(),
        }
    }

    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
