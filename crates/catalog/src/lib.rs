//! Glyph catalog model and acquisition.
//!
//! A catalog is a JSON object mapping glyph names to short glyph strings
//! (usually a single emoji). It is fetched exactly once before a pipeline
//! run, and its key order is meaningful: it fixes the archive entry order
//! and drives the time-remaining estimate.

use std::path::Path;

use glyphpack_common::error::{GlyphpackError, GlyphpackResult};

/// One named glyph to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphEntry {
    /// Catalog name, unique within a catalog. Becomes `<name>.png` in the
    /// output archive.
    pub name: String,

    /// The glyph text to draw (one or more characters).
    pub glyph: String,
}

/// An ordered, immutable catalog of glyphs.
#[derive(Debug, Clone, Default)]
pub struct GlyphCatalog {
    entries: Vec<GlyphEntry>,
}

impl GlyphCatalog {
    /// Build a catalog from pre-ordered entries.
    pub fn from_entries(entries: Vec<GlyphEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from its JSON object form.
    ///
    /// Key order is preserved (serde_json is built with `preserve_order`),
    /// so iteration matches the source document.
    pub fn parse(json: &str) -> GlyphpackResult<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| GlyphpackError::catalog_fetch(format!("invalid catalog JSON: {e}")))?;

        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            let glyph = value.as_str().ok_or_else(|| {
                GlyphpackError::catalog_fetch(format!(
                    "catalog entry {name:?} is not a string glyph"
                ))
            })?;
            entries.push(GlyphEntry {
                name,
                glyph: glyph.to_string(),
            });
        }

        Ok(Self { entries })
    }

    /// Read and parse a catalog from a local JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> GlyphpackResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GlyphpackError::catalog_fetch(format!(
                "failed to read catalog file {}: {e}",
                path.display()
            ))
        })?;
        Self::parse(&content)
    }

    /// Fetch and parse a catalog from an HTTP endpoint. Called once, before
    /// the pipeline is constructed; a failure here means the run never
    /// starts.
    pub async fn fetch(url: &str) -> GlyphpackResult<Self> {
        tracing::info!(url, "Fetching glyph catalog");
        let response = reqwest::get(url)
            .await
            .map_err(|e| GlyphpackError::catalog_fetch(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(GlyphpackError::catalog_fetch(format!(
                "catalog endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GlyphpackError::catalog_fetch(format!("failed to read body: {e}")))?;

        let catalog = Self::parse(&body)?;
        tracing::info!(entries = catalog.len(), "Catalog fetched");
        Ok(catalog)
    }

    /// Number of glyphs in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &GlyphEntry> {
        self.entries.iter()
    }

    /// Entry names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let catalog =
            GlyphCatalog::parse(r#"{"zap":"⚡","apple":"🍎","100":"💯"}"#).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.names(), vec!["zap", "apple", "100"]);
        assert_eq!(catalog.iter().next().unwrap().glyph, "⚡");
    }

    #[test]
    fn test_parse_empty_object() {
        let catalog = GlyphCatalog::parse("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_string_glyph() {
        let err = GlyphCatalog::parse(r#"{"zap": 7}"#).unwrap_err();
        assert!(matches!(
            err,
            glyphpack_common::GlyphpackError::CatalogFetch { .. }
        ));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(GlyphCatalog::parse("[1,2,3]").is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = GlyphCatalog::from_file("/nonexistent/emoji.json").unwrap_err();
        assert!(matches!(
            err,
            glyphpack_common::GlyphpackError::CatalogFetch { .. }
        ));
    }
}
