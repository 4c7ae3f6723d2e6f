//! Font resolution for the rasterizer.
//!
//! A font comes either from an explicit file path or from system discovery
//! via fontdb. Either way, a failure to produce a parseable face surfaces
//! as `RenderUnavailable`: without a font there is no drawing primitive.

use std::path::PathBuf;

use glyphpack_common::error::{GlyphpackError, GlyphpackResult};
use rusttype::Font;

/// Where the rasterizer's font comes from.
#[derive(Debug, Clone)]
pub enum FontSource {
    /// Load a specific font file.
    File(PathBuf),

    /// Discover a system font, optionally preferring a named family.
    System { family: Option<String> },
}

impl Default for FontSource {
    fn default() -> Self {
        Self::System { family: None }
    }
}

/// Resolve a font source to a parsed face.
pub fn load_font(source: &FontSource) -> GlyphpackResult<Font<'static>> {
    let (data, index) = match source {
        FontSource::File(path) => {
            let data = std::fs::read(path).map_err(|e| {
                GlyphpackError::render_unavailable(format!(
                    "failed to read font file {}: {e}",
                    path.display()
                ))
            })?;
            (data, 0)
        }
        FontSource::System { family } => system_font_bytes(family.as_deref())?,
    };

    Font::try_from_vec_and_index(data, index).ok_or_else(|| {
        GlyphpackError::render_unavailable("font data could not be parsed as TTF/OTF")
    })
}

/// Query the system font database for a usable face.
fn system_font_bytes(family: Option<&str>) -> GlyphpackResult<(Vec<u8>, u32)> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let families: Vec<fontdb::Family> = match family {
        Some(name) => vec![fontdb::Family::Name(name), fontdb::Family::SansSerif],
        None => vec![fontdb::Family::SansSerif],
    };
    let query = fontdb::Query {
        families: &families,
        ..fontdb::Query::default()
    };

    let id = db.query(&query).ok_or_else(|| {
        GlyphpackError::render_unavailable(match family {
            Some(name) => format!("no system font matches family {name:?}"),
            None => "no sans-serif system font available".to_string(),
        })
    })?;

    let face = db
        .face(id)
        .ok_or_else(|| GlyphpackError::render_unavailable("selected face missing from database"))?;

    tracing::debug!(family = ?face.families.first(), index = face.index, "Resolved system font");

    let index = face.index;
    match &face.source {
        fontdb::Source::Binary(data) => Ok((data.as_ref().as_ref().to_vec(), index)),
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            let data = std::fs::read(path).map_err(|e| {
                GlyphpackError::render_unavailable(format!(
                    "failed to read font {}: {e}",
                    path.display()
                ))
            })?;
            Ok((data, index))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_file_is_render_unavailable() {
        let err = load_font(&FontSource::File(PathBuf::from("/nonexistent/face.ttf")))
            .expect_err("missing file should fail");
        assert!(matches!(err, GlyphpackError::RenderUnavailable { .. }));
    }

    #[test]
    fn test_garbage_font_data_is_render_unavailable() {
        let path = std::env::temp_dir().join("glyphpack-not-a-font.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let err = load_font(&FontSource::File(path.clone())).expect_err("garbage should fail");
        assert!(matches!(err, GlyphpackError::RenderUnavailable { .. }));

        std::fs::remove_file(path).ok();
    }
}
