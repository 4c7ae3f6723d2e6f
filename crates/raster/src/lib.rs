//! Glyph rasterization onto a single shared surface.
//!
//! There is exactly one drawing surface per rasterizer, reused for every
//! glyph. Callers must serialize `render` + `capture_blob` pairs: a second
//! `render` before the previous capture resolves would clobber the surface.
//! The pipeline controller guarantees this by awaiting each capture before
//! moving on.

pub mod font;

use std::io::Cursor;

use glyphpack_common::error::{GlyphpackError, GlyphpackResult};
use image::{ImageFormat, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

pub use font::FontSource;

/// Rasterizer construction parameters.
#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// Surface width in pixels.
    pub width: u32,

    /// Surface height in pixels.
    pub height: u32,

    /// Font size in pixels.
    pub font_px: f32,

    /// Draw origin: horizontal offset and baseline position.
    pub origin: (f32, f32),

    /// Font to draw with.
    pub font: FontSource,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            font_px: 54.0,
            origin: (6.0, 54.0),
            font: FontSource::default(),
        }
    }
}

/// Seam between the pipeline and a rendering backend.
///
/// Production code uses [`Rasterizer`]; tests script a fake.
pub trait GlyphRenderer {
    /// Clear the shared surface and draw `text` at the fixed origin.
    fn render(&mut self, text: &str) -> GlyphpackResult<()>;

    /// Encode the current surface contents to a PNG blob.
    fn capture_blob(&mut self) -> impl std::future::Future<Output = GlyphpackResult<Vec<u8>>>;
}

/// Draws glyph text into a fixed-size RGBA surface and encodes PNG blobs.
#[derive(Debug)]
pub struct Rasterizer {
    font: Font<'static>,
    scale: Scale,
    origin: (f32, f32),
    surface: RgbaImage,
}

impl Rasterizer {
    /// Create a rasterizer, resolving and parsing the configured font.
    ///
    /// Fails with `RenderUnavailable` when no usable font can be loaded.
    pub fn new(config: RasterConfig) -> GlyphpackResult<Self> {
        let font = font::load_font(&config.font)?;
        Ok(Self {
            font,
            scale: Scale::uniform(config.font_px),
            origin: config.origin,
            surface: RgbaImage::new(config.width, config.height),
        })
    }

    /// Surface dimensions in pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface.dimensions()
    }
}

impl GlyphRenderer for Rasterizer {
    fn render(&mut self, text: &str) -> GlyphpackResult<()> {
        // Reset to fully transparent.
        for pixel in self.surface.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }

        let (width, height) = self.surface.dimensions();
        let origin = point(self.origin.0, self.origin.1);

        for glyph in self.font.layout(text, self.scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let alpha = (coverage * 255.0).round() as u8;
                let existing = self.surface.get_pixel(px as u32, py as u32).0[3];
                if alpha > existing {
                    self.surface
                        .put_pixel(px as u32, py as u32, Rgba([0, 0, 0, alpha]));
                }
            });
        }

        Ok(())
    }

    async fn capture_blob(&mut self) -> GlyphpackResult<Vec<u8>> {
        // PNG encoding is the slow half of the cycle; push it off the
        // cooperative thread. The surface snapshot is small (w*h*4 bytes).
        let frame = self.surface.clone();
        tokio::task::spawn_blocking(move || encode_png(&frame))
            .await
            .map_err(|e| {
                GlyphpackError::render_unavailable(format!("PNG encoder task failed: {e}"))
            })?
    }
}

fn encode_png(frame: &RgbaImage) -> GlyphpackResult<Vec<u8>> {
    let mut out = Vec::new();
    frame
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| GlyphpackError::render_unavailable(format!("PNG encoding failed: {e}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn test_default_config_dimensions() {
        let config = RasterConfig::default();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 64);
        assert!((config.font_px - 54.0).abs() < f32::EPSILON);
        assert_eq!(config.origin, (6.0, 54.0));
    }

    #[test]
    fn test_encode_png_produces_valid_header() {
        let frame = RgbaImage::new(64, 64);
        let blob = encode_png(&frame).unwrap();
        assert_eq!(&blob[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_encode_png_size_varies_with_content() {
        let blank = RgbaImage::new(64, 64);
        let mut noisy = RgbaImage::new(64, 64);
        for (x, y, pixel) in noisy.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 0, 255]);
        }
        let blank_blob = encode_png(&blank).unwrap();
        let noisy_blob = encode_png(&noisy).unwrap();
        assert!(noisy_blob.len() > blank_blob.len());
    }

    #[test]
    fn test_missing_font_fails_construction() {
        let config = RasterConfig {
            font: FontSource::File("/nonexistent/face.ttf".into()),
            ..RasterConfig::default()
        };
        let err = Rasterizer::new(config).expect_err("construction should fail");
        assert!(matches!(
            err,
            glyphpack_common::GlyphpackError::RenderUnavailable { .. }
        ));
    }
}
