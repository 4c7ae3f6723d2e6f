//! Check font and encoder availability.

use glyphpack_common::config::AppConfig;
use glyphpack_raster::{FontSource, GlyphRenderer, RasterConfig, Rasterizer};

pub async fn run() -> anyhow::Result<()> {
    println!("Glyphpack System Check");
    println!("{}", "=".repeat(50));

    let config = AppConfig::load();
    let font_source = match config.render.font_path.clone() {
        Some(path) => FontSource::File(path),
        None => FontSource::System {
            family: config.render.font_family.clone(),
        },
    };

    let mut rasterizer = match Rasterizer::new(RasterConfig {
        width: config.render.surface_width,
        height: config.render.surface_height,
        font_px: config.render.font_px,
        origin: (config.render.origin_x, config.render.baseline_y),
        font: font_source,
    }) {
        Ok(r) => {
            let (w, h) = r.surface_size();
            println!("[OK] Font loaded, surface {w}x{h}");
            r
        }
        Err(e) => {
            println!("[FAIL] {e}");
            println!();
            println!("No usable font. Set render.font_path in the config or pass --font to run.");
            return Ok(());
        }
    };

    // Probe one full render+capture cycle.
    rasterizer.render("⚡")?;
    let blob = rasterizer.capture_blob().await?;
    println!("[OK] PNG encoder produced {} bytes for a test glyph", blob.len());

    println!();
    println!("All capabilities are available. Glyphpack is ready.");
    Ok(())
}
