//! Show catalog information.

use std::path::PathBuf;

use glyphpack_common::config::AppConfig;

pub async fn run(catalog_url: Option<String>, catalog_file: Option<PathBuf>) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let catalog = super::resolve_catalog(catalog_url, catalog_file, &config).await?;

    println!("Catalog: {} glyphs", catalog.len());
    println!(
        "  Surface: {}x{} @ {}px",
        config.render.surface_width, config.render.surface_height, config.render.font_px
    );
    println!();

    for entry in catalog.iter() {
        println!("  {}  {}.png", entry.glyph, entry.name);
    }

    Ok(())
}
