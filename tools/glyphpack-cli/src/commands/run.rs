//! Render the catalog and write the archive.

use std::path::PathBuf;

use glyphpack_common::config::AppConfig;
use glyphpack_pipeline::{
    FileExporter, PipelineController, ProgressCallback, ARCHIVE_FILENAME,
};
use glyphpack_raster::{FontSource, RasterConfig, Rasterizer};
use humansize::{format_size, DECIMAL};

pub async fn run(
    catalog_url: Option<String>,
    catalog_file: Option<PathBuf>,
    output: Option<PathBuf>,
    font: Option<PathBuf>,
    font_family: Option<String>,
) -> anyhow::Result<()> {
    let config = AppConfig::load();

    let catalog = super::resolve_catalog(catalog_url, catalog_file, &config).await?;
    tracing::debug!(glyphs = catalog.len(), "Catalog resolved");
    println!("Rendering {} icons", catalog.len());

    let font_source = if let Some(path) = font {
        FontSource::File(path)
    } else if let Some(family) = font_family {
        FontSource::System {
            family: Some(family),
        }
    } else if let Some(path) = config.render.font_path.clone() {
        FontSource::File(path)
    } else {
        FontSource::System {
            family: config.render.font_family.clone(),
        }
    };
    let rasterizer = Rasterizer::new(RasterConfig {
        width: config.render.surface_width,
        height: config.render.surface_height,
        font_px: config.render.font_px,
        origin: (config.render.origin_x, config.render.baseline_y),
        font: font_source,
    })
    .map_err(|e| anyhow::anyhow!("Rasterizer unavailable: {e}"))?;

    let progress_cb: ProgressCallback = Box::new(|s| {
        print!(
            "\r  Rendering: {}% ({}/{}, avg {:.0}ms, ETA {:.2}s, {})  ",
            s.percent_display(),
            s.processed,
            s.total,
            s.average_ms,
            s.estimated_remaining_secs(),
            format_size(s.cumulative_bytes, DECIMAL),
        );
    });

    let mut controller =
        PipelineController::new(catalog, rasterizer).with_observer(progress_cb);
    controller.run().await?;
    println!();

    let output_dir = output.unwrap_or(config.output_dir);
    let mut exporter = FileExporter::new(&output_dir);
    controller.export(&mut exporter).await?;

    let snapshot = controller.snapshot();
    let archive_size = snapshot.archive_bytes.unwrap_or(0);
    println!(
        "Download ready: {} ({})",
        exporter.path().display(),
        format_size(archive_size, DECIMAL)
    );

    println!("Index of {ARCHIVE_FILENAME}:");
    for name in controller.archive_entry_names() {
        println!("  {name}");
    }

    Ok(())
}
