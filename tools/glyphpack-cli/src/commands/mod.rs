pub mod check;
pub mod info;
pub mod run;

use std::path::PathBuf;

use glyphpack_catalog::GlyphCatalog;
use glyphpack_common::config::AppConfig;

/// Resolve the catalog from a local file, an explicit URL, or the
/// configured default, in that order. Fetched exactly once per invocation.
pub async fn resolve_catalog(
    catalog_url: Option<String>,
    catalog_file: Option<PathBuf>,
    config: &AppConfig,
) -> anyhow::Result<GlyphCatalog> {
    if let Some(path) = catalog_file {
        return GlyphCatalog::from_file(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load catalog: {e}"));
    }

    let url = catalog_url
        .or_else(|| config.catalog.url.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("No catalog source: pass --catalog-url or --catalog-file")
        })?;

    GlyphCatalog::fetch(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to fetch catalog: {e}"))
}
