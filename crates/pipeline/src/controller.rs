//! Pipeline state machine.

use std::time::Instant;

use glyphpack_archive::ArchiveBuilder;
use glyphpack_catalog::{GlyphCatalog, GlyphEntry};
use glyphpack_common::error::{GlyphpackError, GlyphpackResult};
use glyphpack_raster::GlyphRenderer;

use crate::export::{ArchiveDownload, DownloadExporter, ARCHIVE_CONTENT_TYPE, ARCHIVE_FILENAME};
use crate::progress::{ProgressAccumulator, ProgressSnapshot};

/// Observer invoked with a fresh snapshot after every completed item and
/// once more after finalization.
pub type ProgressCallback = Box<dyn Fn(ProgressSnapshot) + Send>;

/// Pipeline lifecycle.
///
/// `Done` is terminal: export is armed and start is permanently disarmed.
/// Leaving the machine in `Finalizing`/`Done` is also the barrier against
/// further archive mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing processed, start armed.
    Idle,
    /// Exactly one entry in flight at a time.
    Running,
    /// All entries processed, archive encoding in progress.
    Finalizing,
    /// Archive materialized, download armed.
    Done,
}

/// Drives the render → capture → archive → record sequence over a catalog.
pub struct PipelineController<R> {
    catalog: GlyphCatalog,
    renderer: R,
    archive: ArchiveBuilder,
    progress: ProgressAccumulator,
    state: PipelineState,
    observer: Option<ProgressCallback>,
    archive_bytes: Option<u64>,
    entry_names: Vec<String>,
}

impl<R: GlyphRenderer> PipelineController<R> {
    /// Create a controller over a fetched catalog and a ready renderer.
    pub fn new(catalog: GlyphCatalog, renderer: R) -> Self {
        let total = catalog.len();
        Self {
            catalog,
            renderer,
            archive: ArchiveBuilder::new(),
            progress: ProgressAccumulator::new(total),
            state: PipelineState::Idle,
            observer: None,
            archive_bytes: None,
            entry_names: Vec::new(),
        }
    }

    /// Attach a progress observer.
    pub fn with_observer(mut self, observer: ProgressCallback) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Read-only progress snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.progress
            .snapshot(self.state == PipelineState::Done, self.archive_bytes)
    }

    /// Archive entry names in catalog order.
    pub fn archive_entry_names(&self) -> &[String] {
        &self.entry_names
    }

    /// Process the whole catalog, then finalize the archive.
    ///
    /// Invoked once; a start request in any state past `Idle` is ignored.
    /// The loop never overlaps render/capture cycles: the shared surface is
    /// a single mutable resource, and each capture is awaited before the
    /// next render is issued. Any renderer failure aborts the run in
    /// `Running` with no partial archive exposed.
    pub async fn run(&mut self) -> GlyphpackResult<()> {
        if self.state != PipelineState::Idle {
            tracing::warn!(state = ?self.state, "Ignoring re-entrant start request");
            return Ok(());
        }
        self.state = PipelineState::Running;

        let entries: Vec<GlyphEntry> = self.catalog.iter().cloned().collect();
        tracing::info!(entries = entries.len(), "Starting render pipeline");

        for entry in &entries {
            let started = Instant::now();

            self.renderer.render(&entry.glyph)?;
            let blob = self.renderer.capture_blob().await?;

            let size = blob.len() as u64;
            let entry_name = format!("{}.png", entry.name);
            self.archive.add_entry(&entry_name, blob)?;
            self.entry_names.push(entry_name);

            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            self.progress.record(elapsed_ms, size);
            self.publish();
        }

        self.state = PipelineState::Finalizing;
        let bytes = self.archive.finalize().await?;
        self.archive_bytes = Some(bytes.len() as u64);
        self.state = PipelineState::Done;

        tracing::info!(
            items = entries.len(),
            archive_bytes = bytes.len(),
            total_ms = self.progress.cumulative_elapsed_ms(),
            "Pipeline finished"
        );
        self.publish();
        Ok(())
    }

    /// Hand the memoized archive to an exporter.
    ///
    /// Blocked until `Done`: before that the download action is disarmed
    /// and the exporter is never invoked. The internal finalize call is a
    /// cache hit.
    pub async fn export(&mut self, exporter: &mut dyn DownloadExporter) -> GlyphpackResult<()> {
        if self.state != PipelineState::Done {
            return Err(GlyphpackError::pipeline(
                "archive not ready: pipeline has not finished",
            ));
        }

        let data = self.archive.finalize().await?;
        let download = ArchiveDownload {
            filename: ARCHIVE_FILENAME,
            content_type: ARCHIVE_CONTENT_TYPE,
            data,
        };
        tracing::info!(exporter = exporter.name(), "Delivering archive");
        exporter.deliver(&download)
    }

    fn publish(&self) {
        if let Some(observer) = &self.observer {
            observer(self.snapshot());
        }
    }
}
