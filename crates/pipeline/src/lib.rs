//! Glyphpack pipeline: drives render, encode, archive, and export.
//!
//! The controller walks the catalog in order, one glyph at a time: render
//! onto the shared surface, await the PNG capture, fold the result into the
//! archive and the progress accumulator, then publish a snapshot to the
//! observer. After the loop it finalizes the archive once and arms export.

pub mod controller;
pub mod export;
pub mod progress;

pub use controller::{PipelineController, PipelineState, ProgressCallback};
pub use export::{
    ArchiveDownload, DownloadExporter, FileExporter, ARCHIVE_CONTENT_TYPE, ARCHIVE_FILENAME,
};
pub use progress::{ProgressAccumulator, ProgressSnapshot};
