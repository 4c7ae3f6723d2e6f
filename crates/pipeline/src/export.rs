//! Archive delivery.

use std::path::PathBuf;
use std::sync::Arc;

use glyphpack_common::error::{GlyphpackError, GlyphpackResult};

/// Fixed download filename.
pub const ARCHIVE_FILENAME: &str = "emojis.zip";

/// Fixed archive content type.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// A finalized archive ready to hand to an exporter.
#[derive(Debug, Clone)]
pub struct ArchiveDownload {
    pub filename: &'static str,
    pub content_type: &'static str,

    /// The memoized archive bytes, shared read-only.
    pub data: Arc<Vec<u8>>,
}

/// Trait for download destinations (file system, HTTP response, etc.).
pub trait DownloadExporter {
    /// Deliver the finalized archive.
    fn deliver(&mut self, download: &ArchiveDownload) -> GlyphpackResult<()>;

    /// Destination name for logs.
    fn name(&self) -> &str;
}

/// Writes the archive into a target directory.
#[derive(Debug, Clone)]
pub struct FileExporter {
    output_dir: PathBuf,
}

impl FileExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Where the archive will be written.
    pub fn path(&self) -> PathBuf {
        self.output_dir.join(ARCHIVE_FILENAME)
    }
}

impl DownloadExporter for FileExporter {
    fn deliver(&mut self, download: &ArchiveDownload) -> GlyphpackResult<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(download.filename);
        std::fs::write(&path, download.data.as_slice()).map_err(|e| {
            GlyphpackError::archive(format!("failed to write {}: {e}", path.display()))
        })?;
        tracing::info!(
            path = %path.display(),
            bytes = download.data.len(),
            content_type = download.content_type,
            "Archive exported"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_exporter_writes_archive() {
        let dir = std::env::temp_dir().join("glyphpack-export-test");
        std::fs::remove_dir_all(&dir).ok();

        let mut exporter = FileExporter::new(&dir);
        let download = ArchiveDownload {
            filename: ARCHIVE_FILENAME,
            content_type: ARCHIVE_CONTENT_TYPE,
            data: Arc::new(vec![1, 2, 3, 4]),
        };
        exporter.deliver(&download).unwrap();

        let written = std::fs::read(dir.join(ARCHIVE_FILENAME)).unwrap();
        assert_eq!(written, vec![1, 2, 3, 4]);
        assert_eq!(exporter.path(), dir.join("emojis.zip"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_exporter_path_uses_fixed_filename() {
        let exporter = FileExporter::new("/tmp/out");
        assert!(exporter.path().ends_with("emojis.zip"));
    }
}
