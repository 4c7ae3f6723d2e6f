//! Append-only archive building with memoized finalization.
//!
//! Entries accumulate in insertion order; `finalize` encodes the zip exactly
//! once and caches the bytes in a write-once cell. Archive encoding is the
//! single most expensive step of a run and the archive may be exported more
//! than once, so every call after the first is a cache hit returning the
//! identical bytes.

use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::sync::Arc;

use glyphpack_common::error::{GlyphpackError, GlyphpackResult};
use once_cell::sync::OnceCell;

/// Accumulates named binary entries and produces one zip blob.
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    entries: Vec<(String, Vec<u8>)>,
    names: HashSet<String>,
    encoded: OnceCell<Arc<Vec<u8>>>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one named entry.
    ///
    /// Duplicate names are rejected: catalog names are unique, so a repeat
    /// is a programming error and silently overwriting would corrupt the
    /// archive. Adding after `finalize` is likewise rejected; the archive
    /// is immutable once encoded.
    pub fn add_entry(&mut self, name: &str, bytes: Vec<u8>) -> GlyphpackResult<()> {
        if self.encoded.get().is_some() {
            return Err(GlyphpackError::archive(format!(
                "cannot add {name:?}: archive already finalized"
            )));
        }
        if !self.names.insert(name.to_string()) {
            return Err(GlyphpackError::duplicate_entry(name));
        }
        self.entries.push((name.to_string(), bytes));
        Ok(())
    }

    /// Number of registered entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Entry names in insertion order.
    ///
    /// Available until the first `finalize`, which consumes the staged
    /// entries into the encoded blob.
    pub fn entry_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Whether the archive bytes have been materialized.
    pub fn is_finalized(&self) -> bool {
        self.encoded.get().is_some()
    }

    /// Encode the archive, or return the previously encoded bytes.
    ///
    /// The first call moves the staged entries into a blocking encode task;
    /// every subsequent call returns the cached blob unchanged.
    pub async fn finalize(&mut self) -> GlyphpackResult<Arc<Vec<u8>>> {
        if let Some(bytes) = self.encoded.get() {
            return Ok(bytes.clone());
        }

        let entries = std::mem::take(&mut self.entries);
        let count = entries.len();
        let bytes = tokio::task::spawn_blocking(move || encode_zip(entries))
            .await
            .map_err(|e| GlyphpackError::archive(format!("zip encoder task failed: {e}")))??;

        tracing::info!(entries = count, bytes = bytes.len(), "Archive encoded");

        let bytes = Arc::new(bytes);
        // A concurrent first finalize cannot happen (&mut self), but the
        // cell still enforces write-once.
        self.encoded.set(bytes.clone()).ok();
        Ok(bytes)
    }
}

fn encode_zip(entries: Vec<(String, Vec<u8>)>) -> GlyphpackResult<Vec<u8>> {
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        writer
            .start_file(name.clone(), options)
            .map_err(|e| GlyphpackError::archive(format!("failed to start entry {name:?}: {e}")))?;
        writer
            .write_all(&bytes)
            .map_err(|e| GlyphpackError::archive(format!("failed to write entry {name:?}: {e}")))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| GlyphpackError::archive(format!("failed to finish archive: {e}")))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reopen(bytes: &[u8]) -> zip::ZipArchive<Cursor<&[u8]>> {
        zip::ZipArchive::new(Cursor::new(bytes)).expect("archive should reopen")
    }

    #[tokio::test]
    async fn test_entries_round_trip_in_order() {
        let mut builder = ArchiveBuilder::new();
        builder.add_entry("zap.png", vec![1, 2, 3]).unwrap();
        builder.add_entry("apple.png", vec![4, 5]).unwrap();
        assert_eq!(builder.entry_names(), vec!["zap.png", "apple.png"]);

        let bytes = builder.finalize().await.unwrap();
        let mut archive = reopen(&bytes);
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0).unwrap().name(), "zap.png");
        assert_eq!(archive.by_index(1).unwrap().name(), "apple.png");
    }

    #[tokio::test]
    async fn test_duplicate_entry_rejected() {
        let mut builder = ArchiveBuilder::new();
        builder.add_entry("zap.png", vec![1]).unwrap();
        let err = builder.add_entry("zap.png", vec![2]).unwrap_err();
        assert!(matches!(
            err,
            GlyphpackError::DuplicateEntry { ref name } if name == "zap.png"
        ));
        assert_eq!(builder.entry_count(), 1);
    }

    #[tokio::test]
    async fn test_finalize_is_memoized() {
        let mut builder = ArchiveBuilder::new();
        builder.add_entry("zap.png", vec![0; 128]).unwrap();

        let first = builder.finalize().await.unwrap();
        let second = builder.finalize().await.unwrap();

        // Cache hit: same allocation, bit-identical bytes, no re-encode.
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[tokio::test]
    async fn test_add_after_finalize_rejected() {
        let mut builder = ArchiveBuilder::new();
        builder.add_entry("zap.png", vec![1]).unwrap();
        builder.finalize().await.unwrap();

        let err = builder.add_entry("late.png", vec![2]).unwrap_err();
        assert!(matches!(err, GlyphpackError::Archive { .. }));

        // A finalize after the usage error still returns the cached blob.
        let bytes = builder.finalize().await.unwrap();
        assert_eq!(reopen(&bytes).len(), 1);
    }

    #[tokio::test]
    async fn test_empty_archive_is_loadable() {
        let mut builder = ArchiveBuilder::new();
        let bytes = builder.finalize().await.unwrap();
        assert_eq!(reopen(&bytes).len(), 0);
    }
}
