//! Attachment tracking and inline payload encoding

use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Attachments at or above this size are left out of the outgoing payload
pub const INLINE_SIZE_LIMIT: u64 = 5_242_880;

/// Extensions accepted by the attach prompt
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "jpg", "jpeg", "png", "gif"];

/// Metadata plus a filesystem handle for one user-selected file.
///
/// Records live only for the current session; they are never persisted.
#[derive(Debug, Clone)]
pub struct AttachmentRecord {
    pub id: Uuid,
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

/// In-memory list of selected attachments
#[derive(Default)]
pub struct AttachmentList {
    records: Vec<AttachmentRecord>,
}

impl AttachmentList {
    /// Append records for each selected path. Selections accumulate across
    /// calls and are not de-duplicated. Paths with a disallowed extension
    /// or unreadable metadata are skipped.
    pub fn add_files(&mut self, paths: &[PathBuf]) -> usize {
        let mut added = 0;
        for path in paths {
            if !has_allowed_extension(path) {
                tracing::warn!("skipping {}: extension not allowed", path.display());
                continue;
            }
            let size = match std::fs::metadata(path) {
                Ok(meta) => meta.len(),
                Err(e) => {
                    tracing::warn!("skipping {}: {e}", path.display());
                    continue;
                }
            };
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            self.records.push(AttachmentRecord {
                id: Uuid::new_v4(),
                name,
                size,
                path: path.clone(),
            });
            added += 1;
        }
        added
    }

    /// Drop the record with the given id; no-op when absent
    pub fn remove(&mut self, id: Uuid) {
        self.records.retain(|r| r.id != id);
    }

    pub fn records(&self) -> &[AttachmentRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Destroy all records, after a successful submission
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
}

/// Human-readable byte count: base-1024, two decimals, trailing zeros trimmed
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exp = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exp as i32);
    let mut formatted = format!("{value:.2}");
    if formatted.contains('.') {
        while formatted.ends_with('0') {
            formatted.pop();
        }
        if formatted.ends_with('.') {
            formatted.pop();
        }
    }
    format!("{} {}", formatted, UNITS[exp])
}

/// One attachment ready for transmission
#[derive(Debug, Clone, Serialize)]
pub struct EncodedAttachment {
    pub name: String,
    pub content_type: String,
    /// Base64 of the full file content, no data-URI prefix
    pub content: String,
}

/// Strategy for turning selected files into transmittable payloads
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentEncoder: Send + Sync {
    async fn prepare(&self, records: &[AttachmentRecord]) -> Vec<EncodedAttachment>;
}

/// Reads files under the size limit and base64-encodes them inline.
///
/// Files are read one at a time; oversized or unreadable files are
/// dropped without failing the submission.
pub struct InlineEncoder;

#[async_trait]
impl AttachmentEncoder for InlineEncoder {
    async fn prepare(&self, records: &[AttachmentRecord]) -> Vec<EncodedAttachment> {
        let mut encoded = Vec::new();
        for record in records {
            if record.size >= INLINE_SIZE_LIMIT {
                tracing::debug!(
                    "excluding {} from payload ({} over inline limit)",
                    record.name,
                    format_size(record.size)
                );
                continue;
            }
            match tokio::fs::read(&record.path).await {
                Ok(bytes) => encoded.push(EncodedAttachment {
                    name: record.name.clone(),
                    content_type: content_type_for(&record.name).to_string(),
                    content: base64::engine::general_purpose::STANDARD.encode(bytes),
                }),
                Err(e) => {
                    tracing::warn!("failed to read attachment {}: {e}", record.name);
                }
            }
        }
        encoded
    }
}

fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_size_zero() {
        assert_eq!(format_size(0), "0 Bytes");
    }

    #[test]
    fn test_format_size_whole_units() {
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1_048_576), "1 MB");
        assert_eq!(format_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn test_format_size_fractional() {
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(100), "100 Bytes");
        assert_eq!(format_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn test_add_files_accumulates() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("brief.pdf");
        let second = dir.path().join("photo.png");
        fs::write(&first, b"pdf bytes").unwrap();
        fs::write(&second, b"png bytes!").unwrap();

        let mut list = AttachmentList::default();
        assert_eq!(list.add_files(&[first]), 1);
        assert_eq!(list.add_files(&[second]), 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list.records()[0].name, "brief.pdf");
        assert_eq!(list.records()[0].size, 9);
        assert_eq!(list.records()[1].name, "photo.png");
    }

    #[test]
    fn test_add_files_rejects_disallowed_extension() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("run.sh");
        fs::write(&script, b"#!/bin/sh").unwrap();

        let mut list = AttachmentList::default();
        assert_eq!(list.add_files(&[script]), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_files_extension_check_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let upper = dir.path().join("SCAN.PDF");
        fs::write(&upper, b"x").unwrap();

        let mut list = AttachmentList::default();
        assert_eq!(list.add_files(&[upper]), 1);
    }

    #[test]
    fn test_add_files_skips_missing_file() {
        let mut list = AttachmentList::default();
        assert_eq!(list.add_files(&[PathBuf::from("/no/such/file.pdf")]), 0);
    }

    #[test]
    fn test_remove_by_id() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("brief.pdf");
        fs::write(&file, b"x").unwrap();

        let mut list = AttachmentList::default();
        list.add_files(&[file]);
        let id = list.records()[0].id;
        list.remove(id);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("brief.pdf");
        fs::write(&file, b"x").unwrap();

        let mut list = AttachmentList::default();
        list.add_files(&[file]);
        list.remove(Uuid::new_v4());
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn test_inline_encoder_encodes_small_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("brief.pdf");
        fs::write(&file, b"hello attachment").unwrap();

        let record = AttachmentRecord {
            id: Uuid::new_v4(),
            name: "brief.pdf".to_string(),
            size: 16,
            path: file,
        };

        let encoded = InlineEncoder.prepare(&[record]).await;
        assert_eq!(encoded.len(), 1);
        assert_eq!(encoded[0].name, "brief.pdf");
        assert_eq!(encoded[0].content_type, "application/pdf");
        assert_eq!(
            base64::engine::general_purpose::STANDARD
                .decode(&encoded[0].content)
                .unwrap(),
            b"hello attachment"
        );
    }

    #[tokio::test]
    async fn test_inline_encoder_excludes_oversized_file() {
        let dir = tempdir().unwrap();
        let small = dir.path().join("small.png");
        fs::write(&small, vec![0u8; 100]).unwrap();

        let records = vec![
            AttachmentRecord {
                id: Uuid::new_v4(),
                name: "small.png".to_string(),
                size: 100,
                path: small,
            },
            // The size check runs before any read, so the path is never touched
            AttachmentRecord {
                id: Uuid::new_v4(),
                name: "huge.pdf".to_string(),
                size: 6_000_000,
                path: PathBuf::from("/never/read.pdf"),
            },
        ];

        let encoded = InlineEncoder.prepare(&records).await;
        assert_eq!(encoded.len(), 1);
        assert_eq!(encoded[0].name, "small.png");
    }

    #[tokio::test]
    async fn test_inline_encoder_drops_unreadable_file() {
        let record = AttachmentRecord {
            id: Uuid::new_v4(),
            name: "gone.pdf".to_string(),
            size: 10,
            path: PathBuf::from("/no/such/gone.pdf"),
        };

        let encoded = InlineEncoder.prepare(&[record]).await;
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("a.pdf"), "application/pdf");
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.gif"), "image/gif");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
