//! Document, chunk, and format-dispatch types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Supported file formats, selected by a pure function of the declared
/// content type and the original filename.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Plain text file
    PlainText,
    /// Image (routed through OCR)
    Image,
    /// CSV file
    Csv,
    /// SQLite database (.db / .sqlite)
    Sqlite,
    /// Anything else; yields no chunks
    Unsupported,
}

impl FileKind {
    /// Select the format for a file.
    ///
    /// The declared content type wins; an absent, generic, or unrecognized
    /// content type falls back to the filename extension. SQLite databases
    /// are matched by extension only (browsers report them as octet-stream).
    pub fn detect(content_type: &str, filename: &str) -> Self {
        match content_type {
            "application/pdf" => return Self::Pdf,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                return Self::Docx
            }
            "text/plain" => return Self::PlainText,
            "text/csv" => return Self::Csv,
            _ if content_type.starts_with("image/") => return Self::Image,
            _ => {}
        }

        Self::from_filename(filename)
    }

    /// Select the format from the filename extension alone
    fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();

        if lower.ends_with(".pdf") {
            Self::Pdf
        } else if lower.ends_with(".docx") {
            Self::Docx
        } else if lower.ends_with(".txt") {
            Self::PlainText
        } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") || lower.ends_with(".png") {
            Self::Image
        } else if lower.ends_with(".csv") {
            Self::Csv
        } else if lower.ends_with(".db") || lower.ends_with(".sqlite") {
            Self::Sqlite
        } else {
            Self::Unsupported
        }
    }

    /// Check if an extractor exists for this format
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::PlainText => "Text File",
            Self::Image => "Image",
            Self::Csv => "CSV",
            Self::Sqlite => "SQLite Database",
            Self::Unsupported => "Unsupported",
        }
    }
}

/// Per-extension icon shown next to sources in the chat front end
pub fn file_icon(filename: &str) -> &'static str {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "pdf" => "\u{1F4D5}",                       // 📕
        "docx" => "\u{1F4DD}",                      // 📝
        "txt" => "\u{1F4C4}",                       // 📄
        "csv" => "\u{1F4CA}",                       // 📊
        "db" | "sqlite" => "\u{1F5C4}\u{FE0F}",     // 🗄️
        "png" | "jpg" | "jpeg" => "\u{1F5BC}\u{FE0F}", // 🖼️
        _ => "\u{1F4C1}",                           // 📁
    }
}

/// A file persisted to durable storage under a generated identifier.
///
/// Immutable once written; the service never deletes it.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Generated unique identifier
    pub id: Uuid,
    /// Path on durable storage
    pub path: PathBuf,
    /// Original filename as uploaded
    pub original_filename: String,
    /// Declared content type (may be empty or generic)
    pub content_type: String,
}

/// A bounded span of source text, the unit handed to the vector index.
///
/// Carries only the original filename as its back-reference; the generated
/// file identifier is deliberately not recorded, so re-uploads under the
/// same name are indistinguishable in retrieval results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Text content, at most the configured chunk size
    pub text: String,
    /// Original filename of the source document
    pub source: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// Outcome of ingesting one file.
///
/// Unsupported format, failed extraction, and empty content all collapse to
/// `Empty`; the caller decides whether that is worth reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Ordered chunk sequence ready for indexing
    Chunks(Vec<Chunk>),
    /// Nothing to index
    Empty,
}

impl IngestOutcome {
    /// Check whether ingestion produced anything
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Extract the chunk sequence, empty on `Empty`
    pub fn into_chunks(self) -> Vec<Chunk> {
        match self {
            Self::Chunks(chunks) => chunks,
            Self::Empty => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_takes_precedence() {
        assert_eq!(FileKind::detect("application/pdf", "upload.bin"), FileKind::Pdf);
        assert_eq!(FileKind::detect("text/plain", "notes.data"), FileKind::PlainText);
        assert_eq!(FileKind::detect("text/csv", "export"), FileKind::Csv);
        assert_eq!(FileKind::detect("image/png", "scan"), FileKind::Image);
        assert_eq!(
            FileKind::detect(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                "report"
            ),
            FileKind::Docx
        );
    }

    #[test]
    fn test_extension_fallback_covers_every_format() {
        assert_eq!(FileKind::detect("", "report.pdf"), FileKind::Pdf);
        assert_eq!(FileKind::detect("", "report.docx"), FileKind::Docx);
        assert_eq!(FileKind::detect("", "notes.txt"), FileKind::PlainText);
        assert_eq!(FileKind::detect("", "scan.jpg"), FileKind::Image);
        assert_eq!(FileKind::detect("", "scan.jpeg"), FileKind::Image);
        assert_eq!(FileKind::detect("", "scan.png"), FileKind::Image);
        assert_eq!(FileKind::detect("", "table.csv"), FileKind::Csv);
        assert_eq!(FileKind::detect("", "data.db"), FileKind::Sqlite);
        assert_eq!(FileKind::detect("", "data.sqlite"), FileKind::Sqlite);
    }

    #[test]
    fn test_generic_content_type_falls_back_to_extension() {
        assert_eq!(
            FileKind::detect("application/octet-stream", "report.csv"),
            FileKind::Csv
        );
        assert_eq!(
            FileKind::detect("application/octet-stream", "stats.db"),
            FileKind::Sqlite
        );
    }

    #[test]
    fn test_unknown_inputs_are_unsupported() {
        assert_eq!(FileKind::detect("", "archive.tar.gz"), FileKind::Unsupported);
        assert_eq!(
            FileKind::detect("application/zip", "archive.zip"),
            FileKind::Unsupported
        );
        assert_eq!(FileKind::detect("", "README"), FileKind::Unsupported);
    }

    #[test]
    fn test_case_insensitive_extensions() {
        assert_eq!(FileKind::detect("", "REPORT.PDF"), FileKind::Pdf);
        assert_eq!(FileKind::detect("", "Data.SQLITE"), FileKind::Sqlite);
    }

    #[test]
    fn test_file_icons() {
        assert_eq!(file_icon("report.pdf"), "\u{1F4D5}");
        assert_eq!(file_icon("stats.db"), "\u{1F5C4}\u{FE0F}");
        assert_eq!(file_icon("mystery"), "\u{1F4C1}");
    }
}
