//! Per-format text extraction

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::providers::ocr::OcrProvider;
use crate::types::FileKind;

use super::table::TextTable;

/// Run the extractor for a format against a stored file.
///
/// `Unsupported` yields an empty string rather than an error; the pipeline
/// treats both the same way.
pub fn extract(kind: &FileKind, path: &Path, ocr: &dyn OcrProvider) -> Result<String> {
    match kind {
        FileKind::Pdf => extract_pdf(path),
        FileKind::Docx => extract_docx(path),
        FileKind::PlainText => extract_plain_text(path),
        FileKind::Image => extract_image(path, ocr),
        FileKind::Csv => extract_csv(path),
        FileKind::Sqlite => extract_sqlite(path),
        FileKind::Unsupported => Ok(String::new()),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Extract visible text from every PDF page in page order.
///
/// Each page's text is followed by a line break; pages with no extractable
/// text contribute only the separator, so page positions stay visible.
fn extract_pdf(path: &Path) -> Result<String> {
    let data = fs::read(path)?;
    let pages = pdf_extract::extract_text_from_mem_by_pages(&data)
        .map_err(|e| Error::extraction(display_name(path), e.to_string()))?;

    let mut content = String::new();
    for page in pages {
        content.push_str(&page);
        content.push('\n');
    }

    Ok(content)
}

/// Concatenate every DOCX paragraph's text in document order, one paragraph
/// per line. Empty paragraphs are kept as empty lines.
fn extract_docx(path: &Path) -> Result<String> {
    let data = fs::read(path)?;
    let doc = docx_rs::read_docx(&data)
        .map_err(|e| Error::extraction(display_name(path), e.to_string()))?;

    let mut paragraphs = Vec::new();

    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            let mut text = String::new();
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(text);
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Read the full file as UTF-8. Invalid bytes are an error, never silently
/// replaced.
fn extract_plain_text(path: &Path) -> Result<String> {
    let data = fs::read(path)?;
    String::from_utf8(data)
        .map_err(|_| Error::extraction(display_name(path), "file is not valid UTF-8"))
}

/// Hand the image bytes to the OCR engine; no preprocessing
fn extract_image(path: &Path, ocr: &dyn OcrProvider) -> Result<String> {
    let data = fs::read(path)?;
    ocr.extract_text(&data)
}

/// Render CSV contents as a fixed-width text table (headers + all rows in
/// original order, no row indices).
fn extract_csv(path: &Path) -> Result<String> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::extraction(display_name(path), e.to_string()))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::extraction(display_name(path), e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Ok(String::new());
    }

    let mut table = TextTable::new(headers);
    for record in reader.records() {
        let record = record.map_err(|e| Error::extraction(display_name(path), e.to_string()))?;
        table.push_row(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(table.render())
}

/// Walk every user table in a SQLite database and render its full contents.
///
/// Tables come back in catalog order (declaration order in practice) and are
/// never filtered or truncated; a section header is emitted even for tables
/// with zero rows.
fn extract_sqlite(path: &Path) -> Result<String> {
    let name = display_name(path);
    let conn = rusqlite::Connection::open_with_flags(
        path,
        rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
    )
    .map_err(|e| Error::extraction(name.as_str(), e.to_string()))?;

    let tables = list_tables(&conn).map_err(|e| Error::extraction(name.as_str(), e.to_string()))?;

    let mut content = String::new();
    for table_name in tables {
        let table =
            read_table(&conn, &table_name).map_err(|e| Error::extraction(name.as_str(), e.to_string()))?;
        content.push_str(&format!("\nTable: {}\n", table_name));
        content.push_str(&table.render());
        content.push('\n');
    }

    Ok(content)
}

fn list_tables(conn: &rusqlite::Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table'")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    // sqlite_sequence and friends are bookkeeping, not user data
    Ok(names
        .into_iter()
        .filter(|n| !n.starts_with("sqlite_"))
        .collect())
}

fn read_table(conn: &rusqlite::Connection, table_name: &str) -> rusqlite::Result<TextTable> {
    let sql = format!("SELECT * FROM \"{}\"", table_name.replace('"', "\"\""));
    let mut stmt = conn.prepare(&sql)?;

    let headers: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let column_count = headers.len();
    let mut table = TextTable::new(headers);

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(column_count);
        for i in 0..column_count {
            cells.push(render_value(row.get_ref(i)?));
        }
        table.push_row(cells);
    }

    Ok(table)
}

fn render_value(value: rusqlite::types::ValueRef<'_>) -> String {
    use rusqlite::types::ValueRef;

    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(r) => r.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("[{} bytes]", b.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::tesseract::TesseractOcr;
    use std::io::Write;

    fn ocr() -> TesseractOcr {
        TesseractOcr::new(Default::default())
    }

    #[test]
    fn test_plain_text_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("hello\nworld\n".as_bytes()).unwrap();
        let text = extract(&FileKind::PlainText, file.path(), &ocr()).unwrap();
        assert_eq!(text, "hello\nworld\n");
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x41]).unwrap();
        let result = extract(&FileKind::PlainText, file.path(), &ocr());
        assert!(matches!(result, Err(Error::Extraction { .. })));
    }

    #[test]
    fn test_csv_renders_fixed_width_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name,score\nalice,10\nbob,7\n").unwrap();
        let text = extract(&FileKind::Csv, file.path(), &ocr()).unwrap();
        assert_eq!(text, " name score\nalice    10\n  bob     7");
    }

    #[test]
    fn test_csv_extraction_is_idempotent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a,b\n1,2\n").unwrap();
        let first = extract(&FileKind::Csv, file.path(), &ocr()).unwrap();
        let second = extract(&FileKind::Csv, file.path(), &ocr()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sqlite_emits_all_tables_in_declaration_order() {
        let file = tempfile::NamedTempFile::new().unwrap();
        {
            let conn = rusqlite::Connection::open(file.path()).unwrap();
            conn.execute_batch(
                "CREATE TABLE users (id INTEGER, name TEXT);
                 CREATE TABLE logs (ts TEXT, event TEXT);
                 INSERT INTO users VALUES (1, 'alice'), (2, 'bob'), (3, 'carol');",
            )
            .unwrap();
        }

        let text = extract(&FileKind::Sqlite, file.path(), &ocr()).unwrap();

        let users_at = text.find("Table: users").unwrap();
        let logs_at = text.find("Table: logs").unwrap();
        assert!(users_at < logs_at, "tables must appear in declaration order");
        assert!(text.contains("alice"));
        assert!(text.contains("carol"));
        // Empty table still gets a header line with its column names
        assert!(text.contains("ts event"));
    }

    #[test]
    fn test_sqlite_null_and_typed_values() {
        let file = tempfile::NamedTempFile::new().unwrap();
        {
            let conn = rusqlite::Connection::open(file.path()).unwrap();
            conn.execute_batch(
                "CREATE TABLE vals (n INTEGER, r REAL, t TEXT);
                 INSERT INTO vals VALUES (42, 2.5, NULL);",
            )
            .unwrap();
        }

        let text = extract(&FileKind::Sqlite, file.path(), &ocr()).unwrap();
        assert!(text.contains("42"));
        assert!(text.contains("2.5"));
    }

    #[test]
    fn test_corrupt_pdf_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4 this is not a real pdf").unwrap();
        let result = extract(&FileKind::Pdf, file.path(), &ocr());
        assert!(result.is_err());
    }

    #[test]
    fn test_unsupported_yields_empty_string() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let text = extract(&FileKind::Unsupported, file.path(), &ocr()).unwrap();
        assert!(text.is_empty());
    }
}
