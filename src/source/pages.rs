// src/source/pages.rs

//! Page-text retrieval.
//!
//! The extractor only needs an ordered list of page texts; how they are
//! obtained depends on the input file. PDFs go through `pdf-extract`, and
//! `.txt` files hold pre-extracted text with pages separated by form feeds
//! (the `pdftotext` convention).

use std::fs;
use std::path::Path;

use crate::source::models::{document_id, Document};
use crate::utils::error::SourceError;

const PAGE_BREAK: char = '\u{000C}';

/// Something that can produce the page texts of a file.
pub trait PageSource {
    /// Whether this source understands the given file.
    fn accepts(&self, path: &Path) -> bool;

    /// Page texts in reading order; `None` for pages without text.
    fn read_pages(&self, path: &Path) -> Result<Vec<Option<String>>, SourceError>;
}

pub struct PdfPages;

impl PageSource for PdfPages {
    fn accepts(&self, path: &Path) -> bool {
        has_extension(path, "pdf")
    }

    fn read_pages(&self, path: &Path) -> Result<Vec<Option<String>>, SourceError> {
        let pdf_error = |reason: String| SourceError::Pdf {
            path: path.display().to_string(),
            reason,
        };
        // pdf-extract panics on some malformed fonts and streams.
        let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_by_pages(path))
            .map_err(|_| pdf_error("text extraction panicked".to_string()))?
            .map_err(|e| pdf_error(e.to_string()))?;
        tracing::debug!("Extracted {} pages of text from {}", pages.len(), path.display());
        Ok(pages.into_iter().map(non_blank).collect())
    }
}

pub struct TextPages;

impl PageSource for TextPages {
    fn accepts(&self, path: &Path) -> bool {
        has_extension(path, "txt")
    }

    fn read_pages(&self, path: &Path) -> Result<Vec<Option<String>>, SourceError> {
        let text = fs::read_to_string(path)?;
        Ok(split_pages(&text))
    }
}

/// Splits pre-extracted text at form feeds. A trailing form feed does not
/// start an extra page.
pub fn split_pages(text: &str) -> Vec<Option<String>> {
    if text.is_empty() {
        return Vec::new();
    }
    let text = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
    text.split(PAGE_BREAK)
        .map(|page| non_blank(page.to_string()))
        .collect()
}

fn non_blank(page: String) -> Option<String> {
    if page.trim().is_empty() {
        None
    } else {
        Some(page)
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Page sources in the order they are tried.
pub fn default_sources() -> Vec<Box<dyn PageSource>> {
    vec![Box::new(PdfPages), Box::new(TextPages)]
}

pub fn is_supported(sources: &[Box<dyn PageSource>], path: &Path) -> bool {
    sources.iter().any(|s| s.accepts(path))
}

/// Reads `path` with the first source that accepts it.
pub fn load_document(sources: &[Box<dyn PageSource>], path: &Path) -> Result<Document, SourceError> {
    let source = sources
        .iter()
        .find(|s| s.accepts(path))
        .ok_or_else(|| SourceError::Unsupported(path.display().to_string()))?;

    let pages = source.read_pages(path)?;
    Ok(Document {
        mp: document_id(path),
        path: path.to_path_buf(),
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("budget_extractor_pages_{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_split_pages_marks_blank_pages_absent() {
        let pages = split_pages("first page\n\u{000C}  \n\u{000C}third\u{000C}");
        assert_eq!(
            pages,
            vec![Some("first page\n".to_string()), None, Some("third".to_string())]
        );
        assert!(split_pages("").is_empty());
    }

    #[test]
    fn test_load_text_document() {
        let dir = temp_dir("load");
        let path = dir.join("b.06.txt");
        fs::write(&path, "Maksud B.6\n\u{000C}10000 a 1 2").unwrap();

        let doc = load_document(&default_sources(), &path).unwrap();
        assert_eq!(doc.mp, "B06");
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[1].as_deref(), Some("10000 a 1 2"));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let sources = default_sources();
        let path = Path::new("notes.docx");
        assert!(!is_supported(&sources, path));
        assert!(is_supported(&sources, Path::new("B10.PDF")));
        assert!(matches!(
            load_document(&sources, path),
            Err(SourceError::Unsupported(_))
        ));
    }
}
