// src/source/models.rs
use std::path::{Path, PathBuf};

/// One budget document: its identifier and the text of each page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub mp: String,
    pub path: PathBuf,
    /// `None` for pages that carry no extractable text.
    pub pages: Vec<Option<String>>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn text_page_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_some()).count()
    }
}

/// Derives the document identifier ("MP") from a file name: the stem with
/// every `.` removed, upper-cased. `b.06.pdf` becomes `B06`.
pub fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace('.', "").to_uppercase())
        .unwrap_or_default()
}

/// Stem used for output file names (the file name without its extension).
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A PDF linked from the archive page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfLink {
    pub url: String,
}

impl PdfLink {
    /// Local file name: the last path segment of the URL.
    pub fn file_name(&self) -> Option<&str> {
        self.url
            .split(['?', '#'])
            .next()
            .and_then(|u| u.rsplit('/').next())
            .filter(|name| !name.is_empty())
    }
}
