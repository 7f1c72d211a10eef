// src/batch/mod.rs

//! Runs one layout over every supported file in a directory, one document at
//! a time. A failing document is logged and counted; the batch carries on.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::extractors::{
    extract_document, ContextScope, DevelopmentLayout, Layout, ObjekAmLayout, OperatingLayout,
    RecordTable,
};
use crate::source::models::file_stem;
use crate::source::pages::{is_supported, load_document, PageSource};
use crate::source::Document;
use crate::storage::{StorageManager, TableSource};
use crate::utils::AppError;

/// The three report layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutKind {
    /// Object-class summary of the development volume.
    ObjekAm,
    /// Development-project ledger.
    Development,
    /// Program/activity operating-budget ledger.
    Operating,
}

impl LayoutKind {
    /// Suffix appended after `_EXTRACTED` in output file names.
    pub fn output_suffix(self) -> &'static str {
        match self {
            LayoutKind::ObjekAm => "_DE_objek_am",
            LayoutKind::Development => "_DE",
            LayoutKind::Operating => "",
        }
    }
}

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written { path: PathBuf, records: usize },
    /// No records; nothing was written.
    Empty,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: usize,
    pub empty: usize,
    pub failed: usize,
}

pub struct Batch<'a> {
    pub kind: LayoutKind,
    pub scope: ContextScope,
    pub sources: &'a [Box<dyn PageSource>],
    pub storage: &'a StorageManager,
}

impl Batch<'_> {
    /// Extracts one loaded document and hands a non-empty result to storage.
    pub fn process_document(&self, doc: &Document) -> Result<Outcome, AppError> {
        match self.kind {
            LayoutKind::ObjekAm => self.run(&ObjekAmLayout, doc),
            LayoutKind::Development => self.run(&DevelopmentLayout, doc),
            LayoutKind::Operating => self.run(&OperatingLayout, doc),
        }
    }

    fn run<L: Layout>(&self, layout: &L, doc: &Document) -> Result<Outcome, AppError> {
        let records = extract_document(layout, &doc.mp, doc.pages.iter().map(Option::as_deref), self.scope);
        tracing::info!("Extracted {} records from {}", records.len(), doc.path.display());

        let Some(table) = RecordTable::build(&doc.mp, records) else {
            tracing::warn!("No data to save for {} ({})", doc.mp, doc.path.display());
            return Ok(Outcome::Empty);
        };

        let stem = file_stem(&doc.path);
        let suffix = self.kind.output_suffix();
        let path = self.storage.save_table(&stem, suffix, &table)?;
        let source = TableSource {
            layout: layout.name(),
            source_file: &doc.path,
            page_count: doc.page_count(),
            text_page_count: doc.text_page_count(),
        };
        self.storage.save_table_metadata(&stem, suffix, &table, &source)?;

        Ok(Outcome::Written {
            path,
            records: table.len(),
        })
    }

    /// Loads, extracts and stores one file. Failures are logged with the
    /// document identifier and returned.
    pub fn process_file(&self, path: &Path) -> Result<Outcome, AppError> {
        let result = load_document(self.sources, path)
            .map_err(AppError::from)
            .and_then(|doc| self.process_document(&doc));

        if let Err(e) = &result {
            let mp = crate::source::models::document_id(path);
            tracing::error!("Failed to extract data from {} ({}): {}", path.display(), mp, e);
        }
        result
    }

    /// Processes every supported file in `input_dir`, in file-name order.
    pub fn run_dir(&self, input_dir: &Path) -> Result<BatchSummary, AppError> {
        if !input_dir.is_dir() {
            return Err(AppError::Config(format!(
                "Input directory does not exist: {}",
                input_dir.display()
            )));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(input_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut summary = BatchSummary::default();
        for path in paths {
            if !is_supported(self.sources, &path) {
                tracing::debug!("Skipping unsupported file {}", path.display());
                continue;
            }
            match self.process_file(&path) {
                Ok(Outcome::Written { path: written, records }) => {
                    tracing::debug!("{} rows -> {}", records, written.display());
                    summary.written += 1;
                }
                Ok(Outcome::Empty) => summary.empty += 1,
                Err(_) => summary.failed += 1,
            }
        }

        tracing::info!(
            "Processing finished. Written: {}, Empty: {}, Failures: {}",
            summary.written,
            summary.empty,
            summary.failed
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::default_sources;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("budget_extractor_batch_{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_run_dir_writes_non_empty_documents_only() {
        let input = temp_dir("input");
        let output = input.join("out");
        fs::write(
            input.join("b.06.txt"),
            "Maksud B.6 - Jabatan Perdana Menteri\n010000 PENGURUSAN\n\u{000C}10000 Emolumen 1 2 3 4\n",
        )
        .unwrap();
        fs::write(input.join("b.07.txt"), "tiada data\n").unwrap();
        fs::write(input.join("readme.md"), "ignored").unwrap();

        let sources = default_sources();
        let storage = StorageManager::new(&output).unwrap();
        let batch = Batch {
            kind: LayoutKind::Operating,
            scope: ContextScope::Document,
            sources: &sources,
            storage: &storage,
        };

        let summary = batch.run_dir(&input).unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                written: 1,
                empty: 1,
                failed: 0
            }
        );

        let csv = fs::read_to_string(output.join("b.06_EXTRACTED.csv")).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("MP,Maksud Perbelanjaan,Kod Program"));
        assert_eq!(
            lines.next().unwrap(),
            "B06,Jabatan Perdana Menteri,010000,PENGURUSAN,,,10000,1,2,3,4"
        );
        assert!(output.join("b.06_EXTRACTED_meta.json").exists());
        assert!(!output.join("b.07_EXTRACTED.csv").exists());
    }

    #[test]
    fn test_failed_document_does_not_stop_batch() {
        let input = temp_dir("failing");
        let output = input.join("out");
        fs::write(input.join("a.pdf"), "not really a pdf").unwrap();
        fs::write(
            input.join("b.txt"),
            "ANGGARAN PERBELANJAAN PEMBANGUNAN BAGI TAHUN 2015\n21000 Bekalan 1 200\n",
        )
        .unwrap();

        let sources = default_sources();
        let storage = StorageManager::new(&output).unwrap();
        let batch = Batch {
            kind: LayoutKind::ObjekAm,
            scope: ContextScope::Document,
            sources: &sources,
            storage: &storage,
        };

        let summary = batch.run_dir(&input).unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.written, 1);
        assert!(output.join("b_EXTRACTED_DE_objek_am.csv").exists());
    }

    #[test]
    fn test_missing_input_dir_is_config_error() {
        let sources = default_sources();
        let storage = StorageManager::new(temp_dir("missing_out")).unwrap();
        let batch = Batch {
            kind: LayoutKind::Development,
            scope: ContextScope::Document,
            sources: &sources,
            storage: &storage,
        };
        let result = batch.run_dir(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_output_suffixes() {
        assert_eq!(LayoutKind::ObjekAm.output_suffix(), "_DE_objek_am");
        assert_eq!(LayoutKind::Development.output_suffix(), "_DE");
        assert_eq!(LayoutKind::Operating.output_suffix(), "");
    }
}
