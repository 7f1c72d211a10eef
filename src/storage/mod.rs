// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::records::{RecordTable, TabularRecord};
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

/// Where a table came from, for the metadata sidecar.
#[derive(Debug, Clone)]
pub struct TableSource<'a> {
    pub layout: &'a str,
    pub source_file: &'a Path,
    pub page_count: usize,
    pub text_page_count: usize,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// `<stem>_EXTRACTED<suffix>.csv` under the base directory.
    pub fn table_path(&self, stem: &str, suffix: &str) -> PathBuf {
        self.base_dir.join(format!("{}_EXTRACTED{}.csv", stem, suffix))
    }

    /// Writes the table as CSV with its column header row.
    pub fn save_table<R: TabularRecord>(
        &self,
        stem: &str,
        suffix: &str,
        table: &RecordTable<R>,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.table_path(stem, suffix);

        let mut writer = csv::Writer::from_path(&file_path)?;
        for record in &table.records {
            writer.serialize(record)?;
        }
        // Check for error rather than implicitly flushing and ignoring.
        writer.flush().map_err(StorageError::IoError)?;

        tracing::info!("Saved {} rows for {} to {}", table.len(), table.mp, file_path.display());

        Ok(file_path)
    }

    /// Saves metadata about the table in JSON format next to the CSV.
    pub fn save_table_metadata<R: TabularRecord>(
        &self,
        stem: &str,
        suffix: &str,
        table: &RecordTable<R>,
        source: &TableSource<'_>,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_EXTRACTED{}_meta.json", stem, suffix));

        let metadata = serde_json::json!({
            "mp": table.mp,
            "layout": source.layout,
            "source_file": source.source_file.display().to_string(),
            "page_count": source.page_count,
            "text_page_count": source.text_page_count,
            "record_count": table.len(),
            "columns": table.columns(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::debug!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::records::ObjekAmRecord;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("budget_extractor_storage_{}", name));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn table() -> RecordTable<ObjekAmRecord> {
        let records = vec![
            ObjekAmRecord {
                mp: "B10".into(),
                code: "21000".into(),
                title: "Jabatan, Perdana Menteri".into(),
                expenditure_type: "Perjalanan".into(),
                estimate: "1,200".into(),
            },
            ObjekAmRecord {
                mp: "B10".into(),
                code: "35000".into(),
                title: "Jabatan, Perdana Menteri".into(),
                expenditure_type: "".into(),
                estimate: "300".into(),
            },
        ];
        RecordTable::build("B10", records).unwrap()
    }

    #[test]
    fn test_save_table_writes_header_and_rows() {
        let dir = temp_dir("csv");
        let storage = StorageManager::new(&dir).unwrap();
        assert!(dir.exists());

        let path = storage.save_table("b.10", "_DE_objek_am", &table()).unwrap();
        assert_eq!(path.file_name().unwrap(), "b.10_EXTRACTED_DE_objek_am.csv");

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "MP,Kod,Maksud Perbelanjaan,Jenis Perbelanjaan,Anggaran");
        assert_eq!(lines[1], "B10,21000,\"Jabatan, Perdana Menteri\",Perjalanan,\"1,200\"");
        assert_eq!(lines[2], "B10,35000,\"Jabatan, Perdana Menteri\",,300");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_save_metadata_records_counts() {
        let dir = temp_dir("meta");
        let storage = StorageManager::new(&dir).unwrap();
        let source = TableSource {
            layout: "objek-am",
            source_file: Path::new("input/b.10.pdf"),
            page_count: 12,
            text_page_count: 11,
        };

        let path = storage.save_table_metadata("b.10", "", &table(), &source).unwrap();
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["mp"], "B10");
        assert_eq!(value["layout"], "objek-am");
        assert_eq!(value["page_count"], 12);
        assert_eq!(value["text_page_count"], 11);
        assert_eq!(value["record_count"], 2);
        assert_eq!(value["columns"][1], "Kod");
    }
}
