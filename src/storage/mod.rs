// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::models::ExtractionResult;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
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

    /// File stem shared by all outputs of one extraction,
    /// e.g. `race-data-V75-2025-08-16`.
    pub fn file_stem(result: &ExtractionResult) -> String {
        format!(
            "race-data-{}-{}",
            result.source_type,
            result.extracted_at.format("%Y-%m-%d")
        )
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }

    /// Saves the extraction result as pretty-printed JSON
    pub fn save_result(&self, result: &ExtractionResult) -> Result<PathBuf, StorageError> {
        let file_path = self.path_for(&format!("{}.json", Self::file_stem(result)));

        let json = to_pretty_json(result)?;
        fs::write(&file_path, json)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved extraction result to {}", file_path.display());

        Ok(file_path)
    }
}

pub fn to_pretty_json(result: &ExtractionResult) -> Result<String, StorageError> {
    serde_json::to_string_pretty(result)
        .map_err(|e| StorageError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> ExtractionResult {
        ExtractionResult {
            source_type: "V75".to_string(),
            races: Vec::new(),
            total_competitor_count: 0,
            extracted_at: chrono::Utc.with_ymd_and_hms(2025, 8, 16, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn saves_json_named_after_source_type_and_date() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();

        let path = storage.save_result(&sample()).unwrap();
        assert_eq!(path.file_name().unwrap(), "race-data-V75-2025-08-16.json");

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["sourceType"], "V75");
        assert_eq!(value["totalCompetitorCount"], 0);
        assert_eq!(value["extractedAt"], "2025-08-16T12:00:00Z");
    }
}
