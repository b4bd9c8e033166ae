//! Production record repository for JSON storage
//!
//! Manages loading and saving the production dataset to production.json.
//! Records keep their insertion order.

use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::ReportError;
use crate::models::ProductionRecord;

use super::file_io::{read_json, write_json_atomic};

/// Serializable record data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RecordData {
    records: Vec<ProductionRecord>,
}

/// Repository for production record persistence
pub struct RecordRepository {
    path: PathBuf,
    data: RwLock<Vec<ProductionRecord>>,
}

impl RecordRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load records from disk, validating each one
    pub fn load(&self) -> Result<(), ReportError> {
        let file_data: RecordData = read_json(&self.path)?;

        for record in &file_data.records {
            record.validate().map_err(|e| {
                ReportError::Storage(format!("Invalid record in {}: {}", self.path.display(), e))
            })?;
        }

        let mut data = self.data.write().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data.records;

        debug!(count = data.len(), path = %self.path.display(), "loaded production records");
        Ok(())
    }

    /// Save records to disk
    pub fn save(&self) -> Result<(), ReportError> {
        let data = self.data.read().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = RecordData {
            records: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get all records in insertion order
    pub fn get_all(&self) -> Result<Vec<ProductionRecord>, ReportError> {
        let data = self.data.read().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    /// Get a record by ID
    pub fn get(&self, id: &str) -> Result<Option<ProductionRecord>, ReportError> {
        let data = self.data.read().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.iter().find(|r| r.id == id).cloned())
    }

    /// Get records whose reading date falls in `[start, end]`
    pub fn get_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ProductionRecord>, ReportError> {
        let data = self.data.read().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .iter()
            .filter(|r| r.date() >= start && r.date() <= end)
            .cloned()
            .collect())
    }

    /// Replace the whole dataset
    pub fn replace_all(&self, records: Vec<ProductionRecord>) -> Result<(), ReportError> {
        let mut data = self.data.write().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *data = records;
        Ok(())
    }

    /// Append records, replacing any existing record with the same ID
    ///
    /// Returns the number of records that were new.
    pub fn extend(&self, records: Vec<ProductionRecord>) -> Result<usize, ReportError> {
        let mut data = self.data.write().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut added = 0;
        for record in records {
            if let Some(existing) = data.iter_mut().find(|r| r.id == record.id) {
                *existing = record;
            } else {
                data.push(record);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Remove all records
    pub fn clear(&self) -> Result<usize, ReportError> {
        let mut data = self.data.write().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = data.len();
        data.clear();
        Ok(removed)
    }

    pub fn len(&self) -> Result<usize, ReportError> {
        let data = self.data.read().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }

    pub fn is_empty(&self) -> Result<bool, ReportError> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn record(id: &str, day: u32) -> ProductionRecord {
        ProductionRecord::new(
            id,
            "F1",
            Utc.with_ymd_and_hms(2024, 1, day, 8, 0, 0).unwrap(),
            100.0,
            200.0,
            90.0,
        )
        .unwrap()
    }

    fn create_test_repo() -> (TempDir, RecordRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("production.json");
        let repo = RecordRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn test_extend_and_save_reload() {
        let (temp_dir, repo) = create_test_repo();
        let added = repo.extend(vec![record("p1", 1), record("p2", 2)]).unwrap();
        assert_eq!(added, 2);
        repo.save().unwrap();

        let repo2 = RecordRepository::new(temp_dir.path().join("production.json"));
        repo2.load().unwrap();
        let ids: Vec<String> = repo2.get_all().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_extend_replaces_same_id() {
        let (_temp_dir, repo) = create_test_repo();
        repo.extend(vec![record("p1", 1)]).unwrap();

        let mut updated = record("p1", 1);
        updated.efficiency = 50.0;
        let added = repo.extend(vec![updated]).unwrap();

        assert_eq!(added, 0);
        assert_eq!(repo.len().unwrap(), 1);
        assert_eq!(repo.get("p1").unwrap().unwrap().efficiency, 50.0);
    }

    #[test]
    fn test_get_in_range_is_inclusive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.extend(vec![record("p1", 1), record("p2", 5), record("p3", 10)])
            .unwrap();

        let found = repo
            .get_in_range(
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            )
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_replace_all() {
        let (_temp_dir, repo) = create_test_repo();
        repo.extend(vec![record("p1", 1), record("p2", 2)]).unwrap();
        repo.replace_all(vec![record("p9", 3)]).unwrap();

        assert_eq!(repo.len().unwrap(), 1);
        assert!(repo.get("p1").unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let (_temp_dir, repo) = create_test_repo();
        repo.extend(vec![record("p1", 1)]).unwrap();
        assert_eq!(repo.clear().unwrap(), 1);
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn test_load_rejects_invalid_record() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(
            temp_dir.path().join("production.json"),
            r#"{"records":[{"id":"p1","facilityId":"F1","timestamp":"2024-01-01T00:00:00Z","oilProduction":1,"gasProduction":1,"efficiency":150}]}"#,
        )
        .unwrap();

        assert!(matches!(repo.load().unwrap_err(), ReportError::Storage(_)));
    }
}
