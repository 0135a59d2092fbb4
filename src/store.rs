use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::model::Report;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("report {0} not found")]
    ReportNotFound(String),
}

/// Flat-file stand-in for the report persistence service: one JSON array of
/// reports, loaded whole. Lineage resolution needs the complete collection,
/// so there is no partial or paginated read.
#[derive(Debug)]
pub struct ReportStore {
    path: PathBuf,
    reports: Vec<Report>,
}

impl ReportStore {
    /// Load the store from `path`. A missing file is an empty store, not an
    /// error — a fresh working directory has nothing to display yet.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let reports = match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No store at {}; starting empty", path.display());
                Vec::new()
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        info!("Loaded {} reports from {}", reports.len(), path.display());
        Ok(ReportStore {
            path: path.to_path_buf(),
            reports,
        })
    }

    /// The full collection, in stored order.
    pub fn all(&self) -> &[Report] {
        &self.reports
    }

    pub fn get(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn insert(&mut self, report: Report) {
        self.reports.push(report);
    }

    /// Replace the stored report carrying the same id.
    pub fn update(&mut self, report: Report) -> Result<(), StoreError> {
        match self.reports.iter_mut().find(|r| r.id == report.id) {
            Some(slot) => {
                *slot = report;
                Ok(())
            }
            None => Err(StoreError::ReportNotFound(report.id)),
        }
    }

    /// Write the collection back to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.reports).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved {} reports to {}", self.reports.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReportStatus;
    use chrono::{TimeZone, Utc};

    fn report(id: &str) -> Report {
        Report {
            id: id.to_string(),
            parent_report_id: None,
            created_date: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
            inspection_date: None,
            is_reinspection: false,
            status: ReportStatus::Draft,
            client_name: "Acme".to_string(),
            engineer_name: String::new(),
            engineer_registry: String::new(),
            property_address: String::new(),
            items: vec![],
        }
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::open(&dir.path().join("none.json")).unwrap();
        assert!(store.all().is_empty());
    }

    #[test]
    fn save_and_reopen_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.json");

        let mut store = ReportStore::open(&path).unwrap();
        store.insert(report("r1"));
        store.insert(report("r2"));
        store.save().unwrap();

        let reopened = ReportStore::open(&path).unwrap();
        assert_eq!(reopened.all().len(), 2);
        assert_eq!(reopened.get("r1").unwrap().client_name, "Acme");
        assert!(reopened.get("r3").is_none());
    }

    #[test]
    fn update_replaces_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ReportStore::open(&dir.path().join("r.json")).unwrap();
        store.insert(report("r1"));

        let mut changed = report("r1");
        changed.client_name = "Beta".to_string();
        store.update(changed).unwrap();
        assert_eq!(store.get("r1").unwrap().client_name, "Beta");

        let err = store.update(report("ghost")).unwrap_err();
        assert!(matches!(err, StoreError::ReportNotFound(_)));
    }

    #[test]
    fn malformed_store_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = ReportStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}
