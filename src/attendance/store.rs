use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::db::KeyValueStore;
use crate::model::attendance::AttendanceRecord;

/// Fixed key under which the whole record list is persisted.
pub const RECORDS_KEY: &str = "attendance_records";

/// Append-only attendance log, newest record first.
pub struct RecordStore {
    backend: Arc<dyn KeyValueStore>,
    records: Vec<AttendanceRecord>,
}

impl RecordStore {
    /// Restores the persisted records. Missing or unreadable data yields an
    /// empty store; the failure is logged and never returned.
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Self {
        let records = match backend.get(RECORDS_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<AttendanceRecord>>(&blob) {
                Ok(records) => {
                    debug!(count = records.len(), "Restored attendance records");
                    records
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse saved records");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(error = %e, "Failed to read saved records");
                Vec::new()
            }
        };

        Self { backend, records }
    }

    /// Prepends `record` and rewrites the persisted blob.
    pub fn append(&mut self, record: AttendanceRecord) -> &[AttendanceRecord] {
        self.records.insert(0, record);
        self.persist();
        &self.records
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.records) {
            Ok(b) => b,
            Err(e) => {
                error!(error = %e, "Failed to serialize attendance records");
                return;
            }
        };

        if let Err(e) = self.backend.set(RECORDS_KEY, &blob) {
            error!(error = %e, count = self.records.len(), "Failed to persist attendance records");
        }
    }
}
