use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::{
    attendance::AttendanceRecord, document::SavedDocument, employee::Employee,
    leave_request::AnnualLeaveRequest,
};

/// Everything the service keeps between restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub annual_leaves: Vec<AnnualLeaveRequest>,
    /// Newest first.
    #[serde(default)]
    pub documents: Vec<SavedDocument>,
}

/// Side effect run after every state mutation.
pub trait Persistence: Send + Sync {
    fn save(&self, data: &StoreData) -> Result<()>;
}

/// Keeps nothing; used when no data file is configured.
pub struct NoopStore;

impl Persistence for NoopStore {
    fn save(&self, _data: &StoreData) -> Result<()> {
        Ok(())
    }
}

/// Whole data set as one pretty-printed JSON document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing file means a fresh install and yields empty data.
    pub fn load(&self) -> Result<StoreData> {
        if !self.path.exists() {
            return Ok(StoreData::default());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read data file: {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Data file is not valid JSON: {}", self.path.display()))
    }
}

impl Persistence for JsonFileStore {
    fn save(&self, data: &StoreData) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data dir: {}", dir.display()))?;
        }
        // sibling temp file, then an atomic rename over the old one
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(data)?)
            .with_context(|| format!("Failed to write data file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace data file: {}", self.path.display()))?;
        Ok(())
    }
}

/// Loads persisted data and returns it with the handler that keeps it saved.
pub fn init_db(data_file: Option<&Path>) -> Result<(StoreData, Arc<dyn Persistence>)> {
    match data_file {
        Some(path) => {
            let store = JsonFileStore::new(path);
            let data = store.load()?;
            info!(
                path = %path.display(),
                employees = data.employees.len(),
                records = data.records.len(),
                annual_leaves = data.annual_leaves.len(),
                documents = data.documents.len(),
                "Loaded attendance data"
            );
            Ok((data, Arc::new(store)))
        }
        None => {
            info!("No data file configured, running in memory only");
            Ok((StoreData::default(), Arc::new(NoopStore)))
        }
    }
}
