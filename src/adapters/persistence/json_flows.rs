//! Implements FlowSource using a JSON document on disk.
//!
//! The document is either a bare array of flow records or an object with a
//! `flows` array. It is read once by `load()` and served from memory.
//!
//! Decoding is all-or-nothing: a field of the wrong JSON type (a numeric
//! `kind`, a string `id`) fails the whole document with `FlowSource` and
//! never reaches the per-record `InvalidArgument` checks. Missing or null
//! fields do decode and are left to those checks.

use crate::domain::{DomainError, EntityRefRecord, LogicalFlowRecord};
use crate::ports::FlowSource;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::info;

#[derive(Deserialize)]
#[serde(untagged)]
enum FlowsDocument {
    Bare(Vec<LogicalFlowRecord>),
    Wrapped { flows: Vec<LogicalFlowRecord> },
}

impl FlowsDocument {
    fn into_records(self) -> Vec<LogicalFlowRecord> {
        match self {
            FlowsDocument::Bare(flows) | FlowsDocument::Wrapped { flows } => flows,
        }
    }
}

/// JSON file-based flow source.
pub struct JsonFlowSource {
    path: std::path::PathBuf,
    cache: tokio::sync::RwLock<Vec<LogicalFlowRecord>>,
}

impl JsonFlowSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(Vec::new()),
        }
    }

    /// Build a source over records already in memory.
    pub fn from_records(records: Vec<LogicalFlowRecord>) -> Self {
        Self {
            path: std::path::PathBuf::new(),
            cache: tokio::sync::RwLock::new(records),
        }
    }

    /// Load flows from disk, replacing anything cached. Returns the record count.
    pub async fn load(&self) -> Result<usize, DomainError> {
        let raw = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::FlowSource(format!("read {}: {}", self.path.display(), e))
        })?;
        let records = serde_json::from_str::<FlowsDocument>(&raw)
            .map_err(|e| DomainError::FlowSource(format!("parse {}: {}", self.path.display(), e)))?
            .into_records();
        let count = records.len();
        *self.cache.write().await = records;
        info!(path = %self.path.display(), count, "loaded flow records");
        Ok(count)
    }
}

#[async_trait::async_trait]
impl FlowSource for JsonFlowSource {
    async fn find_flows_for(
        &self,
        anchor: &EntityRefRecord,
    ) -> Result<Vec<LogicalFlowRecord>, DomainError> {
        let cache = self.cache.read().await;
        Ok(cache.iter().filter(|f| f.touches(anchor)).cloned().collect())
    }
}
