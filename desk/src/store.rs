//! # store — Analysis Store
//!
//! Coin id → [`AnalysisRecord`], kept in insertion/update order and written
//! through to a JSON file on every mutation. The whole collection is replaced
//! on each write (temp file + rename), never diffed.
//!
//! Two desks pointed at the same file will overwrite each other; last writer
//! wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{DeskError, Result};
use crate::models::AnalysisRecord;

#[derive(Debug, Default)]
pub struct AnalysisStore {
    /// `None` keeps the store in memory only
    path:    Option<PathBuf>,
    records: Vec<AnalysisRecord>,
}

impl AnalysisStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store backed by `path`. A missing or unreadable file yields
    /// an empty store; corruption is logged, never returned.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match Self::load(&path) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "starting with no saved analyses");
                Vec::new()
            }
        };
        debug!(path = %path.display(), count = records.len(), "analysis store opened");
        Self { path: Some(path), records }
    }

    /// Read the durable representation. Missing file → empty.
    pub fn load(path: &Path) -> Result<Vec<AnalysisRecord>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DeskError::PersistCorrupted(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<AnalysisRecord> =
            serde_json::from_str(&raw).map_err(|e| DeskError::PersistCorrupted(e.to_string()))?;

        // A hand-edited file could repeat an id; keep the last one.
        let mut deduped: Vec<AnalysisRecord> = Vec::with_capacity(records.len());
        for record in records {
            match deduped.iter().position(|r| r.coin.id == record.coin.id) {
                Some(i) => deduped[i] = record,
                None => deduped.push(record),
            }
        }
        Ok(deduped)
    }

    /// Write the whole collection. No-op for an in-memory store.
    pub fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_vec_pretty(&self.records)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Replace the record with the same coin id, else append. Persists
    /// immediately; the in-memory change stands even if the write fails.
    pub fn upsert(&mut self, record: AnalysisRecord) -> Result<()> {
        match self.records.iter().position(|r| r.coin.id == record.coin.id) {
            Some(i) => self.records[i] = record,
            None => self.records.push(record),
        }
        self.persist()
    }

    pub fn get(&self, coin_id: &str) -> Option<&AnalysisRecord> {
        self.records.iter().find(|r| r.coin.id == coin_id)
    }

    pub fn all(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
