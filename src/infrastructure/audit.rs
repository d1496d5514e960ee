use crate::domain::ports::{AuditEntry, AuditLog};
use crate::domain::request::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Audit log backed by a single JSON-array file.
///
/// Each append reads the current array, pushes the new entry, and rewrites
/// the file. A missing or blank file counts as an empty log. The internal
/// mutex serializes accesses so concurrent appends cannot tear the file.
pub struct JsonFileAuditLog {
    path: PathBuf,
    file_lock: Mutex<()>,
}

impl JsonFileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_lock: Mutex::new(()),
        }
    }

    async fn read_entries(&self) -> Result<Vec<AuditEntry>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl AuditLog for JsonFileAuditLog {
    async fn append(&self, transaction: &Transaction, at: DateTime<Utc>) -> Result<()> {
        let _guard = self.file_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.push(AuditEntry {
            transaction: transaction.clone(),
            timestamp: at,
        });
        let content = serde_json::to_string_pretty(&entries)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<AuditEntry>> {
        let _guard = self.file_lock.lock().await;
        self.read_entries().await
    }
}
