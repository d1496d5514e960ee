use crate::domain::request::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// One settled transaction plus the moment it was logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub timestamp: DateTime<Utc>,
}

/// Produces an invoice artifact for a settled transaction and returns its
/// location. The engine treats the artifact as opaque.
#[async_trait]
pub trait InvoiceRenderer: Send + Sync {
    async fn render(&self, transaction: &Transaction) -> Result<PathBuf>;
}

/// Append-only record of settled transactions. The engine writes to it on
/// every settlement and reads it back only as a pass-through view.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn append(&self, transaction: &Transaction, at: DateTime<Utc>) -> Result<()>;
    async fn entries(&self) -> Result<Vec<AuditEntry>>;
}

pub type SharedInvoiceRenderer = Arc<dyn InvoiceRenderer>;
pub type SharedAuditLog = Arc<dyn AuditLog>;
