use crate::domain::ports::{AuditEntry, AuditLog, InvoiceRenderer};
use crate::domain::request::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory audit log for tests and ephemeral runs.
///
/// Uses `Arc<RwLock<Vec<AuditEntry>>>` to allow shared concurrent access.
#[derive(Default, Clone)]
pub struct MemoryAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLog for MemoryAuditLog {
    async fn append(&self, transaction: &Transaction, at: DateTime<Utc>) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.push(AuditEntry {
            transaction: transaction.clone(),
            timestamp: at,
        });
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<AuditEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.clone())
    }
}

/// An invoice renderer that produces no artifact, for tests and runs that
/// do not need invoices on disk.
pub struct NullInvoiceRenderer;

#[async_trait]
impl InvoiceRenderer for NullInvoiceRenderer {
    async fn render(&self, transaction: &Transaction) -> Result<PathBuf> {
        Ok(PathBuf::from(format!("invoice_{}.txt", transaction.user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::{PaymentRequest, PaymentRequestDraft};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn transaction(user_id: &str) -> Transaction {
        PaymentRequest::try_from(PaymentRequestDraft {
            user_id: Some(user_id.to_string()),
            bill_type: Some("rent".to_string()),
            amount: Some(dec!(900.0)),
            date: NaiveDate::from_ymd_opt(2026, 8, 1),
            due_date: NaiveDate::from_ymd_opt(2026, 8, 5),
            is_urgent: None,
        })
        .unwrap()
        .into()
    }

    #[tokio::test]
    async fn test_memory_audit_log_append_and_read() {
        let log = MemoryAuditLog::new();
        log.append(&transaction("first"), Utc::now()).await.unwrap();
        log.append(&transaction("second"), Utc::now()).await.unwrap();

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].transaction.user_id, "first");
        assert_eq!(entries[1].transaction.user_id, "second");
    }

    #[tokio::test]
    async fn test_null_renderer_returns_synthetic_path() {
        let renderer = NullInvoiceRenderer;
        let path = renderer.render(&transaction("u-1")).await.unwrap();
        assert_eq!(path, PathBuf::from("invoice_u-1.txt"));
    }
}
