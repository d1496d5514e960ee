use crate::domain::ports::InvoiceRenderer;
use crate::domain::request::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;

/// Renders each invoice as a plain-text file under a target directory.
///
/// File names follow `invoice_{user_id}_{unix_millis}.txt`. The directory is
/// expected to exist; the binary creates it at startup.
pub struct TextInvoiceRenderer {
    invoices_dir: PathBuf,
}

impl TextInvoiceRenderer {
    pub fn new(invoices_dir: impl Into<PathBuf>) -> Self {
        Self {
            invoices_dir: invoices_dir.into(),
        }
    }
}

#[async_trait]
impl InvoiceRenderer for TextInvoiceRenderer {
    async fn render(&self, transaction: &Transaction) -> Result<PathBuf> {
        let file_name = format!(
            "invoice_{}_{}.txt",
            transaction.user_id,
            Utc::now().timestamp_millis()
        );
        let path = self.invoices_dir.join(file_name);

        let body = format!(
            "Invoice for {} Bill Payment\n\
             User ID: {}\n\
             Amount: ${}\n\
             Date: {}\n\
             Due Date: {}\n\
             Urgent: {}\n",
            transaction.bill_type,
            transaction.user_id,
            transaction.amount.value(),
            transaction.date,
            transaction.due_date,
            if transaction.is_urgent { "Yes" } else { "No" },
        );

        tokio::fs::write(&path, body).await?;
        Ok(path)
    }
}
