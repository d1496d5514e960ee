use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("missing required fields: {}", missing_fields.join(", "))]
    Validation { missing_fields: Vec<String> },
    #[error("no payments to add")]
    EmptyBatch,
    #[error("no payments in the queue")]
    NoPendingWork,
    #[error("no transactions to undo")]
    NoHistory,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PaymentError {
    /// Validation and empty-state conditions are the caller's to fix;
    /// everything else is a fault on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PaymentError::Validation { .. }
                | PaymentError::EmptyBatch
                | PaymentError::NoPendingWork
                | PaymentError::NoHistory
        )
    }
}
