use crate::domain::history::TransactionHistory;
use crate::domain::ports::{AuditEntry, SharedAuditLog, SharedInvoiceRenderer};
use crate::domain::queue::PendingQueue;
use crate::domain::request::{PaymentRequest, PaymentRequestDraft, Transaction};
use crate::error::{PaymentError, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The result of one settlement cycle.
#[derive(Debug, Clone)]
pub struct SettlementOutcome {
    pub transaction: Transaction,
}

struct CoreState {
    queue: PendingQueue,
    history: TransactionHistory,
}

/// The main entry point for the bill-payment application.
///
/// `ProcessingEngine` owns the pending queue and the transaction history and
/// drives exactly one settlement cycle per `settle_next` call. All mutating
/// operations go through a single lock, so the ordering invariants hold even
/// when the engine is shared across concurrent request handlers. Invoice
/// rendering and audit logging run as detached best-effort tasks; their
/// failure never unwinds a settlement that has already been recorded.
pub struct ProcessingEngine {
    state: Mutex<CoreState>,
    invoice_renderer: SharedInvoiceRenderer,
    audit_log: SharedAuditLog,
}

impl ProcessingEngine {
    pub fn new(invoice_renderer: SharedInvoiceRenderer, audit_log: SharedAuditLog) -> Self {
        Self {
            state: Mutex::new(CoreState {
                queue: PendingQueue::new(),
                history: TransactionHistory::new(),
            }),
            invoice_renderer,
            audit_log,
        }
    }

    /// Validates a draft and, if complete, places it in the pending queue.
    /// Returns the accepted request unchanged.
    pub async fn submit(&self, draft: PaymentRequestDraft) -> Result<PaymentRequest> {
        let request = PaymentRequest::try_from(draft)?;
        let mut state = self.state.lock().await;
        state.queue.enqueue(request.clone());
        debug!(
            user_id = %request.user_id,
            urgent = request.is_urgent,
            "payment request queued"
        );
        Ok(request)
    }

    /// Validates every draft, then enqueues them all in the given order.
    ///
    /// The batch is atomic: an empty input or a single invalid item rejects
    /// the whole batch and nothing is enqueued.
    pub async fn submit_batch(
        &self,
        drafts: Vec<PaymentRequestDraft>,
    ) -> Result<Vec<PaymentRequest>> {
        if drafts.is_empty() {
            return Err(PaymentError::EmptyBatch);
        }
        let requests = drafts
            .into_iter()
            .map(PaymentRequest::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut state = self.state.lock().await;
        for request in &requests {
            state.queue.enqueue(request.clone());
        }
        debug!(count = requests.len(), "payment batch queued");
        Ok(requests)
    }

    /// Snapshot of the pending queue in dequeue order.
    pub async fn pending(&self) -> Vec<PaymentRequest> {
        self.state.lock().await.queue.peek_all()
    }

    /// Settles the next eligible request: dequeues it, records the resulting
    /// transaction in history, and dispatches invoice rendering and audit
    /// logging as side effects. The dequeue and the history record happen
    /// under one lock, so the pending-to-settled transition is observed
    /// atomically.
    pub async fn settle_next(&self) -> Result<SettlementOutcome> {
        let transaction = {
            let mut state = self.state.lock().await;
            let request = state.queue.dequeue().ok_or(PaymentError::NoPendingWork)?;
            let transaction = Transaction::from(request);
            state.history.record(transaction.clone());
            transaction
        };

        info!(
            user_id = %transaction.user_id,
            bill_type = %transaction.bill_type,
            "payment settled"
        );
        self.dispatch_side_effects(transaction.clone());
        Ok(SettlementOutcome { transaction })
    }

    /// Snapshot of the history in insertion order; the last element is the
    /// most recently settled transaction.
    pub async fn history(&self) -> Vec<Transaction> {
        self.state.lock().await.history.view_all()
    }

    /// Removes and returns the most recently settled transaction. The undone
    /// transaction is not re-enqueued; the pending queue is untouched.
    pub async fn undo_last(&self) -> Result<Transaction> {
        let mut state = self.state.lock().await;
        let transaction = state.history.undo_last().ok_or(PaymentError::NoHistory)?;
        debug!(user_id = %transaction.user_id, "last settlement undone");
        Ok(transaction)
    }

    /// Pass-through view of the audit log; not part of core state.
    pub async fn audit_entries(&self) -> Result<Vec<AuditEntry>> {
        self.audit_log.entries().await
    }

    fn dispatch_side_effects(&self, transaction: Transaction) {
        let renderer = Arc::clone(&self.invoice_renderer);
        let for_invoice = transaction.clone();
        tokio::spawn(async move {
            match renderer.render(&for_invoice).await {
                Ok(path) => debug!(path = %path.display(), "invoice written"),
                Err(e) => warn!(error = %e, "invoice rendering failed"),
            }
        });

        let audit_log = Arc::clone(&self.audit_log);
        tokio::spawn(async move {
            if let Err(e) = audit_log.append(&transaction, Utc::now()).await {
                warn!(error = %e, "audit log append failed");
            }
        });
    }
}
