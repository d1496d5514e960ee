use crate::domain::request::Transaction;

/// Reversible record of settled transactions.
///
/// Strictly last-in-first-out: the most recently recorded transaction is
/// always the one an undo removes.
#[derive(Debug, Default)]
pub struct TransactionHistory {
    stack: Vec<Transaction>,
}

impl TransactionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, transaction: Transaction) {
        self.stack.push(transaction);
    }

    /// Removes and returns the most recently recorded transaction. `None`
    /// means the history is empty, which is an expected state and not an
    /// error.
    pub fn undo_last(&mut self) -> Option<Transaction> {
        self.stack.pop()
    }

    /// Snapshot in insertion order; the last element is the most recently
    /// settled transaction.
    pub fn view_all(&self) -> Vec<Transaction> {
        self.stack.clone()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
