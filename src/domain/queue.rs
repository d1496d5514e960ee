use crate::domain::request::PaymentRequest;
use std::collections::VecDeque;

/// Pending requests ordered as two explicit priority classes.
///
/// Urgent requests are served before everything else, most recent first;
/// non-urgent requests are served in arrival order once no urgent request
/// remains. The asymmetry (LIFO among urgent, FIFO among non-urgent) is the
/// intended contract, not an accident of storage.
#[derive(Debug, Default)]
pub struct PendingQueue {
    // Drained from the back: the newest urgent request is next out.
    urgent: Vec<PaymentRequest>,
    // Drained from the front.
    normal: VecDeque<PaymentRequest>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, request: PaymentRequest) {
        if request.is_urgent {
            self.urgent.push(request);
        } else {
            self.normal.push_back(request);
        }
    }

    /// Removes and returns the next request to settle. `None` means the queue
    /// is empty, which is an expected state and not an error.
    pub fn dequeue(&mut self) -> Option<PaymentRequest> {
        self.urgent.pop().or_else(|| self.normal.pop_front())
    }

    /// Snapshot of the queue in exact dequeue order.
    pub fn peek_all(&self) -> Vec<PaymentRequest> {
        self.urgent
            .iter()
            .rev()
            .chain(self.normal.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.urgent.len() + self.normal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urgent.is_empty() && self.normal.is_empty()
    }
}
