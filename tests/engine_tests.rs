use billpay::application::engine::ProcessingEngine;
use billpay::domain::request::PaymentRequestDraft;
use billpay::error::PaymentError;
use billpay::infrastructure::in_memory::{MemoryAuditLog, NullInvoiceRenderer};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn engine() -> ProcessingEngine {
    ProcessingEngine::new(Arc::new(NullInvoiceRenderer), Arc::new(MemoryAuditLog::new()))
}

fn draft(user_id: &str, urgent: bool) -> PaymentRequestDraft {
    PaymentRequestDraft {
        user_id: Some(user_id.to_string()),
        bill_type: Some("electricity".to_string()),
        amount: Some(dec!(50.0)),
        date: NaiveDate::from_ymd_opt(2026, 8, 1),
        due_date: NaiveDate::from_ymd_opt(2026, 9, 1),
        is_urgent: Some(urgent),
    }
}

async fn settled_order(engine: &ProcessingEngine) -> Vec<String> {
    let mut order = Vec::new();
    while let Ok(outcome) = engine.settle_next().await {
        order.push(outcome.transaction.user_id);
    }
    order
}

#[tokio::test]
async fn urgent_requests_settle_newest_first() {
    let engine = engine();
    for user in ["u1", "u2", "u3"] {
        engine.submit(draft(user, true)).await.unwrap();
    }
    assert_eq!(settled_order(&engine).await, vec!["u3", "u2", "u1"]);
}

#[tokio::test]
async fn normal_requests_settle_oldest_first_after_urgent() {
    let engine = engine();
    engine.submit(draft("n1", false)).await.unwrap();
    engine.submit(draft("n2", false)).await.unwrap();
    engine.submit(draft("u1", true)).await.unwrap();
    engine.submit(draft("n3", false)).await.unwrap();
    engine.submit(draft("u2", true)).await.unwrap();

    assert_eq!(
        settled_order(&engine).await,
        vec!["u2", "u1", "n1", "n2", "n3"]
    );
}

#[tokio::test]
async fn urgent_arriving_between_settlements_preempts() {
    let engine = engine();
    engine.submit(draft("n1", false)).await.unwrap();
    engine.submit(draft("n2", false)).await.unwrap();

    assert_eq!(
        engine.settle_next().await.unwrap().transaction.user_id,
        "n1"
    );

    engine.submit(draft("u1", true)).await.unwrap();
    assert_eq!(
        engine.settle_next().await.unwrap().transaction.user_id,
        "u1"
    );
    assert_eq!(
        engine.settle_next().await.unwrap().transaction.user_id,
        "n2"
    );
}

#[tokio::test]
async fn queue_snapshot_is_idempotent() {
    let engine = engine();
    engine.submit(draft("a", false)).await.unwrap();
    engine.submit(draft("b", true)).await.unwrap();

    let first = engine.pending().await;
    let second = engine.pending().await;
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn history_snapshot_is_idempotent() {
    let engine = engine();
    engine.submit(draft("a", false)).await.unwrap();
    engine.settle_next().await.unwrap();

    let first = engine.history().await;
    let second = engine.history().await;
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

#[tokio::test]
async fn settle_then_undo_matches_request_without_reenqueue() {
    let engine = engine();
    let accepted = engine.submit(draft("u-1", true)).await.unwrap();
    let outcome = engine.settle_next().await.unwrap();

    let undone = engine.undo_last().await.unwrap();
    assert_eq!(undone.user_id, accepted.user_id);
    assert_eq!(undone.bill_type, accepted.bill_type);
    assert_eq!(undone.amount, accepted.amount);
    assert_eq!(undone.date, accepted.date);
    assert_eq!(undone.due_date, accepted.due_date);
    assert_eq!(undone.is_urgent, accepted.is_urgent);
    assert_eq!(undone, outcome.transaction);

    // The undone transaction is gone from history and not back in the queue.
    assert!(engine.history().await.is_empty());
    assert!(engine.pending().await.is_empty());
}

#[tokio::test]
async fn settle_on_empty_queue_leaves_history_unchanged() {
    let engine = engine();
    engine.submit(draft("a", false)).await.unwrap();
    engine.settle_next().await.unwrap();

    let before = engine.history().await;
    let result = engine.settle_next().await;
    assert!(matches!(result, Err(PaymentError::NoPendingWork)));
    assert_eq!(engine.history().await, before);
}

#[tokio::test]
async fn empty_batch_changes_nothing() {
    let engine = engine();
    engine.submit(draft("a", false)).await.unwrap();

    let result = engine.submit_batch(Vec::new()).await;
    assert!(matches!(result, Err(PaymentError::EmptyBatch)));
    assert_eq!(engine.pending().await.len(), 1);
    assert!(engine.history().await.is_empty());
}

#[tokio::test]
async fn repeated_undo_drains_history_in_reverse() {
    let engine = engine();
    for user in ["a", "b", "c"] {
        engine.submit(draft(user, false)).await.unwrap();
        engine.settle_next().await.unwrap();
    }

    let mut undone = Vec::new();
    while let Ok(tx) = engine.undo_last().await {
        undone.push(tx.user_id);
    }
    assert_eq!(undone, vec!["c", "b", "a"]);
    assert!(matches!(
        engine.undo_last().await,
        Err(PaymentError::NoHistory)
    ));
}
