//! HTTP API for the bill-payment engine.
//!
//! Exposes the submit/inspect/settle/undo operations as REST endpoints and
//! maps the error taxonomy onto status codes: validation and expected
//! empty-state conditions are client errors, everything else is a fault.

use crate::application::engine::ProcessingEngine;
use crate::domain::ports::AuditEntry;
use crate::domain::request::{PaymentRequest, PaymentRequestDraft, Transaction};
use crate::error::PaymentError;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// --- Request/response types ---

#[derive(Deserialize)]
struct BatchRequest {
    #[serde(default)]
    payments: Vec<PaymentRequestDraft>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    message: String,
    payment_request: PaymentRequest,
}

#[derive(Serialize)]
struct BatchResponse {
    message: String,
    queue: Vec<PaymentRequest>,
}

#[derive(Serialize)]
struct QueueResponse {
    queue: Vec<PaymentRequest>,
}

#[derive(Serialize)]
struct SettleResponse {
    message: String,
    payment: Transaction,
}

#[derive(Serialize)]
struct HistoryResponse {
    history: Vec<Transaction>,
}

#[derive(Serialize)]
struct UndoResponse {
    message: String,
    transaction: Transaction,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DailyLogResponse {
    daily_log: Vec<AuditEntry>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct RejectionResponse {
    message: String,
}

// --- Error mapping ---

struct ApiError(PaymentError);

impl From<PaymentError> for ApiError {
    fn from(e: PaymentError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            // Expected empty states: a client error carrying a message, not a fault.
            PaymentError::NoPendingWork | PaymentError::NoHistory => (
                StatusCode::BAD_REQUEST,
                Json(RejectionResponse {
                    message: self.0.to_string(),
                }),
            )
                .into_response(),
            e if e.is_client_error() => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: self.0.to_string(),
                }),
            )
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: self.0.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

// --- Handlers ---

async fn add_payment(
    State(engine): State<Arc<ProcessingEngine>>,
    Json(draft): Json<PaymentRequestDraft>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let payment_request = engine.submit(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: "Payment request added successfully".to_string(),
            payment_request,
        }),
    ))
}

async fn multiple_request(
    State(engine): State<Arc<ProcessingEngine>>,
    Json(batch): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    engine.submit_batch(batch.payments).await?;
    let queue = engine.pending().await;
    Ok(Json(BatchResponse {
        message: "Added multiple payment requests to the queue".to_string(),
        queue,
    }))
}

async fn view_queue(State(engine): State<Arc<ProcessingEngine>>) -> Json<QueueResponse> {
    Json(QueueResponse {
        queue: engine.pending().await,
    })
}

async fn process_payment(
    State(engine): State<Arc<ProcessingEngine>>,
) -> Result<Json<SettleResponse>, ApiError> {
    let outcome = engine.settle_next().await?;
    Ok(Json(SettleResponse {
        message: "Processed payment".to_string(),
        payment: outcome.transaction,
    }))
}

async fn transaction_history(State(engine): State<Arc<ProcessingEngine>>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        history: engine.history().await,
    })
}

async fn undo_last_transaction(
    State(engine): State<Arc<ProcessingEngine>>,
) -> Result<Json<UndoResponse>, ApiError> {
    let transaction = engine.undo_last().await?;
    Ok(Json(UndoResponse {
        message: "Last transaction undone".to_string(),
        transaction,
    }))
}

async fn view_daily_log(
    State(engine): State<Arc<ProcessingEngine>>,
) -> Result<Json<DailyLogResponse>, ApiError> {
    let daily_log = engine.audit_entries().await?;
    Ok(Json(DailyLogResponse { daily_log }))
}

// --- Server ---

pub fn build_router(engine: Arc<ProcessingEngine>) -> Router {
    Router::new()
        .route("/addPayment", post(add_payment))
        .route("/multipleRequest", post(multiple_request))
        .route("/viewQueue", get(view_queue))
        .route("/processPayment", post(process_payment))
        .route("/transactionHistory", get(transaction_history))
        .route("/undoLastTransaction", post(undo_last_transaction))
        .route("/viewDailyLog", get(view_daily_log))
        .with_state(engine)
}

pub async fn serve(
    listener: tokio::net::TcpListener,
    engine: Arc<ProcessingEngine>,
) -> crate::error::Result<()> {
    let addr = listener.local_addr()?;
    let app = build_router(engine);
    tracing::info!(%addr, "HTTP API server started");
    axum::serve(listener, app).await?;
    Ok(())
}
