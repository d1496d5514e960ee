use crate::error::{PaymentError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a positive monetary amount for a bill payment.
///
/// This is a wrapper around `rust_decimal::Decimal` that enforces positivity
/// at construction time, so an `Amount` held by a request is always valid.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation {
                missing_fields: vec!["amount".to_string()],
            })
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// An unvalidated payment request as it arrives on the wire.
///
/// Every field is optional so that missing fields surface as a
/// `PaymentError::Validation` listing all of them at once, rather than as a
/// deserialization failure on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRequestDraft {
    pub user_id: Option<String>,
    pub bill_type: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub is_urgent: Option<bool>,
}

/// A validated, immutable bill-payment request waiting to be settled.
///
/// Constructed only by validating a [`PaymentRequestDraft`]; once built it is
/// never mutated, so everything downstream can rely on its fields being
/// present and well formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub user_id: String,
    pub bill_type: String,
    pub amount: Amount,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub is_urgent: bool,
}

impl TryFrom<PaymentRequestDraft> for PaymentRequest {
    type Error = PaymentError;

    fn try_from(draft: PaymentRequestDraft) -> Result<Self> {
        let mut missing_fields = Vec::new();

        let user_id = draft.user_id.filter(|v| !v.trim().is_empty());
        if user_id.is_none() {
            missing_fields.push("userId".to_string());
        }
        let bill_type = draft.bill_type.filter(|v| !v.trim().is_empty());
        if bill_type.is_none() {
            missing_fields.push("billType".to_string());
        }
        // A non-positive amount is treated the same as an absent one.
        let amount = draft.amount.and_then(|v| Amount::new(v).ok());
        if amount.is_none() {
            missing_fields.push("amount".to_string());
        }
        if draft.date.is_none() {
            missing_fields.push("date".to_string());
        }
        if draft.due_date.is_none() {
            missing_fields.push("dueDate".to_string());
        }

        match (user_id, bill_type, amount, draft.date, draft.due_date) {
            (Some(user_id), Some(bill_type), Some(amount), Some(date), Some(due_date)) => {
                Ok(Self {
                    user_id,
                    bill_type,
                    amount,
                    date,
                    due_date,
                    is_urgent: draft.is_urgent.unwrap_or(false),
                })
            }
            _ => Err(PaymentError::Validation { missing_fields }),
        }
    }
}

/// A settled bill payment.
///
/// Carries the exact field set of the [`PaymentRequest`] it was built from:
/// settlement changes which structure holds the payload, not the payload
/// itself. The invoice artifact and the audit timestamp belong to the
/// collaborators that produce them, not to this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub user_id: String,
    pub bill_type: String,
    pub amount: Amount,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub is_urgent: bool,
}

impl From<PaymentRequest> for Transaction {
    fn from(request: PaymentRequest) -> Self {
        Self {
            user_id: request.user_id,
            bill_type: request.bill_type,
            amount: request.amount,
            date: request.date,
            due_date: request.due_date,
            is_urgent: request.is_urgent,
        }
    }
}
