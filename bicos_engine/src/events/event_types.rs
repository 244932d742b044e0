use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    db_types::{NewTransaction, Transaction, UserId},
    gateway_types::PaymentResult,
};

/// Emitted when a charge reaches a final gateway answer, approved or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeSettledEvent {
    pub user_id: UserId,
    /// The merchant-side reference that was sent to the gateway with the charge.
    pub reference: String,
    pub payment: PaymentResult,
    /// The wallet credit, present only if the charge was approved.
    pub transaction: Option<Transaction>,
}

/// Emitted when one leg of a transfer was written and the other was not. Needs operator reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedDebitEvent {
    pub debit: Transaction,
    pub missing_credit: NewTransaction,
    pub reason: String,
    pub detected_at: DateTime<Utc>,
}

impl UnresolvedDebitEvent {
    pub fn new(debit: Transaction, missing_credit: NewTransaction, reason: String) -> Self {
        Self { debit, missing_credit, reason, detected_at: Utc::now() }
    }
}
