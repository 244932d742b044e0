//! Types exchanged with a card payment gateway during a charge.
//!
//! These are provider-agnostic. A gateway integration converts between these and its own wire types.
use std::fmt::Debug;

use bicos_common::{Amount, Secret};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db_types::UserId;

/// The status string gateways use for a captured, successful charge.
pub const APPROVED_STATUS: &str = "APPROVED";

/// A bearer token issued by the gateway for a single charge attempt.
#[derive(Clone, Default)]
pub struct GatewayToken(Secret<String>);

impl GatewayToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(Secret::new(token.into()))
    }

    pub fn reveal(&self) -> &str {
        self.0.reveal().as_str()
    }
}

impl Debug for GatewayToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GatewayToken(****)")
    }
}

/// A single-use reference to a card number, issued by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardToken(pub String);

/// A request to charge a card and credit the paying user's wallet.
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub user_id: UserId,
    pub card_number: Secret<String>,
    pub amount: Amount,
    pub card_holder_name: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub security_code: Secret<String>,
}

/// What the gateway needs for the final charge call, once the card number has been tokenized.
#[derive(Debug, Clone)]
pub struct ChargeDetails {
    /// Merchant-side reference for this attempt. Unique per attempt so that it can be found in gateway records.
    pub reference: String,
    pub user_id: UserId,
    pub amount: Amount,
    pub card_holder_name: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub security_code: Secret<String>,
}

impl ChargeDetails {
    pub fn for_request<S: Into<String>>(reference: S, request: &ChargeRequest) -> Self {
        Self {
            reference: reference.into(),
            user_id: request.user_id.clone(),
            amount: request.amount,
            card_holder_name: request.card_holder_name.clone(),
            expiration_month: request.expiration_month.clone(),
            expiration_year: request.expiration_year.clone(),
            security_code: request.security_code.clone(),
        }
    }
}

/// The terminal answer of the gateway to a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub payment_id: String,
    pub status: String,
    pub authorization_code: Option<String>,
    pub authorized_at: Option<DateTime<Utc>>,
    pub received_at: Option<DateTime<Utc>>,
}

impl PaymentResult {
    /// Only the exact `APPROVED` status counts. Gateway integrations normalize their own status spelling.
    pub fn is_approved(&self) -> bool {
        self.status == APPROVED_STATUS
    }

    /// The timestamp a ledger credit for this payment carries: the authorization time, falling back to the time the
    /// gateway received the charge, and finally to `now`.
    pub fn settlement_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.authorized_at.or(self.received_at).unwrap_or(now)
    }
}
