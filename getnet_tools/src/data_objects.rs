use std::fmt::{Debug, Display};

use bicos_common::Secret;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

//--------------------------------------     AccessToken     ---------------------------------------------------------
#[derive(Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub scope: String,
}

impl AccessToken {
    /// Wraps a bearer token that was issued earlier, e.g. one carried between calls by a caller that does not keep
    /// the full token response.
    pub fn bearer<S: Into<String>>(token: S) -> Self {
        Self { access_token: token.into(), token_type: "Bearer".into(), expires_in: 0, scope: "oob".into() }
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(****, type: {}, expires_in: {}s)", self.token_type, self.expires_in)
    }
}

//--------------------------------------      CardToken      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CardToken {
    pub number_token: String,
}

//--------------------------------------     CardHolder      ---------------------------------------------------------
/// The card details that accompany a number token on a credit charge.
#[derive(Debug, Clone, Default)]
pub struct CardHolder {
    pub name: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub security_code: Secret<String>,
}

//--------------------------------------    CreditCharge     ---------------------------------------------------------
/// A one-shot, single installment, full capture credit charge.
#[derive(Debug, Clone)]
pub struct CreditCharge {
    /// Amount in minor units (cents)
    pub amount: i64,
    /// The merchant-side reference for this charge. A fresh one is used for every attempt.
    pub order_id: String,
    pub customer_id: String,
    pub card_holder: CardHolder,
}

impl CreditCharge {
    /// Builds the JSON body for `POST /v1/payments/credit`.
    pub fn to_request_body(&self, seller_id: &str, card: &CardToken) -> Value {
        json!({
            "seller_id": seller_id,
            "amount": self.amount,
            "order": { "order_id": self.order_id },
            "customer": {
                "customer_id": self.customer_id,
                "billing_address": {}
            },
            "device": {},
            "shippings": [ { "address": {} } ],
            "credit": {
                "delayed": false,
                "save_card_data": false,
                "transaction_type": "FULL",
                "number_installments": 1,
                "card": {
                    "number_token": card.number_token,
                    "cardholder_name": self.card_holder.name,
                    "expiration_month": self.card_holder.expiration_month,
                    "expiration_year": self.card_holder.expiration_year,
                    "security_code": self.card_holder.security_code.reveal(),
                }
            }
        })
    }
}

//--------------------------------------    PaymentStatus    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Approved,
    Authorized,
    Pending,
    Denied,
    Error,
    Other(String),
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.to_uppercase().as_str() {
            "APPROVED" => Self::Approved,
            "AUTHORIZED" => Self::Authorized,
            "PENDING" => Self::Pending,
            "DENIED" => Self::Denied,
            "ERROR" => Self::Error,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        value.to_string()
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "APPROVED"),
            Self::Authorized => write!(f, "AUTHORIZED"),
            Self::Pending => write!(f, "PENDING"),
            Self::Denied => write!(f, "DENIED"),
            Self::Error => write!(f, "ERROR"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

//--------------------------------------   PaymentResponse   ---------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentResponse {
    pub payment_id: String,
    #[serde(default)]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    pub status: PaymentStatus,
    #[serde(default)]
    pub received_at: Option<String>,
    #[serde(default)]
    pub credit: Option<CreditDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditDetails {
    #[serde(default)]
    pub authorization_code: Option<String>,
    #[serde(default)]
    pub authorized_at: Option<String>,
    #[serde(default)]
    pub reason_code: Option<String>,
    #[serde(default)]
    pub reason_message: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl PaymentResponse {
    pub fn is_approved(&self) -> bool {
        self.status == PaymentStatus::Approved
    }

    /// The moment the issuer authorized the charge, if Getnet reported one in a parseable form.
    pub fn authorized_at(&self) -> Option<DateTime<Utc>> {
        self.credit.as_ref().and_then(|c| c.authorized_at.as_deref()).and_then(parse_timestamp)
    }

    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        self.received_at.as_deref().and_then(parse_timestamp)
    }

    pub fn authorization_code(&self) -> Option<&str> {
        self.credit.as_ref().and_then(|c| c.authorization_code.as_deref())
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s).ok().map(|t| t.with_timezone(&Utc))
}
