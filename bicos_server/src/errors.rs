use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use bicos_engine::{ChargeError, ConversationApiError, LedgerApiError, StoreError};
use log::*;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("Invalid amount. {0}")]
    InvalidAmount(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Could not authenticate with the payment gateway. {0}")]
    GatewayAuthError(String),
    #[error("The payment gateway could not tokenize the card. {0}")]
    CardTokenizationError(String),
    #[error("The payment gateway did not complete the charge. {0}")]
    GatewayError(String),
    #[error("The payment was not approved. Status: {status}")]
    PaymentDeclined { status: String, payment_id: String },
    #[error("Could not save the data. {0}")]
    PersistenceError(String),
    #[error("{0}")]
    InconsistentTransfer(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
}

impl ServerError {
    /// A stable, machine-readable identifier for the error. Clients should match on this rather than the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequestBody(_) | Self::InvalidRequestPath(_) => "INVALID_REQUEST",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::NoRecordFound(_) => "NOT_FOUND",
            Self::GatewayAuthError(_) => "GATEWAY_AUTH",
            Self::CardTokenizationError(_) => "CARD_TOKENIZATION",
            Self::GatewayError(_) => "GATEWAY",
            Self::PaymentDeclined { .. } => "PAYMENT_DECLINED",
            Self::PersistenceError(_) => "PERSISTENCE",
            Self::InconsistentTransfer(_) => "INCONSISTENT_TRANSFER",
            Self::InitializeError(_) | Self::IOError(_) | Self::BackendError(_) => "INTERNAL",
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::GatewayAuthError(_) => StatusCode::BAD_GATEWAY,
            Self::CardTokenizationError(_) => StatusCode::BAD_GATEWAY,
            Self::GatewayError(_) => StatusCode::BAD_GATEWAY,
            Self::PaymentDeclined { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InconsistentTransfer(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = json!({ "code": self.code(), "message": self.to_string() });
        let body = match self {
            Self::PaymentDeclined { status, payment_id } => {
                json!({ "isOk": false, "error": error, "status": status, "paymentId": payment_id })
            },
            _ => json!({ "isOk": false, "error": error }),
        };
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body.to_string())
    }
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Self::NoRecordFound(e.to_string()),
            StoreError::PersistenceError(_) => {
                error!("💻️ {e}");
                Self::PersistenceError(e.to_string())
            },
            StoreError::InconsistentTransfer { .. } => Self::InconsistentTransfer(e.to_string()),
        }
    }
}

impl From<LedgerApiError> for ServerError {
    fn from(e: LedgerApiError) -> Self {
        match e {
            LedgerApiError::InvalidAmount(s) => Self::InvalidAmount(s),
            LedgerApiError::Store(e) => e.into(),
        }
    }
}

impl From<ConversationApiError> for ServerError {
    fn from(e: ConversationApiError) -> Self {
        match e {
            ConversationApiError::EmptyMessage => Self::InvalidRequestBody(e.to_string()),
            ConversationApiError::Store(e) => e.into(),
        }
    }
}

impl From<ChargeError> for ServerError {
    fn from(e: ChargeError) -> Self {
        match e {
            ChargeError::InvalidAmount(s) => Self::InvalidAmount(s),
            ChargeError::AuthError(s) => Self::GatewayAuthError(s),
            ChargeError::TokenizationError(s) => Self::CardTokenizationError(s),
            ChargeError::GatewayError(s) => Self::GatewayError(s),
            ChargeError::Ledger(e) => Self::PersistenceError(format!(
                "The payment was approved, but the wallet credit could not be saved. {e}"
            )),
        }
    }
}
