use thiserror::Error;

use crate::traits::{CardGatewayError, StoreError};

#[derive(Debug, Clone, Error)]
pub enum LedgerApiError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Error)]
pub enum ConversationApiError {
    #[error("Message text cannot be empty")]
    EmptyMessage,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The reason a charge ended in the `Failed` state.
#[derive(Debug, Clone, Error)]
pub enum ChargeError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Gateway authentication failed. {0}")]
    AuthError(String),
    #[error("Card tokenization failed. {0}")]
    TokenizationError(String),
    #[error("Gateway error. {0}")]
    GatewayError(String),
    #[error("The charge was approved, but the wallet credit could not be recorded. {0}")]
    Ledger(StoreError),
}

impl From<CardGatewayError> for ChargeError {
    fn from(e: CardGatewayError) -> Self {
        match e {
            CardGatewayError::AuthError(s) => Self::AuthError(s),
            CardGatewayError::TokenizationError(s) => Self::TokenizationError(s),
            CardGatewayError::GatewayError(s) => Self::GatewayError(s),
        }
    }
}
