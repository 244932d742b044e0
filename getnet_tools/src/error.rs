use thiserror::Error;

/// Failures are tagged with the stage of the charge flow they happened in.
#[derive(Debug, Clone, Error)]
pub enum GetnetApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not obtain an access token. {0}")]
    AuthError(String),
    #[error("Could not tokenize the card. {0}")]
    TokenizationError(String),
    #[error("Payment gateway error. {0}")]
    GatewayError(String),
}

/// The outcome of a single REST exchange that did not produce the expected payload.
#[derive(Debug, Clone, Error)]
pub(crate) enum RestError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Request was refused with HTTP status {0}")]
    Status(u16),
    #[error("Could not deserialize response: {0}")]
    Json(String),
}
