use bicos_common::Secret;
use thiserror::Error;

use crate::gateway_types::{CardToken, ChargeDetails, GatewayToken, PaymentResult};

/// Each variant corresponds to the stage of the charge protocol that failed.
#[derive(Debug, Clone, Error)]
pub enum CardGatewayError {
    #[error("Gateway authentication failed. {0}")]
    AuthError(String),
    #[error("Card tokenization failed. {0}")]
    TokenizationError(String),
    #[error("Gateway error. {0}")]
    GatewayError(String),
}

/// The three-step charge protocol of a card payment gateway.
///
/// The steps are strictly sequential: `tokenize_card` needs the token from `acquire_access_token`, and
/// `submit_charge` needs both. Implementations must not retry or cache; callers acquire a new token for every charge
/// attempt.
#[allow(async_fn_in_trait)]
pub trait CardGateway {
    async fn acquire_access_token(&self) -> Result<GatewayToken, CardGatewayError>;

    async fn tokenize_card(
        &self,
        token: &GatewayToken,
        card_number: &Secret<String>,
    ) -> Result<CardToken, CardGatewayError>;

    /// Submits the charge. A returned [`PaymentResult`] may still carry a non-approved status.
    async fn submit_charge(
        &self,
        token: &GatewayToken,
        card: &CardToken,
        charge: &ChargeDetails,
    ) -> Result<PaymentResult, CardGatewayError>;
}
