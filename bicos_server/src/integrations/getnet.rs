//! Binds the Getnet client to the engine's [`CardGateway`] protocol.
use bicos_common::Secret;
use bicos_engine::{
    gateway_types::{CardToken, ChargeDetails, GatewayToken, PaymentResult},
    CardGateway,
    CardGatewayError,
};
use getnet_tools::{
    AccessToken,
    CardHolder,
    CardToken as GetnetCardToken,
    CreditCharge,
    GetnetApi,
    GetnetApiError,
    GetnetConfig,
    PaymentResponse,
};
use log::*;

#[derive(Clone)]
pub struct GetnetGateway(GetnetApi);

impl GetnetGateway {
    pub fn new(config: GetnetConfig) -> Result<Self, GetnetApiError> {
        let api = GetnetApi::new(config)?;
        Ok(Self(api))
    }

    pub fn api(&self) -> &GetnetApi {
        &self.0
    }
}

impl CardGateway for GetnetGateway {
    async fn acquire_access_token(&self) -> Result<GatewayToken, CardGatewayError> {
        let token = self.0.acquire_access_token().await.map_err(gateway_error)?;
        Ok(GatewayToken::new(token.access_token))
    }

    async fn tokenize_card(
        &self,
        token: &GatewayToken,
        card_number: &Secret<String>,
    ) -> Result<CardToken, CardGatewayError> {
        let token = AccessToken::bearer(token.reveal());
        let card = self.0.tokenize_card(&token, card_number).await.map_err(gateway_error)?;
        Ok(CardToken(card.number_token))
    }

    async fn submit_charge(
        &self,
        token: &GatewayToken,
        card: &CardToken,
        charge: &ChargeDetails,
    ) -> Result<PaymentResult, CardGatewayError> {
        let credit = credit_charge(charge)?;
        let card = GetnetCardToken { number_token: card.0.clone() };
        let token = AccessToken::bearer(token.reveal());
        let payment = self.0.submit_charge(&token, &card, &credit).await.map_err(gateway_error)?;
        Ok(payment_result(payment))
    }
}

fn gateway_error(e: GetnetApiError) -> CardGatewayError {
    match e {
        GetnetApiError::AuthError(s) => CardGatewayError::AuthError(s),
        GetnetApiError::TokenizationError(s) => CardGatewayError::TokenizationError(s),
        GetnetApiError::GatewayError(s) => CardGatewayError::GatewayError(s),
        GetnetApiError::Initialization(s) => CardGatewayError::GatewayError(s),
    }
}

fn credit_charge(charge: &ChargeDetails) -> Result<CreditCharge, CardGatewayError> {
    let amount = charge.amount.to_minor_units().map_err(|e| CardGatewayError::GatewayError(e.to_string()))?;
    Ok(CreditCharge {
        amount,
        order_id: charge.reference.clone(),
        customer_id: charge.user_id.to_string(),
        card_holder: CardHolder {
            name: charge.card_holder_name.clone(),
            expiration_month: charge.expiration_month.clone(),
            expiration_year: charge.expiration_year.clone(),
            security_code: charge.security_code.clone(),
        },
    })
}

fn payment_result(payment: PaymentResponse) -> PaymentResult {
    let authorized_at = payment.authorized_at();
    let received_at = payment.received_at();
    if authorized_at.is_none() && payment.is_approved() {
        warn!("💳️ Payment {} was approved without a readable authorization time", payment.payment_id);
    }
    PaymentResult {
        authorization_code: payment.authorization_code().map(String::from),
        payment_id: payment.payment_id,
        status: payment.status.to_string(),
        authorized_at,
        received_at,
    }
}
