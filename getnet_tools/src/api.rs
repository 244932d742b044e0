use std::sync::Arc;

use bicos_common::Secret;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client,
    RequestBuilder,
};
use serde::de::DeserializeOwned;

use crate::{
    config::GetnetConfig,
    data_objects::{AccessToken, CardToken, CreditCharge, PaymentResponse},
    error::RestError,
    GetnetApiError,
};

const TOKEN_PATH: &str = "/auth/oauth/v2/token";
const CARD_TOKEN_PATH: &str = "/v1/tokens/card";
const CREDIT_PATH: &str = "/v1/payments/credit";

#[derive(Clone)]
pub struct GetnetApi {
    config: GetnetConfig,
    client: Arc<Client>,
}

impl GetnetApi {
    pub fn new(config: GetnetConfig) -> Result<Self, GetnetApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GetnetApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &GetnetConfig {
        &self.config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    async fn rest_query<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, RestError> {
        let response = req.send().await.map_err(|e| RestError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            trace!("💳️ REST query successful. {status}");
            response.json::<T>().await.map_err(|e| RestError::Json(e.to_string()))
        } else {
            // The body can carry card details echoed back by the gateway, so it stays out of the error message.
            let body = response.text().await.unwrap_or_default();
            debug!("💳️ REST query refused. {status}. {body}");
            Err(RestError::Status(status.as_u16()))
        }
    }

    /// Exchanges the pre-shared credential for a bearer token using the client credentials grant.
    pub async fn acquire_access_token(&self) -> Result<AccessToken, GetnetApiError> {
        let url = self.url(TOKEN_PATH);
        debug!("💳️ Requesting access token from {url}");
        let req = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Basic {}", self.config.credential.reveal()))
            .form(&[("scope", "oob"), ("grant_type", "client_credentials")]);
        let token = self.rest_query::<AccessToken>(req).await.map_err(|e| GetnetApiError::AuthError(e.to_string()))?;
        trace!("💳️ Access token acquired. {token:?}");
        Ok(token)
    }

    /// Swaps a raw card number for a number token. The card number never leaves this call in any other form.
    pub async fn tokenize_card(
        &self,
        token: &AccessToken,
        card_number: &Secret<String>,
    ) -> Result<CardToken, GetnetApiError> {
        let url = self.url(CARD_TOKEN_PATH);
        debug!("💳️ Requesting card token from {url}");
        let req = self
            .client
            .post(url)
            .bearer_auth(&token.access_token)
            .form(&[("card_number", card_number.reveal().as_str())]);
        let card = self
            .rest_query::<CardToken>(req)
            .await
            .map_err(|e| GetnetApiError::TokenizationError(e.to_string()))?;
        trace!("💳️ Card tokenized");
        Ok(card)
    }

    /// Submits a one-shot credit charge.
    ///
    /// A successful return only means that Getnet processed the request. Check [`PaymentResponse::status`] to
    /// learn whether the charge was approved.
    pub async fn submit_charge(
        &self,
        token: &AccessToken,
        card: &CardToken,
        charge: &CreditCharge,
    ) -> Result<PaymentResponse, GetnetApiError> {
        let url = self.url(CREDIT_PATH);
        debug!("💳️ Submitting charge of {} cents for order {} to {url}", charge.amount, charge.order_id);
        let body = charge.to_request_body(&self.config.seller_id, card);
        let req = self.client.post(url).bearer_auth(&token.access_token).json(&body);
        let payment = self
            .rest_query::<PaymentResponse>(req)
            .await
            .map_err(|e| GetnetApiError::GatewayError(e.to_string()))?;
        info!("💳️ Charge for order {} returned status {} (payment {})", charge.order_id, payment.status, payment.payment_id);
        Ok(payment)
    }
}
