//! # Getnet tools
//!
//! A thin client for the Getnet credit card gateway. A charge takes three sequential calls:
//! 1. [`GetnetApi::acquire_access_token`] exchanges the pre-shared Basic credential for a bearer token
//!    (client-credentials grant).
//! 2. [`GetnetApi::tokenize_card`] swaps a raw card number for a single-use number token.
//! 3. [`GetnetApi::submit_charge`] submits a one-shot, full-capture credit payment.
//!
//! Nothing is retried or cached. Every call is bounded by the configured timeout.
mod api;
mod config;
mod data_objects;
mod error;

pub use api::GetnetApi;
pub use config::{GetnetConfig, DEFAULT_GETNET_URL, DEFAULT_TIMEOUT_MS};
pub use data_objects::{
    AccessToken,
    CardHolder,
    CardToken,
    CreditCharge,
    CreditDetails,
    PaymentResponse,
    PaymentStatus,
};
pub use error::GetnetApiError;
