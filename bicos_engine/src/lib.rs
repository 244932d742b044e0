//! Bicos Engine
//!
//! The engine holds the business logic of the Bicos marketplace: the store and product catalog, buyer/seller
//! conversations, the wallet ledger, and card top-ups through an external payment gateway. It does not know about
//! HTTP or about any particular gateway.
//!
//! The library is divided into two main sections:
//! 1. Storage. [`JsonFileDatabase`] keeps the whole marketplace in a single JSON document on disk. Storage backends
//!    implement the contracts in [`mod@traits`]; the data types they store are in [`db_types`].
//! 2. The public API ([`CatalogApi`], [`ConversationApi`], [`LedgerApi`] and [`ChargeFlowApi`]). Each is created by
//!    supplying a backend that implements the traits the API needs.
//!
//! The engine also publishes events ([`mod@events`]) when a charge settles or a transfer is left half-written, so that
//! other components can hook into them.
mod bicos_api;
mod json_store;

pub mod db_types;
pub mod events;
pub mod gateway_types;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use bicos_api::{
    catalog_api::CatalogApi,
    charge_flow_api::{ChargeFlowApi, ChargeOutcome, ChargeState, TOP_UP_LABEL},
    conversation_api::ConversationApi,
    errors::{ChargeError, ConversationApiError, LedgerApiError},
    ledger_api::LedgerApi,
    ledger_objects,
};
pub use json_store::JsonFileDatabase;
pub use traits::{CardGateway, CardGatewayError, CatalogManagement, ConversationManagement, LedgerManagement, StoreError};
