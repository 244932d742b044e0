//! # Bicos engine public API
//!
//! The `bicos_api` module exposes the programmatic API of the marketplace engine. Each API is created by supplying a
//! backend that implements the traits in [`crate::traits`] that the API needs, so callers can pick the pieces they
//! want.
//!
//! * [`catalog_api`] provides store and product lookups, and records store views.
//! * [`conversation_api`] starts conversations and appends messages to them.
//! * [`ledger_api`] records wallet transactions, performs peer-to-peer transfers and derives balances.
//! * [`charge_flow_api`] drives a card charge through a [`CardGateway`](crate::traits::CardGateway) and credits the
//!   paying user's wallet when the charge is approved.
//!
//! ```rust,ignore
//! use bicos_engine::{JsonFileDatabase, LedgerApi, events::EventProducers};
//! let db = JsonFileDatabase::load("data.json").await?;
//! let api = LedgerApi::new(db, EventProducers::default());
//! let history = api.history(&"u1".into()).await?;
//! ```
pub mod catalog_api;
pub mod charge_flow_api;
pub mod conversation_api;
pub mod errors;
pub mod ledger_api;
pub mod ledger_objects;
