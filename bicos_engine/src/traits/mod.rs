//! # Backend contracts
//!
//! This module defines the interface contracts that data store backends and payment gateways need to satisfy in
//! order to be driven by the APIs in [`crate::bicos_api`].
//!
//! * [`CatalogManagement`] provides read access to stores and products, plus the store view counter.
//! * [`ConversationManagement`] creates conversations and appends messages to them.
//! * [`LedgerManagement`] appends transactions to the ledger and queries them.
//! * [`CardGateway`] is the three-step charge protocol of a card payment processor.
//!
//! Backends report failures with [`StoreError`]; gateways with [`CardGatewayError`].
mod card_gateway;
mod catalog_management;
mod conversation_management;
mod ledger_management;
mod store_error;

pub use card_gateway::{CardGateway, CardGatewayError};
pub use catalog_management::CatalogManagement;
pub use conversation_management::ConversationManagement;
pub use ledger_management::LedgerManagement;
pub use store_error::StoreError;
