//! # Bicos server
//!
//! The HTTP face of the Bicos marketplace. It serves the store catalog and buyer/seller conversations out of a single
//! JSON data file, and keeps every user's wallet as an append-only ledger in the same file. Wallets are topped up by
//! charging a credit card through Getnet.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `GET /`, `GET /health` and `GET /api`: greeting and liveness checks.
//! * `GET /store/all`, `GET /store/{id}` (counts a view), `GET /store/{id}/products`.
//! * `GET /product/all`, `GET /product/{id}`.
//! * `GET /conversation/all`, `GET /conversation/{id}`, `POST /conversation/create`, `POST /conversation/{id}`.
//! * `POST /transaction/create`: charges a card and credits the wallet.
//! * `GET /transaction/{user_id}`: the user's transactions and balance.
//! * `GET /transaction/{from}/{to}/{amount}/{text}`: transfers between wallets.
//!
//! Every response body carries an `isOk` flag. Failures carry `error.code` and `error.message` as well.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
