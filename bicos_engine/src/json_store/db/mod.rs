//! Query and mutation functions over an in-memory [`Document`](crate::db_types::Document).
//!
//! None of these functions persist anything. Callers are responsible for writing the document back.
pub mod conversations;
pub mod document;
pub mod stores;
pub mod transactions;
