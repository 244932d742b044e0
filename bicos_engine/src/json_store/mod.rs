//! The flat-file backend.
//!
//! The whole marketplace lives in a single JSON document that is read once at start-up and rewritten in full after
//! every mutation. [`JsonFileDatabase`] implements every backend trait in [`crate::traits`].
//!
//! The [`db`] submodule holds the plain functions that query and modify a [`crate::db_types::Document`]; the
//! trait implementations wrap them in the lock-mutate-persist cycle.
pub mod db;
mod json_impl;

pub use json_impl::JsonFileDatabase;
