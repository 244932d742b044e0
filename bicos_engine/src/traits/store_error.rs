use thiserror::Error;

use crate::db_types::{NewTransaction, Transaction};

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("{entity} {id} was not found")]
    NotFound { entity: &'static str, id: String },
    #[error("Could not persist the data file. {0}")]
    PersistenceError(String),
    #[error(
        "Transfer is inconsistent. Debit {} of {} from {} was recorded, but the matching credit to {} failed: {reason}. \
         Operator reconciliation is required.",
        .debit.id, .debit.amount, .debit.user_id, .credit.user_id
    )]
    InconsistentTransfer { debit: Box<Transaction>, credit: Box<NewTransaction>, reason: String },
}

impl StoreError {
    pub fn not_found<S: ToString>(entity: &'static str, id: S) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::PersistenceError(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::PersistenceError(e.to_string())
    }
}
