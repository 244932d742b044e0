use bicos_common::Amount;
use serde::Serialize;

use crate::db_types::{Transaction, UserId};

/// A user's wallet: the derived balance together with every transaction that makes it up, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHistory {
    pub user_id: UserId,
    pub balance: Amount,
    pub transactions: Vec<Transaction>,
}

impl UserHistory {
    pub fn new(user_id: UserId, transactions: Vec<Transaction>) -> Self {
        let balance = transactions.iter().map(|t| t.amount).sum();
        Self { user_id, balance, transactions }
    }
}

/// The two ledger entries of a peer-to-peer transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferResult {
    pub debit: Transaction,
    pub credit: Transaction,
}
