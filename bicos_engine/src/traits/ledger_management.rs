use log::*;

use crate::{
    db_types::{NewTransaction, Transaction, UserId},
    traits::StoreError,
};

/// The `LedgerManagement` trait defines the storage contract for the append-only transaction ledger.
///
/// Balances are never stored. They are derived from the transactions returned by
/// [`LedgerManagement::fetch_transactions_for_user`].
#[allow(async_fn_in_trait)]
pub trait LedgerManagement {
    /// Assigns a new identifier to the transaction, inserts it at the head of the ledger and persists the ledger
    /// before returning the stored record.
    async fn insert_transaction(&self, tx: NewTransaction) -> Result<Transaction, StoreError>;

    /// Returns every transaction for the user, most recently *inserted* first. This is insertion order, not
    /// timestamp order.
    async fn fetch_transactions_for_user(&self, user_id: &UserId) -> Result<Vec<Transaction>, StoreError>;

    /// Writes the two legs of a transfer: `debit` first, then `credit`.
    ///
    /// The default implementation issues two independent inserts. If the debit is written and the credit is not,
    /// the sender has been debited with no matching credit. That condition is reported as
    /// [`StoreError::InconsistentTransfer`] carrying the orphaned debit, and is never reported as success.
    /// Backends that can write both legs in a single step should override this method so that either both legs or
    /// neither are stored.
    async fn insert_transfer(
        &self,
        debit: NewTransaction,
        credit: NewTransaction,
    ) -> Result<(Transaction, Transaction), StoreError> {
        let debit = self.insert_transaction(debit).await?;
        match self.insert_transaction(credit.clone()).await {
            Ok(credit) => Ok((debit, credit)),
            Err(e) => {
                error!(
                    "📒️ UNRESOLVED DEBIT. Transaction {} debited {} from {}, but the credit to {} failed. {e}",
                    debit.id, debit.amount, debit.user_id, credit.user_id
                );
                Err(StoreError::InconsistentTransfer {
                    debit: Box::new(debit),
                    credit: Box::new(credit),
                    reason: e.to_string(),
                })
            },
        }
    }
}
