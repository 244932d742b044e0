//! Wallet bookkeeping.
//!
//! The ledger is append-only. A user's balance is never stored; it is always the sum of their transactions.
use std::fmt::Debug;

use bicos_common::Amount;
use chrono::{DateTime, Utc};
use log::*;

use crate::{
    bicos_api::{
        errors::LedgerApiError,
        ledger_objects::{TransferResult, UserHistory},
    },
    db_types::{NewTransaction, Transaction, UserId},
    events::{EventProducers, UnresolvedDebitEvent},
    traits::{LedgerManagement, StoreError},
};

pub struct LedgerApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B: Debug> Debug for LedgerApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LedgerApi ({:?})", self.db)
    }
}

impl<B> LedgerApi<B>
where B: LedgerManagement
{
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }

    /// Appends a single entry to the user's wallet. `amount` is signed: credits are positive, debits negative.
    pub async fn record_transaction<S: Into<String>>(
        &self,
        user_id: UserId,
        amount: Amount,
        date: DateTime<Utc>,
        label: S,
    ) -> Result<Transaction, LedgerApiError> {
        let tx = self.db.insert_transaction(NewTransaction::new(user_id, amount, date, label)).await?;
        debug!("📒️ Recorded {} for {} ({})", tx.amount, tx.user_id, tx.text);
        Ok(tx)
    }

    /// Moves `amount` from one wallet to another.
    ///
    /// The transfer is written as two entries with the same timestamp and label: `-amount` for the sender and
    /// `+amount` for the recipient. `amount` must be strictly positive. The sender's balance is not checked, so
    /// wallets can go negative.
    ///
    /// If the backend stores the debit but not the credit, [`StoreError::InconsistentTransfer`] is returned and an
    /// [`UnresolvedDebitEvent`] is published.
    pub async fn transfer<S: Into<String>>(
        &self,
        from: UserId,
        to: UserId,
        amount: Amount,
        label: S,
    ) -> Result<TransferResult, LedgerApiError> {
        if !amount.is_positive() {
            return Err(LedgerApiError::InvalidAmount(format!("Transfers must be for a positive amount, not {amount}")));
        }
        let label = label.into();
        let now = Utc::now();
        let debit = NewTransaction::new(from.clone(), -amount, now, label.clone());
        let credit = NewTransaction::new(to.clone(), amount, now, label);
        match self.db.insert_transfer(debit, credit).await {
            Ok((debit, credit)) => {
                info!("📒️ Transferred {amount} from {from} to {to}");
                Ok(TransferResult { debit, credit })
            },
            Err(StoreError::InconsistentTransfer { debit, credit, reason }) => {
                self.call_unresolved_debit_hook(&debit, &credit, &reason).await;
                Err(StoreError::InconsistentTransfer { debit, credit, reason }.into())
            },
            Err(e) => {
                warn!("📒️ Transfer of {amount} from {from} to {to} failed. Nothing was recorded. {e}");
                Err(e.into())
            },
        }
    }

    async fn call_unresolved_debit_hook(&self, debit: &Transaction, credit: &NewTransaction, reason: &str) {
        for emitter in &self.producers.unresolved_debit_producer {
            debug!("📒️ Notifying unresolved debit hook subscribers");
            let event = UnresolvedDebitEvent::new(debit.clone(), credit.clone(), reason.to_string());
            emitter.publish_event(event).await;
        }
    }

    /// Every transaction for the user, most recently recorded first.
    pub async fn list_for(&self, user_id: &UserId) -> Result<Vec<Transaction>, LedgerApiError> {
        Ok(self.db.fetch_transactions_for_user(user_id).await?)
    }

    pub async fn balance_of(&self, user_id: &UserId) -> Result<Amount, LedgerApiError> {
        let txs = self.list_for(user_id).await?;
        Ok(txs.iter().map(|t| t.amount).sum())
    }

    /// The balance and transaction list of the user, read in one go so that they agree with each other.
    pub async fn history(&self, user_id: &UserId) -> Result<UserHistory, LedgerApiError> {
        let txs = self.list_for(user_id).await?;
        Ok(UserHistory::new(user_id.clone(), txs))
    }
}
