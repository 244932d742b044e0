use crate::db_types::{Document, NewTransaction, Transaction, UserId};

/// Mints an id for the transaction and inserts it at the head of the ledger.
pub fn insert_transaction(tx: NewTransaction, doc: &mut Document) -> Transaction {
    let tx = tx.into_transaction();
    doc.transactions.insert(0, tx.clone());
    tx
}

/// Inserts both legs of a transfer, debit first, so that the credit ends up at the head of the ledger.
pub fn insert_transfer(debit: NewTransaction, credit: NewTransaction, doc: &mut Document) -> (Transaction, Transaction) {
    let debit = insert_transaction(debit, doc);
    let credit = insert_transaction(credit, doc);
    (debit, credit)
}

/// All transactions for the user in ledger order (most recently inserted first).
pub fn transactions_for_user(user_id: &UserId, doc: &Document) -> Vec<Transaction> {
    doc.transactions.iter().filter(|t| &t.user_id == user_id).cloned().collect()
}
