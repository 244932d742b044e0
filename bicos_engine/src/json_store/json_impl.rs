//! `JsonFileDatabase` is a concrete implementation of a Bicos backend.
//!
//! It keeps the whole document in memory behind an async mutex and rewrites the data file after every mutation.
//! It implements [`CatalogManagement`], [`ConversationManagement`] and [`LedgerManagement`].
use std::{
    fmt::Debug,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::*;
use tokio::sync::Mutex;

use super::db::{conversations, document, stores, transactions};
use crate::{
    db_types::{Conversation, Document, EntityId, NewMessage, NewTransaction, Product, Store, Transaction, UserId},
    traits::{CatalogManagement, ConversationManagement, LedgerManagement, StoreError},
};

#[derive(Clone)]
pub struct JsonFileDatabase {
    path: Arc<PathBuf>,
    doc: Arc<Mutex<Document>>,
}

impl Debug for JsonFileDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JsonFileDatabase ({})", self.path.display())
    }
}

impl JsonFileDatabase {
    /// Loads the data file at `path`. If there is no file yet, an empty document is created and written out.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let doc = match document::load_document(&path).await? {
            Some(doc) => doc,
            None => {
                warn!("🗃️ {} does not exist. Starting with an empty marketplace.", path.display());
                let doc = Document::default();
                document::write_document(&path, &doc).await?;
                doc
            },
        };
        info!("🗃️ Marketplace data loaded from {}", path.display());
        Ok(Self { path: Arc::new(path), doc: Arc::new(Mutex::new(doc)) })
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// A copy of the whole document as it currently stands.
    pub async fn snapshot(&self) -> Document {
        self.doc.lock().await.clone()
    }

    /// Writes the current in-memory document to disk.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let doc = self.doc.lock().await;
        document::write_document(&self.path, &doc).await
    }

    async fn read<T, F>(&self, f: F) -> Result<T, StoreError>
    where F: FnOnce(&Document) -> Result<T, StoreError> {
        let doc = self.doc.lock().await;
        f(&doc)
    }

    /// Runs `f` against the document and writes the result to disk, all under the lock.
    ///
    /// If `f` fails, or the write fails, the in-memory document is restored to what it was before `f` ran, and the
    /// error is returned.
    async fn mutate<T, F>(&self, f: F) -> Result<T, StoreError>
    where F: FnOnce(&mut Document) -> Result<T, StoreError> {
        let mut doc = self.doc.lock().await;
        let before = doc.clone();
        let result = match f(&mut doc) {
            Ok(v) => document::write_document(&self.path, &doc).await.map(|_| v),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            debug!("🗃️ Mutation failed. Rolling back in-memory changes. {e}");
            *doc = before;
        }
        result
    }
}

impl CatalogManagement for JsonFileDatabase {
    async fn fetch_stores(&self) -> Result<Vec<Store>, StoreError> {
        self.read(|doc| Ok(doc.stores.clone())).await
    }

    async fn fetch_store(&self, id: &EntityId) -> Result<Store, StoreError> {
        self.read(|doc| stores::fetch_store(id, doc).cloned()).await
    }

    async fn record_view(&self, id: &EntityId) -> Result<Store, StoreError> {
        let store = self
            .mutate(|doc| {
                stores::increment_views(id, doc)?;
                stores::fetch_store(id, doc).cloned()
            })
            .await?;
        trace!("🗃️ Store {id} has now been viewed {} times", store.views);
        Ok(store)
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        self.read(|doc| Ok(doc.products.clone())).await
    }

    async fn fetch_products_for_store(&self, store_id: &EntityId) -> Result<Vec<Product>, StoreError> {
        self.read(|doc| stores::products_for_store(store_id, doc)).await
    }

    async fn fetch_product(&self, id: &EntityId) -> Result<Product, StoreError> {
        self.read(|doc| stores::fetch_product(id, doc).cloned()).await
    }
}

impl ConversationManagement for JsonFileDatabase {
    async fn fetch_conversations(&self) -> Result<Vec<Conversation>, StoreError> {
        self.read(|doc| Ok(doc.conversations.clone())).await
    }

    async fn fetch_conversation(&self, id: &EntityId) -> Result<Conversation, StoreError> {
        self.read(|doc| conversations::fetch_conversation(id, doc).cloned()).await
    }

    async fn create_conversation(&self, first: NewMessage) -> Result<Conversation, StoreError> {
        let conversation = self.mutate(|doc| Ok(conversations::insert_conversation(first, doc))).await?;
        debug!("🗃️ Conversation {} started", conversation.id);
        Ok(conversation)
    }

    async fn append_message(&self, id: &EntityId, message: NewMessage) -> Result<Conversation, StoreError> {
        self.mutate(|doc| conversations::append_message(id, message, doc)).await
    }
}

impl LedgerManagement for JsonFileDatabase {
    async fn insert_transaction(&self, tx: NewTransaction) -> Result<Transaction, StoreError> {
        let tx = self.mutate(|doc| Ok(transactions::insert_transaction(tx, doc))).await?;
        debug!("🗃️ Transaction {} of {} for {} saved", tx.id, tx.amount, tx.user_id);
        Ok(tx)
    }

    async fn fetch_transactions_for_user(&self, user_id: &UserId) -> Result<Vec<Transaction>, StoreError> {
        self.read(|doc| Ok(transactions::transactions_for_user(user_id, doc))).await
    }

    /// Both legs are added to the document and written out in a single persist, so either both are stored or
    /// neither is.
    async fn insert_transfer(
        &self,
        debit: NewTransaction,
        credit: NewTransaction,
    ) -> Result<(Transaction, Transaction), StoreError> {
        let (debit, credit) = self.mutate(|doc| Ok(transactions::insert_transfer(debit, credit, doc))).await?;
        debug!(
            "🗃️ Transfer of {} from {} to {} saved as {} and {}",
            credit.amount, debit.user_id, credit.user_id, debit.id, credit.id
        );
        Ok((debit, credit))
    }
}
