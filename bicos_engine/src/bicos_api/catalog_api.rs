use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{EntityId, Product, Store},
    traits::{CatalogManagement, StoreError},
};

/// Store and product lookups.
pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn stores(&self) -> Result<Vec<Store>, StoreError> {
        self.db.fetch_stores().await
    }

    /// Fetches a store without counting it as a view.
    pub async fn store(&self, id: &EntityId) -> Result<Store, StoreError> {
        self.db.fetch_store(id).await
    }

    /// Fetches a store on behalf of a visitor. Every call increments the store's view counter.
    pub async fn view_store(&self, id: &EntityId) -> Result<Store, StoreError> {
        let store = self.db.record_view(id).await?;
        trace!("🏪️ Store {id} viewed ({} views)", store.views);
        Ok(store)
    }

    pub async fn products(&self) -> Result<Vec<Product>, StoreError> {
        self.db.fetch_products().await
    }

    pub async fn products_for_store(&self, store_id: &EntityId) -> Result<Vec<Product>, StoreError> {
        self.db.fetch_products_for_store(store_id).await
    }

    pub async fn product(&self, id: &EntityId) -> Result<Product, StoreError> {
        self.db.fetch_product(id).await
    }
}
