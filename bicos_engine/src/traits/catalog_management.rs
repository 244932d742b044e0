use crate::{
    db_types::{EntityId, Product, Store},
    traits::StoreError,
};

/// Read access to the store and product catalog.
///
/// Products are read-only. Stores are too, apart from the view counter, which is only ever changed through
/// [`CatalogManagement::record_view`].
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    async fn fetch_stores(&self) -> Result<Vec<Store>, StoreError>;

    /// Fetches a store without touching its view counter.
    async fn fetch_store(&self, id: &EntityId) -> Result<Store, StoreError>;

    /// Increments the view counter of the store, persists it, and returns the updated store.
    async fn record_view(&self, id: &EntityId) -> Result<Store, StoreError>;

    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Fetches the products belonging to the given store. Fails with `NotFound` if the store does not exist.
    async fn fetch_products_for_store(&self, store_id: &EntityId) -> Result<Vec<Product>, StoreError>;

    async fn fetch_product(&self, id: &EntityId) -> Result<Product, StoreError>;
}
