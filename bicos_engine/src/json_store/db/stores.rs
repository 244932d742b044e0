use crate::{
    db_types::{Document, EntityId, Product, Store},
    traits::StoreError,
};

pub fn fetch_store<'a>(id: &EntityId, doc: &'a Document) -> Result<&'a Store, StoreError> {
    doc.stores.iter().find(|s| &s.id == id).ok_or_else(|| StoreError::not_found("Store", id))
}

/// Increments the view counter of the store and returns the new count.
pub fn increment_views(id: &EntityId, doc: &mut Document) -> Result<u64, StoreError> {
    let store = doc.stores.iter_mut().find(|s| &s.id == id).ok_or_else(|| StoreError::not_found("Store", id))?;
    store.views = store.views.saturating_add(1);
    Ok(store.views)
}

pub fn fetch_product<'a>(id: &EntityId, doc: &'a Document) -> Result<&'a Product, StoreError> {
    doc.products.iter().find(|p| &p.id == id).ok_or_else(|| StoreError::not_found("Product", id))
}

pub fn products_for_store(store_id: &EntityId, doc: &Document) -> Result<Vec<Product>, StoreError> {
    fetch_store(store_id, doc)?;
    Ok(doc.products.iter().filter(|p| &p.store_id == store_id).cloned().collect())
}
