use actix_web::{http::StatusCode, web, web::ServiceConfig};
use bicos_engine::{
    db_types::{EntityId, Product, Store},
    test_utils::prepare_env::{remove_data_file, seeded_database},
    CatalogApi,
    CatalogManagement,
    JsonFileDatabase,
    StoreError,
};
use serde_json::{json, Map};

use super::{helpers::get_request, mocks::MockCatalogManager};
use crate::routes::{ProductRoute, ProductsRoute, StoreProductsRoute, StoreRoute, StoresRoute};

fn store(id: &str, views: u64) -> Store {
    Store { id: EntityId::from(id), name: format!("Loja {id}"), banner: "banner.png".into(), views, details: Map::new() }
}

fn product(id: &str, store_id: &str) -> Product {
    Product {
        id: EntityId::from(id),
        store_id: EntityId::from(store_id),
        name: format!("Produto {id}"),
        description: String::new(),
        details: Map::new(),
    }
}

fn register<B: CatalogManagement + 'static>(cfg: &mut ServiceConfig, db: B) {
    cfg.service(StoresRoute::<B>::new())
        .service(StoreProductsRoute::<B>::new())
        .service(StoreRoute::<B>::new())
        .service(ProductsRoute::<B>::new())
        .service(ProductRoute::<B>::new())
        .app_data(web::Data::new(CatalogApi::new(db)));
}

#[actix_web::test]
async fn fetch_all_stores() {
    let mut db = MockCatalogManager::new();
    db.expect_fetch_stores().returning(|| Ok(vec![store("s1", 0), store("s2", 4)]));
    db.expect_fetch_store().never();
    let (status, body) = get_request("/store/all", |cfg| register(cfg, db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isOk"], true);
    assert_eq!(body["stores"].as_array().unwrap().len(), 2);
    assert_eq!(body["stores"][1]["views"], 4);
}

#[actix_web::test]
async fn fetching_a_store_counts_a_view() {
    let mut db = MockCatalogManager::new();
    db.expect_record_view().withf(|id| id.as_str() == "s1").times(1).returning(|_| Ok(store("s1", 1)));
    let (status, body) = get_request("/store/s1", |cfg| register(cfg, db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"]["id"], "s1");
    assert_eq!(body["store"]["views"], 1);
}

#[actix_web::test]
async fn unknown_store() {
    let mut db = MockCatalogManager::new();
    db.expect_record_view().returning(|id| Err(StoreError::not_found("Store", id)));
    let (status, body) = get_request("/store/nope", |cfg| register(cfg, db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["isOk"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Store nope was not found");
}

#[actix_web::test]
async fn products_of_a_store() {
    let mut db = MockCatalogManager::new();
    db.expect_fetch_products_for_store()
        .withf(|id| id.as_str() == "s1")
        .returning(|_| Ok(vec![product("p1", "s1"), product("p2", "s1")]));
    db.expect_record_view().never();
    let (status, body) = get_request("/store/s1/products", |cfg| register(cfg, db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"][0]["storeId"], "s1");
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn products() {
    let mut db = MockCatalogManager::new();
    db.expect_fetch_products().returning(|| Ok(vec![product("p1", "s1")]));
    let (status, body) = get_request("/product/all", |cfg| register(cfg, db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"][0]["id"], "p1");

    let mut db = MockCatalogManager::new();
    db.expect_fetch_product().withf(|id| id.as_str() == "p9").returning(|_| Ok(product("p9", "s2")));
    let (status, body) = get_request("/product/p9", |cfg| register(cfg, db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"], json!({ "id": "p9", "storeId": "s2", "name": "Produto p9", "description": "" }));
}

#[actix_web::test]
async fn unknown_routes() {
    let db = MockCatalogManager::new();
    let (status, body) = get_request("/shop/all", |cfg| register(cfg, db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[actix_web::test]
async fn views_are_persisted() {
    let db = seeded_database().await;
    let path = db.path().to_path_buf();
    let (_, body) = get_request("/store/store-2", |cfg| register(cfg, db.clone())).await;
    assert_eq!(body["store"]["views"], 11);
    let (_, body) = get_request("/store/store-2", |cfg| register(cfg, db.clone())).await;
    assert_eq!(body["store"]["views"], 12);

    let reloaded = JsonFileDatabase::load(&path).await.unwrap();
    let doc = reloaded.snapshot().await;
    assert_eq!(doc.stores[1].views, 12);
    assert_eq!(doc.stores[0].details["category"], "food");
    remove_data_file(path);
}
