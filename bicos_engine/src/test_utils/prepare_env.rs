use std::path::{Path, PathBuf};

use log::*;
use serde_json::json;

use crate::{db_types::Document, JsonFileDatabase};

pub fn prepare_test_env() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
}

pub fn random_data_path() -> PathBuf {
    std::env::temp_dir().join(format!("bicos_test_{}.json", rand::random::<u64>()))
}

/// A small marketplace: two stores, three products, one conversation and no transactions.
pub fn seed_document() -> Document {
    let doc = json!({
        "stores": [
            { "id": "store-1", "name": "Padaria do Zé", "banner": "padaria.png", "views": 0, "category": "food" },
            { "id": "store-2", "name": "Feira Livre", "banner": "feira.png", "views": 10 }
        ],
        "products": [
            { "id": "prod-1", "storeId": "store-1", "name": "Pão francês", "description": "Crocante", "price": "0.50" },
            { "id": "prod-2", "storeId": "store-1", "name": "Bolo de fubá", "description": "Caseiro" },
            { "id": "prod-3", "storeId": "store-2", "name": "Banana", "description": "Prata, a dúzia" }
        ],
        "conversations": [
            { "id": "conv-1", "messages": [ { "id": "msg-1", "isMe": true, "text": "Oi, ainda tem bolo?" } ] }
        ],
        "transactions": []
    });
    serde_json::from_value(doc).expect("Seed document is not valid")
}

/// Writes `doc` to `path` (pretty-printed, the same way the store does) and opens a database on it.
pub async fn create_database<P: AsRef<Path>>(path: P, doc: &Document) -> JsonFileDatabase {
    let path = path.as_ref();
    let data = crate::json_store::db::document::to_pretty_json(doc).expect("Error serializing seed document");
    std::fs::write(path, data).expect("Error writing seed document");
    info!("🚀️ Created test data file {}", path.display());
    JsonFileDatabase::load(path).await.expect("Error loading seed document")
}

/// A fresh, seeded database at a random path.
pub async fn seeded_database() -> JsonFileDatabase {
    prepare_test_env();
    create_database(random_data_path(), &seed_document()).await
}

pub fn remove_data_file<P: AsRef<Path>>(path: P) {
    let path = path.as_ref();
    if let Err(e) = std::fs::remove_file(path) {
        warn!("🚀️ Could not remove test data file {}: {e}", path.display());
    }
}
