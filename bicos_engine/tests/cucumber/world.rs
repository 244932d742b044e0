use bicos_engine::{events::EventProducers, JsonFileDatabase, LedgerApi};
use cucumber::World;
use log::*;
use tempfile::TempDir;

#[derive(Default, Debug, World)]
pub struct LedgerWorld {
    pub system: Option<LedgerSystem>,
}

/// The ledger under test. The temporary directory holding the data file is removed when the scenario ends.
#[derive(Debug)]
pub struct LedgerSystem {
    pub dir: TempDir,
    pub api: LedgerApi<JsonFileDatabase>,
}

impl LedgerWorld {
    pub fn api(&self) -> &LedgerApi<JsonFileDatabase> {
        &self.system.as_ref().expect("Ledger not initialised").api
    }
}

impl LedgerSystem {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Could not create temp dir");
        let path = dir.path().join("data.json");
        let db = JsonFileDatabase::load(&path).await.expect("Error creating data file");
        debug!("🚀️ Created data file {}", path.display());
        let api = LedgerApi::new(db, EventProducers::default());
        Self { dir, api }
    }
}
