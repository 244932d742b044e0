use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use bicos_engine::{events::EventProducers, CatalogApi, ChargeFlowApi, ConversationApi, JsonFileDatabase, LedgerApi};
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{audit::create_audit_event_handlers, getnet::GetnetGateway},
    routes::{
        api_status,
        health,
        index,
        not_found,
        ConversationRoute,
        ConversationsRoute,
        CreateConversationRoute,
        CreateTransactionRoute,
        ProductRoute,
        ProductsRoute,
        SendMessageRoute,
        StoreProductsRoute,
        StoreRoute,
        StoresRoute,
        TransferRoute,
        UserTransactionsRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = JsonFileDatabase::load(&config.data_file).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🗃️ Using data file {}", db.path().display());
    let gateway =
        GetnetGateway::new(config.getnet.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let producers = if config.audit_log {
        let handlers = create_audit_event_handlers(config.event_buffer_size);
        let producers = handlers.producers();
        handlers.start_handlers().await;
        info!("📬️ Audit log handlers started");
        producers
    } else {
        info!("📬️ Audit log is disabled");
        EventProducers::default()
    };
    let srv = create_server_instance(config, db, gateway, producers)?;
    srv.await.map_err(|e| ServerError::BackendError(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: JsonFileDatabase,
    gateway: GetnetGateway,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let catalog_api = CatalogApi::new(db.clone());
        let conversation_api = ConversationApi::new(db.clone());
        let ledger_api = LedgerApi::new(db.clone(), producers.clone());
        let charge_api = ChargeFlowApi::new(db.clone(), gateway.clone(), producers.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("bicos::access_log"))
            .app_data(json_config())
            .app_data(path_config())
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(conversation_api))
            .app_data(web::Data::new(ledger_api))
            .app_data(web::Data::new(charge_api))
            .service(index)
            .service(health)
            .service(api_status)
            // Fixed paths are registered ahead of the `{id}` paths they would otherwise be captured by
            .service(StoresRoute::<JsonFileDatabase>::new())
            .service(StoreProductsRoute::<JsonFileDatabase>::new())
            .service(StoreRoute::<JsonFileDatabase>::new())
            .service(ProductsRoute::<JsonFileDatabase>::new())
            .service(ProductRoute::<JsonFileDatabase>::new())
            .service(ConversationsRoute::<JsonFileDatabase>::new())
            .service(CreateConversationRoute::<JsonFileDatabase>::new())
            .service(ConversationRoute::<JsonFileDatabase>::new())
            .service(SendMessageRoute::<JsonFileDatabase>::new())
            .service(CreateTransactionRoute::<JsonFileDatabase, GetnetGateway>::new())
            .service(UserTransactionsRoute::<JsonFileDatabase>::new())
            .service(TransferRoute::<JsonFileDatabase>::new())
            .default_service(web::to(not_found))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Malformed JSON bodies are answered in the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into())
}

/// Path segments that fail to deserialize are answered in the standard error envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| ServerError::InvalidRequestPath(err.to_string()).into())
}
