//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a few lines go into the engine APIs; keep this
//! module thin.
//!
//! Every handler is async. Since each worker thread processes its requests sequentially, a handler must never block
//! the thread it runs on; file writes and gateway calls are all awaited.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use bicos_common::Amount;
use bicos_engine::{
    db_types::{EntityId, NewMessage, UserId},
    CardGateway,
    CatalogApi,
    CatalogManagement,
    ChargeFlowApi,
    ChargeOutcome,
    ConversationApi,
    ConversationManagement,
    LedgerApi,
    LedgerManagement,
};
use log::*;
use serde_json::json;

use crate::{
    data_objects::{ApiResponse, CreateTransactionRequest},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Hello World!")
}

#[get("/api")]
pub async fn api_status() -> impl Responder {
    HttpResponse::Ok().json(json!({ "isOk": true }))
}

/// Fallback for any path that no route matches.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, ServerError> {
    debug!("💻️ No route for {} {}", req.method(), req.path());
    Err(ServerError::NoRecordFound(format!("There is no route for {} {}", req.method(), req.path())))
}

//----------------------------------------------   Stores  ----------------------------------------------------
route!(stores => Get "/store/all" impl CatalogManagement);
pub async fn stores<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET all stores");
    let stores = api.stores().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok().with_stores(stores)))
}

route!(store => Get "/store/{id}" impl CatalogManagement);
/// Fetches a single store. Every call counts as a view of the store and increments its `views` counter.
pub async fn store<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = EntityId::from(path.into_inner());
    debug!("💻️ GET store {id}");
    let store = api.view_store(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok().with_store(store)))
}

route!(store_products => Get "/store/{id}/products" impl CatalogManagement);
pub async fn store_products<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = EntityId::from(path.into_inner());
    debug!("💻️ GET products for store {id}");
    let products = api.products_for_store(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok().with_products(products)))
}

//----------------------------------------------   Products  ----------------------------------------------------
route!(products => Get "/product/all" impl CatalogManagement);
pub async fn products<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET all products");
    let products = api.products().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok().with_products(products)))
}

route!(product => Get "/product/{id}" impl CatalogManagement);
pub async fn product<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = EntityId::from(path.into_inner());
    debug!("💻️ GET product {id}");
    let product = api.product(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok().with_product(product)))
}

//----------------------------------------------   Conversations  ----------------------------------------------------
route!(conversations => Get "/conversation/all" impl ConversationManagement);
pub async fn conversations<B: ConversationManagement>(
    api: web::Data<ConversationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET all conversations");
    let conversations = api.conversations().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok().with_conversations(conversations)))
}

route!(conversation => Get "/conversation/{id}" impl ConversationManagement);
pub async fn conversation<B: ConversationManagement>(
    path: web::Path<String>,
    api: web::Data<ConversationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = EntityId::from(path.into_inner());
    debug!("💻️ GET conversation {id}");
    let conversation = api.conversation(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok().with_conversation(conversation)))
}

route!(create_conversation => Post "/conversation/create" impl ConversationManagement);
/// Starts a conversation. The body is `{ "text": "...", "isMe": bool }`; `isMe` defaults to `true`.
pub async fn create_conversation<B: ConversationManagement>(
    body: web::Json<NewMessage>,
    api: web::Data<ConversationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST new conversation");
    let conversation = api.start_conversation(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok().with_conversation(conversation)))
}

route!(send_message => Post "/conversation/{id}" impl ConversationManagement);
pub async fn send_message<B: ConversationManagement>(
    path: web::Path<String>,
    body: web::Json<NewMessage>,
    api: web::Data<ConversationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = EntityId::from(path.into_inner());
    debug!("💻️ POST message to conversation {id}");
    let conversation = api.send_message(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok().with_conversation(conversation)))
}

//----------------------------------------------   Transactions  ----------------------------------------------------
route!(create_transaction => Post "/transaction/create" impl LedgerManagement, CardGateway);
/// Tops up a wallet by charging a credit card.
///
/// On approval the response carries the new ledger entry. A charge the gateway declined is answered with
/// `402 Payment Required` and the gateway's status and payment id.
pub async fn create_transaction<B: LedgerManagement, G: CardGateway>(
    body: web::Json<CreateTransactionRequest>,
    api: web::Data<ChargeFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST charge {request:?}");
    match api.charge(request.into()).await? {
        ChargeOutcome::Approved { transaction, .. } => {
            Ok(HttpResponse::Ok().json(ApiResponse::ok().with_transaction(transaction)))
        },
        ChargeOutcome::Declined { payment } => {
            Err(ServerError::PaymentDeclined { status: payment.status, payment_id: payment.payment_id })
        },
    }
}

route!(user_transactions => Get "/transaction/{user_id}" impl LedgerManagement);
pub async fn user_transactions<B: LedgerManagement>(
    path: web::Path<String>,
    api: web::Data<LedgerApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = UserId::from(path.into_inner());
    debug!("💻️ GET transactions for {user_id}");
    let history = api.history(&user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok().with_history(history)))
}

route!(transfer => Get "/transaction/{from}/{to}/{amount}/{text}" impl LedgerManagement);
/// Moves `amount` from one wallet to another and returns the sender's updated wallet.
pub async fn transfer<B: LedgerManagement>(
    path: web::Path<(String, String, String, String)>,
    api: web::Data<LedgerApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (from, to, amount, text) = path.into_inner();
    let amount = amount.parse::<Amount>().map_err(|e| ServerError::InvalidAmount(e.to_string()))?;
    let from = UserId::from(from);
    debug!("💻️ GET transfer of {amount} from {from} to {to}");
    api.transfer(from.clone(), UserId::from(to), amount, text).await?;
    let history = api.history(&from).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok().with_history(history)))
}
