use actix_web::{http::StatusCode, web, web::ServiceConfig};
use bicos_common::Amount;
use bicos_engine::{
    db_types::{NewTransaction, Transaction, UserId},
    events::EventProducers,
    gateway_types::{CardToken, GatewayToken, PaymentResult},
    CardGatewayError,
    ChargeFlowApi,
    LedgerApi,
    StoreError,
    TOP_UP_LABEL,
};
use chrono::{TimeZone, Utc};
use mockall::Sequence;

use super::{
    helpers::{get_request, post_request},
    mocks::{MockGateway, MockLedgerManager},
};
use crate::routes::{CreateTransactionRoute, TransferRoute, UserTransactionsRoute};

const CHARGE_BODY: &str = r#"{
    "userId": "alice",
    "cardNumber": "5155901222280001",
    "amount": "100",
    "name": "ALICE SOUZA",
    "expirationMonth": "12",
    "expirationYear": 28,
    "securityCode": "123"
}"#;

fn tx(user: &str, amount: i64, text: &str) -> Transaction {
    NewTransaction::new(UserId::from(user), Amount::from(amount), Utc::now(), text).into_transaction()
}

fn payment(status: &str) -> PaymentResult {
    PaymentResult {
        payment_id: "pay-1".into(),
        status: status.into(),
        authorization_code: Some("000000099999".into()),
        authorized_at: Some(Utc.with_ymd_and_hms(2021, 3, 19, 16, 30, 31).unwrap()),
        received_at: Some(Utc.with_ymd_and_hms(2021, 3, 19, 16, 30, 30).unwrap()),
    }
}

/// A gateway that gets as far as the charge call and answers it with `status`.
fn gateway_answering(status: &'static str) -> MockGateway {
    let mut gateway = MockGateway::new();
    gateway.expect_acquire_access_token().times(1).returning(|| Ok(GatewayToken::new("bearer-1")));
    gateway
        .expect_tokenize_card()
        .withf(|t, card| t.reveal() == "bearer-1" && card.reveal() == "5155901222280001")
        .times(1)
        .returning(|_, _| Ok(CardToken("card-token-1".into())));
    gateway
        .expect_submit_charge()
        .withf(|_, card, charge| card.0 == "card-token-1" && charge.amount == Amount::from(100))
        .times(1)
        .returning(move |_, _, _| Ok(payment(status)));
    gateway
}

fn charge_routes(db: MockLedgerManager, gateway: MockGateway) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(CreateTransactionRoute::<MockLedgerManager, MockGateway>::new())
            .app_data(web::Data::new(ChargeFlowApi::new(db, gateway, EventProducers::default())));
    }
}

fn ledger_routes(db: MockLedgerManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(UserTransactionsRoute::<MockLedgerManager>::new())
            .service(TransferRoute::<MockLedgerManager>::new())
            .app_data(web::Data::new(LedgerApi::new(db, EventProducers::default())));
    }
}

#[actix_web::test]
async fn approved_charge_credits_the_wallet() {
    let mut db = MockLedgerManager::new();
    db.expect_insert_transaction()
        .withf(|t| {
            t.user_id.as_str() == "alice" &&
                t.amount == Amount::from(100) &&
                t.text == TOP_UP_LABEL &&
                t.date == Utc.with_ymd_and_hms(2021, 3, 19, 16, 30, 31).unwrap()
        })
        .times(1)
        .returning(|t| Ok(t.into_transaction()));
    let (status, body) =
        post_request("/transaction/create", CHARGE_BODY, charge_routes(db, gateway_answering("APPROVED"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isOk"], true);
    assert_eq!(body["transaction"]["userId"], "alice");
    assert_eq!(body["transaction"]["amount"], "100.00");
    assert_eq!(body["transaction"]["text"], "Recarga");
}

#[actix_web::test]
async fn declined_charge_is_payment_required() {
    let mut db = MockLedgerManager::new();
    db.expect_insert_transaction().never();
    let (status, body) =
        post_request("/transaction/create", CHARGE_BODY, charge_routes(db, gateway_answering("DENIED"))).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["isOk"], false);
    assert_eq!(body["error"]["code"], "PAYMENT_DECLINED");
    assert_eq!(body["status"], "DENIED");
    assert_eq!(body["paymentId"], "pay-1");
}

#[actix_web::test]
async fn gateway_auth_failure() {
    let mut gateway = MockGateway::new();
    gateway.expect_acquire_access_token().times(1).returning(|| Err(CardGatewayError::AuthError("HTTP 401".into())));
    gateway.expect_tokenize_card().never();
    gateway.expect_submit_charge().never();
    let mut db = MockLedgerManager::new();
    db.expect_insert_transaction().never();
    let (status, body) = post_request("/transaction/create", CHARGE_BODY, charge_routes(db, gateway)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "GATEWAY_AUTH");
}

#[actix_web::test]
async fn tokenization_failure() {
    let mut gateway = MockGateway::new();
    gateway.expect_acquire_access_token().returning(|| Ok(GatewayToken::new("bearer-1")));
    gateway.expect_tokenize_card().returning(|_, _| Err(CardGatewayError::TokenizationError("HTTP 400".into())));
    gateway.expect_submit_charge().never();
    let db = MockLedgerManager::new();
    let (status, body) = post_request("/transaction/create", CHARGE_BODY, charge_routes(db, gateway)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "CARD_TOKENIZATION");
}

#[actix_web::test]
async fn approved_but_uncredited() {
    let mut db = MockLedgerManager::new();
    db.expect_insert_transaction().returning(|_| Err(StoreError::PersistenceError("disk full".into())));
    let (status, body) =
        post_request("/transaction/create", CHARGE_BODY, charge_routes(db, gateway_answering("APPROVED"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "PERSISTENCE");
}

#[actix_web::test]
async fn charges_need_a_positive_amount() {
    let mut gateway = MockGateway::new();
    gateway.expect_acquire_access_token().never();
    let body = CHARGE_BODY.replace(r#""amount": "100""#, r#""amount": 0"#);
    let (status, body) =
        post_request("/transaction/create", &body, charge_routes(MockLedgerManager::new(), gateway)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_AMOUNT");
}

#[actix_web::test]
async fn incomplete_charge_requests() {
    let mut gateway = MockGateway::new();
    gateway.expect_acquire_access_token().never();
    let body = r#"{"userId": "alice", "amount": "100"}"#;
    let (status, body) =
        post_request("/transaction/create", body, charge_routes(MockLedgerManager::new(), gateway)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[actix_web::test]
async fn user_history() {
    let mut db = MockLedgerManager::new();
    db.expect_fetch_transactions_for_user()
        .withf(|u| u.as_str() == "alice")
        .returning(|_| Ok(vec![tx("alice", -30, "Pão"), tx("alice", 100, "Recarga")]));
    let (status, body) = get_request("/transaction/alice", ledger_routes(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isOk"], true);
    assert_eq!(body["userId"], "alice");
    assert_eq!(body["balance"], "70.00");
    assert_eq!(body["transactions"][0]["amount"], "-30.00");
}

#[actix_web::test]
async fn empty_history() {
    let mut db = MockLedgerManager::new();
    db.expect_fetch_transactions_for_user().returning(|_| Ok(vec![]));
    let (status, body) = get_request("/transaction/nobody", ledger_routes(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], "0.00");
    assert_eq!(body["transactions"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn transfer() {
    let mut db = MockLedgerManager::new();
    let mut seq = Sequence::new();
    db.expect_insert_transaction()
        .withf(|t| t.user_id.as_str() == "alice" && t.amount == Amount::from(-20) && t.text == "almoco")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|t| Ok(t.into_transaction()));
    db.expect_insert_transaction()
        .withf(|t| t.user_id.as_str() == "bob" && t.amount == Amount::from(20) && t.text == "almoco")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|t| Ok(t.into_transaction()));
    db.expect_fetch_transactions_for_user()
        .withf(|u| u.as_str() == "alice")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(vec![tx("alice", -20, "almoco"), tx("alice", 50, "Recarga")]));
    let (status, body) = get_request("/transaction/alice/bob/20/almoco", ledger_routes(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], "alice");
    assert_eq!(body["balance"], "30.00");
}

#[actix_web::test]
async fn transfer_amounts_are_validated() {
    let mut db = MockLedgerManager::new();
    db.expect_insert_transaction().never();
    let (status, body) = get_request("/transaction/alice/bob/muito/almoco", ledger_routes(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_AMOUNT");

    let mut db = MockLedgerManager::new();
    db.expect_insert_transaction().never();
    let (status, body) = get_request("/transaction/alice/bob/-5/almoco", ledger_routes(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_AMOUNT");

    let mut db = MockLedgerManager::new();
    db.expect_insert_transaction().never();
    let (status, body) =
        get_request("/transaction/alice/bob/50000000000000000000000000000/almoco", ledger_routes(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_AMOUNT");
}

#[actix_web::test]
async fn oversized_charges_are_rejected() {
    let mut gateway = MockGateway::new();
    gateway.expect_acquire_access_token().never();
    let body = CHARGE_BODY.replace(r#""amount": "100""#, r#""amount": 1e27"#);
    let (status, body) =
        post_request("/transaction/create", &body, charge_routes(MockLedgerManager::new(), gateway)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[actix_web::test]
async fn half_written_transfer() {
    let mut db = MockLedgerManager::new();
    let mut seq = Sequence::new();
    db.expect_insert_transaction().times(1).in_sequence(&mut seq).returning(|t| Ok(t.into_transaction()));
    db.expect_insert_transaction()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(StoreError::PersistenceError("disk full".into())));
    db.expect_fetch_transactions_for_user().never();
    let (status, body) = get_request("/transaction/alice/bob/20/almoco", ledger_routes(db)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INCONSISTENT_TRANSFER");
}
