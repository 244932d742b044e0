use actix_web::{http::StatusCode, web, web::ServiceConfig};
use bicos_engine::{
    db_types::{Conversation, EntityId, Message},
    ConversationApi,
    StoreError,
};

use super::{
    helpers::{get_request, post_request},
    mocks::MockConversationManager,
};
use crate::routes::{ConversationRoute, ConversationsRoute, CreateConversationRoute, SendMessageRoute};

fn conversation(id: &str, texts: &[(&str, bool)]) -> Conversation {
    let messages = texts
        .iter()
        .enumerate()
        .map(|(i, (text, is_me))| Message { id: EntityId::from(format!("m{i}")), is_me: *is_me, text: text.to_string() })
        .collect();
    Conversation { id: EntityId::from(id), messages }
}

fn configure(db: MockConversationManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(ConversationsRoute::<MockConversationManager>::new())
            .service(CreateConversationRoute::<MockConversationManager>::new())
            .service(ConversationRoute::<MockConversationManager>::new())
            .service(SendMessageRoute::<MockConversationManager>::new())
            .app_data(web::Data::new(ConversationApi::new(db)));
    }
}

#[actix_web::test]
async fn fetch_all_conversations() {
    let mut db = MockConversationManager::new();
    db.expect_fetch_conversations().returning(|| Ok(vec![conversation("c1", &[("Oi", true)]), conversation("c2", &[])]));
    let (status, body) = get_request("/conversation/all", configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conversations"].as_array().unwrap().len(), 2);
    assert_eq!(body["conversations"][0]["messages"][0]["isMe"], true);
}

#[actix_web::test]
async fn fetch_conversation() {
    let mut db = MockConversationManager::new();
    db.expect_fetch_conversation()
        .withf(|id| id.as_str() == "c1")
        .returning(|_| Ok(conversation("c1", &[("Oi", true), ("Olá!", false)])));
    let (status, body) = get_request("/conversation/c1", configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conversation"]["messages"][1]["text"], "Olá!");
    assert_eq!(body["conversation"]["messages"][1]["isMe"], false);
}

#[actix_web::test]
async fn create_conversation() {
    let mut db = MockConversationManager::new();
    db.expect_create_conversation()
        .withf(|m| m.text == "Tem pão?" && m.is_me.is_none())
        .times(1)
        .returning(|m| Ok(conversation("new", &[(m.text.as_str(), true)])));
    db.expect_append_message().never();
    let (status, body) = post_request("/conversation/create", r#"{"text": "Tem pão?"}"#, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conversation"]["id"], "new");
    assert_eq!(body["conversation"]["messages"][0]["isMe"], true);
}

#[actix_web::test]
async fn send_message() {
    let mut db = MockConversationManager::new();
    db.expect_append_message()
        .withf(|id, m| id.as_str() == "c1" && m.text == "Tem sim" && m.is_me == Some(false))
        .times(1)
        .returning(|_, _| Ok(conversation("c1", &[("Tem pão?", true), ("Tem sim", false)])));
    let (status, body) =
        post_request("/conversation/c1", r#"{"text": "Tem sim", "isMe": false}"#, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conversation"]["messages"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn message_to_unknown_conversation() {
    let mut db = MockConversationManager::new();
    db.expect_append_message().returning(|id, _| Err(StoreError::not_found("Conversation", id)));
    let (status, body) = post_request("/conversation/c404", r#"{"text": "Alô?"}"#, configure(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[actix_web::test]
async fn blank_messages_are_rejected() {
    let mut db = MockConversationManager::new();
    db.expect_create_conversation().never();
    let (status, body) = post_request("/conversation/create", r#"{"text": "   "}"#, configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[actix_web::test]
async fn malformed_bodies_are_rejected() {
    let mut db = MockConversationManager::new();
    db.expect_append_message().never();
    let (status, body) = post_request("/conversation/c1", r#"{"message": "Oi"}"#, configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["isOk"], false);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}
