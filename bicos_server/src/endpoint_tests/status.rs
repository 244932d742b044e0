use actix_web::http::StatusCode;
use serde_json::{json, Value};

use super::helpers::get_request;
use crate::routes::{api_status, health, index};

#[actix_web::test]
async fn root_greets() {
    let (status, body) = get_request("/", |cfg| {
        cfg.service(index);
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("Hello World!".into()));
}

#[actix_web::test]
async fn health_and_api_status() {
    let (status, body) = get_request("/health", |cfg| {
        cfg.service(health);
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("👍️\n".into()));
    let (status, body) = get_request("/api", |cfg| {
        cfg.service(api_status);
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "isOk": true }));
}
