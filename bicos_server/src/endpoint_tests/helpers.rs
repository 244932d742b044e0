use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use log::debug;
use serde_json::Value;

use crate::{
    routes::not_found,
    server::{json_config, path_config},
};

pub async fn get_request<F>(path: &str, configure: F) -> (StatusCode, Value)
where F: FnOnce(&mut ServiceConfig) {
    send(TestRequest::get().uri(path), configure).await
}

pub async fn post_request<F>(path: &str, body: &str, configure: F) -> (StatusCode, Value)
where F: FnOnce(&mut ServiceConfig) {
    let req = TestRequest::post()
        .uri(path)
        .insert_header(("content-type", "application/json"))
        .set_payload(body.to_string());
    send(req, configure).await
}

async fn send<F>(req: TestRequest, configure: F) -> (StatusCode, Value)
where F: FnOnce(&mut ServiceConfig) {
    let _ = env_logger::try_init();
    let app = App::new()
        .app_data(json_config())
        .app_data(path_config())
        .configure(configure)
        .default_service(web::to(not_found));
    let service = test::init_service(app).await;
    debug!("🚀️ Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let bytes = res.into_body().try_into_bytes().expect("Body should be complete");
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()));
    (status, body)
}
