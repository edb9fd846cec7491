use super::*;
use axum::{body, body::Body, http::Request};
use serde_json::Value;
use shared::{contact::NAME_ERROR, protocol::ServicesResponse};
use tempfile::TempDir;
use tower::ServiceExt;

const INDEX: &str = "<!doctype html><title>landing</title>";

fn test_app(max_body_bytes: usize) -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("index.html"), INDEX).expect("index");
    std::fs::write(dir.path().join("style.css"), "body { margin: 0 }").expect("css");

    let state = AppState::new(dir.path().to_path_buf(), "index.html", api::default_services());
    (build_router(Arc::new(state), max_body_bytes), dir)
}

async fn read_body(response: Response) -> body::Bytes {
    body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body")
}

async fn read_json(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json")
}

fn contact_post(body: Value) -> Request<Body> {
    Request::post(CONTACT_ROUTE)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn health_reports_ok_with_timestamp() {
    let (app, _dir) = test_app(4096);
    let request = Request::get(HEALTH_ROUTE).body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["timestamp"].is_string());
    assert!(json["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn services_lists_the_catalogue() {
    let (app, _dir) = test_app(4096);
    let request = Request::get(SERVICES_ROUTE).body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let dto: ServicesResponse =
        serde_json::from_slice(&read_body(response).await).expect("json");
    assert!(dto.success);
    assert_eq!(dto.data, api::default_services());
}

#[tokio::test]
async fn valid_contact_is_accepted() {
    let (app, _dir) = test_app(4096);
    let response = app
        .oneshot(contact_post(serde_json::json!({
            "name": "Jo Doe",
            "email": "jo@example.com",
            "business": "",
            "message": "Hello there, need a site"
        })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], api::CONTACT_ACCEPTED);
}

#[tokio::test]
async fn invalid_contact_is_rejected_with_reasons() {
    let (app, _dir) = test_app(4096);
    let response = app
        .oneshot(contact_post(serde_json::json!({
            "name": "J",
            "email": "jo@example.com",
            "message": "Hello there, need a site"
        })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = read_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], NAME_ERROR);
}

#[tokio::test]
async fn malformed_contact_body_is_a_validation_error() {
    let (app, _dir) = test_app(4096);
    let request = Request::post(CONTACT_ROUTE)
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = read_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "validation");
}

#[tokio::test]
async fn oversized_body_is_refused() {
    let (app, _dir) = test_app(256);
    let response = app
        .oneshot(contact_post(serde_json::json!({
            "name": "Jo Doe",
            "email": "jo@example.com",
            "message": "x".repeat(1024)
        })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn unknown_api_path_is_json_not_found() {
    let (app, _dir) = test_app(4096);
    let request = Request::get("/api/nope").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = read_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "not_found");
}

#[tokio::test]
async fn existing_asset_is_served() {
    let (app, _dir) = test_app(4096);
    let request = Request::get("/style.css").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await.as_ref(), b"body { margin: 0 }");
}

#[tokio::test]
async fn unknown_page_falls_back_to_spa_entry() {
    let (app, _dir) = test_app(4096);
    for path in ["/", "/about", "/services/web-design"] {
        let request = Request::get(path).body(Body::empty()).expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert_eq!(read_body(response).await.as_ref(), INDEX.as_bytes(), "{path}");
    }
}

#[tokio::test]
async fn traversal_is_rejected() {
    let (app, _dir) = test_app(4096);
    let request = Request::get("/assets/../../etc/passwd")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn traversal_detection_covers_encoded_segments() {
    assert!(is_traversal("/a/%2E%2E/b"));
    assert!(is_traversal("/.."));
    assert!(!is_traversal("/files/..hidden"));
    assert!(!is_traversal("/index.html"));
}
