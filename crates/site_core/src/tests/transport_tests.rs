use super::*;
use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

fn request() -> ContactRequest {
    ContactRequest {
        name: "Jo".into(),
        email: "a@b.com".into(),
        business: Some("Acme".into()),
        message: "Hello, I need a site.".into(),
    }
}

#[test]
fn endpoint_joins_contact_route() {
    let transport = HttpContactTransport::new("http://localhost:3000/").expect("transport");
    assert_eq!(transport.endpoint().as_str(), "http://localhost:3000/contact");
}

#[test]
fn rejects_unparseable_server_url() {
    let err = HttpContactTransport::new("not a url").err().expect("invalid url");
    assert!(matches!(err, TransportError::InvalidUrl { .. }));
}

#[tokio::test]
async fn posts_json_body_and_parses_success() {
    let received = Arc::new(Mutex::new(Vec::<ContactRequest>::new()));
    let sink = received.clone();
    let router = Router::new().route(
        "/contact",
        post(move |Json(body): Json<ContactRequest>| {
            let sink = sink.clone();
            async move {
                sink.lock().await.push(body);
                Json(ContactResponse::accepted("thanks"))
            }
        }),
    );
    let url = spawn_server(router).await;

    let transport = HttpContactTransport::new(&url).expect("transport");
    let response = transport.send_contact(&request()).await.expect("response");

    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some("thanks"));
    assert_eq!(received.lock().await.as_slice(), &[request()]);
}

#[tokio::test]
async fn json_error_status_becomes_application_failure() {
    let router = Router::new().route(
        "/contact",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(ContactResponse::rejected("Email is blocked")),
            )
        }),
    );
    let url = spawn_server(router).await;

    let transport = HttpContactTransport::new(&url).expect("transport");
    let response = transport.send_contact(&request()).await.expect("response");

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Email is blocked"));
}

#[tokio::test]
async fn success_flag_is_ignored_on_error_status() {
    let router = Router::new().route(
        "/contact",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::accepted("looks fine")),
            )
        }),
    );
    let url = spawn_server(router).await;

    let transport = HttpContactTransport::new(&url).expect("transport");
    let response = transport.send_contact(&request()).await.expect("response");

    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("server responded with status 500")
    );
}

#[tokio::test]
async fn non_json_error_is_a_transport_failure() {
    let router = Router::new().route(
        "/contact",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down").into_response() }),
    );
    let url = spawn_server(router).await;

    let transport = HttpContactTransport::new(&url).expect("transport");
    let err = transport.send_contact(&request()).await.expect_err("failure");

    assert!(matches!(err, TransportError::Status { status: 502 }));
}

#[tokio::test]
async fn non_json_success_is_a_decode_failure() {
    let router = Router::new().route("/contact", post(|| async { "<html>ok</html>" }));
    let url = spawn_server(router).await;

    let transport = HttpContactTransport::new(&url).expect("transport");
    let err = transport.send_contact(&request()).await.expect_err("failure");

    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let transport = HttpContactTransport::new(&format!("http://{addr}")).expect("transport");
    let err = transport.send_contact(&request()).await.expect_err("failure");

    assert!(matches!(err, TransportError::Network(_)));
}
