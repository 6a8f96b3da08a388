use super::*;
use crate::Config;
use crate::error::ApiError;
use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::Response;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};


const BOUNDARY: &str = "bundler-test-boundary-7f3a";

fn create_test_router(config: Config) -> Router {
    create_router(Arc::new(ImageBundler::new(config).unwrap()))
}

fn default_router() -> Router {
    create_test_router(Config::default())
}

/// Multipart request with a single file field
fn upload_request(uri: &str, field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/vnd.openxmlformats-officedocument.spreadsheetml.sheet\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn xlsx_upload(uri: &str, bytes: &[u8]) -> Request<Body> {
    upload_request(uri, "file", "products.xlsx", bytes)
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

async fn api_error(response: Response) -> ApiError {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Image host serving `/a.jpg` and `/c.jpg`, 404 for `/missing.jpg`
async fn image_server() -> MockServer {
    let server = MockServer::start().await;
    for (route, body) in [("/a.jpg", "image-a"), ("/c.jpg", "image-c")] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.as_bytes()))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    server
}

/// Three-row sheet where the middle image is missing
fn mixed_sheet(server: &MockServer) -> Vec<u8> {
    let uri = server.uri();
    let (a, b, c) = (
        format!("{uri}/a.jpg"),
        format!("{uri}/missing.jpg"),
        format!("{uri}/c.jpg"),
    );
    crate::test_helpers::product_sheet(&[
        ("Shoe A", a.as_str()),
        ("Shoe B", b.as_str()),
        ("Shoe C", c.as_str()),
    ])
}

#[tokio::test]
async fn test_api_server_stops_on_shutdown_signal() {
    let mut config = Config::default();
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap(); // Port 0 = OS assigns a free port
    let bundler = Arc::new(ImageBundler::new(config).unwrap());

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let api_handle = tokio::spawn(start_api_server_with_shutdown(bundler, async move {
        let _ = rx.await;
    }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), api_handle)
        .await
        .expect("server should stop after the shutdown signal")
        .unwrap();
    assert!(result.is_ok(), "server returned {result:?}");
}

#[tokio::test]
async fn test_bind_failure_is_io_error() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let mut config = Config::default();
    config.server.api.bind_address = occupied.local_addr().unwrap();
    let bundler = Arc::new(ImageBundler::new(config).unwrap());

    let result = start_api_server(bundler).await;

    assert!(matches!(result, Err(crate::Error::Io(_))), "got {result:?}");
}

#[tokio::test]
async fn test_cors_enabled() {
    let mut config = Config::default();
    config.server.api.cors_enabled = true;
    config.server.api.cors_origins = vec!["*".to_string()];
    let app = create_test_router(config);

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let mut config = Config::default();
    config.server.api.cors_origins = vec!["http://shop.example".to_string()];
    let app = create_test_router(config);

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://shop.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://shop.example"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let mut config = Config::default();
    config.server.api.cors_enabled = false;
    let app = create_test_router(config);

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder()
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_endpoint() {
    let request = Request::builder()
        .uri("/api/v1/openapi.json")
        .body(Body::empty())
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(json["paths"]["/api/v1/bundles"].is_object());
    assert!(json["paths"]["/api/v1/bundles/report"].is_object());
}

#[tokio::test]
async fn test_swagger_ui_toggle() {
    let request = || {
        Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap()
    };

    let enabled = default_router().oneshot(request()).await.unwrap();
    assert_eq!(enabled.status(), StatusCode::OK);

    let mut config = Config::default();
    config.server.api.swagger_ui = false;
    let disabled = create_test_router(config).oneshot(request()).await.unwrap();
    assert_eq!(disabled.status(), StatusCode::NOT_FOUND);
}
