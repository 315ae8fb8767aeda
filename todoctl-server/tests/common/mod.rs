use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tempfile::TempDir;
use todoctl_server::{build_router, AppState, ServerConfig, Store};
use tower::ServiceExt;

/// Router plus the temp directory holding its database.
///
/// The directory is removed when this is dropped, so keep it alive for
/// the whole test.
pub struct TestApp {
    pub router: Router,
    pub store: Store,
    pub dir: TempDir,
}

/// Build a router over a fresh database in a temp directory.
#[allow(dead_code)]
pub async fn test_app() -> TestApp {
    test_app_with(ServerConfig::default()).await
}

/// Build a router with a custom server configuration.
#[allow(dead_code)]
pub async fn test_app_with(config: ServerConfig) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("data").join("todo_manager.db"))
        .await
        .unwrap();

    TestApp {
        router: build_router(AppState { store: store.clone() }, &config),
        store,
        dir,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Helper to make a GET request and return (status, body).
#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

/// Helper to make a POST request with JSON body.
#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, json: &str) -> (StatusCode, String) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
    )
    .await
}

/// Helper to make a PUT request with JSON body.
#[allow(dead_code)]
pub async fn put_json(app: &Router, uri: &str, json: &str) -> (StatusCode, String) {
    send(
        app,
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
    )
    .await
}

/// Helper to make a DELETE request.
#[allow(dead_code)]
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, String) {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}
