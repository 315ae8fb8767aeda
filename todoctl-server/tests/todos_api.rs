//! Integration tests for the todo REST API.
//!
//! Each test gets its own SQLite file in a temp directory.

mod common;

use axum::http::StatusCode;
use common::{delete, get, post_json, put_json, test_app, test_app_with};
use serde_json::Value;
use todoctl_server::http::routes::todos::{DeleteResponse, TodoResponse};
use todoctl_server::models::{Frequency, Status};
use todoctl_server::ServerConfig;

async fn create(app: &axum::Router, json: &str) -> TodoResponse {
    let (status, body) = post_json(app, "/api/todos", json).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_str(&body).unwrap()
}

async fn list(app: &axum::Router) -> Vec<TodoResponse> {
    let (status, body) = get(app, "/api/todos").await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn create_update_delete_lifecycle() {
    let app = test_app().await;

    let created = create(
        &app.router,
        r#"{"title": "Water plants", "frequency": "weekly"}"#,
    )
    .await;
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Water plants");
    assert_eq!(created.description.as_deref(), Some(""));
    assert_eq!(created.frequency, Frequency::Weekly);
    assert_eq!(created.status, Status::Open);
    assert_eq!(created.goal_date, None);
    assert_eq!(created.created_at, created.updated_at);

    let (status, body) = put_json(&app.router, "/api/todos/1", r#"{"status": "completed"}"#).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let updated: TodoResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(updated.status, Status::Completed);
    assert_eq!(updated.title, "Water plants");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let (status, body) = delete(&app.router, "/api/todos/1").await;
    assert_eq!(status, StatusCode::OK);
    let deleted: DeleteResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(deleted.message, "Todo deleted successfully");

    let (status, _) = get(&app.router, "/api/todos/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app.router, "/api/todos/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_response_is_stored_state() {
    let app = test_app().await;

    let created = create(
        &app.router,
        r#"{"title": "Call mum", "frequency": "monthly", "description": "Sunday",
            "status": "in_progress", "goalDate": "2026-12-31"}"#,
    )
    .await;

    let (status, body) = get(&app.router, &format!("/api/todos/{}", created.id)).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: TodoResponse = serde_json::from_str(&body).unwrap();

    assert_eq!(fetched.title, "Call mum");
    assert_eq!(fetched.description.as_deref(), Some("Sunday"));
    assert_eq!(fetched.status, Status::InProgress);
    assert_eq!(fetched.goal_date.as_deref(), Some("2026-12-31"));
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn create_accepts_snake_case_goal_date() {
    let app = test_app().await;

    let created = create(
        &app.router,
        r#"{"title": "File taxes", "frequency": "yearly", "goal_date": "2027-04-15"}"#,
    )
    .await;
    assert_eq!(created.goal_date.as_deref(), Some("2027-04-15"));
}

#[tokio::test]
async fn invalid_create_writes_nothing() {
    let app = test_app().await;

    for body in [
        r#"{"frequency": "daily"}"#,
        r#"{"title": "No cadence"}"#,
        r#"{"title": "Bad cadence", "frequency": "hourly"}"#,
        r#"{"title": "Bad status", "frequency": "daily", "status": "done"}"#,
        r#"{"title": "   ", "frequency": "daily"}"#,
        r#"{"title": 12, "frequency": "daily"}"#,
        r#"not json"#,
    ] {
        let (status, response) = post_json(&app.router, "/api/todos", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body} -> {response}");

        let error: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(error["error"], "validation_error");
    }

    assert!(list(&app.router).await.is_empty());
}

#[tokio::test]
async fn array_bodies_are_rejected() {
    let app = test_app().await;

    let (status, response) = post_json(
        &app.router,
        "/api/todos",
        r#"["Positional", "daily", null, null, null, null]"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{response}");
    assert!(list(&app.router).await.is_empty());

    let created = create(&app.router, r#"{"title": "Stretch", "frequency": "daily"}"#).await;

    for body in [r#"["Renamed"]"#, r#""Renamed""#, "null"] {
        let (status, response) = put_json(&app.router, "/api/todos/1", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body} -> {response}");
        let error: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(error["error"], "validation_error");
    }

    let (_, body) = get(&app.router, "/api/todos/1").await;
    let unchanged: TodoResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(unchanged.title, "Stretch");
    assert_eq!(unchanged.updated_at, created.updated_at);
}

#[tokio::test]
async fn title_is_stored_as_sent() {
    let app = test_app().await;

    let created = create(
        &app.router,
        r#"{"title": "  Water plants ", "frequency": "weekly"}"#,
    )
    .await;
    assert_eq!(created.title, "  Water plants ");

    let (status, body) = put_json(&app.router, "/api/todos/1", r#"{"title": "  y  "}"#).await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, body) = get(&app.router, "/api/todos/1").await;
    let fetched: TodoResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(fetched.title, "  y  ");
}

#[tokio::test]
async fn storage_failure_is_internal_error() {
    let app = test_app().await;

    let mut conn = app.store.connect().await.unwrap();
    sqlx::query("DROP TABLE todos").execute(&mut conn).await.unwrap();
    drop(conn);

    let (status, body) = get(&app.router, "/api/todos").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"], "internal_error");
    let message = error["message"].as_str().unwrap();
    assert!(message.starts_with("database error"), "{message}");
    assert!(message.contains("no such table"), "{message}");
}

#[tokio::test]
async fn update_missing_id_is_not_found_regardless_of_body() {
    let app = test_app().await;

    for body in [
        r#"{"status": "completed"}"#,
        r#"{}"#,
        r#"{"frequency": "hourly"}"#,
        r#"garbage"#,
    ] {
        let (status, _) = put_json(&app.router, "/api/todos/99", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
    }

    assert!(list(&app.router).await.is_empty());
}

#[tokio::test]
async fn update_without_fields_is_rejected() {
    let app = test_app().await;
    let created = create(&app.router, r#"{"title": "Read", "frequency": "daily"}"#).await;

    for body in [r#"{}"#, r#"{"priority": "high"}"#] {
        let (status, response) = put_json(&app.router, "/api/todos/1", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(error["message"], "no fields to update");
    }

    let (_, body) = get(&app.router, "/api/todos/1").await;
    let unchanged: TodoResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(unchanged.updated_at, created.updated_at);
}

#[tokio::test]
async fn invalid_update_is_all_or_nothing() {
    let app = test_app().await;
    create(&app.router, r#"{"title": "Run", "frequency": "daily"}"#).await;

    let (status, _) = put_json(
        &app.router,
        "/api/todos/1",
        r#"{"title": "Sprint", "frequency": "fortnightly"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app.router, "/api/todos/1").await;
    let todo: TodoResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(todo.title, "Run");
    assert_eq!(todo.frequency, Frequency::Daily);
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = test_app().await;
    let created = create(
        &app.router,
        r#"{"title": "Clean gutters", "frequency": "yearly", "description": "ladder", "goalDate": "2026-11-01"}"#,
    )
    .await;

    let (status, body) = put_json(
        &app.router,
        "/api/todos/1",
        r#"{"frequency": "monthly", "goal_date": null}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let updated: TodoResponse = serde_json::from_str(&body).unwrap();

    assert_eq!(updated.frequency, Frequency::Monthly);
    assert_eq!(updated.goal_date, None);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.status, created.status);
    assert!(updated.updated_at > created.updated_at);

    // Any status may follow any other
    let (status, body) = put_json(&app.router, "/api/todos/1", r#"{"status": "completed"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let completed: TodoResponse = serde_json::from_str(&body).unwrap();
    let (status, body) = put_json(&app.router, "/api/todos/1", r#"{"status": "open"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let reopened: TodoResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(reopened.status, Status::Open);
    assert!(reopened.updated_at > completed.updated_at);
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = test_app().await;

    for title in ["one", "two", "three"] {
        create(
            &app.router,
            &format!(r#"{{"title": "{title}", "frequency": "daily"}}"#),
        )
        .await;
    }

    let todos = list(&app.router).await;
    let titles: Vec<_> = todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["three", "two", "one"]);
    assert!(todos.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn non_numeric_id_is_not_found() {
    let app = test_app().await;

    let (status, body) = get(&app.router, "/api/todos/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"], "not_found");
}

#[tokio::test]
async fn health_reports_database() {
    let app = test_app().await;

    let (status, body) = get(&app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["database"], "connected");
}

#[tokio::test]
async fn database_directory_is_created() {
    let app = test_app().await;
    assert!(app.dir.path().join("data").join("todo_manager.db").exists());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = test_app().await;
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/todos")
                .header("origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn serves_static_frontend_when_configured() {
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<h1>todos</h1>").unwrap();

    let app = test_app_with(ServerConfig {
        static_dir: Some(static_dir.path().to_path_buf()),
        ..Default::default()
    })
    .await;

    let (status, body) = get(&app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("todos"));

    // API routes still take precedence
    let (status, _) = get(&app.router, "/api/todos").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_path_without_frontend_is_404() {
    let app = test_app().await;
    let (status, _) = get(&app.router, "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
