use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use quicknote_core::db::open_db_in_memory;
use quicknote_server::routes::api_router;
use quicknote_server::state::AppState;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    let conn = open_db_in_memory().unwrap();
    api_router(AppState::new(conn))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn ping_responds_with_message() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "pong");
}

#[tokio::test]
async fn create_validates_fields_before_touching_the_store() {
    let app = test_app();

    let cases = [
        json!({"content": "x"}),
        json!({"title": "x"}),
        json!({"title": "", "content": "x"}),
        json!({"title": "x", "content": "   "}),
    ];
    for case in cases {
        let (status, body) = send(&app, Method::POST, "/api/notes", Some(case)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    let (status, body) = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_returns_the_persisted_note() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({"title": "Buy milk", "content": "two liters"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["content"], "two liters");
    assert_eq!(body["isCompleted"], false);
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn note_lifecycle_end_to_end() {
    let app = test_app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({"title": "A", "content": "B"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/notes/{id}"),
        Some(json!({"title": "A2", "content": "B2", "isCompleted": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, listed) = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    let notes = listed.as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], id.as_str());
    assert_eq!(notes[0]["title"], "A2");
    assert_eq!(notes[0]["content"], "B2");
    assert_eq!(notes[0]["isCompleted"], true);
    assert_eq!(notes[0]["createdAt"], created["createdAt"]);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/notes/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, listed) = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn partial_update_preserves_untouched_fields() {
    let app = test_app();

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({"title": "title", "content": "content"})),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/notes/{id}"),
        Some(json!({"isCompleted": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send(&app, Method::GET, "/api/notes", None).await;
    let notes = listed.as_array().unwrap();
    assert_eq!(notes[0]["title"], "title");
    assert_eq!(notes[0]["content"], "content");
    assert_eq!(notes[0]["isCompleted"], true);
}

#[tokio::test]
async fn unknown_ids_are_silent_noops() {
    let app = test_app();

    let missing = "00000000-0000-4000-8000-00000000dead";
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/notes/{missing}"),
        Some(json!({"title": "ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/notes/not-a-uuid",
        Some(json!({"title": "ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/notes/{missing}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, "/api/notes/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn list_returns_every_note() {
    let app = test_app();

    for title in ["one", "two", "three"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/notes",
            Some(json!({"title": title, "content": "body"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, listed) = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 3);
}
