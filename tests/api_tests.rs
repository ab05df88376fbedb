use notionlike_trading::message::{ChatResponse, Memo, Ping, Session, Todo};
use notionlike_trading::routes::create_router;
use notionlike_trading::state::AppState;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde::de::DeserializeOwned;
use tower::util::ServiceExt;

fn app() -> Router {
    create_router().with_state(AppState::shared())
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

async fn new_session(app: &Router, title: &str) -> Session {
    let (status, body) = call(app, "POST", "/sessions", Some(&format!(r#"{{"title": "{title}"}}"#))).await;
    assert_eq!(status, StatusCode::CREATED);
    parse(&body)
}

#[tokio::test]
async fn test_ping_endpoint() {
    let (status, body) = call(&app(), "GET", "/api/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    let ping: Ping = parse(&body);
    assert_eq!(ping.message, "pong");
}

#[tokio::test]
async fn test_session_create_and_list() {
    let app = app();
    let first = new_session(&app, "  Q1 Strategy  ").await;
    assert_eq!(first.title, "Q1 Strategy");
    let second = new_session(&app, "Dividends").await;

    let (status, body) = call(&app, "GET", "/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    let sessions: Vec<Session> = parse(&body);
    assert_eq!(sessions, vec![second, first]);
}

#[tokio::test]
async fn test_blank_title_is_rejected() {
    let (status, body) = call(&app(), "POST", "/sessions", Some(r#"{"title": "   "}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), "title cannot be empty");
}

#[tokio::test]
async fn test_unknown_session_is_plain_text_404() {
    let (status, body) = call(&app(), "GET", "/sessions/nope/memos", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "session not found");
}

#[tokio::test]
async fn test_memo_crud() {
    let app = app();
    let session = new_session(&app, "s").await;
    let base = format!("/sessions/{}/memos", session.id);

    let (status, body) = call(&app, "POST", &base, Some(r#"{"content": "watch NVDA"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    let memo: Memo = parse(&body);

    let (status, body) = call(
        &app,
        "PATCH",
        &format!("{base}/{}", memo.id),
        Some(r#"{"content": "watch AMD"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Memo = parse(&body);
    assert_eq!(updated.id, memo.id);
    assert_eq!(updated.content, "watch AMD");

    let (status, _) = call(&app, "DELETE", &format!("{base}/{}", memo.id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, "DELETE", &format!("{base}/{}", memo.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "memo not found");

    let (_, body) = call(&app, "GET", &base, None).await;
    let memos: Vec<Memo> = parse(&body);
    assert!(memos.is_empty());
}

#[tokio::test]
async fn test_todo_update_and_toggle() {
    let app = app();
    let session = new_session(&app, "s").await;
    let base = format!("/sessions/{}/todos", session.id);

    let (_, body) = call(&app, "POST", &base, Some(r#"{"title": "check earnings"}"#)).await;
    let todo: Todo = parse(&body);
    assert!(!todo.done);

    let (status, body) = call(&app, "POST", &format!("{base}/{}/toggle", todo.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let toggled: Todo = parse(&body);
    assert!(toggled.done);

    let (status, body) = call(
        &app,
        "PATCH",
        &format!("{base}/{}", todo.id),
        Some(r#"{"title": "check guidance", "done": false}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Todo = parse(&body);
    assert_eq!(updated.title, "check guidance");
    assert!(!updated.done);

    let (status, body) = call(&app, "POST", &format!("{base}/missing/toggle"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "todo not found");
}

#[tokio::test]
async fn test_chat_endpoint() {
    let app = app();
    let (status, body) = call(&app, "POST", "/chat", Some(r#"{"prompt": "hello", "session_id": null}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let resp: ChatResponse = parse(&body);
    assert!(!resp.reply.is_empty());
    assert!(!resp.thinking.is_empty());

    let session = new_session(&app, "Q1 Strategy").await;
    let (status, body) = call(
        &app,
        "POST",
        "/chat",
        Some(&format!(r#"{{"prompt": "plan", "session_id": "{}"}}"#, session.id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let resp: ChatResponse = parse(&body);
    assert!(resp.thinking.contains("Q1 Strategy"));
}

#[tokio::test]
async fn test_chat_rejects_blank_prompt_and_unknown_session() {
    let app = app();
    let (status, _) = call(&app, "POST", "/chat", Some(r#"{"prompt": "  "}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, "POST", "/chat", Some(r#"{"prompt": "hi", "session_id": "ghost"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "session not found");
}

#[tokio::test]
async fn test_root_route_carries_cors_headers() {
    let req = Request::builder()
        .method("GET")
        .uri("/")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
}
