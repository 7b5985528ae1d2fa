//! Router-level tests: each request goes through the real axum router via
//! `tower::ServiceExt::oneshot`, backed by a store in a temp directory.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use pairgate::{
    management::{
        COLLECTION_PAIRS, COLLECTION_POSTS, JsonStore, PairingService, PostManager, VisitCounter,
        collect_stats,
    },
    server::{AppState, router},
    types::PairingCode,
    upstream::{UpstreamClient, UpstreamEndpoints},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn setup() -> (Router, Arc<JsonStore>, TempDir) {
    let tmp = TempDir::new().unwrap();
    let store = Arc::new(JsonStore::new(tmp.path().join("data")));
    let public_dir = tmp.path().join("public");
    std::fs::create_dir_all(&public_dir).unwrap();
    std::fs::write(public_dir.join("index.html"), "<h1>admin</h1>").unwrap();

    // Nothing listens on port 9 of localhost; proxy calls fail fast
    let upstream = UpstreamClient::new(UpstreamEndpoints::with_base("http://127.0.0.1:9")).unwrap();
    let state = AppState::new(Arc::clone(&store), upstream);
    (router(state, public_dir), store, tmp)
}

fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    match body {
        Some(val) => builder.body(Body::from(val.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));
    (status, body)
}

async fn issue(app: &Router, number: &str) -> String {
    let (status, body) = send(
        app,
        json_request(Method::POST, "/api/pair", Some(json!({ "number": number }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["code"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Pairing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_pair_round_trip() {
    let (app, _store, _tmp) = setup();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/pair",
            Some(json!({ "number": "15551234567" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Pair code generated for 15551234567. Valid for 24 hours."
    );
    let code = body["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 8);

    let verify = json!({ "code": code });
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/verify-pair", Some(verify.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "number": "15551234567",
            "message": "Pair code verified successfully!",
        })
    );

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/verify-pair", Some(verify)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Invalid or expired pair code" }));
}

#[tokio::test]
async fn test_pair_rejects_invalid_numbers() {
    let (app, store, _tmp) = setup();

    let bodies = [
        Some(json!({ "number": "12345" })),
        Some(json!({ "number": "" })),
        Some(json!({ "number": 15551234567u64 })),
        Some(json!({})),
        None,
    ];
    for body in bodies {
        let (status, body) = send(&app, json_request(Method::POST, "/api/pair", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid phone number" }));
    }

    let pairs: Vec<PairingCode> = store.load_collection(COLLECTION_PAIRS).await.unwrap();
    assert!(pairs.is_empty());
}

#[tokio::test]
async fn test_pair_accepts_form_encoded_bodies() {
    let (app, _store, _tmp) = setup();

    let (status, body) = send(&app, form_request("/api/pair", "number=15551234567")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let code = body["code"].as_str().unwrap().to_string();

    let (status, body) = send(&app, form_request("/api/verify-pair", &format!("code={code}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["number"], "15551234567");

    let (status, body) = send(&app, form_request("/api/verify-pair", &format!("code={code}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Invalid or expired pair code" }));

    let (status, body) = send(&app, form_request("/api/pair", "number=12345")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid phone number" }));
}

#[tokio::test]
async fn test_verify_unknown_code_is_not_found() {
    let (app, _store, _tmp) = setup();

    for body in [Some(json!({ "code": "ZZZZZZZZ" })), Some(json!({})), None] {
        let (status, body) =
            send(&app, json_request(Method::POST, "/api/verify-pair", body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Invalid or expired pair code" }));
    }
}

#[tokio::test]
async fn test_verify_reports_store_failure() {
    let (app, store, _tmp) = setup();
    std::fs::create_dir_all(store.root()).unwrap();
    std::fs::write(store.path_for(COLLECTION_PAIRS), "garbage").unwrap();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/verify-pair",
            Some(json!({ "code": "ABCDEFGH" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Verification failed" }));

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/pair",
            Some(json!({ "number": "15551234567" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to generate pair code" }));
}

// ---------------------------------------------------------------------------
// Posts, visits, stats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_posts_lifecycle() {
    let (app, store, _tmp) = setup();

    let (status, body) = send(&app, json_request(Method::GET, "/api/posts", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for title in ["first", "second"] {
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/posts",
                Some(json!({ "title": title, "type": "update", "id": "client-id" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "success": true, "message": "Post saved successfully!" })
        );
    }

    let (_, body) = send(&app, json_request(Method::GET, "/api/posts", None)).await;
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    // Newest first, with server-assigned id and time
    assert_eq!(posts[0]["title"], "second");
    assert_eq!(posts[0]["type"], "update");
    assert_ne!(posts[0]["id"], "client-id");
    assert_eq!(posts[0]["time"].as_str().unwrap().len(), 16);

    let id = posts[1]["id"].as_str().unwrap().to_string();
    let (status, body) = send(
        &app,
        json_request(Method::DELETE, &format!("/api/posts/{id}"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Post deleted successfully!" })
    );

    let remaining: Vec<Value> = store.load_collection(COLLECTION_POSTS).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["title"], "second");
}

#[tokio::test]
async fn test_delete_post_without_posts_file() {
    let (app, _store, _tmp) = setup();

    let (status, body) = send(
        &app,
        json_request(Method::DELETE, "/api/posts/anything", None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No posts found" }));
}

#[tokio::test]
async fn test_visits_and_stats() {
    let (app, _store, _tmp) = setup();

    for expected in 1..=3 {
        let (status, body) = send(&app, json_request(Method::POST, "/api/visit", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "count": expected }));
    }

    issue(&app, "15551234567").await;
    issue(&app, "15557654321").await;
    send(
        &app,
        json_request(Method::POST, "/api/posts", Some(json!({ "title": "hi" }))),
    )
    .await;

    let (status, body) = send(&app, json_request(Method::GET, "/api/stats", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPosts"], 1);
    assert_eq!(body["totalVisits"], 3);
    assert_eq!(body["pairCodes"], 2);
    let active = body["activeUsers"].as_u64().unwrap();
    assert!((50..150).contains(&active));
}

#[tokio::test]
async fn test_stats_on_empty_store() {
    let (app, _store, _tmp) = setup();

    let (status, body) = send(&app, json_request(Method::GET, "/api/stats", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPosts"], 0);
    assert_eq!(body["totalVisits"], 0);
    assert_eq!(body["pairCodes"], 0);
}

// Handlers must hand axum a `Send` future, so stats collection may not hold
// the thread-local rng across an await.
#[test]
fn test_collect_stats_future_is_send() {
    fn assert_send<T: Send>(_: &T) {}

    let tmp = TempDir::new().unwrap();
    let store = Arc::new(JsonStore::new(tmp.path()));
    let posts = PostManager::new(Arc::clone(&store));
    let visits = VisitCounter::new(Arc::clone(&store));
    let pairing = PairingService::new(store);

    let stats = collect_stats(&posts, &visits, &pairing);
    assert_send(&stats);
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_chat_post_and_history() {
    let (app, _store, _tmp) = setup();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/chat", Some(json!({ "message": "hello" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"]["user"], "Anonymous");
    assert_eq!(body["message"]["message"], "hello");

    send(
        &app,
        json_request(
            Method::POST,
            "/api/chat",
            Some(json!({ "user": "sam", "message": "hi there" })),
        ),
    )
    .await;

    let (status, body) = send(&app, json_request(Method::GET, "/api/chat", None)).await;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["user"], "sam");
    assert!(
        history[1]["avatar"]
            .as_str()
            .unwrap()
            .contains("name=sam")
    );
}

#[tokio::test]
async fn test_chat_accepts_form_encoded_bodies() {
    let (app, _store, _tmp) = setup();

    let (status, body) = send(
        &app,
        form_request("/api/chat", "user=Jane+Doe&message=hello%20there"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"]["user"], "Jane Doe");
    assert_eq!(body["message"]["message"], "hello there");
    assert!(
        body["message"]["avatar"]
            .as_str()
            .unwrap()
            .contains("name=Jane%20Doe")
    );
}

// ---------------------------------------------------------------------------
// Health, static files, unreachable upstreams
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let (app, _store, _tmp) = setup();

    let (status, body) = send(&app, json_request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "pairgate");
}

#[tokio::test]
async fn test_root_serves_index_html() {
    let (app, _store, _tmp) = setup();

    let (status, body) = send(&app, json_request(Method::GET, "/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("<h1>admin</h1>".to_string()));
}

#[tokio::test]
async fn test_unreachable_upstreams_answer_500() {
    let (app, _store, _tmp) = setup();

    let cases = [
        (
            json_request(Method::POST, "/api/ai", Some(json!({ "message": "hi" }))),
            "AI service unavailable",
        ),
        (
            json_request(Method::GET, "/api/song?query=test", None),
            "Song service unavailable",
        ),
        (
            json_request(Method::POST, "/api/image", Some(json!({ "prompt": "cat" }))),
            "Image generation failed",
        ),
        (
            json_request(Method::GET, "/api/tiktok?username=someone", None),
            "TikTok service unavailable",
        ),
        (
            json_request(Method::GET, "/api/pies/china", None),
            "Pies service unavailable",
        ),
    ];

    for (req, message) in cases {
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": message }));
    }
}
