use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use server::{AppState, create_router};
use storage::{CacheStore, InMemoryStore, KeyValueStore};
use suggest::{CompletionClient, KeyRotator};

const SILK_SUGGESTIONS: &str = r#"[{"label":"silk satin","insertText":"silk satin","kind":"material","detail":"lustrous weave","trigger":"silk"}]"#;

fn test_router(api_base: &str, keys: Vec<&str>, cache: CacheStore) -> Router {
    let completer = CompletionClient::new(
        KeyRotator::new(keys.into_iter().map(String::from).collect()),
        api_base,
        "primary",
        "fallback",
    )
    .unwrap();

    create_router(AppState {
        cache,
        completer: Arc::new(completer),
        cache_ttl_secs: 3600,
    })
}

/// Router whose upstream is unroutable: any model call fails fast instead of
/// succeeding, so tests can prove no call was needed.
fn router_without_upstream(cache: CacheStore) -> Router {
    test_router("http://127.0.0.1:9", vec!["test-key"], cache)
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn candidate_body(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}

#[tokio::test]
async fn test_empty_last_word_short_circuits() {
    let router = router_without_upstream(CacheStore::unconfigured());

    // Trailing whitespace: the last token is empty, no cache or model call.
    let (status, body) = post_json(
        &router,
        "/api/suggest",
        json!({"text": "I love silk ", "cursor": 12}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"suggestions": []}));
}

#[tokio::test]
async fn test_cursor_zero_short_circuits() {
    let router = router_without_upstream(CacheStore::unconfigured());

    let (status, body) = post_json(
        &router,
        "/api/suggest",
        json!({"text": "I love silk", "cursor": 0}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"suggestions": []}));
}

#[tokio::test]
async fn test_cache_hit_skips_the_model() {
    let store = Arc::new(InMemoryStore::new());
    store.set("autofill:silk", SILK_SUGGESTIONS).await.unwrap();
    let router = router_without_upstream(CacheStore::new(store));

    let (status, body) = post_json(
        &router,
        "/api/suggest",
        json!({"text": "I love silk", "cursor": 11}),
    )
    .await;

    // A non-empty answer proves the cache served it: the upstream here is
    // unroutable and would have degraded to an empty list.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"][0]["label"], "silk satin");
    assert_eq!(body["suggestions"][0]["insertText"], "silk satin");
}

#[tokio::test]
async fn test_cache_key_is_lowercased() {
    let store = Arc::new(InMemoryStore::new());
    store.set("autofill:silk", SILK_SUGGESTIONS).await.unwrap();
    let router = router_without_upstream(CacheStore::new(store));

    let (status, body) = post_json(
        &router,
        "/api/suggest",
        json!({"text": "I love SILK", "cursor": 11}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"][0]["label"], "silk satin");
}

#[tokio::test]
async fn test_miss_calls_model_and_fills_cache() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/primary:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(SILK_SUGGESTIONS)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(InMemoryStore::new());
    let cache = CacheStore::new(store.clone());
    let router = test_router(&mock_server.uri(), vec!["test-key"], cache.clone());

    let (status, body) = post_json(
        &router,
        "/api/suggest",
        json!({"text": "I love silk", "cursor": 11}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"][0]["trigger"], "silk");

    let cached = cache.read("autofill:silk").await.unwrap();
    let cached: Value = serde_json::from_str(&cached).unwrap();
    assert_eq!(cached[0]["label"], "silk satin");
}

#[tokio::test]
async fn test_both_models_failing_yields_empty_list_with_200() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let router = test_router(
        &mock_server.uri(),
        vec!["test-key"],
        CacheStore::unconfigured(),
    );

    let (status, body) = post_json(
        &router,
        "/api/suggest",
        json!({"text": "I love silk", "cursor": 11}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"suggestions": []}));
}

#[tokio::test]
async fn test_empty_credential_pool_yields_empty_list_with_200() {
    let router = test_router("http://127.0.0.1:9", Vec::new(), CacheStore::unconfigured());

    let (status, body) = post_json(
        &router,
        "/api/suggest",
        json!({"text": "I love silk", "cursor": 11}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"suggestions": []}));
}

#[tokio::test]
async fn test_legacy_complete_alias() {
    let store = Arc::new(InMemoryStore::new());
    store.set("autofill:silk", SILK_SUGGESTIONS).await.unwrap();
    let router = router_without_upstream(CacheStore::new(store));

    let (status, body) = post_json(
        &router,
        "/api/complete",
        json!({"text": "I love silk", "cursor": 11}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"][0]["label"], "silk satin");
}

#[tokio::test]
async fn test_validate_rejects_missing_word() {
    let router =
        router_without_upstream(CacheStore::new(Arc::new(InMemoryStore::new())));

    let (status, body) = post_json(&router, "/api/validate", json!({"category": "fabric"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("word"));
}

#[tokio::test]
async fn test_validate_rejects_unconfigured_store() {
    let router = router_without_upstream(CacheStore::unconfigured());

    let (status, body) = post_json(
        &router,
        "/api/validate",
        json!({"word": "velvet", "category": "fabric"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("cache store"));
}

#[tokio::test]
async fn test_validate_persists_word_and_evicts_cache() {
    let store = Arc::new(InMemoryStore::new());
    store
        .set("autofill:velvet", r#"[{"label":"stale"}]"#)
        .await
        .unwrap();
    let cache = CacheStore::new(store);
    let router = router_without_upstream(cache.clone());

    let (status, body) = post_json(
        &router,
        "/api/validate",
        json!({"word": "velvet", "category": "fabric"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("velvet"));

    // The permanent entry exists; the stale suggestion cache entry is gone.
    let dict_entry = cache.read("dict:velvet").await.unwrap();
    let dict_entry: Value = serde_json::from_str(&dict_entry).unwrap();
    assert_eq!(dict_entry["word"], "velvet");
    assert_eq!(dict_entry["category"], "fabric");
    assert!(dict_entry["addedAt"].is_string());

    assert_eq!(cache.read("autofill:velvet").await, None);
}

#[tokio::test]
async fn test_feedback_alias_matches_validate() {
    let cache = CacheStore::new(Arc::new(InMemoryStore::new()));
    let router = router_without_upstream(cache.clone());

    let (status, _) = post_json(
        &router,
        "/api/feedback",
        json!({"word": "tulle", "category": "fabric"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(cache.read("dict:tulle").await.is_some());
}

#[tokio::test]
async fn test_lookup_after_feedback_regenerates() {
    let mock_server = MockServer::start().await;
    let fresh = r#"[{"label":"velvet blazer","insertText":"velvet blazer","kind":"garment","detail":"","trigger":"velvet"}]"#;
    Mock::given(method("POST"))
        .and(path("/models/primary:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(fresh)))
        .mount(&mock_server)
        .await;

    let store = Arc::new(InMemoryStore::new());
    store
        .set("autofill:velvet", r#"[{"label":"stale"}]"#)
        .await
        .unwrap();
    let cache = CacheStore::new(store);
    let router = test_router(&mock_server.uri(), vec!["test-key"], cache);

    let (status, _) = post_json(
        &router,
        "/api/validate",
        json!({"word": "velvet", "category": "fabric"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &router,
        "/api/suggest",
        json!({"text": "a velvet", "cursor": 8}),
    )
    .await;

    // Must not be the stale pre-feedback entry.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"][0]["label"], "velvet blazer");
}

#[tokio::test]
async fn test_liveness_endpoints() {
    let router = router_without_upstream(CacheStore::unconfigured());

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
