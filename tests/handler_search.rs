mod common;

use axum_test::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_search_finds_created_link() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let created = server
        .post("/links/shorten")
        .json(&json!({ "original_url": "https://example.com/page" }))
        .await;
    let code = created.json::<serde_json::Value>()["short_code"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server
        .get("/links/search")
        .add_query_param("original_url", "https://example.com/page")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["short_code"], code);
}

#[tokio::test]
async fn test_search_matches_canonical_form() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&store, "abc123", "https://example.com/page").await;

    let server = TestServer::new(common::test_router(state)).unwrap();

    // Host case, default port and fragment differences still match.
    let response = server
        .get("/links/search")
        .add_query_param("original_url", "https://EXAMPLE.com:443/page#top")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["short_code"], "abc123");
}

#[tokio::test]
async fn test_search_returns_first_in_insertion_order() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&store, "first1", "https://dup.com/").await;
    common::create_test_link(&store, "second", "https://dup.com/").await;

    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .get("/links/search")
        .add_query_param("original_url", "https://dup.com/")
        .await;
    assert_eq!(response.json::<serde_json::Value>()["short_code"], "first1");
}

#[tokio::test]
async fn test_search_unregistered_url() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .get("/links/search")
        .add_query_param("original_url", "https://nowhere.com")
        .await;
    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

#[tokio::test]
async fn test_search_skips_expired_links() {
    let (state, store) = common::create_test_state();
    common::create_expired_link(&store, "stale1", "https://gone.com/").await;

    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .get("/links/search")
        .add_query_param("original_url", "https://gone.com/")
        .await;
    response.assert_status_not_found();
}
