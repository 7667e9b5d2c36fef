//! Integration tests against mock token and EoX endpoints.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cisco_eox::EoxClient;
use cisco_eox::auth::{AuthSession, ClientCredentialsFlow, StaticTokenProvider};
use cisco_eox::config::QueryConfig;
use cisco_eox::error::{AuthError, Error, QueryError};

fn token_body(expires_in: u64) -> serde_json::Value {
    json!({
        "token_type": "Bearer",
        "access_token": "mock-access-token",
        "expires_in": expires_in
    })
}

fn page_body(last_index: u32, pids: &[&str]) -> serde_json::Value {
    let records: Vec<_> = pids
        .iter()
        .map(|pid| json!({"EOLProductID": pid}))
        .collect();
    json!({
        "EOXRecord": records,
        "PaginationResponseRecord": {"LastIndex": last_index}
    })
}

fn test_client(server: &MockServer) -> EoxClient {
    EoxClient::builder()
        .token_provider(StaticTokenProvider::new("Bearer", "test-token"))
        .base_url(server.uri())
        .query_config(QueryConfig::default().page_delay(Duration::ZERO))
        .build()
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn login_posts_client_credentials_and_parses_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/as/token.oauth2"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=my-key"))
        .and(body_string_contains("client_secret=my-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(3599)))
        .expect(1)
        .mount(&server)
        .await;

    let flow = ClientCredentialsFlow::new("my-key", "my-secret")
        .with_token_url(format!("{}/as/token.oauth2", server.uri()));

    let token = flow.authenticate().await.expect("login failed");
    assert_eq!(token.as_header(), "Bearer mock-access-token");
    assert!(token.expires_at.is_some());
    assert!(token.is_valid());
}

#[tokio::test]
async fn login_failure_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid client"))
        .mount(&server)
        .await;

    let flow = ClientCredentialsFlow::new("bad-key", "bad-secret")
        .with_token_url(format!("{}/as/token.oauth2", server.uri()));

    let result = AuthSession::login(flow).await;
    match result {
        Err(AuthError::Http { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid client");
        }
        other => panic!("expected AuthError::Http, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn session_with_valid_token_logs_in_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(3600)))
        .expect(1)
        .mount(&server)
        .await;

    let flow = ClientCredentialsFlow::new("key", "secret")
        .with_token_url(format!("{}/as/token.oauth2", server.uri()));
    let session = AuthSession::login(flow).await.expect("login failed");

    assert!(session.is_token_valid().await);

    // Repeated use hands out the cached token without hitting the endpoint.
    for _ in 0..3 {
        session.ensure_valid_token().await.expect("token lookup failed");
    }
}

#[tokio::test]
async fn expired_session_reauthenticates_per_request() {
    let server = MockServer::start().await;

    // expires_in of zero means the token is stale the moment it arrives.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(0)))
        .expect(3)
        .mount(&server)
        .await;

    let flow = ClientCredentialsFlow::new("key", "secret")
        .with_token_url(format!("{}/as/token.oauth2", server.uri()));
    let session = AuthSession::login(flow).await.expect("login failed");

    assert!(!session.is_token_valid().await);

    session.ensure_valid_token().await.expect("re-login failed");
    session.ensure_valid_token().await.expect("re-login failed");
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn pagination_follows_last_index_in_order() {
    let server = MockServer::start().await;

    for (page, pid) in [(1, "PID-PAGE-1"), (2, "PID-PAGE-2"), (3, "PID-PAGE-3")] {
        Mock::given(method("GET"))
            .and(path(format!("/EOXByProductID/{page}/PID-A")))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(3, &[pid])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = test_client(&server);
    let records = client
        .query_by_product_ids(&["PID-A"])
        .await
        .expect("query failed");

    // Records from all three pages, concatenated in response order.
    let ids: Vec<_> = records
        .iter()
        .map(|r| r.get_str("EOLProductID").unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["PID-PAGE-1", "PID-PAGE-2", "PID-PAGE-3"]);
}

#[tokio::test]
async fn single_page_batch_stops_at_last_index() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/EOXByProductID/1/PID-A,PID-B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, &["PID-A", "PID-B"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let records = client
        .query_by_product_ids(&["PID-A", "PID-B"])
        .await
        .expect("query failed");
    assert_eq!(records.len(), 2);
}

// =============================================================================
// Batching
// =============================================================================

#[tokio::test]
async fn forty_five_identifiers_issue_three_batched_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, &[])))
        .expect(3)
        .mount(&server)
        .await;

    let ids: Vec<String> = (0..45).map(|i| format!("PID-{i}")).collect();

    let client = test_client(&server);
    client.query_by_product_ids(&ids).await.expect("query failed");

    // Batch sizes 20, 20, 5 in submission order.
    let requests = server.received_requests().await.expect("recording enabled");
    let batch_sizes: Vec<usize> = requests
        .iter()
        .map(|req| {
            let path = req.url.path();
            let ids = path.rsplit('/').next().unwrap();
            ids.split(',').count()
        })
        .collect();
    assert_eq!(batch_sizes, vec![20, 20, 5]);
}

#[tokio::test]
async fn blacklisted_and_duplicate_identifiers_never_leave_the_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/EOXByProductID/1/PID-A,PID-B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, &["PID-A", "PID-B"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .query_by_product_ids(&["PID-A", "N/A", "pid-a", "unknown", "PID-B", "", "x"])
        .await
        .expect("query failed");
}

#[tokio::test]
async fn all_blacklisted_input_issues_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, &[])))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let records = client
        .query_by_product_ids(&["n/a", "unknown", ""])
        .await
        .expect("query failed");
    assert!(records.is_empty());
}

// =============================================================================
// Error handling
// =============================================================================

#[tokio::test]
async fn non_2xx_page_aborts_the_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/EOXByProductID/1/PID-A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(3, &["PID-PAGE-1"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/EOXByProductID/2/PID-A"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server exploded"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .query_by_product_ids(&["PID-A"])
        .await
        .expect_err("query should fail on page 2");

    match &err {
        Error::Query(QueryError::Http { status, body }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "server exploded");
        }
        other => panic!("expected QueryError::Http, got {other:?}"),
    }
    assert_eq!(err.status_code(), Some(500));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn pages_iterator_retains_results_before_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/EOXByProductID/1/PID-A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(3, &["PID-PAGE-1"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/EOXByProductID/2/PID-A"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server exploded"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut pages = client.pages(&["PID-A"]);

    // Page 1 succeeds and stays with the caller.
    let page = pages.next().await.unwrap().expect("page 1 should succeed");
    assert_eq!(page.len(), 1);
    assert!(page.has_more());
    let kept = page.into_records();

    // Page 2 fails, the iterator latches, and the kept records survive.
    assert!(pages.next().await.unwrap().is_err());
    assert!(pages.next().await.is_none());
    assert_eq!(kept[0].get_str("EOLProductID"), Some("PID-PAGE-1"));
}

#[tokio::test]
async fn transport_failure_is_distinguishable() {
    // Point at a closed port; no response is ever received.
    let client = EoxClient::builder()
        .token_provider(StaticTokenProvider::new("Bearer", "test-token"))
        .base_url("http://127.0.0.1:1")
        .query_config(QueryConfig::default().page_delay(Duration::ZERO))
        .build();

    let err = client
        .query_by_product_ids(&["PID-A"])
        .await
        .expect_err("query should fail");
    assert!(err.is_transport());
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .query_by_product_ids(&["PID-A"])
        .await
        .expect_err("query should fail");
    assert!(matches!(err, Error::Query(QueryError::Parse { .. })));
}

// =============================================================================
// End to end: session + client
// =============================================================================

#[tokio::test]
async fn session_token_authorizes_query_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/as/token.oauth2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(3600)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/EOXByProductID/1/PID-A"))
        .and(header("Authorization", "Bearer mock-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, &["PID-A"])))
        .expect(1)
        .mount(&server)
        .await;

    let flow = ClientCredentialsFlow::new("key", "secret")
        .with_token_url(format!("{}/as/token.oauth2", server.uri()));
    let session = AuthSession::login(flow).await.expect("login failed");

    let client = EoxClient::builder()
        .token_provider(session)
        .base_url(server.uri())
        .query_config(QueryConfig::default().page_delay(Duration::ZERO))
        .build();

    let records = client
        .query_by_product_ids(&["PID-A"])
        .await
        .expect("query failed");
    assert_eq!(records.len(), 1);
}
