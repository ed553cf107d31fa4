use core_logic::{AllocationSource, NetworkError, ProxyManager, ProxySelector};
use pengu_checker::profile::CLAIM_ORIGIN;
use pengu_checker::ClustersClient;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "7EcDhSYGxXyscszYEp35KHN8vvw3svAuLKTzXwCFLtV";

fn direct_client(server: &MockServer) -> ClustersClient {
    ClustersClient::new(Arc::new(ProxySelector::seeded(Vec::new(), 1)))
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(500))
}

fn eligibility_path() -> String {
    format!("/v0.1/airdrops/pengu/eligibility/{}", KEY)
}

#[tokio::test]
async fn test_decodes_allocation_over_direct_connection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(eligibility_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 12000,
            "totalUnclaimed": 9000,
            "categories": ["nft-holder", {"id": 3}],
            "addresses": [KEY],
            "somethingNew": {"nested": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = direct_client(&server).fetch_allocation(KEY).await.unwrap();

    assert_eq!(record.total, 12000);
    assert_eq!(record.total_unclaimed, 9000);
    assert_eq!(record.categories.len(), 2);
    assert_eq!(record.addresses, vec![KEY.to_string()]);
}

#[tokio::test]
async fn test_browser_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(eligibility_path()))
        .and(header("origin", CLAIM_ORIGIN))
        .and(header("referer", "https://claim.pudgypenguins.com/"))
        .and(header_exists("user-agent"))
        .and(header_exists("sec-ch-ua"))
        .and(header("sec-fetch-site", "cross-site"))
        .and(header("accept", "*/*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalUnclaimed": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = direct_client(&server).fetch_allocation(KEY).await.unwrap();
    assert_eq!(record.total_unclaimed, 1);
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(eligibility_path()))
        .respond_with(ResponseTemplate::new(403).set_body_string("<html>Just a moment...</html>"))
        .mount(&server)
        .await;

    let err = direct_client(&server).fetch_allocation(KEY).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<NetworkError>(),
        Some(NetworkError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(eligibility_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"totalUnclaimed": 5}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = direct_client(&server).fetch_allocation(KEY).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<NetworkError>(),
        Some(NetworkError::Timeout { .. })
    ));
}

#[tokio::test]
async fn test_redirects_are_not_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(eligibility_path()))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/elsewhere", server.uri())),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalUnclaimed": 999
        })))
        .expect(0)
        .mount(&server)
        .await;

    // The 302 body is empty, which does not decode
    let result = direct_client(&server).fetch_allocation(KEY).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_proxy_from_pool_is_used() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalUnclaimed": 1
        })))
        .expect(0)
        .mount(&server)
        .await;

    // Nothing listens on port 1, so going through the proxy must fail
    let pool = ProxyManager::parse_proxies("127.0.0.1:1:user:pass\n");
    let client = ClustersClient::new(Arc::new(ProxySelector::seeded(pool, 1)))
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(500));

    let err = client.fetch_allocation(KEY).await.unwrap_err();
    assert!(err.downcast_ref::<NetworkError>().is_some());
}
