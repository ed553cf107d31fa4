use core_logic::{ProxySelector, WalletCredential, WorkerRunner};
use ed25519_dalek::SigningKey;
use pengu_checker::{render_table, ClustersClient, ReportSummary};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wallet(seed: u8) -> (WalletCredential, String) {
    let signing = SigningKey::from_bytes(&[seed; 32]);
    let public = signing.verifying_key().to_bytes();
    let mut full = signing.to_bytes().to_vec();
    full.extend_from_slice(&public);
    (
        WalletCredential::new(bs58::encode(full).into_string()),
        bs58::encode(public).into_string(),
    )
}

fn eligibility(public_key: &str) -> String {
    format!("/v0.1/airdrops/pengu/eligibility/{}", public_key)
}

fn unclaimed(amount: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "total": amount,
        "totalUnclaimed": amount,
        "categories": [],
        "addresses": []
    }))
}

async fn runner_for(server: &MockServer) -> WorkerRunner {
    let client = ClustersClient::new(Arc::new(ProxySelector::seeded(Vec::new(), 3)))
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(400));
    WorkerRunner::new(Arc::new(client), Duration::from_millis(5))
}

#[tokio::test]
async fn test_three_wallet_batch_with_one_retry() {
    let server = MockServer::start().await;
    let (a, pk_a) = wallet(101);
    let (b, pk_b) = wallet(102);
    let (c, pk_c) = wallet(103);

    Mock::given(method("GET"))
        .and(path(eligibility(&pk_a)))
        .respond_with(unclaimed(500))
        .expect(1)
        .mount(&server)
        .await;

    // First call to B hangs past the client timeout, the retry answers
    Mock::given(method("GET"))
        .and(path(eligibility(&pk_b)))
        .respond_with(unclaimed(7).set_delay(Duration::from_secs(3)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(eligibility(&pk_b)))
        .respond_with(unclaimed(50))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(eligibility(&pk_c)))
        .respond_with(unclaimed(0))
        .expect(1)
        .mount(&server)
        .await;

    let results = runner_for(&server).await.run(&[a, b, c]).await;

    let order: Vec<(&str, u64)> = results
        .iter()
        .map(|r| (r.public_key.as_str(), r.unclaimed))
        .collect();
    assert_eq!(
        order,
        vec![(pk_a.as_str(), 500), (pk_b.as_str(), 50), (pk_c.as_str(), 0)]
    );
    assert!(results.iter().all(|r| !r.is_failed()));

    let table = render_table(&results);
    assert!(!table.contains("Failed"));
    let first_row = table.lines().find(|l| l.starts_with(&pk_a)).unwrap();
    assert!(first_row.contains("| 500"));
}

#[tokio::test]
async fn test_persistent_failure_shows_failed() {
    let server = MockServer::start().await;
    let (good, pk_good) = wallet(110);
    let (bad, pk_bad) = wallet(111);

    Mock::given(method("GET"))
        .and(path(eligibility(&pk_good)))
        .respond_with(unclaimed(20))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(eligibility(&pk_bad)))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(2)
        .mount(&server)
        .await;

    let results = runner_for(&server).await.run(&[bad, good]).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].public_key, pk_good);
    assert_eq!(results[1].public_key, pk_bad);
    assert!(results[1].is_failed());

    let table = render_table(&results);
    let failed_row = table.lines().find(|l| l.starts_with(&pk_bad)).unwrap();
    assert!(failed_row.contains("| Failed"));

    let summary = ReportSummary::from_results(&results);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.eligible, 1);
    assert_eq!(summary.total_unclaimed, 20);
}
