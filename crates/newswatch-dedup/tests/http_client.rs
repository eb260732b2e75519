//! Integration tests for `HttpEmbeddingClient` using wiremock HTTP mocks.

use newswatch_dedup::{DedupError, EmbeddingProvider, HttpEmbeddingClient};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> HttpEmbeddingClient {
    HttpEmbeddingClient::new(base_url, 5).expect("client construction should not fail")
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[tokio::test]
async fn embed_returns_vectors_in_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!([[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]);
    Mock::given(method("POST"))
        .and(path("/embed"))
        .and(body_json(serde_json::json!({
            "inputs": ["tesla cuts ev prices", "hyundai unveils hydrogen truck"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let embeddings = client
        .embed(&texts(&[
            "tesla cuts ev prices",
            "hyundai unveils hydrogen truck",
        ]))
        .await
        .expect("should parse embeddings");

    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0], vec![0.1, 0.2, 0.3]);
    assert_eq!(embeddings[1], vec![0.4, 0.5, 0.6]);
}

#[tokio::test]
async fn non_success_status_is_an_embed_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .embed(&texts(&["some text"]))
        .await
        .expect_err("503 should fail");

    assert!(matches!(err, DedupError::Embed(_)), "got {err:?}");
}

#[tokio::test]
async fn vector_count_mismatch_is_an_embed_error() {
    let server = MockServer::start().await;

    // Two inputs, one vector back.
    let body = serde_json::json!([[0.1, 0.2]]);
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .embed(&texts(&["first", "second"]))
        .await
        .expect_err("count mismatch should fail");

    assert!(matches!(err, DedupError::Embed(_)), "got {err:?}");
}

#[tokio::test]
async fn unparseable_body_is_an_embed_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .embed(&texts(&["some text"]))
        .await
        .expect_err("bad body should fail");

    assert!(matches!(err, DedupError::Embed(_)), "got {err:?}");
}
