//! Integration tests for streaming responses

use crate::integration::mock_server::{deployment_json, MockServerFixture};
use futures::StreamExt;
use orquesta_sdk::Error;
use std::time::Duration;

#[tokio::test]
async fn test_ndjson_streaming_response() {
    let mut fixture = MockServerFixture::new().await;
    let first = deployment_json("Hel", false);
    let second = deployment_json("lo", false);
    let third = deployment_json("!", true);
    let _mock = fixture
        .mock_stream("invoke", &[first.as_str(), second.as_str(), third.as_str()])
        .await;

    let client = fixture.create_client().unwrap();
    let stream = client
        .deployments()
        .invoke_with_stream("customer_service")
        .await
        .unwrap();

    let chunks: Vec<_> = stream.map(|r| r.unwrap()).collect().await;
    let text: String = chunks.iter().filter_map(|d| d.content()).collect();

    assert_eq!(chunks.len(), 3);
    assert_eq!(text, "Hello!");
    assert!(chunks[2].is_final);
}

#[tokio::test]
async fn test_sse_framing_and_blank_lines() {
    let mut fixture = MockServerFixture::new().await;
    let first = format!("data: {}", deployment_json("a", false));
    let second = format!("data: {}", deployment_json("b", true));
    let _mock = fixture
        .mock_stream(
            "invoke",
            &[": connected", first.as_str(), "", second.as_str(), "", "data: [DONE]"],
        )
        .await;

    let client = fixture.create_client().unwrap();
    let chunks: Vec<_> = client
        .deployments()
        .invoke_with_stream("k")
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| c.is_ok()));
}

#[tokio::test]
async fn test_malformed_chunk_terminates_stream() {
    let mut fixture = MockServerFixture::new().await;
    let good = deployment_json("a", false);
    let bad = r#"{"id":"01HFXYZ","created":"t","object":"chat","model":"m","provider":"p","is_final":false,"choices":[{"index":0}]}"#;
    let after = deployment_json("never", true);
    let _mock = fixture
        .mock_stream("invoke", &[good.as_str(), "garbage line", bad, after.as_str()])
        .await;

    let client = fixture.create_client().unwrap();
    let chunks: Vec<_> = client
        .deployments()
        .invoke_with_stream("k")
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].as_ref().unwrap().content(), Some("a"));
    assert!(matches!(chunks[1], Err(Error::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_slow_stream_outlives_the_configured_timeout() {
    let mut fixture = MockServerFixture::new().await;
    let lines = vec![
        deployment_json("slow", false),
        deployment_json("er", false),
        deployment_json(" stream", true),
    ];
    let _mock = fixture
        .mock_slow_body("invoke", lines, Duration::from_millis(400))
        .await;

    let client = fixture
        .create_client_with_timeout(Duration::from_millis(300))
        .unwrap();
    let chunks: Vec<_> = client
        .deployments()
        .invoke_with_stream("k")
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(chunks.len(), 3);
    let text: String = chunks
        .iter()
        .filter_map(|c| c.as_ref().ok().and_then(|d| d.content()))
        .collect();
    assert_eq!(text, "slower stream");
}

#[tokio::test]
async fn test_slow_buffered_invoke_hits_the_timeout() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_slow_body(
            "invoke",
            vec![deployment_json("late", true)],
            Duration::from_millis(800),
        )
        .await;

    let client = fixture
        .create_client_with_timeout(Duration::from_millis(200))
        .unwrap();
    let err = client.deployments().invoke("k").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
