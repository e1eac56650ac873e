//! Integration tests for error handling

use crate::integration::mock_server::MockServerFixture;
use orquesta_sdk::{DeploymentMetrics, Error};
use serde_json::json;

#[tokio::test]
async fn test_get_config_non_200() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(
            "get_config",
            404,
            json!({"key": "unknown"}),
            r#"{"message":"Deployment not found"}"#,
        )
        .await;

    let client = fixture.create_client().unwrap();
    let err = client.deployments().get_config("unknown").await.unwrap_err();

    match err {
        Error::RequestFailed { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Deployment not found"));
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invoke_non_200_is_not_retried() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response("invoke", 500, r#"{"message":"Internal server error"}"#)
        .await;

    let client = fixture.create_client().unwrap();
    let err = client.deployments().invoke("k").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_stream_non_200() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json_response("invoke", 401, r#"{"message":"Invalid API key"}"#)
        .await;

    let client = fixture.create_client().unwrap();
    let err = client
        .deployments()
        .invoke_with_stream("k")
        .await
        .err()
        .unwrap();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Invalid API key"));
}

#[tokio::test]
async fn test_add_metrics_non_200() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json_response("dep_1/metrics", 422, r#"{"message":"bad score"}"#)
        .await;

    let client = fixture.create_client().unwrap();
    let err = client
        .deployments()
        .add_metrics("dep_1", DeploymentMetrics::new().feedback(7))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_json_response("invoke", 200, "{}").await;

    let client = fixture.create_client().unwrap();
    let err = client.deployments().invoke("").await.unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert!(!mock.matched_async().await);
}
