//! Integration tests for the non-streaming deployment calls

use crate::integration::mock_server::{deployment_json, MockServerFixture, API_KEY};
use mockito::Matcher;
use orquesta_sdk::{DeploymentMetrics, DeploymentPerformance, DeploymentType, InvokeParams};
use serde_json::json;

#[tokio::test]
async fn test_get_config() {
    let mut fixture = MockServerFixture::new().await;
    let body = json!({
        "id": "cfg_01",
        "provider": "openai",
        "model": "gpt-4",
        "type": "chat",
        "messages": [{"role": "system", "content": "Be brief"}],
        "parameters": {"temperature": 0.2},
        "tools": [{"type": "function", "function": {"name": "search"}}]
    });
    let mock = fixture
        .mock_json_response("get_config", 200, &body.to_string())
        .await;

    let client = fixture.create_client().unwrap();
    let config = client
        .deployments()
        .get_config(InvokeParams::new("customer_service"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(config.id(), "cfg_01");
    assert_eq!(config.deployment_type, DeploymentType::Chat);
    assert_eq!(config.to_value().unwrap(), body);
}

#[tokio::test]
async fn test_invoke_sends_headers_and_body() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", MockServerFixture::path("invoke").as_str())
        .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
        .match_header("x-environment", "test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "key": "customer_service",
            "variables": {"firstname": "John"},
            "metadata": {"team": "support"}
        })))
        .with_status(200)
        .with_body(deployment_json("Hello John", true))
        .create_async()
        .await;

    let client = fixture.create_client().unwrap();
    let params = InvokeParams::new("customer_service")
        .input("firstname", "John")
        .metadata(json!({"team": "support"}).as_object().unwrap().clone());
    let result = client.deployments().invoke(params).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.id(), "01HFXYZ");
    assert_eq!(result.content(), Some("Hello John"));
    assert!(result.is_final);
}

#[tokio::test]
async fn test_add_metrics_through_result() {
    let mut fixture = MockServerFixture::new().await;
    let _invoke = fixture
        .mock_json_response("invoke", 200, &deployment_json("Hi", true))
        .await;
    let metrics_mock = fixture
        .server
        .mock("POST", MockServerFixture::path("01HFXYZ/metrics").as_str())
        .match_body(Matcher::Json(json!({
            "feedback": {"score": 1},
            "performance": {"latency": 320.5},
            "conversation_id": "conv-9"
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = fixture.create_client().unwrap();
    let result = client.deployments().invoke("customer_service").await.unwrap();
    result
        .add_metrics(
            DeploymentMetrics::new()
                .feedback(1)
                .performance(DeploymentPerformance {
                    latency: Some(320.5),
                    time_to_first_token: None,
                })
                .conversation_id("conv-9"),
        )
        .await
        .unwrap();

    metrics_mock.assert_async().await;
}
