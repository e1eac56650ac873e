//! Mock HTTP server setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use orquesta_sdk::{OrquestaClient, Result};
use std::io::Write;
use std::time::Duration;

pub const API_KEY: &str = "test-api-key";
pub const BASE_PATH: &str = "/v2/deployments";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        init_tracing();
        let server = Server::new_async().await;
        let base_url = format!("{}{}", server.url(), BASE_PATH);
        Self { server, base_url }
    }

    /// Create a client pointed at the mock server.
    pub fn create_client(&self) -> Result<OrquestaClient> {
        OrquestaClient::builder()
            .api_key(API_KEY)
            .environment("test")
            .base_url(&self.base_url)
            .build()
    }

    /// Create a client with an explicit transport timeout.
    pub fn create_client_with_timeout(&self, timeout: Duration) -> Result<OrquestaClient> {
        OrquestaClient::builder()
            .api_key(API_KEY)
            .environment("test")
            .base_url(&self.base_url)
            .timeout(timeout)
            .build()
    }

    pub fn path(endpoint: &str) -> String {
        format!("{}/{}", BASE_PATH, endpoint)
    }

    /// Mock a JSON response on `endpoint` (relative to the deployments base path).
    pub async fn mock_json_response(&mut self, endpoint: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", Self::path(endpoint).as_str())
            .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Mock a streamed response; each entry becomes one line of the body.
    pub async fn mock_stream(&mut self, endpoint: &str, lines: &[&str]) -> Mock {
        let body = lines.iter().map(|l| format!("{}\n", l)).collect::<String>();
        self.server
            .mock("POST", Self::path(endpoint).as_str())
            .match_header("accept", "text/event-stream")
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(body)
            .create_async()
            .await
    }

    /// Mock a chunked response that writes each line after waiting `pause`.
    pub async fn mock_slow_body(
        &mut self,
        endpoint: &str,
        lines: Vec<String>,
        pause: Duration,
    ) -> Mock {
        self.server
            .mock("POST", Self::path(endpoint).as_str())
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_chunked_body(move |w| {
                for line in &lines {
                    std::thread::sleep(pause);
                    w.write_all(line.as_bytes())?;
                    w.write_all(b"\n")?;
                }
                Ok(())
            })
            .create_async()
            .await
    }

    /// Mock an error response that also checks the request body.
    pub async fn mock_error_response(
        &mut self,
        endpoint: &str,
        status: usize,
        expected_body: serde_json::Value,
        error_body: &str,
    ) -> Mock {
        self.server
            .mock("POST", Self::path(endpoint).as_str())
            .match_body(Matcher::Json(expected_body))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(error_body)
            .create_async()
            .await
    }
}

/// Route SDK logs to the test harness; `RUST_LOG=orquesta_sdk=debug` shows them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn deployment_json(content: &str, is_final: bool) -> String {
    serde_json::json!({
        "id": "01HFXYZ",
        "created": "2024-01-01T00:00:00Z",
        "object": "chat",
        "model": "gpt-4",
        "provider": "openai",
        "is_final": is_final,
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": null}
        ]
    })
    .to_string()
}
