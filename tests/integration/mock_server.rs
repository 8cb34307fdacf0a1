//! Mock HTTP server setup for integration tests

use intervene::{ClientOptions, InterveneClient};
use mockito::{Mock, Server, ServerGuard};

pub const TEST_KEY: &str = "sk_test";

/// Test fixture that owns a mock server and points clients at it.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client using [`TEST_KEY`] with the mock server as host.
    pub fn client(&self) -> InterveneClient {
        self.client_with_key(TEST_KEY)
    }

    pub fn client_with_key(&self, key: &str) -> InterveneClient {
        InterveneClient::new(ClientOptions::new(key).with_host(&self.base_url))
            .expect("client should build")
    }

    /// Mock a JSON response for `method path`, requiring the test key.
    pub async fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .match_header("authorization", format!("Bearer {}", TEST_KEY).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}
