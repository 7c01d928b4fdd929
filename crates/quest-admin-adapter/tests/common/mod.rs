/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for quest-admin-adapter tests

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use quest_admin_adapter::{ClientConfig, QuestAdminClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Unsigned admin JWT expiring `ttl_secs` from now (negative for an expired one)
pub fn mock_jwt_token(ttl_secs: i64) -> String {
    let exp = chrono::Utc::now().timestamp() + ttl_secs;
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"role":"admin","exp":{exp}}}"#));
    format!("{header}.{payload}.signature")
}

/// Client pointed at the mock server for both admin and public routes, logged in
pub fn logged_in_client(server: &MockServer) -> QuestAdminClient {
    let client = QuestAdminClient::with_config_and_base_urls(
        ClientConfig::default(),
        &server.uri(),
        &server.uri(),
    )
    .expect("client init");
    client
        .set_token(mock_jwt_token(3600))
        .expect("token accepted");
    client
}
