/*
[INPUT]:  Mock server for admin and public routes
[OUTPUT]: Logged-in clients and admin JWTs for integration tests
[POS]:    Test infrastructure - shared across integration tests
[UPDATE]: When client construction or session handling changes
*/

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use quest_admin_adapter::{ClientConfig, QuestAdminClient};
use wiremock::MockServer;

/// Unsigned admin JWT expiring `ttl_secs` from now
pub fn mock_jwt_token(ttl_secs: i64) -> String {
    let exp = chrono::Utc::now().timestamp() + ttl_secs;
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"role":"admin","exp":{exp}}}"#));
    format!("{header}.{payload}.signature")
}

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
