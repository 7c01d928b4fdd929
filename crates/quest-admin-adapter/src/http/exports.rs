/*
[INPUT]:  Quest or boost identifiers with admin JWT
[OUTPUT]: Raw JSON exports (participants, users, winners)
[POS]:    HTTP layer - admin export endpoints
[UPDATE]: When adding a downloadable export
*/

use crate::http::{QuestAdminClient, Result};
use reqwest::Method;
use serde_json::Value;

impl QuestAdminClient {
    /// GET /admin/quest/get_quest_participants?quest_id={quest_id}
    pub async fn get_quest_participants_by_quest_id(&self, quest_id: i64) -> Result<Value> {
        self.admin_export(&format!(
            "/admin/quest/get_quest_participants?quest_id={}",
            quest_id
        ))
        .await
    }

    /// GET /admin/quest/get_quest_users?quest_id={quest_id}
    pub async fn get_quest_users_by_quest_id(&self, quest_id: i64) -> Result<Value> {
        self.admin_export(&format!("/admin/quest/get_quest_users?quest_id={}", quest_id))
            .await
    }

    /// GET /admin/quest_boost/get_boost_winners?boost_id={boost_id}
    pub async fn get_boost_winners_by_boost_id(&self, boost_id: i64) -> Result<Value> {
        self.admin_export(&format!(
            "/admin/quest_boost/get_boost_winners?boost_id={}",
            boost_id
        ))
        .await
    }

    async fn admin_export(&self, endpoint: &str) -> Result<Value> {
        let builder = self.admin_request(Method::GET, endpoint)?;
        self.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::jwt::token_with_exp;
    use crate::http::{ClientConfig, QuestAdminClient};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_boost_winners_export() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/quest_boost/get_boost_winners"))
            .and(query_param("boost_id", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "winners": ["0x01", "0x02"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = QuestAdminClient::with_config_and_base_urls(
            ClientConfig::default(),
            &server.uri(),
            &server.uri(),
        )
        .expect("client init");
        client
            .set_token(token_with_exp(chrono::Utc::now().timestamp() + 600))
            .expect("token accepted");

        let winners = client
            .get_boost_winners_by_boost_id(4)
            .await
            .expect("export failed");
        assert_eq!(winners["winners"][1], "0x02");
    }
}
