/*
[INPUT]:  Quest identifiers
[OUTPUT]: Public quest records and dashboard metrics
[POS]:    HTTP layer - public analytics endpoints (no auth required)
[UPDATE]: When the dashboard gains a metric
*/

use crate::http::{QuestAdminClient, QuestAdminError, Result};
use crate::types::{ActivityPoint, QuestDocument, QuestParticipants, TaskParticipation};
use reqwest::Method;
use serde_json::Value;

impl QuestAdminClient {
    /// Public quest lookup; a body carrying an `error` key means no such quest
    ///
    /// GET /get_quest?id={quest_id}
    pub async fn get_public_quest(&self, quest_id: i64) -> Result<Option<QuestDocument>> {
        let endpoint = format!("/get_quest?id={}", quest_id);
        let builder = self.public_request(Method::GET, &endpoint)?;
        let Some(body) = self.send_optional_json::<Value>(builder).await? else {
            return Ok(None);
        };
        if body.get("error").is_some() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(body)?))
    }

    /// All quests grouped by category, flattened.
    ///
    /// Categories whose value is not an array are ignored.
    ///
    /// GET /get_quests
    pub async fn get_quests(&self) -> Result<Vec<QuestDocument>> {
        let builder = self.public_request(Method::GET, "/get_quests")?;
        let categories: serde_json::Map<String, Value> = self
            .send_optional_json(builder)
            .await?
            .unwrap_or_default();

        let mut quests = Vec::new();
        for (_, value) in categories {
            if let Value::Array(items) = value {
                for item in items {
                    quests.push(serde_json::from_value(item)?);
                }
            }
        }
        Ok(quests)
    }

    /// Daily completion series
    ///
    /// GET /analytics/get_quest_activity?id={quest_id}
    pub async fn get_quest_activity(&self, quest_id: i64) -> Result<Vec<ActivityPoint>> {
        let endpoint = format!("/analytics/get_quest_activity?id={}", quest_id);
        let builder = self.public_request(Method::GET, &endpoint)?;
        Ok(self.send_optional_json(builder).await?.unwrap_or_default())
    }

    /// Completion count per task
    ///
    /// GET /analytics/get_quest_participation?id={quest_id}
    pub async fn get_quest_participation(&self, quest_id: i64) -> Result<Vec<TaskParticipation>> {
        let endpoint = format!("/analytics/get_quest_participation?id={}", quest_id);
        let builder = self.public_request(Method::GET, &endpoint)?;
        Ok(self.send_optional_json(builder).await?.unwrap_or_default())
    }

    /// GET /get_quest_participants?quest_id={quest_id}
    pub async fn get_quest_participants(&self, quest_id: i64) -> Result<QuestParticipants> {
        let endpoint = format!("/get_quest_participants?quest_id={}", quest_id);
        let builder = self.public_request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Unique visitors of the quest page; `None` when the backend has no count
    ///
    /// GET /analytics/get_unique_visitors?id={quest_id}
    pub async fn get_unique_visitor_count(&self, quest_id: i64) -> Result<Option<u64>> {
        let endpoint = format!("/analytics/get_unique_visitors?id={}", quest_id);
        let builder = self.public_request(Method::GET, &endpoint)?;
        match self.send_optional_json::<Value>(builder).await? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => visitor_count(&value).map(Some),
        }
    }
}

fn visitor_count(value: &Value) -> Result<u64> {
    let count = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(raw) => raw.trim().parse().ok(),
        Value::Object(map) => map.get("count").and_then(|count| match count {
            Value::Number(number) => number.as_u64(),
            Value::String(raw) => raw.trim().parse().ok(),
            _ => None,
        }),
        _ => None,
    };
    count.ok_or_else(|| QuestAdminError::InvalidResponse(format!("unexpected visitor count: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ClientConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn public_client(server: &MockServer) -> QuestAdminClient {
        QuestAdminClient::with_config_and_base_urls(
            ClientConfig::default(),
            &server.uri(),
            &server.uri(),
        )
        .expect("client init")
    }

    #[tokio::test]
    async fn test_public_quest_error_body_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get_quest"))
            .and(query_param("id", "404"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": "Quest not found"
            })))
            .mount(&server)
            .await;

        let quest = public_client(&server)
            .get_public_quest(404)
            .await
            .expect("lookup should not fail");
        assert!(quest.is_none());
    }

    #[tokio::test]
    async fn test_get_quests_flattens_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get_quests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "defi": [{ "id": 1, "name": "Swap" }, { "id": 3, "name": "Lend" }],
                "nft": [{ "id": 2, "name": "Mint" }],
                "featured": "not a list"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let quests = public_client(&server).get_quests().await.expect("get_quests failed");
        let mut ids: Vec<i64> = quests.iter().map(|quest| quest.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_dashboard_metrics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/analytics/get_quest_activity"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "date": "2024-03-05 00:00:00", "participants": 12 }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/analytics/get_quest_participation"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "name": "Follow", "count": "40" }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/get_quest_participants"))
            .and(query_param("quest_id", "8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 55
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/analytics/get_unique_visitors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(200)))
            .mount(&server)
            .await;

        let client = public_client(&server);
        let activity = client.get_quest_activity(8).await.expect("activity");
        let participation = client.get_quest_participation(8).await.expect("participation");
        let participants = client.get_quest_participants(8).await.expect("participants");
        let visitors = client.get_unique_visitor_count(8).await.expect("visitors");

        assert_eq!(activity[0].participants, 12);
        assert_eq!(participation[0].count, 40);
        assert_eq!(participants.count, 55);
        assert_eq!(visitors, Some(200));
    }

    #[test]
    fn test_visitor_count_shapes() {
        assert_eq!(visitor_count(&serde_json::json!(7)).expect("number"), 7);
        assert_eq!(visitor_count(&serde_json::json!("9")).expect("string"), 9);
        assert_eq!(visitor_count(&serde_json::json!({ "count": 3 })).expect("object"), 3);
        assert!(visitor_count(&serde_json::json!([1])).is_err());
    }
}
