/*
[INPUT]:  Task and quiz payloads with admin JWT
[OUTPUT]: Task records, quiz details and acknowledgements
[POS]:    HTTP layer - admin task endpoints (one create/update route per kind)
[UPDATE]: When the backend adds a task kind
*/

use crate::http::{QuestAdminClient, Result};
use crate::types::{
    ActionResponse, CreateQuiz, CreateQuizQuestion, CreateTaskRequest, CreatedQuiz,
    CreatedRecord, DeleteTaskRequest, QuizDetails, UpdateQuiz, UpdateQuizQuestion,
    UpdateTaskRequest, UserTask,
};
use reqwest::Method;

impl QuestAdminClient {
    /// List every task of a quest
    ///
    /// GET /admin/quest/get_tasks?quest_id={quest_id}
    pub async fn get_tasks_by_quest_id(&self, quest_id: i64) -> Result<Vec<UserTask>> {
        let endpoint = format!("/admin/quest/get_tasks?quest_id={}", quest_id);
        let builder = self.admin_request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Quiz header and questions
    ///
    /// GET /admin/quiz/get_quiz?id={quiz_id}
    pub async fn get_quiz_details(&self, quiz_id: i64) -> Result<QuizDetails> {
        let endpoint = format!("/admin/quiz/get_quiz?id={}", quiz_id);
        let builder = self.admin_request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// POST /admin/tasks/quiz/create
    pub async fn create_quiz(&self, req: &CreateQuiz) -> Result<CreatedQuiz> {
        let builder = self.admin_request(Method::POST, "/admin/tasks/quiz/create")?.json(req);
        self.send_json(builder).await
    }

    /// POST /admin/tasks/quiz/update
    pub async fn update_quiz(&self, req: &UpdateQuiz) -> Result<ActionResponse> {
        let builder = self.admin_request(Method::POST, "/admin/tasks/quiz/update")?.json(req);
        self.send_json(builder).await
    }

    /// POST /admin/tasks/quiz/question/create
    pub async fn create_quiz_question(&self, req: &CreateQuizQuestion) -> Result<CreatedRecord> {
        let builder = self
            .admin_request(Method::POST, "/admin/tasks/quiz/question/create")?
            .json(req);
        self.send_json(builder).await
    }

    /// POST /admin/tasks/quiz/question/update
    pub async fn update_quiz_question(&self, req: &UpdateQuizQuestion) -> Result<ActionResponse> {
        let builder = self
            .admin_request(Method::POST, "/admin/tasks/quiz/question/update")?
            .json(req);
        self.send_json(builder).await
    }

    /// Create a non-quiz task
    ///
    /// POST /admin/tasks/{task_type}/create
    pub async fn create_task(&self, req: &CreateTaskRequest) -> Result<CreatedRecord> {
        let builder = self.admin_request(Method::POST, &req.endpoint())?.json(req);
        self.send_json(builder).await
    }

    /// Update a non-quiz task
    ///
    /// POST /admin/tasks/{task_type}/update
    pub async fn update_task(&self, req: &UpdateTaskRequest) -> Result<ActionResponse> {
        let builder = self.admin_request(Method::POST, &req.endpoint())?.json(req);
        self.send_json(builder).await
    }

    /// Delete any task by id
    ///
    /// POST /admin/tasks/remove_task
    pub async fn delete_task(&self, task_id: i64) -> Result<ActionResponse> {
        let builder = self
            .admin_request(Method::POST, "/admin/tasks/remove_task")?
            .json(&DeleteTaskRequest { id: task_id });
        self.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::jwt::token_with_exp;
    use crate::http::{ClientConfig, QuestAdminClient};
    use crate::types::{
        CreateTaskRequest, TaskPayload, TaskType, TwitterFwPayload, UpdateTaskRequest,
    };
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn admin_client(server: &MockServer) -> QuestAdminClient {
        let client = QuestAdminClient::with_config_and_base_urls(
            ClientConfig::default(),
            &server.uri(),
            &server.uri(),
        )
        .expect("client init");
        client
            .set_token(token_with_exp(chrono::Utc::now().timestamp() + 3600))
            .expect("token accepted");
        client
    }

    fn follow_payload() -> TaskPayload {
        TaskPayload::TwitterFw(TwitterFwPayload {
            name: "Follow us".to_string(),
            desc: "Follow the account".to_string(),
            username: "starknet".to_string(),
        })
    }

    #[tokio::test]
    async fn test_get_tasks_by_quest_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/quest/get_tasks"))
            .and(query_param("quest_id", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 1, "name": "Quiz", "task_type": "quiz", "quiz_name": 30 },
                { "id": 2, "name": "Follow", "task_type": "twitter_fw",
                  "verify_redirect": "https://twitter.com/intent/user?screen_name=starknet" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let tasks = admin_client(&server)
            .get_tasks_by_quest_id(5)
            .await
            .expect("get_tasks_by_quest_id failed");

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].task_type, TaskType::Quiz);
        assert_eq!(tasks[0].quiz_name, Some(30));
    }

    #[tokio::test]
    async fn test_create_task_routes_by_kind() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/tasks/twitter_fw/create"))
            .and(body_json(serde_json::json!({
                "quest_id": 5,
                "name": "Follow us",
                "desc": "Follow the account",
                "username": "starknet"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 77 })))
            .expect(1)
            .mount(&server)
            .await;

        let created = admin_client(&server)
            .create_task(&CreateTaskRequest {
                quest_id: 5,
                payload: follow_payload(),
            })
            .await
            .expect("create_task failed");
        assert_eq!(created.id, 77);
    }

    #[tokio::test]
    async fn test_update_and_delete_task() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/tasks/twitter_fw/update"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "updated"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/admin/tasks/remove_task"))
            .and(body_json(serde_json::json!({ "id": 77 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "deleted"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = admin_client(&server);
        let updated = client
            .update_task(&UpdateTaskRequest {
                id: 77,
                payload: follow_payload(),
            })
            .await
            .expect("update_task failed");
        let deleted = client.delete_task(77).await.expect("delete_task failed");

        assert_eq!(updated.message, "updated");
        assert_eq!(deleted.message, "deleted");
    }
}
