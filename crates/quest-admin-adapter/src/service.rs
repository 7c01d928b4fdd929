/*
[INPUT]:  Admin operations the wizard needs from the quest backend
[OUTPUT]: `AdminService` trait implemented by `QuestAdminClient`
[POS]:    Service seam - lets the engine run against fakes in tests
[UPDATE]: When the wizard needs a new admin call
*/

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::http::{QuestAdminClient, Result};
use crate::types::{
    ActionResponse, CreateBoost, CreateNftUri, CreateQuest, CreateQuiz, CreateQuizQuestion,
    CreateTaskRequest, CreatedQuiz, CreatedRecord, NftUri, QuestDocument, QuizDetails,
    UpdateBoost, UpdateQuest, UpdateQuiz, UpdateQuizQuestion, UpdateTaskRequest, UserTask,
};

/// Admin surface of the quest backend.
///
/// Every call is a single request with no retry; absent records come back as `None`.
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Expiry of the current admin session, `None` when no token is set
    fn session_expires_at(&self) -> Option<DateTime<Utc>>;

    async fn get_quest_by_id(&self, quest_id: i64) -> Result<Option<QuestDocument>>;
    async fn create_quest(&self, req: &CreateQuest) -> Result<CreatedRecord>;
    async fn update_quest(&self, req: &UpdateQuest) -> Result<ActionResponse>;

    async fn create_boost(&self, req: &CreateBoost) -> Result<CreatedRecord>;
    async fn update_boost(&self, req: &UpdateBoost) -> Result<ActionResponse>;

    async fn get_nft_uri_by_quest_id(&self, quest_id: i64) -> Result<Option<NftUri>>;
    async fn create_nft_uri(&self, req: &CreateNftUri) -> Result<CreatedRecord>;

    async fn get_tasks_by_quest_id(&self, quest_id: i64) -> Result<Vec<UserTask>>;
    async fn get_quiz_details(&self, quiz_id: i64) -> Result<QuizDetails>;
    async fn create_quiz(&self, req: &CreateQuiz) -> Result<CreatedQuiz>;
    async fn update_quiz(&self, req: &UpdateQuiz) -> Result<ActionResponse>;
    async fn create_quiz_question(&self, req: &CreateQuizQuestion) -> Result<CreatedRecord>;
    async fn update_quiz_question(&self, req: &UpdateQuizQuestion) -> Result<ActionResponse>;

    async fn create_task(&self, req: &CreateTaskRequest) -> Result<CreatedRecord>;
    async fn update_task(&self, req: &UpdateTaskRequest) -> Result<ActionResponse>;
    async fn delete_task(&self, task_id: i64) -> Result<ActionResponse>;

    async fn get_quest_participants_by_quest_id(&self, quest_id: i64) -> Result<Value>;
    async fn get_quest_users_by_quest_id(&self, quest_id: i64) -> Result<Value>;
    async fn get_boost_winners_by_boost_id(&self, boost_id: i64) -> Result<Value>;
}

#[async_trait]
impl AdminService for QuestAdminClient {
    fn session_expires_at(&self) -> Option<DateTime<Utc>> {
        QuestAdminClient::session_expires_at(self)
    }

    async fn get_quest_by_id(&self, quest_id: i64) -> Result<Option<QuestDocument>> {
        QuestAdminClient::get_quest_by_id(self, quest_id).await
    }

    async fn create_quest(&self, req: &CreateQuest) -> Result<CreatedRecord> {
        QuestAdminClient::create_quest(self, req).await
    }

    async fn update_quest(&self, req: &UpdateQuest) -> Result<ActionResponse> {
        QuestAdminClient::update_quest(self, req).await
    }

    async fn create_boost(&self, req: &CreateBoost) -> Result<CreatedRecord> {
        QuestAdminClient::create_boost(self, req).await
    }

    async fn update_boost(&self, req: &UpdateBoost) -> Result<ActionResponse> {
        QuestAdminClient::update_boost(self, req).await
    }

    async fn get_nft_uri_by_quest_id(&self, quest_id: i64) -> Result<Option<NftUri>> {
        QuestAdminClient::get_nft_uri_by_quest_id(self, quest_id).await
    }

    async fn create_nft_uri(&self, req: &CreateNftUri) -> Result<CreatedRecord> {
        QuestAdminClient::create_nft_uri(self, req).await
    }

    async fn get_tasks_by_quest_id(&self, quest_id: i64) -> Result<Vec<UserTask>> {
        QuestAdminClient::get_tasks_by_quest_id(self, quest_id).await
    }

    async fn get_quiz_details(&self, quiz_id: i64) -> Result<QuizDetails> {
        QuestAdminClient::get_quiz_details(self, quiz_id).await
    }

    async fn create_quiz(&self, req: &CreateQuiz) -> Result<CreatedQuiz> {
        QuestAdminClient::create_quiz(self, req).await
    }

    async fn update_quiz(&self, req: &UpdateQuiz) -> Result<ActionResponse> {
        QuestAdminClient::update_quiz(self, req).await
    }

    async fn create_quiz_question(&self, req: &CreateQuizQuestion) -> Result<CreatedRecord> {
        QuestAdminClient::create_quiz_question(self, req).await
    }

    async fn update_quiz_question(&self, req: &UpdateQuizQuestion) -> Result<ActionResponse> {
        QuestAdminClient::update_quiz_question(self, req).await
    }

    async fn create_task(&self, req: &CreateTaskRequest) -> Result<CreatedRecord> {
        QuestAdminClient::create_task(self, req).await
    }

    async fn update_task(&self, req: &UpdateTaskRequest) -> Result<ActionResponse> {
        QuestAdminClient::update_task(self, req).await
    }

    async fn delete_task(&self, task_id: i64) -> Result<ActionResponse> {
        QuestAdminClient::delete_task(self, task_id).await
    }

    async fn get_quest_participants_by_quest_id(&self, quest_id: i64) -> Result<Value> {
        QuestAdminClient::get_quest_participants_by_quest_id(self, quest_id).await
    }

    async fn get_quest_users_by_quest_id(&self, quest_id: i64) -> Result<Value> {
        QuestAdminClient::get_quest_users_by_quest_id(self, quest_id).await
    }

    async fn get_boost_winners_by_boost_id(&self, boost_id: i64) -> Result<Value> {
        QuestAdminClient::get_boost_winners_by_boost_id(self, boost_id).await
    }
}
