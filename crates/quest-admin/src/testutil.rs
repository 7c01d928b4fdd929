/*
[INPUT]:  Calls made through the AdminService seam in unit tests
[OUTPUT]: In-memory quest backend that records every call
[POS]:    Test support - fake AdminService
[UPDATE]: When AdminService gains a method
*/

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use quest_admin_adapter::{
    ActionResponse, AdminService, BoostDocument, CreateBoost, CreateNftUri, CreateQuest,
    CreateQuiz, CreateQuizQuestion, CreateTaskRequest, CreatedQuiz, CreatedRecord, NftUri,
    QuestAdminError, QuestDocument, QuizDetails, QuizQuestion, Result, TaskPayload, TaskType,
    UpdateBoost, UpdateQuest, UpdateQuiz, UpdateQuizQuestion, UpdateTaskRequest, UserTask,
};
use serde_json::{Value, json};

#[derive(Debug, Default)]
struct Backend {
    calls: Vec<String>,
    failing: HashSet<String>,
    next_id: i64,
    quests: HashMap<i64, QuestDocument>,
    nft_uris: HashMap<i64, NftUri>,
    tasks: Vec<UserTask>,
    quizzes: HashMap<i64, QuizDetails>,
}

impl Backend {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        100 + self.next_id
    }

    /// Record a call, failing it when a registered prefix matches
    fn record(&mut self, call: String) -> Result<()> {
        let fails = self.failing.iter().any(|prefix| call.starts_with(prefix.as_str()));
        self.calls.push(call.clone());
        if fails {
            return Err(QuestAdminError::Api {
                code: 500,
                message: format!("{call} rejected"),
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakeAdminService {
    backend: Mutex<Backend>,
    expires_at: Mutex<Option<DateTime<Utc>>>,
}

impl FakeAdminService {
    pub fn new() -> Self {
        Self {
            backend: Mutex::new(Backend::default()),
            expires_at: Mutex::new(Some(Utc::now() + Duration::hours(1))),
        }
    }

    fn backend(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn calls(&self) -> Vec<String> {
        self.backend().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.backend().calls.clear();
    }

    /// Fail every call whose name starts with `prefix`
    pub fn fail_calls(&self, prefix: &str) {
        self.backend().failing.insert(prefix.to_string());
    }

    /// Let every call succeed again
    pub fn clear_failures(&self) {
        self.backend().failing.clear();
    }

    pub fn fail_task_type(&self, task_type: TaskType) {
        self.fail_calls(&format!("create_task:{task_type}"));
        self.fail_calls(&format!("update_task:{task_type}"));
    }

    pub fn fail_quiz_questions(&self, fail: bool) {
        let mut backend = self.backend();
        for prefix in ["create_quiz_question", "update_quiz_question"] {
            if fail {
                backend.failing.insert(prefix.to_string());
            } else {
                backend.failing.remove(prefix);
            }
        }
    }

    pub fn set_expires_at(&self, expires_at: Option<DateTime<Utc>>) {
        *self.expires_at.lock().unwrap_or_else(PoisonError::into_inner) = expires_at;
    }

    pub fn insert_quest(&self, quest: QuestDocument) {
        self.backend().quests.insert(quest.id, quest);
    }

    pub fn insert_task(&self, task: UserTask) {
        self.backend().tasks.push(task);
    }

    pub fn insert_quiz(&self, quiz: QuizDetails) {
        self.backend().quizzes.insert(quiz.id, quiz);
    }

    pub fn quest(&self, quest_id: i64) -> Option<QuestDocument> {
        self.backend().quests.get(&quest_id).cloned()
    }

    pub fn tasks(&self) -> Vec<UserTask> {
        self.backend().tasks.clone()
    }
}

/// Server-side record as the backend would store it for a task payload
fn stored_task(id: i64, quest_id: i64, payload: &TaskPayload) -> UserTask {
    let mut task = UserTask::new(id, quest_id, payload.task_type());
    match payload {
        TaskPayload::TwitterFw(p) => {
            task.name = p.name.clone();
            task.desc = p.desc.clone();
            task.verify_redirect = Some(format!(
                "https://twitter.com/intent/user?screen_name={}",
                p.username
            ));
        }
        TaskPayload::TwitterRw(p) => {
            task.name = p.name.clone();
            task.desc = p.desc.clone();
            task.verify_redirect = Some(p.post_link.clone());
        }
        TaskPayload::Discord(p) => {
            task.name = p.name.clone();
            task.desc = p.desc.clone();
            task.href = p.invite_link.clone();
            task.discord_guild_id = Some(p.guild_id.clone());
        }
        TaskPayload::Custom(p) => {
            task.name = p.name.clone();
            task.desc = p.desc.clone();
            task.cta = p.cta.clone();
            task.href = p.href.clone();
            task.verify_endpoint = p.api.clone();
        }
        TaskPayload::Domain(p) => {
            task.name = p.name.clone();
            task.desc = p.desc.clone();
        }
        TaskPayload::Balance(p) => {
            task.name = p.name.clone();
            task.desc = p.desc.clone();
            task.cta = p.cta.clone();
            task.href = p.href.clone();
            task.contracts = Some(p.contracts.clone());
        }
        TaskPayload::Contract(p) => {
            task.name = p.name.clone();
            task.desc = p.desc.clone();
            task.cta = p.cta.clone();
            task.href = p.href.clone();
            task.calls = Some(p.calls.clone());
        }
        TaskPayload::CustomApi(p) => {
            task.name = p.name.clone();
            task.desc = p.desc.clone();
            task.cta = p.cta.clone();
            task.href = p.href.clone();
            task.api_url = Some(p.api_url.clone());
            task.regex = Some(p.regex.clone());
        }
    }
    task
}

fn ack() -> ActionResponse {
    ActionResponse {
        message: "ok".to_string(),
    }
}

#[async_trait]
impl AdminService for FakeAdminService {
    fn session_expires_at(&self) -> Option<DateTime<Utc>> {
        *self.expires_at.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn get_quest_by_id(&self, quest_id: i64) -> Result<Option<QuestDocument>> {
        let mut backend = self.backend();
        backend.record(format!("get_quest_by_id:{quest_id}"))?;
        Ok(backend.quests.get(&quest_id).cloned())
    }

    async fn create_quest(&self, req: &CreateQuest) -> Result<CreatedRecord> {
        let mut backend = self.backend();
        backend.record("create_quest".to_string())?;
        let id = backend.next_id();
        backend.quests.insert(
            id,
            QuestDocument {
                id,
                name: req.name.clone(),
                desc: req.desc.clone(),
                category: req.category.clone(),
                issuer: req.issuer.clone(),
                logo: req.logo.clone(),
                rewards_img: req.rewards_img.clone(),
                rewards_title: req.rewards_title.clone(),
                img_card: req.img_card.clone(),
                title_card: req.title_card.clone(),
                disabled: req.disabled,
                start_time: Some(req.start_time),
                expiry: req.expiry,
                mandatory_domain: req.mandatory_domain.clone(),
                ..QuestDocument::default()
            },
        );
        Ok(CreatedRecord { id })
    }

    async fn update_quest(&self, req: &UpdateQuest) -> Result<ActionResponse> {
        let mut backend = self.backend();
        backend.record(format!("update_quest:{}", req.id))?;
        let quest = backend
            .quests
            .get_mut(&req.id)
            .ok_or_else(|| QuestAdminError::NotFound(format!("quest {}", req.id)))?;
        if let Some(name) = &req.name {
            quest.name = name.clone();
        }
        if let Some(rewards_title) = &req.rewards_title {
            quest.rewards_title = rewards_title.clone();
        }
        if let Some(disabled) = req.disabled {
            quest.disabled = disabled;
        }
        if let Some(banner) = &req.banner {
            quest.banner = Some(banner.clone());
        }
        if req.expiry.is_some() {
            quest.expiry = req.expiry;
        }
        Ok(ack())
    }

    async fn create_boost(&self, req: &CreateBoost) -> Result<CreatedRecord> {
        let mut backend = self.backend();
        backend.record(format!("create_boost:{}", req.quest_id))?;
        let id = backend.next_id();
        if let Some(quest) = backend.quests.get_mut(&req.quest_id) {
            quest.boosts.push(BoostDocument {
                id,
                name: req.name.clone(),
                quest_id: req.quest_id,
                amount: req.amount,
                num_of_winners: req.num_of_winners,
                token: req.token.clone(),
                token_decimals: req.token_decimals,
                expiry: Some(req.expiry),
                img_url: req.img_url.clone(),
                hidden: req.hidden,
            });
        }
        Ok(CreatedRecord { id })
    }

    async fn update_boost(&self, req: &UpdateBoost) -> Result<ActionResponse> {
        self.backend().record(format!("update_boost:{}", req.id))?;
        Ok(ack())
    }

    async fn get_nft_uri_by_quest_id(&self, quest_id: i64) -> Result<Option<NftUri>> {
        let mut backend = self.backend();
        backend.record(format!("get_nft_uri_by_quest_id:{quest_id}"))?;
        Ok(backend.nft_uris.get(&quest_id).cloned())
    }

    async fn create_nft_uri(&self, req: &CreateNftUri) -> Result<CreatedRecord> {
        let mut backend = self.backend();
        backend.record(format!("create_nft_uri:{}", req.quest_id))?;
        let id = backend.next_id();
        backend.nft_uris.insert(
            req.quest_id,
            NftUri {
                id,
                quest_id: req.quest_id,
                name: req.name.clone(),
                desc: req.desc.clone(),
                image: req.image.clone(),
            },
        );
        Ok(CreatedRecord { id })
    }

    async fn get_tasks_by_quest_id(&self, quest_id: i64) -> Result<Vec<UserTask>> {
        let mut backend = self.backend();
        backend.record(format!("get_tasks_by_quest_id:{quest_id}"))?;
        Ok(backend
            .tasks
            .iter()
            .filter(|task| task.quest_id == quest_id)
            .cloned()
            .collect())
    }

    async fn get_quiz_details(&self, quiz_id: i64) -> Result<QuizDetails> {
        let mut backend = self.backend();
        backend.record(format!("get_quiz_details:{quiz_id}"))?;
        backend
            .quizzes
            .get(&quiz_id)
            .cloned()
            .ok_or_else(|| QuestAdminError::NotFound(format!("quiz {quiz_id}")))
    }

    async fn create_quiz(&self, req: &CreateQuiz) -> Result<CreatedQuiz> {
        let mut backend = self.backend();
        backend.record(format!("create_quiz:{}", req.quest_id))?;
        let quiz_id = backend.next_id();
        let id = backend.next_id();
        backend.quizzes.insert(
            quiz_id,
            QuizDetails {
                id: quiz_id,
                name: req.name.clone(),
                desc: req.desc.clone(),
                intro: req.intro.clone(),
                questions: Vec::new(),
            },
        );
        let mut task = UserTask::new(id, req.quest_id, TaskType::Quiz);
        task.name = req.name.clone();
        task.desc = req.desc.clone();
        task.cta = req.cta.clone();
        task.href = req.help_link.clone();
        task.quiz_name = Some(quiz_id);
        backend.tasks.push(task);
        Ok(CreatedQuiz { id, quiz_id })
    }

    async fn update_quiz(&self, req: &UpdateQuiz) -> Result<ActionResponse> {
        self.backend().record(format!("update_quiz:{}", req.id))?;
        Ok(ack())
    }

    async fn create_quiz_question(&self, req: &CreateQuizQuestion) -> Result<CreatedRecord> {
        let mut backend = self.backend();
        backend.record(format!("create_quiz_question:{}", req.quiz_id))?;
        let id = backend.next_id();
        if let Some(quiz) = backend.quizzes.get_mut(&req.quiz_id) {
            quiz.questions.push(QuizQuestion {
                id,
                quiz_id: Some(req.quiz_id),
                question: req.question.clone(),
                options: req.options.clone(),
                correct_answers: req.correct_answers.clone(),
            });
        }
        Ok(CreatedRecord { id })
    }

    async fn update_quiz_question(&self, req: &UpdateQuizQuestion) -> Result<ActionResponse> {
        self.backend().record(format!("update_quiz_question:{}", req.id))?;
        Ok(ack())
    }

    async fn create_task(&self, req: &CreateTaskRequest) -> Result<CreatedRecord> {
        let mut backend = self.backend();
        backend.record(format!("create_task:{}", req.payload.task_type()))?;
        let id = backend.next_id();
        backend.tasks.push(stored_task(id, req.quest_id, &req.payload));
        Ok(CreatedRecord { id })
    }

    async fn update_task(&self, req: &UpdateTaskRequest) -> Result<ActionResponse> {
        let mut backend = self.backend();
        backend.record(format!("update_task:{}", req.payload.task_type()))?;
        if let Some(task) = backend.tasks.iter_mut().find(|task| task.id == req.id) {
            *task = stored_task(req.id, task.quest_id, &req.payload);
        }
        Ok(ack())
    }

    async fn delete_task(&self, task_id: i64) -> Result<ActionResponse> {
        let mut backend = self.backend();
        backend.record(format!("delete_task:{task_id}"))?;
        backend.tasks.retain(|task| task.id != task_id);
        Ok(ack())
    }

    async fn get_quest_participants_by_quest_id(&self, quest_id: i64) -> Result<Value> {
        self.backend()
            .record(format!("get_quest_participants_by_quest_id:{quest_id}"))?;
        Ok(json!({ "quest_id": quest_id, "participants": ["0x01", "0x02"] }))
    }

    async fn get_quest_users_by_quest_id(&self, quest_id: i64) -> Result<Value> {
        self.backend()
            .record(format!("get_quest_users_by_quest_id:{quest_id}"))?;
        Ok(json!(["0x01"]))
    }

    async fn get_boost_winners_by_boost_id(&self, boost_id: i64) -> Result<Value> {
        self.backend()
            .record(format!("get_boost_winners_by_boost_id:{boost_id}"))?;
        Ok(json!({ "boost_id": boost_id, "winners": [] }))
    }
}
