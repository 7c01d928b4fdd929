/*
[INPUT]:  Backend schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the backend adds a task kind or changes a payload
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::TaskType;
use super::models::Banner;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateQuest {
    pub name: String,
    pub desc: String,
    pub category: String,
    pub issuer: String,
    pub logo: String,
    pub rewards_img: String,
    pub rewards_title: String,
    pub img_card: String,
    pub title_card: String,
    pub start_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandatory_domain: Option<String>,
}

/// Partial quest update; only populated fields are sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateQuest {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewards_img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewards_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_card: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_card: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBoost {
    pub quest_id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub num_of_winners: u32,
    pub token: String,
    pub token_decimals: u32,
    pub expiry: i64,
    pub img_url: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateBoost {
    pub id: i64,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_of_winners: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_decimals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNftUri {
    pub quest_id: i64,
    pub name: String,
    pub desc: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuiz {
    pub quest_id: i64,
    pub name: String,
    pub desc: String,
    pub intro: String,
    pub cta: String,
    pub help_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuiz {
    pub id: i64,
    pub quiz_id: i64,
    pub name: String,
    pub desc: String,
    pub intro: String,
    pub cta: String,
    pub help_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuizQuestion {
    pub quiz_id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuizQuestion {
    pub id: i64,
    pub quiz_id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterFwPayload {
    pub name: String,
    pub desc: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterRwPayload {
    pub name: String,
    pub desc: String,
    pub post_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordPayload {
    pub name: String,
    pub desc: String,
    pub invite_link: String,
    pub guild_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPayload {
    pub name: String,
    pub desc: String,
    pub cta: String,
    pub href: String,
    pub api: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainPayload {
    pub name: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePayload {
    pub name: String,
    pub desc: String,
    pub contracts: Vec<String>,
    pub cta: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractPayload {
    pub name: String,
    pub desc: String,
    pub href: String,
    pub cta: String,
    pub calls: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomApiPayload {
    pub name: String,
    pub desc: String,
    pub api_url: String,
    pub cta: String,
    pub href: String,
    pub regex: String,
}

/// Kind-specific body shared by the create and update endpoints of non-quiz tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskPayload {
    TwitterFw(TwitterFwPayload),
    TwitterRw(TwitterRwPayload),
    Discord(DiscordPayload),
    Custom(CustomPayload),
    Domain(DomainPayload),
    Balance(BalancePayload),
    Contract(ContractPayload),
    CustomApi(CustomApiPayload),
}

impl TaskPayload {
    pub fn task_type(&self) -> TaskType {
        match self {
            TaskPayload::TwitterFw(_) => TaskType::TwitterFw,
            TaskPayload::TwitterRw(_) => TaskType::TwitterRw,
            TaskPayload::Discord(_) => TaskType::Discord,
            TaskPayload::Custom(_) => TaskType::Custom,
            TaskPayload::Domain(_) => TaskType::Domain,
            TaskPayload::Balance(_) => TaskType::Balance,
            TaskPayload::Contract(_) => TaskType::Contract,
            TaskPayload::CustomApi(_) => TaskType::CustomApi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTaskRequest {
    pub quest_id: i64,
    #[serde(flatten)]
    pub payload: TaskPayload,
}

impl CreateTaskRequest {
    pub fn endpoint(&self) -> String {
        format!("/admin/tasks/{}/create", self.payload.task_type())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateTaskRequest {
    pub id: i64,
    #[serde(flatten)]
    pub payload: TaskPayload,
}

impl UpdateTaskRequest {
    pub fn endpoint(&self) -> String {
        format!("/admin/tasks/{}/update", self.payload.task_type())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskRequest {
    pub id: i64,
}
