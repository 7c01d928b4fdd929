/*
[INPUT]:  Task kind chosen by the admin and per-field form edits
[OUTPUT]: Typed task entries (one field bag per kind) with optional server ids
[POS]:    Model layer - working task list of the quest wizard
[UPDATE]: When the backend adds a task kind or a kind gains a field
*/

use quest_admin_adapter::TaskType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TaskError;

/// Concrete task kinds; the unchosen placeholder has no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Quiz,
    TwitterFw,
    TwitterRw,
    Discord,
    Custom,
    Domain,
    Balance,
    Contract,
    CustomApi,
}

impl TaskKind {
    pub const ALL: [TaskKind; 9] = [
        TaskKind::Quiz,
        TaskKind::TwitterFw,
        TaskKind::TwitterRw,
        TaskKind::Discord,
        TaskKind::Custom,
        TaskKind::Domain,
        TaskKind::Balance,
        TaskKind::Contract,
        TaskKind::CustomApi,
    ];

    /// Human readable name used in notifications
    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Quiz => "Quiz",
            TaskKind::TwitterFw => "Twitter Follow",
            TaskKind::TwitterRw => "Twitter Retweet",
            TaskKind::Discord => "Discord",
            TaskKind::Custom => "Custom",
            TaskKind::Domain => "Domain",
            TaskKind::Balance => "Balance",
            TaskKind::Contract => "Contract",
            TaskKind::CustomApi => "Custom API",
        }
    }

    pub fn task_type(self) -> TaskType {
        match self {
            TaskKind::Quiz => TaskType::Quiz,
            TaskKind::TwitterFw => TaskType::TwitterFw,
            TaskKind::TwitterRw => TaskType::TwitterRw,
            TaskKind::Discord => TaskType::Discord,
            TaskKind::Custom => TaskType::Custom,
            TaskKind::Domain => TaskType::Domain,
            TaskKind::Balance => TaskType::Balance,
            TaskKind::Contract => TaskType::Contract,
            TaskKind::CustomApi => TaskType::CustomApi,
        }
    }

    pub fn from_task_type(task_type: TaskType) -> Self {
        match task_type {
            TaskType::Quiz => TaskKind::Quiz,
            TaskType::TwitterFw => TaskKind::TwitterFw,
            TaskType::TwitterRw => TaskKind::TwitterRw,
            TaskType::Discord => TaskKind::Discord,
            TaskType::Custom => TaskKind::Custom,
            TaskType::Domain => TaskKind::Domain,
            TaskType::Balance => TaskKind::Balance,
            TaskType::Contract => TaskKind::Contract,
            TaskType::CustomApi => TaskKind::CustomApi,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the variant name (`TwitterFw`) or the backend task type (`twitter_fw`).
impl FromStr for TaskKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().replace(['_', '-', ' '], "").to_ascii_lowercase();
        TaskKind::ALL
            .into_iter()
            .find(|kind| {
                let name = format!("{kind:?}").to_ascii_lowercase();
                name == normalized || kind.task_type().as_str().replace('_', "") == normalized
            })
            .ok_or_else(|| format!("unknown task kind: {value}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizQuestionFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Server-side quiz id, known once the quiz header is persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<i64>,
    pub quiz_name: String,
    pub quiz_desc: String,
    pub quiz_intro: String,
    pub quiz_cta: String,
    pub quiz_help_link: String,
    pub questions: Vec<QuizQuestionFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterFwFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub twfw_name: String,
    pub twfw_desc: String,
    pub twfw_username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterRwFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub twrw_name: String,
    pub twrw_desc: String,
    pub twrw_post_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub dc_name: String,
    pub dc_desc: String,
    pub dc_invite_link: String,
    pub dc_guild_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub custom_name: String,
    pub custom_desc: String,
    pub custom_cta: String,
    pub custom_href: String,
    pub custom_api: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub domain_name: String,
    pub domain_desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub balance_name: String,
    pub balance_desc: String,
    pub balance_contracts: Vec<String>,
    pub balance_cta: String,
    pub balance_href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub contract_name: String,
    pub contract_desc: String,
    pub contract_href: String,
    pub contract_cta: String,
    /// JSON array of calls, kept as text until dispatch
    pub contract_calls: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomApiFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub api_name: String,
    pub api_desc: String,
    pub api_url: String,
    pub api_cta: String,
    pub api_href: String,
    pub api_regex: String,
}

/// One slot of the wizard's task list.
///
/// Serialized as `{ "type": "Discord", "data": { ... } }`, the shape used by
/// quest manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum TaskEntry {
    Quiz(QuizFields),
    TwitterFw(TwitterFwFields),
    TwitterRw(TwitterRwFields),
    Discord(DiscordFields),
    Custom(CustomFields),
    Domain(DomainFields),
    Balance(BalanceFields),
    Contract(ContractFields),
    CustomApi(CustomApiFields),
    #[default]
    None,
}

impl TaskEntry {
    /// Empty field bag for a kind
    pub fn empty(kind: TaskKind) -> Self {
        match kind {
            TaskKind::Quiz => TaskEntry::Quiz(QuizFields::default()),
            TaskKind::TwitterFw => TaskEntry::TwitterFw(TwitterFwFields::default()),
            TaskKind::TwitterRw => TaskEntry::TwitterRw(TwitterRwFields::default()),
            TaskKind::Discord => TaskEntry::Discord(DiscordFields::default()),
            TaskKind::Custom => TaskEntry::Custom(CustomFields::default()),
            TaskKind::Domain => TaskEntry::Domain(DomainFields::default()),
            TaskKind::Balance => TaskEntry::Balance(BalanceFields::default()),
            TaskKind::Contract => TaskEntry::Contract(ContractFields::default()),
            TaskKind::CustomApi => TaskEntry::CustomApi(CustomApiFields::default()),
        }
    }

    pub fn kind(&self) -> Option<TaskKind> {
        match self {
            TaskEntry::Quiz(_) => Some(TaskKind::Quiz),
            TaskEntry::TwitterFw(_) => Some(TaskKind::TwitterFw),
            TaskEntry::TwitterRw(_) => Some(TaskKind::TwitterRw),
            TaskEntry::Discord(_) => Some(TaskKind::Discord),
            TaskEntry::Custom(_) => Some(TaskKind::Custom),
            TaskEntry::Domain(_) => Some(TaskKind::Domain),
            TaskEntry::Balance(_) => Some(TaskKind::Balance),
            TaskEntry::Contract(_) => Some(TaskKind::Contract),
            TaskEntry::CustomApi(_) => Some(TaskKind::CustomApi),
            TaskEntry::None => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, TaskEntry::None)
    }

    fn raw_id(&self) -> Option<i64> {
        match self {
            TaskEntry::Quiz(fields) => fields.id,
            TaskEntry::TwitterFw(fields) => fields.id,
            TaskEntry::TwitterRw(fields) => fields.id,
            TaskEntry::Discord(fields) => fields.id,
            TaskEntry::Custom(fields) => fields.id,
            TaskEntry::Domain(fields) => fields.id,
            TaskEntry::Balance(fields) => fields.id,
            TaskEntry::Contract(fields) => fields.id,
            TaskEntry::CustomApi(fields) => fields.id,
            TaskEntry::None => None,
        }
    }

    /// Server id, `None` when the entry was never persisted (absent or zero)
    pub fn id(&self) -> Option<i64> {
        self.raw_id().filter(|id| *id != 0)
    }

    pub fn set_id(&mut self, id: i64) {
        let slot = match self {
            TaskEntry::Quiz(fields) => &mut fields.id,
            TaskEntry::TwitterFw(fields) => &mut fields.id,
            TaskEntry::TwitterRw(fields) => &mut fields.id,
            TaskEntry::Discord(fields) => &mut fields.id,
            TaskEntry::Custom(fields) => &mut fields.id,
            TaskEntry::Domain(fields) => &mut fields.id,
            TaskEntry::Balance(fields) => &mut fields.id,
            TaskEntry::Contract(fields) => &mut fields.id,
            TaskEntry::CustomApi(fields) => &mut fields.id,
            TaskEntry::None => return,
        };
        *slot = Some(id);
    }

    /// Tag a placeholder with a kind. Chosen entries are never re-tagged.
    pub fn choose_kind(&mut self, kind: TaskKind) -> Result<(), TaskError> {
        match self.kind() {
            None => {
                *self = TaskEntry::empty(kind);
                Ok(())
            }
            Some(current) => Err(TaskError::KindLocked { kind: current }),
        }
    }

    /// Named text fields of the field bag, in form order.
    ///
    /// Array fields (`balance_contracts`, quiz `questions`) are not included.
    pub fn text_fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            TaskEntry::Quiz(f) => vec![
                ("quiz_name", f.quiz_name.as_str()),
                ("quiz_desc", f.quiz_desc.as_str()),
                ("quiz_intro", f.quiz_intro.as_str()),
                ("quiz_cta", f.quiz_cta.as_str()),
                ("quiz_help_link", f.quiz_help_link.as_str()),
            ],
            TaskEntry::TwitterFw(f) => vec![
                ("twfw_name", f.twfw_name.as_str()),
                ("twfw_desc", f.twfw_desc.as_str()),
                ("twfw_username", f.twfw_username.as_str()),
            ],
            TaskEntry::TwitterRw(f) => vec![
                ("twrw_name", f.twrw_name.as_str()),
                ("twrw_desc", f.twrw_desc.as_str()),
                ("twrw_post_link", f.twrw_post_link.as_str()),
            ],
            TaskEntry::Discord(f) => vec![
                ("dc_name", f.dc_name.as_str()),
                ("dc_desc", f.dc_desc.as_str()),
                ("dc_invite_link", f.dc_invite_link.as_str()),
                ("dc_guild_id", f.dc_guild_id.as_str()),
            ],
            TaskEntry::Custom(f) => vec![
                ("custom_name", f.custom_name.as_str()),
                ("custom_desc", f.custom_desc.as_str()),
                ("custom_cta", f.custom_cta.as_str()),
                ("custom_href", f.custom_href.as_str()),
                ("custom_api", f.custom_api.as_str()),
            ],
            TaskEntry::Domain(f) => vec![
                ("domain_name", f.domain_name.as_str()),
                ("domain_desc", f.domain_desc.as_str()),
            ],
            TaskEntry::Balance(f) => vec![
                ("balance_name", f.balance_name.as_str()),
                ("balance_desc", f.balance_desc.as_str()),
                ("balance_cta", f.balance_cta.as_str()),
                ("balance_href", f.balance_href.as_str()),
            ],
            TaskEntry::Contract(f) => vec![
                ("contract_name", f.contract_name.as_str()),
                ("contract_desc", f.contract_desc.as_str()),
                ("contract_href", f.contract_href.as_str()),
                ("contract_cta", f.contract_cta.as_str()),
                ("contract_calls", f.contract_calls.as_str()),
            ],
            TaskEntry::CustomApi(f) => vec![
                ("api_name", f.api_name.as_str()),
                ("api_desc", f.api_desc.as_str()),
                ("api_url", f.api_url.as_str()),
                ("api_cta", f.api_cta.as_str()),
                ("api_href", f.api_href.as_str()),
                ("api_regex", f.api_regex.as_str()),
            ],
            TaskEntry::None => Vec::new(),
        }
    }

    fn text_field_mut(&mut self, name: &str) -> Option<&mut String> {
        let field = match (self, name) {
            (TaskEntry::Quiz(f), "quiz_name") => &mut f.quiz_name,
            (TaskEntry::Quiz(f), "quiz_desc") => &mut f.quiz_desc,
            (TaskEntry::Quiz(f), "quiz_intro") => &mut f.quiz_intro,
            (TaskEntry::Quiz(f), "quiz_cta") => &mut f.quiz_cta,
            (TaskEntry::Quiz(f), "quiz_help_link") => &mut f.quiz_help_link,
            (TaskEntry::TwitterFw(f), "twfw_name") => &mut f.twfw_name,
            (TaskEntry::TwitterFw(f), "twfw_desc") => &mut f.twfw_desc,
            (TaskEntry::TwitterFw(f), "twfw_username") => &mut f.twfw_username,
            (TaskEntry::TwitterRw(f), "twrw_name") => &mut f.twrw_name,
            (TaskEntry::TwitterRw(f), "twrw_desc") => &mut f.twrw_desc,
            (TaskEntry::TwitterRw(f), "twrw_post_link") => &mut f.twrw_post_link,
            (TaskEntry::Discord(f), "dc_name") => &mut f.dc_name,
            (TaskEntry::Discord(f), "dc_desc") => &mut f.dc_desc,
            (TaskEntry::Discord(f), "dc_invite_link") => &mut f.dc_invite_link,
            (TaskEntry::Discord(f), "dc_guild_id") => &mut f.dc_guild_id,
            (TaskEntry::Custom(f), "custom_name") => &mut f.custom_name,
            (TaskEntry::Custom(f), "custom_desc") => &mut f.custom_desc,
            (TaskEntry::Custom(f), "custom_cta") => &mut f.custom_cta,
            (TaskEntry::Custom(f), "custom_href") => &mut f.custom_href,
            (TaskEntry::Custom(f), "custom_api") => &mut f.custom_api,
            (TaskEntry::Domain(f), "domain_name") => &mut f.domain_name,
            (TaskEntry::Domain(f), "domain_desc") => &mut f.domain_desc,
            (TaskEntry::Balance(f), "balance_name") => &mut f.balance_name,
            (TaskEntry::Balance(f), "balance_desc") => &mut f.balance_desc,
            (TaskEntry::Balance(f), "balance_cta") => &mut f.balance_cta,
            (TaskEntry::Balance(f), "balance_href") => &mut f.balance_href,
            (TaskEntry::Contract(f), "contract_name") => &mut f.contract_name,
            (TaskEntry::Contract(f), "contract_desc") => &mut f.contract_desc,
            (TaskEntry::Contract(f), "contract_href") => &mut f.contract_href,
            (TaskEntry::Contract(f), "contract_cta") => &mut f.contract_cta,
            (TaskEntry::Contract(f), "contract_calls") => &mut f.contract_calls,
            (TaskEntry::CustomApi(f), "api_name") => &mut f.api_name,
            (TaskEntry::CustomApi(f), "api_desc") => &mut f.api_desc,
            (TaskEntry::CustomApi(f), "api_url") => &mut f.api_url,
            (TaskEntry::CustomApi(f), "api_cta") => &mut f.api_cta,
            (TaskEntry::CustomApi(f), "api_href") => &mut f.api_href,
            (TaskEntry::CustomApi(f), "api_regex") => &mut f.api_regex,
            _ => return None,
        };
        Some(field)
    }

    /// Set one form field by name.
    ///
    /// `balance_contracts` takes a comma separated list of addresses.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), TaskError> {
        let Some(kind) = self.kind() else {
            return Err(TaskError::Placeholder);
        };

        if let TaskEntry::Balance(fields) = self {
            if name == "balance_contracts" {
                fields.balance_contracts = value
                    .split(',')
                    .map(str::trim)
                    .filter(|address| !address.is_empty())
                    .map(str::to_string)
                    .collect();
                return Ok(());
            }
        }

        match self.text_field_mut(name) {
            Some(field) => {
                *field = value.to_string();
                Ok(())
            }
            None => Err(TaskError::UnknownField {
                kind,
                field: name.to_string(),
            }),
        }
    }

    pub fn questions_mut(&mut self) -> Option<&mut Vec<QuizQuestionFields>> {
        match self {
            TaskEntry::Quiz(fields) => Some(&mut fields.questions),
            _ => None,
        }
    }
}
