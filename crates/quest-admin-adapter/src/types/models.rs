/*
[INPUT]:  Backend schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the backend schema changes or new records are read
[UPDATE]: Accept participant counts sent as strings
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::TaskType;

/// Quest record as returned by both the admin and the public API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuestDocument {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rewards_endpoint: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub rewards_img: String,
    #[serde(default)]
    pub rewards_title: String,
    #[serde(default)]
    pub img_card: String,
    #[serde(default)]
    pub title_card: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub expiry: Option<i64>,
    #[serde(default)]
    pub mandatory_domain: Option<String>,
    #[serde(default)]
    pub boosts: Vec<BoostDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
}

/// Promotional banner attached to a quest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cta: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub image: String,
}

impl Banner {
    /// Every banner field is required before the banner can be saved.
    pub fn is_complete(&self) -> bool {
        [
            &self.tag,
            &self.title,
            &self.description,
            &self.cta,
            &self.href,
            &self.image,
        ]
        .iter()
        .all(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoostDocument {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quest_id: i64,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub amount: Decimal,
    #[serde(default)]
    pub num_of_winners: u32,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub token_decimals: u32,
    #[serde(default)]
    pub expiry: Option<i64>,
    #[serde(default)]
    pub img_url: String,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NftUri {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub quest_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub image: String,
}

/// Server-side task record. Optional columns only exist for some task types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTask {
    pub id: i64,
    #[serde(default)]
    pub quest_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub cta: String,
    #[serde(default)]
    pub verify_endpoint: String,
    #[serde(default)]
    pub verify_endpoint_type: String,
    #[serde(default)]
    pub verify_redirect: Option<String>,
    pub task_type: TaskType,
    #[serde(default)]
    pub discord_guild_id: Option<String>,
    #[serde(default)]
    pub quiz_name: Option<i64>,
    #[serde(default)]
    pub contracts: Option<Vec<String>>,
    #[serde(default)]
    pub calls: Option<serde_json::Value>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub regex: Option<String>,
}

impl UserTask {
    /// Bare record of a task type with every optional column empty.
    pub fn new(id: i64, quest_id: i64, task_type: TaskType) -> Self {
        Self {
            id,
            quest_id,
            name: String::new(),
            desc: String::new(),
            href: String::new(),
            cta: String::new(),
            verify_endpoint: String::new(),
            verify_endpoint_type: String::new(),
            verify_redirect: None,
            task_type,
            discord_guild_id: None,
            quiz_name: None,
            contracts: None,
            calls: None,
            api_url: None,
            regex: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDetails {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: i64,
    #[serde(default)]
    pub quiz_id: Option<i64>,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answers: Vec<i64>,
}

/// One point of the quest completion time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub date: String,
    #[serde(deserialize_with = "serde_helpers::deserialize_u64_lenient")]
    pub participants: u64,
}

/// Completion count for a single task of a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParticipation {
    pub name: String,
    #[serde(deserialize_with = "serde_helpers::deserialize_u64_lenient")]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestParticipants {
    #[serde(deserialize_with = "serde_helpers::deserialize_u64_lenient")]
    pub count: u64,
}

mod serde_helpers {
    use super::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Decimal::ZERO);
        }

        if let Some(raw) = value.as_str() {
            if raw.trim().is_empty() {
                return Ok(Decimal::ZERO);
            }
            return Decimal::from_str(raw).map_err(serde::de::Error::custom);
        }

        if value.is_number() {
            return Decimal::from_str(&value.to_string()).map_err(serde::de::Error::custom);
        }

        Err(serde::de::Error::custom("invalid decimal value"))
    }

    pub fn serialize_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize_u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(0),
            Value::Number(number) => number
                .as_u64()
                .ok_or_else(|| serde::de::Error::custom("count must be a non-negative integer")),
            Value::String(raw) => raw.trim().parse().map_err(serde::de::Error::custom),
            _ => Err(serde::de::Error::custom("invalid count value")),
        }
    }
}
