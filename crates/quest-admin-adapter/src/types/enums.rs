/*
[INPUT]:  Backend schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the backend adds task types or export formats
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task type tag as stored on server-side task records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
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

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Quiz => "quiz",
            TaskType::TwitterFw => "twitter_fw",
            TaskType::TwitterRw => "twitter_rw",
            TaskType::Discord => "discord",
            TaskType::Custom => "custom",
            TaskType::Domain => "domain",
            TaskType::Balance => "balance",
            TaskType::Contract => "contract",
            TaskType::CustomApi => "custom_api",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File format for generic export downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Csv,
    Json,
}

impl FileType {
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Json => "json",
        }
    }
}
