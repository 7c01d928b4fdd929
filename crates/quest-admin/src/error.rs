/*
[INPUT]:  Validation gaps, adapter errors, local I/O failures
[OUTPUT]: Typed errors for task dispatch, wizard operations and downloads
[POS]:    Error layer - engine-side error taxonomy
[UPDATE]: When a new failure mode must be distinguished by callers
*/

use quest_admin_adapter::QuestAdminError;
use thiserror::Error;

use crate::task_entry::TaskKind;
use crate::wizard::Step;

/// Outcome of validating or persisting a single task entry
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Please fill all fields for {kind} (missing: {})", .fields.join(", "))]
    MissingField {
        kind: TaskKind,
        fields: Vec<&'static str>,
    },

    #[error("{kind} task request failed: {source}")]
    Remote {
        kind: TaskKind,
        #[source]
        source: QuestAdminError,
    },

    #[error("{kind} task has invalid data: {message}")]
    Decode { kind: TaskKind, message: String },

    #[error("Failed to save {failed} of {total} questions")]
    QuestionsFailed { failed: usize, total: usize },

    #[error("cannot change the kind of a {kind} task")]
    KindLocked { kind: TaskKind },

    #[error("{kind} task has no field named {field}")]
    UnknownField { kind: TaskKind, field: String },

    #[error("choose a task kind before editing fields")]
    Placeholder,
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("admin session expired, please sign in again")]
    SessionExpired,

    #[error("{step} step is incomplete")]
    StepIncomplete { step: Step },

    #[error("quest {0} not found")]
    QuestNotFound(i64),

    #[error("no quest has been created yet")]
    MissingQuest,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error("remote call failed: {0}")]
    Remote(#[from] QuestAdminError),
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("export request failed: {0}")]
    Remote(#[from] QuestAdminError),

    #[error("failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_kind_and_fields() {
        let err = TaskError::MissingField {
            kind: TaskKind::Discord,
            fields: vec!["dc_desc", "dc_guild_id"],
        };
        assert_eq!(
            err.to_string(),
            "Please fill all fields for Discord (missing: dc_desc, dc_guild_id)"
        );
    }

    #[test]
    fn remote_task_error_keeps_source() {
        let err = TaskError::Remote {
            kind: TaskKind::TwitterRw,
            source: QuestAdminError::Api {
                code: 500,
                message: "boom".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Twitter Retweet task request failed: API error (code 500): boom"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
