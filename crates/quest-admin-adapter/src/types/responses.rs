/*
[INPUT]:  Backend schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the backend changes acknowledgement bodies
*/

use serde::{Deserialize, Serialize};

/// Body returned by create endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecord {
    pub id: i64,
}

/// Quiz creation returns the task id and the quiz id separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedQuiz {
    pub id: i64,
    pub quiz_id: i64,
}

/// Acknowledgement returned by update and delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: String,
}
