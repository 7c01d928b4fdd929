/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod analytics;
pub mod client;
pub mod error;
pub mod exports;
pub mod quest;
pub mod tasks;

pub use error::{QuestAdminError, Result};

pub use client::{ClientConfig, QuestAdminClient};
