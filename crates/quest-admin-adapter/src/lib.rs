/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public quest admin adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod service;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{JwtManager, TokenData, expiry_from_token};

// Re-export commonly used types from http
pub use http::{ClientConfig, QuestAdminClient, QuestAdminError, Result};

pub use service::AdminService;

// Re-export all types
pub use types::*;
