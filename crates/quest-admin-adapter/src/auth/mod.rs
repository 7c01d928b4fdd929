/*
[INPUT]:  Admin JWT issued by the quest backend login
[OUTPUT]: Token storage and session expiry checks
[POS]:    Auth layer - admin session state
[UPDATE]: When adding login or token refresh flows
*/

pub mod jwt;

pub use jwt::{JwtManager, TokenData, expiry_from_token};
