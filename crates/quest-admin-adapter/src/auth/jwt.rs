/*
[INPUT]:  Admin JWT tokens
[OUTPUT]: Token retrieval and expiration status read from the `exp` claim
[POS]:    Auth layer - token lifecycle management
[UPDATE]: When adding token refresh or changing storage strategy
[UPDATE]: Expiry is decoded from the token payload instead of being supplied
*/

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::{Arc, PoisonError, RwLock};

use crate::http::{QuestAdminError, Result};

/// Stored token data with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

/// Read the `exp` claim (seconds since epoch) from a JWT without verifying it.
pub fn expiry_from_token(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp, 0)
}

/// Thread-safe JWT token manager
#[derive(Debug, Clone, Default)]
pub struct JwtManager {
    data: Arc<RwLock<Option<TokenData>>>,
}

impl JwtManager {
    /// Create a new empty JWT manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token; fails when the payload carries no readable `exp` claim.
    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        let expires_at = expiry_from_token(&token).ok_or_else(|| QuestAdminError::Authentication {
            message: "token has no readable exp claim".to_string(),
        })?;

        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(TokenData { token, expires_at });
        Ok(())
    }

    /// Get the current token if available
    pub fn get_token(&self) -> Option<String> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|data| data.token.clone())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|data| data.expires_at)
    }

    /// Check if token is expired (a missing token counts as expired)
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires_at) => now > expires_at,
            None => true,
        }
    }

    /// Clear the stored token
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}

#[cfg(test)]
pub(crate) fn token_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"admin","exp":{exp}}}"#));
    format!("{header}.{payload}.signature")
}
