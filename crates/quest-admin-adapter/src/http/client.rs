/*
[INPUT]:  HTTP configuration (base URLs, timeouts, admin token)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
[UPDATE]: Split base URLs into admin and public API
*/

use crate::auth::JwtManager;
use crate::http::{QuestAdminError, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default base URLs for the quest backend
const ADMIN_BASE_URL: &str = "https://api.starknet.quest";
const PUBLIC_BASE_URL: &str = "https://api.starknet.quest";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the quest admin and public APIs
#[derive(Debug, Clone)]
pub struct QuestAdminClient {
    http_client: Client,
    admin_base_url: Url,
    public_base_url: Url,
    jwt: JwtManager,
}

impl QuestAdminClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_urls(config, ADMIN_BASE_URL, PUBLIC_BASE_URL)
    }

    /// Create a client against explicit base URLs (self-hosted backends, mock servers)
    pub fn with_config_and_base_urls(
        config: ClientConfig,
        admin_base_url: &str,
        public_base_url: &str,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            admin_base_url: Url::parse(admin_base_url)?,
            public_base_url: Url::parse(public_base_url)?,
            jwt: JwtManager::new(),
        })
    }

    /// Set the admin JWT used for admin endpoints
    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        self.jwt.set_token(token)
    }

    pub fn jwt(&self) -> &JwtManager {
        &self.jwt
    }

    pub fn session_expires_at(&self) -> Option<DateTime<Utc>> {
        self.jwt.expires_at()
    }

    /// Build full URL for admin endpoints
    fn admin_url(&self, endpoint: &str) -> std::result::Result<Url, url::ParseError> {
        self.admin_base_url.join(endpoint)
    }

    /// Build full URL for public endpoints
    fn public_url(&self, endpoint: &str) -> std::result::Result<Url, url::ParseError> {
        self.public_base_url.join(endpoint)
    }

    /// Build request builder for admin endpoints, attaching the admin token
    pub(crate) fn admin_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let token = self
            .jwt
            .get_token()
            .ok_or_else(|| QuestAdminError::Authentication {
                message: "no admin token configured".to_string(),
            })?;
        if self.jwt.is_expired() {
            return Err(QuestAdminError::TokenExpired);
        }

        let url = self.admin_url(endpoint)?;
        Ok(self.http_client.request(method, url).bearer_auth(token))
    }

    /// Build request builder for public endpoints
    pub(crate) fn public_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.public_url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and decode the JSON body of a successful response
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let body = self.send_checked(builder).await?;
        serde_json::from_slice(&body).map_err(QuestAdminError::from)
    }

    /// Like `send_json`, but a 404 or an empty body decodes to `None`
    pub(crate) async fn send_optional_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>> {
        match self.send_checked(builder).await {
            Ok(body) if body.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(body) => Ok(Some(serde_json::from_slice(&body)?)),
            Err(QuestAdminError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Fetch a raw body from a public endpoint with string query parameters
    pub async fn fetch_bytes(&self, endpoint: &str, query: &[(String, String)]) -> Result<Vec<u8>> {
        let builder = self.public_request(Method::GET, endpoint)?.query(query);
        self.send_checked(builder).await
    }

    async fn send_checked(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(body.to_vec());
        }

        let message = String::from_utf8_lossy(&body).into_owned();
        tracing::debug!(status = status.as_u16(), path = %url, "request failed");
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                QuestAdminError::Authentication { message }
            }
            StatusCode::NOT_FOUND => QuestAdminError::NotFound(url),
            _ => QuestAdminError::api_error(status, message),
        })
    }
}
