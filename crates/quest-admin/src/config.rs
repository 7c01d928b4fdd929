/*
[INPUT]:  YAML configuration file, environment (admin token)
[OUTPUT]: Parsed admin configuration and a logged-in QuestAdminClient
[POS]:    Configuration layer - backend endpoints, session, download target
[UPDATE]: When adding new configuration options
*/

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use quest_admin_adapter::{ClientConfig, QuestAdminClient};
use serde::{Deserialize, Serialize};

/// Top-level configuration of the admin tool
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Where exports are saved; the user's download directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

/// Backend endpoints and HTTP timeouts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub admin_base_url: String,
    #[serde(default = "default_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            admin_base_url: default_base_url(),
            public_base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Admin JWT source
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Inline admin JWT; takes precedence over `token_env`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Environment variable holding the admin JWT
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_env: default_token_env(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.starknet.quest".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_token_env() -> String {
    "QUEST_ADMIN_TOKEN".to_string()
}

impl AdminConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Inline token, else the configured environment variable
    pub fn resolve_token(&self) -> Option<String> {
        self.auth
            .token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| std::env::var(&self.auth.token_env).ok())
            .filter(|token| !token.trim().is_empty())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }

    /// Client for both APIs, logged in when a token is available
    pub fn build_client(&self) -> anyhow::Result<QuestAdminClient> {
        let client = QuestAdminClient::with_config_and_base_urls(
            self.client_config(),
            &self.api.admin_base_url,
            &self.api.public_base_url,
        )
        .context("build quest admin client")?;

        if let Some(token) = self.resolve_token() {
            client.set_token(token).context("install admin token")?;
        }
        Ok(client)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
