use clap::ValueEnum;
use serde::Deserialize;

use crate::utils::constants::{
    DEFAULT_CRM_BASE_URL, DEFAULT_CRM_LEAD_PATH, DEFAULT_METRICS_PATH, DEFAULT_PORT,
    DEFAULT_SAFETY_MARGIN_SECS, DEFAULT_TOKEN_TTL_SECS,
};

/// ================================
/// Full relay configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub crm: CrmConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub token_cache: TokenCacheConfig,
}

/// ================================
/// Identity provider credentials
/// ================================
/// All five values are required to authenticate, but none is enforced at load
/// time: the check happens right before the token request.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub oauth_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Borrowed view over a complete [`AuthConfig`].
#[derive(Debug, Clone, Copy)]
pub struct PasswordCredentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub oauth_url: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

impl AuthConfig {
    /// Names of the values that are absent or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("oauth_url", &self.oauth_url),
            ("username", &self.username),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn credentials(&self) -> Option<PasswordCredentials<'_>> {
        Some(PasswordCredentials {
            client_id: present(&self.client_id)?,
            client_secret: present(&self.client_secret)?,
            oauth_url: present(&self.oauth_url)?,
            username: present(&self.username)?,
            password: present(&self.password)?,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// ================================
/// Destination CRM
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct CrmConfig {
    #[serde(default = "default_crm_base_url")]
    pub base_url: String,
    #[serde(default = "default_crm_lead_path")]
    pub lead_path: String,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_crm_base_url(),
            lead_path: default_crm_lead_path(),
        }
    }
}

impl CrmConfig {
    pub fn lead_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.lead_path)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
    #[serde(default)]
    pub is_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: default_metrics_path(),
            is_enabled: false,
        }
    }
}

/// ================================
/// Token cache
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct TokenCacheConfig {
    #[serde(default)]
    pub enabled: bool,
    /// token is dropped this many seconds before it actually expires
    #[serde(default = "default_safety_margin_seconds")]
    pub safety_margin_seconds: u64,
    /// lifetime assumed when the token response carries no `expires_in`
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: u64,
}

impl Default for TokenCacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            safety_margin_seconds: DEFAULT_SAFETY_MARGIN_SECS,
            default_ttl_seconds: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_crm_base_url() -> String {
    DEFAULT_CRM_BASE_URL.to_string()
}

fn default_crm_lead_path() -> String {
    DEFAULT_CRM_LEAD_PATH.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_metrics_path() -> String {
    DEFAULT_METRICS_PATH.to_string()
}

fn default_safety_margin_seconds() -> u64 {
    DEFAULT_SAFETY_MARGIN_SECS
}

fn default_ttl_seconds() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_auth() -> AuthConfig {
        AuthConfig {
            client_id: Some("client".into()),
            client_secret: Some("secret".into()),
            oauth_url: Some("http://idp/token".into()),
            username: Some("user".into()),
            password: Some("pass".into()),
        }
    }

    #[test]
    fn complete_auth_yields_credentials() {
        let auth = full_auth();
        assert!(auth.missing().is_empty());
        let creds = auth.credentials().expect("credentials");
        assert_eq!(creds.client_id, "client");
        assert_eq!(creds.oauth_url, "http://idp/token");
    }

    #[test]
    fn empty_values_count_as_missing() {
        let mut auth = full_auth();
        auth.client_secret = Some(String::new());
        auth.password = None;

        assert_eq!(auth.missing(), vec!["client_secret", "password"]);
        assert!(auth.credentials().is_none());
    }

    #[test]
    fn lead_url_joins_base_and_path() {
        let crm = CrmConfig {
            base_url: "http://crm.local/".into(),
            lead_path: "/prospects/api/shark-tanks".into(),
        };
        assert_eq!(crm.lead_url(), "http://crm.local/prospects/api/shark-tanks");
        assert_eq!(
            CrmConfig::default().lead_url(),
            "https://nusanet.api.dev.bis.nusawork.com/prospects/api/shark-tanks"
        );
    }
}
