use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::config::loader::file_to_config;
use crate::config::settings::{
    AuthConfig, CrmConfig, LogFormat, LoggingConfig, MetricsConfig, RelayConfig, ServerConfig,
    TokenCacheConfig,
};
use crate::utils::constants::{DEFAULT_CRM_BASE_URL, DEFAULT_CRM_LEAD_PATH, DEFAULT_PORT};
use crate::utils::logging::LogLevel;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// YAML config file; when given, the flags below except log level are ignored
    #[arg(short, long, env = "CONFIG")]
    pub config: Option<String>,

    #[arg(long, env = "CLIENT_ID")]
    pub client_id: Option<String>,
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,
    #[arg(long, env = "OAUTH_URL")]
    pub oauth_url: Option<String>,
    #[arg(long, env = "USERNAME")]
    pub username: Option<String>,
    #[arg(long, env = "PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    #[arg(long, env = "CRM_BASE_URL", default_value = DEFAULT_CRM_BASE_URL)]
    pub crm_base_url: String,
    #[arg(long, env = "CRM_LEAD_PATH", default_value = DEFAULT_CRM_LEAD_PATH)]
    pub crm_lead_path: String,

    #[arg(long, env = "LOG_LEVEL", value_enum)]
    pub log_level: Option<LogLevel>,
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long = "metrics", env = "METRICS_ENABLED")]
    pub metrics_enabled: bool,
    #[arg(long = "token-cache", env = "TOKEN_CACHE_ENABLED")]
    pub token_cache_enabled: bool,
}

impl Args {
    /// Build the relay config, from the YAML file when one is given.
    pub fn into_config(self) -> Result<RelayConfig> {
        if let Some(path) = &self.config {
            return file_to_config(Path::new(path));
        }

        Ok(RelayConfig {
            auth: AuthConfig {
                client_id: self.client_id,
                client_secret: self.client_secret,
                oauth_url: self.oauth_url,
                username: self.username,
                password: self.password,
            },
            crm: CrmConfig {
                base_url: self.crm_base_url,
                lead_path: self.crm_lead_path,
            },
            server: ServerConfig { port: self.port },
            logging: LoggingConfig::new("info".to_owned(), self.log_format),
            metrics: MetricsConfig {
                is_enabled: self.metrics_enabled,
                ..MetricsConfig::default()
            },
            token_cache: TokenCacheConfig {
                enabled: self.token_cache_enabled,
                ..TokenCacheConfig::default()
            },
        })
    }
}
