use std::{fs, path::Path};
use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, error, warn};

use crate::config::settings::RelayConfig;

/// Load relay config from a YAML file, expanding `${VAR}` / `${VAR:default}` first.
pub fn file_to_config(path: &Path) -> Result<RelayConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let expanded = expand_env_vars(&content)?;
    parse_config(&expanded)
}

pub fn parse_config(content: &str) -> Result<RelayConfig> {
    let relay_config: RelayConfig = serde_yaml::from_str(content)
        .inspect_err(|e| error!("parse config error: {}", e))?;
    debug!("config parsed, lead url: {}", relay_config.crm.lead_url());
    Ok(relay_config)
}

/// Warn about incomplete credentials. Startup proceeds; every submission will
/// fail until the missing values are supplied.
pub fn report_missing_credentials(relay_config: &RelayConfig) -> Vec<&'static str> {
    let missing = relay_config.auth.missing();
    if !missing.is_empty() {
        warn!(?missing, "auth config incomplete, token requests will be refused");
    }
    missing
}

fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    });
    Ok(expanded.into_owned())
}
