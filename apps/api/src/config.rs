use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::models::Credential;
use crate::tailoring::pipeline::PipelineSettings;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Pre-populates requests that arrive without a credential.
    pub default_credential: Option<Credential>,
    pub openai_base_url: String,
    pub model: String,
    pub completion_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let timeout_secs = match lookup("COMPLETION_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("COMPLETION_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("COMPLETION_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            default_credential: lookup("OPENAI_API_KEY")
                .filter(|key| !key.is_empty())
                .map(Credential::new),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: lookup("TAILOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            completion_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            model: self.model.clone(),
            timeout: self.completion_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(config.default_credential.is_none());
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.completion_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_reads_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("OPENAI_API_KEY", "sk-env"),
            ("OPENAI_BASE_URL", "http://localhost:11434/v1"),
            ("TAILOR_MODEL", "gpt-4o"),
            ("COMPLETION_TIMEOUT_SECS", "15"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.default_credential.unwrap().expose(), "sk-env");
        assert_eq!(config.openai_base_url, "http://localhost:11434/v1");

        let settings = config_from(&[("TAILOR_MODEL", "gpt-4o"), ("COMPLETION_TIMEOUT_SECS", "15")])
            .unwrap()
            .pipeline_settings();
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_empty_api_key_means_no_default() {
        let config = config_from(&[("OPENAI_API_KEY", "")]).unwrap();
        assert!(config.default_credential.is_none());
    }

    #[test]
    fn test_rejects_bad_port() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(config_from(&[("COMPLETION_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("COMPLETION_TIMEOUT_SECS", "soon")]).is_err());
    }
}
