use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::str::FromStr;

use crate::prompts::DEFAULT_PERSONA_PROMPT;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f64 = 0.9;
pub const DEFAULT_TOKEN_LIMIT: usize = 4000;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;

/// Read-only settings shared by every request.
#[derive(Clone)]
pub struct RelayConfig {
    api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub temperature: f64,
    pub token_limit: usize,
    pub persona_prompt: String,
    pub bind_addr: String,
    pub max_body_bytes: usize,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let temperature = parse_or(get("TEMPERATURE"), "TEMPERATURE", DEFAULT_TEMPERATURE)?;
        if !(0.0..=2.0).contains(&temperature) {
            bail!("TEMPERATURE must be between 0.0 and 2.0, got {}", temperature);
        }

        let token_limit = parse_or(get("TOKEN_LIMIT"), "TOKEN_LIMIT", DEFAULT_TOKEN_LIMIT)?;
        if token_limit == 0 {
            bail!("TOKEN_LIMIT must be greater than zero");
        }

        let persona_prompt = match get("PERSONA_PROMPT_PATH") {
            Some(path) => fs::read_to_string(&path)
                .with_context(|| format!("failed to read persona prompt from {}", path))?,
            None => DEFAULT_PERSONA_PROMPT.to_string(),
        };

        Ok(Self {
            api_key: get("OPENAI_KEY"),
            api_base: get("OPENAI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            token_limit,
            persona_prompt,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            max_body_bytes: parse_or(
                get("MAX_BODY_BYTES"),
                "MAX_BODY_BYTES",
                DEFAULT_MAX_BODY_BYTES,
            )?,
        })
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: {:?}", key, value)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<RelayConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RelayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert!(config.api_key().is_none());
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.temperature, 0.9);
        assert_eq!(config.token_limit, 4000);
        assert_eq!(config.persona_prompt, DEFAULT_PERSONA_PROMPT);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let config = config_from(&[("OPENAI_KEY", "  ")]).unwrap();
        assert!(config.api_key().is_none());

        let config = config_from(&[("OPENAI_KEY", "sk-test")]).unwrap();
        assert_eq!(config.api_key(), Some("sk-test"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("TEMPERATURE", "0.2"),
            ("TOKEN_LIMIT", "1200"),
            ("OPENAI_API_BASE", "http://localhost:9000"),
        ])
        .unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.token_limit, 1200);
        assert_eq!(config.api_base, "http://localhost:9000");
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(config_from(&[("TEMPERATURE", "warm")]).is_err());
        assert!(config_from(&[("TEMPERATURE", "3.5")]).is_err());
        assert!(config_from(&[("TOKEN_LIMIT", "0")]).is_err());
        assert!(config_from(&[("MAX_BODY_BYTES", "-1")]).is_err());
    }

    #[test]
    fn missing_prompt_file_is_an_error() {
        let err = config_from(&[("PERSONA_PROMPT_PATH", "/nonexistent/persona.txt")])
            .err()
            .unwrap();
        assert!(err.to_string().contains("persona prompt"));
    }
}
