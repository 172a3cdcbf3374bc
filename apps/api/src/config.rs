use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only malformed values are fatal; everything has a usable default.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// When absent the matcher runs on the heuristic scorer alone.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_secs: u64,
    pub llm_max_attempts: u32,
    pub default_match_limit: usize,
    /// Empty means permissive CORS.
    pub cors_allowed_origins: Vec<String>,
    pub enable_database_reset: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://talentmatch.db".to_string()),
            anthropic_api_key: var("ANTHROPIC_API_KEY"),
            port: parse_or(var("PORT"), "PORT", 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            llm_timeout_secs: parse_or(var("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS", 120)?,
            llm_max_attempts: parse_or(var("LLM_MAX_ATTEMPTS"), "LLM_MAX_ATTEMPTS", 1)?.max(1),
            default_match_limit: parse_or(var("DEFAULT_MATCH_LIMIT"), "DEFAULT_MATCH_LIMIT", 3)?,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            enable_database_reset: parse_or(
                var("ENABLE_DATABASE_RESET"),
                "ENABLE_DATABASE_RESET",
                false,
            )?,
        })
    }

    pub fn ai_configured(&self) -> bool {
        self.anthropic_api_key.is_some()
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://talentmatch.db");
        assert_eq!(config.port, 8080);
        assert_eq!(config.llm_max_attempts, 1);
        assert_eq!(config.default_match_limit, 3);
        assert!(config.anthropic_api_key.is_none());
        assert!(!config.ai_configured());
        assert!(config.cors_allowed_origins.is_empty());
        assert!(!config.enable_database_reset);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = config_from(&[("ANTHROPIC_API_KEY", "   ")]).unwrap();
        assert!(!config.ai_configured());
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        let config = config_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:3000, http://127.0.0.1:3000 ,",
        )])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
    }

    #[test]
    fn test_zero_attempts_is_raised_to_one() {
        let config = config_from(&[("LLM_MAX_ATTEMPTS", "0")]).unwrap();
        assert_eq!(config.llm_max_attempts, 1);
    }

    #[test]
    fn test_reset_flag_parses_bool() {
        let config = config_from(&[("ENABLE_DATABASE_RESET", "true")]).unwrap();
        assert!(config.enable_database_reset);
    }
}
