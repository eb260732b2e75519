use std::path::PathBuf;

use crate::error::ConfigError;

/// Application configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the embedding service; `None` forces lexical-fallback
    /// deduplication.
    pub embed_url: Option<String>,
    pub embed_timeout_secs: u64,
    /// Optional taxonomy override file; the compiled-in defaults apply
    /// when unset.
    pub taxonomy_path: Option<PathBuf>,
    pub log_level: String,
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, decoupled
/// from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let embed_url = lookup("NEWSWATCH_EMBED_URL").ok();
    let embed_timeout_secs = parse_u64("NEWSWATCH_EMBED_TIMEOUT_SECS", "30")?;
    let taxonomy_path = lookup("NEWSWATCH_TAXONOMY_PATH").ok().map(PathBuf::from);
    let log_level = or_default("NEWSWATCH_LOG_LEVEL", "info");

    Ok(AppConfig {
        embed_url,
        embed_timeout_secs,
        taxonomy_path,
        log_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, std::env::VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(std::env::VarError::NotPresent)
        }
    }

    #[test]
    fn defaults_apply_with_empty_env() {
        let env = HashMap::new();
        let config = build_app_config(lookup_from(&env)).expect("defaults should build");
        assert!(config.embed_url.is_none());
        assert_eq!(config.embed_timeout_secs, 30);
        assert!(config.taxonomy_path.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn values_override_defaults() {
        let mut env = HashMap::new();
        env.insert("NEWSWATCH_EMBED_URL", "http://localhost:8080");
        env.insert("NEWSWATCH_EMBED_TIMEOUT_SECS", "5");
        env.insert("NEWSWATCH_LOG_LEVEL", "debug");
        let config = build_app_config(lookup_from(&env)).expect("should build");
        assert_eq!(config.embed_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.embed_timeout_secs, 5);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn invalid_timeout_is_an_error() {
        let mut env = HashMap::new();
        env.insert("NEWSWATCH_EMBED_TIMEOUT_SECS", "soon");
        let err = build_app_config(lookup_from(&env)).expect_err("should reject");
        assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
    }
}
