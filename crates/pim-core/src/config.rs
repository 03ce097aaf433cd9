use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does not load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parsing and validation over an arbitrary env-var lookup, so tests can use
/// a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("PIM_ENV", "development"));
    let log_level = or_default("PIM_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("PIM_CATALOG_PATH", "./config/catalog.yaml"));

    let max_concurrent_products = parse_usize("PIM_MAX_CONCURRENT_PRODUCTS", "4")?;
    if max_concurrent_products == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PIM_MAX_CONCURRENT_PRODUCTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let index_name = or_default("PIM_INDEX_NAME", "pim_catalog_product");
    if index_name.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "PIM_INDEX_NAME".to_string(),
            reason: "must be non-empty".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        max_concurrent_products,
        index_name,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
