use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Oldest and newest product-table layouts the admin console can write to.
pub const SUPPORTED_SCHEMA_VERSIONS: std::ops::RangeInclusive<u32> = 1..=3;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("GALLERIA_ENV", "development"))?;
    let log_level = or_default("GALLERIA_LOG_LEVEL", "info");

    let backend_url = optional("GALLERIA_BACKEND_URL");
    let backend_anon_key = optional("GALLERIA_BACKEND_ANON_KEY");

    let storage_bucket = or_default("GALLERIA_STORAGE_BUCKET", "product_images");
    let cart_dir = PathBuf::from(or_default("GALLERIA_CART_DIR", "./.galleria"));

    let request_timeout_secs = optional("GALLERIA_REQUEST_TIMEOUT_SECS")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| invalid("GALLERIA_REQUEST_TIMEOUT_SECS", e.to_string()))
        })
        .transpose()?;

    let schema_version = or_default("GALLERIA_SCHEMA_VERSION", "3")
        .trim()
        .parse::<u32>()
        .map_err(|e| invalid("GALLERIA_SCHEMA_VERSION", e.to_string()))?;
    if !SUPPORTED_SCHEMA_VERSIONS.contains(&schema_version) {
        return Err(invalid(
            "GALLERIA_SCHEMA_VERSION",
            format!(
                "expected {} through {}, got {schema_version}",
                SUPPORTED_SCHEMA_VERSIONS.start(),
                SUPPORTED_SCHEMA_VERSIONS.end()
            ),
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        backend_url,
        backend_anon_key,
        storage_bucket,
        cart_dir,
        request_timeout_secs,
        schema_version,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GALLERIA_ENV".to_string(),
            reason: format!("expected development, test, or production; got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
