use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with backend credentials populated.
fn connected_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("GALLERIA_BACKEND_URL", "https://project.example.co");
    m.insert("GALLERIA_BACKEND_ANON_KEY", "anon-key");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "GALLERIA_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.backend_url.is_none());
    assert!(cfg.backend_anon_key.is_none());
    assert_eq!(cfg.storage_bucket, "product_images");
    assert_eq!(cfg.cart_dir, std::path::PathBuf::from("./.galleria"));
    assert!(cfg.request_timeout_secs.is_none());
    assert_eq!(cfg.schema_version, 3);
    assert!(cfg.backend_credentials().is_none());
}

#[test]
fn backend_credentials_present_when_both_set() {
    let map = connected_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let creds = cfg.backend_credentials().expect("credentials should be present");
    assert_eq!(creds.url, "https://project.example.co");
    assert_eq!(creds.anon_key, "anon-key");
}

#[test]
fn backend_credentials_absent_when_key_blank() {
    let mut map = connected_env();
    map.insert("GALLERIA_BACKEND_ANON_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.backend_credentials().is_none());
}

#[test]
fn backend_credentials_absent_when_url_missing() {
    let mut map = connected_env();
    map.remove("GALLERIA_BACKEND_URL");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.backend_credentials().is_none());
}

#[test]
fn request_timeout_override() {
    let mut map = connected_env();
    map.insert("GALLERIA_REQUEST_TIMEOUT_SECS", "45");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, Some(45));
}

#[test]
fn request_timeout_invalid() {
    let mut map = connected_env();
    map.insert("GALLERIA_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GALLERIA_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(GALLERIA_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn schema_version_override() {
    let mut map = connected_env();
    map.insert("GALLERIA_SCHEMA_VERSION", "1");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.schema_version, 1);
}

#[test]
fn schema_version_out_of_range() {
    let mut map = connected_env();
    map.insert("GALLERIA_SCHEMA_VERSION", "9");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GALLERIA_SCHEMA_VERSION"),
        "expected InvalidEnvVar(GALLERIA_SCHEMA_VERSION), got: {result:?}"
    );
}

#[test]
fn storage_bucket_and_cart_dir_override() {
    let mut map = connected_env();
    map.insert("GALLERIA_STORAGE_BUCKET", "gallery");
    map.insert("GALLERIA_CART_DIR", "/var/lib/galleria");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.storage_bucket, "gallery");
    assert_eq!(cfg.cart_dir, std::path::PathBuf::from("/var/lib/galleria"));
}

#[test]
fn debug_output_redacts_anon_key() {
    let map = connected_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("anon-key"), "key leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
