use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Backend endpoint and public (anon) key, present only when both are set.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BackendCredentials<'a> {
    pub url: &'a str,
    pub anon_key: &'a str,
}

impl std::fmt::Debug for BackendCredentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendCredentials")
            .field("url", &self.url)
            .field("anon_key", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub backend_url: Option<String>,
    pub backend_anon_key: Option<String>,
    pub storage_bucket: String,
    pub cart_dir: PathBuf,
    /// `None` leaves request timing to the transport defaults.
    pub request_timeout_secs: Option<u64>,
    pub schema_version: u32,
}

impl AppConfig {
    /// Backend credentials, or `None` when either value is blank.
    #[must_use]
    pub fn backend_credentials(&self) -> Option<BackendCredentials<'_>> {
        let url = self.backend_url.as_deref().map(str::trim)?;
        let anon_key = self.backend_anon_key.as_deref().map(str::trim)?;
        if url.is_empty() || anon_key.is_empty() {
            return None;
        }
        Some(BackendCredentials { url, anon_key })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("backend_url", &self.backend_url)
            .field(
                "backend_anon_key",
                &self.backend_anon_key.as_ref().map(|_| "[redacted]"),
            )
            .field("storage_bucket", &self.storage_bucket)
            .field("cart_dir", &self.cart_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("schema_version", &self.schema_version)
            .finish()
    }
}
