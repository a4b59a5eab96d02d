use thiserror::Error;

/// PostgREST code for a column missing from the schema cache.
pub const UNKNOWN_COLUMN_CODE: &str = "PGRST204";

/// PostgreSQL `undefined_column` SQLSTATE, passed through by PostgREST.
pub const UNDEFINED_COLUMN_SQLSTATE: &str = "42703";

/// Errors returned by the backend client.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status and an error descriptor.
    #[error("backend error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid backend URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl BackendError {
    /// Error code from the backend's error descriptor, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            BackendError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// `true` when the backend rejected a write because a column does not exist.
    #[must_use]
    pub fn is_unknown_column(&self) -> bool {
        matches!(
            self.code(),
            Some(UNKNOWN_COLUMN_CODE | UNDEFINED_COLUMN_SQLSTATE)
        )
    }

    /// Build an [`BackendError::Api`] from a failed response body.
    ///
    /// Table endpoints answer `{code, message, details, hint}`; the storage
    /// endpoints answer `{statusCode, error, message}`. Anything else keeps
    /// the raw body as the message.
    pub(crate) fn from_response_body(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
        let field = |name: &str| {
            parsed
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        };

        let code = field("code").or_else(|| field("error"));
        let message = field("message")
            .or_else(|| field("error"))
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {status}")
                } else {
                    trimmed.to_owned()
                }
            });

        BackendError::Api {
            status,
            code,
            message,
        }
    }
}
