use std::fmt;

/// Per-protocol credential supplied by the configuration layer.
///
/// `Debug` output never includes the API key or secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub app_id: String,
    pub api_key: String,
    pub api_secret: Option<String>,
}

impl Credential {
    pub fn new(
        app_id: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: Option<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            api_key: api_key.into(),
            api_secret,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("app_id", &self.app_id)
            .field("api_key", &redact(&self.api_key))
            .field(
                "api_secret",
                &self.api_secret.as_deref().map(|_| "***"),
            )
            .finish()
    }
}

/// Shorten a signature-like value for log output: first four characters,
/// then `***`.
pub fn redact(value: &str) -> String {
    let prefix: String = value.chars().take(4).collect();
    format!("{prefix}***")
}
