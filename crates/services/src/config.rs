use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1/";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_FEEDBACK_DWELL: Duration = Duration::from_secs(2);

/// Where the Quiz Session API lives and how to authenticate against it.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: Url,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Build a config for `base_url`. A trailing slash is added so relative
    /// endpoints join under the base path instead of replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        let base_url = Url::parse(&normalized).map_err(|source| ConfigError::InvalidUrl {
            raw: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            base_url,
            token: None,
            timeout: DEFAULT_HTTP_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `ZONATA_API_URL`, `ZONATA_API_TOKEN` and `ZONATA_HTTP_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("ZONATA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let token = env::var("ZONATA_API_TOKEN").ok();
        let timeout = read_secs("ZONATA_HTTP_TIMEOUT_SECS")?.unwrap_or(DEFAULT_HTTP_TIMEOUT);
        Ok(Self::new(&base_url)?.with_token(token).with_timeout(timeout))
    }
}

/// Knobs of the session loop that are not part of the backend contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long graded feedback stays up before auto-advancing.
    pub feedback_dwell: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feedback_dwell: DEFAULT_FEEDBACK_DWELL,
        }
    }
}

impl SessionConfig {
    /// Read `ZONATA_FEEDBACK_DWELL_MS`, falling back to the default dwell.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidNumber` for a non-numeric value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let key = "ZONATA_FEEDBACK_DWELL_MS";
        let feedback_dwell = match env::var(key) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidNumber { key, raw })?,
            Err(_) => DEFAULT_FEEDBACK_DWELL,
        };
        Ok(Self { feedback_dwell })
    }
}

fn read_secs(key: &'static str) -> Result<Option<Duration>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| ConfigError::InvalidNumber { key, raw }),
        Err(_) => Ok(None),
    }
}
