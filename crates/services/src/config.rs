use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

const DEFAULT_TIMEOUT_SECS: u64 = 100;
const DEFAULT_VIEW_PATH: &str = "buyer-tests/{test_id}/view-model";
const DEFAULT_REVIEW_PATH: &str = "buyer-tests/{test_id}";

/// Where and how to reach the exam backend.
///
/// Path templates are joined onto `base_url`; `{test_id}` is substituted per
/// request.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub base_url: Url,
    pub token: Option<String>,
    pub timeout: Duration,
    pub view_path: String,
    pub review_path: String,
}

impl BackendConfig {
    /// Config for `base_url` with default paths and timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("EXAM_API_BASE_URL", base_url)?,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            view_path: DEFAULT_VIEW_PATH.into(),
            review_path: DEFAULT_REVIEW_PATH.into(),
        })
    }

    /// Read `EXAM_API_*` variables from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL is missing or any value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok(), None)
    }

    /// Like `from_env`, but `base_url` replaces `EXAM_API_BASE_URL`.
    ///
    /// Token, timeout and path variables still apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` or any other value is invalid.
    pub fn from_env_with_base(base_url: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok(), Some(base_url))
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        base_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_override
            .map(str::to_string)
            .or_else(|| lookup("EXAM_API_BASE_URL"))
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVar("EXAM_API_BASE_URL"))?;
        let mut config = Self::new(&base_url)?;

        config.token = lookup("EXAM_API_TOKEN").filter(|token| !token.trim().is_empty());

        if let Some(raw) = lookup("EXAM_API_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "EXAM_API_TIMEOUT_SECS",
                    reason: format!("'{raw}' is not a positive number of seconds"),
                })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(path) = lookup("EXAM_API_VIEW_PATH") {
            config.view_path = path;
        }
        if let Some(path) = lookup("EXAM_API_REVIEW_PATH") {
            config.review_path = path;
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn url_for(&self, template: &str, test_id: u64) -> Result<Url, url::ParseError> {
        let path = template.replace("{test_id}", &test_id.to_string());
        self.base_url.join(path.trim_start_matches('/'))
    }
}

fn parse_base_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    // A trailing slash keeps `Url::join` from dropping the last path segment.
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&normalized).map_err(|err| ConfigError::InvalidValue {
        name,
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            name,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}
