use anyhow::Context;
use camino::{
    Utf8Path,
    Utf8PathBuf,
};
use scryfall::{
    LanguageCode,
    Url,
};
use serde::Deserialize;
use std::{
    borrow::Cow,
    collections::HashMap,
    time::Duration,
};

/// Scryfall asks for at least this much time between requests.
const MIN_POLITE_DELAY: Duration = Duration::from_millis(50);

fn default_base_url() -> String {
    scryfall::DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("scryview/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_request_delay_ms() -> u64 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_stale_time_secs() -> u64 {
    5 * 60
}

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    /// Where to write rolling log files.
    ///
    /// File logging is off if this is not set.
    pub log_dir: Option<Utf8PathBuf>,

    /// The language used for card lookups that do not name one
    #[serde(default)]
    pub default_lang: LanguageCode,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

#[derive(Deserialize, Debug)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            request_delay_ms: default_request_delay_ms(),
            timeout_secs: default_timeout_secs(),
            extra: HashMap::new(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CacheConfig {
    #[serde(default = "default_stale_time_secs")]
    pub stale_time_secs: u64,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_time_secs: default_stale_time_secs(),
            extra: HashMap::new(),
        }
    }
}

impl Config {
    /// Load a config from a path
    pub fn load_from_path(path: &Utf8Path) -> anyhow::Result<Self> {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from `{path}`"))
            .and_then(|s| Self::load_from_str(&s))
    }

    /// Load a config from a string
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("failed to parse config")
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.api.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.cache.stale_time_secs)
    }

    /// Make an api client from this config
    pub fn build_client(&self) -> anyhow::Result<scryfall::Client> {
        scryfall::Client::builder()
            .base_url(self.api.base_url.as_str())
            .user_agent(self.api.user_agent.as_str())
            .timeout(self.timeout())
            .request_delay(self.request_delay())
            .build()
            .context("failed to build scryfall client")
    }

    /// Validate a config
    pub fn validate(&self) -> Vec<ValidationMessage> {
        let mut errors = Vec::new();

        match Url::parse(&self.api.base_url) {
            Ok(url) if url.cannot_be_a_base() => {
                errors.push(ValidationMessage {
                    severity: Severity::Error,
                    error: ValidationError::InvalidBaseUrl,
                });
            }
            Ok(_) => {}
            Err(_) => {
                errors.push(ValidationMessage {
                    severity: Severity::Error,
                    error: ValidationError::InvalidBaseUrl,
                });
            }
        }

        if self.api.user_agent.trim().is_empty() {
            errors.push(ValidationMessage {
                severity: Severity::Error,
                error: ValidationError::MissingUserAgent,
            });
        }

        if self.request_delay() < MIN_POLITE_DELAY {
            errors.push(ValidationMessage {
                severity: Severity::Warn,
                error: ValidationError::ShortRequestDelay,
            });
        }

        if self.api.timeout_secs == 0 {
            errors.push(ValidationMessage {
                severity: Severity::Error,
                error: ValidationError::ZeroTimeout,
            });
        }

        if self.cache.stale_time_secs == 0 {
            errors.push(ValidationMessage {
                severity: Severity::Warn,
                error: ValidationError::CacheDisabled,
            });
        }

        if self.default_lang == LanguageCode::Unknown {
            errors.push(ValidationMessage {
                severity: Severity::Error,
                error: ValidationError::UnknownDefaultLang,
            });
        }

        let extra_keys = self
            .extra
            .keys()
            .map(|key| key.to_string())
            .chain(self.api.extra.keys().map(|key| format!("api.{key}")))
            .chain(self.cache.extra.keys().map(|key| format!("cache.{key}")));
        for key in extra_keys {
            errors.push(ValidationMessage {
                severity: Severity::Warn,
                error: ValidationError::Generic(format!("unknown key `{key}`").into()),
            });
        }

        errors
    }
}

#[derive(Debug)]
pub struct ValidationMessage {
    severity: Severity,
    error: ValidationError,
}

impl ValidationMessage {
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn error(&self) -> &ValidationError {
        &self.error
    }
}

#[derive(Debug)]
pub enum ValidationError {
    InvalidBaseUrl,
    MissingUserAgent,
    ShortRequestDelay,
    ZeroTimeout,
    CacheDisabled,
    UnknownDefaultLang,

    Generic(Cow<'static, str>),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBaseUrl => write!(f, "Invalid Api Base Url"),
            ValidationError::MissingUserAgent => write!(f, "Missing User Agent"),
            ValidationError::ShortRequestDelay => {
                write!(f, "Request Delay Is Under {}ms", MIN_POLITE_DELAY.as_millis())
            }
            ValidationError::ZeroTimeout => write!(f, "Request Timeout Is Zero"),
            ValidationError::CacheDisabled => write!(f, "Cache Stale Time Is Zero, Caching Is Off"),
            ValidationError::UnknownDefaultLang => write!(f, "Unknown Default Language"),
            ValidationError::Generic(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Error,
}

#[cfg(test)]
mod test {
    use super::*;

    fn severities(config: &Config) -> Vec<(Severity, String)> {
        config
            .validate()
            .into_iter()
            .map(|message| (message.severity(), message.error().to_string()))
            .collect()
    }

    #[test]
    fn empty_config_is_default() {
        let config = Config::load_from_str("").expect("failed to parse config");
        assert_eq!(config.api.base_url, scryfall::DEFAULT_BASE_URL);
        assert_eq!(config.request_delay(), Duration::from_millis(100));
        assert_eq!(config.stale_time(), Duration::from_secs(300));
        assert_eq!(config.default_lang, LanguageCode::English);
        assert!(config.log_dir.is_none());
        assert!(config.validate().is_empty());

        let default = Config::default();
        assert_eq!(default.api.user_agent, config.api.user_agent);
        assert_eq!(default.cache.stale_time_secs, config.cache.stale_time_secs);
    }

    #[test]
    fn full_config() {
        let config = Config::load_from_str(
            r#"
log_dir = "./logs"
default_lang = "ja"

[api]
base_url = "http://localhost:8080/"
user_agent = "test/1.0"
request_delay_ms = 75
timeout_secs = 5

[cache]
stale_time_secs = 60
"#,
        )
        .expect("failed to parse config");

        assert_eq!(config.log_dir.as_deref(), Some(Utf8Path::new("./logs")));
        assert_eq!(config.default_lang, LanguageCode::Japanese);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.validate().is_empty());

        let client = config.build_client().expect("failed to build client");
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/");
        assert_eq!(client.request_delay(), Duration::from_millis(75));
    }

    #[test]
    fn validation() {
        let config = Config::load_from_str(
            r#"
default_lang = "xx"
colour = "blue"

[api]
base_url = "not a url"
request_delay_ms = 10
timeout_secs = 0

[cache]
stale_time_secs = 0
"#,
        )
        .expect("failed to parse config");

        let messages = severities(&config);
        let errors = messages
            .iter()
            .filter(|(severity, _)| *severity == Severity::Error)
            .count();
        let warnings = messages
            .iter()
            .filter(|(severity, _)| *severity == Severity::Warn)
            .count();

        // base url, timeout, language
        assert_eq!(errors, 3);
        // delay, cache, unknown key
        assert_eq!(warnings, 3);
        assert!(messages
            .iter()
            .any(|(_, message)| message == "unknown key `colour`"));
    }
}
