use crate::config::{
    ServerSettings, DEFAULT_BIND_ADDRESS, DEFAULT_CORPUS_ROOT, DEFAULT_RATE_LIMIT_MAX_REQUESTS,
    DEFAULT_RATE_LIMIT_WINDOW_SECS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SearchError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub corpus: Option<CorpusSection>,
    pub rate_limit: Option<RateLimitSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusSection {
    pub root: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateLimitSection {
    pub max_requests: Option<u64>,
    pub window_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Off in development setups where access logs are noise.
    pub request_log: Option<bool>,
    pub json: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SearchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SearchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }
}

impl ConfigProvider for TomlConfig {
    fn corpus_root(&self) -> &str {
        self.corpus
            .as_ref()
            .and_then(|c| c.root.as_deref())
            .unwrap_or(DEFAULT_CORPUS_ROOT)
    }

    fn bind_address(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    fn rate_limit_max_requests(&self) -> u64 {
        self.rate_limit
            .as_ref()
            .and_then(|r| r.max_requests)
            .unwrap_or(DEFAULT_RATE_LIMIT_MAX_REQUESTS)
    }

    fn rate_limit_window_secs(&self) -> u64 {
        self.rate_limit
            .as_ref()
            .and_then(|r| r.window_seconds)
            .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECS)
    }

    fn request_log_enabled(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.request_log)
            .unwrap_or(true)
    }

    fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        ServerSettings::from_provider(self).map(|_| ())
    }
}
