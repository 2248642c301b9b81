pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_range, validate_socket_addr,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_CORPUS_ROOT: &str = "./public";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u64 = 60;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;
const MAX_RATE_LIMIT_WINDOW_SECS: u64 = 24 * 60 * 60;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "enem-search")]
#[command(about = "Keyword search over ENEM exam questions")]
pub struct CliConfig {
    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Directory holding the year partitions [default: ./public]")]
    pub corpus_root: Option<String>,

    #[arg(long, help = "Address to listen on [default: 127.0.0.1:3000]")]
    pub bind: Option<String>,

    #[arg(long, help = "Requests allowed per client per window [default: 60]")]
    pub rate_limit: Option<u64>,

    #[arg(long, help = "Rate limit window in seconds [default: 60]")]
    pub rate_limit_window: Option<u64>,

    #[arg(long, help = "Disable per-request access logging")]
    pub no_request_log: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Copies every flag given on the command line over the file settings.
    pub fn apply_overrides(&self, config: &mut toml_config::TomlConfig) {
        if let Some(root) = &self.corpus_root {
            config.corpus.get_or_insert_with(Default::default).root = Some(root.clone());
        }
        if let Some(bind) = &self.bind {
            config.server.get_or_insert_with(Default::default).bind = Some(bind.clone());
        }
        if let Some(max) = self.rate_limit {
            config.rate_limit.get_or_insert_with(Default::default).max_requests = Some(max);
        }
        if let Some(window) = self.rate_limit_window {
            config.rate_limit.get_or_insert_with(Default::default).window_seconds = Some(window);
        }
        if self.no_request_log {
            config.logging.get_or_insert_with(Default::default).request_log = Some(false);
        }
        if self.json_logs {
            config.logging.get_or_insert_with(Default::default).json = Some(true);
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn corpus_root(&self) -> &str {
        self.corpus_root.as_deref().unwrap_or(DEFAULT_CORPUS_ROOT)
    }

    fn bind_address(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    fn rate_limit_max_requests(&self) -> u64 {
        self.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT_MAX_REQUESTS)
    }

    fn rate_limit_window_secs(&self) -> u64 {
        self.rate_limit_window.unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECS)
    }

    fn request_log_enabled(&self) -> bool {
        !self.no_request_log
    }

    fn json_logs(&self) -> bool {
        self.json_logs
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        ServerSettings::from_provider(self).map(|_| ())
    }
}

/// Validated settings the server is started with.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub corpus_root: String,
    pub bind_address: SocketAddr,
    pub rate_limit_max_requests: u64,
    pub rate_limit_window: Duration,
    pub request_log_enabled: bool,
    pub json_logs: bool,
}

impl ServerSettings {
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        validate_path("corpus.root", provider.corpus_root())?;
        let bind_address = validate_socket_addr("server.bind", provider.bind_address())?;
        validate_positive_number(
            "rate_limit.max_requests",
            provider.rate_limit_max_requests(),
            1,
        )?;
        validate_range(
            "rate_limit.window_seconds",
            provider.rate_limit_window_secs(),
            1,
            MAX_RATE_LIMIT_WINDOW_SECS,
        )?;

        Ok(Self {
            corpus_root: provider.corpus_root().to_string(),
            bind_address,
            rate_limit_max_requests: provider.rate_limit_max_requests(),
            rate_limit_window: Duration::from_secs(provider.rate_limit_window_secs()),
            request_log_enabled: provider.request_log_enabled(),
            json_logs: provider.json_logs(),
        })
    }
}
