use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Workers started when `server.workers` is unset
pub const DEFAULT_WORKERS: usize = 4;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub fetcher: FetcherSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub contrast: ContrastSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    /// Largest accepted JSON body, in bytes
    pub json_limit_bytes: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            json_limit_bytes: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct FetcherSettings {
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            max_body_bytes: default_max_body_bytes(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_fetch_timeout() -> u64 { 10 }
fn default_max_body_bytes() -> usize { 2 * 1024 * 1024 }
fn default_user_agent() -> String {
    format!("inclusiv-audit/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Redis L2 cache; in-memory only when unset
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_issue_slots")]
    pub issue_slots: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            issue_slots: default_issue_slots(),
        }
    }
}

fn default_issue_slots() -> u32 { crate::core::hierarchy::DEFAULT_ISSUE_SLOTS }

#[derive(Debug, Clone, Deserialize)]
pub struct ContrastSettings {
    /// Level used by suggestions when the request names none
    #[serde(default = "default_level_name")]
    pub default_level: String,
}

impl Default for ContrastSettings {
    fn default() -> Self {
        Self {
            default_level: default_level_name(),
        }
    }
}

fn default_level_name() -> String { "aa-normal".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Output style for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LoggingSettings {
    /// `json` and `pretty` by name; anything else falls back to compact
    pub fn log_format(&self) -> LogFormat {
        match self.format.to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with INCLUSIV__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., INCLUSIV__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("INCLUSIV")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Parsed suggestion level, rejecting unknown names at start-up
    pub fn default_contrast_level(&self) -> Result<crate::core::ContrastLevel, ConfigError> {
        self.contrast
            .default_level
            .parse()
            .map_err(ConfigError::Message)
    }

    /// Worker count for the HTTP server, never below one
    pub fn worker_count(&self) -> usize {
        self.server.workers.unwrap_or(DEFAULT_WORKERS).max(1)
    }
}

/// Apply conventional unprefixed variables (REDIS_URL) over the layered config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(redis_url) = std::env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }

    builder.build()
}
