use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Model artifact locations
    pub models: ModelsConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Progress indicator configuration
    #[serde(default)]
    pub progress: ProgressConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());
        Self::load_from(&config_path)
    }

    /// Load the embedded defaults, then `path` if it exists, then `FCP_*` overrides
    pub fn load_from(path: &str) -> Result<Self> {
        let config = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(path).required(false))
            // Override with environment variables (e.g. FCP_SERVER__HTTP_PORT)
            .add_source(
                config::Environment::with_prefix("FCP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Socket address string for the HTTP listener
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            models: ModelsConfig::default(),
            session: SessionConfig::default(),
            progress: ProgressConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Banner image file name inside `static_dir`
    #[serde(default = "default_banner_image")]
    pub banner_image: String,

    /// Requests running longer than this get `408 Request Timeout`
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            static_dir: default_static_dir(),
            banner_image: default_banner_image(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Serialized random forest classifier
    #[serde(default = "default_classifier_path")]
    pub classifier_path: PathBuf,

    /// Serialized standard scaler
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            classifier_path: default_classifier_path(),
            scaler_path: default_scaler_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie carrying the session id
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Sessions idle for longer than this are dropped with their history
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Upper bound on live sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            idle_timeout_secs: default_idle_timeout(),
            max_sessions: default_max_sessions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Number of progress increments
    #[serde(default = "default_progress_steps")]
    pub steps: u32,

    /// Delay per increment (milliseconds)
    #[serde(default = "default_step_delay")]
    pub step_delay_ms: u64,
}

impl ProgressConfig {
    /// Progress that completes immediately
    pub fn disabled() -> Self {
        Self {
            steps: 0,
            step_delay_ms: 0,
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            steps: default_progress_steps(),
            step_delay_ms: default_step_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8501
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_banner_image() -> String {
    "forestcover.jpg".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_classifier_path() -> PathBuf {
    PathBuf::from("forest_cover_model.json")
}

fn default_scaler_path() -> PathBuf {
    PathBuf::from("scaler.json")
}

fn default_cookie_name() -> String {
    "fcp_session".to_string()
}

fn default_idle_timeout() -> u64 {
    3600
}

fn default_max_sessions() -> u64 {
    10000
}

fn default_progress_steps() -> u32 {
    100
}

fn default_step_delay() -> u64 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}
