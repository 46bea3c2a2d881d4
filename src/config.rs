//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file and defines
//! constants for the listener address, the uptime command, response headers,
//! logging, and shutdown. `AppConfig` is the root configuration struct; every
//! section has defaults so the server runs without any file at all.

use serde::Deserialize;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::Path;

// =============================================================================
// HTTP Listener
// =============================================================================

/// Listen on all interfaces by default
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default listener port
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// Seconds to wait for in-flight requests after a shutdown signal
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// HTTP Response Headers
// =============================================================================

/// Status responses reflect the host at request time and must not be replayed
pub const CACHE_CONTROL_STATUS: &str = "no-store";

// =============================================================================
// Uptime Probe
// =============================================================================

/// Program run to obtain the host uptime
pub const DEFAULT_PROBE_PROGRAM: &str = "uptime";

/// Arguments selecting the human-readable ("pretty") format
pub const DEFAULT_PROBE_ARGS: &[&str] = &["-p"];

/// Upper bound on captured stdout; `uptime -p` prints a few dozen bytes
pub const DEFAULT_PROBE_MAX_OUTPUT_BYTES: usize = 4096;

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "hostprobe=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

const LOG_FORMATS: &[&str] = &["text", "json"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// External uptime command
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    /// Listener address. `host` must be an IP literal; IPv6 needs no brackets.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.trim().parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Command used by the status endpoint to read the host uptime
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Program to execute, resolved through PATH (default: "uptime")
    #[serde(default = "ProbeConfig::default_program")]
    pub program: String,
    /// Arguments passed to the program (default: ["-p"])
    #[serde(default = "ProbeConfig::default_args")]
    pub args: Vec<String>,
    /// Maximum bytes of stdout accepted before the probe fails (default: 4096)
    #[serde(default = "ProbeConfig::default_max_output_bytes")]
    pub max_output_bytes: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            program: Self::default_program(),
            args: Self::default_args(),
            max_output_bytes: Self::default_max_output_bytes(),
        }
    }
}

impl ProbeConfig {
    fn default_program() -> String {
        DEFAULT_PROBE_PROGRAM.to_string()
    }

    fn default_args() -> Vec<String> {
        DEFAULT_PROBE_ARGS.iter().map(|a| a.to_string()).collect()
    }

    fn default_max_output_bytes() -> usize {
        DEFAULT_PROBE_MAX_OUTPUT_BYTES
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = self.http.socket_addr() {
            return Err(ConfigError::Validation(format!(
                "http.host must be an IP address, got {:?}: {}",
                self.http.host, e
            )));
        }

        if self.probe.program.trim().is_empty() {
            return Err(ConfigError::Validation("probe.program must not be empty".to_string()));
        }

        if self.probe.max_output_bytes == 0 {
            return Err(ConfigError::Validation(
                "probe.max_output_bytes must be greater than zero".to_string(),
            ));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.format must be one of {:?}, got {:?}",
                LOG_FORMATS, self.logging.format
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
