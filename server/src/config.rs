//! Process configuration read from environment variables.

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}: expected an integer between 0 and 65535")]
    InvalidPort(String),

    #[error("invalid LOG_FORMAT {0:?}: expected \"text\" or \"json\"")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Reads `HOST`, `PORT` and `LOG_FORMAT`; unset variables fall back to
    /// the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };
        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "text" | "" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::InvalidLogFormat(raw)),
            },
            None => defaults.log_format,
        };
        Ok(Self {
            host,
            port,
            log_format,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
