//! Server configuration from the environment

use std::env;
use std::path::PathBuf;

use crate::error::ServerError;

/// Path to a JSON unit table replacing the reference table
pub const UNITS_PATH_VAR: &str = "GAUGE_UNITS_PATH";
/// `text` or `json`
pub const LOG_FORMAT_VAR: &str = "GAUGE_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ServerError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ServerError::Config(format!(
                "{} must be 'text' or 'json', got '{}'",
                LOG_FORMAT_VAR, other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub units_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let units_path = lookup(UNITS_PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(value) => LogFormat::parse(&value)?,
            None => LogFormat::default(),
        };
        Ok(ServerConfig { units_path, log_format })
    }
}
