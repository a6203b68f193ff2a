//! Startup and I/O failures of the server process

use std::path::PathBuf;
use thiserror::Error;
use gauge_core::{ErrorReport, RegistryError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read unit table '{path}': {source}")]
    UnitsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid unit table: {0}")]
    Registry(#[from] RegistryError),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("stdio error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Coded report for a unit table the operator has to fix
    pub fn report(&self) -> Option<ErrorReport> {
        match self {
            Self::Registry(e) => Some(ErrorReport::from(e)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_core::codes;

    #[test]
    fn test_registry_failure_has_report() {
        let err = ServerError::from(RegistryError::MissingBaseUnit { domain: "length".to_string() });
        let report = err.report().unwrap();
        assert_eq!(report.code, codes::REGISTRY);
        assert!(report.message.contains("length"));
        assert!(report.to_string().starts_with("[REGISTRY] "));
    }

    #[test]
    fn test_other_failures_have_no_report() {
        assert!(ServerError::Config("bad".to_string()).report().is_none());
        assert!(ServerError::Logging("taken".to_string()).report().is_none());
    }
}
