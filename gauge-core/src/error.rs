//! Error taxonomy for unit conversion
//!
//! Two families of failure exist and they never mix:
//! - `RegistryError` is raised while a unit table is being built. A registry
//!   that built successfully can never produce one again.
//! - `ConvertError` is raised by a single conversion call. It is local and
//!   deterministic, so callers surface it rather than retry.
//!
//! `ErrorReport` is the serializable form handed to callers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_DOMAIN: &str = "UNKNOWN_DOMAIN";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const OVERFLOW: &str = "OVERFLOW";
    pub const REGISTRY: &str = "REGISTRY";
}

/// Failure of a single conversion call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("unknown domain: {domain}")]
    UnknownDomain { domain: String },

    #[error("unknown unit '{unit}' in domain '{domain}'")]
    UnknownUnit { domain: String, unit: String },

    #[error("invalid input: {value} is not a finite number")]
    InvalidInput { value: f64 },

    #[error("division by zero converting '{unit}' in domain '{domain}'")]
    DivisionByZero { domain: String, unit: String },

    #[error("overflow: '{unit}' in domain '{domain}' is out of range")]
    Overflow { domain: String, unit: String },
}

impl ConvertError {
    pub fn unknown_domain(domain: impl Into<String>) -> Self {
        Self::UnknownDomain { domain: domain.into() }
    }

    pub fn unknown_unit(domain: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::UnknownUnit { domain: domain.into(), unit: unit.into() }
    }

    pub fn division_by_zero(domain: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::DivisionByZero { domain: domain.into(), unit: unit.into() }
    }

    pub fn overflow(domain: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::Overflow { domain: domain.into(), unit: unit.into() }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownDomain { .. } => codes::UNKNOWN_DOMAIN,
            Self::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            Self::InvalidInput { .. } => codes::INVALID_INPUT,
            Self::DivisionByZero { .. } => codes::DIV_ZERO,
            Self::Overflow { .. } => codes::OVERFLOW,
        }
    }
}

/// Failure while building a unit registry from a table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("domain '{domain}' has no units")]
    EmptyDomain { domain: String },

    #[error("domain '{domain}' is registered twice")]
    DuplicateDomain { domain: String },

    #[error("unit '{unit}' is registered twice in domain '{domain}'")]
    DuplicateUnit { domain: String, unit: String },

    #[error("unit '{unit}' in domain '{domain}' has factor {factor}; factors must be finite and positive")]
    InvalidFactor { domain: String, unit: String, factor: f64 },

    #[error("unit '{unit}' in domain '{domain}' has offset {offset}; only affine domains take a finite offset")]
    InvalidOffset { domain: String, unit: String, offset: f64 },

    #[error("domain '{domain}' has no base unit (factor 1, offset 0)")]
    MissingBaseUnit { domain: String },

    #[error("base unit '{unit}' is not registered in domain '{domain}'")]
    UnknownBaseUnit { domain: String, unit: String },

    #[error("base unit '{unit}' in domain '{domain}' must have factor 1 and offset 0")]
    InvalidBaseUnit { domain: String, unit: String },

    #[error("malformed unit table: {0}")]
    Table(String),
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Table(err.to_string())
    }
}

/// Structured error for callers of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorReport {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&ConvertError> for ErrorReport {
    fn from(err: &ConvertError) -> Self {
        let report = Self::new(err.code(), err.to_string());
        match err {
            ConvertError::InvalidInput { .. } => {
                report.with_suggestion("Pass a finite number; coerce empty input to 0 before converting")
            }
            ConvertError::DivisionByZero { .. } => {
                report.with_suggestion("Reciprocal units are undefined at zero; use a non-zero value")
            }
            _ => report,
        }
    }
}

impl From<&RegistryError> for ErrorReport {
    fn from(err: &RegistryError) -> Self {
        Self::new(codes::REGISTRY, err.to_string())
            .with_suggestion("Fix the unit table and restart")
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}
