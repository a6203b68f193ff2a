//! Unit definition with its conversion factor

use std::fmt;
use serde::{Serialize, Deserialize};
use gauge_core::RegistryError;
use crate::ConversionKind;

/// A unit registered in a domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Identifier, unique within its domain (e.g. "km", "mpg_us")
    pub id: String,
    /// Display name, passed through untouched (e.g. "Kilometer (km)")
    pub label: String,
    /// Scale factor; its meaning depends on the domain's [`ConversionKind`]
    pub factor: f64,
    /// Zero point for affine units, expressed in this unit
    #[serde(default, skip_serializing_if = "is_zero")]
    pub offset: f64,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl Unit {
    /// Create a unit with a plain scale factor
    pub fn new(id: &str, label: &str, factor: f64) -> Self {
        Unit {
            id: id.to_string(),
            label: label.to_string(),
            factor,
            offset: 0.0,
        }
    }

    /// Create a unit with an offset (for affine scales such as Fahrenheit)
    pub fn with_offset(id: &str, label: &str, factor: f64, offset: f64) -> Self {
        Unit {
            id: id.to_string(),
            label: label.to_string(),
            factor,
            offset,
        }
    }

    /// Check if converting to the base quantity leaves values unchanged
    pub fn is_identity(&self) -> bool {
        self.factor == 1.0 && self.offset == 0.0
    }

    /// Check the unit's numbers against the rules of `kind`
    pub(crate) fn validate(&self, domain: &str, kind: ConversionKind) -> Result<(), RegistryError> {
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(RegistryError::InvalidFactor {
                domain: domain.to_string(),
                unit: self.id.clone(),
                factor: self.factor,
            });
        }
        if !self.offset.is_finite() || (self.offset != 0.0 && !kind.allows_offset()) {
            return Err(RegistryError::InvalidOffset {
                domain: domain.to_string(),
                unit: self.id.clone(),
                offset: self.offset,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
