//! Conversion topologies
//!
//! Every domain relates its units to one base unit through exactly one of
//! these rules. The rule is picked per domain, never per unit, so adding a
//! unit is a table edit and never a code change.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::Unit;

/// How a unit's value relates to the domain's base quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    /// `base = value * factor`
    Linear,
    /// `base = value / factor`; the table stores units per one base unit (currency)
    InvertedLinear,
    /// `base = factor / value`, except the base unit which is the identity (fuel economy)
    Reciprocal,
    /// `base = (value - offset) * factor` (temperature)
    Affine,
}

impl ConversionKind {
    /// Whether units of this kind may carry a non-zero offset
    pub fn allows_offset(self) -> bool {
        matches!(self, ConversionKind::Affine)
    }

    /// Normalize `value` expressed in `unit` to the base quantity.
    ///
    /// Returns `None` when the rule would divide by zero.
    pub fn to_base(self, unit: &Unit, is_base: bool, value: f64) -> Option<f64> {
        match self {
            ConversionKind::Linear => Some(value * unit.factor),
            ConversionKind::InvertedLinear => Some(value / unit.factor),
            ConversionKind::Reciprocal => reciprocal(unit.factor, is_base, value),
            ConversionKind::Affine => Some((value - unit.offset) * unit.factor),
        }
    }

    /// Denormalize a base quantity into `unit`. Inverse of [`to_base`](Self::to_base).
    ///
    /// Returns `None` when the rule would divide by zero.
    pub fn from_base(self, unit: &Unit, is_base: bool, base: f64) -> Option<f64> {
        match self {
            ConversionKind::Linear => Some(base / unit.factor),
            ConversionKind::InvertedLinear => Some(base * unit.factor),
            // factor / (factor / v) == v, so the reciprocal rule is its own inverse
            ConversionKind::Reciprocal => reciprocal(unit.factor, is_base, base),
            ConversionKind::Affine => Some(base / unit.factor + unit.offset),
        }
    }
}

fn reciprocal(factor: f64, is_base: bool, value: f64) -> Option<f64> {
    if is_base {
        Some(value)
    } else if value == 0.0 {
        None
    } else {
        Some(factor / value)
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConversionKind::Linear => "linear",
            ConversionKind::InvertedLinear => "inverted_linear",
            ConversionKind::Reciprocal => "reciprocal",
            ConversionKind::Affine => "affine",
        };
        write!(f, "{}", name)
    }
}
