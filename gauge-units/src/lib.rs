//! Gauge Units - Measurement Unit Registry and Conversion Engine
//!
//! Converts a value expressed in one unit into every other unit of its
//! measurement domain. Each domain relates its units to a single base unit
//! through one of four rules (see [`ConversionKind`]):
//! - Linear (length, weight, volume, area, time, speed, pressure, energy,
//!   power, angle, data, frequency)
//! - Affine (temperature)
//! - InvertedLinear (currency)
//! - Reciprocal (fuel economy)
//!
//! The registry is an immutable value built once from a table; the engine
//! is a set of pure functions over it.
//!
//! ```
//! use gauge_units::{convert_all, UnitRegistry};
//!
//! let registry = UnitRegistry::standard().unwrap();
//! let result = convert_all(&registry, "temperature", "C", 100.0).unwrap();
//! assert!((result.get("F").unwrap() - 212.0).abs() < 1e-9);
//! ```

mod kind;
mod unit;
mod domain;
mod registry;
mod table;
mod convert;

pub use kind::ConversionKind;
pub use unit::Unit;
pub use domain::{Domain, DomainSpec};
pub use registry::{RegistryBuilder, UnitRegistry};
pub use table::reference_table;
pub use convert::{
    convert, convert_all, convert_batch, error_report, ConversionRequest, Conversions, Converted,
};

pub use gauge_core::{ConvertError, ErrorReport, RegistryError};
