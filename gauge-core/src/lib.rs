//! Gauge Core - Shared types for the conversion engine
//!
//! Contains:
//! - `ConvertError`: failures of a single conversion call
//! - `RegistryError`: failures while building a unit registry
//! - `ErrorReport`: machine-readable error form for callers
//! - Float comparison helpers

pub mod error;
pub mod float;

pub use error::{codes, ConvertError, ErrorReport, RegistryError};
pub use float::{approx_eq, DEFAULT_TOLERANCE};
