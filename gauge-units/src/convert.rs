//! Conversion engine
//!
//! Two phases per call: normalize the source value to the domain's base
//! quantity, then denormalize that one base value into every unit. Any two
//! units are therefore always related through the same base representation.
//!
//! Calls are all-or-nothing: a single degenerate unit fails the whole call.

use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use gauge_core::{ConvertError, ErrorReport};
use crate::{Domain, Unit, UnitRegistry};

/// One converted value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Converted {
    pub unit: String,
    pub label: String,
    pub value: f64,
}

/// Result of [`convert_all`]: every unit of a domain, in table order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversions {
    pub domain: String,
    pub source_unit: String,
    pub source_value: f64,
    pub results: Vec<Converted>,
}

impl Conversions {
    /// Converted value for `unit`
    pub fn get(&self, unit: &str) -> Option<f64> {
        self.results.iter().find(|c| c.unit == unit).map(|c| c.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Converted> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Unit id to value, dropping order
    pub fn to_map(&self) -> HashMap<String, f64> {
        self.results.iter().map(|c| (c.unit.clone(), c.value)).collect()
    }
}

impl<'a> IntoIterator for &'a Conversions {
    type Item = &'a Converted;
    type IntoIter = std::slice::Iter<'a, Converted>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// One entry of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub domain: String,
    pub unit: String,
    pub value: f64,
}

impl ConversionRequest {
    pub fn new(domain: &str, unit: &str, value: f64) -> Self {
        ConversionRequest {
            domain: domain.to_string(),
            unit: unit.to_string(),
            value,
        }
    }
}

// ============ convert_all ============

/// Convert `value` expressed in `unit` into every unit of `domain`.
pub fn convert_all(
    registry: &UnitRegistry,
    domain: &str,
    unit: &str,
    value: f64,
) -> Result<Conversions, ConvertError> {
    let result = try_convert_all(registry, domain, unit, value);
    if let Err(ref e) = result {
        tracing::debug!(domain, unit, value, error = %e, "conversion failed");
    }
    result
}

fn try_convert_all(
    registry: &UnitRegistry,
    domain_key: &str,
    unit_id: &str,
    value: f64,
) -> Result<Conversions, ConvertError> {
    let domain = registry.domain(domain_key)?;
    let source = lookup_unit(domain, unit_id)?;
    let base = normalize(domain, source, value)?;

    let results = domain
        .units()
        .iter()
        .map(|target| -> Result<Converted, ConvertError> {
            Ok(Converted {
                unit: target.id.clone(),
                label: target.label.clone(),
                value: denormalize(domain, target, base)?,
            })
        })
        .collect::<Result<Vec<_>, ConvertError>>()?;

    tracing::trace!(domain = domain_key, unit = unit_id, value, base, "converted");

    Ok(Conversions {
        domain: domain.key().to_string(),
        source_unit: source.id.clone(),
        source_value: value,
        results,
    })
}

// ============ convert ============

/// Convert `value` from one unit to another within `domain`.
pub fn convert(
    registry: &UnitRegistry,
    domain: &str,
    from: &str,
    to: &str,
    value: f64,
) -> Result<f64, ConvertError> {
    let result = registry.domain(domain).and_then(|d| {
        let source = lookup_unit(d, from)?;
        let target = lookup_unit(d, to)?;
        let base = normalize(d, source, value)?;
        denormalize(d, target, base)
    });
    if let Err(ref e) = result {
        tracing::debug!(domain, from, to, value, error = %e, "conversion failed");
    }
    result
}

// ============ convert_batch ============

/// Run independent [`convert_all`] calls. One failure never affects the others.
pub fn convert_batch(
    registry: &UnitRegistry,
    requests: &[ConversionRequest],
) -> Vec<Result<Conversions, ConvertError>> {
    requests
        .iter()
        .map(|r| convert_all(registry, &r.domain, &r.unit, r.value))
        .collect()
}

// ============ helpers ============

fn lookup_unit<'d>(domain: &'d Domain, id: &str) -> Result<&'d Unit, ConvertError> {
    domain
        .unit(id)
        .ok_or_else(|| ConvertError::unknown_unit(domain.key(), id))
}

fn normalize(domain: &Domain, unit: &Unit, value: f64) -> Result<f64, ConvertError> {
    if !value.is_finite() {
        return Err(ConvertError::InvalidInput { value });
    }
    let base = domain
        .kind()
        .to_base(unit, domain.is_base(unit), value)
        .ok_or_else(|| ConvertError::division_by_zero(domain.key(), &unit.id))?;
    if !base.is_finite() {
        return Err(ConvertError::overflow(domain.key(), &unit.id));
    }
    Ok(base)
}

fn denormalize(domain: &Domain, unit: &Unit, base: f64) -> Result<f64, ConvertError> {
    let value = domain
        .kind()
        .from_base(unit, domain.is_base(unit), base)
        .ok_or_else(|| ConvertError::division_by_zero(domain.key(), &unit.id))?;
    if !value.is_finite() {
        return Err(ConvertError::overflow(domain.key(), &unit.id));
    }
    Ok(value)
}

/// Build an [`ErrorReport`] that names the valid choices for unknown keys
pub fn error_report(registry: &UnitRegistry, err: &ConvertError) -> ErrorReport {
    let report = ErrorReport::from(err);
    match err {
        ConvertError::UnknownDomain { .. } => {
            let keys: Vec<&str> = registry.domain_keys().collect();
            report.with_suggestion(format!("Valid domains: {}", keys.join(", ")))
        }
        ConvertError::UnknownUnit { domain, .. } => match registry.list_units(domain) {
            Ok(units) => report.with_suggestion(format!("Valid units: {}", units.join(", "))),
            Err(_) => report,
        },
        _ => report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_core::{approx_eq, DEFAULT_TOLERANCE};

    fn registry() -> UnitRegistry {
        UnitRegistry::standard().unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            approx_eq(actual, expected, DEFAULT_TOLERANCE),
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_length() {
        let reg = registry();
        let result = convert_all(&reg, "length", "km", 1.0).unwrap();
        assert_close(result.get("m").unwrap(), 1000.0);
        assert_close(result.get("mi").unwrap(), 1000.0 / 1609.344);
        assert_close(result.get("km").unwrap(), 1.0);
        assert_eq!(result.len(), 11);
    }

    #[test]
    fn test_results_follow_table_order() {
        let reg = registry();
        let result = convert_all(&reg, "fuel", "L_100km", 5.0).unwrap();
        let units: Vec<&str> = result.iter().map(|c| c.unit.as_str()).collect();
        assert_eq!(units, reg.list_units("fuel").unwrap());
        assert_eq!(result.results[1].label, "Miles/gallon (US)");
    }

    #[test]
    fn test_affine_anchors() {
        let reg = registry();
        let from_c = convert_all(&reg, "temperature", "C", 0.0).unwrap();
        assert_close(from_c.get("F").unwrap(), 32.0);
        assert_close(from_c.get("K").unwrap(), 273.15);
        assert_close(from_c.get("R").unwrap(), 491.67);

        let from_f = convert_all(&reg, "temperature", "F", 212.0).unwrap();
        assert_close(from_f.get("C").unwrap(), 100.0);
        assert_close(from_f.get("K").unwrap(), 373.15);
    }

    #[test]
    fn test_negative_temperatures() {
        let reg = registry();
        let result = convert_all(&reg, "temperature", "C", -40.0).unwrap();
        assert_close(result.get("F").unwrap(), -40.0);
        let result = convert_all(&reg, "temperature", "K", 0.0).unwrap();
        assert_close(result.get("C").unwrap(), -273.15);
        assert_close(result.get("R").unwrap(), 0.0);
    }

    #[test]
    fn test_currency_direction() {
        let reg = registry();
        let rate = reg.domain("currency").unwrap().unit("EUR").unwrap().factor;

        let from_usd = convert_all(&reg, "currency", "USD", 1.0).unwrap();
        assert_close(from_usd.get("EUR").unwrap(), rate);

        let from_eur = convert_all(&reg, "currency", "EUR", rate).unwrap();
        assert_close(from_eur.get("USD").unwrap(), 1.0);
    }

    #[test]
    fn test_currency_cross_rate() {
        let reg = registry();
        // 145 JPY per USD, 0.82 GBP per USD
        let result = convert(&reg, "currency", "GBP", "JPY", 0.82).unwrap();
        assert_close(result, 145.0);
    }

    #[test]
    fn test_fuel_reciprocal() {
        let reg = registry();
        let result = convert_all(&reg, "fuel", "km_L", 20.0).unwrap();
        assert_close(result.get("L_100km").unwrap(), 5.0);
        assert_close(result.get("km_L").unwrap(), 20.0);
        assert_close(result.get("mpg_us").unwrap(), 235.215 / 5.0);
    }

    #[test]
    fn test_fuel_zero_guard() {
        let reg = registry();
        assert_eq!(
            convert_all(&reg, "fuel", "mpg_us", 0.0).unwrap_err(),
            ConvertError::division_by_zero("fuel", "mpg_us")
        );
        // zero in the base unit cannot be expressed in the reciprocal units either
        assert!(matches!(
            convert_all(&reg, "fuel", "L_100km", 0.0).unwrap_err(),
            ConvertError::DivisionByZero { .. }
        ));
    }

    #[test]
    fn test_unknown_inputs() {
        let reg = registry();
        assert_eq!(
            convert_all(&reg, "length", "parsec", 1.0).unwrap_err(),
            ConvertError::unknown_unit("length", "parsec")
        );
        assert_eq!(
            convert_all(&reg, "not-a-domain", "m", 1.0).unwrap_err(),
            ConvertError::unknown_domain("not-a-domain")
        );
        // units do not leak across domains
        assert!(matches!(
            convert_all(&reg, "weight", "m", 1.0).unwrap_err(),
            ConvertError::UnknownUnit { .. }
        ));
    }

    #[test]
    fn test_non_finite_input() {
        let reg = registry();
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                convert_all(&reg, "length", "m", value).unwrap_err(),
                ConvertError::InvalidInput { .. }
            ));
        }
    }

    #[test]
    fn test_lookup_errors_come_before_input_checks() {
        let reg = registry();
        assert_eq!(
            convert_all(&reg, "length", "parsec", f64::NAN).unwrap_err(),
            ConvertError::unknown_unit("length", "parsec")
        );
        assert_eq!(
            convert_all(&reg, "not-a-domain", "parsec", f64::INFINITY).unwrap_err(),
            ConvertError::unknown_domain("not-a-domain")
        );
        // unknown unit wins over the reciprocal zero guard too
        assert_eq!(
            convert_all(&reg, "fuel", "furlongs", 0.0).unwrap_err(),
            ConvertError::unknown_unit("fuel", "furlongs")
        );
    }

    #[test]
    fn test_overflow() {
        let reg = registry();
        assert_eq!(
            convert_all(&reg, "length", "km", f64::MAX).unwrap_err(),
            ConvertError::overflow("length", "km")
        );
        assert!(matches!(
            convert_all(&reg, "length", "m", f64::MAX).unwrap_err(),
            ConvertError::Overflow { .. }
        ));
    }

    #[test]
    fn test_convert_pair() {
        let reg = registry();
        assert_close(convert(&reg, "weight", "lb", "kg", 1.0).unwrap(), 0.45359237);
        assert_close(convert(&reg, "data", "B", "bit", 3.0).unwrap(), 24.0);
        assert_close(convert(&reg, "angle", "rad", "deg", std::f64::consts::PI).unwrap(), 180.0);
        assert!(convert(&reg, "weight", "lb", "parsec", 1.0).is_err());
    }

    #[test]
    fn test_convert_pair_to_base_from_zero() {
        let reg = registry();
        assert_eq!(
            convert(&reg, "fuel", "km_L", "L_100km", 0.0).unwrap_err(),
            ConvertError::division_by_zero("fuel", "km_L")
        );
        assert_close(convert(&reg, "fuel", "L_100km", "L_100km", 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_batch_is_independent() {
        let reg = registry();
        let requests = vec![
            ConversionRequest::new("length", "m", 1.0),
            ConversionRequest::new("fuel", "mpg_us", 0.0),
            ConversionRequest::new("temperature", "C", 100.0),
        ];
        let results = convert_batch(&reg, &requests);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_close(results[2].as_ref().unwrap().get("F").unwrap(), 212.0);
    }

    #[test]
    fn test_conversions_serialize_in_order() {
        let reg = registry();
        let result = convert_all(&reg, "frequency", "kHz", 1.0).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["domain"], "frequency");
        assert_eq!(json["results"][0]["unit"], "Hz");
        assert_eq!(json["results"][0]["value"], 1000.0);
    }

    #[test]
    fn test_to_map() {
        let reg = registry();
        let map = convert_all(&reg, "time", "h", 1.0).unwrap().to_map();
        assert_close(map["s"], 3600.0);
        assert_close(map["min"], 60.0);
    }

    #[test]
    fn test_error_report_suggestions() {
        let reg = registry();
        let err = convert_all(&reg, "length", "parsec", 1.0).unwrap_err();
        let report = error_report(&reg, &err);
        assert_eq!(report.code, "UNKNOWN_UNIT");
        assert!(report.suggestion.unwrap().contains("nmi"));

        let err = convert_all(&reg, "lenght", "m", 1.0).unwrap_err();
        let report = error_report(&reg, &err);
        assert!(report.suggestion.unwrap().contains("length"));
    }
}
