//! Measurement domains: a set of mutually convertible units

use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use gauge_core::RegistryError;
use crate::{ConversionKind, Unit};

/// Declarative description of a domain, as written in a unit table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSpec {
    pub key: String,
    pub label: String,
    pub kind: ConversionKind,
    /// Base unit id; defaults to the first identity unit. Affine domains may
    /// leave the base quantity out of the table entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    pub units: Vec<Unit>,
}

impl DomainSpec {
    pub fn new(key: &str, label: &str, kind: ConversionKind) -> Self {
        DomainSpec {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            base: None,
            units: Vec::new(),
        }
    }

    /// Builder: name the base unit explicitly
    pub fn with_base(mut self, unit: &str) -> Self {
        self.base = Some(unit.to_string());
        self
    }

    /// Builder: append a unit with a plain factor
    pub fn unit(mut self, id: &str, label: &str, factor: f64) -> Self {
        self.units.push(Unit::new(id, label, factor));
        self
    }

    /// Builder: append an affine unit
    pub fn affine_unit(mut self, id: &str, label: &str, factor: f64, offset: f64) -> Self {
        self.units.push(Unit::with_offset(id, label, factor, offset));
        self
    }
}

/// A validated domain. Units keep their table order.
#[derive(Debug, Clone)]
pub struct Domain {
    key: String,
    label: String,
    kind: ConversionKind,
    units: Vec<Unit>,
    index: HashMap<String, usize>,
    base: Option<usize>,
}

impl Domain {
    /// Validate a spec and build the domain
    pub fn from_spec(spec: DomainSpec) -> Result<Self, RegistryError> {
        let DomainSpec { key, label, kind, base, units } = spec;

        if units.is_empty() {
            return Err(RegistryError::EmptyDomain { domain: key });
        }

        let mut index = HashMap::with_capacity(units.len());
        for (i, unit) in units.iter().enumerate() {
            unit.validate(&key, kind)?;
            if index.insert(unit.id.clone(), i).is_some() {
                return Err(RegistryError::DuplicateUnit {
                    domain: key,
                    unit: unit.id.clone(),
                });
            }
        }

        let base = match base {
            Some(id) => {
                let i = *index.get(&id).ok_or_else(|| RegistryError::UnknownBaseUnit {
                    domain: key.clone(),
                    unit: id.clone(),
                })?;
                if !units[i].is_identity() {
                    return Err(RegistryError::InvalidBaseUnit { domain: key, unit: id });
                }
                Some(i)
            }
            // Affine units carry their own offset rule, so the base quantity
            // need not be a listed unit
            None => match units.iter().position(Unit::is_identity) {
                Some(i) => Some(i),
                None if kind == ConversionKind::Affine => None,
                None => return Err(RegistryError::MissingBaseUnit { domain: key }),
            },
        };

        Ok(Domain { key, label, kind, units, index, base })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ConversionKind {
        self.kind
    }

    /// Units in table order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Look up a unit by id
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.index.get(id).map(|&i| &self.units[i])
    }

    /// The identity unit, if the domain lists one. Always present outside
    /// Affine domains.
    pub fn base_unit(&self) -> Option<&Unit> {
        self.base.map(|i| &self.units[i])
    }

    pub fn is_base(&self, unit: &Unit) -> bool {
        self.base_unit().is_some_and(|base| base.id == unit.id)
    }

    /// Unit ids in table order
    pub fn unit_ids(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|u| u.id.as_str())
    }

    /// Turn the domain back into its declarative form
    pub fn to_spec(&self) -> DomainSpec {
        DomainSpec {
            key: self.key.clone(),
            label: self.label.clone(),
            kind: self.kind,
            base: self.base_unit().map(|u| u.id.clone()),
            units: self.units.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fuel() -> DomainSpec {
        DomainSpec::new("fuel", "Fuel economy", ConversionKind::Reciprocal)
            .unit("mpg_us", "Miles/gallon (US)", 235.215)
            .unit("L_100km", "Liters/100km", 1.0)
            .unit("km_L", "Kilometers/liter", 100.0)
    }

    #[test]
    fn test_default_base_is_first_identity() {
        let domain = Domain::from_spec(fuel()).unwrap();
        assert_eq!(domain.base_unit().unwrap().id, "L_100km");
        assert!(domain.is_base(domain.unit("L_100km").unwrap()));
        assert!(!domain.is_base(domain.unit("mpg_us").unwrap()));
    }

    #[test]
    fn test_preserves_order() {
        let domain = Domain::from_spec(fuel()).unwrap();
        let ids: Vec<&str> = domain.unit_ids().collect();
        assert_eq!(ids, vec!["mpg_us", "L_100km", "km_L"]);
    }

    #[test]
    fn test_explicit_base() {
        let spec = DomainSpec::new("data", "Data", ConversionKind::Linear)
            .unit("KB", "Kilobyte", 8192.0)
            .unit("bit", "Bit", 1.0)
            .with_base("bit");
        assert_eq!(Domain::from_spec(spec).unwrap().base_unit().unwrap().id, "bit");

        let spec = DomainSpec::new("data", "Data", ConversionKind::Linear)
            .unit("bit", "Bit", 1.0)
            .with_base("KB");
        assert!(matches!(
            Domain::from_spec(spec).unwrap_err(),
            RegistryError::UnknownBaseUnit { .. }
        ));

        let spec = DomainSpec::new("data", "Data", ConversionKind::Linear)
            .unit("bit", "Bit", 1.0)
            .unit("B", "Byte", 8.0)
            .with_base("B");
        assert!(matches!(
            Domain::from_spec(spec).unwrap_err(),
            RegistryError::InvalidBaseUnit { .. }
        ));
    }

    #[test]
    fn test_missing_base() {
        let spec = DomainSpec::new("length", "Length", ConversionKind::Linear)
            .unit("km", "Kilometer", 1000.0);
        assert_eq!(
            Domain::from_spec(spec).unwrap_err(),
            RegistryError::MissingBaseUnit { domain: "length".to_string() }
        );
    }

    #[test]
    fn test_affine_without_identity_unit() {
        let spec = DomainSpec::new("temp", "Temperature", ConversionKind::Affine)
            .affine_unit("F", "Fahrenheit", 5.0 / 9.0, 32.0)
            .affine_unit("K", "Kelvin", 1.0, 273.15);
        let domain = Domain::from_spec(spec).unwrap();
        assert!(domain.base_unit().is_none());
        assert!(!domain.is_base(domain.unit("K").unwrap()));
        assert_eq!(domain.to_spec().base, None);

        // An explicit base must still exist and be the identity
        let spec = DomainSpec::new("temp", "Temperature", ConversionKind::Affine)
            .affine_unit("K", "Kelvin", 1.0, 273.15)
            .with_base("K");
        assert!(matches!(
            Domain::from_spec(spec).unwrap_err(),
            RegistryError::InvalidBaseUnit { .. }
        ));
    }

    #[test]
    fn test_empty_and_duplicate() {
        let spec = DomainSpec::new("length", "Length", ConversionKind::Linear);
        assert!(matches!(Domain::from_spec(spec).unwrap_err(), RegistryError::EmptyDomain { .. }));

        let spec = DomainSpec::new("length", "Length", ConversionKind::Linear)
            .unit("m", "Meter", 1.0)
            .unit("m", "Metre", 1.0);
        assert_eq!(
            Domain::from_spec(spec).unwrap_err(),
            RegistryError::DuplicateUnit { domain: "length".to_string(), unit: "m".to_string() }
        );
    }

    #[test]
    fn test_to_spec_names_base() {
        let domain = Domain::from_spec(fuel()).unwrap();
        let spec = domain.to_spec();
        assert_eq!(spec.base.as_deref(), Some("L_100km"));
        assert_eq!(spec.units.len(), 3);
    }
}
