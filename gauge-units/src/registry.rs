//! Unit registry - the immutable table of domains
//!
//! Built once, then only read. Holding no interior mutability, a
//! `&UnitRegistry` can be shared across threads freely.

use std::collections::HashMap;
use gauge_core::{ConvertError, RegistryError};
use crate::{Domain, DomainSpec};
use crate::table;

/// Registry of measurement domains
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    domains: Vec<Domain>,
    index: HashMap<String, usize>,
}

/// Collects domain specs and validates them into a [`UnitRegistry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    specs: Vec<DomainSpec>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, spec: DomainSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn with_domains(mut self, specs: impl IntoIterator<Item = DomainSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Validate every domain. The first problem found aborts the build.
    pub fn build(self) -> Result<UnitRegistry, RegistryError> {
        let mut domains = Vec::with_capacity(self.specs.len());
        let mut index = HashMap::with_capacity(self.specs.len());

        for spec in self.specs {
            let domain = Domain::from_spec(spec)?;
            if index.contains_key(domain.key()) {
                return Err(RegistryError::DuplicateDomain {
                    domain: domain.key().to_string(),
                });
            }
            index.insert(domain.key().to_string(), domains.len());
            domains.push(domain);
        }

        tracing::debug!(domains = domains.len(), "unit registry built");
        Ok(UnitRegistry { domains, index })
    }
}

impl UnitRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry with the reference table (15 domains)
    pub fn standard() -> Result<Self, RegistryError> {
        Self::from_specs(table::reference_table())
    }

    pub fn from_specs(specs: Vec<DomainSpec>) -> Result<Self, RegistryError> {
        RegistryBuilder::new().with_domains(specs).build()
    }

    /// Build from a JSON array of domain specs
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let specs: Vec<DomainSpec> = serde_json::from_str(json)?;
        Self::from_specs(specs)
    }

    /// Get a domain by key
    pub fn domain(&self, key: &str) -> Result<&Domain, ConvertError> {
        self.index
            .get(key)
            .map(|&i| &self.domains[i])
            .ok_or_else(|| ConvertError::unknown_domain(key))
    }

    /// Unit ids of a domain, in table order
    pub fn list_units(&self, key: &str) -> Result<Vec<&str>, ConvertError> {
        Ok(self.domain(key)?.unit_ids().collect())
    }

    /// All domains, in table order
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn domain_keys(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(Domain::key)
    }

    /// Serialize the registry back into a unit table
    pub fn to_json(&self) -> Result<String, RegistryError> {
        let specs: Vec<DomainSpec> = self.domains.iter().map(Domain::to_spec).collect();
        Ok(serde_json::to_string_pretty(&specs)?)
    }
}
