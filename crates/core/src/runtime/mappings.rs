use crate::build::ConfigMapping;
use crate::metadata::TypeName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Runtime registration value for a mapping interface and its prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigMappingWithPrefix {
    pub interface: TypeName,
    pub prefix: String,
}

impl ConfigMappingWithPrefix {
    pub fn new(interface: impl Into<TypeName>, prefix: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            prefix: prefix.into(),
        }
    }
}

impl From<&ConfigMapping> for ConfigMappingWithPrefix {
    fn from(mapping: &ConfigMapping) -> Self {
        Self::new(mapping.interface.clone(), mapping.prefix.clone())
    }
}

/// Distinct (interface, prefix) pairs of the given mappings
pub fn mappings_with_prefix(mappings: &[ConfigMapping]) -> BTreeSet<ConfigMappingWithPrefix> {
    mappings.iter().map(ConfigMappingWithPrefix::from).collect()
}
