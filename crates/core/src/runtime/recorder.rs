//! Startup stage: replays what the build recorded once the container is ready.

use crate::build::ConfigMapping;
use crate::errors::StartupError;
use crate::runtime::mappings::{mappings_with_prefix, ConfigMappingWithPrefix};
use crate::runtime::resolver::{ConfigValueSource, TypeResolver};
use crate::runtime::validator::validate_properties;
use crate::steps::PropertyTypeMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Receives the startup calls recorded during the build
pub trait StartupRecorder {
    fn validate_config_properties(&mut self, properties: &PropertyTypeMap)
        -> Result<(), StartupError>;

    fn register_config_mappings(
        &mut self,
        mappings: &BTreeSet<ConfigMappingWithPrefix>,
    ) -> Result<(), StartupError>;
}

/// Proof that the container finished validating its component graph.
///
/// The startup plan can only be replayed with one of these in hand.
#[derive(Debug)]
pub struct ContainerReady {
    _private: (),
}

impl ContainerReady {
    /// Issued by the container once its component graph has been validated
    pub fn component_graph_validated() -> Self {
        Self { _private: () }
    }
}

/// Everything the startup stage needs, carried over from the build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupPlan {
    pub property_types: PropertyTypeMap,
    pub mappings: BTreeSet<ConfigMappingWithPrefix>,
}

impl StartupPlan {
    pub fn new(property_types: PropertyTypeMap, mappings: &[ConfigMapping]) -> Self {
        Self {
            property_types,
            mappings: mappings_with_prefix(mappings),
        }
    }

    /// Run property validation, then mapping registration
    pub fn replay<R: StartupRecorder + ?Sized>(
        &self,
        recorder: &mut R,
        _ready: &ContainerReady,
    ) -> Result<(), StartupError> {
        recorder.validate_config_properties(&self.property_types)?;
        recorder.register_config_mappings(&self.mappings)
    }
}

/// Default recorder backed by a type resolver and the configured values
#[derive(Debug)]
pub struct ConfigRecorder<R, V> {
    resolver: R,
    values: V,
    registered: BTreeSet<ConfigMappingWithPrefix>,
}

impl<R: TypeResolver, V: ConfigValueSource> ConfigRecorder<R, V> {
    pub fn new(resolver: R, values: V) -> Self {
        Self {
            resolver,
            values,
            registered: BTreeSet::new(),
        }
    }

    /// Mappings registered with the configuration subsystem so far
    pub fn registered_mappings(&self) -> &BTreeSet<ConfigMappingWithPrefix> {
        &self.registered
    }
}

impl<R: TypeResolver, V: ConfigValueSource> StartupRecorder for ConfigRecorder<R, V> {
    fn validate_config_properties(
        &mut self,
        properties: &PropertyTypeMap,
    ) -> Result<(), StartupError> {
        validate_properties(properties, &self.resolver, &self.values)
    }

    fn register_config_mappings(
        &mut self,
        mappings: &BTreeSet<ConfigMappingWithPrefix>,
    ) -> Result<(), StartupError> {
        for mapping in mappings {
            if mapping.interface.is_empty() {
                return Err(StartupError::MappingRegistration {
                    message: format!("mapping with prefix '{}' has no interface", mapping.prefix),
                });
            }
            tracing::debug!(
                "Registering config mapping {} with prefix '{}'",
                mapping.interface,
                mapping.prefix
            );
            self.registered.insert(mapping.clone());
        }
        Ok(())
    }
}
