use crate::config::validation::{validate_qualified_name, ConfigError};
use crate::metadata::TypeName;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

const ENV_PROPERTY_QUALIFIER: &str = "ELIF_BINDER_PROPERTY_QUALIFIER";
const ENV_MAPPING_ANNOTATION: &str = "ELIF_BINDER_MAPPING_ANNOTATION";
const ENV_UNCONFIGURED_VALUE: &str = "ELIF_BINDER_UNCONFIGURED_VALUE";
const ENV_PRODUCER: &str = "ELIF_BINDER_PRODUCER";
const ENV_BEAN_CREATOR: &str = "ELIF_BINDER_BEAN_CREATOR";
const ENV_MAPPING_CREATOR: &str = "ELIF_BINDER_MAPPING_CREATOR";
const ENV_LOG_LEVEL: &str = "ELIF_BINDER_LOG_LEVEL";

/// Well-known names the binding pass looks for and emits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// Qualifier marking a configuration property injection point
    pub property_qualifier: TypeName,
    /// Annotation declaring a configuration mapping interface
    pub mapping_annotation: TypeName,
    /// Default value meaning "no default configured"
    pub unconfigured_value: String,
    /// Built-in component producing covered configuration values
    pub producer_component: TypeName,
    /// Creator for synthetic config value components; also backs array types
    pub bean_creator: TypeName,
    /// Creator instantiating generated mapping implementations
    pub mapping_creator: TypeName,
    pub log_level: String,
}

impl BinderConfig {
    pub fn new() -> Self {
        Self {
            property_qualifier: TypeName::new("elif.config.ConfigProperty"),
            mapping_annotation: TypeName::new("elif.config.ConfigMapping"),
            unconfigured_value: "elif.config.property.unconfigured".to_string(),
            producer_component: TypeName::new("elif.config.inject.ConfigProducer"),
            bean_creator: TypeName::new("elif.config.runtime.ConfigBeanCreator"),
            mapping_creator: TypeName::new("elif.config.runtime.ConfigMappingCreator"),
            log_level: "info".to_string(),
        }
    }

    /// Load defaults overridden by `ELIF_BINDER_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Ok(value) = env::var(ENV_PROPERTY_QUALIFIER) {
            config.property_qualifier = TypeName::new(value);
        }
        if let Ok(value) = env::var(ENV_MAPPING_ANNOTATION) {
            config.mapping_annotation = TypeName::new(value);
        }
        if let Ok(value) = env::var(ENV_UNCONFIGURED_VALUE) {
            config.unconfigured_value = value;
        }
        if let Ok(value) = env::var(ENV_PRODUCER) {
            config.producer_component = TypeName::new(value);
        }
        if let Ok(value) = env::var(ENV_BEAN_CREATOR) {
            config.bean_creator = TypeName::new(value);
        }
        if let Ok(value) = env::var(ENV_MAPPING_CREATOR) {
            config.mapping_creator = TypeName::new(value);
        }
        if let Ok(value) = env::var(ENV_LOG_LEVEL) {
            config.log_level = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML; missing keys keep their defaults
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_qualified_name("property_qualifier", self.property_qualifier.as_str())?;
        validate_qualified_name("mapping_annotation", self.mapping_annotation.as_str())?;
        validate_qualified_name("producer_component", self.producer_component.as_str())?;
        validate_qualified_name("bean_creator", self.bean_creator.as_str())?;
        validate_qualified_name("mapping_creator", self.mapping_creator.as_str())?;

        if self.unconfigured_value.is_empty() {
            return Err(ConfigError::missing_required(
                "unconfigured_value",
                "The sentinel must differ from an empty default value",
            ));
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::invalid_value(
                "log_level",
                &self.log_level,
                "trace, debug, info, warn or error",
            )),
        }
    }
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_yaml_keeps_defaults() {
        let config = BinderConfig::from_yaml("mapping_annotation: org.acme.Mapping\n").unwrap();
        assert_eq!(config.mapping_annotation.as_str(), "org.acme.Mapping");
        assert_eq!(config.property_qualifier, BinderConfig::new().property_qualifier);
    }

    #[test]
    fn test_invalid_log_level() {
        let result = BinderConfig::from_yaml("log_level: loud\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        env::set_var(ENV_PROPERTY_QUALIFIER, "org.acme.Value");
        env::set_var(ENV_LOG_LEVEL, "debug");

        let config = BinderConfig::from_env().unwrap();
        assert_eq!(config.property_qualifier.as_str(), "org.acme.Value");
        assert_eq!(config.log_level, "debug");

        env::remove_var(ENV_PROPERTY_QUALIFIER);
        env::remove_var(ENV_LOG_LEVEL);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_blank_names() {
        env::set_var(ENV_BEAN_CREATOR, " ");
        assert!(BinderConfig::from_env().is_err());
        env::remove_var(ENV_BEAN_CREATOR);
    }
}
