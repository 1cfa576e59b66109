use crate::metadata::{ConfigPhase, TypeName};
use thiserror::Error;

/// Errors that abort the build-time binding pass
#[derive(Debug, Error)]
pub enum BinderError {
    #[error("Unsupported injection point target: {target}")]
    UnsupportedInjectionTarget { target: String },

    #[error("The class ({class_name}) cannot be created during deployment: {source}")]
    ClassLoading {
        class_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config mapping generation failed for '{interface}': {message}")]
    MappingGeneration { interface: String, message: String },

    #[error("Invalid metadata snapshot: {message}")]
    InvalidSnapshot { message: String },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BinderError {
    /// Create an unsupported injection target error
    pub fn unsupported_injection_target(target: impl Into<String>) -> Self {
        Self::UnsupportedInjectionTarget {
            target: target.into(),
        }
    }

    /// Wrap a class loading failure with the offending class name
    pub fn class_loading(
        class_name: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::ClassLoading {
            class_name: class_name.into(),
            source,
        }
    }

    /// Create a mapping generation error
    pub fn mapping_generation(interface: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MappingGeneration {
            interface: interface.into(),
            message: message.into(),
        }
    }

    /// Create an invalid snapshot error
    pub fn invalid_snapshot(message: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            message: message.into(),
        }
    }

    /// Check if the error is an unsupported injection target
    pub fn is_unsupported_target(&self) -> bool {
        matches!(self, Self::UnsupportedInjectionTarget { .. })
    }

    /// Check if the error is a class loading failure
    pub fn is_class_loading(&self) -> bool {
        matches!(self, Self::ClassLoading { .. })
    }
}

/// Failure raised when a component instance cannot be created
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreationError {
    #[error("Config root [{class}] with config phase [{phase}] not initialized yet.")]
    RootNotInitialized { class: TypeName, phase: ConfigPhase },

    #[error("Config root [{class}] holds a value of an unexpected type")]
    RootTypeMismatch { class: TypeName },
}

impl CreationError {
    /// Check if the root has simply not been populated yet
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, Self::RootNotInitialized { .. })
    }
}

/// A single problem found while validating a configuration property at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyProblem {
    /// No value is configured for the property
    Missing { property: String, type_name: String },
    /// The expected type of the property cannot be resolved by name
    UnknownType { property: String, type_name: String },
    /// A value exists but cannot be converted to the expected type
    Conversion {
        property: String,
        type_name: String,
        message: String,
    },
}

impl PropertyProblem {
    pub fn property(&self) -> &str {
        match self {
            Self::Missing { property, .. }
            | Self::UnknownType { property, .. }
            | Self::Conversion { property, .. } => property,
        }
    }
}

impl std::fmt::Display for PropertyProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing {
                property,
                type_name,
            } => write!(
                f,
                "Configuration property '{}' of type {} is required but has no value",
                property, type_name
            ),
            Self::UnknownType {
                property,
                type_name,
            } => write!(
                f,
                "Type {} required by configuration property '{}' cannot be resolved",
                type_name, property
            ),
            Self::Conversion {
                property,
                type_name,
                message,
            } => write!(
                f,
                "Configuration property '{}' cannot be converted to {}: {}",
                property, type_name, message
            ),
        }
    }
}

/// Errors raised by the startup stage
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration validation failed {}", format_problems(.problems))]
    InvalidProperties { problems: Vec<PropertyProblem> },

    #[error("Config mapping registration failed: {message}")]
    MappingRegistration { message: String },
}

impl StartupError {
    /// All property problems carried by this error
    pub fn problems(&self) -> &[PropertyProblem] {
        match self {
            Self::InvalidProperties { problems } => problems,
            Self::MappingRegistration { .. } => &[],
        }
    }
}

fn format_problems(problems: &[PropertyProblem]) -> String {
    let lines: Vec<String> = problems.iter().map(|p| format!("\n  - {}", p)).collect();
    format!("({} problem(s)):{}", problems.len(), lines.concat())
}
