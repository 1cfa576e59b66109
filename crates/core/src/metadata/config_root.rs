use crate::metadata::TypeName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// When the values of a configuration root are materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigPhase {
    /// Only visible to the build, never at runtime
    BuildOnly,
    /// Fixed at build time and readable at runtime
    BuildAndRuntimeFixed,
    /// Read during the runtime configuration phase
    Runtime,
}

impl ConfigPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigPhase::BuildOnly => "BUILD_ONLY",
            ConfigPhase::BuildAndRuntimeFixed => "BUILD_AND_RUNTIME_FIXED",
            ConfigPhase::Runtime => "RUNTIME",
        }
    }

    /// Roots of this phase exist at runtime and may be injected
    pub fn is_runtime_visible(&self) -> bool {
        matches!(
            self,
            ConfigPhase::BuildAndRuntimeFixed | ConfigPhase::Runtime
        )
    }
}

impl fmt::Display for ConfigPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared configuration root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRoot {
    pub class: TypeName,
    pub phase: ConfigPhase,
}

impl ConfigRoot {
    pub fn new(class: impl Into<TypeName>, phase: ConfigPhase) -> Self {
        Self {
            class: class.into(),
            phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_visibility() {
        assert!(!ConfigPhase::BuildOnly.is_runtime_visible());
        assert!(ConfigPhase::BuildAndRuntimeFixed.is_runtime_visible());
        assert!(ConfigPhase::Runtime.is_runtime_visible());
    }

    #[test]
    fn test_phase_serde_names() {
        let phase: ConfigPhase = serde_yaml::from_str("BUILD_AND_RUNTIME_FIXED").unwrap();
        assert_eq!(phase, ConfigPhase::BuildAndRuntimeFixed);
        assert_eq!(phase.to_string(), "BUILD_AND_RUNTIME_FIXED");
    }
}
