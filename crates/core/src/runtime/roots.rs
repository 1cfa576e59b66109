//! Runtime access to materialized configuration roots.

use crate::build::{ComponentCreator, SyntheticComponent};
use crate::errors::CreationError;
use crate::metadata::{ConfigPhase, TypeName};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

pub type RootInstance = Arc<dyn Any + Send + Sync>;

/// Well-known location holding the materialized value of each config root.
///
/// Build-and-runtime-fixed roots are filled during static initialization,
/// runtime roots only once the runtime configuration phase has run.
#[derive(Default)]
pub struct RootSlots {
    slots: RwLock<HashMap<TypeName, RootInstance>>,
}

impl std::fmt::Debug for RootSlots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("RootSlots")
            .field("populated", &slots.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RootSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the materialized root value
    pub fn set<T: Any + Send + Sync>(&self, class: impl Into<TypeName>, value: T) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(class.into(), Arc::new(value));
    }

    pub fn clear(&self, class: &TypeName) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(class);
    }

    pub fn get(&self, class: &TypeName) -> Option<RootInstance> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(class)
            .cloned()
    }
}

/// Creator behind a config root component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRootCreator {
    pub root: TypeName,
    pub phase: ConfigPhase,
}

impl ConfigRootCreator {
    pub fn new(root: impl Into<TypeName>, phase: ConfigPhase) -> Self {
        Self {
            root: root.into(),
            phase,
        }
    }

    /// Creator for a component registered by the root registrar
    pub fn from_component(component: &SyntheticComponent) -> Option<Self> {
        match &component.creator {
            ComponentCreator::ConfigRoot { root, phase } => Some(Self::new(root.clone(), *phase)),
            _ => None,
        }
    }

    /// Read the root from its slot, failing while it has not been populated
    pub fn create(&self, slots: &RootSlots) -> Result<RootInstance, CreationError> {
        slots
            .get(&self.root)
            .ok_or_else(|| CreationError::RootNotInitialized {
                class: self.root.clone(),
                phase: self.phase,
            })
    }

    pub fn create_typed<T: Any + Send + Sync>(
        &self,
        slots: &RootSlots,
    ) -> Result<Arc<T>, CreationError> {
        self.create(slots)?
            .downcast::<T>()
            .map_err(|_| CreationError::RootTypeMismatch {
                class: self.root.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ConfigRoot;
    use crate::steps::roots::root_component;

    #[derive(Debug, PartialEq)]
    struct HttpConfig {
        port: u16,
    }

    #[test]
    fn test_runtime_root_fails_until_populated() {
        let component =
            root_component(&ConfigRoot::new("org.acme.HttpConfig", ConfigPhase::Runtime)).unwrap();
        let creator = ConfigRootCreator::from_component(&component).unwrap();
        let slots = RootSlots::new();

        let error = creator.create(&slots).unwrap_err();
        assert_eq!(
            error,
            CreationError::RootNotInitialized {
                class: TypeName::new("org.acme.HttpConfig"),
                phase: ConfigPhase::Runtime,
            }
        );

        slots.set("org.acme.HttpConfig", HttpConfig { port: 8080 });
        let config = creator.create_typed::<HttpConfig>(&slots).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_type_mismatch() {
        let creator = ConfigRootCreator::new("org.acme.HttpConfig", ConfigPhase::BuildAndRuntimeFixed);
        let slots = RootSlots::new();
        slots.set("org.acme.HttpConfig", "not a config".to_string());

        let error = creator.create_typed::<HttpConfig>(&slots).unwrap_err();
        assert!(matches!(error, CreationError::RootTypeMismatch { .. }));
    }
}
