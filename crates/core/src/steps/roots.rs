//! Exposes runtime-visible configuration roots as injectable components.

use crate::build::{BuildProducer, ComponentCreator, ComponentScope, SyntheticComponent};
use crate::metadata::{ConfigRoot, TypeRef};

/// Component definition for a root, or `None` for build-only roots
pub fn root_component(root: &ConfigRoot) -> Option<SyntheticComponent> {
    if !root.phase.is_runtime_visible() {
        return None;
    }

    Some(
        SyntheticComponent::configure(root.class.clone())
            .add_type(TypeRef::class(root.class.clone()))
            .scope(ComponentScope::Dependent)
            .creator(ComponentCreator::ConfigRoot {
                root: root.class.clone(),
                phase: root.phase,
            })
            .done(),
    )
}

/// Register every runtime-visible root
pub fn register_config_roots(
    roots: &[ConfigRoot],
    components: &BuildProducer<SyntheticComponent>,
) {
    for root in roots {
        match root_component(root) {
            Some(component) => {
                tracing::debug!("Exposing config root {} ({})", root.class, root.phase);
                components.produce(component);
            }
            None => tracing::debug!("Config root {} is build-only, not exposed", root.class),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ConfigPhase;

    #[test]
    fn test_build_only_root_is_not_exposed() {
        let root = ConfigRoot::new("org.acme.BuildConfig", ConfigPhase::BuildOnly);
        assert!(root_component(&root).is_none());
    }

    #[test]
    fn test_runtime_roots_are_dependent_components() {
        let roots = vec![
            ConfigRoot::new("org.acme.BuildConfig", ConfigPhase::BuildOnly),
            ConfigRoot::new("org.acme.FixedConfig", ConfigPhase::BuildAndRuntimeFixed),
            ConfigRoot::new("org.acme.RuntimeConfig", ConfigPhase::Runtime),
        ];
        let components = BuildProducer::new();
        register_config_roots(&roots, &components);

        let components = components.into_items();
        assert_eq!(components.len(), 2);
        assert_eq!(components[1].scope, ComponentScope::Dependent);
        assert_eq!(
            components[1].creator,
            ComponentCreator::ConfigRoot {
                root: "org.acme.RuntimeConfig".into(),
                phase: ConfigPhase::Runtime,
            }
        );
    }
}
