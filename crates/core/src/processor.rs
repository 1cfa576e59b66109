//! The configuration binding pass.

use crate::build::{
    AdditionalComponent, BuildProducers, ComponentCreator, ConfigMapping, ConfigProperty, GeneratedClass,
    ReflectiveClass, SyntheticComponent,
};
use crate::config::BinderConfig;
use crate::errors::BinderError;
use crate::metadata::{MetadataSource, TypeName, TypeRef};
use crate::runtime::StartupPlan;
use crate::steps::{
    collect_property_types, roots, ClassLoader, InjectionPointClassifier, MappingEmitter,
    MappingGenerator, PropertyTypeMap, SyntheticProviderRegistry,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything the pass hands to the container builder and the startup stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOutput {
    pub additional_components: Vec<AdditionalComponent>,
    pub synthetic_components: Vec<SyntheticComponent>,
    pub reflective_classes: Vec<ReflectiveClass>,
    pub generated_classes: Vec<GeneratedClass>,
    pub config_properties: Vec<ConfigProperty>,
    pub config_mappings: Vec<ConfigMapping>,
    pub startup_plan: StartupPlan,
}

impl BuildOutput {
    pub fn to_json(&self) -> Result<String, BinderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self, BinderError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Application types backed by a synthetic config provider.
    ///
    /// Array providers contribute their element type; primitive elements are
    /// left out since they always resolve.
    pub fn provided_types(&self) -> BTreeSet<TypeName> {
        self.synthetic_components
            .iter()
            .filter(|component| matches!(component.creator, ComponentCreator::ConfigBean { .. }))
            .filter_map(|component| {
                let mut ty = &component.provider_type;
                while let TypeRef::Array { component: element } = ty {
                    ty = &**element;
                }
                (!ty.is_primitive()).then(|| ty.name())
            })
            .collect()
    }
}

/// Configuration build step.
///
/// Each method mirrors one stage of the pass and writes to the shared
/// [`BuildProducers`]; [`ConfigBuildStep::run`] chains them over one snapshot.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuildStep {
    config: BinderConfig,
}

impl ConfigBuildStep {
    pub fn new(config: BinderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    /// Make the built-in value producer discoverable by the container
    pub fn register_producer(&self, producers: &BuildProducers) {
        producers.additional_components.produce(AdditionalComponent {
            class: self.config.producer_component.clone(),
        });
    }

    /// Classify injection points and register synthetic providers for uncovered types
    pub fn analyze_injection_points<S: MetadataSource + ?Sized>(
        &self,
        source: &S,
        producers: &BuildProducers,
    ) -> Result<(), BinderError> {
        let uncovered = InjectionPointClassifier::new(&self.config)
            .analyze(source, &producers.config_properties)?;

        SyntheticProviderRegistry::new(&self.config).register(
            &uncovered,
            &producers.synthetic_components,
            &producers.reflective_classes,
        );
        Ok(())
    }

    /// Group the collected properties for the startup check
    pub fn validate_config_properties(&self, producers: &BuildProducers) -> PropertyTypeMap {
        collect_property_types(
            &producers.config_properties.items(),
            &producers.reflective_classes,
        )
    }

    pub fn register_config_roots<S: MetadataSource + ?Sized>(
        &self,
        source: &S,
        producers: &BuildProducers,
    ) {
        roots::register_config_roots(source.config_roots(), &producers.synthetic_components);
    }

    pub fn generate_config_mappings<S, L, E>(
        &self,
        source: &S,
        loader: &L,
        emitter: &E,
        producers: &BuildProducers,
    ) -> Result<(), BinderError>
    where
        S: MetadataSource + ?Sized,
        L: ClassLoader + ?Sized,
        E: MappingEmitter + ?Sized,
    {
        MappingGenerator::new(&self.config).generate(source, loader, emitter, producers)
    }

    /// Run every stage over one snapshot
    pub fn run<S, L, E>(&self, source: &S, loader: &L, emitter: &E) -> Result<BuildOutput, BinderError>
    where
        S: MetadataSource + ?Sized,
        L: ClassLoader + ?Sized,
        E: MappingEmitter + ?Sized,
    {
        tracing::info!(
            "Starting config binding over {} injection points",
            source.injection_points().len()
        );

        let producers = BuildProducers::new();
        self.register_producer(&producers);
        self.analyze_injection_points(source, &producers)?;
        let property_types = self.validate_config_properties(&producers);
        self.register_config_roots(source, &producers);
        self.generate_config_mappings(source, loader, emitter, &producers)?;

        let config_mappings = producers.config_mappings.into_items();
        let startup_plan = StartupPlan::new(property_types, &config_mappings);

        let output = BuildOutput {
            additional_components: producers.additional_components.into_items(),
            synthetic_components: producers.synthetic_components.into_items(),
            reflective_classes: producers.reflective_classes.into_items(),
            generated_classes: producers.generated_classes.into_items(),
            config_properties: producers.config_properties.into_items(),
            config_mappings,
            startup_plan,
        };

        tracing::info!(
            "Config binding finished: {} synthetic components, {} generated classes, {} properties to validate",
            output.synthetic_components.len(),
            output.generated_classes.len(),
            output.startup_plan.property_types.len()
        );
        Ok(output)
    }
}
