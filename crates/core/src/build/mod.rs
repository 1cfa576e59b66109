//! Build items produced by the binding pass and the sinks collecting them.

pub mod items;
pub mod producer;

pub use items::*;
pub use producer::BuildProducer;

/// All sinks the binding pass writes to
#[derive(Debug, Default)]
pub struct BuildProducers {
    pub additional_components: BuildProducer<AdditionalComponent>,
    pub synthetic_components: BuildProducer<SyntheticComponent>,
    pub reflective_classes: BuildProducer<ReflectiveClass>,
    pub generated_classes: BuildProducer<GeneratedClass>,
    pub config_properties: BuildProducer<ConfigProperty>,
    pub config_mappings: BuildProducer<ConfigMapping>,
}

impl BuildProducers {
    pub fn new() -> Self {
        Self::default()
    }
}
