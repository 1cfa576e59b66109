//! Synthetic providers for required types the built-in producer cannot supply.

use crate::build::{
    BuildProducer, ComponentCreator, ParamValue, ReflectiveClass, SyntheticComponent,
};
use crate::config::BinderConfig;
use crate::metadata::TypeRef;
use crate::steps::classifier::UncoveredTypes;

/// Name of the creator parameter carrying the type to convert to
pub const REQUIRED_TYPE_PARAM: &str = "requiredType";

pub struct SyntheticProviderRegistry<'a> {
    config: &'a BinderConfig,
}

impl<'a> SyntheticProviderRegistry<'a> {
    pub fn new(config: &'a BinderConfig) -> Self {
        Self { config }
    }

    /// Provider definition for one required type
    pub fn provider_for(&self, ty: &TypeRef) -> SyntheticComponent {
        let implementation = if ty.is_array() {
            self.config.bean_creator.clone()
        } else {
            ty.name()
        };

        SyntheticComponent::configure(implementation)
            .provider_type(ty.clone())
            .add_type(ty.clone())
            .add_qualifier(self.config.property_qualifier.clone())
            .creator(ComponentCreator::ConfigBean {
                creator: self.config.bean_creator.clone(),
            })
            .param(
                REQUIRED_TYPE_PARAM,
                ParamValue::String(ty.name().to_string()),
            )
            .done()
    }

    /// Emit one provider per uncovered type.
    ///
    /// Non-array types are also opened for reflective construction, value
    /// conversion instantiates them by name.
    pub fn register(
        &self,
        uncovered: &UncoveredTypes,
        components: &BuildProducer<SyntheticComponent>,
        reflective_classes: &BuildProducer<ReflectiveClass>,
    ) {
        for ty in uncovered.iter() {
            if !ty.is_array() {
                reflective_classes.produce(
                    ReflectiveClass::new(ty.name().to_string()).constructors(true),
                );
            }

            tracing::debug!("Registering synthetic config provider for {}", ty);
            components.produce(self.provider_for(ty));
        }
    }
}
