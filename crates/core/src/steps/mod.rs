//! Build steps of the configuration binding pass.

pub mod classifier;
pub mod mapping;
pub mod roots;
pub mod synthetic;
pub mod validation;

pub use classifier::{ClassifiedPoint, InjectionPointClassifier, UncoveredTypes};
pub use mapping::{
    ClassLoader, LoadedClass, ManifestEmitter, MappingEmitter, MappingGenerator,
    MappingImplementation, SnapshotClassLoader,
};
pub use synthetic::SyntheticProviderRegistry;
pub use validation::{collect_property_types, PropertyTypeMap};
