//! Startup-phase counterparts of the build steps.

pub mod mappings;
pub mod recorder;
pub mod resolver;
pub mod roots;
pub mod validator;

pub use mappings::{mappings_with_prefix, ConfigMappingWithPrefix};
pub use recorder::{ConfigRecorder, ContainerReady, StartupPlan, StartupRecorder};
pub use resolver::{BuiltinTypeResolver, ConfigValueSource, TypeResolver, ValueConverter};
pub use roots::{ConfigRootCreator, RootInstance, RootSlots};
pub use validator::validate_properties;
