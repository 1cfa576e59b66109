//! Build-time configuration binding for the elif.rs container.
//!
//! The binder runs over a static [`MetadataSource`] and decides, ahead of
//! runtime, which components the container needs so that configuration values
//! can be injected without lookups at startup:
//!
//! - config-property injection points are classified; types the built-in
//!   producer cannot supply get a synthetic provider
//! - properties that must exist are grouped for a single startup check
//! - runtime-visible config roots become injectable components
//! - config mapping interfaces get generated implementations bound to a prefix
//!
//! The startup half lives in [`runtime`] and replays the recorded
//! [`StartupPlan`] once the container has validated its component graph.

pub mod build;
pub mod config;
pub mod coverage;
pub mod errors;
pub mod metadata;
pub mod processor;
pub mod runtime;
pub mod steps;

pub use build::{BuildProducer, BuildProducers, SyntheticComponent};
pub use config::{BinderConfig, ConfigError};
pub use coverage::{is_optional_wrapper, is_producer_covered};
pub use errors::{BinderError, CreationError, PropertyProblem, StartupError};
pub use metadata::{MetadataSnapshot, MetadataSource, TypeName, TypeRef};
pub use processor::{BuildOutput, ConfigBuildStep};
pub use runtime::{
    BuiltinTypeResolver, ConfigRecorder, ContainerReady, RootSlots, StartupPlan, StartupRecorder,
};
pub use steps::{ManifestEmitter, MappingEmitter, SnapshotClassLoader};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get binder version
pub fn version() -> &'static str {
    VERSION
}
