//! Program metadata consumed by the binder.
//!
//! The binder never inspects a program directly: it reads a [`MetadataSource`]
//! (usually a [`MetadataSnapshot`] produced by the indexer) describing classes,
//! injection points, annotation declarations and configuration roots.

pub mod class_info;
pub mod config_root;
pub mod injection;
pub mod snapshot;
pub mod types;

pub use class_info::{ClassInfo, MethodInfo};
pub use config_root::{ConfigPhase, ConfigRoot};
pub use injection::{
    AnnotatedDeclaration, AnnotationInstance, DeclarationTarget, InjectionPoint, InjectionTarget,
};
pub use snapshot::{MetadataSnapshot, MetadataSource};
pub use types::{PrimitiveKind, TypeName, TypeRef};
