//! Configuration mapping generation.
//!
//! Every interface declared as a configuration mapping is loaded, handed to a
//! [`MappingEmitter`] together with its prefix, and the emitted implementations
//! are registered for loading, reflection and injection.

use crate::build::{
    BuildProducers, ComponentCreator, ConfigMapping, GeneratedClass, ParamValue, ReflectiveClass,
    SyntheticComponent,
};
use crate::config::BinderConfig;
use crate::errors::BinderError;
use crate::metadata::{DeclarationTarget, MetadataSource, MethodInfo, TypeName, TypeRef};
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;

/// Name of the mapping creator parameter carrying the interface
pub const MAPPING_TYPE_PARAM: &str = "type";

/// Suffix of generated mapping implementation classes
pub const IMPLEMENTATION_SUFFIX: &str = "$$CMImpl";

pub type BoxError = Box<dyn Error + Send + Sync>;

/// Fully resolved class handed to the emitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedClass {
    pub name: TypeName,
    pub interface: bool,
    pub methods: Vec<MethodInfo>,
}

/// Resolves a class by name at build time
pub trait ClassLoader {
    fn load_class(&self, name: &TypeName) -> Result<LoadedClass, BoxError>;
}

/// One generated implementation of a mapping group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingImplementation {
    pub class_name: String,
    pub bytes: Vec<u8>,
    /// Interface this implementation is bound to
    pub interface: TypeName,
}

/// Code-emission backend for mapping implementations
pub trait MappingEmitter {
    /// Produce one implementation per mapping group found in `mapping`
    fn emit(&self, mapping: &LoadedClass, prefix: &str)
        -> Result<Vec<MappingImplementation>, BoxError>;
}

/// Class loader answering from the metadata index
pub struct SnapshotClassLoader<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: MetadataSource + ?Sized> SnapshotClassLoader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }
}

impl<S: MetadataSource + ?Sized> ClassLoader for SnapshotClassLoader<'_, S> {
    fn load_class(&self, name: &TypeName) -> Result<LoadedClass, BoxError> {
        let class = self
            .source
            .class_info(name)
            .ok_or_else(|| format!("class {} is not present in the index", name))?;

        Ok(LoadedClass {
            name: class.name.clone(),
            interface: class.interface,
            methods: class.methods.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct MappingManifest<'m> {
    interface: &'m TypeName,
    prefix: &'m str,
    properties: Vec<&'m str>,
}

/// Emitter writing a JSON manifest per mapping group.
///
/// Methods returning another interface are treated as nested groups and get
/// their own implementation, prefixed with the method name.
pub struct ManifestEmitter<'a, L: ClassLoader + ?Sized> {
    loader: &'a L,
}

impl<'a, L: ClassLoader + ?Sized> ManifestEmitter<'a, L> {
    pub fn new(loader: &'a L) -> Self {
        Self { loader }
    }

    fn emit_group(
        &self,
        group: &LoadedClass,
        prefix: &str,
        visited: &mut HashSet<TypeName>,
        out: &mut Vec<MappingImplementation>,
    ) -> Result<(), BoxError> {
        if !visited.insert(group.name.clone()) {
            return Ok(());
        }

        let manifest = MappingManifest {
            interface: &group.name,
            prefix,
            properties: group.methods.iter().map(|m| m.name.as_str()).collect(),
        };
        out.push(MappingImplementation {
            class_name: format!("{}{}", group.name, IMPLEMENTATION_SUFFIX),
            bytes: serde_json::to_vec(&manifest)?,
            interface: group.name.clone(),
        });

        for method in &group.methods {
            let Some(nested) = self.nested_group(&method.return_type) else {
                continue;
            };
            let nested_prefix = if prefix.is_empty() {
                method.name.clone()
            } else {
                format!("{}.{}", prefix, method.name)
            };
            self.emit_group(&nested, &nested_prefix, visited, out)?;
        }

        Ok(())
    }

    fn nested_group(&self, return_type: &TypeRef) -> Option<LoadedClass> {
        match return_type {
            TypeRef::Class { name } => self
                .loader
                .load_class(name)
                .ok()
                .filter(|class| class.interface),
            _ => None,
        }
    }
}

impl<L: ClassLoader + ?Sized> MappingEmitter for ManifestEmitter<'_, L> {
    fn emit(
        &self,
        mapping: &LoadedClass,
        prefix: &str,
    ) -> Result<Vec<MappingImplementation>, BoxError> {
        let mut out = Vec::new();
        self.emit_group(mapping, prefix, &mut HashSet::new(), &mut out)?;
        Ok(out)
    }
}

pub struct MappingGenerator<'a> {
    config: &'a BinderConfig,
}

impl<'a> MappingGenerator<'a> {
    pub fn new(config: &'a BinderConfig) -> Self {
        Self { config }
    }

    /// Generate and register every declared mapping
    pub fn generate<S, L, E>(
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
        for declaration in source.declarations(&self.config.mapping_annotation) {
            let DeclarationTarget::Class { name } = &declaration.target else {
                tracing::debug!(
                    "Ignoring {} placed on {:?}",
                    self.config.mapping_annotation,
                    declaration.target
                );
                continue;
            };

            let loaded = loader
                .load_class(name)
                .map_err(|e| BinderError::class_loading(name.to_string(), e))?;
            let prefix = declaration.annotation.value("prefix").unwrap_or("");

            let implementations = emitter
                .emit(&loaded, prefix)
                .map_err(|e| BinderError::mapping_generation(name.to_string(), e.to_string()))?;
            if implementations.is_empty() {
                return Err(BinderError::mapping_generation(
                    name.to_string(),
                    "no implementation was generated",
                ));
            }

            let mut implementation_names = Vec::with_capacity(implementations.len());
            for implementation in implementations {
                producers.reflective_classes.produce(
                    ReflectiveClass::new(implementation.interface.to_string()).methods(true),
                );
                producers.reflective_classes.produce(
                    ReflectiveClass::new(implementation.class_name.clone()).constructors(true),
                );
                implementation_names.push(implementation.class_name.clone());
                producers.generated_classes.produce(GeneratedClass {
                    name: implementation.class_name,
                    bytes: implementation.bytes,
                    source_interface: implementation.interface,
                    application_class: true,
                });
            }

            tracing::info!(
                "Generated {} implementation(s) for config mapping {} with prefix '{}'",
                implementation_names.len(),
                name,
                prefix
            );

            producers.config_mappings.produce(ConfigMapping {
                interface: name.clone(),
                prefix: prefix.to_string(),
                implementations: implementation_names,
            });

            producers.synthetic_components.produce(
                SyntheticComponent::configure(name.clone())
                    .add_type(TypeRef::class(name.clone()))
                    .creator(ComponentCreator::ConfigMapping {
                        creator: self.config.mapping_creator.clone(),
                    })
                    .param(MAPPING_TYPE_PARAM, ParamValue::Type(name.clone()))
                    .done(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{AnnotatedDeclaration, AnnotationInstance, ClassInfo, MetadataSnapshot};

    fn mapping(prefix: Option<&str>, class: &str) -> AnnotatedDeclaration {
        let mut annotation = AnnotationInstance::new("elif.config.ConfigMapping");
        if let Some(prefix) = prefix {
            annotation = annotation.with_value("prefix", prefix);
        }
        AnnotatedDeclaration::on_class(annotation, class)
    }

    fn run(snapshot: &MetadataSnapshot) -> Result<BuildProducers, BinderError> {
        let config = BinderConfig::new();
        let loader = SnapshotClassLoader::new(snapshot);
        let emitter = ManifestEmitter::new(&loader);
        let producers = BuildProducers::new();
        MappingGenerator::new(&config).generate(snapshot, &loader, &emitter, &producers)?;
        Ok(producers)
    }

    #[test]
    fn test_prefix_is_read_or_defaults_to_empty() {
        let snapshot = MetadataSnapshot::new()
            .with_class(ClassInfo::interface("org.acme.AppConfig"))
            .with_class(ClassInfo::interface("org.acme.OtherConfig"))
            .with_declaration(mapping(Some("app"), "org.acme.AppConfig"))
            .with_declaration(mapping(None, "org.acme.OtherConfig"));

        let mappings = run(&snapshot).unwrap().config_mappings.into_items();
        assert_eq!(mappings[0].prefix, "app");
        assert_eq!(mappings[1].prefix, "");
    }

    #[test]
    fn test_nested_groups_yield_one_mapping() {
        let snapshot = MetadataSnapshot::new()
            .with_class(
                ClassInfo::interface("org.acme.ServerConfig")
                    .with_method("host", TypeRef::class("java.lang.String"))
                    .with_method("ssl", TypeRef::class("org.acme.SslConfig")),
            )
            .with_class(
                ClassInfo::interface("org.acme.SslConfig")
                    .with_method("enabled", TypeRef::class("java.lang.Boolean")),
            )
            .with_declaration(mapping(Some("server"), "org.acme.ServerConfig"));

        let producers = run(&snapshot).unwrap();

        let generated = producers.generated_classes.into_items();
        assert_eq!(generated.len(), 2);
        assert_eq!(generated[0].name, "org.acme.ServerConfig$$CMImpl");
        assert_eq!(generated[1].source_interface, TypeName::new("org.acme.SslConfig"));

        let mappings = producers.config_mappings.into_items();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].implementations.len(), 2);

        let reflective = producers.reflective_classes.into_items();
        assert!(reflective.contains(&ReflectiveClass::new("org.acme.SslConfig").methods(true)));
        assert!(reflective
            .contains(&ReflectiveClass::new("org.acme.SslConfig$$CMImpl").constructors(true)));

        let components = producers.synthetic_components.into_items();
        assert_eq!(components.len(), 1);
        assert_eq!(
            components[0].param(MAPPING_TYPE_PARAM),
            Some(&ParamValue::Type(TypeName::new("org.acme.ServerConfig")))
        );
    }

    #[test]
    fn test_unloadable_interface_is_fatal() {
        let snapshot =
            MetadataSnapshot::new().with_declaration(mapping(Some("app"), "org.acme.Missing"));

        let error = run(&snapshot).err().unwrap();
        assert!(error.is_class_loading());
        assert!(error.to_string().contains("org.acme.Missing"));
    }

    #[test]
    fn test_non_class_targets_are_skipped() {
        let snapshot = MetadataSnapshot::new().with_declaration(AnnotatedDeclaration {
            annotation: AnnotationInstance::new("elif.config.ConfigMapping"),
            target: DeclarationTarget::Method {
                declaring_class: TypeName::new("org.acme.Producers"),
                name: "config".to_string(),
            },
        });

        let producers = run(&snapshot).unwrap();
        assert!(producers.config_mappings.is_empty());
    }

    #[test]
    fn test_manifest_bytes_describe_the_group() {
        let loader_snapshot = MetadataSnapshot::new().with_class(
            ClassInfo::interface("org.acme.AppConfig")
                .with_method("name", TypeRef::class("java.lang.String")),
        );
        let loader = SnapshotClassLoader::new(&loader_snapshot);
        let loaded = loader.load_class(&TypeName::new("org.acme.AppConfig")).unwrap();

        let implementations = ManifestEmitter::new(&loader).emit(&loaded, "app").unwrap();
        let manifest: serde_json::Value = serde_json::from_slice(&implementations[0].bytes).unwrap();
        assert_eq!(manifest["prefix"], "app");
        assert_eq!(manifest["properties"][0], "name");
    }
}
