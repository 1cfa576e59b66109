use crate::metadata::{ConfigPhase, TypeName, TypeRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request to keep a class reachable for reflective access at runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReflectiveClass {
    pub class_name: String,
    pub constructors: bool,
    pub methods: bool,
}

impl ReflectiveClass {
    /// Class registered for lookup by name only
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            constructors: false,
            methods: false,
        }
    }

    pub fn constructors(mut self, enabled: bool) -> Self {
        self.constructors = enabled;
        self
    }

    pub fn methods(mut self, enabled: bool) -> Self {
        self.methods = enabled;
        self
    }
}

/// Code artifact produced by the mapping emitter, to be loaded by the runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedClass {
    pub name: String,
    pub bytes: Vec<u8>,
    pub source_interface: TypeName,
    /// Loaded by the application class loader rather than the framework one
    pub application_class: bool,
}

/// Component lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentScope {
    /// New instance for every injection point
    #[default]
    Dependent,
    /// Single instance shared across the application
    Singleton,
}

impl ComponentScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentScope::Dependent => "dependent",
            ComponentScope::Singleton => "singleton",
        }
    }
}

impl std::fmt::Display for ComponentScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the container obtains an instance of a synthetic component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentCreator {
    /// Generic creator that converts a config value to the `requiredType` param
    ConfigBean { creator: TypeName },
    /// Creator instantiating the generated implementation of the `type` param
    ConfigMapping { creator: TypeName },
    /// Reads the materialized root from its slot, failing if still empty
    ConfigRoot { root: TypeName, phase: ConfigPhase },
}

/// Named creator parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    String(String),
    Type(TypeName),
}

/// Component definition added to the container without a source declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticComponent {
    pub implementation: TypeName,
    pub provider_type: TypeRef,
    pub types: Vec<TypeRef>,
    pub qualifiers: Vec<TypeName>,
    pub scope: ComponentScope,
    pub creator: ComponentCreator,
    pub params: BTreeMap<String, ParamValue>,
}

impl SyntheticComponent {
    /// Start configuring a component backed by the given class
    pub fn configure(implementation: impl Into<TypeName>) -> SyntheticComponentBuilder {
        SyntheticComponentBuilder::new(implementation.into())
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}

/// Builder for synthetic components
#[derive(Debug)]
pub struct SyntheticComponentBuilder {
    implementation: TypeName,
    provider_type: Option<TypeRef>,
    types: Vec<TypeRef>,
    qualifiers: Vec<TypeName>,
    scope: ComponentScope,
    creator: Option<ComponentCreator>,
    params: BTreeMap<String, ParamValue>,
}

impl SyntheticComponentBuilder {
    fn new(implementation: TypeName) -> Self {
        Self {
            implementation,
            provider_type: None,
            types: Vec::new(),
            qualifiers: Vec::new(),
            scope: ComponentScope::default(),
            creator: None,
            params: BTreeMap::new(),
        }
    }

    /// Type the component's instances are created as
    pub fn provider_type(mut self, provider_type: TypeRef) -> Self {
        self.provider_type = Some(provider_type);
        self
    }

    /// Add a type the component is injectable as
    pub fn add_type(mut self, ty: TypeRef) -> Self {
        self.types.push(ty);
        self
    }

    pub fn add_qualifier(mut self, qualifier: TypeName) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    pub fn scope(mut self, scope: ComponentScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn creator(mut self, creator: ComponentCreator) -> Self {
        self.creator = Some(creator);
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Finish the definition.
    ///
    /// Without an explicit provider type the implementation class is used; without
    /// declared types the provider type is the only one.
    pub fn done(self) -> SyntheticComponent {
        let provider_type = self
            .provider_type
            .unwrap_or_else(|| TypeRef::class(self.implementation.clone()));
        let types = if self.types.is_empty() {
            vec![provider_type.clone()]
        } else {
            self.types
        };
        let creator = self.creator.unwrap_or_else(|| ComponentCreator::ConfigBean {
            creator: self.implementation.clone(),
        });

        SyntheticComponent {
            implementation: self.implementation,
            provider_type,
            types,
            qualifiers: self.qualifiers,
            scope: self.scope,
            creator,
            params: self.params,
        }
    }
}

/// Declared class the container must discover even though nothing references it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalComponent {
    pub class: TypeName,
}

/// A configuration property that must be checked at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProperty {
    pub property_name: String,
    pub required_type: TypeRef,
}

impl ConfigProperty {
    pub fn new(property_name: impl Into<String>, required_type: TypeRef) -> Self {
        Self {
            property_name: property_name.into(),
            required_type,
        }
    }
}

/// A configuration mapping interface bound to a prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMapping {
    pub interface: TypeName,
    pub prefix: String,
    /// Generated implementation class names, one per mapping group
    pub implementations: Vec<String>,
}
