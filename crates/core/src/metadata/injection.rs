use crate::metadata::{TypeName, TypeRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An annotation (or qualifier) occurrence with its explicitly set values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationInstance {
    pub name: TypeName,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl AnnotationInstance {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Set an attribute value
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Explicitly set attribute value, `None` when the attribute was left at its default
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// The program element an injection point is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InjectionTarget {
    Field {
        declaring_class: TypeName,
        name: String,
    },
    Parameter {
        declaring_class: TypeName,
        method: String,
        position: usize,
        name: String,
    },
    Method {
        declaring_class: TypeName,
        name: String,
    },
    Class {
        name: TypeName,
    },
}

impl InjectionTarget {
    pub fn field(declaring_class: impl Into<TypeName>, name: impl Into<String>) -> Self {
        InjectionTarget::Field {
            declaring_class: declaring_class.into(),
            name: name.into(),
        }
    }

    pub fn parameter(
        declaring_class: impl Into<TypeName>,
        method: impl Into<String>,
        position: usize,
        name: impl Into<String>,
    ) -> Self {
        InjectionTarget::Parameter {
            declaring_class: declaring_class.into(),
            method: method.into(),
            position,
            name: name.into(),
        }
    }
}

impl fmt::Display for InjectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectionTarget::Field {
                declaring_class,
                name,
            } => write!(f, "field {}#{}", declaring_class, name),
            InjectionTarget::Parameter {
                declaring_class,
                method,
                position,
                name,
            } => write!(
                f,
                "parameter {} (position {}) of {}#{}()",
                name, position, declaring_class, method
            ),
            InjectionTarget::Method {
                declaring_class,
                name,
            } => write!(f, "method {}#{}()", declaring_class, name),
            InjectionTarget::Class { name } => write!(f, "class {}", name),
        }
    }
}

/// A point in the program requesting an injected value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionPoint {
    pub target: InjectionTarget,
    pub required_type: TypeRef,
    #[serde(default)]
    pub qualifiers: Vec<AnnotationInstance>,
    /// Set when the point carries no qualifier and the container applied its default one
    #[serde(default)]
    pub defaulted_qualifier: bool,
}

impl InjectionPoint {
    pub fn new(target: InjectionTarget, required_type: TypeRef) -> Self {
        Self {
            target,
            required_type,
            qualifiers: Vec::new(),
            defaulted_qualifier: false,
        }
    }

    pub fn with_qualifier(mut self, qualifier: AnnotationInstance) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    pub fn defaulted(mut self) -> Self {
        self.defaulted_qualifier = true;
        self
    }

    /// Find the qualifier with the given name
    pub fn required_qualifier(&self, name: &TypeName) -> Option<&AnnotationInstance> {
        self.qualifiers.iter().find(|q| &q.name == name)
    }
}

/// Element an annotation declaration is placed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationTarget {
    Class { name: TypeName },
    Field { declaring_class: TypeName, name: String },
    Method { declaring_class: TypeName, name: String },
}

/// An annotation found in the index together with the element carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedDeclaration {
    pub annotation: AnnotationInstance,
    pub target: DeclarationTarget,
}

impl AnnotatedDeclaration {
    pub fn on_class(annotation: AnnotationInstance, class: impl Into<TypeName>) -> Self {
        Self {
            annotation,
            target: DeclarationTarget::Class { name: class.into() },
        }
    }
}
