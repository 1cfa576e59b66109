use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully qualified name of a declared type, e.g. `org.acme.Foo`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Create a type name from its qualified form
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment of the name; nested classes use `$` as separator
    pub fn simple_name(&self) -> &str {
        self.0
            .rsplit(|c: char| c == '.' || c == '$')
            .next()
            .unwrap_or(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.0
    }
}

/// Primitive value kinds of the analyzed program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Char => "char",
        }
    }

    /// Look up a primitive by its source name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(PrimitiveKind::Boolean),
            "byte" => Some(PrimitiveKind::Byte),
            "short" => Some(PrimitiveKind::Short),
            "int" => Some(PrimitiveKind::Int),
            "long" => Some(PrimitiveKind::Long),
            "float" => Some(PrimitiveKind::Float),
            "double" => Some(PrimitiveKind::Double),
            "char" => Some(PrimitiveKind::Char),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a type as it appears at an injection point
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Primitive {
        primitive: PrimitiveKind,
    },
    Class {
        name: TypeName,
    },
    Parameterized {
        name: TypeName,
        #[serde(default)]
        arguments: Vec<TypeRef>,
    },
    Array {
        component: Box<TypeRef>,
    },
}

impl TypeRef {
    pub fn primitive(primitive: PrimitiveKind) -> Self {
        TypeRef::Primitive { primitive }
    }

    pub fn class(name: impl Into<TypeName>) -> Self {
        TypeRef::Class { name: name.into() }
    }

    pub fn parameterized(name: impl Into<TypeName>, arguments: Vec<TypeRef>) -> Self {
        TypeRef::Parameterized {
            name: name.into(),
            arguments,
        }
    }

    pub fn array_of(component: TypeRef) -> Self {
        TypeRef::Array {
            component: Box::new(component),
        }
    }

    /// Outer name of the type; type arguments are not part of it
    pub fn name(&self) -> TypeName {
        match self {
            TypeRef::Primitive { primitive } => TypeName::new(primitive.as_str()),
            TypeRef::Class { name } | TypeRef::Parameterized { name, .. } => name.clone(),
            TypeRef::Array { component } => TypeName::new(format!("{}[]", component.name())),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array { .. })
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive { .. })
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive { primitive } => write!(f, "{}", primitive),
            TypeRef::Class { name } => write!(f, "{}", name),
            TypeRef::Parameterized { name, arguments } => {
                let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}<{}>", name, args.join(", "))
            }
            TypeRef::Array { component } => write!(f, "{}[]", component),
        }
    }
}
