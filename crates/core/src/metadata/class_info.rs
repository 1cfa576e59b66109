use crate::metadata::{TypeName, TypeRef};
use serde::{Deserialize, Serialize};

/// Member method declared on a class, as far as the binder needs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    pub return_type: TypeRef,
}

/// Indexed class or interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: TypeName,
    /// Outer class for nested declarations
    #[serde(default)]
    pub enclosing_class: Option<TypeName>,
    #[serde(default)]
    pub interface: bool,
    #[serde(default)]
    pub methods: Vec<MethodInfo>,
}

impl ClassInfo {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            enclosing_class: None,
            interface: false,
            methods: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<TypeName>) -> Self {
        Self {
            interface: true,
            ..Self::new(name)
        }
    }

    pub fn nested_in(mut self, enclosing: impl Into<TypeName>) -> Self {
        self.enclosing_class = Some(enclosing.into());
        self
    }

    pub fn with_method(mut self, name: impl Into<String>, return_type: TypeRef) -> Self {
        self.methods.push(MethodInfo {
            name: name.into(),
            return_type,
        });
        self
    }

    pub fn simple_name(&self) -> &str {
        self.name.simple_name()
    }
}
