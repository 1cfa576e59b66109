//! Name-based type resolution used by the startup checks.

use crate::metadata::PrimitiveKind;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Checks that a raw configuration value converts to one type
pub trait ValueConverter: Send + Sync {
    fn convert(&self, raw: &str) -> Result<(), String>;
}

impl<F> ValueConverter for F
where
    F: Fn(&str) -> Result<(), String> + Send + Sync,
{
    fn convert(&self, raw: &str) -> Result<(), String> {
        self(raw)
    }
}

/// Resolves a type name to the converter for that type.
///
/// `None` means the type does not exist in the running program.
pub trait TypeResolver {
    fn resolve(&self, type_name: &str) -> Option<Arc<dyn ValueConverter>>;
}

/// Raw configuration values by property name
pub trait ConfigValueSource {
    fn raw_value(&self, property: &str) -> Option<String>;
}

impl ConfigValueSource for HashMap<String, String> {
    fn raw_value(&self, property: &str) -> Option<String> {
        self.get(property).cloned()
    }
}

impl ConfigValueSource for BTreeMap<String, String> {
    fn raw_value(&self, property: &str) -> Option<String> {
        self.get(property).cloned()
    }
}

/// Resolver for primitives, their boxed forms, strings, collections and arrays
/// of those, plus any converter registered explicitly
#[derive(Clone, Default)]
pub struct BuiltinTypeResolver {
    custom: HashMap<String, Arc<dyn ValueConverter>>,
}

impl std::fmt::Debug for BuiltinTypeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinTypeResolver")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BuiltinTypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter for an application type
    pub fn with_converter(
        mut self,
        type_name: impl Into<String>,
        converter: impl ValueConverter + 'static,
    ) -> Self {
        self.custom.insert(type_name.into(), Arc::new(converter));
        self
    }

    /// Register a type the application converts implicitly from its string
    /// form, through a static factory or a string constructor. Any present
    /// value is accepted.
    pub fn with_implicit_type(self, type_name: impl Into<String>) -> Self {
        self.with_converter(type_name, |_: &str| -> Result<(), String> { Ok(()) })
    }

    pub fn with_implicit_types<I>(self, type_names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        type_names
            .into_iter()
            .fold(self, |resolver, name| resolver.with_implicit_type(name))
    }

    fn builtin(type_name: &str) -> Option<Arc<dyn ValueConverter>> {
        let primitive = match type_name {
            "java.lang.String" | "java.util.List" | "java.util.Set" => {
                return Some(Arc::new(|_: &str| -> Result<(), String> { Ok(()) }))
            }
            "java.lang.Boolean" => PrimitiveKind::Boolean,
            "java.lang.Byte" => PrimitiveKind::Byte,
            "java.lang.Short" => PrimitiveKind::Short,
            "java.lang.Integer" => PrimitiveKind::Int,
            "java.lang.Long" => PrimitiveKind::Long,
            "java.lang.Float" => PrimitiveKind::Float,
            "java.lang.Double" => PrimitiveKind::Double,
            "java.lang.Character" => PrimitiveKind::Char,
            other => PrimitiveKind::from_name(other)?,
        };
        Some(Arc::new(move |raw: &str| convert_primitive(primitive, raw)))
    }
}

impl TypeResolver for BuiltinTypeResolver {
    fn resolve(&self, type_name: &str) -> Option<Arc<dyn ValueConverter>> {
        if let Some(component) = type_name.strip_suffix("[]") {
            let element = self.resolve(component)?;
            return Some(Arc::new(move |raw: &str| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .try_for_each(|item| element.convert(item))
            }));
        }

        self.custom
            .get(type_name)
            .cloned()
            .or_else(|| Self::builtin(type_name))
    }
}

fn convert_primitive(kind: PrimitiveKind, raw: &str) -> Result<(), String> {
    let value = raw.trim();
    let result = match kind {
        PrimitiveKind::Boolean => match value.to_lowercase().as_str() {
            "true" | "false" | "yes" | "no" | "on" | "off" | "1" | "0" => Ok(()),
            _ => Err("expected a boolean".to_string()),
        },
        PrimitiveKind::Byte => value.parse::<i8>().map(drop).map_err(|e| e.to_string()),
        PrimitiveKind::Short => value.parse::<i16>().map(drop).map_err(|e| e.to_string()),
        PrimitiveKind::Int => value.parse::<i32>().map(drop).map_err(|e| e.to_string()),
        PrimitiveKind::Long => value.parse::<i64>().map(drop).map_err(|e| e.to_string()),
        PrimitiveKind::Float => value.parse::<f32>().map(drop).map_err(|e| e.to_string()),
        PrimitiveKind::Double => value.parse::<f64>().map(drop).map_err(|e| e.to_string()),
        PrimitiveKind::Char => match value.chars().count() {
            1 => Ok(()),
            _ => Err("expected a single character".to_string()),
        },
    };
    result.map_err(|message| format!("'{}': {}", raw, message))
}
