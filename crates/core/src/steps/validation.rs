//! Build phase of property validation: group expected types per property name.

use crate::build::{BuildProducer, ConfigProperty, ReflectiveClass};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Property name to the names of every type it is injected as
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyTypeMap(BTreeMap<String, BTreeSet<String>>);

impl PropertyTypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `property` must convert to `type_name`
    pub fn insert(&mut self, property: impl Into<String>, type_name: impl Into<String>) {
        self.0
            .entry(property.into())
            .or_default()
            .insert(type_name.into());
    }

    pub fn types_of(&self, property: &str) -> Option<&BTreeSet<String>> {
        self.0.get(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for PropertyTypeMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (property, type_name) in iter {
            map.insert(property, type_name);
        }
        map
    }
}

/// Group properties by name.
///
/// Non-primitive types are resolved by name at startup, so each one is
/// registered for reflective lookup once.
pub fn collect_property_types(
    properties: &[ConfigProperty],
    reflective_classes: &BuildProducer<ReflectiveClass>,
) -> PropertyTypeMap {
    let mut registered = HashSet::new();
    let mut map = PropertyTypeMap::new();

    for property in properties {
        let type_name = property.required_type.name().to_string();
        if !property.required_type.is_primitive() && registered.insert(type_name.clone()) {
            reflective_classes.produce(ReflectiveClass::new(type_name.clone()));
        }
        map.insert(property.property_name.clone(), type_name);
    }

    tracing::debug!(
        "Collected {} config properties for startup validation",
        map.len()
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{PrimitiveKind, TypeRef};

    #[test]
    fn test_same_name_keeps_every_type() {
        let properties = vec![
            ConfigProperty::new("timeout", TypeRef::primitive(PrimitiveKind::Long)),
            ConfigProperty::new("timeout", TypeRef::class("java.time.Duration")),
            ConfigProperty::new("timeout", TypeRef::class("java.time.Duration")),
            ConfigProperty::new("name", TypeRef::class("java.lang.String")),
        ];

        let reflective = BuildProducer::new();
        let map = collect_property_types(&properties, &reflective);

        assert_eq!(map.len(), 2);
        let timeout: Vec<&str> = map
            .types_of("timeout")
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(timeout, vec!["java.time.Duration", "long"]);
    }

    #[test]
    fn test_only_non_primitives_are_reflective() {
        let properties = vec![
            ConfigProperty::new("port", TypeRef::primitive(PrimitiveKind::Int)),
            ConfigProperty::new("host", TypeRef::class("java.lang.String")),
            ConfigProperty::new("alias", TypeRef::class("java.lang.String")),
        ];

        let reflective = BuildProducer::new();
        collect_property_types(&properties, &reflective);

        assert_eq!(
            reflective.into_items(),
            vec![ReflectiveClass::new("java.lang.String")]
        );
    }
}
