//! Injection point classification.
//!
//! Turns every config-property injection point into a property name, decides
//! whether the built-in producer covers its type, and emits the properties
//! that must be checked at startup.

use crate::build::{BuildProducer, ConfigProperty};
use crate::config::BinderConfig;
use crate::coverage;
use crate::errors::BinderError;
use crate::metadata::{InjectionPoint, InjectionTarget, MetadataSource, TypeName, TypeRef};
use std::collections::HashSet;

/// Result of classifying one injection point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPoint {
    pub property_name: String,
    pub required_type: TypeRef,
    pub producer_covered: bool,
    /// Present unless the point is optional-typed or carries a real default
    pub property: Option<ConfigProperty>,
}

/// Uncovered required types, deduplicated on their outer name in discovery order
#[derive(Debug, Clone, Default)]
pub struct UncoveredTypes {
    seen: HashSet<TypeName>,
    types: Vec<TypeRef>,
}

impl UncoveredTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a type; returns false if a type with the same name was already recorded
    pub fn insert(&mut self, ty: TypeRef) -> bool {
        if self.seen.insert(ty.name()) {
            self.types.push(ty);
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeRef> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

pub struct InjectionPointClassifier<'a> {
    config: &'a BinderConfig,
}

impl<'a> InjectionPointClassifier<'a> {
    pub fn new(config: &'a BinderConfig) -> Self {
        Self { config }
    }

    /// Classify a single point; `None` when it is not a config-property point
    pub fn classify<S: MetadataSource + ?Sized>(
        &self,
        source: &S,
        point: &InjectionPoint,
    ) -> Result<Option<ClassifiedPoint>, BinderError> {
        if point.defaulted_qualifier {
            return Ok(None);
        }
        let Some(qualifier) = point.required_qualifier(&self.config.property_qualifier) else {
            return Ok(None);
        };

        let member = member_name(&point.target)?;
        let property_name = match qualifier.value("name").filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => derive_property_name(source, member.declaring_class, member.name),
        };

        let required_type = point.required_type.clone();
        let producer_covered = coverage::is_producer_covered(&required_type);

        let has_default = qualifier
            .value("defaultValue")
            .is_some_and(|value| value != self.config.unconfigured_value);
        let property = if coverage::is_optional_wrapper(&required_type) || has_default {
            None
        } else {
            Some(ConfigProperty::new(property_name.clone(), required_type.clone()))
        };

        Ok(Some(ClassifiedPoint {
            property_name,
            required_type,
            producer_covered,
            property,
        }))
    }

    /// Classify every injection point of the source.
    ///
    /// Properties to validate go to `properties`; the returned set holds the
    /// types that need a synthetic provider.
    pub fn analyze<S: MetadataSource + ?Sized>(
        &self,
        source: &S,
        properties: &BuildProducer<ConfigProperty>,
    ) -> Result<UncoveredTypes, BinderError> {
        let mut uncovered = UncoveredTypes::new();

        for point in source.injection_points() {
            let Some(classified) = self.classify(source, point)? else {
                continue;
            };

            tracing::debug!(
                "Config property '{}' of type {} injected into {}",
                classified.property_name,
                classified.required_type,
                point.target
            );

            if !classified.producer_covered {
                uncovered.insert(classified.required_type);
            }
            if let Some(property) = classified.property {
                properties.produce(property);
            }
        }

        Ok(uncovered)
    }
}

struct Member<'p> {
    declaring_class: &'p TypeName,
    name: &'p str,
}

fn member_name(target: &InjectionTarget) -> Result<Member<'_>, BinderError> {
    match target {
        InjectionTarget::Field {
            declaring_class,
            name,
        }
        | InjectionTarget::Parameter {
            declaring_class,
            name,
            ..
        } => Ok(Member {
            declaring_class,
            name,
        }),
        InjectionTarget::Method { .. } | InjectionTarget::Class { .. } => {
            Err(BinderError::unsupported_injection_target(target.to_string()))
        }
    }
}

/// `<declaring class>.<member>`, with nested classes written as `<outer>.<simple name>`
pub fn derive_property_name<S: MetadataSource + ?Sized>(
    source: &S,
    declaring_class: &TypeName,
    member: &str,
) -> String {
    let enclosing = source
        .class_info(declaring_class)
        .and_then(|class| class.enclosing_class.as_ref());

    match enclosing {
        Some(outer) => format!("{}.{}.{}", outer, declaring_class.simple_name(), member),
        None => format!("{}.{}", declaring_class, member),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{AnnotationInstance, ClassInfo, MetadataSnapshot, PrimitiveKind};

    fn qualifier() -> AnnotationInstance {
        AnnotationInstance::new("elif.config.ConfigProperty")
    }

    fn classify(snapshot: &MetadataSnapshot, point: &InjectionPoint) -> Option<ClassifiedPoint> {
        let config = BinderConfig::new();
        InjectionPointClassifier::new(&config)
            .classify(snapshot, point)
            .unwrap()
    }

    #[test]
    fn test_explicit_name_is_used_verbatim() {
        let point = InjectionPoint::new(
            InjectionTarget::field("org.acme.Foo", "bar"),
            TypeRef::class("java.lang.String"),
        )
        .with_qualifier(qualifier().with_value("name", "greeting.message"));

        let classified = classify(&MetadataSnapshot::new(), &point).unwrap();
        assert_eq!(classified.property_name, "greeting.message");
    }

    #[test]
    fn test_derived_name_for_top_level_class() {
        let snapshot = MetadataSnapshot::new().with_class(ClassInfo::new("pkg.Foo"));
        let point = InjectionPoint::new(
            InjectionTarget::field("pkg.Foo", "bar"),
            TypeRef::primitive(PrimitiveKind::Int),
        )
        .with_qualifier(qualifier());

        let classified = classify(&snapshot, &point).unwrap();
        assert_eq!(classified.property_name, "pkg.Foo.bar");
    }

    #[test]
    fn test_derived_name_for_nested_class() {
        let snapshot = MetadataSnapshot::new()
            .with_class(ClassInfo::new("Outer"))
            .with_class(ClassInfo::new("Outer$Inner").nested_in("Outer"));
        let point = InjectionPoint::new(
            InjectionTarget::parameter("Outer$Inner", "setBaz", 0, "baz"),
            TypeRef::class("java.lang.String"),
        )
        .with_qualifier(qualifier());

        let classified = classify(&snapshot, &point).unwrap();
        assert_eq!(classified.property_name, "Outer.Inner.baz");
    }

    #[test]
    fn test_empty_explicit_name_falls_back_to_derivation() {
        let point = InjectionPoint::new(
            InjectionTarget::field("pkg.Foo", "bar"),
            TypeRef::class("java.lang.String"),
        )
        .with_qualifier(qualifier().with_value("name", ""));

        let classified = classify(&MetadataSnapshot::new(), &point).unwrap();
        assert_eq!(classified.property_name, "pkg.Foo.bar");
    }

    #[test]
    fn test_defaulted_qualifier_is_skipped() {
        let point = InjectionPoint::new(
            InjectionTarget::field("pkg.Foo", "bar"),
            TypeRef::class("org.acme.Service"),
        )
        .defaulted();
        assert!(classify(&MetadataSnapshot::new(), &point).is_none());
    }

    #[test]
    fn test_other_qualifier_is_skipped() {
        let point = InjectionPoint::new(
            InjectionTarget::field("pkg.Foo", "bar"),
            TypeRef::class("org.acme.Service"),
        )
        .with_qualifier(AnnotationInstance::new("org.acme.Named"));
        assert!(classify(&MetadataSnapshot::new(), &point).is_none());
    }

    #[test]
    fn test_optional_is_never_validated() {
        let point = InjectionPoint::new(
            InjectionTarget::field("pkg.Foo", "bar"),
            TypeRef::parameterized("java.util.Optional", vec![TypeRef::class("java.lang.String")]),
        )
        .with_qualifier(qualifier().with_value("name", "maybe"));

        let classified = classify(&MetadataSnapshot::new(), &point).unwrap();
        assert!(classified.property.is_none());
        assert!(classified.producer_covered);
    }

    #[test]
    fn test_optional_primitives_without_name_are_not_validated() {
        for wrapper in ["java.util.OptionalInt", "java.util.OptionalLong"] {
            let point = InjectionPoint::new(
                InjectionTarget::field("pkg.Foo", "bar"),
                TypeRef::class(wrapper),
            )
            .with_qualifier(qualifier());

            let classified = classify(&MetadataSnapshot::new(), &point).unwrap();
            assert_eq!(classified.property_name, "pkg.Foo.bar");
            assert!(classified.property.is_none(), "{} was validated", wrapper);
        }
    }

    #[test]
    fn test_optional_with_sentinel_default_is_not_validated() {
        let config = BinderConfig::new();
        let point = InjectionPoint::new(
            InjectionTarget::field("pkg.Foo", "bar"),
            TypeRef::parameterized("java.util.Optional", vec![TypeRef::class("java.lang.String")]),
        )
        .with_qualifier(qualifier().with_value("defaultValue", config.unconfigured_value.clone()));

        let classified = classify(&MetadataSnapshot::new(), &point).unwrap();
        assert!(classified.property.is_none());
    }

    #[test]
    fn test_default_value_skips_validation() {
        let point = InjectionPoint::new(
            InjectionTarget::field("pkg.Foo", "bar"),
            TypeRef::primitive(PrimitiveKind::Int),
        )
        .with_qualifier(qualifier().with_value("defaultValue", "8080"));

        let classified = classify(&MetadataSnapshot::new(), &point).unwrap();
        assert!(classified.property.is_none());
    }

    #[test]
    fn test_sentinel_default_is_still_validated() {
        let config = BinderConfig::new();
        let point = InjectionPoint::new(
            InjectionTarget::field("pkg.Foo", "bar"),
            TypeRef::primitive(PrimitiveKind::Int),
        )
        .with_qualifier(qualifier().with_value("defaultValue", config.unconfigured_value.clone()));

        let classified = classify(&MetadataSnapshot::new(), &point).unwrap();
        assert_eq!(
            classified.property,
            Some(ConfigProperty::new(
                "pkg.Foo.bar",
                TypeRef::primitive(PrimitiveKind::Int)
            ))
        );
    }

    #[test]
    fn test_unsupported_target_is_fatal() {
        let config = BinderConfig::new();
        let point = InjectionPoint::new(
            InjectionTarget::Method {
                declaring_class: TypeName::new("pkg.Foo"),
                name: "init".to_string(),
            },
            TypeRef::class("java.lang.String"),
        )
        .with_qualifier(qualifier());

        let result = InjectionPointClassifier::new(&config).classify(&MetadataSnapshot::new(), &point);
        assert!(result.unwrap_err().is_unsupported_target());
    }

    #[test]
    fn test_unsupported_target_with_explicit_name_is_fatal() {
        let config = BinderConfig::new();
        let point = InjectionPoint::new(
            InjectionTarget::Method {
                declaring_class: TypeName::new("pkg.Foo"),
                name: "init".to_string(),
            },
            TypeRef::class("java.lang.String"),
        )
        .with_qualifier(qualifier().with_value("name", "greeting"));

        let result = InjectionPointClassifier::new(&config).classify(&MetadataSnapshot::new(), &point);
        assert!(result.unwrap_err().is_unsupported_target());
    }

    #[test]
    fn test_uncovered_types_dedup_on_outer_name() {
        let mut uncovered = UncoveredTypes::new();
        assert!(uncovered.insert(TypeRef::parameterized(
            "org.acme.Box",
            vec![TypeRef::class("org.acme.A")]
        )));
        assert!(!uncovered.insert(TypeRef::parameterized(
            "org.acme.Box",
            vec![TypeRef::class("org.acme.B")]
        )));
        assert!(uncovered.insert(TypeRef::class("java.time.Duration")));
        assert_eq!(uncovered.len(), 2);
    }
}
