//! Type coverage table: which required types the built-in producer satisfies.

use crate::metadata::{TypeName, TypeRef};
use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref WELL_KNOWN: WellKnownTypes = WellKnownTypes::new();
}

/// Immutable lookup table of well-known type names
#[derive(Debug)]
pub struct WellKnownTypes {
    producer_covered: HashSet<TypeName>,
    optional_wrappers: HashSet<TypeName>,
}

impl WellKnownTypes {
    fn new() -> Self {
        let optional_wrappers: HashSet<TypeName> = [
            "java.util.Optional",
            "java.util.OptionalInt",
            "java.util.OptionalLong",
            "java.util.OptionalDouble",
        ]
        .into_iter()
        .map(TypeName::new)
        .collect();

        let mut producer_covered: HashSet<TypeName> = [
            "java.lang.String",
            "java.util.Set",
            "java.util.List",
            "java.lang.Boolean",
            "java.lang.Byte",
            "java.lang.Short",
            "java.lang.Integer",
            "java.lang.Long",
            "java.lang.Float",
            "java.lang.Double",
            "java.lang.Character",
        ]
        .into_iter()
        .map(TypeName::new)
        .collect();
        producer_covered.extend(optional_wrappers.iter().cloned());

        Self {
            producer_covered,
            optional_wrappers,
        }
    }

    pub fn is_producer_covered(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Array { .. } => false,
            TypeRef::Primitive { .. } => true,
            TypeRef::Class { name } | TypeRef::Parameterized { name, .. } => {
                self.producer_covered.contains(name)
            }
        }
    }

    pub fn is_optional_wrapper(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Class { name } | TypeRef::Parameterized { name, .. } => {
                self.optional_wrappers.contains(name)
            }
            TypeRef::Array { .. } | TypeRef::Primitive { .. } => false,
        }
    }
}

/// The process-wide table
pub fn well_known() -> &'static WellKnownTypes {
    &WELL_KNOWN
}

/// Whether the built-in producer can already supply a value of this type.
///
/// Arrays never are; parameterized types are matched on their outer name only.
pub fn is_producer_covered(ty: &TypeRef) -> bool {
    well_known().is_producer_covered(ty)
}

/// Whether the type is one of the optional wrappers, which are never validated
pub fn is_optional_wrapper(ty: &TypeRef) -> bool {
    well_known().is_optional_wrapper(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PrimitiveKind;

    #[test]
    fn test_covered_types() {
        let covered = [
            TypeRef::primitive(PrimitiveKind::Boolean),
            TypeRef::primitive(PrimitiveKind::Int),
            TypeRef::primitive(PrimitiveKind::Long),
            TypeRef::primitive(PrimitiveKind::Char),
            TypeRef::class("java.lang.String"),
            TypeRef::class("java.lang.Integer"),
            TypeRef::parameterized("java.util.Optional", vec![TypeRef::class("java.lang.String")]),
            TypeRef::parameterized("java.util.Set", vec![TypeRef::class("java.lang.Integer")]),
            TypeRef::class("java.util.OptionalInt"),
        ];
        for ty in &covered {
            assert!(is_producer_covered(ty), "{} should be covered", ty);
        }
    }

    #[test]
    fn test_uncovered_types() {
        assert!(!is_producer_covered(&TypeRef::array_of(TypeRef::primitive(
            PrimitiveKind::Int
        ))));
        assert!(!is_producer_covered(&TypeRef::array_of(TypeRef::class(
            "java.lang.String"
        ))));
        assert!(!is_producer_covered(&TypeRef::class("org.acme.Custom")));
        assert!(!is_producer_covered(&TypeRef::class("java.time.Duration")));
    }

    #[test]
    fn test_element_type_is_not_checked() {
        let list = TypeRef::parameterized("java.util.List", vec![TypeRef::class("org.acme.Custom")]);
        assert!(is_producer_covered(&list));
    }

    #[test]
    fn test_optional_wrappers() {
        assert!(is_optional_wrapper(&TypeRef::parameterized(
            "java.util.Optional",
            vec![TypeRef::class("java.lang.String")]
        )));
        assert!(is_optional_wrapper(&TypeRef::class("java.util.OptionalDouble")));
        assert!(!is_optional_wrapper(&TypeRef::class("java.lang.String")));
        assert!(!is_optional_wrapper(&TypeRef::primitive(PrimitiveKind::Long)));
    }
}
