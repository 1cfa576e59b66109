use crate::errors::BinderError;
use crate::metadata::{AnnotatedDeclaration, ClassInfo, ConfigRoot, InjectionPoint, TypeName};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Read-only view over indexed program metadata
pub trait MetadataSource {
    /// Every injection point discovered by the container
    fn injection_points(&self) -> &[InjectionPoint];

    /// Indexed class by qualified name
    fn class_info(&self, name: &TypeName) -> Option<&ClassInfo>;

    /// All declarations carrying the given annotation
    fn declarations(&self, annotation: &TypeName) -> Vec<&AnnotatedDeclaration>;

    /// Declared configuration roots
    fn config_roots(&self) -> &[ConfigRoot];
}

/// Immutable, serializable metadata snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
    #[serde(default)]
    pub injection_points: Vec<InjectionPoint>,
    #[serde(default)]
    pub declarations: Vec<AnnotatedDeclaration>,
    #[serde(default)]
    pub config_roots: Vec<ConfigRoot>,
}

impl MetadataSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: ClassInfo) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_injection_point(mut self, point: InjectionPoint) -> Self {
        self.injection_points.push(point);
        self
    }

    pub fn with_declaration(mut self, declaration: AnnotatedDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn with_config_root(mut self, root: ConfigRoot) -> Self {
        self.config_roots.push(root);
        self
    }

    /// Parse a snapshot from YAML and check its consistency
    pub fn from_yaml(content: &str) -> Result<Self, BinderError> {
        let snapshot: Self = serde_yaml::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Parse a snapshot from JSON and check its consistency
    pub fn from_json(content: &str) -> Result<Self, BinderError> {
        let snapshot: Self = serde_json::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Reject duplicate or empty class names
    pub fn validate(&self) -> Result<(), BinderError> {
        let mut seen = HashSet::new();
        for class in &self.classes {
            if class.name.is_empty() {
                return Err(BinderError::invalid_snapshot("class with an empty name"));
            }
            if !seen.insert(&class.name) {
                return Err(BinderError::invalid_snapshot(format!(
                    "class {} is indexed more than once",
                    class.name
                )));
            }
        }
        Ok(())
    }
}

impl MetadataSource for MetadataSnapshot {
    fn injection_points(&self) -> &[InjectionPoint] {
        &self.injection_points
    }

    fn class_info(&self, name: &TypeName) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| &c.name == name)
    }

    fn declarations(&self, annotation: &TypeName) -> Vec<&AnnotatedDeclaration> {
        self.declarations
            .iter()
            .filter(|d| &d.annotation.name == annotation)
            .collect()
    }

    fn config_roots(&self) -> &[ConfigRoot] {
        &self.config_roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{ConfigPhase, InjectionTarget, TypeRef};

    const SNAPSHOT: &str = r#"
classes:
  - name: org.acme.Greeter
  - name: org.acme.Outer$Inner
    enclosing_class: org.acme.Outer
injection_points:
  - target:
      kind: field
      declaring_class: org.acme.Greeter
      name: greeting
    required_type:
      kind: class
      name: java.lang.String
    qualifiers:
      - name: elif.config.ConfigProperty
        values:
          name: greeting.message
declarations:
  - annotation:
      name: elif.config.ConfigMapping
      values:
        prefix: app
    target:
      kind: class
      name: org.acme.AppConfig
config_roots:
  - class: org.acme.HttpConfig
    phase: RUNTIME
"#;

    #[test]
    fn test_snapshot_from_yaml() {
        let snapshot = MetadataSnapshot::from_yaml(SNAPSHOT).unwrap();

        assert_eq!(snapshot.injection_points().len(), 1);
        let point = &snapshot.injection_points()[0];
        assert_eq!(
            point.target,
            InjectionTarget::field("org.acme.Greeter", "greeting")
        );
        assert_eq!(point.required_type, TypeRef::class("java.lang.String"));

        let inner = snapshot
            .class_info(&TypeName::new("org.acme.Outer$Inner"))
            .unwrap();
        assert_eq!(inner.enclosing_class, Some(TypeName::new("org.acme.Outer")));

        let mappings = snapshot.declarations(&TypeName::new("elif.config.ConfigMapping"));
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].annotation.value("prefix"), Some("app"));

        assert_eq!(snapshot.config_roots()[0].phase, ConfigPhase::Runtime);
    }

    #[test]
    fn test_snapshot_rejects_duplicate_classes() {
        let snapshot = MetadataSnapshot::new()
            .with_class(ClassInfo::new("org.acme.Foo"))
            .with_class(ClassInfo::new("org.acme.Foo"));
        assert!(snapshot.validate().is_err());
    }
}
