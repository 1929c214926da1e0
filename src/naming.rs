//! Canonical names for a mapping between two types.
//!
//! All functions here are pure and total: any source type name and target
//! class produce a name, with no lookups and no failure modes.

use serde::{Deserialize, Serialize};

/// Separator between namespace segments in a qualified type name.
pub const NAMESPACE_SEPARATOR: char = '.';

/// The class a mapping writes into, as seen at its declaration site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetClass {
    /// Declared class name.
    pub name: String,
    /// Name of the nearest enclosing namespace, if the class has one.
    pub namespace: Option<String>,
}

impl TargetClass {
    /// Creates a target class descriptor.
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self { name: name.into(), namespace: namespace.map(str::to_string) }
    }

    /// Builds a descriptor from a qualified name, splitting at the last separator.
    #[must_use]
    pub fn from_qualified(qualified: &str) -> Self {
        match qualified.rsplit_once(NAMESPACE_SEPARATOR) {
            Some((namespace, name)) => Self::new(name, Some(namespace)),
            None => Self::new(qualified, None),
        }
    }

    /// Namespace and name joined by the separator, or the bare name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}{NAMESPACE_SEPARATOR}{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// The (source type, target class) combination a mapper is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypePair {
    /// Qualified source type name as supplied by the trigger.
    pub source_type_name: String,
    /// Target class descriptor.
    pub target: TargetClass,
}

/// Names derived from a [`TypePair`] for one mapping direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperIdentity {
    /// Generated class name, `<Left>2<Right>Mapper`.
    pub class_name: String,
    /// Last segment of the source type name.
    pub short_source_name: String,
    /// Target namespace and class name joined by the separator.
    pub qualified_target_name: String,
}

impl TypePair {
    /// Creates a type pair.
    pub fn new(source_type_name: impl Into<String>, target: TargetClass) -> Self {
        Self { source_type_name: source_type_name.into(), target }
    }

    /// Last segment of the source type name.
    #[must_use]
    pub fn short_source_name(&self) -> &str {
        short_name(&self.source_type_name)
    }

    /// Qualified name of the target class.
    #[must_use]
    pub fn qualified_target_name(&self) -> String {
        self.target.qualified_name()
    }

    /// `<ShortSource>2<Target>Mapper`
    #[must_use]
    pub fn direct_mapper_name(&self) -> String {
        mapper_class_name(self.short_source_name(), &self.target.name)
    }

    /// `<Target>2<ShortSource>Mapper`
    #[must_use]
    pub fn opposite_mapper_name(&self) -> String {
        mapper_class_name(&self.target.name, self.short_source_name())
    }

    /// Exchanges the source and target roles.
    #[must_use]
    pub fn swap(&self) -> Self {
        Self {
            source_type_name: self.qualified_target_name(),
            target: TargetClass::from_qualified(&self.source_type_name),
        }
    }

    /// Identity of the source-to-target mapper.
    #[must_use]
    pub fn identity(&self) -> MapperIdentity {
        MapperIdentity {
            class_name: self.direct_mapper_name(),
            short_source_name: self.short_source_name().to_string(),
            qualified_target_name: self.qualified_target_name(),
        }
    }

    /// Identity of the target-to-source mapper.
    #[must_use]
    pub fn opposite_identity(&self) -> MapperIdentity {
        MapperIdentity {
            class_name: self.opposite_mapper_name(),
            short_source_name: self.target.name.clone(),
            qualified_target_name: self.source_type_name.clone(),
        }
    }
}

/// Substring after the last namespace separator, or the whole string.
#[must_use]
pub fn short_name(qualified: &str) -> &str {
    qualified.rsplit_once(NAMESPACE_SEPARATOR).map_or(qualified, |(_, name)| name)
}

/// Fills the `<Left>2<Right>Mapper` naming template.
#[must_use]
pub fn mapper_class_name(left: &str, right: &str) -> String {
    format!("{left}2{right}Mapper")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_pair() -> TypePair {
        TypePair::new("Legacy.Data.CustomerDto", TargetClass::new("Customer", Some("App.Models")))
    }

    #[test]
    fn short_name_takes_last_segment() {
        assert_eq!(short_name("A.B.C"), "C");
        assert_eq!(short_name("C"), "C");
    }

    #[test]
    fn direct_and_opposite_names() {
        let pair = customer_pair();
        assert_eq!(pair.direct_mapper_name(), "CustomerDto2CustomerMapper");
        assert_eq!(pair.opposite_mapper_name(), "Customer2CustomerDtoMapper");
        assert_eq!(pair.qualified_target_name(), "App.Models.Customer");
    }

    #[test]
    fn unqualified_source_keeps_its_name() {
        let pair = TypePair::new("Dto", TargetClass::new("Customer", None));
        assert_eq!(pair.direct_mapper_name(), "Dto2CustomerMapper");
        assert_eq!(pair.qualified_target_name(), "Customer");
    }

    #[test]
    fn naming_is_symmetric_under_swap() {
        let pairs = [
            customer_pair(),
            TypePair::new("Dto", TargetClass::new("Customer", None)),
            TypePair::new("A.B", TargetClass::new("C", Some("D.E.F"))),
        ];
        for pair in pairs {
            assert_eq!(pair.direct_mapper_name(), pair.swap().opposite_mapper_name());
            assert_eq!(pair.opposite_mapper_name(), pair.swap().direct_mapper_name());
        }
    }

    #[test]
    fn opposite_identity_reverses_roles() {
        let identity = customer_pair().opposite_identity();
        assert_eq!(identity.class_name, "Customer2CustomerDtoMapper");
        assert_eq!(identity.short_source_name, "Customer");
        assert_eq!(identity.qualified_target_name, "Legacy.Data.CustomerDto");
    }
}
