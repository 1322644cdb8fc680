
use crate::generator::ast::{NamedType, NamedTypeKind, Property, TypeExpr};

pub(super) fn named(name: &str) -> TypeExpr {
  TypeExpr::Named(name.to_string())
}

pub(super) fn alias(name: &str, definition: TypeExpr) -> NamedType {
  NamedType::new(name, NamedTypeKind::TypeAlias, definition)
}

pub(super) fn interface(name: &str, properties: Vec<(&str, TypeExpr)>) -> NamedType {
  let properties: Vec<Property> = properties
    .into_iter()
    .map(|(key, type_expr)| Property {
      name: key.to_string(),
      type_expr,
      required: false,
      read_only: false,
      description: None,
      example: None,
      is_index_signature: false,
    })
    .collect();
  let mut named_type = NamedType::new(name, NamedTypeKind::Interface, TypeExpr::Object(properties.clone()));
  named_type.properties = properties;
  named_type
}

pub(super) fn names(types: &[NamedType]) -> Vec<&str> {
  types.iter().map(|t| t.name.as_str()).collect()
}
