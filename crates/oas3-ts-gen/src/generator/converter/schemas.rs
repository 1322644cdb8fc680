use std::collections::HashSet;

use super::type_resolver::{TypeResolver, enum_literals};
use crate::{
  document::{CompositionMode, SchemaKind, SchemaNode},
  generator::{
    ast::{EnumMember, EnumValueType, Literal, NamedType, NamedTypeKind, Property, TypeExpr},
    metrics::GenerationWarning,
    schema_registry::{Dereferenced, SchemaRegistry, VisitStack},
  },
  naming::identifiers::{is_valid_identifier, needs_fallback, sanitize_type_name},
};

/// Converts the component schemas of a document into top-level declarations.
pub(crate) struct SchemaConverter<'a> {
  resolver: TypeResolver<'a>,
}

impl<'a> SchemaConverter<'a> {
  pub(crate) fn new(registry: &'a SchemaRegistry<'a>) -> Self {
    Self {
      resolver: TypeResolver::new(registry),
    }
  }

  /// Declarations for every component schema, in table order.
  ///
  /// A schema whose identifier was already produced by an earlier schema is skipped.
  pub(crate) fn convert_all(&self, warnings: &mut Vec<GenerationWarning>) -> Vec<NamedType> {
    let mut declared = HashSet::new();
    let mut named_types = vec![];

    for (raw_name, schema) in self.resolver.registry().iter() {
      let type_name = sanitize_type_name(raw_name);
      if !declared.insert(type_name.clone()) {
        warnings.push(GenerationWarning::DuplicateTypeName {
          schema_name: raw_name.to_string(),
          type_name,
        });
        continue;
      }

      if needs_fallback(raw_name) {
        warnings.push(GenerationWarning::TypeNameFallback {
          schema_name: raw_name.to_string(),
          type_name,
        });
      }

      named_types.push(self.convert(raw_name, schema, warnings));
    }

    named_types
  }

  pub(crate) fn convert(&self, raw_name: &str, schema: &SchemaNode, warnings: &mut Vec<GenerationWarning>) -> NamedType {
    let name = sanitize_type_name(raw_name);
    let mut visited = VisitStack::default();

    let mut named_type = match &schema.kind {
      SchemaKind::Reference(ref_path) => return self.convert_alias(raw_name, name, schema, ref_path, warnings),
      SchemaKind::Enum(values) => {
        let literals = enum_literals(values, raw_name, warnings);
        let mut named_type = NamedType::new(
          name,
          NamedTypeKind::Enum,
          TypeExpr::union(literals.iter().cloned().map(TypeExpr::Literal).collect()),
        );
        named_type.value_type = Some(enum_value_type(&literals));
        named_type.enum_members = enum_members(&literals);
        named_type
      }
      SchemaKind::Composition { mode, members } => {
        let exprs = self
          .resolver
          .resolve_members(*mode, members, raw_name, &mut visited, warnings);
        match mode {
          CompositionMode::AllOf => NamedType::new(name, NamedTypeKind::Intersection, TypeExpr::Intersection(exprs)),
          CompositionMode::OneOf | CompositionMode::AnyOf => {
            NamedType::new(name, NamedTypeKind::Union, TypeExpr::union(exprs))
          }
        }
      }
      SchemaKind::Array(_) => NamedType::new(
        name,
        NamedTypeKind::ArrayAlias,
        self.resolver.resolve_with(schema, raw_name, &mut visited, warnings),
      ),
      SchemaKind::Object(shape) => {
        let mut properties = self
          .resolver
          .object_properties(shape, raw_name, &mut visited, warnings);
        if properties.is_empty() {
          properties.push(Property::index_signature(TypeExpr::Any));
        }
        let mut named_type = NamedType::new(name, NamedTypeKind::Interface, TypeExpr::Object(properties.clone()));
        named_type.properties = properties;
        named_type
      }
      SchemaKind::Primitive(_) | SchemaKind::Unknown(_) => NamedType::new(
        name,
        NamedTypeKind::BasicAlias,
        self.resolver.resolve_with(schema, raw_name, &mut visited, warnings),
      ),
    };

    named_type.description = schema.meta.documentation();
    named_type.format.clone_from(&schema.meta.format);
    named_type.nullable = schema.meta.nullable;
    named_type.example.clone_from(&schema.meta.example);
    named_type.read_only = schema.meta.read_only;
    named_type
  }

  /// A component that is itself a reference becomes an alias of its target, unless following
  /// the chain leads back to the component, in which case it degrades to `any`.
  fn convert_alias(
    &self,
    raw_name: &str,
    name: String,
    schema: &SchemaNode,
    ref_path: &str,
    warnings: &mut Vec<GenerationWarning>,
  ) -> NamedType {
    let registry = self.resolver.registry();
    let mut visited = VisitStack::default();
    visited.push(raw_name);
    let outcome = registry.dereference(schema, &mut visited);
    visited.pop(raw_name);

    match (outcome, registry.lookup(ref_path)) {
      (Dereferenced::Schema(_), Some((target, _))) => {
        let mut named_type = NamedType::new(name, NamedTypeKind::TypeAlias, TypeExpr::Named(sanitize_type_name(target)));
        named_type.description = schema.meta.documentation();
        named_type
      }
      (Dereferenced::Circular(target), _) => {
        warnings.push(GenerationWarning::CircularReference {
          context: raw_name.to_string(),
          type_name: target.to_string(),
        });
        let mut named_type = NamedType::new(name, NamedTypeKind::BasicAlias, TypeExpr::Circular(target.to_string()));
        named_type.description = Some(format!("circular reference: {target}"));
        named_type
      }
      _ => {
        warnings.push(GenerationWarning::UnresolvedReference {
          context: raw_name.to_string(),
          reference: ref_path.to_string(),
        });
        NamedType::new(name, NamedTypeKind::BasicAlias, TypeExpr::Any)
      }
    }
  }
}

fn enum_value_type(literals: &[Literal]) -> EnumValueType {
  if literals.iter().all(|literal| matches!(literal, Literal::String(_))) {
    EnumValueType::String
  } else if literals.iter().all(|literal| matches!(literal, Literal::Number(_))) {
    EnumValueType::Number
  } else {
    EnumValueType::Mixed
  }
}

fn enum_members(literals: &[Literal]) -> Vec<EnumMember> {
  let all_identifiers = !literals.is_empty()
    && literals
      .iter()
      .all(|literal| matches!(literal, Literal::String(text) if is_valid_identifier(text)));

  if !all_identifiers {
    return vec![];
  }

  literals
    .iter()
    .filter_map(|literal| match literal {
      Literal::String(text) => Some(EnumMember {
        key: text.clone(),
        value: literal.clone(),
      }),
      _ => None,
    })
    .collect()
}
